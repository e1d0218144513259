//! Task records and partial task updates.

use super::{Priority, ProjectId, TaskId, TaskStatus};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A unit of work inside a project.
///
/// Tasks are created by the remote store and only ever change through status
/// transitions applied by the task board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    project_id: Option<ProjectId>,
    title: String,
    #[serde(default)]
    description: String,
    status: TaskStatus,
    #[serde(default)]
    priority: Priority,
    #[serde(default)]
    assignee_id: String,
    due_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    story_points: Option<u32>,
}

impl Task {
    /// Creates a task with an empty description and no estimate.
    #[must_use]
    pub fn new(
        id: impl Into<TaskId>,
        title: impl Into<String>,
        status: TaskStatus,
        due_date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            project_id: None,
            title: title.into(),
            description: String::new(),
            status,
            priority: Priority::default(),
            assignee_id: String::new(),
            due_date,
            story_points: None,
        }
    }

    /// Sets the owning project reference.
    #[must_use]
    pub fn with_project_id(mut self, project_id: impl Into<ProjectId>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the assignee reference.
    #[must_use]
    pub fn with_assignee(mut self, assignee_id: impl Into<String>) -> Self {
        self.assignee_id = assignee_id.into();
        self
    }

    /// Sets the story-point estimate.
    #[must_use]
    pub const fn with_story_points(mut self, points: u32) -> Self {
        self.story_points = Some(points);
        self
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the owning project reference, if recorded.
    #[must_use]
    pub const fn project_id(&self) -> Option<&ProjectId> {
        self.project_id.as_ref()
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the workflow status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the assignee reference. It is not required to resolve to a
    /// known user.
    #[must_use]
    pub fn assignee_id(&self) -> &str {
        &self.assignee_id
    }

    /// Returns the due date.
    #[must_use]
    pub const fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    /// Returns the story-point estimate, if any.
    #[must_use]
    pub const fn story_points(&self) -> Option<u32> {
        self.story_points
    }

    /// Applies the fields present in `patch`.
    pub(crate) fn apply(&mut self, patch: &TaskPatch) {
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(assignee_id) = &patch.assignee_id {
            self.assignee_id.clone_from(assignee_id);
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
    }

    pub(crate) const fn set_status(&mut self, status: TaskStatus) {
        self.status = status;
    }
}

/// Partial task update sent to the remote store.
///
/// Absent fields are left untouched by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    /// New workflow status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    /// New priority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// New assignee reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<String>,
    /// New due date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

impl TaskPatch {
    /// Creates a patch that only changes the status.
    #[must_use]
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Returns `true` when the patch carries no changes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.priority.is_none()
            && self.assignee_id.is_none()
            && self.due_date.is_none()
    }
}
