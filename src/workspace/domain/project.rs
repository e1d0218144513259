//! Project aggregate, progress values, and project drafts.

use super::{Priority, ProjectHealth, ProjectId, ProjectStatus, Task, WorkspaceDomainError};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Builds a calendar date, falling back to the earliest representable date
/// for impossible inputs.
pub(crate) fn calendar_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

fn default_start_date() -> NaiveDate {
    calendar_date(2024, 1, 1)
}

fn default_end_date() -> NaiveDate {
    calendar_date(2024, 12, 31)
}

/// Completion percentage in the range `0..=100`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Progress(u8);

impl Progress {
    /// Largest accepted percentage.
    pub const MAX: u8 = 100;

    /// Creates a validated progress value.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceDomainError::ProgressOutOfRange`] above 100.
    pub const fn new(percent: u8) -> Result<Self, WorkspaceDomainError> {
        if percent > Self::MAX {
            return Err(WorkspaceDomainError::ProgressOutOfRange(percent));
        }
        Ok(Self(percent))
    }

    /// Creates a progress value, saturating at 100.
    #[must_use]
    pub const fn saturating(percent: u8) -> Self {
        if percent > Self::MAX {
            Self(Self::MAX)
        } else {
            Self(percent)
        }
    }

    /// Returns the percentage.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Progress {
    type Error = WorkspaceDomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Progress> for u8 {
    fn from(value: Progress) -> Self {
        value.0
    }
}

/// Project aggregate owning its task collection.
///
/// Records from the remote store may omit `health`, the schedule, members,
/// or tasks; those load as Healthy, 2024-01-01 to 2024-12-31, and empty lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    id: ProjectId,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    status: ProjectStatus,
    #[serde(default)]
    health: ProjectHealth,
    #[serde(default)]
    priority: Priority,
    #[serde(default)]
    progress: Progress,
    #[serde(default = "default_start_date")]
    start_date: NaiveDate,
    #[serde(default = "default_end_date")]
    end_date: NaiveDate,
    #[serde(default)]
    owner_id: String,
    #[serde(default)]
    members: Vec<String>,
    #[serde(default)]
    tasks: Vec<Task>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created_at: Option<DateTime<Utc>>,
}

impl Project {
    /// Creates an active, healthy project with default schedule and no tasks.
    #[must_use]
    pub fn new(
        id: impl Into<ProjectId>,
        name: impl Into<String>,
        owner_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            status: ProjectStatus::default(),
            health: ProjectHealth::default(),
            priority: Priority::default(),
            progress: Progress::default(),
            start_date: default_start_date(),
            end_date: default_end_date(),
            owner_id: owner_id.into(),
            members: Vec::new(),
            tasks: Vec::new(),
            created_at: None,
        }
    }

    /// Materializes a draft accepted by the remote store.
    #[must_use]
    pub fn from_draft(id: ProjectId, draft: &ProjectDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name.clone(),
            description: draft.description.clone(),
            status: draft.status,
            health: ProjectHealth::default(),
            priority: draft.priority,
            progress: draft.progress,
            start_date: created_at.date_naive(),
            end_date: default_end_date(),
            owner_id: draft.owner_id.clone(),
            members: draft.members.clone(),
            tasks: Vec::new(),
            created_at: Some(created_at),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the lifecycle status.
    #[must_use]
    pub const fn with_status(mut self, status: ProjectStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the health classification.
    #[must_use]
    pub const fn with_health(mut self, health: ProjectHealth) -> Self {
        self.health = health;
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the progress.
    #[must_use]
    pub const fn with_progress(mut self, progress: Progress) -> Self {
        self.progress = progress;
        self
    }

    /// Sets the schedule.
    #[must_use]
    pub const fn with_schedule(mut self, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        self.start_date = start_date;
        self.end_date = end_date;
        self
    }

    /// Sets the member list.
    #[must_use]
    pub fn with_members<S: Into<String>>(mut self, members: impl IntoIterator<Item = S>) -> Self {
        self.members = members.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the owned task collection.
    #[must_use]
    pub fn with_tasks(mut self, tasks: impl IntoIterator<Item = Task>) -> Self {
        self.tasks = tasks.into_iter().collect();
        self
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> &ProjectId {
        &self.id
    }

    /// Returns the name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> ProjectStatus {
        self.status
    }

    /// Returns the health classification.
    #[must_use]
    pub const fn health(&self) -> ProjectHealth {
        self.health
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the externally computed progress.
    #[must_use]
    pub const fn progress(&self) -> Progress {
        self.progress
    }

    /// Returns the start date.
    #[must_use]
    pub const fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Returns the end date.
    #[must_use]
    pub const fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Returns the owner reference.
    #[must_use]
    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    /// Returns the member references. Order carries no meaning.
    #[must_use]
    pub fn members(&self) -> &[String] {
        &self.members
    }

    /// Returns the owned tasks in their stored order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the creation timestamp, if recorded.
    #[must_use]
    pub const fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    pub(crate) fn tasks_mut(&mut self) -> &mut Vec<Task> {
        &mut self.tasks
    }
}

/// Validated input for creating a project in the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDraft {
    name: String,
    description: String,
    status: ProjectStatus,
    priority: Priority,
    progress: Progress,
    owner_id: String,
    members: Vec<String>,
}

impl ProjectDraft {
    /// Creates an active draft with zero progress.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceDomainError::EmptyProjectName`] or
    /// [`WorkspaceDomainError::EmptyProjectOwner`] when either value is blank
    /// after trimming.
    pub fn new(
        name: impl Into<String>,
        owner_id: impl Into<String>,
    ) -> Result<Self, WorkspaceDomainError> {
        let name = name.into().trim().to_owned();
        if name.is_empty() {
            return Err(WorkspaceDomainError::EmptyProjectName);
        }
        let owner_id = owner_id.into().trim().to_owned();
        if owner_id.is_empty() {
            return Err(WorkspaceDomainError::EmptyProjectOwner);
        }
        Ok(Self {
            name,
            description: String::new(),
            status: ProjectStatus::Active,
            priority: Priority::default(),
            progress: Progress::default(),
            owner_id,
            members: Vec::new(),
        })
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the lifecycle status.
    #[must_use]
    pub const fn with_status(mut self, status: ProjectStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the initial progress.
    #[must_use]
    pub const fn with_progress(mut self, progress: Progress) -> Self {
        self.progress = progress;
        self
    }

    /// Sets the member list.
    #[must_use]
    pub fn with_members<S: Into<String>>(mut self, members: impl IntoIterator<Item = S>) -> Self {
        self.members = members.into_iter().map(Into::into).collect();
        self
    }

    /// Returns the name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> ProjectStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the initial progress.
    #[must_use]
    pub const fn progress(&self) -> Progress {
        self.progress
    }

    /// Returns the owner reference.
    #[must_use]
    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    /// Returns the member references.
    #[must_use]
    pub fn members(&self) -> &[String] {
        &self.members
    }
}
