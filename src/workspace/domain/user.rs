//! Team member records.

use super::UserId;
use serde::{Deserialize, Serialize};

/// A team member with a weekly story-point capacity.
///
/// Users are loaded once per session and never mutated by the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    name: String,
    #[serde(default)]
    role: String,
    #[serde(default)]
    skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    capacity_per_week: Option<u32>,
}

impl User {
    /// Creates a user without skills or a declared capacity.
    #[must_use]
    pub fn new(id: impl Into<UserId>, name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role: role.into(),
            skills: Vec::new(),
            capacity_per_week: None,
        }
    }

    /// Sets the ordered skill list.
    #[must_use]
    pub fn with_skills<S: Into<String>>(mut self, skills: impl IntoIterator<Item = S>) -> Self {
        self.skills = skills.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the weekly capacity in story points.
    #[must_use]
    pub const fn with_capacity_per_week(mut self, points: u32) -> Self {
        self.capacity_per_week = Some(points);
        self
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the role title.
    #[must_use]
    pub fn role(&self) -> &str {
        &self.role
    }

    /// Returns the skills in their declared order.
    #[must_use]
    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    /// Returns the declared weekly capacity, if any.
    #[must_use]
    pub const fn capacity_per_week(&self) -> Option<u32> {
        self.capacity_per_week
    }

    /// Returns `true` when a task assignee reference points at this user.
    ///
    /// Seeded records reference assignees by display name, so both the
    /// identifier and the name are accepted.
    #[must_use]
    pub fn is_referenced_by(&self, assignee: &str) -> bool {
        assignee == self.id.as_str() || assignee == self.name
    }
}
