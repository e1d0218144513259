//! Per-user allocation against weekly capacity.
//!
//! Assigned points come from the task data itself: the sum of story-point
//! estimates of open tasks in active projects. Nothing here is random.

use serde::Serialize;

use crate::config::DEFAULT_CAPACITY_PER_WEEK;
use crate::workspace::domain::{Project, ProjectStatus, Task, TaskStatus, User, UserId};

/// Load of one user relative to their capacity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Workload {
    points: u32,
    capacity: u32,
    percentage: f64,
    overbooked: bool,
}

impl Workload {
    /// Returns the assigned story points.
    #[must_use]
    pub const fn points(&self) -> u32 {
        self.points
    }

    /// Returns the effective weekly capacity.
    #[must_use]
    pub const fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Returns `points / capacity * 100`, unclamped.
    #[must_use]
    pub const fn percentage(&self) -> f64 {
        self.percentage
    }

    /// Returns `true` when the percentage exceeds 100.
    #[must_use]
    pub const fn is_overbooked(&self) -> bool {
        self.overbooked
    }

    /// Returns the primary bar fill, clamped to 100.
    #[must_use]
    pub fn fill_percentage(&self) -> f64 {
        self.percentage.min(100.0)
    }

    /// Returns the part of the percentage beyond 100, or 0.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "overflow past full capacity is a fractional percentage"
    )]
    pub fn overflow_percentage(&self) -> f64 {
        (self.percentage - 100.0).max(0.0)
    }
}

/// Computes the workload of `user` with the standard default capacity of 30.
#[must_use]
pub fn compute_workload(user: &User, assigned_points: u32) -> Workload {
    compute_workload_with_default(user, assigned_points, DEFAULT_CAPACITY_PER_WEEK)
}

/// Computes the workload of `user`, using `default_capacity` when the user
/// declares none.
///
/// A declared capacity of zero counts as undeclared, and a zero default falls
/// back to 30, so the ratio is always defined.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "the percentage feeds a proportional bar and is fractional"
)]
pub fn compute_workload_with_default(
    user: &User,
    assigned_points: u32,
    default_capacity: u32,
) -> Workload {
    let fallback = if default_capacity == 0 {
        DEFAULT_CAPACITY_PER_WEEK
    } else {
        default_capacity
    };
    let capacity = user
        .capacity_per_week()
        .filter(|declared| *declared > 0)
        .unwrap_or(fallback);
    let percentage = f64::from(assigned_points) / f64::from(capacity) * 100.0;

    Workload {
        points: assigned_points,
        capacity,
        percentage,
        overbooked: assigned_points > capacity,
    }
}

/// Sums the story points of tasks assigned to `user`.
///
/// Only tasks that are not done and belong to active projects count; tasks
/// without an estimate contribute nothing.
#[must_use]
pub fn assigned_points(user: &User, projects: &[Project]) -> u32 {
    projects
        .iter()
        .filter(|project| project.status() == ProjectStatus::Active)
        .flat_map(Project::tasks)
        .filter(|task| task.status() != TaskStatus::Done)
        .filter(|task| user.is_referenced_by(task.assignee_id()))
        .filter_map(Task::story_points)
        .fold(0_u32, u32::saturating_add)
}

/// Workload of one user in a report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserWorkload {
    /// User identifier.
    pub user_id: UserId,
    /// Display name.
    pub name: String,
    /// Computed load.
    pub workload: Workload,
}

/// Computes the workload of every user, in user order.
#[must_use]
pub fn workload_report(
    users: &[User],
    projects: &[Project],
    default_capacity: u32,
) -> Vec<UserWorkload> {
    users
        .iter()
        .map(|user| UserWorkload {
            user_id: user.id().clone(),
            name: user.name().to_owned(),
            workload: compute_workload_with_default(
                user,
                assigned_points(user, projects),
                default_capacity,
            ),
        })
        .collect()
}
