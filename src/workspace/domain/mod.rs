//! Domain model for the project workspace.
//!
//! Projects own their tasks; users carry weekly capacity. The types here are
//! data contracts plus validation and hold no infrastructure concerns.

mod error;
mod ids;
mod project;
pub mod seed;
mod status;
mod task;
mod user;

pub use error::{
    ParsePriorityError, ParseProjectHealthError, ParseProjectStatusError, ParseTaskStatusError,
    WorkspaceDomainError,
};
pub use ids::{ProjectId, TaskId, UserId};
pub use project::{Progress, Project, ProjectDraft};
pub use status::{Priority, ProjectHealth, ProjectStatus, TaskStatus};
pub use task::{Task, TaskPatch};
pub use user::User;
