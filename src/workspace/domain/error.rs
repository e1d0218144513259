//! Error types for workspace domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain workspace values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorkspaceDomainError {
    /// The project name is empty after trimming.
    #[error("project name must not be empty")]
    EmptyProjectName,

    /// The project owner is empty after trimming.
    #[error("project owner must not be empty")]
    EmptyProjectOwner,

    /// The progress value exceeds 100 percent.
    #[error("invalid progress {0}, expected a value between 0 and 100")]
    ProgressOutOfRange(u8),
}

/// Error returned while parsing task statuses from the remote store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing priorities.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown priority: {0}")]
pub struct ParsePriorityError(pub String);

/// Error returned while parsing project statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown project status: {0}")]
pub struct ParseProjectStatusError(pub String);

/// Error returned while parsing project health values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown project health: {0}")]
pub struct ParseProjectHealthError(pub String);
