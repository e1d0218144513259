//! Remote gateway port for the authoritative project store.

use crate::workspace::domain::{Project, ProjectDraft, ProjectId, TaskId, TaskPatch, User};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Contract for the remote source of truth.
///
/// Every call either returns data or fails; retry policy belongs to the
/// implementation, not to callers in this crate.
#[async_trait]
pub trait WorkspaceGateway: Send + Sync {
    /// Lists all projects with their nested tasks.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] when the store cannot be read.
    async fn list_projects(&self) -> GatewayResult<Vec<Project>>;

    /// Lists all team members.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] when the store cannot be read.
    async fn list_users(&self) -> GatewayResult<Vec<User>>;

    /// Creates a project from a validated draft and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Rejected`] when the store refuses the draft.
    async fn create_project(&self, draft: &ProjectDraft) -> GatewayResult<Project>;

    /// Deletes a project together with its tasks.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::ProjectNotFound`] when no such project exists.
    async fn delete_project(&self, id: &ProjectId) -> GatewayResult<()>;

    /// Applies a partial update to a task.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::TaskNotFound`] when no such task exists.
    async fn update_task(&self, id: &TaskId, patch: &TaskPatch) -> GatewayResult<()>;
}

/// Errors returned by gateway implementations.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// The project was not found.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// The task was not found.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The store refused the request.
    #[error("request rejected: {0}")]
    Rejected(String),

    /// The store could not be reached.
    #[error("gateway unavailable: {0}")]
    Unavailable(String),

    /// The call did not complete within the caller's deadline.
    #[error("gateway call timed out after {0:?}")]
    TimedOut(Duration),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl GatewayError {
    /// Wraps a persistence error.
    #[must_use]
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
