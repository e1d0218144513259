//! Service layer for creating and deleting projects.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::workspace::{
    domain::{Priority, Progress, Project, ProjectDraft, ProjectId, WorkspaceDomainError},
    ports::{GatewayError, ProjectPlan, WorkspaceGateway},
};

/// Request payload for creating a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProjectRequest {
    name: String,
    owner_id: String,
    description: Option<String>,
    priority: Option<Priority>,
    progress: Option<u8>,
    members: Vec<String>,
}

impl CreateProjectRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(name: impl Into<String>, owner_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            owner_id: owner_id.into(),
            description: None,
            priority: None,
            progress: None,
            members: Vec::new(),
        }
    }

    /// Creates a request from a drafted plan.
    ///
    /// The project starts active at 0% with the owner as its only member.
    #[must_use]
    pub fn from_plan(plan: ProjectPlan, owner_id: impl Into<String>) -> Self {
        let owner = owner_id.into();
        Self::new(plan.name, owner.clone())
            .with_description(plan.description)
            .with_priority(plan.priority)
            .with_progress(0)
            .with_members([owner])
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the starting progress percentage.
    #[must_use]
    pub const fn with_progress(mut self, progress: u8) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Sets the member list.
    #[must_use]
    pub fn with_members(mut self, members: impl IntoIterator<Item = String>) -> Self {
        self.members = members.into_iter().collect();
        self
    }
}

/// Service-level errors for catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] WorkspaceDomainError),
    /// The gateway rejected or failed the operation.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Project creation and deletion through the gateway.
#[derive(Clone)]
pub struct ProjectCatalogService<G>
where
    G: WorkspaceGateway,
{
    gateway: Arc<G>,
}

impl<G> ProjectCatalogService<G>
where
    G: WorkspaceGateway,
{
    /// Creates a catalog service over `gateway`.
    #[must_use]
    pub const fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Validates the request and creates the project remotely.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Domain`] for an empty name or owner or an
    /// out-of-range progress, and [`CatalogError::Gateway`] when the remote
    /// call fails.
    pub async fn create_project(&self, request: CreateProjectRequest) -> CatalogResult<Project> {
        let mut draft = ProjectDraft::new(request.name, request.owner_id)?;
        if let Some(description) = request.description {
            draft = draft.with_description(description);
        }
        if let Some(priority) = request.priority {
            draft = draft.with_priority(priority);
        }
        if let Some(progress) = request.progress {
            draft = draft.with_progress(Progress::new(progress)?);
        }
        draft = draft.with_members(request.members);

        let project = self.gateway.create_project(&draft).await?;
        info!(project_id = %project.id(), name = project.name(), "project created");
        Ok(project)
    }

    /// Creates the project a drafted plan describes, owned by `owner_id`.
    ///
    /// # Errors
    ///
    /// Fails as [`Self::create_project`] does.
    pub async fn create_from_plan(
        &self,
        plan: ProjectPlan,
        owner_id: &str,
    ) -> CatalogResult<Project> {
        self.create_project(CreateProjectRequest::from_plan(plan, owner_id))
            .await
    }

    /// Deletes the project with `project_id`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Gateway`] when the project does not exist or
    /// the remote call fails.
    pub async fn delete_project(&self, project_id: &ProjectId) -> CatalogResult<()> {
        self.gateway.delete_project(project_id).await?;
        info!(%project_id, "project deleted");
        Ok(())
    }
}
