//! In-memory implementation of the `WorkspaceGateway` port.
//!
//! Holds projects and users behind a lock and can be told to fail specific
//! calls, which is how optimistic-update rollback is exercised in tests.

use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use mockable::Clock;

use crate::workspace::{
    domain::{Project, ProjectDraft, ProjectId, Task, TaskId, TaskPatch, TaskStatus, User},
    ports::{GatewayError, GatewayResult, WorkspaceGateway},
};

/// Thread-safe in-memory workspace store.
#[derive(Debug, Clone)]
pub struct InMemoryWorkspaceGateway<C: Clock + Send + Sync> {
    store: Arc<RwLock<WorkspaceStore>>,
    clock: C,
}

#[derive(Debug, Default)]
struct WorkspaceStore {
    projects: Vec<Project>,
    users: Vec<User>,
    faults: FaultPlan,
    task_updates: Vec<(TaskId, TaskPatch)>,
}

#[derive(Debug, Default)]
struct FaultPlan {
    project_reads: Option<String>,
    user_reads: Option<String>,
    task_updates: Option<String>,
    failing_tasks: HashSet<TaskId>,
}

fn lock_error(err: impl ToString) -> GatewayError {
    GatewayError::persistence(std::io::Error::other(err.to_string()))
}

impl<C: Clock + Send + Sync> InMemoryWorkspaceGateway<C> {
    /// Creates an empty store with the given clock.
    #[must_use]
    pub fn new(clock: C) -> Self {
        Self {
            store: Arc::new(RwLock::new(WorkspaceStore::default())),
            clock,
        }
    }

    /// Replaces the stored projects.
    #[must_use]
    pub fn with_projects(self, projects: impl IntoIterator<Item = Project>) -> Self {
        if let Ok(mut store) = self.store.write() {
            store.projects = projects.into_iter().collect();
        }
        self
    }

    /// Replaces the stored users.
    #[must_use]
    pub fn with_users(self, users: impl IntoIterator<Item = User>) -> Self {
        if let Ok(mut store) = self.store.write() {
            store.users = users.into_iter().collect();
        }
        self
    }

    /// Makes `list_projects` fail with `reason` until cleared with `None`.
    pub fn fail_project_reads(&self, reason: Option<&str>) {
        if let Ok(mut store) = self.store.write() {
            store.faults.project_reads = reason.map(str::to_owned);
        }
    }

    /// Makes `list_users` fail with `reason` until cleared with `None`.
    pub fn fail_user_reads(&self, reason: Option<&str>) {
        if let Ok(mut store) = self.store.write() {
            store.faults.user_reads = reason.map(str::to_owned);
        }
    }

    /// Makes every `update_task` call fail with `reason` until cleared with
    /// `None`.
    pub fn fail_task_updates(&self, reason: Option<&str>) {
        if let Ok(mut store) = self.store.write() {
            store.faults.task_updates = reason.map(str::to_owned);
        }
    }

    /// Makes `update_task` fail for one task only.
    pub fn fail_updates_for(&self, task_id: &TaskId) {
        if let Ok(mut store) = self.store.write() {
            store.faults.failing_tasks.insert(task_id.clone());
        }
    }

    /// Returns the stored projects.
    #[must_use]
    pub fn projects(&self) -> Vec<Project> {
        self.store
            .read()
            .map(|store| store.projects.clone())
            .unwrap_or_default()
    }

    /// Returns the stored status of a task, if present.
    #[must_use]
    pub fn task_status(&self, task_id: &TaskId) -> Option<TaskStatus> {
        let store = self.store.read().ok()?;
        store
            .projects
            .iter()
            .flat_map(Project::tasks)
            .find(|task| task.id() == task_id)
            .map(Task::status)
    }

    /// Returns every `update_task` call received, including failed ones.
    #[must_use]
    pub fn task_updates(&self) -> Vec<(TaskId, TaskPatch)> {
        self.store
            .read()
            .map(|store| store.task_updates.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl<C: Clock + Send + Sync> WorkspaceGateway for InMemoryWorkspaceGateway<C> {
    async fn list_projects(&self) -> GatewayResult<Vec<Project>> {
        let store = self.store.read().map_err(lock_error)?;
        if let Some(reason) = &store.faults.project_reads {
            return Err(GatewayError::Unavailable(reason.clone()));
        }
        Ok(store.projects.clone())
    }

    async fn list_users(&self) -> GatewayResult<Vec<User>> {
        let store = self.store.read().map_err(lock_error)?;
        if let Some(reason) = &store.faults.user_reads {
            return Err(GatewayError::Unavailable(reason.clone()));
        }
        Ok(store.users.clone())
    }

    async fn create_project(&self, draft: &ProjectDraft) -> GatewayResult<Project> {
        let mut store = self.store.write().map_err(lock_error)?;
        let duplicate = store
            .projects
            .iter()
            .any(|project| project.name().eq_ignore_ascii_case(draft.name()));
        if duplicate {
            return Err(GatewayError::Rejected(format!(
                "a project named '{}' already exists",
                draft.name()
            )));
        }
        let project = Project::from_draft(ProjectId::generate(), draft, self.clock.utc());
        store.projects.push(project.clone());
        Ok(project)
    }

    async fn delete_project(&self, id: &ProjectId) -> GatewayResult<()> {
        let mut store = self.store.write().map_err(lock_error)?;
        let before = store.projects.len();
        store.projects.retain(|project| project.id() != id);
        if store.projects.len() == before {
            return Err(GatewayError::ProjectNotFound(id.clone()));
        }
        Ok(())
    }

    async fn update_task(&self, id: &TaskId, patch: &TaskPatch) -> GatewayResult<()> {
        let mut store = self.store.write().map_err(lock_error)?;
        store.task_updates.push((id.clone(), patch.clone()));
        if let Some(reason) = &store.faults.task_updates {
            return Err(GatewayError::Unavailable(reason.clone()));
        }
        if store.faults.failing_tasks.contains(id) {
            return Err(GatewayError::Rejected(format!("update refused for task {id}")));
        }
        let task = store
            .projects
            .iter_mut()
            .flat_map(Project::tasks_mut)
            .find(|task| task.id() == id)
            .ok_or_else(|| GatewayError::TaskNotFound(id.clone()))?;
        task.apply(patch);
        Ok(())
    }
}
