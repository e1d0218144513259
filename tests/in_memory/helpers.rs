//! Shared helpers for in-memory workspace integration tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use mockable::DefaultClock;
use orbit::workspace::{
    adapters::memory::InMemoryWorkspaceGateway,
    domain::{Project, ProjectDraft, ProjectId, Task, TaskId, TaskPatch, TaskStatus, User, seed},
    ports::{GatewayError, GatewayResult, WorkspaceGateway},
    services::TaskBoard,
};
use rstest::fixture;
use tokio::sync::oneshot;

/// In-memory gateway type used across integration tests.
pub type MemoryGateway = InMemoryWorkspaceGateway<DefaultClock>;

/// Provides an in-memory gateway seeded with the sample portfolio and team.
#[fixture]
pub fn seeded_gateway() -> Arc<MemoryGateway> {
    Arc::new(
        InMemoryWorkspaceGateway::new(DefaultClock)
            .with_projects(seed::sample_projects())
            .with_users(seed::default_users()),
    )
}

/// Builds a project with three tasks in distinct columns.
#[must_use]
pub fn launch_project() -> Project {
    let due = NaiveDate::from_ymd_opt(2024, 8, 1).unwrap_or(NaiveDate::MIN);
    Project::new("p7", "Launch Readiness", "James Miller").with_tasks([
        Task::new("t1", "Load testing", TaskStatus::InProgress, due)
            .with_assignee("u2")
            .with_story_points(5),
        Task::new("t2", "Runbook", TaskStatus::Todo, due)
            .with_assignee("u1")
            .with_story_points(3),
        Task::new("t3", "Go/no-go review", TaskStatus::Backlog, due)
            .with_assignee("u3")
            .with_story_points(2),
    ])
}

/// Gateway that holds each task write until the test releases it.
pub struct GatedGateway {
    inner: MemoryGateway,
    gates: Mutex<HashMap<TaskId, oneshot::Sender<GatewayResult<()>>>>,
}

impl GatedGateway {
    /// Wraps an in-memory gateway holding `projects`.
    #[must_use]
    pub fn new(projects: impl IntoIterator<Item = Project>) -> Self {
        Self {
            inner: InMemoryWorkspaceGateway::new(DefaultClock).with_projects(projects),
            gates: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the wrapped store for inspection.
    #[must_use]
    pub const fn store(&self) -> &MemoryGateway {
        &self.inner
    }

    /// Lets the held write for `task_id` finish with `verdict`.
    ///
    /// Waits until the write has reached the gateway.
    ///
    /// # Errors
    ///
    /// Returns an error when no write for the task arrives within five
    /// seconds or the writer has gone away.
    pub async fn release(
        &self,
        task_id: &TaskId,
        verdict: GatewayResult<()>,
    ) -> Result<(), eyre::Report> {
        let sender = tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                let taken = self
                    .gates
                    .lock()
                    .map_err(|err| eyre::eyre!("gate lock poisoned: {err}"))?
                    .remove(task_id);
                if let Some(sender) = taken {
                    return Ok::<_, eyre::Report>(sender);
                }
                tokio::task::yield_now().await;
            }
        })
        .await
        .map_err(|_| eyre::eyre!("no write for task {task_id} reached the gateway"))??;

        sender
            .send(verdict)
            .map_err(|_| eyre::eyre!("writer for task {task_id} went away"))
    }
}

#[async_trait]
impl WorkspaceGateway for GatedGateway {
    async fn list_projects(&self) -> GatewayResult<Vec<Project>> {
        self.inner.list_projects().await
    }

    async fn list_users(&self) -> GatewayResult<Vec<User>> {
        self.inner.list_users().await
    }

    async fn create_project(&self, draft: &ProjectDraft) -> GatewayResult<Project> {
        self.inner.create_project(draft).await
    }

    async fn delete_project(&self, id: &ProjectId) -> GatewayResult<()> {
        self.inner.delete_project(id).await
    }

    async fn update_task(&self, id: &TaskId, patch: &TaskPatch) -> GatewayResult<()> {
        let (sender, receiver) = oneshot::channel();
        self.gates
            .lock()
            .map_err(|err| GatewayError::Unavailable(err.to_string()))?
            .insert(id.clone(), sender);
        receiver
            .await
            .map_err(|_| GatewayError::Unavailable("gate dropped".to_owned()))??;
        self.inner.update_task(id, patch).await
    }
}

/// Returns the visible status of a task on the board.
#[must_use]
pub fn status_on<G: WorkspaceGateway>(
    board: &TaskBoard<G>,
    task_id: &TaskId,
) -> Option<TaskStatus> {
    board.task(task_id).map(|task| task.status())
}

/// Waits until the board marks `task_id` as pending.
///
/// # Errors
///
/// Returns an error when the task is not pending within five seconds.
pub async fn wait_until_pending<G: WorkspaceGateway>(
    board: &TaskBoard<G>,
    task_id: &TaskId,
) -> Result<(), eyre::Report> {
    tokio::time::timeout(Duration::from_secs(5), async {
        while !board.is_pending(task_id) {
            tokio::task::yield_now().await;
        }
    })
    .await
    .map_err(|_| eyre::eyre!("task {task_id} never became pending"))
}
