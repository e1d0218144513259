//! Shared world state for task board BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use orbit::workspace::{
    adapters::memory::InMemoryWorkspaceGateway,
    domain::{Task, TaskId, TaskStatus},
    services::{TaskBoard, TaskBoardResult, TransitionReceipt},
};
use rstest::fixture;

/// Gateway type used by the BDD world.
pub type TestGateway = InMemoryWorkspaceGateway<DefaultClock>;

/// Scenario world for task board behaviour tests.
pub struct TaskBoardWorld {
    pub gateway: Arc<TestGateway>,
    pub board: Option<TaskBoard<TestGateway>>,
    pub snapshot: Option<Vec<Task>>,
    pub last_transition_result: Option<TaskBoardResult<TransitionReceipt>>,
}

impl TaskBoardWorld {
    /// Creates a world over an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            gateway: Arc::new(InMemoryWorkspaceGateway::new(DefaultClock)),
            board: None,
            snapshot: None,
            last_transition_result: None,
        }
    }

    /// Returns the board built by a previous step.
    ///
    /// # Errors
    ///
    /// Returns an error when no board step has run.
    pub fn board(&self) -> Result<&TaskBoard<TestGateway>, eyre::Report> {
        self.board
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing board in scenario world"))
    }
}

impl Default for TaskBoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskBoardWorld {
    TaskBoardWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Parses a wire status named in a step.
///
/// # Errors
///
/// Returns an error for unknown statuses.
pub fn parse_status(raw: &str) -> Result<TaskStatus, eyre::Report> {
    TaskStatus::try_from(raw).map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))
}

/// Converts a step argument into a task identifier.
#[must_use]
pub fn task_id(raw: String) -> TaskId {
    TaskId::from(raw)
}
