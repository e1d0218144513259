//! Task board state machine with optimistic status transitions.
//!
//! The board owns the working set of tasks for one project. A status change is
//! applied locally before the remote store confirms it; when the store refuses
//! the write, the board restores a full snapshot instead of patching the one
//! field back, so racing writes cannot produce lost updates.
//!
//! Several transitions on different tasks may be in flight at once. The board
//! keeps the snapshot taken immediately before the oldest outstanding write
//! together with a journal of every write applied since. A rollback restores
//! that snapshot and replays the surviving journal entries, so one failure
//! never discards another task's confirmed or still-pending edit.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thiserror::Error;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::config::BoardConfig;
use crate::workspace::{
    domain::{Project, Task, TaskId, TaskPatch, TaskStatus},
    ports::{GatewayError, GatewayResult, WorkspaceGateway},
};

/// Reason carried by the rollback notice of a cancelled transition.
pub const TRANSITION_CANCELLED: &str = "transition cancelled";

/// Reasons a transition request is refused before any state changes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionRejected {
    /// The task is not on this board.
    #[error("task not on this board: {0}")]
    UnknownTask(TaskId),

    /// The task already has the requested status.
    #[error("task {task_id} is already {status}")]
    SameStatus {
        /// Task that was targeted.
        task_id: TaskId,
        /// Its current status.
        status: TaskStatus,
    },

    /// A transition for the task is still awaiting the remote store.
    #[error("task {0} already has a transition in flight")]
    AlreadyPending(TaskId),
}

/// Errors returned by task board operations.
#[derive(Debug, Error)]
pub enum TaskBoardError {
    /// The request was refused without touching state.
    #[error(transparent)]
    Rejected(#[from] TransitionRejected),

    /// The remote store refused the write and the board was rolled back.
    #[error("remote write for task {task_id} failed and the board was rolled back: {source}")]
    RemoteWriteFailed {
        /// Task whose transition failed.
        task_id: TaskId,
        /// Gateway failure.
        source: GatewayError,
    },

    /// The task list cannot be replaced while transitions are in flight.
    #[error("board has {pending} transition(s) in flight")]
    Busy {
        /// Number of pending transitions.
        pending: usize,
    },
}

/// Result type for task board operations.
pub type TaskBoardResult<T> = Result<T, TaskBoardError>;

/// Notifications published to board subscribers.
///
/// This channel replaces blocking alerts: the presentation layer subscribes
/// and decides how to surface each event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardEvent {
    /// The remote store confirmed a transition.
    Confirmed {
        /// Task that moved.
        task_id: TaskId,
        /// Confirmed status.
        status: TaskStatus,
    },
    /// The remote store refused a transition and the board was restored.
    RolledBack {
        /// Task whose transition failed.
        task_id: TaskId,
        /// Status that was attempted.
        attempted: TaskStatus,
        /// Status the task shows after the rollback.
        restored: TaskStatus,
        /// Human-readable failure reason.
        reason: String,
    },
    /// A request was refused before any state changed.
    Rejected(TransitionRejected),
}

/// Outcome of a confirmed transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionReceipt {
    /// Status before the transition.
    pub from: TaskStatus,
    /// Confirmed status.
    pub to: TaskStatus,
}

#[derive(Debug, Clone)]
struct JournalEntry {
    sequence: u64,
    task_id: TaskId,
    status: TaskStatus,
}

#[derive(Debug)]
struct Ticket {
    sequence: u64,
    task_id: TaskId,
    from: TaskStatus,
    to: TaskStatus,
}

#[derive(Debug, Default)]
struct BoardState {
    tasks: Vec<Task>,
    pending: BTreeMap<TaskId, u64>,
    baseline: Option<Vec<Task>>,
    journal: Vec<JournalEntry>,
    next_sequence: u64,
}

fn set_status(tasks: &mut [Task], task_id: &TaskId, status: TaskStatus) {
    if let Some(task) = tasks.iter_mut().find(|task| task.id() == task_id) {
        task.set_status(status);
    }
}

fn status_of(tasks: &[Task], task_id: &TaskId) -> Option<TaskStatus> {
    tasks
        .iter()
        .find(|task| task.id() == task_id)
        .map(Task::status)
}

impl BoardState {
    fn new(tasks: Vec<Task>) -> Self {
        Self {
            tasks,
            ..Self::default()
        }
    }

    fn begin(&mut self, task_id: &TaskId, to: TaskStatus) -> Result<Ticket, TransitionRejected> {
        let from = status_of(&self.tasks, task_id)
            .ok_or_else(|| TransitionRejected::UnknownTask(task_id.clone()))?;
        if self.pending.contains_key(task_id) {
            return Err(TransitionRejected::AlreadyPending(task_id.clone()));
        }
        if from == to {
            return Err(TransitionRejected::SameStatus {
                task_id: task_id.clone(),
                status: from,
            });
        }

        if self.baseline.is_none() {
            self.baseline = Some(self.tasks.clone());
        }
        let sequence = self.next_sequence;
        self.next_sequence = self.next_sequence.wrapping_add(1);

        set_status(&mut self.tasks, task_id, to);
        self.journal.push(JournalEntry {
            sequence,
            task_id: task_id.clone(),
            status: to,
        });
        self.pending.insert(task_id.clone(), sequence);

        Ok(Ticket {
            sequence,
            task_id: task_id.clone(),
            from,
            to,
        })
    }

    fn confirm(&mut self, ticket: &Ticket) {
        self.pending.remove(&ticket.task_id);
        self.settle();
    }

    fn roll_back(&mut self, ticket: &Ticket) -> TaskStatus {
        self.pending.remove(&ticket.task_id);
        self.journal.retain(|entry| entry.sequence != ticket.sequence);
        if let Some(baseline) = &self.baseline {
            let mut restored = baseline.clone();
            for entry in &self.journal {
                set_status(&mut restored, &entry.task_id, entry.status);
            }
            self.tasks = restored;
        }
        self.settle();
        status_of(&self.tasks, &ticket.task_id).unwrap_or(ticket.from)
    }

    /// Drops the snapshot and journal once nothing is in flight.
    fn settle(&mut self) {
        if self.pending.is_empty() {
            self.baseline = None;
            self.journal.clear();
        }
    }
}

/// Rolls the board back when a transition future is dropped mid-flight.
struct InFlight<'a> {
    state: &'a Mutex<BoardState>,
    events: &'a broadcast::Sender<BoardEvent>,
    ticket: &'a Ticket,
    armed: bool,
}

impl InFlight<'_> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let restored = self
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .roll_back(self.ticket);
        warn!(
            task_id = %self.ticket.task_id,
            restored = %restored,
            "transition cancelled before the remote store answered; board rolled back"
        );
        let notice = BoardEvent::RolledBack {
            task_id: self.ticket.task_id.clone(),
            attempted: self.ticket.to,
            restored,
            reason: TRANSITION_CANCELLED.to_owned(),
        };
        if self.events.send(notice).is_err() {
            debug!("board event dropped: no subscribers");
        }
    }
}

/// Store for the tasks of one project, mutated only through
/// [`TaskBoard::request_transition`].
///
/// Clones share the same state, so a clone can be moved into a spawned task
/// while the original keeps serving reads.
pub struct TaskBoard<G>
where
    G: WorkspaceGateway,
{
    gateway: Arc<G>,
    state: Arc<Mutex<BoardState>>,
    events: broadcast::Sender<BoardEvent>,
    config: BoardConfig,
}

impl<G> Clone for TaskBoard<G>
where
    G: WorkspaceGateway,
{
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            state: Arc::clone(&self.state),
            events: self.events.clone(),
            config: self.config.clone(),
        }
    }
}

impl<G> TaskBoard<G>
where
    G: WorkspaceGateway,
{
    /// Creates a board over `tasks` with default configuration.
    #[must_use]
    pub fn new(gateway: Arc<G>, tasks: Vec<Task>) -> Self {
        Self::with_config(gateway, tasks, BoardConfig::default())
    }

    /// Creates a board over `tasks` with explicit configuration.
    #[must_use]
    pub fn with_config(gateway: Arc<G>, tasks: Vec<Task>, config: BoardConfig) -> Self {
        let (events, _) = broadcast::channel(config.event_capacity.max(1));
        Self {
            gateway,
            state: Arc::new(Mutex::new(BoardState::new(tasks))),
            events,
            config,
        }
    }

    /// Creates a board initialised from a project's task collection.
    #[must_use]
    pub fn for_project(gateway: Arc<G>, project: &Project, config: BoardConfig) -> Self {
        Self::with_config(gateway, project.tasks().to_vec(), config)
    }

    fn lock_state(&self) -> MutexGuard<'_, BoardState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, event: BoardEvent) {
        if self.events.send(event).is_err() {
            debug!("board event dropped: no subscribers");
        }
    }

    /// Moves a task to `target`, optimistically.
    ///
    /// The local list changes immediately and the task is marked pending
    /// while the remote store is asked to persist the change. Confirmation
    /// clears the pending mark; failure restores the snapshot and publishes a
    /// [`BoardEvent::RolledBack`] notice. Dropping the returned future before
    /// it completes does the same, with [`TRANSITION_CANCELLED`] as the
    /// reason.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::Rejected`] when the task is unknown, already
    /// has the status, or already has a transition in flight; state is left
    /// untouched. Returns [`TaskBoardError::RemoteWriteFailed`] after a
    /// rollback.
    pub async fn request_transition(
        &self,
        task_id: &TaskId,
        target: TaskStatus,
    ) -> TaskBoardResult<TransitionReceipt> {
        let begun = self.lock_state().begin(task_id, target);
        let ticket = match begun {
            Ok(ticket) => ticket,
            Err(rejection) => {
                debug!(
                    task_id = %task_id,
                    target = %target,
                    reason = %rejection,
                    "transition rejected"
                );
                self.publish(BoardEvent::Rejected(rejection.clone()));
                return Err(rejection.into());
            }
        };
        info!(
            task_id = %task_id,
            from = %ticket.from,
            to = %ticket.to,
            "optimistic transition applied"
        );

        let in_flight = InFlight {
            state: &self.state,
            events: &self.events,
            ticket: &ticket,
            armed: true,
        };
        let outcome = self.dispatch(task_id, &TaskPatch::status(target)).await;
        in_flight.disarm();

        match outcome {
            Ok(()) => {
                self.lock_state().confirm(&ticket);
                info!(task_id = %task_id, status = %target, "transition confirmed");
                self.publish(BoardEvent::Confirmed {
                    task_id: task_id.clone(),
                    status: target,
                });
                Ok(TransitionReceipt {
                    from: ticket.from,
                    to: ticket.to,
                })
            }
            Err(source) => {
                let restored = self.lock_state().roll_back(&ticket);
                warn!(
                    task_id = %task_id,
                    attempted = %target,
                    restored = %restored,
                    error = %source,
                    "remote write failed; board rolled back"
                );
                self.publish(BoardEvent::RolledBack {
                    task_id: task_id.clone(),
                    attempted: target,
                    restored,
                    reason: source.to_string(),
                });
                Err(TaskBoardError::RemoteWriteFailed {
                    task_id: task_id.clone(),
                    source,
                })
            }
        }
    }

    async fn dispatch(&self, task_id: &TaskId, patch: &TaskPatch) -> GatewayResult<()> {
        let call = self.gateway.update_task(task_id, patch);
        match self.config.transition_timeout() {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .unwrap_or_else(|_elapsed| Err(GatewayError::TimedOut(limit))),
            None => call.await,
        }
    }

    /// Returns the visible task list in board order.
    #[must_use]
    pub fn tasks(&self) -> Vec<Task> {
        self.lock_state().tasks.clone()
    }

    /// Returns one task by identifier.
    #[must_use]
    pub fn task(&self, task_id: &TaskId) -> Option<Task> {
        self.lock_state()
            .tasks
            .iter()
            .find(|task| task.id() == task_id)
            .cloned()
    }

    /// Returns the tasks with an unconfirmed transition.
    #[must_use]
    pub fn pending(&self) -> BTreeSet<TaskId> {
        self.lock_state().pending.keys().cloned().collect()
    }

    /// Returns `true` while a transition for the task is in flight.
    #[must_use]
    pub fn is_pending(&self, task_id: &TaskId) -> bool {
        self.lock_state().pending.contains_key(task_id)
    }

    /// Returns the tasks in one column, keeping board order.
    #[must_use]
    pub fn tasks_with_status(&self, status: TaskStatus) -> Vec<Task> {
        self.lock_state()
            .tasks
            .iter()
            .filter(|task| task.status() == status)
            .cloned()
            .collect()
    }

    /// Counts tasks per column. Every status is present, possibly with zero.
    #[must_use]
    pub fn column_counts(&self) -> BTreeMap<TaskStatus, usize> {
        let mut counts: BTreeMap<TaskStatus, usize> =
            TaskStatus::ALL.iter().map(|status| (*status, 0)).collect();
        for task in &self.lock_state().tasks {
            *counts.entry(task.status()).or_insert(0) += 1;
        }
        counts
    }

    /// Subscribes to board events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<BoardEvent> {
        self.events.subscribe()
    }

    /// Replaces the task list, typically after reloading from the remote
    /// store.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::Busy`] while any transition is in flight.
    pub fn replace_tasks(&self, tasks: Vec<Task>) -> TaskBoardResult<()> {
        let mut state = self.lock_state();
        if !state.pending.is_empty() {
            return Err(TaskBoardError::Busy {
                pending: state.pending.len(),
            });
        }
        *state = BoardState::new(tasks);
        Ok(())
    }
}
