//! Integration tests for overlapping optimistic transitions.
//!
//! Each write is held by a [`GatedGateway`] until the test releases it, so
//! the interleavings below are deterministic.

use std::sync::Arc;

use orbit::config::BoardConfig;
use orbit::workspace::{
    domain::{TaskId, TaskStatus},
    ports::GatewayError,
    services::{BoardEvent, TaskBoard, TaskBoardError, TransitionRejected},
};
use rstest::{fixture, rstest};
use tokio::task::JoinHandle;

use crate::in_memory::helpers::{GatedGateway, launch_project, status_on, wait_until_pending};

type GatedBoard = TaskBoard<GatedGateway>;
type Transition = JoinHandle<Result<(), TaskBoardError>>;

struct Harness {
    gateway: Arc<GatedGateway>,
    board: GatedBoard,
}

#[fixture]
fn harness() -> Harness {
    let project = launch_project();
    let gateway = Arc::new(GatedGateway::new([project.clone()]));
    let board = TaskBoard::for_project(Arc::clone(&gateway), &project, BoardConfig::default());
    Harness { gateway, board }
}

fn start(board: &GatedBoard, task_id: &str, target: TaskStatus) -> Transition {
    let worker = board.clone();
    let task_id = TaskId::from(task_id);
    tokio::spawn(async move {
        worker
            .request_transition(&task_id, target)
            .await
            .map(|_| ())
    })
}

fn refusal() -> GatewayError {
    GatewayError::Rejected("row locked by another editor".to_owned())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rollback_preserves_a_concurrent_confirmed_edit(
    harness: Harness,
) -> Result<(), eyre::Report> {
    let Harness { gateway, board } = harness;
    let t1 = TaskId::from("t1");
    let t2 = TaskId::from("t2");

    let first = start(&board, "t1", TaskStatus::Review);
    let second = start(&board, "t2", TaskStatus::InProgress);
    wait_until_pending(&board, &t1).await?;
    wait_until_pending(&board, &t2).await?;
    gateway.release(&t2, Ok(())).await?;
    gateway.release(&t1, Err(refusal())).await?;

    assert!(second.await?.is_ok());
    assert!(matches!(
        first.await?,
        Err(TaskBoardError::RemoteWriteFailed { .. })
    ));
    assert_eq!(status_on(&board, &t1), Some(TaskStatus::InProgress));
    assert_eq!(status_on(&board, &t2), Some(TaskStatus::InProgress));
    assert!(board.pending().is_empty());
    assert_eq!(gateway.store().task_status(&t2), Some(TaskStatus::InProgress));
    assert_eq!(gateway.store().task_status(&t1), Some(TaskStatus::InProgress));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rollback_keeps_a_still_pending_edit(harness: Harness) -> Result<(), eyre::Report> {
    let Harness { gateway, board } = harness;
    let t1 = TaskId::from("t1");
    let t3 = TaskId::from("t3");

    let first = start(&board, "t1", TaskStatus::Done);
    let second = start(&board, "t3", TaskStatus::Todo);
    wait_until_pending(&board, &t1).await?;
    wait_until_pending(&board, &t3).await?;
    gateway.release(&t1, Err(refusal())).await?;
    assert!(first.await?.is_err());

    assert_eq!(status_on(&board, &t1), Some(TaskStatus::InProgress));
    assert_eq!(status_on(&board, &t3), Some(TaskStatus::Todo));
    assert!(board.is_pending(&t3));

    gateway.release(&t3, Ok(())).await?;
    assert!(second.await?.is_ok());
    assert_eq!(status_on(&board, &t3), Some(TaskStatus::Todo));
    assert!(board.pending().is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn lone_failure_restores_the_exact_prior_snapshot(
    harness: Harness,
) -> Result<(), eyre::Report> {
    let Harness { gateway, board } = harness;
    let snapshot = board.tasks();
    let t2 = TaskId::from("t2");

    let transition = start(&board, "t2", TaskStatus::Done);
    gateway.release(&t2, Err(refusal())).await?;
    assert!(transition.await?.is_err());

    assert_eq!(board.tasks(), snapshot);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn pending_task_refuses_a_second_transition(harness: Harness) -> Result<(), eyre::Report> {
    let Harness { gateway, board } = harness;
    let t1 = TaskId::from("t1");

    let first = start(&board, "t1", TaskStatus::Review);
    wait_until_pending(&board, &t1).await?;
    let racing_result = board.request_transition(&t1, TaskStatus::Done).await;
    let visible = status_on(&board, &t1);
    gateway.release(&t1, Ok(())).await?;
    first.await??;

    assert!(matches!(
        racing_result,
        Err(TaskBoardError::Rejected(TransitionRejected::AlreadyPending(_)))
    ));
    assert_eq!(visible, Some(TaskStatus::Review));
    assert_eq!(status_on(&board, &t1), Some(TaskStatus::Review));
    assert_eq!(gateway.store().task_updates().len(), 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn subscribers_see_every_outcome(harness: Harness) -> Result<(), eyre::Report> {
    let Harness { gateway, board } = harness;
    let mut events = board.subscribe();
    let t1 = TaskId::from("t1");
    let t2 = TaskId::from("t2");

    let first = start(&board, "t1", TaskStatus::Review);
    gateway.release(&t1, Ok(())).await?;
    first.await??;
    let second = start(&board, "t2", TaskStatus::Done);
    gateway.release(&t2, Err(refusal())).await?;
    assert!(second.await?.is_err());

    assert_eq!(
        events.recv().await?,
        BoardEvent::Confirmed {
            task_id: t1,
            status: TaskStatus::Review,
        }
    );
    assert!(matches!(
        events.recv().await?,
        BoardEvent::RolledBack {
            attempted: TaskStatus::Done,
            restored: TaskStatus::Todo,
            ..
        }
    ));
    Ok(())
}
