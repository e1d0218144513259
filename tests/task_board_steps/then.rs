//! Then steps for task board BDD scenarios.

use super::world::{TaskBoardWorld, parse_status, task_id};
use orbit::workspace::services::{TaskBoardError, TransitionRejected};
use rstest_bdd_macros::then;

#[then(r#"task "{task}" shows "{status}""#)]
fn task_shows(world: &TaskBoardWorld, task: String, status: String) -> Result<(), eyre::Report> {
    let expected = parse_status(&status)?;
    let id = task_id(task);
    let visible = world
        .board()?
        .task(&id)
        .map(|card| card.status())
        .ok_or_else(|| eyre::eyre!("task {id} is not on the board"))?;

    if visible != expected {
        return Err(eyre::eyre!("expected {id} in {expected}, found {visible}"));
    }
    Ok(())
}

#[then("no transition is pending")]
fn nothing_pending(world: &TaskBoardWorld) -> Result<(), eyre::Report> {
    let pending = world.board()?.pending();
    if !pending.is_empty() {
        return Err(eyre::eyre!("expected no pending tasks, found {pending:?}"));
    }
    Ok(())
}

#[then(r#"the remote store records task "{task}" as "{status}""#)]
fn store_records(world: &TaskBoardWorld, task: String, status: String) -> Result<(), eyre::Report> {
    let expected = parse_status(&status)?;
    let id = task_id(task);
    let stored = world.gateway.task_status(&id);
    if stored != Some(expected) {
        return Err(eyre::eyre!("expected stored {id} in {expected}, found {stored:?}"));
    }
    Ok(())
}

#[then("the transition fails with a remote write error")]
fn fails_with_remote_write_error(world: &TaskBoardWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_transition_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing transition result"))?;

    if !matches!(result, Err(TaskBoardError::RemoteWriteFailed { .. })) {
        return Err(eyre::eyre!("expected RemoteWriteFailed, got {result:?}"));
    }
    Ok(())
}

#[then("the board matches its state before the move")]
fn board_matches_snapshot(world: &TaskBoardWorld) -> Result<(), eyre::Report> {
    let snapshot = world
        .snapshot
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing snapshot"))?;
    if world.board()?.tasks() != *snapshot {
        return Err(eyre::eyre!("board differs from its state before the move"));
    }
    Ok(())
}

#[then("the transition is rejected because nothing would change")]
fn rejected_as_no_op(world: &TaskBoardWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_transition_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing transition result"))?;

    if !matches!(
        result,
        Err(TaskBoardError::Rejected(TransitionRejected::SameStatus { .. }))
    ) {
        return Err(eyre::eyre!("expected SameStatus rejection, got {result:?}"));
    }
    Ok(())
}

#[then("the remote store received no writes")]
fn store_received_no_writes(world: &TaskBoardWorld) -> Result<(), eyre::Report> {
    let writes = world.gateway.task_updates();
    if !writes.is_empty() {
        return Err(eyre::eyre!("expected no writes, found {writes:?}"));
    }
    Ok(())
}
