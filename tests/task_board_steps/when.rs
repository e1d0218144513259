//! When steps for task board BDD scenarios.

use super::world::{TaskBoardWorld, parse_status, run_async, task_id};
use rstest_bdd_macros::when;

#[when(r#"task "{task}" is moved to "{target}""#)]
fn move_task(world: &mut TaskBoardWorld, task: String, target: String) -> Result<(), eyre::Report> {
    let target_status = parse_status(&target)?;
    let board = world.board()?.clone();
    world.snapshot = Some(board.tasks());

    let result = run_async(board.request_transition(&task_id(task), target_status));
    world.last_transition_result = Some(result);
    Ok(())
}
