//! Given steps for task board BDD scenarios.

use std::sync::Arc;

use super::world::{TaskBoardWorld, task_id};
use mockable::DefaultClock;
use orbit::config::BoardConfig;
use orbit::workspace::adapters::memory::InMemoryWorkspaceGateway;
use orbit::workspace::{domain::seed, services::TaskBoard};
use rstest_bdd_macros::given;

#[given("the sample portfolio in the remote store")]
fn sample_portfolio(world: &mut TaskBoardWorld) {
    world.gateway = Arc::new(
        InMemoryWorkspaceGateway::new(DefaultClock)
            .with_projects(seed::sample_projects())
            .with_users(seed::default_users()),
    );
}

#[given(r#"a board for project "{project_id}""#)]
fn board_for_project(world: &mut TaskBoardWorld, project_id: String) -> Result<(), eyre::Report> {
    let project = world
        .gateway
        .projects()
        .into_iter()
        .find(|project| project.id().as_str() == project_id)
        .ok_or_else(|| eyre::eyre!("project {project_id} is not in the store"))?;
    world.board = Some(TaskBoard::for_project(
        Arc::clone(&world.gateway),
        &project,
        BoardConfig::default(),
    ));
    Ok(())
}

#[given(r#"the remote store refuses writes for task "{task}""#)]
fn store_refuses_writes(world: &mut TaskBoardWorld, task: String) {
    world.gateway.fail_updates_for(&task_id(task));
}
