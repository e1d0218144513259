//! End-to-end workspace flows over the in-memory gateway.

use std::sync::Arc;

use orbit::config::OrbitConfig;
use orbit::workspace::{
    adapters::memory::CannedSummaryGenerator,
    domain::{Priority, ProjectHealth, TaskId, TaskStatus},
    services::{
        CreateProjectRequest, ProjectCatalogService, ProjectFilter, Selection, SummaryService,
        TaskBoard, UserWorkload, WorkspaceLoader, compute_stats, filter_projects,
        workload_report,
    },
};
use rstest::rstest;

use crate::in_memory::helpers::{MemoryGateway, seeded_gateway};

fn points_of(report: &[UserWorkload], name: &str) -> Option<u32> {
    report
        .iter()
        .find(|row| row.name == name)
        .map(|row| row.workload.points())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completing_a_task_frees_its_assignee(
    seeded_gateway: Arc<MemoryGateway>,
) -> Result<(), eyre::Report> {
    let config = OrbitConfig::default();
    let loader = WorkspaceLoader::new(Arc::clone(&seeded_gateway));
    let loaded = loader.load().await;
    let before = workload_report(
        &loaded.users,
        &loaded.projects,
        config.workload.default_capacity,
    );
    assert_eq!(points_of(&before, "Alex Rivera"), Some(8));

    let apollo = loaded
        .projects
        .iter()
        .find(|project| project.name() == "Apollo Re-launch")
        .ok_or_else(|| eyre::eyre!("Apollo missing from load"))?;
    let board = TaskBoard::for_project(Arc::clone(&seeded_gateway), apollo, config.board.clone());
    board
        .request_transition(&TaskId::from("t1"), TaskStatus::Done)
        .await?;

    let reloaded = loader.load().await;
    let after = workload_report(
        &reloaded.users,
        &reloaded.projects,
        config.workload.default_capacity,
    );
    assert_eq!(points_of(&after, "Alex Rivera"), Some(0));
    assert!(!reloaded.is_degraded());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_project_joins_stats_and_search(
    seeded_gateway: Arc<MemoryGateway>,
) -> Result<(), eyre::Report> {
    let catalog = ProjectCatalogService::new(Arc::clone(&seeded_gateway));
    catalog
        .create_project(CreateProjectRequest::new("Orbital Relay", "Mike Ross"))
        .await?;

    let loaded = WorkspaceLoader::new(Arc::clone(&seeded_gateway))
        .load()
        .await;
    let stats = compute_stats(&loaded.projects);
    assert_eq!(stats.total, 3);
    assert_eq!(stats.healthy, 3);
    assert_eq!(stats.avg_progress, 32);

    let filter = ProjectFilter::new()
        .with_search("orb")
        .with_health(Selection::Only(ProjectHealth::Healthy));
    let names: Vec<&str> = filter_projects(&loaded.projects, &filter)
        .into_iter()
        .map(|project| project.name())
        .collect();
    assert_eq!(names, vec!["Orbit Dashboard SDK", "Orbital Relay"]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unreachable_store_degrades_to_seed_users(seeded_gateway: Arc<MemoryGateway>) {
    seeded_gateway.fail_project_reads(Some("network partition"));
    seeded_gateway.fail_user_reads(Some("network partition"));

    let loaded = WorkspaceLoader::new(Arc::clone(&seeded_gateway))
        .load()
        .await;

    assert!(loaded.projects.is_empty());
    assert_eq!(loaded.users.len(), 3);
    assert_eq!(loaded.issues.len(), 2);
    assert_eq!(compute_stats(&loaded.projects).avg_progress, 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn drafted_plan_is_created_and_loaded(
    seeded_gateway: Arc<MemoryGateway>,
) -> Result<(), eyre::Report> {
    let generator = Arc::new(CannedSummaryGenerator::new());
    generator.reply_with(Some(
        r#"{"name": "Deep Space Relay", "description": "Extend coverage.", "priority": "Low"}"#,
    ));
    let plan = SummaryService::new(generator)
        .plan_project("extend relay coverage past the moon")
        .await?;

    ProjectCatalogService::new(Arc::clone(&seeded_gateway))
        .create_from_plan(plan, "James Miller")
        .await?;

    let loaded = WorkspaceLoader::new(Arc::clone(&seeded_gateway))
        .load()
        .await;
    let relay = loaded
        .projects
        .iter()
        .find(|project| project.name() == "Deep Space Relay")
        .ok_or_else(|| eyre::eyre!("planned project missing from load"))?;
    assert_eq!(relay.priority(), Priority::Low);
    assert_eq!(compute_stats(&loaded.projects).total, 3);
    Ok(())
}
