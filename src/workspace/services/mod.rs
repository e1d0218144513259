//! Application services for the project workspace.

mod board;
mod catalog;
mod loader;
mod portfolio;
mod summary;
mod workload;

pub use board::{
    BoardEvent, TRANSITION_CANCELLED, TaskBoard, TaskBoardError, TaskBoardResult,
    TransitionReceipt, TransitionRejected,
};
pub use catalog::{CatalogError, CatalogResult, CreateProjectRequest, ProjectCatalogService};
pub use loader::{LoadIssue, LoadedWorkspace, WorkspaceLoader};
pub use portfolio::{
    ALL_SENTINEL, PortfolioStats, ProjectFilter, Selection, compute_stats, filter_by_status,
    filter_projects, group_by_health,
};
pub use summary::{
    ASSISTANT_FALLBACK_TEXT, PORTFOLIO_SUBJECT, SUMMARY_FALLBACK_TEXT, SummaryService,
    workspace_context,
};
pub use workload::{
    UserWorkload, Workload, assigned_points, compute_workload, compute_workload_with_default,
    workload_report,
};
