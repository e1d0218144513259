//! Initial workspace load with graceful fallback.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::workspace::{
    domain::{Project, User, seed},
    ports::WorkspaceGateway,
};

/// Reason a load fell back to local data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LoadIssue {
    /// Reading projects failed; the collection is empty.
    ProjectReadFailed {
        /// Gateway diagnostic.
        reason: String,
    },
    /// Reading users failed; seed users are used.
    UserReadFailed {
        /// Gateway diagnostic.
        reason: String,
    },
    /// The gateway holds no users; seed users are used.
    UsersMissing,
}

/// Collections available after the initial load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedWorkspace {
    /// Projects with their tasks.
    pub projects: Vec<Project>,
    /// Users, never empty after a load.
    pub users: Vec<User>,
    /// Fallbacks taken during the load.
    pub issues: Vec<LoadIssue>,
}

impl LoadedWorkspace {
    /// Returns `true` when any collection came from a fallback.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        !self.issues.is_empty()
    }
}

/// Loads projects and users from the gateway.
#[derive(Clone)]
pub struct WorkspaceLoader<G>
where
    G: WorkspaceGateway,
{
    gateway: Arc<G>,
}

impl<G> WorkspaceLoader<G>
where
    G: WorkspaceGateway,
{
    /// Creates a loader over `gateway`.
    #[must_use]
    pub const fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Reads both collections. Never fails: read errors are recorded in
    /// [`LoadedWorkspace::issues`].
    pub async fn load(&self) -> LoadedWorkspace {
        let mut issues = Vec::new();

        let projects = match self.gateway.list_projects().await {
            Ok(projects) => projects,
            Err(err) => {
                warn!(error = %err, "project read failed; starting with no projects");
                issues.push(LoadIssue::ProjectReadFailed {
                    reason: err.to_string(),
                });
                Vec::new()
            }
        };

        let users = match self.gateway.list_users().await {
            Ok(users) if !users.is_empty() => users,
            Ok(_) => {
                warn!("gateway returned no users; using seed users");
                issues.push(LoadIssue::UsersMissing);
                seed::default_users()
            }
            Err(err) => {
                warn!(error = %err, "user read failed; using seed users");
                issues.push(LoadIssue::UserReadFailed {
                    reason: err.to_string(),
                });
                seed::default_users()
            }
        };

        info!(
            projects = projects.len(),
            users = users.len(),
            degraded = !issues.is_empty(),
            "workspace loaded"
        );
        LoadedWorkspace {
            projects,
            users,
            issues,
        }
    }
}
