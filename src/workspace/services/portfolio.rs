//! Portfolio statistics and filtering.
//!
//! Every function here is a pure, deterministic computation over a project
//! slice, so callers may memoize results on their inputs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::workspace::domain::{Project, ProjectHealth, ProjectStatus};

/// Label that selects every value in a filter drop-down.
pub const ALL_SENTINEL: &str = "All";

/// Summary numbers for a project collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioStats {
    /// Projects classified as critical.
    pub critical: usize,
    /// Projects classified as healthy.
    pub healthy: usize,
    /// Mean progress rounded half up; 0 for an empty collection.
    pub avg_progress: u8,
    /// Number of projects.
    pub total: usize,
}

/// Computes health counts and mean progress.
#[must_use]
pub fn compute_stats(projects: &[Project]) -> PortfolioStats {
    let total = projects.len();
    let critical = count_health(projects, ProjectHealth::Critical);
    let healthy = count_health(projects, ProjectHealth::Healthy);
    let progress_sum: usize = projects
        .iter()
        .map(|project| usize::from(project.progress().value()))
        .sum();

    // (2s + n) / 2n rounds s / n half up; an empty slice divides by zero and
    // yields `None`.
    let doubled_total = total.saturating_mul(2);
    let avg_progress = progress_sum
        .saturating_mul(2)
        .saturating_add(total)
        .checked_div(doubled_total)
        .and_then(|mean| u8::try_from(mean).ok())
        .unwrap_or(0);

    PortfolioStats {
        critical,
        healthy,
        avg_progress,
        total,
    }
}

fn count_health(projects: &[Project], health: ProjectHealth) -> usize {
    projects
        .iter()
        .filter(|project| project.health() == health)
        .count()
}

/// A filter value that is either the "All" sentinel or one concrete value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Selection<T> {
    /// Matches everything.
    All,
    /// Matches one value exactly.
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Self::All
    }
}

impl<T> Selection<T> {
    /// Parses a drop-down label: [`ALL_SENTINEL`] or a wire value of `T`.
    ///
    /// # Errors
    ///
    /// Returns the parse error of `T` for unrecognised labels.
    pub fn parse<'a, E>(label: &'a str) -> Result<Self, E>
    where
        T: TryFrom<&'a str, Error = E>,
    {
        if label.trim().eq_ignore_ascii_case(ALL_SENTINEL) {
            return Ok(Self::All);
        }
        T::try_from(label).map(Self::Only)
    }

    /// Returns `true` when `value` passes the selection.
    #[must_use]
    pub fn matches(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        match self {
            Self::All => true,
            Self::Only(selected) => selected == value,
        }
    }
}

/// Search text plus health and status selections, combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFilter {
    search_text: String,
    health: Selection<ProjectHealth>,
    status: Selection<ProjectStatus>,
}

impl ProjectFilter {
    /// Creates a filter that matches every project.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the case-insensitive search text.
    #[must_use]
    pub fn with_search(mut self, search_text: impl Into<String>) -> Self {
        self.search_text = search_text.into();
        self
    }

    /// Sets the health selection.
    #[must_use]
    pub const fn with_health(mut self, health: Selection<ProjectHealth>) -> Self {
        self.health = health;
        self
    }

    /// Sets the status selection.
    #[must_use]
    pub const fn with_status(mut self, status: Selection<ProjectStatus>) -> Self {
        self.status = status;
        self
    }

    /// Returns `true` when the project passes all three predicates.
    ///
    /// Search text must be a substring of the name or the owner reference;
    /// empty text always matches.
    #[must_use]
    pub fn matches(&self, project: &Project) -> bool {
        self.matches_search(project)
            && self.health.matches(&project.health())
            && self.status.matches(&project.status())
    }

    fn matches_search(&self, project: &Project) -> bool {
        if self.search_text.is_empty() {
            return true;
        }
        let needle = self.search_text.to_lowercase();
        project.name().to_lowercase().contains(&needle)
            || project.owner_id().to_lowercase().contains(&needle)
    }
}

/// Returns the projects passing `filter`, in their original order.
#[must_use]
pub fn filter_projects<'a>(projects: &'a [Project], filter: &ProjectFilter) -> Vec<&'a Project> {
    projects
        .iter()
        .filter(|project| filter.matches(project))
        .collect()
}

/// Returns the projects with a given status, in their original order.
#[must_use]
pub fn filter_by_status(
    projects: &[Project],
    status: Selection<ProjectStatus>,
) -> Vec<&Project> {
    projects
        .iter()
        .filter(|project| status.matches(&project.status()))
        .collect()
}

/// Partitions projects by health. Every health value has an entry, and each
/// project appears in exactly one group.
#[must_use]
pub fn group_by_health(projects: &[Project]) -> BTreeMap<ProjectHealth, Vec<&Project>> {
    let mut groups: BTreeMap<ProjectHealth, Vec<&Project>> = ProjectHealth::ALL
        .iter()
        .map(|health| (*health, Vec::new()))
        .collect();
    for project in projects {
        groups.entry(project.health()).or_default().push(project);
    }
    groups
}
