//! Port for the external text-summary service.
//!
//! Requests and responses are explicit records so the core never depends on
//! the untyped payloads of a particular provider.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::workspace::domain::Priority;

/// Result type for summary generation.
pub type SummaryResult<T> = Result<T, SummaryError>;

/// What a summary request is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryKind {
    /// Progress and risks of a single project.
    ProjectStatus,
    /// Health audit across the whole portfolio.
    PortfolioAudit,
    /// Structured plan for a new project drafted from a free-text idea.
    ProjectPlan,
    /// Assistant answer to a question about the workspace.
    Assistant,
}

impl SummaryKind {
    /// Returns the canonical representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ProjectStatus => "project_status",
            Self::PortfolioAudit => "portfolio_audit",
            Self::ProjectPlan => "project_plan",
            Self::Assistant => "assistant",
        }
    }
}

impl fmt::Display for SummaryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed request for a textual summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRequest {
    /// Summary category.
    pub kind: SummaryKind,
    /// Subject the summary is about, such as a project name.
    pub subject: String,
    /// One line per fact handed to the generator.
    pub digest: Vec<String>,
    /// Fully rendered prompt text.
    pub prompt: String,
}

/// Textual summary returned to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResponse {
    /// Summary text.
    pub text: String,
    /// `true` when the text is the fixed fallback rather than generated.
    pub is_fallback: bool,
}

impl SummaryResponse {
    /// Creates a generated response.
    #[must_use]
    pub fn generated(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_fallback: false,
        }
    }

    /// Creates a fallback response.
    #[must_use]
    pub fn fallback(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_fallback: true,
        }
    }
}

/// Project outline drafted by the generator from a free-text idea.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectPlan {
    /// Proposed project name.
    pub name: String,
    /// Proposed description.
    pub description: String,
    /// Proposed priority.
    pub priority: Priority,
}

#[derive(Deserialize)]
struct PlanReply {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    priority: Option<String>,
}

impl ProjectPlan {
    /// Creates a plan from its parts.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>, priority: Priority) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            priority,
        }
    }

    /// Parses the JSON object a generator answers a plan request with.
    ///
    /// A surrounding Markdown code fence is ignored. A missing priority
    /// defaults to medium; priority labels parse leniently.
    ///
    /// # Errors
    ///
    /// Returns [`SummaryError::MalformedPlan`] when the text is not a JSON
    /// object with a non-blank `name`, or names an unknown priority.
    pub fn from_reply(text: &str) -> SummaryResult<Self> {
        let reply: PlanReply = serde_json::from_str(strip_code_fence(text))
            .map_err(|err| SummaryError::MalformedPlan(err.to_string()))?;
        let name = reply.name.trim();
        if name.is_empty() {
            return Err(SummaryError::MalformedPlan("plan has no name".to_owned()));
        }
        let priority = reply
            .priority
            .as_deref()
            .map_or(Ok(Priority::Medium), Priority::try_from)
            .map_err(|err| SummaryError::MalformedPlan(err.to_string()))?;
        Ok(Self::new(name, reply.description.trim(), priority))
    }
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(opened) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = opened.strip_prefix("json").unwrap_or(opened);
    body.strip_suffix("```").unwrap_or(body).trim()
}

/// Contract for generating summaries.
#[async_trait]
pub trait SummaryGenerator: Send + Sync {
    /// Generates a summary for the request.
    ///
    /// # Errors
    ///
    /// Returns [`SummaryError`] when the provider fails or answers with
    /// nothing.
    async fn generate(&self, request: &SummaryRequest) -> SummaryResult<SummaryResponse>;
}

/// Errors raised while producing summaries.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SummaryError {
    /// The provider could not be reached.
    #[error("summary provider unavailable: {0}")]
    Unavailable(String),

    /// The provider returned no text.
    #[error("summary provider returned an empty response")]
    EmptyResponse,

    /// There was nothing to ask: the question or idea was blank.
    #[error("{0} request needs non-blank input")]
    BlankInput(SummaryKind),

    /// The provider answered a plan request with something other than a plan.
    #[error("malformed project plan: {0}")]
    MalformedPlan(String),

    /// The prompt template failed to render.
    #[error("failed to render {kind} prompt: {reason}")]
    TemplateRender {
        /// Summary category being rendered.
        kind: SummaryKind,
        /// Renderer diagnostic.
        reason: String,
    },
}
