//! Canned summary generator for tests and offline use.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde_json::json;

use crate::workspace::ports::{
    SummaryError, SummaryGenerator, SummaryKind, SummaryRequest, SummaryResponse, SummaryResult,
};

/// Summary generator that answers from the request digest and records every
/// request it receives.
///
/// Plan requests are answered with a medium-priority JSON plan named after
/// the idea. A scripted reply overrides every answer.
#[derive(Debug, Clone, Default)]
pub struct CannedSummaryGenerator {
    state: Arc<RwLock<CannedState>>,
}

#[derive(Debug, Default)]
struct CannedState {
    failure: Option<SummaryError>,
    reply: Option<String>,
    requests: Vec<SummaryRequest>,
}

impl CannedSummaryGenerator {
    /// Creates a generator that always succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent calls fail with `error` until cleared with `None`.
    pub fn fail_with(&self, error: Option<SummaryError>) {
        if let Ok(mut state) = self.state.write() {
            state.failure = error;
        }
    }

    /// Answers subsequent calls with `text` until cleared with `None`.
    pub fn reply_with(&self, text: Option<&str>) {
        if let Ok(mut state) = self.state.write() {
            state.reply = text.map(str::to_owned);
        }
    }

    /// Returns the requests received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<SummaryRequest> {
        self.state
            .read()
            .map(|state| state.requests.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl SummaryGenerator for CannedSummaryGenerator {
    async fn generate(&self, request: &SummaryRequest) -> SummaryResult<SummaryResponse> {
        let mut state = self
            .state
            .write()
            .map_err(|err| SummaryError::Unavailable(err.to_string()))?;
        state.requests.push(request.clone());
        if let Some(error) = &state.failure {
            return Err(error.clone());
        }
        if let Some(text) = &state.reply {
            return Ok(SummaryResponse::generated(text.clone()));
        }
        Ok(SummaryResponse::generated(canned_answer(request)))
    }
}

fn canned_answer(request: &SummaryRequest) -> String {
    match request.kind {
        SummaryKind::ProjectPlan => json!({
            "name": request.subject,
            "description": format!("Plan for {}", request.subject),
            "priority": "Medium",
        })
        .to_string(),
        SummaryKind::ProjectStatus | SummaryKind::PortfolioAudit | SummaryKind::Assistant => {
            format!(
                "{} for {}: {} item(s) reviewed.",
                request.kind,
                request.subject,
                request.digest.len()
            )
        }
    }
}
