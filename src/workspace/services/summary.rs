//! Generator requests: project and portfolio summaries, project plans drafted
//! from an idea, and assistant answers about the workspace.

use std::sync::Arc;

use minijinja::{Environment, context};
use tracing::{debug, info, warn};

use super::portfolio::{compute_stats, group_by_health};
use crate::workspace::{
    domain::{Project, Task},
    ports::{
        ProjectPlan, SummaryError, SummaryGenerator, SummaryKind, SummaryRequest,
        SummaryResponse, SummaryResult,
    },
};

/// Text returned in place of a summary when the generator fails.
pub const SUMMARY_FALLBACK_TEXT: &str = "Failed to generate AI summary.";

/// Text returned in place of an assistant answer when the generator fails.
pub const ASSISTANT_FALLBACK_TEXT: &str =
    "I'm having trouble connecting to my brain right now. Please try again.";

/// Subject used for portfolio-wide requests.
pub const PORTFOLIO_SUBJECT: &str = "Portfolio";

const PROJECT_STATUS_TEMPLATE: &str = "\
Summarize the current progress and identify risks for the project \"{{ subject }}\" \
based on these tasks:
{% for line in digest %}- {{ line }}
{% endfor %}\
Focus on key blockers and upcoming deadlines. Keep it professional and concise.";

const PORTFOLIO_AUDIT_TEMPLATE: &str = "\
Audit the health of {{ digest | length }} project(s) in the {{ subject }}:
{% for line in digest %}- {{ line }}
{% endfor %}\
Name the projects most at risk and the actions that would recover them.";

const PROJECT_PLAN_TEMPLATE: &str = "\
Draft a project plan for this idea: \"{{ subject }}\"
Answer with only a JSON object with the keys \"name\", \"description\" and \"priority\" \
(one of Low, Medium, High).";

const ASSISTANT_TEMPLATE: &str = "\
You are Orbit AI, a professional project management assistant.
Context of current workspace:
{% for line in digest %}- {{ line }}
{% endfor %}\
User question: {{ subject }}
Provide actionable, helpful advice for project managers.";

/// Builds summary requests and shields callers from generator failures.
#[derive(Clone)]
pub struct SummaryService<S>
where
    S: SummaryGenerator,
{
    generator: Arc<S>,
}

impl<S> SummaryService<S>
where
    S: SummaryGenerator,
{
    /// Creates a summary service over `generator`.
    #[must_use]
    pub const fn new(generator: Arc<S>) -> Self {
        Self { generator }
    }

    /// Summarizes progress and risks of one project from its tasks.
    ///
    /// # Errors
    ///
    /// Returns [`SummaryError::TemplateRender`] when the prompt cannot be
    /// rendered. Generator failures produce a fallback response instead.
    pub async fn project_summary(&self, project: &Project) -> SummaryResult<SummaryResponse> {
        let digest = project.tasks().iter().map(task_line).collect();
        let request = build_request(SummaryKind::ProjectStatus, project.name(), digest)?;
        Ok(self
            .generate_or_fallback(&request, SUMMARY_FALLBACK_TEXT)
            .await)
    }

    /// Audits the health of every project.
    ///
    /// # Errors
    ///
    /// Returns [`SummaryError::TemplateRender`] when the prompt cannot be
    /// rendered. Generator failures produce a fallback response instead.
    pub async fn portfolio_audit(&self, projects: &[Project]) -> SummaryResult<SummaryResponse> {
        let digest = projects.iter().map(project_line).collect();
        let request = build_request(SummaryKind::PortfolioAudit, PORTFOLIO_SUBJECT, digest)?;
        Ok(self
            .generate_or_fallback(&request, SUMMARY_FALLBACK_TEXT)
            .await)
    }

    /// Drafts a structured project plan from a free-text idea.
    ///
    /// The plan is not persisted; hand it to
    /// [`ProjectCatalogService::create_from_plan`](super::ProjectCatalogService::create_from_plan).
    ///
    /// # Errors
    ///
    /// Returns [`SummaryError::BlankInput`] for a blank idea, the generator's
    /// error when it fails or answers with nothing, and
    /// [`SummaryError::MalformedPlan`] when the answer is not a plan. No
    /// fallback is substituted.
    pub async fn plan_project(&self, idea: &str) -> SummaryResult<ProjectPlan> {
        let idea_text = idea.trim();
        if idea_text.is_empty() {
            return Err(SummaryError::BlankInput(SummaryKind::ProjectPlan));
        }
        let request = build_request(SummaryKind::ProjectPlan, idea_text, Vec::new())?;
        let response = self.generate_checked(&request).await?;
        let plan = ProjectPlan::from_reply(&response.text)?;
        info!(name = %plan.name, priority = %plan.priority, "project plan drafted");
        Ok(plan)
    }

    /// Answers a question with the portfolio's health as context.
    ///
    /// # Errors
    ///
    /// Returns [`SummaryError::BlankInput`] for a blank question and
    /// [`SummaryError::TemplateRender`] when the prompt cannot be rendered.
    /// Generator failures produce [`ASSISTANT_FALLBACK_TEXT`] instead.
    pub async fn ask_assistant(
        &self,
        question: &str,
        projects: &[Project],
    ) -> SummaryResult<SummaryResponse> {
        let question_text = question.trim();
        if question_text.is_empty() {
            return Err(SummaryError::BlankInput(SummaryKind::Assistant));
        }
        let request = build_request(
            SummaryKind::Assistant,
            question_text,
            workspace_context(projects),
        )?;
        Ok(self
            .generate_or_fallback(&request, ASSISTANT_FALLBACK_TEXT)
            .await)
    }

    async fn generate_checked(&self, request: &SummaryRequest) -> SummaryResult<SummaryResponse> {
        match self.generator.generate(request).await {
            Ok(response) if response.text.trim().is_empty() => Err(SummaryError::EmptyResponse),
            other => other,
        }
    }

    async fn generate_or_fallback(
        &self,
        request: &SummaryRequest,
        fallback: &str,
    ) -> SummaryResponse {
        match self.generate_checked(request).await {
            Ok(response) => {
                debug!(kind = %request.kind, subject = %request.subject, "summary generated");
                response
            }
            Err(err) => {
                warn!(
                    kind = %request.kind,
                    subject = %request.subject,
                    error = %err,
                    "summary generation failed"
                );
                SummaryResponse::fallback(fallback)
            }
        }
    }
}

fn build_request(
    kind: SummaryKind,
    subject: &str,
    digest: Vec<String>,
) -> SummaryResult<SummaryRequest> {
    let template = match kind {
        SummaryKind::ProjectStatus => PROJECT_STATUS_TEMPLATE,
        SummaryKind::PortfolioAudit => PORTFOLIO_AUDIT_TEMPLATE,
        SummaryKind::ProjectPlan => PROJECT_PLAN_TEMPLATE,
        SummaryKind::Assistant => ASSISTANT_TEMPLATE,
    };
    let prompt = Environment::new()
        .render_str(template, context! { subject => subject, digest => &digest })
        .map_err(|err| SummaryError::TemplateRender {
            kind,
            reason: err.to_string(),
        })?;
    Ok(SummaryRequest {
        kind,
        subject: subject.to_owned(),
        digest,
        prompt,
    })
}

fn task_line(task: &Task) -> String {
    let assignee = if task.assignee_id().is_empty() {
        "unassigned"
    } else {
        task.assignee_id()
    };
    format!(
        "{} [{}] {} priority, {}, due {}",
        task.title(),
        task.status(),
        task.priority(),
        assignee,
        task.due_date()
    )
}

fn project_line(project: &Project) -> String {
    format!(
        "{} ({}): {}, {}% complete, ends {}",
        project.name(),
        project.status(),
        project.health(),
        project.progress().value(),
        project.end_date()
    )
}

/// Describes the portfolio for assistant prompts.
///
/// The first line reads "Caution" when any project is critical and
/// "Optimal" otherwise; then come the headline numbers and one line per
/// non-empty health group.
#[must_use]
pub fn workspace_context(projects: &[Project]) -> Vec<String> {
    let stats = compute_stats(projects);
    let outlook = if stats.critical > 0 { "Caution" } else { "Optimal" };
    let mut lines = vec![
        format!(
            "Portfolio Governance view active. Current organizational health is {outlook}."
        ),
        format!(
            "{} project(s): {} healthy, {} critical, average progress {}%",
            stats.total, stats.healthy, stats.critical, stats.avg_progress
        ),
    ];
    for (health, members) in group_by_health(projects) {
        if members.is_empty() {
            continue;
        }
        let names: Vec<&str> = members.iter().map(|project| project.name()).collect();
        lines.push(format!("{health}: {}", names.join(", ")));
    }
    lines
}
