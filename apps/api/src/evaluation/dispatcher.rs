//! Task Dispatcher — the uniform entry point that routes each evaluation
//! task to the AI backend or its local fallback.
//!
//! The degrade policy is deliberately asymmetric: matching and JD analysis
//! have meaningful deterministic substitutes and degrade silently, while
//! generation, scoring and code execution have no sound local algorithm and
//! fail loudly rather than return a misleading substitute.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::ai_client::{AiClient, ClientError};
use crate::config::Config;

use super::fallback;
use super::normalize;
use super::outcome::{EvalError, Evaluation, FailureKind, TaskReport};
use super::task::EvaluationTask;

/// Live availability snapshot: the feature flag AND a fresh health probe.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AiStatus {
    pub enabled: bool,
    pub reachable: bool,
}

/// Orchestrates the five evaluation task kinds against the AI backend.
///
/// Holds no cross-call state beyond the immutable configuration captured in
/// the client; concurrent invocations are independent and share-nothing.
#[derive(Clone)]
pub struct Orchestrator {
    client: AiClient,
}

impl Orchestrator {
    pub fn new(config: &Config) -> Self {
        Self {
            client: AiClient::new(config),
        }
    }

    /// Current availability, re-probed on every call (never cached).
    pub async fn status(&self) -> AiStatus {
        AiStatus {
            enabled: self.client.enabled(),
            reachable: self.client.probe().await,
        }
    }

    /// Evaluates one task: probe gate, at most one backend request,
    /// classify, normalize. No internal retries — re-attempting a degraded
    /// workflow is the caller's decision.
    pub async fn evaluate(&self, task: EvaluationTask) -> Result<Evaluation, EvalError> {
        if !self.client.probe().await {
            return self.degrade_or_fail(
                &task,
                FailureKind::Disabled,
                "AI backend is disabled or failed its health probe",
            );
        }

        match self.client.post_task(task.endpoint(), &task.wire_body()).await {
            Ok(body) => {
                debug!("AI backend answered for {}", task.kind_name());
                self.normalize(&task, &body).map(Evaluation::Ai)
            }
            Err(ClientError::MalformedBody) => Err(EvalError::new(
                FailureKind::MalformedResponse,
                format!(
                    "AI backend returned an empty or unparseable body for {}",
                    task.kind_name()
                ),
            )),
            Err(ClientError::RateLimited) => self.degrade_or_fail(
                &task,
                FailureKind::QuotaExceeded,
                "AI backend quota exceeded (HTTP 429)",
            ),
            Err(err) => self.degrade_or_fail(
                &task,
                FailureKind::Unreachable,
                &format!("AI backend call failed: {err}"),
            ),
        }
    }

    /// Resume file parsing is intentionally not implemented through this
    /// path; callers must use the direct document-ingestion integration.
    pub fn parse_resume_file(&self, file_name: &str) -> Result<String, EvalError> {
        Err(EvalError::new(
            FailureKind::Unsupported,
            format!(
                "resume file parsing ({file_name}) is not available via the AI orchestration \
                 path; use the document ingestion pipeline"
            ),
        ))
    }

    fn normalize(&self, task: &EvaluationTask, body: &Value) -> Result<TaskReport, EvalError> {
        match task {
            EvaluationTask::ApplicationMatch {
                threshold_percent, ..
            } => normalize::normalize_match(body, *threshold_percent).map(TaskReport::Match),
            EvaluationTask::AssessmentGeneration { .. } => {
                normalize::normalize_generation(body).map(TaskReport::Assessment)
            }
            EvaluationTask::SubmissionScoring { .. } => {
                normalize::normalize_scoring(body).map(TaskReport::Score)
            }
            EvaluationTask::CodeExecution { .. } => {
                normalize::normalize_execution(body).map(TaskReport::Execution)
            }
            EvaluationTask::JdAnalysis { .. } => normalize::normalize_jd(body).map(TaskReport::Jd),
        }
    }

    fn degrade_or_fail(
        &self,
        task: &EvaluationTask,
        kind: FailureKind,
        message: &str,
    ) -> Result<Evaluation, EvalError> {
        match fallback_report(task) {
            Some(report) => {
                info!("degrading {} to local fallback: {message}", task.kind_name());
                Ok(Evaluation::Fallback(report))
            }
            None => {
                warn!("{} failed ({kind:?}): {message}", task.kind_name());
                Err(EvalError::new(
                    kind,
                    format!(
                        "{message}; no local fallback exists for {}",
                        task.kind_name()
                    ),
                ))
            }
        }
    }
}

/// The local substitute for a task kind, if one exists.
fn fallback_report(task: &EvaluationTask) -> Option<TaskReport> {
    match task {
        EvaluationTask::ApplicationMatch {
            jd_text,
            resume_text,
            threshold_percent,
        } => Some(TaskReport::Match(fallback::match_fallback(
            jd_text,
            resume_text,
            *threshold_percent,
        ))),
        EvaluationTask::JdAnalysis { .. } => Some(TaskReport::Jd(fallback::jd_fallback())),
        EvaluationTask::AssessmentGeneration { .. }
        | EvaluationTask::SubmissionScoring { .. }
        | EvaluationTask::CodeExecution { .. } => None,
    }
}
