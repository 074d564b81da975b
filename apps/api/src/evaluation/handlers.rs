//! Axum route handlers for the Evaluation API — thin glue over the
//! dispatcher.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::AppError;
use crate::state::AppState;

use super::dispatcher::AiStatus;
use super::outcome::{Evaluation, ResultSource, TaskReport};
use super::task::EvaluationTask;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct EvaluateApplicationRequest {
    pub jd_text: String,
    pub resume_text: String,
    /// Shortlisting threshold on the 0–100 scale.
    pub threshold_percent: u32,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeJdRequest {
    pub job_description: String,
}

/// Every successful evaluation response carries its source tag; clients
/// must branch on it before trusting accuracy-sensitive fields.
#[derive(Debug, Serialize)]
pub struct EvaluationResponse {
    pub source: ResultSource,
    pub result: TaskReport,
}

impl From<Evaluation> for EvaluationResponse {
    fn from(evaluation: Evaluation) -> Self {
        let source = evaluation.source();
        Self {
            source,
            result: evaluation.into_report(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/ai/status
///
/// Reports the live availability of the AI backend (flag AND fresh probe).
pub async fn handle_ai_status(State(state): State<AppState>) -> Json<AiStatus> {
    Json(state.ai.status().await)
}

/// POST /api/v1/applications/evaluate
///
/// Matches a resume against a job description. Degrades to the local
/// keyword matcher when the backend is unavailable; never fails for
/// availability reasons.
pub async fn handle_evaluate_application(
    State(state): State<AppState>,
    Json(request): Json<EvaluateApplicationRequest>,
) -> Result<Json<EvaluationResponse>, AppError> {
    if request.jd_text.trim().is_empty() {
        return Err(AppError::Validation("jd_text cannot be empty".to_string()));
    }
    if request.threshold_percent > 100 {
        return Err(AppError::Validation(
            "threshold_percent must be between 0 and 100".to_string(),
        ));
    }
    // An empty resume is allowed: the fallback scores it 0.

    let outcome = state
        .ai
        .evaluate(EvaluationTask::ApplicationMatch {
            jd_text: request.jd_text,
            resume_text: request.resume_text,
            threshold_percent: request.threshold_percent,
        })
        .await?;

    Ok(Json(outcome.into()))
}

/// POST /api/v1/assessments/generate
///
/// Generates MCQ/subjective/coding questions. Fails with 503/429/502 when
/// the backend cannot serve; the calling workflow owns static-bank
/// fallbacks.
pub async fn handle_generate_assessment(
    State(state): State<AppState>,
    Json(config): Json<Map<String, Value>>,
) -> Result<Json<EvaluationResponse>, AppError> {
    if config.is_empty() {
        return Err(AppError::Validation(
            "assessment config cannot be empty".to_string(),
        ));
    }

    let outcome = state
        .ai
        .evaluate(EvaluationTask::AssessmentGeneration { config })
        .await?;

    Ok(Json(outcome.into()))
}

/// POST /api/v1/submissions/score
pub async fn handle_score_submission(
    State(state): State<AppState>,
    Json(submission): Json<Map<String, Value>>,
) -> Result<Json<EvaluationResponse>, AppError> {
    if submission.is_empty() {
        return Err(AppError::Validation(
            "submission payload cannot be empty".to_string(),
        ));
    }

    let outcome = state
        .ai
        .evaluate(EvaluationTask::SubmissionScoring { submission })
        .await?;

    Ok(Json(outcome.into()))
}

/// POST /api/v1/code/execute
pub async fn handle_execute_code(
    State(state): State<AppState>,
    Json(request): Json<Map<String, Value>>,
) -> Result<Json<EvaluationResponse>, AppError> {
    if request.is_empty() {
        return Err(AppError::Validation(
            "code execution request cannot be empty".to_string(),
        ));
    }

    let outcome = state
        .ai
        .evaluate(EvaluationTask::CodeExecution { request })
        .await?;

    Ok(Json(outcome.into()))
}

/// POST /api/v1/jd/analyze
///
/// Extracts structured role/skill data from a job description. Degrades to
/// a labeled placeholder profile when the backend is unavailable.
pub async fn handle_analyze_jd(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeJdRequest>,
) -> Result<Json<EvaluationResponse>, AppError> {
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }

    let outcome = state
        .ai
        .evaluate(EvaluationTask::JdAnalysis {
            job_description: request.job_description,
        })
        .await?;

    Ok(Json(outcome.into()))
}
