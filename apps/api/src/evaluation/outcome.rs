//! Canonical result shapes and the typed failure taxonomy.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Canonical result of an application/resume match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    pub shortlisted: bool,
    /// Integer score on the 0–100 scale.
    pub score: u32,
    pub reason: String,
    /// Threshold the shortlisting decision was made against, 0–100.
    pub threshold: u32,
}

/// Generated question sets. The question objects themselves are opaque to
/// this layer; callers persist them as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedAssessment {
    pub mcq: Vec<Value>,
    pub subjective: Vec<Value>,
    pub coding: Vec<Value>,
}

/// Canonical submission-scoring result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    /// Integer overall score on the 0–100 scale.
    pub overall_score: u32,
    /// Per-section breakdowns, passed through as the backend sent them.
    pub mcq: Value,
    pub sql: Value,
    pub dsa: Value,
}

/// Canonical code-execution result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionReport {
    pub total_tests: u32,
    pub passed_tests: u32,
    pub failed_tests: u32,
    /// Integer score on the 0–100 scale.
    pub score: u32,
    pub results: Vec<Value>,
}

/// Structured data extracted from a job description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JdProfile {
    pub role: String,
    pub experience_level: Option<String>,
    pub experience_years: Option<i64>,
    pub skills: Vec<String>,
}

/// Payload of a successful evaluation, one variant per task kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TaskReport {
    Match(MatchReport),
    Assessment(GeneratedAssessment),
    Score(ScoreReport),
    Execution(ExecutionReport),
    Jd(JdProfile),
}

/// Where a successful payload came from. Callers must branch on this before
/// trusting accuracy-sensitive fields: a fallback JD profile is a labeled
/// placeholder, not ground truth for required-skill filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultSource {
    Ai,
    Fallback,
}

/// A successful evaluation, tagged with its source. A fallback result is
/// never conflatable with an AI result.
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluation {
    Ai(TaskReport),
    Fallback(TaskReport),
}

impl Evaluation {
    pub fn source(&self) -> ResultSource {
        match self {
            Evaluation::Ai(_) => ResultSource::Ai,
            Evaluation::Fallback(_) => ResultSource::Fallback,
        }
    }

    pub fn report(&self) -> &TaskReport {
        match self {
            Evaluation::Ai(report) | Evaluation::Fallback(report) => report,
        }
    }

    pub fn into_report(self) -> TaskReport {
        match self {
            Evaluation::Ai(report) | Evaluation::Fallback(report) => report,
        }
    }
}

/// Classification of every non-success path. Exactly one kind labels each
/// failure, so callers can pick a recovery strategy (retry the workflow,
/// use static content, show a specific message) without parsing strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Feature flag off or health probe failed, and no fallback exists.
    Disabled,
    /// Transport-level failure with no fallback available.
    Unreachable,
    /// Backend-reported rate/usage limit (HTTP 429); callers typically
    /// switch to static question banks.
    QuotaExceeded,
    /// The backend answered but the payload violates the expected shape.
    MalformedResponse,
    /// Operation intentionally not implemented via this path.
    Unsupported,
}

/// Typed failure crossing the component boundary.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct EvalError {
    pub kind: FailureKind,
    pub message: String,
}

impl EvalError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}
