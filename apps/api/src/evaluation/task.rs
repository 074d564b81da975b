//! The five evaluation task kinds delegated to the AI backend.

use serde_json::{json, Map, Value};

/// One unit of work for the orchestrator. Immutable once constructed and
/// owned by the calling workflow for a single `evaluate` invocation.
///
/// Matching and JD analysis have deterministic local substitutes and
/// degrade silently when the backend is unavailable; generation, scoring
/// and code execution fundamentally require the backend's capability and
/// fail loudly instead.
#[derive(Debug, Clone)]
pub enum EvaluationTask {
    /// Match a candidate's resume text against a job description.
    ApplicationMatch {
        jd_text: String,
        resume_text: String,
        /// Shortlisting threshold on the 0–100 scale.
        threshold_percent: u32,
    },
    /// Generate MCQ/subjective/coding questions from an assessment config
    /// (question counts, time limits — opaque to this layer).
    AssessmentGeneration { config: Map<String, Value> },
    /// Score a submitted assessment.
    SubmissionScoring { submission: Map<String, Value> },
    /// Run candidate code against test cases in the backend sandbox.
    CodeExecution { request: Map<String, Value> },
    /// Extract structured role/skill data from a raw job description.
    JdAnalysis { job_description: String },
}

impl EvaluationTask {
    /// Backend endpoint path for this task kind.
    pub fn endpoint(&self) -> &'static str {
        match self {
            EvaluationTask::ApplicationMatch { .. } => "/api/match-application",
            EvaluationTask::AssessmentGeneration { .. } => "/api/generate-assessment",
            EvaluationTask::SubmissionScoring { .. } => "/api/score-assessment",
            EvaluationTask::CodeExecution { .. } => "/api/execute-code",
            EvaluationTask::JdAnalysis { .. } => "/api/analyze-jd",
        }
    }

    /// Human-readable kind label for failure messages and logs.
    pub fn kind_name(&self) -> &'static str {
        match self {
            EvaluationTask::ApplicationMatch { .. } => "application match",
            EvaluationTask::AssessmentGeneration { .. } => "assessment generation",
            EvaluationTask::SubmissionScoring { .. } => "submission scoring",
            EvaluationTask::CodeExecution { .. } => "code execution",
            EvaluationTask::JdAnalysis { .. } => "JD analysis",
        }
    }

    /// Serialized request body for the backend endpoint.
    /// The match threshold goes over the wire on the 0.0–1.0 scale.
    pub fn wire_body(&self) -> Value {
        match self {
            EvaluationTask::ApplicationMatch {
                jd_text,
                resume_text,
                threshold_percent,
            } => json!({
                "jd_text": jd_text,
                "resume_text": resume_text,
                "min_score_threshold": f64::from(*threshold_percent) / 100.0,
            }),
            EvaluationTask::AssessmentGeneration { config } => Value::Object(config.clone()),
            EvaluationTask::SubmissionScoring { submission } => Value::Object(submission.clone()),
            EvaluationTask::CodeExecution { request } => Value::Object(request.clone()),
            EvaluationTask::JdAnalysis { job_description } => json!({
                "job_description": job_description,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn match_task(threshold_percent: u32) -> EvaluationTask {
        EvaluationTask::ApplicationMatch {
            jd_text: "Rust engineer".to_string(),
            resume_text: "Rust developer".to_string(),
            threshold_percent,
        }
    }

    #[test]
    fn test_endpoint_paths_match_backend_contract() {
        assert_eq!(match_task(50).endpoint(), "/api/match-application");
        assert_eq!(
            EvaluationTask::AssessmentGeneration { config: Map::new() }.endpoint(),
            "/api/generate-assessment"
        );
        assert_eq!(
            EvaluationTask::SubmissionScoring {
                submission: Map::new()
            }
            .endpoint(),
            "/api/score-assessment"
        );
        assert_eq!(
            EvaluationTask::CodeExecution {
                request: Map::new()
            }
            .endpoint(),
            "/api/execute-code"
        );
        assert_eq!(
            EvaluationTask::JdAnalysis {
                job_description: "jd".to_string()
            }
            .endpoint(),
            "/api/analyze-jd"
        );
    }

    #[test]
    fn test_match_threshold_is_sent_on_unit_scale() {
        let body = match_task(50).wire_body();
        assert_eq!(body["min_score_threshold"], json!(0.5));
        assert_eq!(body["jd_text"], json!("Rust engineer"));
        assert_eq!(body["resume_text"], json!("Rust developer"));
    }

    #[test]
    fn test_jd_analysis_body_carries_job_description() {
        let task = EvaluationTask::JdAnalysis {
            job_description: "Senior Rust Engineer".to_string(),
        };
        assert_eq!(
            task.wire_body(),
            json!({"job_description": "Senior Rust Engineer"})
        );
    }

    #[test]
    fn test_opaque_payloads_pass_through_unchanged() {
        let mut config = Map::new();
        config.insert("num_mcq".to_string(), json!(10));
        let task = EvaluationTask::AssessmentGeneration {
            config: config.clone(),
        };
        assert_eq!(task.wire_body(), Value::Object(config));
    }
}
