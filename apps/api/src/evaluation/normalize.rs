//! Response Normalizer — coerces the backend's loosely-typed JSON into the
//! canonical result shapes.
//!
//! Numeric fields may arrive as integers or floats; they are normalized to
//! integers by rounding half away from zero (integral values pass through
//! unchanged). A required field absent after normalization is a
//! `MalformedResponse` failure — a missing score is never substituted with
//! zero.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use super::outcome::{
    EvalError, ExecutionReport, FailureKind, GeneratedAssessment, JdProfile, MatchReport,
    ScoreReport,
};

/// Rounds a backend-supplied numeric to an integer, half away from zero.
/// Idempotent on already-integral values.
pub fn normalize_number(raw: f64) -> i64 {
    raw.round() as i64
}

fn malformed(kind: &str, detail: impl std::fmt::Display) -> EvalError {
    EvalError::new(
        FailureKind::MalformedResponse,
        format!("{kind} response {detail}"),
    )
}

fn missing(kind: &str, field: &str) -> EvalError {
    malformed(kind, format_args!("is missing required field `{field}`"))
}

fn parse<T: DeserializeOwned>(body: &Value, kind: &str) -> Result<T, EvalError> {
    serde_json::from_value(body.clone())
        .map_err(|e| malformed(kind, format_args!("has unexpected shape: {e}")))
}

/// Normalizes a required 0–100 score field.
fn require_score(raw: Option<f64>, kind: &str, field: &str) -> Result<u32, EvalError> {
    let raw = raw.ok_or_else(|| missing(kind, field))?;
    u32::try_from(normalize_number(raw)).map_err(|_| {
        malformed(
            kind,
            format_args!("field `{field}` is out of range ({raw})"),
        )
    })
}

#[derive(Debug, Deserialize)]
struct MatchWire {
    shortlisted: Option<bool>,
    score: Option<f64>,
    reason: Option<String>,
    threshold: Option<f64>,
}

/// The backend echoes the threshold on the 0–100 scale; when it omits it,
/// the caller's requested threshold is substituted since the request fully
/// determines it.
pub fn normalize_match(body: &Value, requested_threshold: u32) -> Result<MatchReport, EvalError> {
    let wire: MatchWire = parse(body, "match")?;
    Ok(MatchReport {
        shortlisted: wire
            .shortlisted
            .ok_or_else(|| missing("match", "shortlisted"))?,
        score: require_score(wire.score, "match", "score")?,
        reason: wire.reason.ok_or_else(|| missing("match", "reason"))?,
        threshold: match wire.threshold {
            Some(threshold) => require_score(Some(threshold), "match", "threshold")?,
            None => requested_threshold,
        },
    })
}

#[derive(Debug, Deserialize)]
struct GenerationWire {
    mcq: Option<Vec<Value>>,
    subjective: Option<Vec<Value>>,
    coding: Option<Vec<Value>>,
}

pub fn normalize_generation(body: &Value) -> Result<GeneratedAssessment, EvalError> {
    let wire: GenerationWire = parse(body, "generation")?;
    Ok(GeneratedAssessment {
        mcq: wire.mcq.ok_or_else(|| missing("generation", "mcq"))?,
        subjective: wire
            .subjective
            .ok_or_else(|| missing("generation", "subjective"))?,
        coding: wire.coding.ok_or_else(|| missing("generation", "coding"))?,
    })
}

#[derive(Debug, Deserialize)]
struct ScoringWire {
    overall_score: Option<f64>,
    #[serde(default)]
    mcq: Value,
    #[serde(default)]
    sql: Value,
    #[serde(default)]
    dsa: Value,
}

pub fn normalize_scoring(body: &Value) -> Result<ScoreReport, EvalError> {
    let wire: ScoringWire = parse(body, "scoring")?;
    Ok(ScoreReport {
        overall_score: require_score(wire.overall_score, "scoring", "overall_score")?,
        mcq: wire.mcq,
        sql: wire.sql,
        dsa: wire.dsa,
    })
}

#[derive(Debug, Deserialize)]
struct ExecutionWire {
    total_tests: Option<f64>,
    passed_tests: Option<f64>,
    failed_tests: Option<f64>,
    score: Option<f64>,
    // The sandbox may omit per-test details for empty test sets.
    #[serde(default)]
    results: Vec<Value>,
}

pub fn normalize_execution(body: &Value) -> Result<ExecutionReport, EvalError> {
    let wire: ExecutionWire = parse(body, "execution")?;
    Ok(ExecutionReport {
        total_tests: require_score(wire.total_tests, "execution", "total_tests")?,
        passed_tests: require_score(wire.passed_tests, "execution", "passed_tests")?,
        failed_tests: require_score(wire.failed_tests, "execution", "failed_tests")?,
        score: require_score(wire.score, "execution", "score")?,
        results: wire.results,
    })
}

#[derive(Debug, Deserialize)]
struct JdWire {
    role: Option<String>,
    experience_level: Option<String>,
    experience_years: Option<f64>,
    #[serde(default)]
    skills: Vec<String>,
}

pub fn normalize_jd(body: &Value) -> Result<JdProfile, EvalError> {
    let wire: JdWire = parse(body, "JD analysis")?;
    Ok(JdProfile {
        role: wire.role.ok_or_else(|| missing("JD analysis", "role"))?,
        experience_level: wire.experience_level,
        experience_years: wire.experience_years.map(normalize_number),
        skills: wire.skills,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fractional_score_rounds_half_away_from_zero() {
        assert_eq!(normalize_number(87.5), 88);
        assert_eq!(normalize_number(87.4), 87);
        assert_eq!(normalize_number(0.5), 1);
    }

    #[test]
    fn test_integral_score_passes_through_unchanged() {
        assert_eq!(normalize_number(87.0), 87);
        assert_eq!(normalize_number(0.0), 0);
        assert_eq!(normalize_number(100.0), 100);
    }

    #[test]
    fn test_match_with_float_score_normalizes() {
        let body = json!({
            "shortlisted": true,
            "score": 87.5,
            "reason": "Strong overlap",
            "threshold": 50
        });
        let report = normalize_match(&body, 50).unwrap();
        assert_eq!(report.score, 88);
        assert!(report.shortlisted);
        assert_eq!(report.threshold, 50);
    }

    #[test]
    fn test_match_missing_score_is_malformed() {
        let body = json!({"shortlisted": true, "reason": "x", "threshold": 50});
        let err = normalize_match(&body, 50).unwrap_err();
        assert_eq!(err.kind, FailureKind::MalformedResponse);
        assert!(err.message.contains("score"));
    }

    #[test]
    fn test_match_missing_threshold_uses_requested_one() {
        let body = json!({"shortlisted": false, "score": 30, "reason": "weak"});
        let report = normalize_match(&body, 65).unwrap();
        assert_eq!(report.threshold, 65);
    }

    #[test]
    fn test_match_negative_score_is_malformed() {
        let body = json!({"shortlisted": false, "score": -3, "reason": "x"});
        let err = normalize_match(&body, 50).unwrap_err();
        assert_eq!(err.kind, FailureKind::MalformedResponse);
    }

    #[test]
    fn test_generation_requires_all_three_sets() {
        let body = json!({"mcq": [], "subjective": []});
        let err = normalize_generation(&body).unwrap_err();
        assert_eq!(err.kind, FailureKind::MalformedResponse);
        assert!(err.message.contains("coding"));
    }

    #[test]
    fn test_scoring_missing_overall_score_is_malformed() {
        // Never default-fill a zero score for a missing one.
        let body = json!({"mcq": {"correct": 3, "total": 5}});
        let err = normalize_scoring(&body).unwrap_err();
        assert_eq!(err.kind, FailureKind::MalformedResponse);
        assert!(err.message.contains("overall_score"));
    }

    #[test]
    fn test_scoring_sections_pass_through() {
        let body = json!({
            "overall_score": 72.4,
            "mcq": {"correct": 8, "total": 10},
            "sql": {"correct": 1, "total": 2},
            "dsa": {"correct": 0, "total": 1}
        });
        let report = normalize_scoring(&body).unwrap();
        assert_eq!(report.overall_score, 72);
        assert_eq!(report.mcq["correct"], json!(8));
    }

    #[test]
    fn test_execution_counts_and_score_required() {
        let body = json!({"total_tests": 4, "passed_tests": 3, "failed_tests": 1});
        let err = normalize_execution(&body).unwrap_err();
        assert_eq!(err.kind, FailureKind::MalformedResponse);

        let body = json!({
            "total_tests": 4,
            "passed_tests": 3,
            "failed_tests": 1,
            "score": 75.0,
            "results": [{"test": 1, "passed": true}]
        });
        let report = normalize_execution(&body).unwrap();
        assert_eq!(report.score, 75);
        assert_eq!(report.results.len(), 1);
    }

    #[test]
    fn test_execution_results_default_to_empty() {
        let body = json!({"total_tests": 0, "passed_tests": 0, "failed_tests": 0, "score": 0});
        let report = normalize_execution(&body).unwrap();
        assert!(report.results.is_empty());
    }

    #[test]
    fn test_jd_role_is_required() {
        let body = json!({"skills": ["rust"]});
        let err = normalize_jd(&body).unwrap_err();
        assert_eq!(err.kind, FailureKind::MalformedResponse);
        assert!(err.message.contains("role"));
    }

    #[test]
    fn test_jd_optional_fields_may_be_null() {
        let body = json!({
            "role": "Backend Engineer",
            "experience_level": null,
            "experience_years": 4.6,
            "skills": ["python", "kubernetes"]
        });
        let profile = normalize_jd(&body).unwrap();
        assert_eq!(profile.role, "Backend Engineer");
        assert!(profile.experience_level.is_none());
        assert_eq!(profile.experience_years, Some(5));
        assert_eq!(profile.skills.len(), 2);
    }

    #[test]
    fn test_non_object_body_is_malformed() {
        let err = normalize_match(&json!([1, 2, 3]), 50).unwrap_err();
        assert_eq!(err.kind, FailureKind::MalformedResponse);
    }
}
