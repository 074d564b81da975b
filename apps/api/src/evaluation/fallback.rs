//! Fallback Matcher — deterministic local substitutes used when the AI
//! backend is unavailable or over quota.
//!
//! These are intentionally crude and stable: their purpose is graceful
//! degradation, not accuracy. The source tag on the surrounding
//! `Evaluation::Fallback` marks every result produced here.

use std::collections::HashSet;

use super::outcome::{JdProfile, MatchReport};

pub const SHORTLISTED_REASON: &str = "Resume matches job requirements";
pub const REJECTED_REASON: &str = "Resume does not meet minimum score threshold";

/// Tokens of 3 characters or fewer carry no signal ("the", "and", "for").
const MIN_TOKEN_LEN: usize = 4;
/// Each qualifying keyword overlap is worth 10 points, capped at 100.
const POINTS_PER_MATCH: u32 = 10;

/// Keyword-overlap matcher: lowercases both texts, tokenizes on whitespace,
/// and counts candidate tokens longer than 3 characters that appear among
/// the job description's distinct tokens. Repeated candidate tokens count
/// once per occurrence. Pure and synchronous — no I/O.
pub fn match_fallback(jd_text: &str, resume_text: &str, threshold_percent: u32) -> MatchReport {
    let jd_lower = jd_text.to_lowercase();
    let jd_tokens: HashSet<&str> = jd_lower.split_whitespace().collect();

    let resume_lower = resume_text.to_lowercase();
    let matches = resume_lower
        .split_whitespace()
        .filter(|token| token.len() >= MIN_TOKEN_LEN && jd_tokens.contains(token))
        .count() as u32;

    let score = (matches * POINTS_PER_MATCH).min(100);
    let shortlisted = score >= threshold_percent;

    MatchReport {
        shortlisted,
        score,
        reason: if shortlisted {
            SHORTLISTED_REASON.to_string()
        } else {
            REJECTED_REASON.to_string()
        },
        threshold: threshold_percent,
    }
}

/// JD analysis has no sound local algorithm: the system cannot infer
/// structured role/skill data without the backend, so it returns a safe
/// placeholder rather than guessing.
pub fn jd_fallback() -> JdProfile {
    JdProfile {
        role: "Software Developer".to_string(),
        experience_level: None,
        experience_years: None,
        skills: Vec::new(),
    }
}
