use anyhow::{Context, Result};
use std::time::Duration;

/// Application configuration loaded from environment variables.
/// Read once at startup and treated as immutable for the process lifetime.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the external AI evaluation backend.
    pub ai_service_url: String,
    /// Global enable/disable switch for the AI backend. When false, no
    /// network access is attempted and every call degrades immediately.
    pub ai_service_enabled: bool,
    /// Upper bound on the health probe round-trip.
    pub probe_timeout: Duration,
    /// Upper bound on a single task request.
    pub request_timeout: Duration,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            ai_service_url: env_or("AI_SERVICE_URL", "http://localhost:5000")
                .trim_end_matches('/')
                .to_string(),
            ai_service_enabled: match std::env::var("AI_SERVICE_ENABLED") {
                Ok(value) => value
                    .parse::<bool>()
                    .context("AI_SERVICE_ENABLED must be 'true' or 'false'")?,
                Err(_) => true,
            },
            probe_timeout: Duration::from_millis(env_millis("AI_PROBE_TIMEOUT_MS", 1_500)?),
            request_timeout: Duration::from_millis(env_millis("AI_REQUEST_TIMEOUT_MS", 30_000)?),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_millis(key: &str, default: u64) -> Result<u64> {
    match std::env::var(key) {
        Ok(value) => value
            .parse::<u64>()
            .with_context(|| format!("{key} must be a duration in milliseconds")),
        Err(_) => Ok(default),
    }
}
