/// AI Client — the single point of entry for all AI-backend HTTP calls.
///
/// ARCHITECTURAL RULE: no other module may talk to the AI backend directly.
/// The dispatcher owns the degrade/fail policy; this module only performs
/// bounded network calls and reports what happened in a classifiable form.
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;

/// What went wrong during a single task request. The dispatcher maps these
/// onto `FailureKind`s (or a silent fallback) per task kind.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("AI backend rate limited (429)")]
    RateLimited,

    #[error("AI backend returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("AI backend returned an empty or unparseable body")]
    MalformedBody,
}

/// Thin wrapper over a shared `reqwest::Client` pointed at the AI backend.
///
/// Both calls are bounded by explicit timeouts so an unreachable backend
/// degrades in milliseconds rather than hanging, and both are plain futures:
/// dropping them (caller disconnect upstream) cancels the in-flight request.
#[derive(Clone)]
pub struct AiClient {
    client: Client,
    base_url: String,
    enabled: bool,
    probe_timeout: Duration,
    request_timeout: Duration,
}

impl AiClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::builder()
                .build()
                .expect("Failed to build HTTP client"),
            base_url: config.ai_service_url.clone(),
            enabled: config.ai_service_enabled,
            probe_timeout: config.probe_timeout,
            request_timeout: config.request_timeout,
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Availability probe: is the AI backend usable right now?
    ///
    /// Total by contract — every transport error, timeout or non-success
    /// status collapses into `false`. The result is never cached; the
    /// backend's health can change between calls within one process
    /// lifetime, so every gated call re-probes.
    pub async fn probe(&self) -> bool {
        if !self.enabled {
            return false;
        }

        let url = format!("{}/health", self.base_url);
        match self
            .client
            .get(&url)
            .timeout(self.probe_timeout)
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!("AI backend health probe failed: {e}");
                false
            }
        }
    }

    /// Performs exactly one POST to a task endpoint and parses the JSON
    /// body. No retries: a retry loop here would stack latency on top of an
    /// already-degraded backend; workflow-level policy decides whether to
    /// re-attempt the whole evaluation.
    pub async fn post_task<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Value, ClientError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .post(&url)
            .json(body)
            .timeout(self.request_timeout)
            .send()
            .await?;

        let status = response.status();

        if status.as_u16() == 429 {
            warn!("AI backend rate limited on {path}");
            return Err(ClientError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("AI backend returned {status} on {path}: {body}");
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Err(ClientError::MalformedBody);
        }

        serde_json::from_slice(&bytes).map_err(|_| ClientError::MalformedBody)
    }
}
