use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::evaluation::outcome::{EvalError, FailureKind};

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Evaluation(#[from] EvalError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Evaluation(err) => {
                tracing::warn!("AI evaluation failure ({:?}): {}", err.kind, err.message);
                (
                    failure_status(err.kind),
                    failure_code(err.kind),
                    err.message.clone(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

fn failure_status(kind: FailureKind) -> StatusCode {
    match kind {
        FailureKind::Disabled => StatusCode::SERVICE_UNAVAILABLE,
        FailureKind::Unreachable | FailureKind::MalformedResponse => StatusCode::BAD_GATEWAY,
        FailureKind::QuotaExceeded => StatusCode::TOO_MANY_REQUESTS,
        FailureKind::Unsupported => StatusCode::NOT_IMPLEMENTED,
    }
}

fn failure_code(kind: FailureKind) -> &'static str {
    match kind {
        FailureKind::Disabled => "AI_DISABLED",
        FailureKind::Unreachable => "AI_UNREACHABLE",
        FailureKind::QuotaExceeded => "AI_QUOTA_EXCEEDED",
        FailureKind::MalformedResponse => "AI_MALFORMED_RESPONSE",
        FailureKind::Unsupported => "AI_UNSUPPORTED",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_failure_kind_maps_to_a_distinct_status() {
        assert_eq!(
            failure_status(FailureKind::Disabled),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            failure_status(FailureKind::QuotaExceeded),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            failure_status(FailureKind::Unreachable),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            failure_status(FailureKind::Unsupported),
            StatusCode::NOT_IMPLEMENTED
        );
    }
}
