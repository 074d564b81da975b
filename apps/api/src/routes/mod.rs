pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::evaluation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/ai/status", get(handlers::handle_ai_status))
        .route(
            "/api/v1/applications/evaluate",
            post(handlers::handle_evaluate_application),
        )
        .route(
            "/api/v1/assessments/generate",
            post(handlers::handle_generate_assessment),
        )
        .route(
            "/api/v1/submissions/score",
            post(handlers::handle_score_submission),
        )
        .route("/api/v1/code/execute", post(handlers::handle_execute_code))
        .route("/api/v1/jd/analyze", post(handlers::handle_analyze_jd))
        .with_state(state)
}
