use crate::evaluation::dispatcher::Orchestrator;

/// Shared application state injected into all route handlers via Axum
/// extractors. The orchestrator is the only shared component and holds no
/// mutable state, so concurrent requests need no locking.
#[derive(Clone)]
pub struct AppState {
    pub ai: Orchestrator,
}
