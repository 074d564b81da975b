//! AI Orchestration & Degradation layer.
//!
//! Routes each evaluation task to the external AI backend when it is
//! enabled and healthy, and to a deterministic local fallback (where one
//! exists) when it is not. Callers always receive a source-tagged result or
//! an `EvalError` carrying exactly one `FailureKind` — never a raw
//! transport error.

pub mod dispatcher;
pub mod fallback;
pub mod handlers;
pub mod normalize;
pub mod outcome;
pub mod task;
