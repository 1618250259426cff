//! Assist Router

use axum::{Router, routing::post};

use crate::config::AssistConfig;
use crate::presentation::handlers::{self, AssistAppState};

/// Create the Assist router
///
/// Routes are mounted directly under /api by the caller.
pub fn assist_router(config: AssistConfig) -> Router {
    let state = AssistAppState::new(config);

    Router::new()
        .route("/explain-code", post(handlers::explain_code))
        .route("/ai-assist", post(handlers::ai_assist))
        .with_state(state)
}
