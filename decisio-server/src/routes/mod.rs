//! HTTP surface: router assembly and request handlers.

mod decision;

use axum::routing::{get, post};
use axum::{Json, Router};

use crate::state::AppState;

pub use decision::evaluate_decision;

/// Build the service router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/decision/evaluate", post(decision::evaluate_decision))
        .route("/healthz", get(healthz))
        .with_state(state)
}

async fn healthz() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
