//! Liveness endpoint.

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::state::SharedState;

pub async fn health(State(state): State<SharedState>) -> Json<Value> {
    let sources = state.sources.read().await.len();
    let has_results = state.results.read().await.is_some();
    Json(json!({
        "status": "ok",
        "sources": sources,
        "has_results": has_results,
    }))
}
