//! Health check handler.

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// Handle health check requests. Reports which upstream the relay forwards to.
pub async fn handle_health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "upstream": {
            "base_url": state.config.base_url,
            "model": state.config.model,
        }
    }))
}
