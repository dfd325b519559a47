//! JSON response envelopes.

use axum::Json;
use serde_json::{json, Value};

/// Gateway liveness envelope for `/` and `/api`.
pub fn status_ok() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "Music gateway ready",
    }))
}

/// Per-service liveness envelope for a bare service prefix.
pub fn service_ok(service: &str) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": service,
    }))
}
