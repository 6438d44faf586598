use axum::Json;
use serde_json::{json, Value};

/// GET /
/// Liveness probe with a fixed greeting.
pub async fn root_handler() -> Json<Value> {
    Json(json!({ "message": "AI Interview Coach backend is running" }))
}
