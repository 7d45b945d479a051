/*
 * Responsibility
 * - GET /health (liveness)
 * - Mounted outside the tenant middleware so probes need no signature
 */
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}
