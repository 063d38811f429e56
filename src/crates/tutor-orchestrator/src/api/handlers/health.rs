use axum::Json;

use crate::api::models::HealthResponse;

/// Handler for GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::new("ok", crate::version()))
}
