//! Health check handler

use axum::Json;
use forum_service::dto::HealthResponse;

/// Liveness check
///
/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
