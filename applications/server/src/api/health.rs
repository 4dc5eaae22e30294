/// Health check API routes
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: String,
}

/// GET /api/v1/health - Health check endpoint
///
/// Returns 503 when the database cannot answer a trivial query.
pub async fn health(State(app_state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let (status, database) = match app_state.db.ping().await {
        Ok(()) => (StatusCode::OK, "ok"),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
        }
    };

    (
        status,
        Json(HealthResponse {
            status: if status.is_success() { "ok" } else { "degraded" }.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            database: database.to_string(),
        }),
    )
}
