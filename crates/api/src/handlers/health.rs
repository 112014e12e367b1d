use axum::extract::State;
use axum::Json;
use chrono::Utc;
use notebook_core::types::Timestamp;
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the store does not answer.
    pub status: &'static str,
    pub timestamp: Timestamp,
    /// Active store backend (`sqlite` or `memory`).
    pub store: &'static str,
}

/// GET /api/health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let status = match state.store.health_check().await {
        Ok(()) => "ok",
        Err(e) => {
            tracing::warn!(error = %e, "Store health check failed");
            "degraded"
        }
    };

    Json(HealthResponse {
        status,
        timestamp: Utc::now(),
        store: state.store.backend(),
    })
}
