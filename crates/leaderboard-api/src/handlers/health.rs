//! Health check handlers
//!
//! Liveness and readiness endpoints.

use axum::{extract::State, http::StatusCode, Json};
use leaderboard_service::{HealthResponse, ReadinessResponse};

use crate::extractors::BearerAuth;
use crate::state::AppState;

/// Basic health check (liveness)
///
/// GET /health
pub async fn health_check(_auth: BearerAuth) -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// Readiness check against the snapshot store
///
/// GET /health/ready
pub async fn readiness_check(
    _auth: BearerAuth,
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let store_healthy = state.leaderboard().store_ready().await;

    let status = if store_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(ReadinessResponse::new(store_healthy)))
}
