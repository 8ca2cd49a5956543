//! Tally proxy handlers
//!
//! Forward a caller-supplied GraphQL body to Tally with the server-side key.

use axum::{extract::State, http::StatusCode, Json};
use leaderboard_service::ServiceError;
use serde_json::Value;
use tracing::{debug, warn};

use crate::extractors::BearerAuth;
use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

/// POST /tally/proposals
pub async fn proxy_proposals(
    _auth: BearerAuth,
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> ApiResult<Json<Value>> {
    forward(&state, "proposals", &body).await
}

/// POST /tally/votes
pub async fn proxy_votes(
    _auth: BearerAuth,
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> ApiResult<Json<Value>> {
    forward(&state, "votes", &body).await
}

async fn forward(state: &AppState, resource: &str, body: &Value) -> ApiResult<Json<Value>> {
    let fetch_failed = || format!("Failed to fetch {resource} from Tally API");

    let response = match state.tally().forward(body).await {
        Ok(response) => response,
        Err(ServiceError::Configuration(msg)) => {
            warn!(resource, "Proxy call rejected, no Tally API key");
            return Err(ApiError::proxy(
                StatusCode::INTERNAL_SERVER_ERROR,
                msg,
                "CONFIGURATION_ERROR",
                None,
            ));
        }
        Err(e) => {
            return Err(ApiError::proxy(
                StatusCode::INTERNAL_SERVER_ERROR,
                fetch_failed(),
                e.error_code(),
                Some(e.to_string()),
            ));
        }
    };

    if !response.is_success() {
        warn!(status = response.status, resource, "Tally API error");
        let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::BAD_GATEWAY);
        return Err(ApiError::proxy(
            status,
            format!("Tally API error: {}", response.status),
            "UPSTREAM_ERROR",
            Some(response.body),
        ));
    }

    let data: Value = response.json().map_err(|e| {
        ApiError::proxy(
            StatusCode::INTERNAL_SERVER_ERROR,
            fetch_failed(),
            "UPSTREAM_ERROR",
            Some(e.to_string()),
        )
    })?;

    debug!(resource, "Proxied Tally request");
    Ok(Json(data))
}
