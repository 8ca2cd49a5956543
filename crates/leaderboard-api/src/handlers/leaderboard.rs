//! Leaderboard handlers
//!
//! Reads self-heal on a cache miss by running the refresh pipeline inline.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use leaderboard_service::{LeaderboardResponse, RefreshResponse};
use tracing::info;

use crate::extractors::BearerAuth;
use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

/// Attachment name of the CSV export
pub const EXPORT_FILENAME: &str = "voter-leaderboard.csv";

/// Current snapshot, refreshed inline when nothing is cached
///
/// GET /get-leaderboard
pub async fn get_leaderboard(
    _auth: BearerAuth,
    State(state): State<AppState>,
) -> ApiResult<Json<LeaderboardResponse>> {
    let read = state
        .leaderboard()
        .get_or_refresh()
        .await
        .map_err(ApiError::Refresh)?;

    Ok(Json(read.into()))
}

/// Run the full pipeline regardless of cache state
///
/// POST /refresh-leaderboard
pub async fn refresh_leaderboard(
    _auth: BearerAuth,
    State(state): State<AppState>,
) -> ApiResult<Json<RefreshResponse>> {
    info!("Manual refresh triggered");

    let report = state
        .leaderboard()
        .run_full_refresh()
        .await
        .map_err(ApiError::Refresh)?;

    Ok(Json(report.into()))
}

/// Current snapshot as a CSV attachment
///
/// GET /export-leaderboard
pub async fn export_leaderboard(
    _auth: BearerAuth,
    State(state): State<AppState>,
) -> ApiResult<Response> {
    let read = state
        .leaderboard()
        .get_or_refresh()
        .await
        .map_err(ApiError::Refresh)?;

    let disposition = format!("attachment; filename=\"{EXPORT_FILENAME}\"");
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        read.snapshot.to_csv(),
    )
        .into_response())
}
