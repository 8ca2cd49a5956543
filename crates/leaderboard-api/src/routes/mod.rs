//! Route definitions
//!
//! Every endpoint is mounted under the configured route prefix.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{health, leaderboard, tally};
use crate::state::AppState;

/// Create the main API router mounted under `prefix`.
///
/// An empty prefix mounts the routes at the root.
pub fn create_router(prefix: &str) -> Router<AppState> {
    let routes = Router::new()
        .merge(health_routes())
        .merge(tally_routes())
        .merge(leaderboard_routes());

    if prefix.is_empty() {
        routes
    } else {
        Router::new().nest(prefix, routes)
    }
}

/// Health check routes
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// Tally pass-through routes
fn tally_routes() -> Router<AppState> {
    Router::new()
        .route("/tally/proposals", post(tally::proxy_proposals))
        .route("/tally/votes", post(tally::proxy_votes))
}

/// Leaderboard routes
fn leaderboard_routes() -> Router<AppState> {
    Router::new()
        .route("/get-leaderboard", get(leaderboard::get_leaderboard))
        .route("/refresh-leaderboard", post(leaderboard::refresh_leaderboard))
        .route("/export-leaderboard", get(leaderboard::export_leaderboard))
}
