//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.

use chrono::{DateTime, Utc};
use leaderboard_core::LeaderboardSnapshot;
use serde::Serialize;

use crate::services::{LeaderboardRead, RefreshReport, SkippedItem};

// ============================================================================
// Leaderboard Responses
// ============================================================================

/// `get-leaderboard` body: the snapshot fields inlined next to the flags
#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardResponse {
    pub success: bool,
    pub cached: bool,
    #[serde(flatten)]
    pub snapshot: LeaderboardSnapshot,
}

impl From<LeaderboardRead> for LeaderboardResponse {
    fn from(read: LeaderboardRead) -> Self {
        Self {
            success: true,
            cached: read.cached,
            snapshot: read.snapshot,
        }
    }
}

/// `refresh-leaderboard` body
#[derive(Debug, Clone, Serialize)]
pub struct RefreshResponse {
    pub success: bool,
    pub message: String,
    pub data: LeaderboardSnapshot,
    pub skipped: Vec<SkippedItem>,
}

impl From<RefreshReport> for RefreshResponse {
    fn from(report: RefreshReport) -> Self {
        Self {
            success: true,
            message: "Leaderboard data refreshed successfully".to_string(),
            data: report.snapshot,
            skipped: report.skipped,
        }
    }
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub store: String,
}

impl ReadinessResponse {
    pub fn new(store_healthy: bool) -> Self {
        Self {
            status: if store_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            store: if store_healthy { "healthy" } else { "unhealthy" }.to_string(),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
