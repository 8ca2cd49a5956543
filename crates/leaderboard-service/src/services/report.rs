//! Outcome of one pipeline run

use leaderboard_core::LeaderboardSnapshot;
use serde::Serialize;
use uuid::Uuid;

/// Pipeline stage that absorbed a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshStage {
    Votes,
    NameResolution,
}

/// A per-item failure that was recorded instead of aborting the run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedItem {
    pub stage: RefreshStage,
    /// Proposal id or voter address
    pub item: String,
    pub reason: String,
}

impl SkippedItem {
    pub fn votes(proposal_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            stage: RefreshStage::Votes,
            item: proposal_id.into(),
            reason: reason.into(),
        }
    }

    pub fn name_resolution(address: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            stage: RefreshStage::NameResolution,
            item: address.into(),
            reason: reason.into(),
        }
    }
}

/// Result of a successful full refresh
#[derive(Debug, Clone)]
pub struct RefreshReport {
    pub run_id: Uuid,
    pub snapshot: LeaderboardSnapshot,
    pub skipped: Vec<SkippedItem>,
}

impl RefreshReport {
    /// Skipped items of one stage
    pub fn skipped_in(&self, stage: RefreshStage) -> impl Iterator<Item = &SkippedItem> {
        self.skipped.iter().filter(move |item| item.stage == stage)
    }
}
