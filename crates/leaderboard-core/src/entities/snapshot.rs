//! Leaderboard snapshot - the cached result of one pipeline run

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::voter::VoterData;

/// Fixed storage key of the current snapshot
pub const LEADERBOARD_CACHE_KEY: &str = "voter_leaderboard_data";

/// Header row of the CSV export
pub const CSV_HEADER: &str =
    "address,ens_name,proposals_voted,participation_rate,first_vote,last_vote";

/// Complete leaderboard produced by a full refresh
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardSnapshot {
    /// Rows sorted by `proposals_voted` descending
    pub voter_data: Vec<VoterData>,
    pub total_proposals: u32,
    pub last_updated: DateTime<Utc>,
    /// Always equal to `total_proposals`; kept for provenance
    pub proposals_fetched: u32,
}

impl LeaderboardSnapshot {
    /// Create a snapshot for a run over `total_proposals` proposals
    pub fn new(voter_data: Vec<VoterData>, total_proposals: u32, last_updated: DateTime<Utc>) -> Self {
        Self {
            voter_data,
            total_proposals,
            last_updated,
            proposals_fetched: total_proposals,
        }
    }

    /// Number of distinct voters on the board
    #[inline]
    pub fn voter_count(&self) -> usize {
        self.voter_data.len()
    }

    /// Number of voters with a resolved name
    pub fn resolved_names(&self) -> usize {
        self.voter_data
            .iter()
            .filter(|voter| voter.ens_name.is_some())
            .count()
    }

    /// Render the board as CSV.
    ///
    /// Fields are joined with commas and never quoted; addresses and ENS
    /// names do not contain commas.
    pub fn to_csv(&self) -> String {
        let mut lines = Vec::with_capacity(self.voter_data.len() + 1);
        lines.push(CSV_HEADER.to_string());
        lines.extend(self.voter_data.iter().map(|row| {
            format!(
                "{},{},{},{:.2},{},{}",
                row.address,
                row.ens_name.as_deref().unwrap_or_default(),
                row.proposals_voted,
                row.participation_rate,
                row.first_vote,
                row.last_vote,
            )
        }));
        lines.join("\n")
    }
}
