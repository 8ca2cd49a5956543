//! Voter entities - the per-run accumulator and the published row

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::vote::Vote;

/// Accumulated voting activity of one address during a single run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoterRecord {
    pub address: String,
    pub voted_proposal_ids: HashSet<String>,
    pub first_vote_at: DateTime<Utc>,
    pub last_vote_at: DateTime<Utc>,
}

impl VoterRecord {
    /// Start a record from the first vote observed for an address
    pub fn from_vote(vote: &Vote) -> Self {
        let mut voted_proposal_ids = HashSet::new();
        voted_proposal_ids.insert(vote.proposal_id.clone());
        Self {
            address: vote.voter.clone(),
            voted_proposal_ids,
            first_vote_at: vote.cast_at,
            last_vote_at: vote.cast_at,
        }
    }

    /// Fold another vote from the same address into the record
    pub fn observe(&mut self, vote: &Vote) {
        debug_assert_eq!(self.address, vote.voter);
        self.voted_proposal_ids.insert(vote.proposal_id.clone());
        self.first_vote_at = self.first_vote_at.min(vote.cast_at);
        self.last_vote_at = self.last_vote_at.max(vote.cast_at);
    }

    /// Number of distinct proposals voted on
    #[inline]
    pub fn proposals_voted(&self) -> u32 {
        self.voted_proposal_ids.len() as u32
    }
}

/// One leaderboard row
///
/// Field names are snake_case on the wire; the presentation layer reads them as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoterData {
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ens_name: Option<String>,
    pub proposals_voted: u32,
    /// Percentage of the run's proposals this voter took part in, in `[0, 100]`
    pub participation_rate: f64,
    pub first_vote: String,
    pub last_vote: String,
}
