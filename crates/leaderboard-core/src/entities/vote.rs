//! Vote entity - one voter's recorded choice on one proposal

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single on-chain vote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub proposal_id: String,
    /// Voter address, case preserved as returned by the indexer
    pub voter: String,
    /// Block time of the vote
    pub cast_at: DateTime<Utc>,
}

impl Vote {
    /// Create a new Vote
    pub fn new(proposal_id: impl Into<String>, voter: impl Into<String>, cast_at: DateTime<Utc>) -> Self {
        Self {
            proposal_id: proposal_id.into(),
            voter: voter.into(),
            cast_at,
        }
    }
}
