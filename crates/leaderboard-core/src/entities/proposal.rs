//! Proposal entity - a single governance vote item

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Governance proposal as reported by the indexer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: String,
    /// Identifier of the governor contract the proposal belongs to
    pub governor_id: String,
    pub created_at: DateTime<Utc>,
}

impl Proposal {
    /// Create a new Proposal
    pub fn new(id: impl Into<String>, governor_id: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            governor_id: governor_id.into(),
            created_at,
        }
    }
}
