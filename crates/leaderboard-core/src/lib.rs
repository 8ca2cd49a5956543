//! # leaderboard-core
//!
//! Domain layer containing governance entities, the voter aggregator, and the
//! port traits implemented by the cache and service layers.
//! This crate has zero dependencies on infrastructure (Redis, HTTP, etc.).

pub mod aggregate;
pub mod entities;
pub mod error;
pub mod traits;

// Re-export commonly used types at crate root
pub use aggregate::{aggregate_votes, format_vote_date, VoterAggregator};
pub use entities::{
    LeaderboardSnapshot, Proposal, Vote, VoterData, VoterRecord, CSV_HEADER,
    LEADERBOARD_CACHE_KEY,
};
pub use error::DomainError;
pub use traits::{NameDirectory, RepoResult, SnapshotStore};
