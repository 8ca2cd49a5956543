//! Snapshot storage in Redis.
//!
//! The snapshot is stored as one JSON string without TTL; staleness is
//! reported through `lastUpdated` rather than enforced by expiry.

use async_trait::async_trait;
use leaderboard_core::{DomainError, LeaderboardSnapshot, RepoResult, SnapshotStore};

use crate::pool::{RedisPool, RedisPoolError};

/// Redis-backed snapshot store
#[derive(Debug, Clone)]
pub struct RedisSnapshotStore {
    pool: RedisPool,
}

impl RedisSnapshotStore {
    /// Create a new snapshot store
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }
}

fn store_error(err: RedisPoolError) -> DomainError {
    match err {
        RedisPoolError::Encoding(e) => DomainError::Serialization(e.to_string()),
        other => DomainError::Store(other.to_string()),
    }
}

#[async_trait]
impl SnapshotStore for RedisSnapshotStore {
    async fn get(&self, key: &str) -> RepoResult<Option<LeaderboardSnapshot>> {
        self.pool.get_snapshot(key).await.map_err(store_error)
    }

    async fn set(&self, key: &str, snapshot: &LeaderboardSnapshot) -> RepoResult<()> {
        self.pool.set_snapshot(key, snapshot).await.map_err(store_error)?;

        tracing::debug!(
            key = %key,
            voters = snapshot.voter_count(),
            total_proposals = snapshot.total_proposals,
            "Stored leaderboard snapshot"
        );

        Ok(())
    }

    async fn health_check(&self) -> RepoResult<()> {
        self.pool.ping().await.map_err(store_error)
    }
}
