//! Port traits (ports) - define the interface for storage and lookups
//!
//! The domain layer defines what it needs, and the cache and service layers
//! provide the implementations.

use async_trait::async_trait;

use crate::entities::LeaderboardSnapshot;
use crate::error::DomainError;

/// Result type for port operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Snapshot Store
// ============================================================================

/// Key-value persistence for the leaderboard snapshot.
///
/// `set` replaces the value under `key` as a whole; readers observe either
/// the previous snapshot or the new one, never a mix.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Read the snapshot stored under `key`
    async fn get(&self, key: &str) -> RepoResult<Option<LeaderboardSnapshot>>;

    /// Replace the snapshot stored under `key`
    async fn set(&self, key: &str, snapshot: &LeaderboardSnapshot) -> RepoResult<()>;

    /// Check that the backing store is reachable
    async fn health_check(&self) -> RepoResult<()>;
}

// ============================================================================
// Name Directory
// ============================================================================

/// Reverse name lookup for blockchain addresses
#[async_trait]
pub trait NameDirectory: Send + Sync {
    /// Look up the primary name of `address`.
    ///
    /// Returns `Ok(None)` when the address has no (verified) name.
    async fn lookup_address(&self, address: &str) -> RepoResult<Option<String>>;
}
