//! In-process snapshot storage.
//!
//! Used when no Redis is configured and in tests. Values are held behind an
//! `Arc` that is swapped under a write lock, so a reader holds either the old
//! or the new snapshot.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use leaderboard_core::{LeaderboardSnapshot, RepoResult, SnapshotStore};
use parking_lot::RwLock;

/// Memory-backed snapshot store
#[derive(Debug, Default, Clone)]
pub struct MemorySnapshotStore {
    entries: Arc<RwLock<HashMap<String, Arc<LeaderboardSnapshot>>>>,
}

impl MemorySnapshotStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check if nothing has been stored yet
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[async_trait]
impl SnapshotStore for MemorySnapshotStore {
    async fn get(&self, key: &str) -> RepoResult<Option<LeaderboardSnapshot>> {
        let entry = self.entries.read().get(key).cloned();
        Ok(entry.map(|snapshot| snapshot.as_ref().clone()))
    }

    async fn set(&self, key: &str, snapshot: &LeaderboardSnapshot) -> RepoResult<()> {
        let value = Arc::new(snapshot.clone());
        self.entries.write().insert(key.to_string(), value);
        Ok(())
    }

    async fn health_check(&self) -> RepoResult<()> {
        Ok(())
    }
}
