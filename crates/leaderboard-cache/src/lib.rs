//! # leaderboard-cache
//!
//! Persistence for the leaderboard snapshot.
//!
//! ## Features
//!
//! - **Connection Pool**: deadpool-managed Redis connections for the snapshot
//! - **Snapshot Stores**: `SnapshotStore` implementations backed by Redis or process memory
//!
//! ## Example
//!
//! ```ignore
//! use leaderboard_cache::{RedisPool, RedisSnapshotStore};
//! use leaderboard_core::{SnapshotStore, LEADERBOARD_CACHE_KEY};
//!
//! let pool = RedisPool::from_config(&config.redis)?;
//! let store = RedisSnapshotStore::new(pool);
//!
//! store.set(LEADERBOARD_CACHE_KEY, &snapshot).await?;
//! let cached = store.get(LEADERBOARD_CACHE_KEY).await?;
//! ```

pub mod pool;
pub mod snapshot;

// Re-export pool types
pub use pool::{RedisPool, RedisPoolError};

// Re-export store types
pub use snapshot::{MemorySnapshotStore, RedisSnapshotStore};
