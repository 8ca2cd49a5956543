//! Snapshot storage module.
//!
//! Provides the `SnapshotStore` implementations:
//! - Redis (shared across server instances)
//! - Process memory (single instance, or when no Redis is configured)

mod memory_store;
mod redis_store;

pub use memory_store::MemorySnapshotStore;
pub use redis_store::RedisSnapshotStore;
