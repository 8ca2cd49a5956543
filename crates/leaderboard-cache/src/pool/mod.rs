//! Redis connection pool backing the snapshot store

mod redis_pool;

pub use redis_pool::{RedisPool, RedisPoolError};
