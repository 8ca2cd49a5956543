//! Pooled Redis connections for the snapshot store.
//!
//! Exposes only what the store issues: `PING`, and `GET`/`SET` of the
//! snapshot as a JSON string.

use deadpool_redis::{Config, Pool, Runtime};
use leaderboard_common::RedisConfig;
use leaderboard_core::LeaderboardSnapshot;
use redis::AsyncCommands;

#[derive(Debug, thiserror::Error)]
pub enum RedisPoolError {
    #[error("Invalid Redis configuration: {0}")]
    Config(String),

    #[error("No Redis connection available: {0}")]
    Checkout(#[from] deadpool_redis::PoolError),

    #[error("Redis command failed: {0}")]
    Command(#[from] redis::RedisError),

    #[error("Snapshot encoding failed: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Connection pool sized by `REDIS_MAX_CONNECTIONS`
#[derive(Clone)]
pub struct RedisPool {
    pool: Pool,
}

impl std::fmt::Debug for RedisPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisPool")
            .field("status", &self.pool.status())
            .finish()
    }
}

impl RedisPool {
    /// Build the pool; no connection is opened until the first command
    pub fn from_config(config: &RedisConfig) -> Result<Self, RedisPoolError> {
        let pool = Config::from_url(&config.url)
            .builder()
            .map_err(|e| RedisPoolError::Config(e.to_string()))?
            .max_size(config.max_connections as usize)
            .runtime(Runtime::Tokio1)
            .build()
            .map_err(|e| RedisPoolError::Config(e.to_string()))?;

        tracing::info!(
            host = %redacted(&config.url),
            max_connections = config.max_connections,
            "Redis pool created"
        );

        Ok(Self { pool })
    }

    pub async fn ping(&self) -> Result<(), RedisPoolError> {
        let mut conn = self.pool.get().await?;
        redis::cmd("PING").query_async::<String>(&mut conn).await?;
        Ok(())
    }

    /// Replace the snapshot under `key` with a single `SET`, without expiry
    pub async fn set_snapshot(
        &self,
        key: &str,
        snapshot: &LeaderboardSnapshot,
    ) -> Result<(), RedisPoolError> {
        let encoded = serde_json::to_string(snapshot)?;
        let mut conn = self.pool.get().await?;
        conn.set::<_, _, ()>(key, encoded).await?;
        Ok(())
    }

    pub async fn get_snapshot(&self, key: &str) -> Result<Option<LeaderboardSnapshot>, RedisPoolError> {
        let mut conn = self.pool.get().await?;
        let encoded: Option<String> = conn.get(key).await?;
        Ok(encoded.as_deref().map(serde_json::from_str).transpose()?)
    }
}

/// Part of the URL after any credentials
fn redacted(url: &str) -> &str {
    url.rsplit_once('@').map_or(url, |(_, host)| host)
}
