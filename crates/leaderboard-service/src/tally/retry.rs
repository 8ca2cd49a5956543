//! Rate-limit-aware retry around a [`JsonTransport`]

use std::sync::Arc;
use std::time::Duration;

use leaderboard_common::TallyConfig;
use serde_json::Value;
use tracing::warn;

use crate::pacing::Clock;
use crate::services::{ServiceError, ServiceResult};
use crate::transport::{JsonTransport, UpstreamResponse};

/// Attempt budget and backoff durations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, shared by rate-limit and transport retries
    pub max_retries: u32,
    /// Wait after a 429 on attempt `n` is `rate_limit_backoff * 2^n`
    pub rate_limit_backoff: Duration,
    pub transport_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            rate_limit_backoff: Duration::from_millis(3000),
            transport_backoff: Duration::from_millis(2000),
        }
    }
}

impl From<&TallyConfig> for RetryPolicy {
    fn from(config: &TallyConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            rate_limit_backoff: config.rate_limit_backoff(),
            transport_backoff: config.transport_backoff(),
        }
    }
}

impl RetryPolicy {
    /// Wait after a rate-limited zero-based `attempt`
    pub fn rate_limit_wait(&self, attempt: u32) -> Duration {
        self.rate_limit_backoff
            .saturating_mul(2u32.saturating_pow(attempt))
    }
}

/// Sends requests with the retry policy applied.
///
/// A 429 always backs off, after the final attempt too. A transport failure
/// backs off unless it happened on the final attempt, in which case it is
/// returned. Every other response, 4xx and 5xx included, is returned as-is.
#[derive(Clone)]
pub struct RetryingClient {
    transport: Arc<dyn JsonTransport>,
    clock: Arc<dyn Clock>,
    policy: RetryPolicy,
}

impl RetryingClient {
    pub fn new(transport: Arc<dyn JsonTransport>, clock: Arc<dyn Clock>, policy: RetryPolicy) -> Self {
        Self {
            transport,
            clock,
            policy,
        }
    }

    pub async fn send(&self, body: &Value) -> ServiceResult<UpstreamResponse> {
        let max_retries = self.policy.max_retries;

        for attempt in 0..max_retries {
            match self.transport.post(body).await {
                Ok(response) if response.is_rate_limited() => {
                    let wait = self.policy.rate_limit_wait(attempt);
                    warn!(
                        attempt = attempt + 1,
                        max_retries,
                        wait_ms = wait.as_millis() as u64,
                        "Rate limited by upstream, backing off"
                    );
                    self.clock.sleep(wait).await;
                }
                Ok(response) => return Ok(response),
                Err(err) if attempt + 1 >= max_retries => return Err(err),
                Err(err) => {
                    warn!(
                        attempt = attempt + 1,
                        max_retries,
                        wait_ms = self.policy.transport_backoff.as_millis() as u64,
                        error = %err,
                        "Upstream request failed, retrying"
                    );
                    self.clock.sleep(self.policy.transport_backoff).await;
                }
            }
        }

        Err(ServiceError::MaxRetriesExceeded {
            attempts: max_retries,
        })
    }
}
