//! Time source and call pacing
//!
//! Every wait the pipeline performs (pacing pauses and retry backoff) goes
//! through a [`Clock`], so tests can run a full refresh without sleeping.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Source of time and suspension
#[async_trait]
pub trait Clock: Send + Sync {
    /// Suspend the current task for `duration`
    async fn sleep(&self, duration: Duration);

    /// Current wall-clock time
    fn now(&self) -> DateTime<Utc>;
}

/// Clock backed by the tokio timer
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Inserts a pause before every `every`-th call after the first.
///
/// With `every == 1` the pause precedes each call but the first; with
/// `every == 5` it precedes calls 5, 10, 15 (zero-based).
pub struct Pacer {
    clock: Arc<dyn Clock>,
    every: usize,
    pause: Duration,
    calls: usize,
}

impl Pacer {
    pub fn new(clock: Arc<dyn Clock>, every: usize, pause: Duration) -> Self {
        Self {
            clock,
            every,
            pause,
            calls: 0,
        }
    }

    /// Wait, if required, before the next call is made
    pub async fn ready(&mut self) {
        let index = self.calls;
        self.calls += 1;

        if index > 0 && self.every > 0 && index % self.every == 0 && !self.pause.is_zero() {
            tracing::debug!(
                call = index + 1,
                pause_ms = self.pause.as_millis() as u64,
                "Pacing before next upstream call"
            );
            self.clock.sleep(self.pause).await;
        }
    }

    /// Number of calls paced so far
    pub fn calls(&self) -> usize {
        self.calls
    }
}
