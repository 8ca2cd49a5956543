//! Best-effort name resolution for a finished leaderboard

use std::sync::Arc;
use std::time::Duration;

use leaderboard_common::EnsConfig;
use leaderboard_core::{NameDirectory, VoterData};
use tracing::{debug, info, warn};

use super::rpc::EnsRpcDirectory;
use crate::pacing::{Clock, Pacer};
use crate::services::{ServiceResult, SkippedItem};
use crate::transport::HttpTransport;

/// Attaches directory names to leaderboard rows.
///
/// Never fails: a missing credential or directory disables resolution, and
/// per-address errors are returned as skipped items.
#[derive(Clone)]
pub struct NameResolver {
    directory: Option<Arc<dyn NameDirectory>>,
    clock: Arc<dyn Clock>,
    batch_size: usize,
    pause: Duration,
}

impl NameResolver {
    pub fn new(
        directory: Option<Arc<dyn NameDirectory>>,
        clock: Arc<dyn Clock>,
        batch_size: usize,
        pause: Duration,
    ) -> Self {
        Self {
            directory,
            clock,
            batch_size,
            pause,
        }
    }

    /// Resolver that leaves every row untouched
    pub fn disabled(clock: Arc<dyn Clock>) -> Self {
        Self::new(None, clock, 1, Duration::ZERO)
    }

    /// Build the JSON-RPC backed resolver.
    ///
    /// Without an API key, or if the directory cannot be set up, resolution
    /// is disabled for the process.
    pub fn from_config(config: &EnsConfig, clock: Arc<dyn Clock>) -> Self {
        let Some(endpoint) = config.endpoint() else {
            info!("ALCHEMY_API_KEY not set, ENS resolution disabled");
            return Self::disabled(clock);
        };

        match build_directory(&endpoint, config) {
            Ok(directory) => Self::new(
                Some(Arc::new(directory)),
                clock,
                config.lookup_batch_size,
                config.lookup_pause(),
            ),
            Err(e) => {
                warn!(error = %e, "Failed to set up ENS directory, resolution disabled");
                Self::disabled(clock)
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.directory.is_some()
    }

    /// Look up a name for every row, one address at a time.
    ///
    /// Rows with a name found get `ens_name` set; all others keep their
    /// current value.
    pub async fn resolve(&self, voters: &mut [VoterData]) -> Vec<SkippedItem> {
        let Some(directory) = self.directory.as_ref() else {
            debug!("Name resolution disabled, skipping");
            return Vec::new();
        };

        let mut pacer = Pacer::new(Arc::clone(&self.clock), self.batch_size, self.pause);
        let mut skipped = Vec::new();
        let mut resolved = 0usize;

        for voter in voters.iter_mut() {
            pacer.ready().await;

            match directory.lookup_address(&voter.address).await {
                Ok(Some(name)) => {
                    debug!(address = %voter.address, name = %name, "Resolved name");
                    voter.ens_name = Some(name);
                    resolved += 1;
                }
                Ok(None) => {}
                Err(e) => {
                    debug!(address = %voter.address, error = %e, "Name lookup failed");
                    skipped.push(SkippedItem::name_resolution(&voter.address, e.to_string()));
                }
            }
        }

        info!(
            resolved,
            total = voters.len(),
            failed = skipped.len(),
            "Name resolution finished"
        );
        skipped
    }
}

fn build_directory(endpoint: &str, config: &EnsConfig) -> ServiceResult<EnsRpcDirectory> {
    let transport = HttpTransport::json_rpc(endpoint, Duration::from_secs(10))?;
    EnsRpcDirectory::new(Arc::new(transport), &config.registry_address)
}

impl std::fmt::Debug for NameResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NameResolver")
            .field("enabled", &self.is_enabled())
            .field("batch_size", &self.batch_size)
            .field("pause", &self.pause)
            .finish()
    }
}
