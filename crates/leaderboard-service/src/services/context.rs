//! Service context - dependency container for services
//!
//! Holds the snapshot store, the upstream clients, and the clock shared by
//! one process.

use std::sync::Arc;

use leaderboard_common::AppConfig;
use leaderboard_core::SnapshotStore;

use super::error::{ServiceError, ServiceResult};
use crate::ens::NameResolver;
use crate::pacing::{Clock, SystemClock};
use crate::tally::TallyClient;

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    store: Arc<dyn SnapshotStore>,
    tally: Arc<TallyClient>,
    resolver: Arc<NameResolver>,
    clock: Arc<dyn Clock>,
}

impl ServiceContext {
    pub fn new(
        store: Arc<dyn SnapshotStore>,
        tally: TallyClient,
        resolver: NameResolver,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            tally: Arc::new(tally),
            resolver: Arc::new(resolver),
            clock,
        }
    }

    /// Wire the production clients from configuration around `store`
    pub fn from_config(config: &AppConfig, store: Arc<dyn SnapshotStore>) -> ServiceResult<Self> {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let tally = TallyClient::from_config(&config.tally, Arc::clone(&clock))?;
        let resolver = NameResolver::from_config(&config.ens, Arc::clone(&clock));

        Ok(Self::new(store, tally, resolver, clock))
    }

    /// Get the snapshot store
    pub fn store(&self) -> &dyn SnapshotStore {
        self.store.as_ref()
    }

    /// Get the Tally client
    pub fn tally(&self) -> &TallyClient {
        &self.tally
    }

    /// Get the name resolver
    pub fn resolver(&self) -> &NameResolver {
        &self.resolver
    }

    /// Get the shared clock
    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.clock)
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("tally", &self.tally)
            .field("resolver", &self.resolver)
            .finish_non_exhaustive()
    }
}

/// Builder for ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    store: Option<Arc<dyn SnapshotStore>>,
    tally: Option<TallyClient>,
    resolver: Option<NameResolver>,
    clock: Option<Arc<dyn Clock>>,
}

impl ServiceContextBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the snapshot store
    pub fn store(mut self, store: Arc<dyn SnapshotStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the Tally client
    pub fn tally(mut self, tally: TallyClient) -> Self {
        self.tally = Some(tally);
        self
    }

    /// Set the name resolver
    pub fn resolver(mut self, resolver: NameResolver) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Set the clock; defaults to the system clock
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Build the ServiceContext
    ///
    /// The resolver defaults to a disabled one.
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let store = self
            .store
            .ok_or_else(|| ServiceError::configuration("snapshot store is required"))?;
        let tally = self
            .tally
            .ok_or_else(|| ServiceError::configuration("Tally client is required"))?;
        let resolver = self
            .resolver
            .unwrap_or_else(|| NameResolver::disabled(Arc::clone(&clock)));

        Ok(ServiceContext::new(store, tally, resolver, clock))
    }
}
