//! # leaderboard-service
//!
//! Application layer: the retrying Tally client, ENS name resolution, the
//! full-refresh pipeline, and the DTOs returned by the HTTP layer.

pub mod dto;
pub mod ens;
pub mod pacing;
pub mod services;
pub mod tally;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use dto::{HealthResponse, LeaderboardResponse, ReadinessResponse, RefreshResponse};
pub use ens::{namehash, EnsRpcDirectory, NameResolver};
pub use pacing::{Clock, Pacer, SystemClock};
pub use services::{
    LeaderboardRead, LeaderboardService, RefreshReport, RefreshStage, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, SkippedItem,
};
pub use tally::{RetryPolicy, RetryingClient, TallyClient};
pub use transport::{HttpTransport, JsonTransport, UpstreamResponse};
