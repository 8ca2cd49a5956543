//! Business logic services
//!
//! The refresh pipeline, its dependency container, and the service error.

pub mod context;
pub mod error;
pub mod leaderboard;
pub mod report;

pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use leaderboard::{LeaderboardRead, LeaderboardService};
pub use report::{RefreshReport, RefreshStage, SkippedItem};
