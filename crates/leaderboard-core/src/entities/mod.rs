//! Domain entities

mod proposal;
mod snapshot;
mod vote;
mod voter;

pub use proposal::Proposal;
pub use snapshot::{LeaderboardSnapshot, CSV_HEADER, LEADERBOARD_CACHE_KEY};
pub use vote::Vote;
pub use voter::{VoterData, VoterRecord};
