//! Tally GraphQL API access

mod client;
pub mod queries;
mod retry;

pub use client::TallyClient;
pub use retry::{RetryPolicy, RetryingClient};
