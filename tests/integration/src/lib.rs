//! Integration test utilities for the leaderboard server
//!
//! This crate provides helpers for running end-to-end tests against the
//! REST API with a scripted Tally GraphQL endpoint standing in for the
//! real one.

pub mod fake_tally;
pub mod helpers;

pub use fake_tally::*;
pub use helpers::*;
