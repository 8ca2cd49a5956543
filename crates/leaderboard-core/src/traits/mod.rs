//! Port traits - the interfaces the domain needs from infrastructure

mod ports;

pub use ports::{NameDirectory, RepoResult, SnapshotStore};
