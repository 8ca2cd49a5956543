//! ENS reverse name resolution over Ethereum JSON-RPC

mod namehash;
mod resolver;
mod rpc;

pub use namehash::{namehash, reverse_name, reverse_node};
pub use resolver::NameResolver;
pub use rpc::EnsRpcDirectory;
