//! ENS registry and resolver calls through `eth_call`

use std::str::FromStr;
use std::sync::Arc;

use alloy_primitives::{hex, Address, B256};
use alloy_sol_types::{sol, SolCall};
use async_trait::async_trait;
use leaderboard_core::{DomainError, NameDirectory, RepoResult};
use serde_json::{json, Value};

use super::namehash::{namehash, reverse_node};
use crate::services::ServiceResult;
use crate::transport::JsonTransport;

sol! {
    interface IEnsRegistry {
        function resolver(bytes32 node) external view returns (address);
    }

    interface IEnsResolver {
        function name(bytes32 node) external view returns (string);
        function addr(bytes32 node) external view returns (address);
    }
}

/// Reverse lookups against the ENS registry on Ethereum mainnet.
///
/// A reverse name is only returned when the forward record of that name
/// points back at the same address.
#[derive(Clone)]
pub struct EnsRpcDirectory {
    transport: Arc<dyn JsonTransport>,
    registry: Address,
}

impl EnsRpcDirectory {
    pub fn new(transport: Arc<dyn JsonTransport>, registry: &str) -> ServiceResult<Self> {
        let registry = Address::from_str(registry)
            .map_err(|_| DomainError::InvalidAddress(registry.to_string()))?;
        Ok(Self {
            transport,
            registry,
        })
    }

    /// Run `call` against `to`; empty output (no code at `to`) reads as `None`
    async fn call<C: SolCall>(&self, to: Address, call: &C) -> RepoResult<Option<C::Return>> {
        let output = self.eth_call(to, &call.abi_encode()).await?;
        if output.is_empty() {
            return Ok(None);
        }

        C::abi_decode_returns(&output, true)
            .map(Some)
            .map_err(|e| DomainError::Lookup(format!("Invalid ABI output: {e}")))
    }

    async fn eth_call(&self, to: Address, data: &[u8]) -> RepoResult<Vec<u8>> {
        let request = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "eth_call",
            "params": [
                { "to": to.to_string(), "data": format!("0x{}", hex::encode(data)) },
                "latest"
            ]
        });

        let response = self
            .transport
            .post(&request)
            .await
            .map_err(|e| DomainError::Lookup(e.to_string()))?;

        if !response.is_success() {
            return Err(DomainError::Lookup(format!("RPC status {}", response.status)));
        }

        let body: Value = response
            .json()
            .map_err(|e| DomainError::Lookup(format!("Invalid RPC response: {e}")))?;

        if let Some(error) = body.get("error") {
            let message = error
                .get("message")
                .and_then(Value::as_str)
                .map_or_else(|| error.to_string(), str::to_string);
            return Err(DomainError::Lookup(format!("RPC error: {message}")));
        }

        let result = body
            .get("result")
            .and_then(Value::as_str)
            .ok_or_else(|| DomainError::Lookup("RPC response without result".to_string()))?;

        hex::decode(result).map_err(|e| DomainError::Lookup(format!("Invalid hex result: {e}")))
    }

    /// Resolver registered for `node`; the zero address reads as absent
    async fn resolver(&self, node: B256) -> RepoResult<Option<Address>> {
        let output = self
            .call(self.registry, &IEnsRegistry::resolverCall { node })
            .await?;
        Ok(output.map(|r| r._0).filter(|address| *address != Address::ZERO))
    }
}

#[async_trait]
impl NameDirectory for EnsRpcDirectory {
    async fn lookup_address(&self, address: &str) -> RepoResult<Option<String>> {
        let address = Address::from_str(address)
            .map_err(|_| DomainError::InvalidAddress(address.to_string()))?;

        let node = reverse_node(&address);
        let Some(reverse_resolver) = self.resolver(node).await? else {
            return Ok(None);
        };

        let name = self
            .call(reverse_resolver, &IEnsResolver::nameCall { node })
            .await?
            .map(|r| r._0)
            .unwrap_or_default();
        if name.is_empty() {
            return Ok(None);
        }

        let forward = namehash(&name);
        let Some(forward_resolver) = self.resolver(forward).await? else {
            return Ok(None);
        };

        let resolved = self
            .call(forward_resolver, &IEnsResolver::addrCall { node: forward })
            .await?
            .map(|r| r._0);
        Ok((resolved == Some(address)).then_some(name))
    }
}
