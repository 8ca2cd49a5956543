//! ENS name hashing (EIP-137)

use alloy_primitives::{hex, keccak256, Address, B256};

/// Recursive label hash of a dot-separated name; the empty name is zero.
///
/// Names are hashed as given; callers pass already-normalized (lowercase)
/// names.
pub fn namehash(name: &str) -> B256 {
    let mut node = B256::ZERO;
    if name.is_empty() {
        return node;
    }

    for label in name.rsplit('.') {
        let mut buf = [0u8; 64];
        buf[..32].copy_from_slice(node.as_slice());
        buf[32..].copy_from_slice(keccak256(label.as_bytes()).as_slice());
        node = keccak256(buf);
    }
    node
}

/// `<lowercase hex address>.addr.reverse`
pub fn reverse_name(address: &Address) -> String {
    format!("{}.addr.reverse", hex::encode(address.as_slice()))
}

/// Node of the reverse record for `address`
pub fn reverse_node(address: &Address) -> B256 {
    namehash(&reverse_name(address))
}
