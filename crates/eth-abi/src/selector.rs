//! Function selector and event topic hashing.
//!
//! Canonicalization is the type layer's contract: signatures are assembled
//! from [`TypeSchema`] canonical names (no whitespace, no parameter names,
//! `uint`/`int` already widened), and the hasher applies no normalization of
//! its own.

use eth_primitives::{keccak256, Hash32};

use crate::schema::TypeSchema;

/// Assembles the canonical signature string for a function or event:
/// `name(type1,type2,...)`.
pub fn function_signature(name: &str, params: &[TypeSchema]) -> String {
    let types: Vec<String> = params.iter().map(TypeSchema::canonical_name).collect();
    format!("{name}({})", types.join(","))
}

/// Hashes a canonical signature string to its 4-byte function selector.
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    let mut out = [0u8; 4];
    out.copy_from_slice(&hash.as_bytes()[..4]);
    out
}

/// Computes the 4-byte selector for a function name and parameter schemas.
pub fn function_selector(name: &str, params: &[TypeSchema]) -> [u8; 4] {
    selector(&function_signature(name, params))
}

/// Hashes a canonical event signature to its 32-byte topic.
pub fn event_topic(signature: &str) -> Hash32 {
    keccak256(signature.as_bytes())
}
