//! ECDSA signing over secp256k1 for Ethereum hashes.
//!
//! This crate provides:
//! - Deterministic (RFC 6979) prehash signing with a directly-derived
//!   recovery id
//! - Signer-address recovery from a hash and signature
//! - EIP-191 personal-message hashing and signing
//! - The EIP-712 typed-data signing hash

pub mod eip191;
pub mod eip712;
pub mod error;
pub mod signer;

pub use eip191::{personal_message_hash, sign_message};
pub use eip712::{sign_typed_data, typed_data_hash};
pub use error::SigningError;
pub use signer::{recover_address, sign_hash, signer_address};
