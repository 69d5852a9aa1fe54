//! Validated binary value types and hashing primitives for the EVM toolkit.
//!
//! This crate provides:
//! - Hex string parsing/rendering with 0x-prefix handling
//! - Fixed-length value types: 20-byte [`Address`], 32-byte [`Hash32`]
//! - The variable-length [`Bytes`] blob
//! - The [`Signature`] value type with recovery-id normalization
//! - Keccak-256 hashing backed by a pooled, thread-confined context

pub mod address;
pub mod bytes;
pub mod error;
pub mod hash;
pub mod hex;
pub mod signature;

pub use address::Address;
pub use bytes::Bytes;
pub use error::PrimitiveError;
pub use hash::{keccak256, Hash32};
pub use signature::Signature;
