//! Keccak-256 hashing and the 32-byte hash value type.
//!
//! Hashing goes through a thread-confined pool of reusable `Keccak256`
//! contexts so hot encode/sign paths do not re-allocate hasher state per
//! call. A context is always reset before it returns to the pool, so no
//! input can leak between unrelated callers.

use std::cell::RefCell;
use std::fmt;

use serde::{Serialize, Serializer};
use sha3::{Digest, Keccak256};

use crate::error::PrimitiveError;
use crate::hex::{decode_hex_fixed, encode_hex};

thread_local! {
    static KECCAK_POOL: RefCell<Vec<Keccak256>> = const { RefCell::new(Vec::new()) };
}

/// Runs `f` with a pooled Keccak-256 context.
///
/// The context is taken from (or added to) the current thread's free list
/// and reset before being returned, so `f` always observes a fresh state.
/// If `f` panics the context is dropped instead of being recycled.
pub fn with_keccak<R>(f: impl FnOnce(&mut Keccak256) -> R) -> R {
    let mut ctx = KECCAK_POOL
        .with(|pool| pool.borrow_mut().pop())
        .unwrap_or_default();

    let out = f(&mut ctx);

    Digest::reset(&mut ctx);
    KECCAK_POOL.with(|pool| pool.borrow_mut().push(ctx));
    out
}

/// Computes the Keccak-256 hash of `data`.
pub fn keccak256(data: &[u8]) -> Hash32 {
    with_keccak(|ctx| {
        Digest::update(ctx, data);
        let digest = ctx.finalize_reset();
        let mut out = [0u8; 32];
        out.copy_from_slice(&digest);
        Hash32::new(out)
    })
}

/// A validated 32-byte value: transaction hash, signing hash, storage key,
/// event topic or blob versioned hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Hash32([u8; 32]);

impl Hash32 {
    /// Wraps a raw 32-byte array.
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Parses a 0x-prefixed hex string of exactly 64 hex characters.
    pub fn from_hex(input: &str) -> Result<Self, PrimitiveError> {
        decode_hex_fixed(input, "hash").map(Self)
    }

    /// Returns the raw 32 bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Consumes the hash, returning the raw array.
    pub const fn into_bytes(self) -> [u8; 32] {
        self.0
    }
}

impl From<[u8; 32]> for Hash32 {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Hash32 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Hash32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode_hex(&self.0))
    }
}

impl Serialize for Hash32 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&encode_hex(&self.0))
    }
}
