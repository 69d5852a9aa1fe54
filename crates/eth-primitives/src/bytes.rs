//! Variable-length byte blob with hex parsing and rendering.

use std::fmt;
use std::ops::Deref;

use serde::{Serialize, Serializer};

use crate::error::PrimitiveError;
use crate::hex::{decode_hex, encode_hex};

/// A variable-length byte sequence (calldata, revert data, RLP payloads).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Bytes(Vec<u8>);

impl Bytes {
    /// Wraps raw bytes.
    pub const fn new(data: Vec<u8>) -> Self {
        Self(data)
    }

    /// Parses a 0x-prefixed hex string.
    pub fn from_hex(input: &str) -> Result<Self, PrimitiveError> {
        decode_hex(input).map(Self)
    }

    /// Returns the inner byte slice.
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Consumes the blob, returning the inner vector.
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }

    /// Returns the byte length.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the blob is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Deref for Bytes {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for Bytes {
    fn from(data: Vec<u8>) -> Self {
        Self(data)
    }
}

impl From<&[u8]> for Bytes {
    fn from(data: &[u8]) -> Self {
        Self(data.to_vec())
    }
}

impl fmt::Display for Bytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode_hex(&self.0))
    }
}

impl Serialize for Bytes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&encode_hex(&self.0))
    }
}
