//! The ECDSA signature value type.

use serde::Serialize;

use crate::hex::encode_hex;

/// An secp256k1 ECDSA signature: two 32-byte scalars plus a recovery
/// indicator `v`.
///
/// `v` may be a bare parity bit (0/1, typed transactions), the pre-EIP-155
/// form (27/28), or an EIP-155 folded value (`chainId*2 + 35 + parity`).
/// [`Signature::parity`] normalizes all three; anything else is refused
/// rather than clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Signature {
    r: [u8; 32],
    s: [u8; 32],
    v: u64,
}

impl Signature {
    /// Assembles a signature from its raw parts.
    pub const fn new(r: [u8; 32], s: [u8; 32], v: u64) -> Self {
        Self { r, s, v }
    }

    /// The `r` scalar, big-endian.
    pub const fn r(&self) -> &[u8; 32] {
        &self.r
    }

    /// The `s` scalar, big-endian.
    pub const fn s(&self) -> &[u8; 32] {
        &self.s
    }

    /// The raw recovery indicator as supplied.
    pub const fn v(&self) -> u64 {
        self.v
    }

    /// Normalizes `v` to a 0/1 recovery parity.
    ///
    /// Returns `None` for values outside {0, 1}, {27, 28} and the EIP-155
    /// folded range (>= 35).
    pub const fn parity(&self) -> Option<u8> {
        match self.v {
            0 | 1 => Some(self.v as u8),
            27 | 28 => Some((self.v - 27) as u8),
            v if v >= 35 => Some(((v - 35) % 2) as u8),
            _ => None,
        }
    }

    /// Extracts the chain id implied by an EIP-155 folded `v`, if any.
    pub const fn implied_chain_id(&self) -> Option<u64> {
        match self.v {
            v if v >= 35 => Some((v - 35) / 2),
            _ => None,
        }
    }

    /// Serializes to the 65-byte `r || s || v` wire form used by
    /// `personal_sign` and friends. `v` must fit in one byte.
    pub fn to_rsv_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(65);
        out.extend_from_slice(&self.r);
        out.extend_from_slice(&self.s);
        out.push(self.v as u8);
        out
    }

    /// Renders the 65-byte form as a 0x-prefixed hex string.
    pub fn to_hex(&self) -> String {
        encode_hex(&self.to_rsv_bytes())
    }
}
