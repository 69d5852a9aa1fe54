//! EIP-712 typed-data signing hash.
//!
//! The domain separator and struct hash are themselves Keccak-256 digests of
//! ABI struct encodings; callers produce them with the ABI encoder and this
//! module combines them under the fixed `0x19 0x01` prefix.

use sha3::Digest;

use eth_primitives::hash::with_keccak;
use eth_primitives::{Hash32, Signature};

use crate::error::SigningError;
use crate::signer::sign_hash;

/// Computes the typed-data signing hash:
/// `keccak256(0x19 ∥ 0x01 ∥ domainSeparator ∥ structHash)`.
pub fn typed_data_hash(domain_separator: &Hash32, struct_hash: &Hash32) -> Hash32 {
    with_keccak(|ctx| {
        Digest::update(ctx, [0x19, 0x01]);
        Digest::update(ctx, domain_separator.as_bytes());
        Digest::update(ctx, struct_hash.as_bytes());
        let digest = ctx.finalize_reset();
        let mut out = [0u8; 32];
        out.copy_from_slice(&digest);
        Hash32::new(out)
    })
}

/// Signs typed data given its precomputed domain separator and struct hash.
pub fn sign_typed_data(
    domain_separator: &Hash32,
    struct_hash: &Hash32,
    private_key: &[u8; 32],
) -> Result<Signature, SigningError> {
    sign_hash(&typed_data_hash(domain_separator, struct_hash), private_key)
}
