//! EIP-191 personal-message hashing and signing.

use sha3::Digest;

use eth_primitives::hash::with_keccak;
use eth_primitives::{Hash32, Signature};

use crate::error::SigningError;
use crate::signer::sign_hash;

/// Computes the `personal_sign` hash:
/// `keccak256("\x19Ethereum Signed Message:\n" + len(message) + message)`.
pub fn personal_message_hash(message: &[u8]) -> Hash32 {
    let prefix = format!("\x19Ethereum Signed Message:\n{}", message.len());
    with_keccak(|ctx| {
        Digest::update(ctx, prefix.as_bytes());
        Digest::update(ctx, message);
        let digest = ctx.finalize_reset();
        let mut out = [0u8; 32];
        out.copy_from_slice(&digest);
        Hash32::new(out)
    })
}

/// Signs an arbitrary message per EIP-191.
///
/// The returned signature carries `v` as 27 or 28, the convention expected
/// by `personal_sign` verifiers.
pub fn sign_message(message: &[u8], private_key: &[u8; 32]) -> Result<Signature, SigningError> {
    let signature = sign_hash(&personal_message_hash(message), private_key)?;
    Ok(Signature::new(
        *signature.r(),
        *signature.s(),
        signature.v() + 27,
    ))
}
