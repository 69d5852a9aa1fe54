//! Deterministic ECDSA signing and signer-address recovery.

use k256::ecdsa::signature::hazmat::PrehashSigner;
use k256::ecdsa::{RecoveryId, Signature as EcdsaSignature, SigningKey, VerifyingKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use zeroize::Zeroize;

use eth_primitives::{Address, Hash32, Signature};

use crate::error::SigningError;

/// Signs a 32-byte hash with a secp256k1 private scalar.
///
/// The nonce is deterministic (RFC 6979), so signing the same hash with the
/// same key always yields byte-identical output. The recovery id is taken
/// directly from the signing operation rather than a separate recovery pass;
/// the returned signature carries it as a bare 0/1 parity in `v`.
pub fn sign_hash(hash: &Hash32, private_key: &[u8; 32]) -> Result<Signature, SigningError> {
    // Key copy is wiped as soon as the signing key exists.
    let mut key_bytes = *private_key;
    let signing_key = SigningKey::from_bytes((&key_bytes).into())
        .map_err(|e| SigningError::InvalidPrivateScalar(e.to_string()))?;
    key_bytes.zeroize();

    let (signature, recovery_id): (EcdsaSignature, RecoveryId) = signing_key
        .sign_prehash(hash.as_bytes())
        .map_err(|e| SigningError::SignatureFailed(e.to_string()))?;

    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    r.copy_from_slice(&signature.r().to_bytes());
    s.copy_from_slice(&signature.s().to_bytes());

    Ok(Signature::new(r, s, u64::from(recovery_id.is_y_odd() as u8)))
}

/// Recovers the 20-byte signer address from a hash and signature.
///
/// The public key is recomputed for the signature's recovery id and hashed
/// per the standard address-derivation rule. Fails with
/// [`SigningError::RecoveryFailed`] when the recovery id is unsupported or
/// no curve point matches.
pub fn recover_address(hash: &Hash32, signature: &Signature) -> Result<Address, SigningError> {
    let parity = signature.parity().ok_or_else(|| {
        SigningError::RecoveryFailed(format!("unsupported recovery id {}", signature.v()))
    })?;
    let recovery_id = RecoveryId::from_byte(parity)
        .ok_or_else(|| SigningError::RecoveryFailed(format!("invalid parity {parity}")))?;

    let ecdsa = EcdsaSignature::from_scalars(*signature.r(), *signature.s())
        .map_err(|e| SigningError::RecoveryFailed(format!("invalid scalars: {e}")))?;

    let verifying_key = VerifyingKey::recover_from_prehash(hash.as_bytes(), &ecdsa, recovery_id)
        .map_err(|e| SigningError::RecoveryFailed(e.to_string()))?;

    address_of(&verifying_key)
}

/// Derives the address controlled by a private scalar.
pub fn signer_address(private_key: &[u8; 32]) -> Result<Address, SigningError> {
    let mut key_bytes = *private_key;
    let signing_key = SigningKey::from_bytes((&key_bytes).into())
        .map_err(|e| SigningError::InvalidPrivateScalar(e.to_string()))?;
    key_bytes.zeroize();

    address_of(signing_key.verifying_key())
}

fn address_of(key: &VerifyingKey) -> Result<Address, SigningError> {
    let uncompressed = key.to_encoded_point(false);
    let mut key_65 = [0u8; 65];
    key_65.copy_from_slice(uncompressed.as_bytes());

    Address::from_uncompressed_pubkey(&key_65)
        .map_err(|e| SigningError::RecoveryFailed(e.to_string()))
}
