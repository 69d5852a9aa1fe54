//! Signing glue: hash the unsigned envelope, sign it, and fold the
//! recovery parity into the generation's `v` convention.

use eth_primitives::Signature;
use eth_signer::SigningError;

use crate::transaction::{eip155_v, SignedTransaction, UnsignedTransaction};

/// Signs a transaction with the given private key.
///
/// The recovery parity comes back from the signer as 0/1. Legacy
/// transactions fold it with the chain id per EIP-155; typed transactions
/// carry it bare as `signature_y_parity`.
pub fn sign_transaction(
    tx: &UnsignedTransaction,
    private_key: &[u8; 32],
) -> Result<SignedTransaction, SigningError> {
    let hash = tx.signing_hash();
    let signature = eth_signer::sign_hash(&hash, private_key)?;

    let v = match tx {
        UnsignedTransaction::Legacy(legacy) => {
            // sign_hash yields v in {0, 1}, so the cast is exact.
            eip155_v(legacy.chain_id, signature.v() as u8).ok_or_else(|| {
                SigningError::SignatureFailed(format!(
                    "chain id {} overflows the legacy v encoding",
                    legacy.chain_id
                ))
            })?
        }
        _ => signature.v(),
    };
    let signature = Signature::new(*signature.r(), *signature.s(), v);

    Ok(SignedTransaction::from_parts(tx.clone(), signature))
}
