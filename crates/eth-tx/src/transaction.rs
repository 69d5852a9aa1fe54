//! The four-generation transaction model and its canonical envelopes.

use alloy_rlp::{Encodable, RlpEncodable};

use eth_primitives::{keccak256, Address, Hash32, Signature};

use crate::error::BuilderError;
use crate::rlp::{
    access_list_items, RlpAccessItem, RlpAddress, RlpBytes, RlpOptionalAddress, RlpU256,
};

/// One access-list entry: a contract address plus the storage keys the
/// transaction expects to touch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessListEntry {
    pub address: Address,
    pub storage_keys: Vec<Hash32>,
}

/// A pre-EIP-2718 transaction. Replay protection folds the chain id into
/// `v` per EIP-155.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyTransaction {
    pub chain_id: u64,
    pub nonce: u64,
    pub gas_price: u128,
    pub gas_limit: u64,
    /// Absent for contract creation.
    pub to: Option<Address>,
    /// Transfer value in wei.
    pub value: u128,
    /// Calldata (empty for simple transfers).
    pub data: Vec<u8>,
}

/// An EIP-2930 (type 1) transaction: legacy pricing plus an access list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessListTransaction {
    pub chain_id: u64,
    pub nonce: u64,
    pub gas_price: u128,
    pub gas_limit: u64,
    pub to: Option<Address>,
    pub value: u128,
    pub data: Vec<u8>,
    pub access_list: Vec<AccessListEntry>,
}

/// An EIP-1559 (type 2) fee-market transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeMarketTransaction {
    pub chain_id: u64,
    pub nonce: u64,
    pub max_priority_fee_per_gas: u128,
    pub max_fee_per_gas: u128,
    pub gas_limit: u64,
    pub to: Option<Address>,
    pub value: u128,
    pub data: Vec<u8>,
    pub access_list: Vec<AccessListEntry>,
}

/// An EIP-4844 (type 3) blob transaction.
///
/// Carries only the opaque versioned hashes; the commitment/proof set they
/// correspond to is produced and validated by an external KZG library.
/// Blob transactions cannot create contracts, so the recipient is required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobTransaction {
    pub chain_id: u64,
    pub nonce: u64,
    pub max_priority_fee_per_gas: u128,
    pub max_fee_per_gas: u128,
    pub gas_limit: u64,
    pub to: Address,
    pub value: u128,
    pub data: Vec<u8>,
    pub access_list: Vec<AccessListEntry>,
    pub max_fee_per_blob_gas: u128,
    pub blob_versioned_hashes: Vec<Hash32>,
}

/// An unsigned transaction of any supported generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnsignedTransaction {
    Legacy(LegacyTransaction),
    AccessList(AccessListTransaction),
    FeeMarket(FeeMarketTransaction),
    Blob(BlobTransaction),
}

impl UnsignedTransaction {
    /// The declared chain id.
    pub fn chain_id(&self) -> u64 {
        match self {
            Self::Legacy(tx) => tx.chain_id,
            Self::AccessList(tx) => tx.chain_id,
            Self::FeeMarket(tx) => tx.chain_id,
            Self::Blob(tx) => tx.chain_id,
        }
    }

    /// The EIP-2718 type byte; `None` for Legacy.
    pub fn tx_type(&self) -> Option<u8> {
        match self {
            Self::Legacy(_) => None,
            Self::AccessList(_) => Some(0x01),
            Self::FeeMarket(_) => Some(0x02),
            Self::Blob(_) => Some(0x03),
        }
    }

    /// The envelope bytes with signature fields absent: `typeByte ∥
    /// rlp(fields)`, Legacy appending `(chain_id, 0, 0)` per EIP-155.
    pub fn signing_payload(&self) -> Vec<u8> {
        match self {
            Self::Legacy(tx) => {
                let fields = LegacySigningFields {
                    nonce: tx.nonce,
                    gas_price: tx.gas_price,
                    gas_limit: tx.gas_limit,
                    to: RlpOptionalAddress(tx.to),
                    value: tx.value,
                    data: RlpBytes(tx.data.clone()),
                    chain_id: tx.chain_id,
                    zero_r: 0,
                    zero_s: 0,
                };
                let mut payload = Vec::with_capacity(fields.length());
                fields.encode(&mut payload);
                payload
            }
            Self::AccessList(tx) => typed_payload(0x01, &AccessListFields {
                chain_id: tx.chain_id,
                nonce: tx.nonce,
                gas_price: tx.gas_price,
                gas_limit: tx.gas_limit,
                to: RlpOptionalAddress(tx.to),
                value: tx.value,
                data: RlpBytes(tx.data.clone()),
                access_list: access_list_items(&tx.access_list),
            }),
            Self::FeeMarket(tx) => typed_payload(0x02, &FeeMarketFields {
                chain_id: tx.chain_id,
                nonce: tx.nonce,
                max_priority_fee_per_gas: tx.max_priority_fee_per_gas,
                max_fee_per_gas: tx.max_fee_per_gas,
                gas_limit: tx.gas_limit,
                to: RlpOptionalAddress(tx.to),
                value: tx.value,
                data: RlpBytes(tx.data.clone()),
                access_list: access_list_items(&tx.access_list),
            }),
            Self::Blob(tx) => typed_payload(0x03, &BlobFields {
                chain_id: tx.chain_id,
                nonce: tx.nonce,
                max_priority_fee_per_gas: tx.max_priority_fee_per_gas,
                max_fee_per_gas: tx.max_fee_per_gas,
                gas_limit: tx.gas_limit,
                to: RlpAddress(tx.to),
                value: tx.value,
                data: RlpBytes(tx.data.clone()),
                access_list: access_list_items(&tx.access_list),
                max_fee_per_blob_gas: tx.max_fee_per_blob_gas,
                blob_versioned_hashes: tx
                    .blob_versioned_hashes
                    .iter()
                    .copied()
                    .map(crate::rlp::RlpHash)
                    .collect(),
            }),
        }
    }

    /// Keccak-256 of the signing payload.
    pub fn signing_hash(&self) -> Hash32 {
        keccak256(&self.signing_payload())
    }
}

/// Folds a 0/1 recovery parity into the EIP-155 legacy `v`.
///
/// `None` when the chain id is too large for the fold to fit in a `u64`.
pub(crate) fn eip155_v(chain_id: u64, parity: u8) -> Option<u64> {
    chain_id
        .checked_mul(2)?
        .checked_add(35 + u64::from(parity))
}

/// A signed, immutable transaction ready for broadcast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    tx: UnsignedTransaction,
    signature: Signature,
}

impl SignedTransaction {
    /// Attaches a signature, validating that its `v` encoding is consistent
    /// with the transaction's generation and declared chain id.
    ///
    /// Legacy transactions require an EIP-155 folded `v` implying the
    /// declared chain id; typed transactions require a bare 0/1 parity.
    /// Anything else fails loudly, never clamps.
    pub fn new(tx: UnsignedTransaction, signature: Signature) -> Result<Self, BuilderError> {
        match &tx {
            UnsignedTransaction::Legacy(legacy) => {
                if signature.parity().is_none() {
                    return Err(BuilderError::InvalidRecoveryId(signature.v()));
                }
                let implied = signature.implied_chain_id();
                if implied != Some(legacy.chain_id) {
                    return Err(BuilderError::ChainMismatch {
                        declared: legacy.chain_id,
                        implied,
                    });
                }
            }
            _ => {
                if signature.v() > 1 {
                    return Err(BuilderError::InvalidRecoveryId(signature.v()));
                }
            }
        }
        Ok(Self { tx, signature })
    }

    /// Internal constructor for signatures this crate produced itself.
    pub(crate) fn from_parts(tx: UnsignedTransaction, signature: Signature) -> Self {
        Self { tx, signature }
    }

    pub fn transaction(&self) -> &UnsignedTransaction {
        &self.tx
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Serializes the canonical signed envelope.
    pub fn encode(&self) -> Vec<u8> {
        let sig = &self.signature;
        match &self.tx {
            UnsignedTransaction::Legacy(tx) => {
                let fields = LegacySignedFields {
                    nonce: tx.nonce,
                    gas_price: tx.gas_price,
                    gas_limit: tx.gas_limit,
                    to: RlpOptionalAddress(tx.to),
                    value: tx.value,
                    data: RlpBytes(tx.data.clone()),
                    v: sig.v(),
                    r: RlpU256(*sig.r()),
                    s: RlpU256(*sig.s()),
                };
                let mut out = Vec::with_capacity(fields.length());
                fields.encode(&mut out);
                out
            }
            UnsignedTransaction::AccessList(tx) => typed_payload(0x01, &AccessListSignedFields {
                chain_id: tx.chain_id,
                nonce: tx.nonce,
                gas_price: tx.gas_price,
                gas_limit: tx.gas_limit,
                to: RlpOptionalAddress(tx.to),
                value: tx.value,
                data: RlpBytes(tx.data.clone()),
                access_list: access_list_items(&tx.access_list),
                signature_y_parity: sig.v() as u8,
                signature_r: RlpU256(*sig.r()),
                signature_s: RlpU256(*sig.s()),
            }),
            UnsignedTransaction::FeeMarket(tx) => typed_payload(0x02, &FeeMarketSignedFields {
                chain_id: tx.chain_id,
                nonce: tx.nonce,
                max_priority_fee_per_gas: tx.max_priority_fee_per_gas,
                max_fee_per_gas: tx.max_fee_per_gas,
                gas_limit: tx.gas_limit,
                to: RlpOptionalAddress(tx.to),
                value: tx.value,
                data: RlpBytes(tx.data.clone()),
                access_list: access_list_items(&tx.access_list),
                signature_y_parity: sig.v() as u8,
                signature_r: RlpU256(*sig.r()),
                signature_s: RlpU256(*sig.s()),
            }),
            UnsignedTransaction::Blob(tx) => typed_payload(0x03, &BlobSignedFields {
                chain_id: tx.chain_id,
                nonce: tx.nonce,
                max_priority_fee_per_gas: tx.max_priority_fee_per_gas,
                max_fee_per_gas: tx.max_fee_per_gas,
                gas_limit: tx.gas_limit,
                to: RlpAddress(tx.to),
                value: tx.value,
                data: RlpBytes(tx.data.clone()),
                access_list: access_list_items(&tx.access_list),
                max_fee_per_blob_gas: tx.max_fee_per_blob_gas,
                blob_versioned_hashes: tx
                    .blob_versioned_hashes
                    .iter()
                    .copied()
                    .map(crate::rlp::RlpHash)
                    .collect(),
                signature_y_parity: sig.v() as u8,
                signature_r: RlpU256(*sig.r()),
                signature_s: RlpU256(*sig.s()),
            }),
        }
    }

    /// The transaction hash: Keccak-256 of the signed envelope.
    pub fn hash(&self) -> Hash32 {
        keccak256(&self.encode())
    }
}

/// `typeByte ∥ rlp(fields)`.
fn typed_payload<E: Encodable>(type_byte: u8, fields: &E) -> Vec<u8> {
    let mut out = Vec::with_capacity(1 + fields.length());
    out.push(type_byte);
    fields.encode(&mut out);
    out
}

// ---------------------------------------------------------------------------
// RLP field lists
// ---------------------------------------------------------------------------

/// Legacy signing fields with the EIP-155 `(chain_id, 0, 0)` suffix.
#[derive(RlpEncodable)]
struct LegacySigningFields {
    nonce: u64,
    gas_price: u128,
    gas_limit: u64,
    to: RlpOptionalAddress,
    value: u128,
    data: RlpBytes,
    chain_id: u64,
    zero_r: u8,
    zero_s: u8,
}

#[derive(RlpEncodable)]
struct LegacySignedFields {
    nonce: u64,
    gas_price: u128,
    gas_limit: u64,
    to: RlpOptionalAddress,
    value: u128,
    data: RlpBytes,
    v: u64,
    r: RlpU256,
    s: RlpU256,
}

#[derive(RlpEncodable)]
struct AccessListFields {
    chain_id: u64,
    nonce: u64,
    gas_price: u128,
    gas_limit: u64,
    to: RlpOptionalAddress,
    value: u128,
    data: RlpBytes,
    access_list: Vec<RlpAccessItem>,
}

#[derive(RlpEncodable)]
struct AccessListSignedFields {
    chain_id: u64,
    nonce: u64,
    gas_price: u128,
    gas_limit: u64,
    to: RlpOptionalAddress,
    value: u128,
    data: RlpBytes,
    access_list: Vec<RlpAccessItem>,
    signature_y_parity: u8,
    signature_r: RlpU256,
    signature_s: RlpU256,
}

#[derive(RlpEncodable)]
struct FeeMarketFields {
    chain_id: u64,
    nonce: u64,
    max_priority_fee_per_gas: u128,
    max_fee_per_gas: u128,
    gas_limit: u64,
    to: RlpOptionalAddress,
    value: u128,
    data: RlpBytes,
    access_list: Vec<RlpAccessItem>,
}

#[derive(RlpEncodable)]
struct FeeMarketSignedFields {
    chain_id: u64,
    nonce: u64,
    max_priority_fee_per_gas: u128,
    max_fee_per_gas: u128,
    gas_limit: u64,
    to: RlpOptionalAddress,
    value: u128,
    data: RlpBytes,
    access_list: Vec<RlpAccessItem>,
    signature_y_parity: u8,
    signature_r: RlpU256,
    signature_s: RlpU256,
}

#[derive(RlpEncodable)]
struct BlobFields {
    chain_id: u64,
    nonce: u64,
    max_priority_fee_per_gas: u128,
    max_fee_per_gas: u128,
    gas_limit: u64,
    to: RlpAddress,
    value: u128,
    data: RlpBytes,
    access_list: Vec<RlpAccessItem>,
    max_fee_per_blob_gas: u128,
    blob_versioned_hashes: Vec<crate::rlp::RlpHash>,
}

#[derive(RlpEncodable)]
struct BlobSignedFields {
    chain_id: u64,
    nonce: u64,
    max_priority_fee_per_gas: u128,
    max_fee_per_gas: u128,
    gas_limit: u64,
    to: RlpAddress,
    value: u128,
    data: RlpBytes,
    access_list: Vec<RlpAccessItem>,
    max_fee_per_blob_gas: u128,
    blob_versioned_hashes: Vec<crate::rlp::RlpHash>,
    signature_y_parity: u8,
    signature_r: RlpU256,
    signature_s: RlpU256,
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_ADDRESS: [u8; 20] = [0xde; 20];

    fn fee_market_tx() -> UnsignedTransaction {
        UnsignedTransaction::FeeMarket(FeeMarketTransaction {
            chain_id: 1,
            nonce: 0,
            max_priority_fee_per_gas: 1_000_000_000,
            max_fee_per_gas: 50_000_000_000,
            gas_limit: 21_000,
            to: Some(Address::new(TEST_ADDRESS)),
            value: 1_000_000_000_000_000_000,
            data: Vec::new(),
            access_list: Vec::new(),
        })
    }

    fn legacy_tx() -> UnsignedTransaction {
        UnsignedTransaction::Legacy(LegacyTransaction {
            chain_id: 1,
            nonce: 9,
            gas_price: 20_000_000_000,
            gas_limit: 21_000,
            to: Some(Address::new(TEST_ADDRESS)),
            value: 1_000,
            data: Vec::new(),
        })
    }

    #[test]
    fn type_bytes_per_generation() {
        assert_eq!(legacy_tx().tx_type(), None);
        let tx_2930 = UnsignedTransaction::AccessList(AccessListTransaction {
            chain_id: 1,
            nonce: 0,
            gas_price: 1,
            gas_limit: 21_000,
            to: Some(Address::new(TEST_ADDRESS)),
            value: 0,
            data: Vec::new(),
            access_list: Vec::new(),
        });
        assert_eq!(tx_2930.tx_type(), Some(0x01));
        assert_eq!(fee_market_tx().tx_type(), Some(0x02));
    }

    #[test]
    fn typed_signing_payload_starts_with_type_byte() {
        let payload = fee_market_tx().signing_payload();
        assert_eq!(payload[0], 0x02);
        assert!(payload.len() > 1);
    }

    #[test]
    fn legacy_signing_payload_is_a_bare_rlp_list() {
        let payload = legacy_tx().signing_payload();
        // No type byte: the first byte is an RLP list header.
        assert!(payload[0] >= 0xc0);
    }

    #[test]
    fn legacy_signing_payload_known_vector() {
        // The worked example from the EIP-155 appendix: nonce 9, 20 gwei gas
        // price, 21000 gas, to 0x3535...35, value 1 ether, chain id 1.
        let tx = UnsignedTransaction::Legacy(LegacyTransaction {
            chain_id: 1,
            nonce: 9,
            gas_price: 20_000_000_000,
            gas_limit: 21_000,
            to: Some(Address::new([0x35; 20])),
            value: 1_000_000_000_000_000_000,
            data: Vec::new(),
        });

        assert_eq!(
            hex::encode(tx.signing_payload()),
            "ec098504a817c800825208943535353535353535353535353535353535353535880de0b6b3a764000080018080"
        );
        assert_eq!(
            tx.signing_hash().to_string(),
            "0xdaf5a779ae972f972197303d7b574746c7ef83eadac0f2791ad23db92e4c8e53"
        );
    }

    #[test]
    fn calldata_is_a_byte_string_in_the_payload() {
        let UnsignedTransaction::Legacy(mut tx) = legacy_tx() else {
            unreachable!()
        };
        tx.data = vec![0xde, 0xad, 0xbe, 0xef];
        let payload = UnsignedTransaction::Legacy(tx).signing_payload();

        let hex = hex::encode(&payload);
        assert!(hex.contains("84deadbeef"), "payload {hex}");
        assert!(!hex.contains("c881de81ad81be81ef"), "payload {hex}");
    }

    #[test]
    fn legacy_signing_payload_embeds_chain_id_suffix() {
        // Same fields, different chain id: EIP-155 must change the payload.
        let mainnet = legacy_tx();
        let UnsignedTransaction::Legacy(mut other) = legacy_tx() else {
            unreachable!()
        };
        other.chain_id = 137;
        let other = UnsignedTransaction::Legacy(other);

        assert_ne!(mainnet.signing_payload(), other.signing_payload());
        assert_ne!(mainnet.signing_hash(), other.signing_hash());
    }

    #[test]
    fn signing_payload_is_deterministic() {
        assert_eq!(fee_market_tx().signing_payload(), fee_market_tx().signing_payload());
    }

    #[test]
    fn eip155_fold_for_mainnet() {
        assert_eq!(eip155_v(1, 0), Some(37));
        assert_eq!(eip155_v(1, 1), Some(38));
        assert_eq!(eip155_v(137, 0), Some(309));
    }

    #[test]
    fn eip155_fold_refuses_overflowing_chain_ids() {
        assert_eq!(eip155_v(u64::MAX, 0), None);
        assert_eq!(eip155_v(u64::MAX / 2, 1), None);
        // The largest chain id whose fold still fits.
        let max_foldable = (u64::MAX - 36) / 2;
        assert!(eip155_v(max_foldable, 1).is_some());
    }

    #[test]
    fn contract_creation_payload_differs_from_call() {
        let UnsignedTransaction::Legacy(mut creation) = legacy_tx() else {
            unreachable!()
        };
        creation.to = None;
        let creation = UnsignedTransaction::Legacy(creation);
        assert_ne!(creation.signing_payload(), legacy_tx().signing_payload());
    }

    #[test]
    fn signed_typed_tx_accepts_bare_parity() {
        let sig = Signature::new([0x11; 32], [0x22; 32], 1);
        let signed = SignedTransaction::new(fee_market_tx(), sig).unwrap();
        assert_eq!(signed.encode()[0], 0x02);
    }

    #[test]
    fn signed_typed_tx_rejects_folded_v() {
        let sig = Signature::new([0x11; 32], [0x22; 32], 37);
        assert_eq!(
            SignedTransaction::new(fee_market_tx(), sig).unwrap_err(),
            BuilderError::InvalidRecoveryId(37)
        );
    }

    #[test]
    fn signed_legacy_tx_requires_matching_chain_fold() {
        // v=37 implies chain id 1; fine for the mainnet tx.
        let sig = Signature::new([0x11; 32], [0x22; 32], 37);
        assert!(SignedTransaction::new(legacy_tx(), sig).is_ok());

        // v=309 implies chain id 137; refused.
        let wrong = Signature::new([0x11; 32], [0x22; 32], 309);
        assert_eq!(
            SignedTransaction::new(legacy_tx(), wrong).unwrap_err(),
            BuilderError::ChainMismatch {
                declared: 1,
                implied: Some(137),
            }
        );
    }

    #[test]
    fn signed_legacy_tx_rejects_bare_parity() {
        // Bare parity carries no chain fold, so legacy refuses it.
        let sig = Signature::new([0x11; 32], [0x22; 32], 0);
        assert_eq!(
            SignedTransaction::new(legacy_tx(), sig).unwrap_err(),
            BuilderError::ChainMismatch {
                declared: 1,
                implied: None,
            }
        );
    }

    #[test]
    fn signed_tx_rejects_out_of_range_recovery_id() {
        let sig = Signature::new([0x11; 32], [0x22; 32], 29);
        assert_eq!(
            SignedTransaction::new(legacy_tx(), sig).unwrap_err(),
            BuilderError::InvalidRecoveryId(29)
        );
    }

    #[test]
    fn signed_envelope_is_longer_than_unsigned_payload() {
        let sig = Signature::new([0x11; 32], [0x22; 32], 1);
        let signed = SignedTransaction::new(fee_market_tx(), sig).unwrap();
        assert!(signed.encode().len() > fee_market_tx().signing_payload().len());
    }

    #[test]
    fn blob_tx_envelope_carries_versioned_hashes() {
        let tx = UnsignedTransaction::Blob(BlobTransaction {
            chain_id: 1,
            nonce: 0,
            max_priority_fee_per_gas: 1,
            max_fee_per_gas: 2,
            gas_limit: 21_000,
            to: Address::new(TEST_ADDRESS),
            value: 0,
            data: Vec::new(),
            access_list: Vec::new(),
            max_fee_per_blob_gas: 3,
            blob_versioned_hashes: vec![Hash32::new([0x01; 32]), Hash32::new([0x02; 32])],
        });

        let payload = tx.signing_payload();
        assert_eq!(payload[0], 0x03);
        // Both 32-byte hashes appear in the payload.
        let ones: Vec<u8> = vec![0x01; 32];
        assert!(payload.windows(32).any(|w| w == ones.as_slice()));
    }

    #[test]
    fn tx_hash_covers_the_signature() {
        let sig_a = Signature::new([0x11; 32], [0x22; 32], 0);
        let sig_b = Signature::new([0x33; 32], [0x22; 32], 0);
        let a = SignedTransaction::new(fee_market_tx(), sig_a).unwrap();
        let b = SignedTransaction::new(fee_market_tx(), sig_b).unwrap();
        assert_ne!(a.hash(), b.hash());
    }
}
