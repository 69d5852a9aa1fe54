//! Fluent construction of unsigned transactions with per-generation
//! completeness checks.

use eth_primitives::{Address, Hash32};

use crate::error::BuilderError;
use crate::transaction::{
    AccessListEntry, AccessListTransaction, BlobTransaction, FeeMarketTransaction,
    LegacyTransaction, UnsignedTransaction,
};

/// The transaction generation the builder targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TxKind {
    Legacy,
    AccessList,
    FeeMarket,
    Blob,
}

/// Accumulates transaction fields and checks generation-specific
/// completeness at [`TransactionBuilder::build`].
///
/// Nonce, value and calldata default to zero/empty; gas limit and the
/// pricing fields appropriate to the generation are required. The
/// recipient must be set explicitly, either to an address via
/// [`Self::to`] or to contract creation via [`Self::create`].
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    kind: TxKind,
    chain_id: u64,
    nonce: u64,
    gas_limit: Option<u64>,
    // Some(None) means explicit contract creation.
    to: Option<Option<Address>>,
    value: u128,
    data: Vec<u8>,
    gas_price: Option<u128>,
    max_fee_per_gas: Option<u128>,
    max_priority_fee_per_gas: Option<u128>,
    access_list: Vec<AccessListEntry>,
    max_fee_per_blob_gas: Option<u128>,
    blob_versioned_hashes: Vec<Hash32>,
}

impl TransactionBuilder {
    fn with_kind(kind: TxKind, chain_id: u64) -> Self {
        Self {
            kind,
            chain_id,
            nonce: 0,
            gas_limit: None,
            to: None,
            value: 0,
            data: Vec::new(),
            gas_price: None,
            max_fee_per_gas: None,
            max_priority_fee_per_gas: None,
            access_list: Vec::new(),
            max_fee_per_blob_gas: None,
            blob_versioned_hashes: Vec::new(),
        }
    }

    /// Starts a pre-EIP-2718 transaction.
    pub fn legacy(chain_id: u64) -> Self {
        Self::with_kind(TxKind::Legacy, chain_id)
    }

    /// Starts an EIP-2930 (type 1) transaction.
    pub fn access_list(chain_id: u64) -> Self {
        Self::with_kind(TxKind::AccessList, chain_id)
    }

    /// Starts an EIP-1559 (type 2) transaction.
    pub fn fee_market(chain_id: u64) -> Self {
        Self::with_kind(TxKind::FeeMarket, chain_id)
    }

    /// Starts an EIP-4844 (type 3) blob transaction.
    pub fn blob(chain_id: u64) -> Self {
        Self::with_kind(TxKind::Blob, chain_id)
    }

    pub fn nonce(mut self, nonce: u64) -> Self {
        self.nonce = nonce;
        self
    }

    pub fn gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = Some(gas_limit);
        self
    }

    /// Sets the recipient address.
    pub fn to(mut self, to: Address) -> Self {
        self.to = Some(Some(to));
        self
    }

    /// Marks the transaction as a contract creation (no recipient).
    pub fn create(mut self) -> Self {
        self.to = Some(None);
        self
    }

    pub fn value(mut self, value: u128) -> Self {
        self.value = value;
        self
    }

    pub fn data(mut self, data: Vec<u8>) -> Self {
        self.data = data;
        self
    }

    /// Legacy / type-1 gas price.
    pub fn gas_price(mut self, gas_price: u128) -> Self {
        self.gas_price = Some(gas_price);
        self
    }

    /// Type-2/3 fee ceiling.
    pub fn max_fee_per_gas(mut self, max_fee: u128) -> Self {
        self.max_fee_per_gas = Some(max_fee);
        self
    }

    /// Type-2/3 priority tip.
    pub fn max_priority_fee_per_gas(mut self, max_priority_fee: u128) -> Self {
        self.max_priority_fee_per_gas = Some(max_priority_fee);
        self
    }

    pub fn set_access_list(mut self, access_list: Vec<AccessListEntry>) -> Self {
        self.access_list = access_list;
        self
    }

    pub fn max_fee_per_blob_gas(mut self, max_fee: u128) -> Self {
        self.max_fee_per_blob_gas = Some(max_fee);
        self
    }

    pub fn blob_versioned_hashes(mut self, hashes: Vec<Hash32>) -> Self {
        self.blob_versioned_hashes = hashes;
        self
    }

    /// Validates completeness for the target generation and produces the
    /// unsigned transaction.
    pub fn build(self) -> Result<UnsignedTransaction, BuilderError> {
        let gas_limit = self.gas_limit.ok_or(BuilderError::MissingField("gas_limit"))?;
        let to = self.to.ok_or(BuilderError::MissingField("to"))?;

        match self.kind {
            TxKind::Legacy => {
                let gas_price = self
                    .gas_price
                    .ok_or(BuilderError::MissingField("gas_price"))?;
                // The EIP-155 fold chain_id*2 + 35 + parity must fit in v.
                if self.chain_id > (u64::MAX - 36) / 2 {
                    return Err(BuilderError::Other(format!(
                        "chain id {} cannot be folded into a legacy v",
                        self.chain_id
                    )));
                }
                Ok(UnsignedTransaction::Legacy(LegacyTransaction {
                    chain_id: self.chain_id,
                    nonce: self.nonce,
                    gas_price,
                    gas_limit,
                    to,
                    value: self.value,
                    data: self.data,
                }))
            }
            TxKind::AccessList => {
                let gas_price = self
                    .gas_price
                    .ok_or(BuilderError::MissingField("gas_price"))?;
                Ok(UnsignedTransaction::AccessList(AccessListTransaction {
                    chain_id: self.chain_id,
                    nonce: self.nonce,
                    gas_price,
                    gas_limit,
                    to,
                    value: self.value,
                    data: self.data,
                    access_list: self.access_list,
                }))
            }
            TxKind::FeeMarket => {
                let (max_fee, max_priority_fee) = self.fee_pair()?;
                Ok(UnsignedTransaction::FeeMarket(FeeMarketTransaction {
                    chain_id: self.chain_id,
                    nonce: self.nonce,
                    max_priority_fee_per_gas: max_priority_fee,
                    max_fee_per_gas: max_fee,
                    gas_limit,
                    to,
                    value: self.value,
                    data: self.data,
                    access_list: self.access_list,
                }))
            }
            TxKind::Blob => {
                let (max_fee, max_priority_fee) = self.fee_pair()?;
                let max_fee_per_blob_gas = self
                    .max_fee_per_blob_gas
                    .ok_or(BuilderError::MissingField("max_fee_per_blob_gas"))?;
                let to = to.ok_or_else(|| {
                    BuilderError::Other("blob transactions cannot create contracts".into())
                })?;
                if self.blob_versioned_hashes.is_empty() {
                    return Err(BuilderError::MissingField("blob_versioned_hashes"));
                }
                Ok(UnsignedTransaction::Blob(BlobTransaction {
                    chain_id: self.chain_id,
                    nonce: self.nonce,
                    max_priority_fee_per_gas: max_priority_fee,
                    max_fee_per_gas: max_fee,
                    gas_limit,
                    to,
                    value: self.value,
                    data: self.data,
                    access_list: self.access_list,
                    max_fee_per_blob_gas,
                    blob_versioned_hashes: self.blob_versioned_hashes,
                }))
            }
        }
    }

    fn fee_pair(&self) -> Result<(u128, u128), BuilderError> {
        let max_fee = self
            .max_fee_per_gas
            .ok_or(BuilderError::MissingField("max_fee_per_gas"))?;
        let max_priority_fee = self
            .max_priority_fee_per_gas
            .ok_or(BuilderError::MissingField("max_priority_fee_per_gas"))?;
        Ok((max_fee, max_priority_fee))
    }
}
