//! Transaction modeling, envelope encoding and signing for four protocol
//! generations: Legacy, EIP-2930 access-list, EIP-1559 fee-market and
//! EIP-4844 blob transactions.
//!
//! A transaction moves through three states: built (unsigned), hashed for
//! signing, and signed. The signed form is immutable and serializes to the
//! canonical envelope `typeByte ∥ rlp(fields)` (Legacy carries no type
//! byte and folds the chain id into `v` per EIP-155).

pub mod builder;
pub mod error;
mod rlp;
pub mod sign;
pub mod transaction;

pub use builder::TransactionBuilder;
pub use error::BuilderError;
pub use sign::sign_transaction;
pub use transaction::{
    AccessListEntry, AccessListTransaction, BlobTransaction, FeeMarketTransaction,
    LegacyTransaction, SignedTransaction, UnsignedTransaction,
};
