//! Contract ABI encoding, decoding and interpretation for EVM calls.
//!
//! This crate provides:
//! - The closed [`TypedValue`] sum over all contract ABI value variants
//! - The decode-side [`TypeSchema`] descriptor tree
//! - Head/tail calldata encoding ([`encode`]) and decoding ([`decode`])
//! - Function selector and event topic hashing from canonical signatures
//! - Classification of revert data returned by failed contract executions

pub mod decode;
pub mod encode;
pub mod error;
pub mod revert;
pub mod schema;
pub mod selector;
pub mod value;

pub use decode::decode;
pub use encode::{encode, encode_function_call};
pub use error::{DecodingError, EncodingError};
pub use revert::{classify_revert, CustomErrorRegistry, RevertDecision, RevertKind};
pub use schema::TypeSchema;
pub use selector::{event_topic, function_selector, function_signature, selector};
pub use value::TypedValue;
