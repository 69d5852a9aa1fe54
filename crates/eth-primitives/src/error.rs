use thiserror::Error;

/// Errors from parsing or constructing primitive binary values.
#[derive(Debug, Error)]
pub enum PrimitiveError {
    #[error("invalid hex in {context}: {source}")]
    InvalidHex {
        context: &'static str,
        #[source]
        source: hex::FromHexError,
    },

    #[error("{context}: expected {expected} bytes, got {actual}")]
    InvalidLength {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("address checksum mismatch: {0}")]
    ChecksumMismatch(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),
}
