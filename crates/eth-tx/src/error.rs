use thiserror::Error;

/// Transaction construction and signature-attachment failures.
///
/// The enumeration is closed over the known failure kinds; [`Self::Other`]
/// carries anything unclassified without widening the type.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuilderError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("signature implies chain id {implied:?}, transaction declares {declared}")]
    ChainMismatch { declared: u64, implied: Option<u64> },

    #[error("recovery id {0} is outside the supported range")]
    InvalidRecoveryId(u64),

    #[error("{0}")]
    Other(String),
}
