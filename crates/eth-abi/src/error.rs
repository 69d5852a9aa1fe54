use thiserror::Error;

/// Errors from constructing or encoding an invalid typed-value tree.
///
/// These are always caller bugs: a validated [`crate::TypedValue`] cannot
/// fail to encode.
#[derive(Debug, Error)]
pub enum EncodingError {
    #[error("invalid {kind} width {bits}: must be a multiple of 8 in 8..=256")]
    InvalidWidth { kind: &'static str, bits: usize },

    #[error("value does not fit {type_name}: {detail}")]
    ValueOutOfRange { type_name: String, detail: String },

    #[error("fixed bytes length {len} outside 1..=32")]
    InvalidFixedBytesLength { len: usize },

    #[error("fixed array declared {declared} elements, got {actual}")]
    ArityMismatch { declared: usize, actual: usize },

    #[error("element {index}: expected type {expected}, got {actual}")]
    ElementTypeMismatch {
        index: usize,
        expected: String,
        actual: String,
    },
}

/// Errors from decoding malformed or truncated response data.
///
/// Unlike [`EncodingError`], these are never caller bugs: they indicate the
/// remote byte sequence did not match the expected schema.
#[derive(Debug, Error)]
pub enum DecodingError {
    #[error("truncated data: needed {needed} bytes at offset {offset}, only {available} available")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("offset {offset} out of range for a {len}-byte buffer")]
    OffsetOutOfRange { offset: u64, len: usize },
}
