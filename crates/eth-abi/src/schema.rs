//! Decode-side type descriptors mirroring the encoder's type grammar.

use std::fmt;

use crate::error::EncodingError;

/// A contract ABI type descriptor without a value.
///
/// Supplied by callers to [`crate::decode`] to parse raw response bytes, and
/// used to assemble canonical signatures for selector hashing. The grammar
/// mirrors [`crate::TypedValue`] exactly, including nested arrays and tuples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeSchema {
    Bool,
    /// Unsigned integer of the given bit width (multiple of 8, 8..=256).
    Uint(usize),
    /// Two's-complement signed integer of the given bit width.
    Int(usize),
    Address,
    /// `bytesN` with N in 1..=32.
    FixedBytes(usize),
    /// Dynamic `bytes`.
    Bytes,
    /// Dynamic UTF-8 `string`.
    String,
    /// `T[N]` with a declared element count.
    FixedArray(Box<TypeSchema>, usize),
    /// Dynamic `T[]`.
    Array(Box<TypeSchema>),
    /// `(T1,T2,...)`.
    Tuple(Vec<TypeSchema>),
}

impl TypeSchema {
    /// Validated `uintN` constructor.
    pub fn uint(bits: usize) -> Result<Self, EncodingError> {
        check_width("uint", bits)?;
        Ok(Self::Uint(bits))
    }

    /// Validated `intN` constructor.
    pub fn int(bits: usize) -> Result<Self, EncodingError> {
        check_width("int", bits)?;
        Ok(Self::Int(bits))
    }

    /// Validated `bytesN` constructor.
    pub fn fixed_bytes(len: usize) -> Result<Self, EncodingError> {
        if len == 0 || len > 32 {
            return Err(EncodingError::InvalidFixedBytesLength { len });
        }
        Ok(Self::FixedBytes(len))
    }

    /// Whether values of this type use offset-indirected (tail) placement.
    ///
    /// Computed recursively: a fixed array or tuple is dynamic as soon as any
    /// member is.
    pub fn is_dynamic(&self) -> bool {
        match self {
            Self::Bool | Self::Uint(_) | Self::Int(_) | Self::Address | Self::FixedBytes(_) => {
                false
            }
            Self::Bytes | Self::String | Self::Array(_) => true,
            Self::FixedArray(elem, _) => elem.is_dynamic(),
            Self::Tuple(members) => members.iter().any(TypeSchema::is_dynamic),
        }
    }

    /// The inline byte footprint of a static value of this type, or `None`
    /// for dynamic types.
    ///
    /// Scalars occupy one 32-byte word; static fixed arrays and all-static
    /// tuples inline their members.
    pub fn static_size(&self) -> Option<usize> {
        match self {
            Self::Bool | Self::Uint(_) | Self::Int(_) | Self::Address | Self::FixedBytes(_) => {
                Some(32)
            }
            Self::Bytes | Self::String | Self::Array(_) => None,
            Self::FixedArray(elem, count) => elem.static_size().map(|size| size * count),
            Self::Tuple(members) => {
                let mut total = 0;
                for member in members {
                    total += member.static_size()?;
                }
                Some(total)
            }
        }
    }

    /// The head contribution of one value of this type inside an encoded
    /// sequence: the full static footprint, or one 32-byte offset word for
    /// dynamic types.
    pub fn head_size(&self) -> usize {
        self.static_size().unwrap_or(32)
    }

    /// The canonical type name used in function and event signatures:
    /// `uint256`, `bytes32`, `address[3]`, `(uint256,address)[]`.
    pub fn canonical_name(&self) -> String {
        match self {
            Self::Bool => "bool".to_string(),
            Self::Uint(bits) => format!("uint{bits}"),
            Self::Int(bits) => format!("int{bits}"),
            Self::Address => "address".to_string(),
            Self::FixedBytes(len) => format!("bytes{len}"),
            Self::Bytes => "bytes".to_string(),
            Self::String => "string".to_string(),
            Self::FixedArray(elem, count) => format!("{}[{count}]", elem.canonical_name()),
            Self::Array(elem) => format!("{}[]", elem.canonical_name()),
            Self::Tuple(members) => {
                let names: Vec<String> =
                    members.iter().map(TypeSchema::canonical_name).collect();
                format!("({})", names.join(","))
            }
        }
    }
}

impl fmt::Display for TypeSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical_name())
    }
}

pub(crate) fn check_width(kind: &'static str, bits: usize) -> Result<(), EncodingError> {
    if bits == 0 || bits > 256 || bits % 8 != 0 {
        return Err(EncodingError::InvalidWidth { kind, bits });
    }
    Ok(())
}
