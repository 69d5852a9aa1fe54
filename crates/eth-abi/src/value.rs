//! The closed sum of contract ABI value variants.

use std::fmt;

use eth_primitives::Address;

use crate::error::EncodingError;
use crate::schema::{check_width, TypeSchema};

/// A typed contract ABI value.
///
/// Construction goes through the validated factory methods; every invariant
/// (integer width and range, fixed-bytes length, fixed-array arity, element
/// type agreement) is checked eagerly, so a constructed tree always encodes.
///
/// Integer magnitudes are stored as full 32-byte big-endian words: zero
/// extended for `Uint`, sign extended (two's complement) for `Int`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypedValue {
    Bool(bool),
    Uint { bits: usize, value: [u8; 32] },
    Int { bits: usize, value: [u8; 32] },
    Address(Address),
    FixedBytes(Vec<u8>),
    Bytes(Vec<u8>),
    String(String),
    FixedArray {
        elem: TypeSchema,
        size: usize,
        values: Vec<TypedValue>,
    },
    Array {
        elem: TypeSchema,
        values: Vec<TypedValue>,
    },
    Tuple(Vec<TypedValue>),
}

impl TypedValue {
    /// Constructs a `uintN` from a full 32-byte big-endian word.
    ///
    /// The word must be zero in every byte above the declared width.
    pub fn uint(bits: usize, value: [u8; 32]) -> Result<Self, EncodingError> {
        check_width("uint", bits)?;
        let prefix = 32 - bits / 8;
        if value[..prefix].iter().any(|&b| b != 0) {
            return Err(EncodingError::ValueOutOfRange {
                type_name: format!("uint{bits}"),
                detail: format!("0x{} exceeds the declared width", hex::encode(value)),
            });
        }
        Ok(Self::Uint { bits, value })
    }

    /// Constructs a `uintN` from a `u128`.
    pub fn uint_from(bits: usize, value: u128) -> Result<Self, EncodingError> {
        let mut word = [0u8; 32];
        word[16..].copy_from_slice(&value.to_be_bytes());
        Self::uint(bits, word)
    }

    /// Constructs an `intN` from a full 32-byte sign-extended two's-complement
    /// word.
    ///
    /// Every byte above the declared width must equal the sign extension of
    /// the value's top bit.
    pub fn int(bits: usize, value: [u8; 32]) -> Result<Self, EncodingError> {
        check_width("int", bits)?;
        let prefix = 32 - bits / 8;
        if prefix > 0 {
            let fill = if value[prefix] & 0x80 != 0 { 0xff } else { 0x00 };
            if value[..prefix].iter().any(|&b| b != fill) {
                return Err(EncodingError::ValueOutOfRange {
                    type_name: format!("int{bits}"),
                    detail: format!("0x{} is not sign-extended to 32 bytes", hex::encode(value)),
                });
            }
        }
        Ok(Self::Int { bits, value })
    }

    /// Constructs an `intN` from an `i128`, sign-extending to 32 bytes.
    pub fn int_from(bits: usize, value: i128) -> Result<Self, EncodingError> {
        let fill = if value < 0 { 0xff } else { 0x00 };
        let mut word = [fill; 32];
        word[16..].copy_from_slice(&value.to_be_bytes());
        // Reject magnitudes the declared width cannot represent.
        check_width("int", bits)?;
        if bits < 128 {
            let shift = 128 - bits as u32;
            if (value << shift) >> shift != value {
                return Err(EncodingError::ValueOutOfRange {
                    type_name: format!("int{bits}"),
                    detail: format!("{value} exceeds the declared width"),
                });
            }
        }
        Self::int(bits, word)
    }

    /// Constructs a `bytesN` value; the length fixes N and must be 1..=32.
    pub fn fixed_bytes(data: Vec<u8>) -> Result<Self, EncodingError> {
        if data.is_empty() || data.len() > 32 {
            return Err(EncodingError::InvalidFixedBytesLength { len: data.len() });
        }
        Ok(Self::FixedBytes(data))
    }

    /// Constructs a `T[size]` fixed array, checking arity and element types.
    pub fn fixed_array(
        elem: TypeSchema,
        size: usize,
        values: Vec<TypedValue>,
    ) -> Result<Self, EncodingError> {
        if values.len() != size {
            return Err(EncodingError::ArityMismatch {
                declared: size,
                actual: values.len(),
            });
        }
        check_elements(&elem, &values)?;
        Ok(Self::FixedArray { elem, size, values })
    }

    /// Constructs a `T[]` dynamic array, checking element types.
    pub fn array(elem: TypeSchema, values: Vec<TypedValue>) -> Result<Self, EncodingError> {
        check_elements(&elem, &values)?;
        Ok(Self::Array { elem, values })
    }

    /// The schema describing this value's type.
    pub fn schema(&self) -> TypeSchema {
        match self {
            Self::Bool(_) => TypeSchema::Bool,
            Self::Uint { bits, .. } => TypeSchema::Uint(*bits),
            Self::Int { bits, .. } => TypeSchema::Int(*bits),
            Self::Address(_) => TypeSchema::Address,
            Self::FixedBytes(data) => TypeSchema::FixedBytes(data.len()),
            Self::Bytes(_) => TypeSchema::Bytes,
            Self::String(_) => TypeSchema::String,
            Self::FixedArray { elem, size, .. } => {
                TypeSchema::FixedArray(Box::new(elem.clone()), *size)
            }
            Self::Array { elem, .. } => TypeSchema::Array(Box::new(elem.clone())),
            Self::Tuple(members) => {
                TypeSchema::Tuple(members.iter().map(TypedValue::schema).collect())
            }
        }
    }

    /// Whether this value uses offset-indirected placement when encoded.
    pub fn is_dynamic(&self) -> bool {
        self.schema().is_dynamic()
    }
}

fn check_elements(elem: &TypeSchema, values: &[TypedValue]) -> Result<(), EncodingError> {
    for (index, value) in values.iter().enumerate() {
        let actual = value.schema();
        if actual != *elem {
            return Err(EncodingError::ElementTypeMismatch {
                index,
                expected: elem.canonical_name(),
                actual: actual.canonical_name(),
            });
        }
    }
    Ok(())
}

/// Renders a big-endian 32-byte word as an unsigned decimal string.
fn unsigned_decimal(word: &[u8; 32]) -> String {
    let mut digits = Vec::new();
    let mut scratch = *word;
    loop {
        let mut rem = 0u32;
        let mut all_zero = true;
        for byte in scratch.iter_mut() {
            let cur = rem * 256 + u32::from(*byte);
            *byte = (cur / 10) as u8;
            rem = cur % 10;
            if *byte != 0 {
                all_zero = false;
            }
        }
        digits.push(b'0' + rem as u8);
        if all_zero {
            break;
        }
    }
    digits.reverse();
    String::from_utf8(digits).expect("decimal digits are ASCII")
}

/// Renders a sign-extended two's-complement word as a signed decimal string.
fn signed_decimal(word: &[u8; 32]) -> String {
    if word[0] & 0x80 == 0 {
        return unsigned_decimal(word);
    }
    // Negate: invert and add one, then print the magnitude.
    let mut magnitude = [0u8; 32];
    for (out, byte) in magnitude.iter_mut().zip(word.iter()) {
        *out = !byte;
    }
    for byte in magnitude.iter_mut().rev() {
        let (sum, overflow) = byte.overflowing_add(1);
        *byte = sum;
        if !overflow {
            break;
        }
    }
    format!("-{}", unsigned_decimal(&magnitude))
}

impl fmt::Display for TypedValue {
    /// Human-readable rendering used in classified revert reasons: decimal
    /// integers, checksummed addresses, 0x-hex bytes, quoted strings.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Uint { value, .. } => f.write_str(&unsigned_decimal(value)),
            Self::Int { value, .. } => f.write_str(&signed_decimal(value)),
            Self::Address(addr) => write!(f, "{addr}"),
            Self::FixedBytes(data) | Self::Bytes(data) => write!(f, "0x{}", hex::encode(data)),
            Self::String(s) => write!(f, "\"{s}\""),
            Self::FixedArray { values, .. } | Self::Array { values, .. } => {
                let parts: Vec<String> = values.iter().map(TypedValue::to_string).collect();
                write!(f, "[{}]", parts.join(", "))
            }
            Self::Tuple(members) => {
                let parts: Vec<String> = members.iter().map(TypedValue::to_string).collect();
                write!(f, "({})", parts.join(", "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uint_rejects_out_of_width_magnitude() {
        let mut word = [0u8; 32];
        word[30] = 1; // 256, needs 9 bits
        assert!(TypedValue::uint(8, word).is_err());
        assert!(TypedValue::uint(16, word).is_ok());
    }

    #[test]
    fn uint_rejects_bad_widths() {
        assert!(TypedValue::uint(12, [0u8; 32]).is_err());
        assert!(TypedValue::uint(0, [0u8; 32]).is_err());
        assert!(TypedValue::uint(512, [0u8; 32]).is_err());
    }

    #[test]
    fn uint_from_small_value() {
        let value = TypedValue::uint_from(8, 255).unwrap();
        assert_eq!(value.to_string(), "255");
        assert!(TypedValue::uint_from(8, 256).is_err());
    }

    #[test]
    fn int_requires_sign_extension() {
        // -1 as int8: all 32 bytes must be 0xff.
        assert!(TypedValue::int(8, [0xff; 32]).is_ok());

        // A word with 0xff low byte but zero prefix is not sign-extended.
        let mut word = [0u8; 32];
        word[31] = 0xff;
        assert!(TypedValue::int(8, word).is_err());
        // As int16 the same word is +255, correctly zero-prefixed.
        assert!(TypedValue::int(16, word).is_ok());
    }

    #[test]
    fn int_from_range_checks() {
        assert!(TypedValue::int_from(8, 127).is_ok());
        assert!(TypedValue::int_from(8, 128).is_err());
        assert!(TypedValue::int_from(8, -128).is_ok());
        assert!(TypedValue::int_from(8, -129).is_err());
    }

    #[test]
    fn fixed_bytes_length_bounds() {
        assert!(TypedValue::fixed_bytes(vec![]).is_err());
        assert!(TypedValue::fixed_bytes(vec![0u8; 33]).is_err());
        assert!(TypedValue::fixed_bytes(vec![0xde, 0xad]).is_ok());
    }

    #[test]
    fn fixed_array_arity_checked() {
        let elem = TypeSchema::Uint(256);
        let values = vec![TypedValue::uint_from(256, 1).unwrap()];
        assert!(matches!(
            TypedValue::fixed_array(elem.clone(), 2, values.clone()),
            Err(EncodingError::ArityMismatch { declared: 2, actual: 1 })
        ));
        assert!(TypedValue::fixed_array(elem, 1, values).is_ok());
    }

    #[test]
    fn array_element_types_checked() {
        let mixed = vec![
            TypedValue::uint_from(256, 1).unwrap(),
            TypedValue::Bool(true),
        ];
        let err = TypedValue::array(TypeSchema::Uint(256), mixed).unwrap_err();
        assert!(err.to_string().contains("expected type uint256, got bool"));
    }

    #[test]
    fn schema_round_trips_variants() {
        let value = TypedValue::Tuple(vec![
            TypedValue::uint_from(256, 7).unwrap(),
            TypedValue::String("x".into()),
        ]);
        assert_eq!(
            value.schema(),
            TypeSchema::Tuple(vec![TypeSchema::Uint(256), TypeSchema::String])
        );
        assert!(value.is_dynamic());
    }

    #[test]
    fn display_decimal_rendering() {
        assert_eq!(TypedValue::uint_from(256, 0).unwrap().to_string(), "0");
        assert_eq!(
            TypedValue::uint_from(256, 1_000_000_000_000_000_000).unwrap().to_string(),
            "1000000000000000000"
        );
        assert_eq!(TypedValue::int_from(256, -1).unwrap().to_string(), "-1");
        assert_eq!(TypedValue::int_from(256, -12345).unwrap().to_string(), "-12345");
    }

    #[test]
    fn display_max_uint256() {
        let max = TypedValue::uint(256, [0xff; 32]).unwrap();
        assert_eq!(
            max.to_string(),
            "115792089237316195423570985008687907853269984665640564039457584007913129639935"
        );
    }

    #[test]
    fn display_composites() {
        let value = TypedValue::Tuple(vec![
            TypedValue::String("hi".into()),
            TypedValue::array(
                TypeSchema::Uint(8),
                vec![
                    TypedValue::uint_from(8, 1).unwrap(),
                    TypedValue::uint_from(8, 2).unwrap(),
                ],
            )
            .unwrap(),
        ]);
        assert_eq!(value.to_string(), "(\"hi\", [1, 2])");
    }
}
