//! Schema-driven decoding of head/tail calldata layout.
//!
//! The decoder mirrors the encoder exactly: offsets are absolute from the
//! start of the enclosing sequence, length-prefixed content reads exactly
//! the declared byte count, and padding bytes beyond the logical length are
//! discarded, never validated.

use eth_primitives::Address;

use crate::error::DecodingError;
use crate::schema::TypeSchema;
use crate::value::TypedValue;

/// Decodes a byte sequence against an ordered schema list.
pub fn decode(data: &[u8], schemas: &[TypeSchema]) -> Result<Vec<TypedValue>, DecodingError> {
    decode_sequence(data, schemas)
}

fn decode_sequence(
    region: &[u8],
    schemas: &[TypeSchema],
) -> Result<Vec<TypedValue>, DecodingError> {
    let mut values = Vec::with_capacity(schemas.len());
    let mut cursor = 0usize;

    for schema in schemas {
        if schema.is_dynamic() {
            let offset = read_offset(region, cursor)?;
            values.push(decode_content(&region[offset..], schema)?);
            cursor += 32;
        } else {
            let size = schema
                .static_size()
                .expect("static schema has a static size");
            let slice = take(region, cursor, size)?;
            values.push(decode_static(slice, schema)?);
            cursor += size;
        }
    }

    Ok(values)
}

/// Decodes a static value from its exact inline footprint.
fn decode_static(slice: &[u8], schema: &TypeSchema) -> Result<TypedValue, DecodingError> {
    Ok(match schema {
        TypeSchema::Bool => TypedValue::Bool(slice[31] != 0),
        TypeSchema::Uint(bits) => {
            // High bytes beyond the declared width are masked, not validated.
            let mut word = [0u8; 32];
            let n = bits / 8;
            word[32 - n..].copy_from_slice(&slice[32 - n..32]);
            TypedValue::Uint { bits: *bits, value: word }
        }
        TypeSchema::Int(bits) => {
            let n = bits / 8;
            let fill = if slice[32 - n] & 0x80 != 0 { 0xff } else { 0x00 };
            let mut word = [fill; 32];
            word[32 - n..].copy_from_slice(&slice[32 - n..32]);
            TypedValue::Int { bits: *bits, value: word }
        }
        TypeSchema::Address => {
            let mut raw = [0u8; 20];
            raw.copy_from_slice(&slice[12..32]);
            TypedValue::Address(Address::new(raw))
        }
        TypeSchema::FixedBytes(len) => TypedValue::FixedBytes(slice[..*len].to_vec()),
        TypeSchema::FixedArray(elem, count) => {
            check_element_count(slice, elem, *count)?;
            let values = decode_sequence(slice, &vec![(**elem).clone(); *count])?;
            TypedValue::FixedArray {
                elem: (**elem).clone(),
                size: *count,
                values,
            }
        }
        TypeSchema::Tuple(members) => TypedValue::Tuple(decode_sequence(slice, members)?),
        TypeSchema::Bytes | TypeSchema::String | TypeSchema::Array(_) => {
            unreachable!("dynamic schemas are decoded through decode_content")
        }
    })
}

/// Decodes the tail content of a dynamic value. `region` starts at the
/// value's own offset.
fn decode_content(region: &[u8], schema: &TypeSchema) -> Result<TypedValue, DecodingError> {
    Ok(match schema {
        TypeSchema::Bytes => TypedValue::Bytes(read_length_prefixed(region)?.to_vec()),
        TypeSchema::String => {
            let data = read_length_prefixed(region)?;
            TypedValue::String(String::from_utf8_lossy(data).into_owned())
        }
        TypeSchema::Array(elem) => {
            let len = read_usize_word(region, 0)?;
            check_element_count(&region[32..], elem, len)?;
            let values = decode_sequence(&region[32..], &vec![(**elem).clone(); len])?;
            TypedValue::Array {
                elem: (**elem).clone(),
                values,
            }
        }
        TypeSchema::FixedArray(elem, count) => {
            check_element_count(region, elem, *count)?;
            let values = decode_sequence(region, &vec![(**elem).clone(); *count])?;
            TypedValue::FixedArray {
                elem: (**elem).clone(),
                size: *count,
                values,
            }
        }
        TypeSchema::Tuple(members) => TypedValue::Tuple(decode_sequence(region, members)?),
        _ => unreachable!("static schemas are decoded through decode_static"),
    })
}

/// Rejects element counts whose head region cannot fit in the buffer.
///
/// A hostile length word must fail here, before any per-element allocation
/// happens; every element owes at least its head footprint to the region.
fn check_element_count(
    region: &[u8],
    elem: &TypeSchema,
    count: usize,
) -> Result<(), DecodingError> {
    let head = elem.head_size();
    match count.checked_mul(head) {
        Some(needed) if needed <= region.len() => Ok(()),
        _ => Err(DecodingError::Truncated {
            offset: 0,
            needed: count.saturating_mul(head),
            available: region.len(),
        }),
    }
}

/// Reads a length word then exactly that many content bytes.
fn read_length_prefixed(region: &[u8]) -> Result<&[u8], DecodingError> {
    let len = read_usize_word(region, 0)?;
    take(region, 32, len)
}

/// Reads a 32-byte big-endian word at `at` as a `usize`, rejecting values
/// that cannot index the buffer.
fn read_usize_word(region: &[u8], at: usize) -> Result<usize, DecodingError> {
    let word = take(region, at, 32)?;
    if word[..24].iter().any(|&b| b != 0) {
        return Err(DecodingError::OffsetOutOfRange {
            offset: u64::MAX,
            len: region.len(),
        });
    }
    let mut raw = [0u8; 8];
    raw.copy_from_slice(&word[24..]);
    Ok(u64::from_be_bytes(raw) as usize)
}

/// Reads an offset word and checks it lands inside the region.
fn read_offset(region: &[u8], at: usize) -> Result<usize, DecodingError> {
    let offset = read_usize_word(region, at)?;
    if offset > region.len() {
        return Err(DecodingError::OffsetOutOfRange {
            offset: offset as u64,
            len: region.len(),
        });
    }
    Ok(offset)
}

fn take(region: &[u8], at: usize, len: usize) -> Result<&[u8], DecodingError> {
    region
        .get(at..)
        .and_then(|rest| rest.get(..len))
        .ok_or(DecodingError::Truncated {
            offset: at,
            needed: len,
            available: region.len().saturating_sub(at),
        })
}
