//! Head/tail calldata encoding.
//!
//! Encoding is two-pass: a size pass computes the exact buffer length (head
//! words plus every dynamic value's tail content), then the write pass emits
//! head entries in declaration order followed by tail content in the same
//! order. Offset words are absolute from the start of the enclosing encoded
//! sequence.

use crate::error::EncodingError;
use crate::value::TypedValue;

/// Encodes an ordered sequence of typed values into contract calldata layout.
///
/// A validated [`TypedValue`] tree always encodes; the fallible signature
/// leaves room for callers that construct values through other paths.
pub fn encode(values: &[TypedValue]) -> Result<Vec<u8>, EncodingError> {
    let mut out = Vec::with_capacity(sequence_size(values));
    write_sequence(values, &mut out);
    Ok(out)
}

/// Encodes a function call: 4-byte selector followed by the encoded
/// arguments.
pub fn encode_function_call(
    selector: [u8; 4],
    args: &[TypedValue],
) -> Result<Vec<u8>, EncodingError> {
    let mut out = Vec::with_capacity(4 + sequence_size(args));
    out.extend_from_slice(&selector);
    write_sequence(args, &mut out);
    Ok(out)
}

/// Total encoded size of a value sequence: heads plus dynamic tails.
fn sequence_size(values: &[TypedValue]) -> usize {
    let heads: usize = values.iter().map(|v| v.schema().head_size()).sum();
    let tails: usize = values
        .iter()
        .filter(|v| v.is_dynamic())
        .map(content_size)
        .sum();
    heads + tails
}

/// Tail content size of a dynamic value (also the inline size of a static
/// composite's members when called on one).
fn content_size(value: &TypedValue) -> usize {
    match value {
        TypedValue::Bytes(data) => 32 + padded_len(data.len()),
        TypedValue::String(s) => 32 + padded_len(s.len()),
        TypedValue::Array { values, .. } => 32 + sequence_size(values),
        TypedValue::FixedArray { values, .. } | TypedValue::Tuple(values) => {
            sequence_size(values)
        }
        // Static scalars have no tail.
        _ => 0,
    }
}

fn padded_len(len: usize) -> usize {
    len.div_ceil(32) * 32
}

/// Writes the head/tail encoding of a sequence into `out`.
fn write_sequence(values: &[TypedValue], out: &mut Vec<u8>) {
    let head_len: usize = values.iter().map(|v| v.schema().head_size()).sum();

    // Size pass: tail offsets are known before any byte is written.
    let mut tail_offset = head_len;
    let mut offsets = Vec::new();
    for value in values {
        if value.is_dynamic() {
            offsets.push(tail_offset);
            tail_offset += content_size(value);
        }
    }

    // Write pass: heads in declaration order.
    let mut next_offset = offsets.into_iter();
    for value in values {
        if value.is_dynamic() {
            write_usize_word(next_offset.next().expect("offset per dynamic value"), out);
        } else {
            write_static(value, out);
        }
    }

    // Tail content in declaration order.
    for value in values.iter().filter(|v| v.is_dynamic()) {
        write_content(value, out);
    }
}

/// Writes a static value in place: one word for scalars, inlined members for
/// static composites.
fn write_static(value: &TypedValue, out: &mut Vec<u8>) {
    match value {
        TypedValue::Bool(b) => {
            let mut word = [0u8; 32];
            word[31] = u8::from(*b);
            out.extend_from_slice(&word);
        }
        // Uint is zero-extended and Int sign-extended at construction, so
        // the stored word is already the encoded form.
        TypedValue::Uint { value, .. } | TypedValue::Int { value, .. } => {
            out.extend_from_slice(value);
        }
        TypedValue::Address(addr) => {
            let mut word = [0u8; 32];
            word[12..].copy_from_slice(addr.as_bytes());
            out.extend_from_slice(&word);
        }
        TypedValue::FixedBytes(data) => {
            let mut word = [0u8; 32];
            word[..data.len()].copy_from_slice(data);
            out.extend_from_slice(&word);
        }
        TypedValue::FixedArray { values, .. } | TypedValue::Tuple(values) => {
            write_sequence(values, out);
        }
        TypedValue::Bytes(_) | TypedValue::String(_) | TypedValue::Array { .. } => {
            unreachable!("dynamic values are written through write_content")
        }
    }
}

/// Writes the tail content of a dynamic value.
fn write_content(value: &TypedValue, out: &mut Vec<u8>) {
    match value {
        TypedValue::Bytes(data) => write_padded_bytes(data, out),
        TypedValue::String(s) => write_padded_bytes(s.as_bytes(), out),
        TypedValue::Array { values, .. } => {
            write_usize_word(values.len(), out);
            write_sequence(values, out);
        }
        TypedValue::FixedArray { values, .. } | TypedValue::Tuple(values) => {
            write_sequence(values, out);
        }
        _ => unreachable!("static values have no tail content"),
    }
}

/// Length word followed by right-zero-padded data.
fn write_padded_bytes(data: &[u8], out: &mut Vec<u8>) {
    write_usize_word(data.len(), out);
    out.extend_from_slice(data);
    let pad = padded_len(data.len()) - data.len();
    out.extend_from_slice(&[0u8; 32][..pad]);
}

fn write_usize_word(value: usize, out: &mut Vec<u8>) {
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&(value as u64).to_be_bytes());
    out.extend_from_slice(&word);
}
