//! Hex string conversion with 0x-prefix handling.

use crate::error::PrimitiveError;

/// Decodes a hex string into bytes. A leading `0x`/`0X` prefix is optional.
pub fn decode_hex(input: &str) -> Result<Vec<u8>, PrimitiveError> {
    let stripped = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input);

    hex::decode(stripped).map_err(|source| PrimitiveError::InvalidHex {
        context: "hex string",
        source,
    })
}

/// Decodes a hex string into a fixed-size byte array.
///
/// Fails with [`PrimitiveError::InvalidLength`] if the decoded byte count
/// does not match `N`.
pub fn decode_hex_fixed<const N: usize>(
    input: &str,
    context: &'static str,
) -> Result<[u8; N], PrimitiveError> {
    let bytes = decode_hex(input)?;
    if bytes.len() != N {
        return Err(PrimitiveError::InvalidLength {
            context,
            expected: N,
            actual: bytes.len(),
        });
    }

    let mut out = [0u8; N];
    out.copy_from_slice(&bytes);
    Ok(out)
}

/// Encodes bytes as a lowercase 0x-prefixed hex string.
pub fn encode_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}
