//! The 20-byte Ethereum address value type.

use std::fmt;

use k256::elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint};
use k256::{EncodedPoint, PublicKey};
use serde::{Serialize, Serializer};

use crate::error::PrimitiveError;
use crate::hash::keccak256;

/// A validated 20-byte Ethereum address.
///
/// Parsing accepts 0x-prefixed hex; mixed-case input is verified against its
/// EIP-55 checksum. Display renders the checksummed form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Address([u8; 20]);

impl Address {
    /// Wraps a raw 20-byte array.
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Parses a 0x-prefixed hex address string.
    ///
    /// All-lowercase and all-uppercase inputs skip checksum verification;
    /// mixed-case inputs must carry a valid EIP-55 checksum.
    pub fn from_hex(input: &str) -> Result<Self, PrimitiveError> {
        let hex_part = input
            .strip_prefix("0x")
            .or_else(|| input.strip_prefix("0X"))
            .ok_or(PrimitiveError::InvalidLength {
                context: "address (missing 0x prefix)",
                expected: 20,
                actual: 0,
            })?;

        if hex_part.len() != 40 {
            return Err(PrimitiveError::InvalidLength {
                context: "address",
                expected: 20,
                actual: hex_part.len() / 2,
            });
        }

        let bytes = hex::decode(hex_part).map_err(|source| PrimitiveError::InvalidHex {
            context: "address",
            source,
        })?;

        let mut addr = [0u8; 20];
        addr.copy_from_slice(&bytes);
        let address = Self(addr);

        // Mixed case carries an EIP-55 checksum that must verify.
        let is_all_lower = hex_part.chars().all(|c| !c.is_ascii_uppercase());
        let is_all_upper = hex_part.chars().all(|c| !c.is_ascii_lowercase());
        if !is_all_lower && !is_all_upper && address.to_checksum() != input {
            return Err(PrimitiveError::ChecksumMismatch(input.to_string()));
        }

        Ok(address)
    }

    /// Derives the address of an uncompressed secp256k1 public key (65 bytes,
    /// 0x04 prefix): the last 20 bytes of the Keccak-256 of the key body.
    pub fn from_uncompressed_pubkey(pubkey: &[u8; 65]) -> Result<Self, PrimitiveError> {
        if pubkey[0] != 0x04 {
            return Err(PrimitiveError::InvalidPublicKey(
                "uncompressed key must start with 0x04".into(),
            ));
        }

        let hash = keccak256(&pubkey[1..]);
        let mut addr = [0u8; 20];
        addr.copy_from_slice(&hash.as_bytes()[12..]);
        Ok(Self(addr))
    }

    /// Derives the address of a compressed secp256k1 public key (33 bytes),
    /// decompressing it via k256 first.
    pub fn from_compressed_pubkey(pubkey: &[u8; 33]) -> Result<Self, PrimitiveError> {
        let encoded = EncodedPoint::from_bytes(pubkey).map_err(|e| {
            PrimitiveError::InvalidPublicKey(format!("invalid compressed key encoding: {e}"))
        })?;

        let pubkey: Option<PublicKey> = PublicKey::from_encoded_point(&encoded).into();
        let pubkey = pubkey.ok_or_else(|| {
            PrimitiveError::InvalidPublicKey("point is not on the secp256k1 curve".into())
        })?;

        let uncompressed = pubkey.to_encoded_point(false);
        let mut key_65 = [0u8; 65];
        key_65.copy_from_slice(uncompressed.as_bytes());

        Self::from_uncompressed_pubkey(&key_65)
    }

    /// Returns the raw 20 bytes.
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Consumes the address, returning the raw array.
    pub const fn into_bytes(self) -> [u8; 20] {
        self.0
    }

    /// Renders the EIP-55 mixed-case checksummed form.
    ///
    /// Hex letters are uppercased where the corresponding nibble of the
    /// Keccak-256 of the lowercase hex address is >= 8.
    pub fn to_checksum(&self) -> String {
        let lower = hex::encode(self.0);
        let hash = keccak256(lower.as_bytes());
        let hash_hex = hex::encode(hash.as_bytes());

        let mut out = String::with_capacity(42);
        out.push_str("0x");
        for (i, c) in lower.chars().enumerate() {
            if c.is_ascii_digit() {
                out.push(c);
            } else {
                let nibble = u8::from_str_radix(&hash_hex[i..i + 1], 16).unwrap_or(0);
                if nibble >= 8 {
                    out.push(c.to_ascii_uppercase());
                } else {
                    out.push(c);
                }
            }
        }
        out
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_checksum())
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_checksum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eip55_checksum_known_addresses() {
        // Test vectors from EIP-55.
        let cases = [
            "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
            "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359",
            "0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB",
            "0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb",
        ];

        for expected in &cases {
            let lower = format!("0x{}", expected[2..].to_lowercase());
            let addr = Address::from_hex(&lower).unwrap();
            assert_eq!(&addr.to_checksum(), expected, "checksum mismatch for {expected}");
        }
    }

    #[test]
    fn parse_all_lowercase() {
        let addr = Address::from_hex("0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed").unwrap();
        assert_eq!(addr.to_checksum(), "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed");
    }

    #[test]
    fn parse_all_uppercase() {
        assert!(Address::from_hex("0x5AAEB6053F3E94C9B9A09F33669435E7EF1BEAED").is_ok());
    }

    #[test]
    fn parse_valid_checksum() {
        assert!(Address::from_hex("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed").is_ok());
    }

    #[test]
    fn parse_bad_checksum_errors() {
        // Wrong case on one letter breaks the checksum.
        let result = Address::from_hex("0x5AAEB6053F3E94C9b9A09f33669435E7Ef1BeAed");
        assert!(matches!(result, Err(PrimitiveError::ChecksumMismatch(_))));
    }

    #[test]
    fn parse_short_errors() {
        assert!(Address::from_hex("0x5aAeb6053F").is_err());
    }

    #[test]
    fn parse_no_prefix_errors() {
        assert!(Address::from_hex("5aaeb6053f3e94c9b9a09f33669435e7ef1beaed").is_err());
    }

    #[test]
    fn parse_non_hex_errors() {
        assert!(Address::from_hex("0xggggb6053f3e94c9b9a09f33669435e7ef1beaed").is_err());
    }

    #[test]
    fn pubkey_to_address_known_vector() {
        // Private key 0x...0001 maps to a well-known address.
        use k256::SecretKey;

        let mut privkey = [0u8; 32];
        privkey[31] = 1;

        let secret = SecretKey::from_bytes((&privkey).into()).expect("valid private key");
        let pubkey = secret.public_key();
        let uncompressed = pubkey.to_encoded_point(false);

        let mut key_65 = [0u8; 65];
        key_65.copy_from_slice(uncompressed.as_bytes());

        let address = Address::from_uncompressed_pubkey(&key_65).unwrap();
        assert_eq!(address.to_checksum(), "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf");
    }

    #[test]
    fn compressed_pubkey_to_address() {
        use k256::SecretKey;

        let mut privkey = [0u8; 32];
        privkey[31] = 1;

        let secret = SecretKey::from_bytes((&privkey).into()).expect("valid private key");
        let compressed = secret.public_key().to_encoded_point(true);

        let mut key_33 = [0u8; 33];
        key_33.copy_from_slice(compressed.as_bytes());

        let address = Address::from_compressed_pubkey(&key_33).unwrap();
        assert_eq!(address.to_checksum(), "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf");
    }

    #[test]
    fn invalid_uncompressed_prefix_errors() {
        let mut key = [0u8; 65];
        key[0] = 0x03; // wrong prefix
        assert!(Address::from_uncompressed_pubkey(&key).is_err());
    }

    #[test]
    fn display_is_checksummed() {
        let addr = Address::from_hex("0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed").unwrap();
        assert_eq!(addr.to_string(), "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed");
    }

    #[test]
    fn serializes_as_checksummed_string() {
        let addr = Address::from_hex("0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed").unwrap();
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, "\"0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed\"");
    }
}
