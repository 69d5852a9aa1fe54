//! `Encodable` wrappers for the field types RLP has no native form for.

use alloy_rlp::{Encodable, RlpEncodable};
use eth_primitives::{Address, Hash32};

use crate::transaction::AccessListEntry;

/// A 20-byte address encoded as a 20-byte string.
#[derive(Debug, Clone)]
pub(crate) struct RlpAddress(pub Address);

impl Encodable for RlpAddress {
    fn encode(&self, out: &mut dyn alloy_rlp::BufMut) {
        self.0.as_bytes().as_slice().encode(out);
    }

    fn length(&self) -> usize {
        self.0.as_bytes().as_slice().length()
    }
}

/// An optional recipient: absent (contract creation) encodes as the empty
/// string.
#[derive(Debug, Clone)]
pub(crate) struct RlpOptionalAddress(pub Option<Address>);

impl Encodable for RlpOptionalAddress {
    fn encode(&self, out: &mut dyn alloy_rlp::BufMut) {
        match &self.0 {
            Some(address) => address.as_bytes().as_slice().encode(out),
            None => {
                let empty: &[u8] = &[];
                empty.encode(out);
            }
        }
    }

    fn length(&self) -> usize {
        match &self.0 {
            Some(address) => address.as_bytes().as_slice().length(),
            None => 1,
        }
    }
}

/// Calldata encoded as an RLP byte string.
///
/// The derive-friendly `Vec<u8>` would go through the generic `Vec<T>` impl
/// and come out as a list of per-byte integers, so the field is wrapped to
/// reach the `[u8]` string encoding instead.
#[derive(Debug, Clone)]
pub(crate) struct RlpBytes(pub Vec<u8>);

impl Encodable for RlpBytes {
    fn encode(&self, out: &mut dyn alloy_rlp::BufMut) {
        self.0.as_slice().encode(out);
    }

    fn length(&self) -> usize {
        self.0.as_slice().length()
    }
}

/// A 256-bit integer encoded as minimal big-endian bytes with leading zeros
/// stripped (standard RLP integer encoding).
#[derive(Debug, Clone)]
pub(crate) struct RlpU256(pub [u8; 32]);

impl Encodable for RlpU256 {
    fn encode(&self, out: &mut dyn alloy_rlp::BufMut) {
        let start = self.0.iter().position(|&b| b != 0).unwrap_or(32);
        self.0[start..].encode(out);
    }

    fn length(&self) -> usize {
        let start = self.0.iter().position(|&b| b != 0).unwrap_or(32);
        self.0[start..].length()
    }
}

/// A 32-byte hash encoded as a 32-byte string (storage keys, blob versioned
/// hashes).
#[derive(Debug, Clone)]
pub(crate) struct RlpHash(pub Hash32);

impl Encodable for RlpHash {
    fn encode(&self, out: &mut dyn alloy_rlp::BufMut) {
        self.0.as_bytes().as_slice().encode(out);
    }

    fn length(&self) -> usize {
        self.0.as_bytes().as_slice().length()
    }
}

/// An access-list entry in RLP form.
#[derive(Debug, Clone, RlpEncodable)]
pub(crate) struct RlpAccessItem {
    pub address: RlpAddress,
    pub storage_keys: Vec<RlpHash>,
}

/// Converts the public access-list representation into RLP wrappers.
pub(crate) fn access_list_items(entries: &[AccessListEntry]) -> Vec<RlpAccessItem> {
    entries
        .iter()
        .map(|entry| RlpAccessItem {
            address: RlpAddress(entry.address),
            storage_keys: entry.storage_keys.iter().copied().map(RlpHash).collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn u256_zero_encodes_as_empty_string() {
        let mut buf = Vec::new();
        RlpU256([0u8; 32]).encode(&mut buf);
        assert_eq!(buf, vec![0x80]);
    }

    #[test]
    fn u256_small_value_is_a_single_byte() {
        let mut value = [0u8; 32];
        value[31] = 42;

        let mut buf = Vec::new();
        RlpU256(value).encode(&mut buf);
        assert_eq!(buf, vec![42]);
    }

    #[test]
    fn u256_strips_leading_zeros_only() {
        let mut value = [0u8; 32];
        value[30] = 0x01;
        value[31] = 0x00;

        let mut buf = Vec::new();
        RlpU256(value).encode(&mut buf);
        // Two significant bytes: 0x0100 -> 0x82 prefix.
        assert_eq!(buf, vec![0x82, 0x01, 0x00]);
    }

    #[test]
    fn empty_calldata_encodes_as_empty_string() {
        let mut buf = Vec::new();
        RlpBytes(Vec::new()).encode(&mut buf);
        assert_eq!(buf, vec![0x80]);
    }

    #[test]
    fn calldata_encodes_as_a_byte_string() {
        let mut buf = Vec::new();
        RlpBytes(vec![0xde, 0xad, 0xbe, 0xef]).encode(&mut buf);
        // String header 0x84, then the raw bytes, never a per-byte list.
        assert_eq!(buf, vec![0x84, 0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn address_encodes_as_20_byte_string() {
        let mut buf = Vec::new();
        RlpAddress(Address::new([0xde; 20])).encode(&mut buf);
        assert_eq!(buf.len(), 21);
        assert_eq!(buf[0], 0x94);
        assert_eq!(&buf[1..], &[0xde; 20]);
    }

    #[test]
    fn absent_recipient_encodes_as_empty_string() {
        let mut buf = Vec::new();
        RlpOptionalAddress(None).encode(&mut buf);
        assert_eq!(buf, vec![0x80]);
        assert_eq!(RlpOptionalAddress(None).length(), 1);
    }

    #[test]
    fn hash_encodes_as_32_byte_string() {
        let mut buf = Vec::new();
        RlpHash(Hash32::new([0xaa; 32])).encode(&mut buf);
        assert_eq!(buf.len(), 33);
        assert_eq!(buf[0], 0xa0);
    }

    #[test]
    fn access_item_is_a_two_member_list() {
        let entry = AccessListEntry {
            address: Address::new([0x11; 20]),
            storage_keys: vec![Hash32::new([0x22; 32])],
        };
        let items = access_list_items(&[entry]);

        let mut buf = Vec::new();
        items[0].encode(&mut buf);
        // 55-byte payload: 21-byte address string + 34-byte key list.
        assert_eq!(buf.len(), 56);
        assert_eq!(buf[0], 0xc0 + 55);
        assert_eq!(buf[1], 0x94);
    }
}
