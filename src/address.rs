//! Mochimo wallet-address framing: the 2208-byte wallet address, legacy
//! 12-byte tags, v3 20-byte address tags, the 40-byte "implicit" address
//! form, the 48-byte amount-bearing wire form, and base58 tag encoding.

use crate::error::{Error, WotsResult};
use crate::hash::{ripemd160, sha3_512};
use crate::params::{ADDRESS_LEN, AMOUNT_LEN, LEGACY_TAG_LEN, V3_ADDR_LEN, V3_TAG_LEN, WOTSSIGBYTES};

/// A 2208-byte Mochimo wallet address: `pk ‖ pub_seed ‖ rnd2`.
pub type Address = [u8; ADDRESS_LEN];
/// A 12-byte legacy (v2) address tag.
pub type LegacyTag = [u8; LEGACY_TAG_LEN];
/// A 20-byte v3 address tag.
pub type V3Tag = [u8; V3_TAG_LEN];
/// A 40-byte v3 address: `tag ‖ addr_hash`.
pub type V3Address = [u8; V3_ADDR_LEN];

const LEGACY_TAG_OFFSET: usize = ADDRESS_LEN - LEGACY_TAG_LEN;

/// A v3 address together with the amount it carries on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WotsAddress {
    /// The 40-byte `tag ‖ addr_hash` address.
    pub address: V3Address,
    /// Amount carried by the 48-byte wire form; zero when absent.
    pub amount: u64,
}

/// Checks the legacy-tag validity rule: 12 bytes, first byte not `0x00` or
/// `0x42`.
#[must_use]
pub fn tag_is_valid(tag: &[u8]) -> bool {
    tag.len() == LEGACY_TAG_LEN && tag[0] != 0x00 && tag[0] != 0x42
}

/// Returns a copy of `address` with its final 12 bytes overwritten by `tag`.
/// Fails if `tag` does not satisfy [`tag_is_valid`].
pub fn tag_apply(address: &Address, tag: &[u8]) -> WotsResult<Address> {
    if !tag_is_valid(tag) {
        return Err(Error::InvalidTag);
    }
    let mut out = *address;
    out[LEGACY_TAG_OFFSET..].copy_from_slice(tag);
    Ok(out)
}

/// Returns the final 12 bytes of `address` as a legacy tag.
#[must_use]
pub fn tag_extract(address: &Address) -> LegacyTag {
    let mut out = [0u8; LEGACY_TAG_LEN];
    out.copy_from_slice(&address[LEGACY_TAG_OFFSET..]);
    out
}

/// `RIPEMD160(SHA3-512(x))`: the 20-byte address-hash used to derive v3
/// tags from a WOTS+ public key.
#[must_use]
pub fn addr_hash(x: &[u8]) -> [u8; V3_TAG_LEN] {
    ripemd160(&sha3_512(x))
}

/// Builds the 40-byte "implicit" address: `tag ‖ tag` (the tag duplicated
/// into the hash slot, for use when the real address-hash half is unknown).
#[must_use]
pub fn addr_from_implicit(tag: &V3Tag) -> V3Address {
    let mut out = [0u8; V3_ADDR_LEN];
    out[..V3_TAG_LEN].copy_from_slice(tag);
    out[V3_TAG_LEN..].copy_from_slice(tag);
    out
}

/// Builds the 40-byte v3 address `tag ‖ addr_hash(pk)` from an explicit tag.
#[must_use]
pub fn v3_address(tag: &V3Tag, pk: &[u8; WOTSSIGBYTES]) -> V3Address {
    let mut out = [0u8; V3_ADDR_LEN];
    out[..V3_TAG_LEN].copy_from_slice(tag);
    out[V3_TAG_LEN..].copy_from_slice(&addr_hash(pk));
    out
}

/// Derives the 40-byte v3 address directly from a WOTS+ public key:
/// `addr_from_implicit(addr_hash(pk))`.
#[must_use]
pub fn addr_from_wots(pk: &[u8; WOTSSIGBYTES]) -> V3Address {
    addr_from_implicit(&addr_hash(pk))
}

/// Builds a [`WotsAddress`] from its wire form. Accepts three lengths:
/// `2144` (a raw WOTS+ public key; tag and hash are both derived via
/// [`addr_from_wots`], amount `0`), `40` (a bare v3 address, amount `0`), and
/// `48` (a v3 address followed by a little-endian `u64` amount). Any other
/// length yields a zeroed address.
#[must_use]
pub fn wots_address_from_bytes(bytes: &[u8]) -> WotsAddress {
    match bytes.len() {
        WOTSSIGBYTES => {
            let mut pk = [0u8; WOTSSIGBYTES];
            pk.copy_from_slice(bytes);
            WotsAddress {
                address: addr_from_wots(&pk),
                amount: 0,
            }
        }
        V3_ADDR_LEN => {
            let mut address = [0u8; V3_ADDR_LEN];
            address.copy_from_slice(bytes);
            WotsAddress { address, amount: 0 }
        }
        n if n == V3_ADDR_LEN + AMOUNT_LEN => {
            let mut address = [0u8; V3_ADDR_LEN];
            address.copy_from_slice(&bytes[..V3_ADDR_LEN]);
            let mut amount_bytes = [0u8; AMOUNT_LEN];
            amount_bytes.copy_from_slice(&bytes[V3_ADDR_LEN..]);
            WotsAddress {
                address,
                amount: u64::from_le_bytes(amount_bytes),
            }
        }
        _ => WotsAddress {
            address: [0u8; V3_ADDR_LEN],
            amount: 0,
        },
    }
}

/// Serializes a [`WotsAddress`] to its 48-byte amount-bearing wire form.
#[must_use]
pub fn wots_address_to_bytes(addr: &WotsAddress) -> [u8; V3_ADDR_LEN + AMOUNT_LEN] {
    let mut out = [0u8; V3_ADDR_LEN + AMOUNT_LEN];
    out[..V3_ADDR_LEN].copy_from_slice(&addr.address);
    out[V3_ADDR_LEN..].copy_from_slice(&addr.amount.to_le_bytes());
    out
}

fn crc16_xmodem(data: &[u8]) -> u16 {
    let mut crc: u16 = 0x0000;
    for &byte in data {
        crc ^= u16::from(byte) << 8;
        for _ in 0..8 {
            if crc & 0x8000 != 0 {
                crc = (crc << 1) ^ 0x1021;
            } else {
                crc <<= 1;
            }
        }
    }
    crc
}

/// Base58-encodes a 20-byte v3 tag as `base58(tag ‖ crc_lo ‖ crc_hi)`, where
/// the CRC is CRC-16/XMODEM over the tag bytes.
#[must_use]
pub fn addr_tag_to_base58(tag: &V3Tag) -> String {
    let crc = crc16_xmodem(tag);
    let mut payload = [0u8; V3_TAG_LEN + 2];
    payload[..V3_TAG_LEN].copy_from_slice(tag);
    payload[V3_TAG_LEN] = (crc & 0xff) as u8;
    payload[V3_TAG_LEN + 1] = (crc >> 8) as u8;
    bs58::encode(payload).into_string()
}

/// Decodes and validates a base58 tag string, returning the 20-byte tag.
/// Fails with [`Error::InvalidBase58`] if the string is malformed or decodes
/// to the wrong length, or [`Error::ChecksumMismatch`] if the embedded CRC
/// does not match the recomputed one.
pub fn addr_tag_from_base58(s: &str) -> WotsResult<V3Tag> {
    let decoded = bs58::decode(s).into_vec().map_err(|_| Error::InvalidBase58)?;
    if decoded.len() != V3_TAG_LEN + 2 {
        return Err(Error::InvalidBase58);
    }

    let mut tag = [0u8; V3_TAG_LEN];
    tag.copy_from_slice(&decoded[..V3_TAG_LEN]);

    let crc = u16::from(decoded[V3_TAG_LEN]) | (u16::from(decoded[V3_TAG_LEN + 1]) << 8);
    if crc != crc16_xmodem(&tag) {
        return Err(Error::ChecksumMismatch);
    }
    Ok(tag)
}

/// Checks that `s` decodes to a well-formed, checksum-valid base58 tag.
#[must_use]
pub fn validate_base58_tag(s: &str) -> bool {
    addr_tag_from_base58(s).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addr_from_wots_matches_fixed_point_vector() {
        let pk = [0x42u8; WOTSSIGBYTES];
        let addr = addr_from_wots(&pk);
        assert_eq!(
            hex::encode(addr),
            "7fe0655e22061d36f253085bfe4e3ffe8079176d7fe0655e22061d36f253085bfe4e3ffe8079176d"
        );
    }

    #[test]
    fn base58_tag_roundtrip_matches_known_vector() {
        let tag: V3Tag = hex_literal::hex!("3f1fba7025c7d37470e7260117a72b7de9f5ca59");
        let encoded = addr_tag_to_base58(&tag);
        assert_eq!(encoded, "J8gqYehTJhJWrfcUd766sUQ8THktNs");
        assert!(validate_base58_tag(&encoded));
        assert_eq!(addr_tag_from_base58(&encoded).unwrap(), tag);
    }

    #[test]
    fn base58_tag_rejects_single_character_flip() {
        let tag: V3Tag = hex_literal::hex!("3f1fba7025c7d37470e7260117a72b7de9f5ca59");
        let encoded = addr_tag_to_base58(&tag);
        let mut chars: Vec<char> = encoded.chars().collect();
        chars[0] = if chars[0] == 'J' { 'K' } else { 'J' };
        let tampered: String = chars.into_iter().collect();
        assert!(!validate_base58_tag(&tampered));
    }

    #[test]
    fn zero_tag_encodes_to_all_ones() {
        let tag = [0u8; V3_TAG_LEN];
        assert_eq!(addr_tag_to_base58(&tag), "1111111111111111111111");
    }

    #[test]
    fn legacy_tag_validity_rule() {
        let mut tag = [0x41u8; LEGACY_TAG_LEN];
        assert!(tag_is_valid(&tag));
        tag[0] = 0x42;
        assert!(!tag_is_valid(&tag));
        tag[0] = 0x00;
        assert!(!tag_is_valid(&tag));
    }

    #[test]
    fn tag_apply_then_extract_roundtrips() {
        let address = [0u8; ADDRESS_LEN];
        let tag = [0x41u8; LEGACY_TAG_LEN];
        let applied = tag_apply(&address, &tag).unwrap();
        assert_eq!(tag_extract(&applied), tag);
    }

    #[test]
    fn tag_apply_rejects_invalid_tag() {
        let address = [0u8; ADDRESS_LEN];
        let bad_tag = [0x42u8; LEGACY_TAG_LEN];
        assert!(tag_apply(&address, &bad_tag).is_err());
    }

    #[test]
    fn wots_address_from_bytes_handles_all_three_lengths_and_default() {
        let pk = [0x42u8; WOTSSIGBYTES];
        let from_pk = wots_address_from_bytes(&pk);
        assert_eq!(from_pk.amount, 0);
        assert_eq!(from_pk.address, addr_from_wots(&pk));

        let bare = [7u8; V3_ADDR_LEN];
        let from_bare = wots_address_from_bytes(&bare);
        assert_eq!(from_bare.address, bare);
        assert_eq!(from_bare.amount, 0);

        let mut with_amount = [7u8; V3_ADDR_LEN + AMOUNT_LEN];
        with_amount[V3_ADDR_LEN..].copy_from_slice(&42u64.to_le_bytes());
        let from_amount = wots_address_from_bytes(&with_amount);
        assert_eq!(from_amount.amount, 42);

        let garbage = [1u8; 7];
        let zeroed = wots_address_from_bytes(&garbage);
        assert_eq!(zeroed.address, [0u8; V3_ADDR_LEN]);
        assert_eq!(zeroed.amount, 0);
    }
}
