//! Addressing and the two tree-hash primitives (`PRF`, `F`) that the WOTS+
//! chain in [`crate::wots`] is built from.
//!
//! An address is the 8×`u32` structure RFC 8391 uses to domain-separate
//! every hash call in an XMSS-family scheme. This crate only ever drives a
//! single WOTS+ chain (there is no Merkle tree above it), so only the chain
//! index, hash index, and key-or-mask selector fields are ever set.

use crate::hash::sha256;
use crate::params::{PARAMSN, XMSS_HASH_PADDING_F, XMSS_HASH_PADDING_PRF};

/// An 8-word hash address. Word 5 is the chain index, word 6 the hash-call
/// index within a chain step, word 7 the key-or-bitmask selector.
pub type HashAddress = [u32; 8];

/// Sets the chain-index field (word 5 / byte offset 20).
#[inline]
pub fn set_chain_addr(addr: &mut HashAddress, chain: u32) {
    addr[5] = chain;
}

/// Sets the hash-call-index field (word 6 / byte offset 24).
#[inline]
pub fn set_hash_addr(addr: &mut HashAddress, hash: u32) {
    addr[6] = hash;
}

/// Sets the key-or-bitmask selector field (word 7 / byte offset 28): `0`
/// selects the chain key, `1` selects the bitmask.
#[inline]
pub fn set_key_and_mask(addr: &mut HashAddress, key_and_mask: u32) {
    addr[7] = key_and_mask;
}

/// Serializes an address to its 32-byte wire form. Each of the 8 words is
/// written big-endian into its own 4-byte slot; the slots are not otherwise
/// reordered.
#[must_use]
pub fn addr_to_bytes(addr: &HashAddress) -> [u8; 32] {
    let mut out = [0u8; 32];
    for (word, chunk) in addr.iter().zip(out.chunks_exact_mut(4)) {
        chunk.copy_from_slice(&word.to_be_bytes());
    }
    out
}

/// Parses a 32-byte wire form back into an address (the inverse of
/// [`addr_to_bytes`]): each 4-byte slot is read as one big-endian word.
/// Used to seed a fresh address from a wallet's 32-byte address-seed.
#[must_use]
pub fn addr_from_bytes(bytes: &[u8; 32]) -> HashAddress {
    let mut out: HashAddress = [0u32; 8];
    for (word, chunk) in out.iter_mut().zip(bytes.chunks_exact(4)) {
        let mut word_bytes = [0u8; 4];
        word_bytes.copy_from_slice(chunk);
        *word = u32::from_be_bytes(word_bytes);
    }
    out
}

fn padded_hash(padding: u8, rest: &[&[u8]]) -> [u8; 32] {
    let total: usize = PARAMSN + rest.iter().map(|s| s.len()).sum::<usize>();
    let mut buf = Vec::with_capacity(total);
    buf.resize(PARAMSN, 0);
    buf[PARAMSN - 1] = padding;
    for chunk in rest {
        buf.extend_from_slice(chunk);
    }
    sha256(&buf)
}

/// `PRF(key, input)`: a domain-separated pseudorandom function keyed by a
/// 32-byte secret, taking a 32-byte input. Used both to expand a private
/// seed into the 67 WOTS+ chain start values and, keyed by the public seed,
/// to derive per-step chain keys and bitmasks in [`thash_f`].
#[must_use]
pub fn prf(input: &[u8; 32], key: &[u8; PARAMSN]) -> [u8; 32] {
    padded_hash(XMSS_HASH_PADDING_PRF, &[key, input])
}

/// The WOTS+ chain step hash `F`: masks `input` with a key and bitmask both
/// derived from `pub_seed` and the current address, then hashes the result.
/// Mutates `addr`'s key-and-mask field as a side effect; callers must not
/// rely on its value afterward.
#[must_use]
pub fn thash_f(input: &[u8; 32], pub_seed: &[u8; PARAMSN], addr: &mut HashAddress) -> [u8; 32] {
    set_key_and_mask(addr, 0);
    let key_addr_bytes = addr_to_bytes(addr);
    let key = prf(&key_addr_bytes, pub_seed);

    set_key_and_mask(addr, 1);
    let mask_addr_bytes = addr_to_bytes(addr);
    let bitmask = prf(&mask_addr_bytes, pub_seed);

    let mut masked = [0u8; PARAMSN];
    for i in 0..PARAMSN {
        masked[i] = input[i] ^ bitmask[i];
    }

    padded_hash(XMSS_HASH_PADDING_F, &[&key, &masked])
}
