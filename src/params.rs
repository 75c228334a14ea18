//! Fixed WOTS+/Mochimo parameters and wire byte-layout constants. This crate
//! targets exactly one fixed parameter set, so these are plain `usize`/`u8`
//! constants rather than a type-level parameterization.

/// Winternitz parameter `w`.
pub const WOTSW: u32 = 16;
/// `log2(w)`.
pub const WOTSLOGW: u32 = 4;
/// Hash output length in bytes (`n`).
pub const PARAMSN: usize = 32;
/// Number of base-w digits used to encode the message digest.
pub const WOTSLEN1: usize = 64;
/// Number of base-w digits used to encode the checksum.
pub const WOTSLEN2: usize = 3;
/// Total number of WOTS+ chains (`len1 + len2`).
pub const WOTSLEN: usize = WOTSLEN1 + WOTSLEN2;
/// Signature size in bytes (`len * n`).
pub const WOTSSIGBYTES: usize = WOTSLEN * PARAMSN;

/// Size in bytes of a Mochimo wallet address (`pk || pub_seed || rnd2`).
pub const ADDRESS_LEN: usize = WOTSSIGBYTES + PARAMSN + PARAMSN;
/// Size in bytes of a legacy v2 tag.
pub const LEGACY_TAG_LEN: usize = 12;
/// Size in bytes of a v3 address tag.
pub const V3_TAG_LEN: usize = 20;
/// Size in bytes of a full v3 address (`tag || addr_hash`).
pub const V3_ADDR_LEN: usize = V3_TAG_LEN * 2;
/// Size in bytes of the little-endian amount suffix.
pub const AMOUNT_LEN: usize = 8;

/// Final padding byte used when hashing for an F-chain step.
pub const XMSS_HASH_PADDING_F: u8 = 0;
/// Final padding byte used when hashing for a PRF evaluation.
pub const XMSS_HASH_PADDING_PRF: u8 = 3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_and_address_sizes_are_as_expected() {
        assert_eq!(WOTSLEN, 67);
        assert_eq!(WOTSSIGBYTES, 2144);
        assert_eq!(ADDRESS_LEN, 2208);
        assert_eq!(V3_ADDR_LEN, 40);
    }
}
