//! Mochimo WOTS+ one-time signatures and wallet-address framing.
//!
//! This crate implements the fixed `w=16, n=32, len=67` WOTS+ parameter set
//! used by the Mochimo cryptocurrency, plus the legacy (v2) and v3
//! wallet-address and tag formats built on top of a WOTS+ public key.
//!
//! The lowest layer ([`hash`], [`byte_buffer`]) provides the primitive hash
//! functions and a cursor-addressed byte buffer. [`wots_hash`] builds the
//! XMSS-style hash-addressing struct and the `PRF`/`F` primitives the WOTS+
//! chain is made of. [`wots`] is the one-time signature itself: key
//! generation, signing, and public-key recovery. [`address`] covers wallet
//! address and tag framing, including base58 tag encoding. [`wallet`] ties a
//! secret, a derived keypair, and a tag together into a single convenience
//! type.
//!
//! ```
//! use mochimo_wots::Wallet;
//!
//! let secret = [0x12u8; 32];
//! let wallet = Wallet::create(Some("primary"), &secret, None).unwrap();
//!
//! let message_digest = [0xABu8; 32];
//! let sig = wallet.sign(&message_digest).unwrap();
//! assert!(wallet.verify(&message_digest, &sig).unwrap());
//! ```

mod address;
mod byte_buffer;
mod error;
mod hash;
mod params;
mod wallet;
mod wots;
mod wots_hash;

pub use address::{
    Address, LegacyTag, V3Address, V3Tag, WotsAddress, addr_from_implicit, addr_from_wots,
    addr_hash, addr_tag_from_base58, addr_tag_to_base58, tag_apply, tag_extract, tag_is_valid,
    v3_address, validate_base58_tag, wots_address_from_bytes, wots_address_to_bytes,
};
pub use byte_buffer::{ByteBuffer, ByteOrder};
pub use error::{Error, WotsResult};
pub use hash::{Sha256Hasher, new_sha256, ripemd160, sha256, sha3_512};
pub use params::{
    ADDRESS_LEN, AMOUNT_LEN, LEGACY_TAG_LEN, PARAMSN, V3_ADDR_LEN, V3_TAG_LEN, WOTSLEN,
    WOTSLEN1, WOTSLEN2, WOTSLOGW, WOTSSIGBYTES, WOTSW,
};
pub use wallet::{Components, ComponentGenerator, Tag, Wallet, default_components};
pub use wots::{WotsChains, WotsSignature, wots_pk_from_sig, wots_pkgen, wots_sign, wots_verify};
pub use wots_hash::HashAddress;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_hash_fixed_point_matches_known_vector() {
        let pk = [0x42u8; WOTSSIGBYTES];
        let addr = addr_from_wots(&pk);
        assert_eq!(&addr[..V3_TAG_LEN], &addr[V3_TAG_LEN..]);
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
        assert_eq!(addr_tag_from_base58(&encoded).unwrap(), tag);
    }

    #[test]
    fn wallet_is_deterministic_from_secret() {
        let secret = [0x12u8; PARAMSN];
        let a = Wallet::create(None, &secret, None).unwrap();
        let b = Wallet::create(None, &secret, None).unwrap();
        assert_eq!(a.wots_address(), b.wots_address());
    }

    #[test]
    fn wallet_sign_verify_round_trips_and_rejects_tampering() {
        let secret = [0x34u8; PARAMSN];
        let wallet = Wallet::create(Some("w"), &secret, None).unwrap();

        let message = [0x56u8; PARAMSN];
        let sig = wallet.sign(&message).unwrap();
        assert!(wallet.verify(&message, &sig).unwrap());

        let mut tampered_sig = sig;
        tampered_sig[0] ^= 0x01;
        assert!(!wallet.verify(&message, &tampered_sig).unwrap());
    }

    #[test]
    fn legacy_tag_validity_gate_is_enforced_end_to_end() {
        let secret = [0x12u8; PARAMSN];
        assert!(Wallet::create(None, &secret, Some(&[0x42u8; LEGACY_TAG_LEN])).is_err());
        assert!(Wallet::create(None, &secret, Some(&[0x41u8; LEGACY_TAG_LEN])).is_ok());
    }

    #[test]
    fn low_level_wots_primitives_agree_with_wallet_facade() {
        let private_seed = [0x01u8; PARAMSN];
        let pub_seed = [0x02u8; PARAMSN];
        let addr_seed = [0x03u8; PARAMSN];
        let message_digest = [0x04u8; PARAMSN];

        let pk = wots_pkgen(&private_seed, &pub_seed, &addr_seed);
        let sig = wots_sign(&message_digest, &private_seed, &pub_seed, &addr_seed);
        assert!(wots_verify(&sig, &message_digest, &pk, &pub_seed, &addr_seed));

        let recovered = wots_pk_from_sig(&sig, &message_digest, &pub_seed, &addr_seed);
        assert_eq!(pk, recovered);
    }
}
