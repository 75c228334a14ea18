//! A convenience facade binding a secret, a derived WOTS+ keypair, and an
//! address tag together, with deterministic component derivation and secure
//! teardown.

use zeroize::Zeroize;

use crate::address::{
    Address, LegacyTag, V3Tag, WotsAddress as V3WotsAddress, addr_hash, tag_apply, tag_is_valid,
    v3_address,
};
use crate::error::{Error, WotsResult};
use crate::params::{ADDRESS_LEN, LEGACY_TAG_LEN, PARAMSN, V3_TAG_LEN, WOTSSIGBYTES};
use crate::wots::{self, WotsSignature};

/// The three deterministically-derived 32-byte secrets a wallet's keypair is
/// built from.
#[derive(Clone, Copy)]
pub struct Components {
    /// Seeds the 67 WOTS+ private-key chains.
    pub private_seed: [u8; PARAMSN],
    /// Seeds the chain key/bitmask derivation.
    pub public_seed: [u8; PARAMSN],
    /// Seeds the hash-address struct (`rnd2`).
    pub addr_seed: [u8; PARAMSN],
}

impl core::fmt::Debug for Components {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Components").finish_non_exhaustive()
    }
}

impl Zeroize for Components {
    fn zeroize(&mut self) {
        self.private_seed.zeroize();
        self.public_seed.zeroize();
        self.addr_seed.zeroize();
    }
}

/// A pluggable component-derivation function: maps a 32-byte secret to the
/// three seeds a wallet's keypair is built from.
pub type ComponentGenerator = fn(&[u8; PARAMSN]) -> Components;

/// The default component generator: `private_seed = SHA-256(secret ‖
/// "seed")`, `public_seed = SHA-256(secret ‖ "publ")`, `addr_seed =
/// SHA-256(secret ‖ "addr")`, with the secret concatenated as raw bytes (not
/// re-encoded through any string type) to match the reference derivation
/// bit-for-bit.
#[must_use]
pub fn default_components(secret: &[u8; PARAMSN]) -> Components {
    fn derive(secret: &[u8; PARAMSN], literal: &[u8; 4]) -> [u8; PARAMSN] {
        let mut buf = [0u8; PARAMSN + 4];
        buf[..PARAMSN].copy_from_slice(secret);
        buf[PARAMSN..].copy_from_slice(literal);
        crate::hash::sha256(&buf)
    }
    Components {
        private_seed: derive(secret, b"seed"),
        public_seed: derive(secret, b"publ"),
        addr_seed: derive(secret, b"addr"),
    }
}

/// The flavor of address tag a wallet carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    /// A 12-byte tag embedded in the final bytes of the 2208-byte address.
    Legacy(LegacyTag),
    /// A 20-byte tag kept alongside the address, forming a 40-byte v3
    /// address together with the public key's address-hash.
    V3(V3Tag),
}

/// A Mochimo wallet: a secret, its derived WOTS+ address, and an address
/// tag.
#[derive(Clone)]
pub struct Wallet {
    name: Option<String>,
    secret: Option<[u8; PARAMSN]>,
    wots_address: Option<Address>,
    tag: Option<Tag>,
    derived_address: Option<V3WotsAddress>,
}

impl core::fmt::Debug for Wallet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Wallet")
            .field("name", &self.name)
            .field("has_secret", &self.secret.is_some())
            .field("tag", &self.tag)
            .finish_non_exhaustive()
    }
}

impl Default for Wallet {
    fn default() -> Self {
        Self {
            name: None,
            secret: None,
            wots_address: None,
            tag: None,
            derived_address: None,
        }
    }
}

impl Wallet {
    /// Creates a wallet from a 32-byte secret and an optional tag, using the
    /// default component generator. `tag`, if given, must be 12 bytes
    /// (legacy, must satisfy [`address::tag_is_valid`]) or 20 bytes (v3).
    pub fn create(name: Option<&str>, secret: &[u8], tag: Option<&[u8]>) -> WotsResult<Self> {
        Self::create_with_generator(name, secret, tag, default_components)
    }

    /// Creates a wallet from a fresh secret drawn from `rng`, using the
    /// default component generator. Mirrors how the underlying WOTS+
    /// primitive's teacher crate gates its own randomness behind a generic
    /// `R: rand::CryptoRng` type parameter rather than hardwiring one.
    #[cfg(feature = "rand")]
    pub fn create_random<R: rand::CryptoRng>(
        name: Option<&str>,
        rng: &mut R,
        tag: Option<&[u8]>,
    ) -> WotsResult<Self> {
        Self::create_with_filler(name, |buf| rng.fill_bytes(buf), tag)
    }

    /// Like [`Wallet::create`] but with an explicit component generator,
    /// e.g. for deterministic test fixtures or an alternate derivation.
    pub fn create_with_generator(
        name: Option<&str>,
        secret: &[u8],
        tag: Option<&[u8]>,
        generator: ComponentGenerator,
    ) -> WotsResult<Self> {
        let secret_arr: [u8; PARAMSN] =
            secret
                .try_into()
                .map_err(|_| Error::InvalidLength {
                    field: "secret",
                    expected: PARAMSN,
                    got: secret.len(),
                })?;

        let tag_kind = match tag {
            None => None,
            Some(t) if t.len() == LEGACY_TAG_LEN => {
                if !tag_is_valid(t) {
                    return Err(Error::InvalidTag);
                }
                let mut arr = [0u8; LEGACY_TAG_LEN];
                arr.copy_from_slice(t);
                Some(Tag::Legacy(arr))
            }
            Some(t) if t.len() == V3_TAG_LEN => {
                let mut arr = [0u8; V3_TAG_LEN];
                arr.copy_from_slice(t);
                Some(Tag::V3(arr))
            }
            Some(t) => {
                return Err(Error::InvalidLength {
                    field: "tag",
                    expected: V3_TAG_LEN,
                    got: t.len(),
                });
            }
        };

        let mut components = generator(&secret_arr);
        let pk_chains = wots::wots_pkgen(
            &components.private_seed,
            &components.public_seed,
            &components.addr_seed,
        );
        let pk_bytes = wots::flatten(&pk_chains);

        let mut raw_address = [0u8; ADDRESS_LEN];
        raw_address[..WOTSSIGBYTES].copy_from_slice(&pk_bytes);
        raw_address[WOTSSIGBYTES..WOTSSIGBYTES + PARAMSN].copy_from_slice(&components.public_seed);
        raw_address[WOTSSIGBYTES + PARAMSN..].copy_from_slice(&components.addr_seed);
        components.zeroize();

        let (v3_tag, wots_address) = match &tag_kind {
            Some(Tag::Legacy(t)) => (addr_hash(&pk_bytes), tag_apply(&raw_address, t)?),
            Some(Tag::V3(t)) => (*t, raw_address),
            None => (addr_hash(&pk_bytes), raw_address),
        };

        Ok(Self {
            name: name.map(str::to_owned),
            secret: Some(secret_arr),
            wots_address: Some(wots_address),
            tag: Some(tag_kind.unwrap_or(Tag::V3(v3_tag))),
            derived_address: Some(V3WotsAddress {
                address: v3_address(&v3_tag, &pk_bytes),
                amount: 0,
            }),
        })
    }

    /// Creates a wallet from a secret obtained by calling `fill` once with a
    /// 32-byte buffer. `fill`'s source of randomness (deterministic or
    /// OS-random) is entirely the caller's choice; see [`Wallet::create`] for
    /// the fixed-secret form and, with the `rand` feature enabled,
    /// [`Wallet::create_random`] for a ready-made RNG-backed filler.
    pub fn create_with_filler(
        name: Option<&str>,
        mut fill: impl FnMut(&mut [u8]),
        tag: Option<&[u8]>,
    ) -> WotsResult<Self> {
        let mut secret = [0u8; PARAMSN];
        fill(&mut secret);
        let wallet = Self::create(name, &secret, tag);
        secret.zeroize();
        wallet
    }

    /// Signs and verifies `rounds` freshly drawn random messages against this
    /// wallet's own keypair, as a post-creation self-check. Not required for
    /// correctness; returns `Ok(false)` at the first signature that fails to
    /// verify rather than erroring, so a caller can distinguish "keygen bug"
    /// from "no secret set".
    pub fn self_check(&self, mut fill: impl FnMut(&mut [u8]), rounds: usize) -> WotsResult<bool> {
        for _ in 0..rounds {
            let mut digest = [0u8; PARAMSN];
            fill(&mut digest);
            let sig = self.sign(&digest)?;
            if !self.verify(&digest, &sig)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// The wallet's name, if set.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The wallet's 2208-byte wots address, if created.
    #[must_use]
    pub fn wots_address(&self) -> Option<&Address> {
        self.wots_address.as_ref()
    }

    /// The wallet's tag, if created.
    #[must_use]
    pub fn tag(&self) -> Option<&Tag> {
        self.tag.as_ref()
    }

    /// The wallet's derived 40-byte v3 address (`tag ‖ addr_hash(pk)`), if
    /// created.
    #[must_use]
    pub fn derived_address(&self) -> Option<&V3WotsAddress> {
        self.derived_address.as_ref()
    }

    /// Splits the wallet's stored 2208-byte address into `(pk, pub_seed,
    /// rnd2)`.
    fn split_address(&self) -> WotsResult<(&[u8], &[u8], &[u8])> {
        let address = self.wots_address.as_ref().ok_or(Error::InvalidLength {
            field: "wots_address",
            expected: ADDRESS_LEN,
            got: 0,
        })?;
        let pk = &address[..WOTSSIGBYTES];
        let pub_seed = &address[WOTSSIGBYTES..WOTSSIGBYTES + PARAMSN];
        let rnd2 = &address[WOTSSIGBYTES + PARAMSN..];
        Ok((pk, pub_seed, rnd2))
    }

    /// Signs a 32-byte message digest with the wallet's secret, using the
    /// default component generator to re-derive `private_seed`.
    pub fn sign(&self, message_digest: &[u8; PARAMSN]) -> WotsResult<WotsSignature> {
        self.sign_with_generator(message_digest, default_components)
    }

    /// Like [`Wallet::sign`] but with an explicit component generator; must
    /// match the one used to [`Wallet::create`] this wallet.
    pub fn sign_with_generator(
        &self,
        message_digest: &[u8; PARAMSN],
        generator: ComponentGenerator,
    ) -> WotsResult<WotsSignature> {
        let secret = self.secret.ok_or(Error::InvalidLength {
            field: "secret",
            expected: PARAMSN,
            got: 0,
        })?;
        let (_pk, pub_seed, rnd2) = self.split_address()?;
        let mut components = generator(&secret);

        let pub_seed: [u8; PARAMSN] = pub_seed.try_into().expect("pub_seed slice is 32 bytes");
        let addr_seed: [u8; PARAMSN] = rnd2.try_into().expect("rnd2 slice is 32 bytes");
        debug_assert_eq!(pub_seed, components.public_seed);
        debug_assert_eq!(addr_seed, components.addr_seed);

        let signature = wots::wots_sign(
            message_digest,
            &components.private_seed,
            &pub_seed,
            &addr_seed,
        );
        components.zeroize();
        Ok(signature)
    }

    /// Verifies `sig` against `message_digest` and this wallet's stored
    /// public key. Never fails on cryptographic mismatch; it returns
    /// `Ok(false)`. Fails only if the wallet has no address.
    pub fn verify(&self, message_digest: &[u8; PARAMSN], sig: &WotsSignature) -> WotsResult<bool> {
        let (pk, pub_seed, rnd2) = self.split_address()?;
        let pub_seed: [u8; PARAMSN] = pub_seed.try_into().expect("pub_seed slice is 32 bytes");
        let addr_seed: [u8; PARAMSN] = rnd2.try_into().expect("rnd2 slice is 32 bytes");

        let recovered = wots::wots_pk_from_sig(sig, message_digest, &pub_seed, &addr_seed);
        let recovered_flat = wots::flatten(&recovered);
        Ok(recovered_flat.as_slice() == pk)
    }

    /// Zeroes the secret, wots address, and tag, and clears cached state.
    pub fn clear(&mut self) {
        if let Some(secret) = self.secret.as_mut() {
            secret.zeroize();
        }
        if let Some(address) = self.wots_address.as_mut() {
            address.zeroize();
        }
        self.secret = None;
        self.wots_address = None;
        self.tag = None;
        self.derived_address = None;
        self.name = None;
    }
}

impl Drop for Wallet {
    fn drop(&mut self) {
        self.clear();
    }
}
