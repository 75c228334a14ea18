//! Hash adapter: the only three primitives the rest of this crate is allowed
//! to reach for — SHA-256 (one-shot and incremental), SHA3-512, and
//! RIPEMD-160 (the latter two used solely to derive the 20-byte v3 address
//! tag via [`crate::address::addr_hash`]).

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};
use sha3::Sha3_512;

/// Computes the SHA-256 digest of `data` in one call.
#[must_use]
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let result = Sha256::digest(data);
    let mut out = [0u8; 32];
    out.copy_from_slice(&result);
    out
}

/// Computes the SHA3-512 digest of `data` in one call.
#[must_use]
pub fn sha3_512(data: &[u8]) -> [u8; 64] {
    let result = Sha3_512::digest(data);
    let mut out = [0u8; 64];
    out.copy_from_slice(&result);
    out
}

/// Computes the RIPEMD-160 digest of `data` in one call.
#[must_use]
pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    let result = Ripemd160::digest(data);
    let mut out = [0u8; 20];
    out.copy_from_slice(&result);
    out
}

/// Incremental SHA-256 hasher.
///
/// After [`Sha256Hasher::digest`] is called the hasher resets to the state of
/// a freshly constructed one, so a second `digest()` call with no
/// intervening `update()` returns the empty-input digest.
#[derive(Clone, Default)]
pub struct Sha256Hasher {
    inner: Sha256,
}

impl Sha256Hasher {
    /// Creates a new, empty incremental SHA-256 hasher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds more data into the hasher.
    pub fn update(&mut self, data: &[u8]) {
        Digest::update(&mut self.inner, data);
    }

    /// Finalizes the digest and resets the hasher to an empty state.
    #[must_use]
    pub fn digest(&mut self) -> [u8; 32] {
        let finished = core::mem::take(&mut self.inner);
        let result = finished.finalize();
        let mut out = [0u8; 32];
        out.copy_from_slice(&result);
        out
    }
}

impl core::fmt::Debug for Sha256Hasher {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Sha256Hasher").finish_non_exhaustive()
    }
}

/// Convenience constructor for a fresh incremental SHA-256 hasher.
#[must_use]
pub fn new_sha256() -> Sha256Hasher {
    Sha256Hasher::new()
}
