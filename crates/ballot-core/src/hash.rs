//! Central hash helper for canonical-state digests
//!
//! One module selects the digest algorithm for the whole workspace; all
//! canonical-state and mirror-key hashing goes through [`hash`] or
//! [`hasher`]. Changing the algorithm here changes it everywhere with no
//! call-site edits.
//!
//! Current algorithm: **SHA-256** (32-byte output).

use sha2::{Digest, Sha256};

/// Byte length of every digest this module produces
pub const DIGEST_LEN: usize = 32;

/// A fixed-length content digest
pub type Digest32 = [u8; DIGEST_LEN];

/// Hash arbitrary bytes to a 32-byte digest
#[inline]
pub fn hash(data: &[u8]) -> Digest32 {
    let mut h = Sha256::new();
    h.update(data);
    h.finalize().into()
}

/// Incremental hasher for multi-part input
#[derive(Debug, Default)]
pub struct Hasher {
    inner: Sha256,
}

impl Hasher {
    /// Create an empty hasher
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed more data into the hash
    pub fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    /// Finish and return the digest
    pub fn finalize(self) -> Digest32 {
        self.inner.finalize().into()
    }
}

/// Convenience constructor matching the free-function style of [`hash`]
#[inline]
pub fn hasher() -> Hasher {
    Hasher::new()
}

/// Hex-encode a digest for logs and reports
pub fn to_hex(digest: &Digest32) -> String {
    hex::encode(digest)
}
