//! Keyed digest engine.
//!
//! The keyed primitive is BLAKE3 in key-derivation mode: the key string is
//! the derive-key context and digests are read from the extendable output.
//! Any other keyed, variable-output hash can be plugged in through
//! [`KeyedHash`].

use crate::policy::MAX_DIGEST_LEN;

/// A keyed hash function with variable-length output.
///
/// Implementations hold the key and a mutable scratch state.
pub trait KeyedHash {
    /// Derive a fresh hashing context from `key`.
    fn init(key: &str) -> Self
    where
        Self: Sized;

    /// Forget all input fed since construction or the last reset.
    fn reset(&mut self);

    /// Feed more input.
    fn update(&mut self, data: &[u8]);

    /// Fill `out` with digest output over the input fed so far.
    fn finalize_into(&self, out: &mut [u8]);
}

/// BLAKE3 in derive-key mode.
#[derive(Clone)]
pub struct Blake3Keyed {
    hasher: blake3::Hasher,
}

impl std::fmt::Debug for Blake3Keyed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Blake3Keyed").finish_non_exhaustive()
    }
}

impl KeyedHash for Blake3Keyed {
    fn init(key: &str) -> Self {
        Self {
            hasher: blake3::Hasher::new_derive_key(key),
        }
    }

    fn reset(&mut self) {
        self.hasher.reset();
    }

    fn update(&mut self, data: &[u8]) {
        self.hasher.update(data);
    }

    fn finalize_into(&self, out: &mut [u8]) {
        self.hasher.finalize_xof().fill(out);
    }
}

/// Truncated digest of a single label, at most [`MAX_DIGEST_LEN`] bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigestBytes {
    buf: [u8; MAX_DIGEST_LEN],
    len: usize,
}

impl DigestBytes {
    /// The digest bytes
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Number of digest bytes
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Always false; digests are never empty
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl AsRef<[u8]> for DigestBytes {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// Scratch context used to hash cumulative suffixes, one at a time.
#[derive(Debug, Clone)]
pub struct LabelDigest<H = Blake3Keyed> {
    inner: H,
}

impl<H: KeyedHash> LabelDigest<H> {
    /// Create a digest context keyed with `key`
    #[must_use]
    pub fn new(key: &str) -> Self {
        Self { inner: H::init(key) }
    }

    /// Hash `suffix` and return exactly `output_len` bytes of keyed digest.
    ///
    /// `output_len` is clamped to [`MAX_DIGEST_LEN`]. The scratch state is
    /// reset before and after, so nothing carries over between calls.
    pub fn hash_label(&mut self, suffix: &[u8], output_len: usize) -> DigestBytes {
        let len = output_len.min(MAX_DIGEST_LEN);
        let mut out = DigestBytes {
            buf: [0u8; MAX_DIGEST_LEN],
            len,
        };

        self.inner.reset();
        self.inner.update(suffix);
        self.inner.finalize_into(&mut out.buf[..len]);
        self.inner.reset();

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_for_same_key() {
        let mut a = LabelDigest::<Blake3Keyed>::new("key");
        let mut b = LabelDigest::<Blake3Keyed>::new("key");

        assert_eq!(a.hash_label(b"example.net", 8), b.hash_label(b"example.net", 8));
        // Repeated use of the same context must not depend on prior input
        let first = a.hash_label(b"net", 4);
        a.hash_label(b"something else entirely", 16);
        assert_eq!(a.hash_label(b"net", 4), first);
    }

    #[test]
    fn key_sensitive() {
        let mut a = LabelDigest::<Blake3Keyed>::new("key-one");
        let mut b = LabelDigest::<Blake3Keyed>::new("key-two");

        assert_ne!(a.hash_label(b"example.net", 16), b.hash_label(b"example.net", 16));
    }

    #[test]
    fn output_is_prefix_of_longer_output() {
        let mut d = LabelDigest::<Blake3Keyed>::new("key");
        let short = d.hash_label(b"example.net", 4);
        let long = d.hash_label(b"example.net", 16);

        assert_eq!(short.len(), 4);
        assert_eq!(long.len(), 16);
        assert_eq!(short.as_bytes(), &long.as_bytes()[..4]);
    }

    #[test]
    fn matches_blake3_derive_key() {
        let mut d = LabelDigest::<Blake3Keyed>::new("ctx");
        let expected = blake3::derive_key("ctx", b"com");

        assert_eq!(d.hash_label(b"com", 16).as_bytes(), &expected[..16]);
    }

    #[test]
    fn clamps_output_len() {
        let mut d = LabelDigest::<Blake3Keyed>::new("key");
        assert_eq!(d.hash_label(b"com", 64).len(), MAX_DIGEST_LEN);
    }
}
