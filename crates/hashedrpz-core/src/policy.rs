//! Digest truncation and the ownername length budget.

use crate::error::{HashError, Result};

/// Maximum ownername length as per RFC1035.
pub const MAX_OWNERNAME_LEN: usize = 255;

/// Digest length for labels shorter than 4 bytes.
pub const SHORT_DIGEST_LEN: usize = 4;

/// Digest length for labels of 4 to 7 bytes.
pub const MEDIUM_DIGEST_LEN: usize = 8;

/// Digest length for labels of 8 bytes or more, and the upper bound of any
/// single label digest.
pub const MAX_DIGEST_LEN: usize = 16;

/// Map a plaintext label length to the digest length used for it.
///
/// Short labels get short digests so output does not explode, while longer
/// labels get more output so they do not clash with shorter ones.
#[must_use]
pub const fn digest_len(label_len: usize) -> usize {
    if label_len < 4 {
        SHORT_DIGEST_LEN
    } else if label_len < 8 {
        MEDIUM_DIGEST_LEN
    } else {
        MAX_DIGEST_LEN
    }
}

/// Length of `bytes` digest bytes once base32 encoded without padding.
#[must_use]
pub const fn encoded_len(bytes: usize) -> usize {
    (bytes * 8).div_ceil(5)
}

/// Upper bound on the length of a hashed ownername.
///
/// The hashed result must stay strictly below this value; reaching it is
/// reported as [`HashError::TooLong`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthBudget {
    max: usize,
}

impl LengthBudget {
    /// A raw numeric cap on the hashed ownername length.
    #[must_use]
    pub const fn new(max: usize) -> Self {
        Self { max }
    }

    /// Derive the budget from the origin the result will be placed under.
    ///
    /// The budget is `255 - 16 - 1 - len(origin)`: the RFC1035 maximum,
    /// minus one worst case label digest (which leaves room for a `*.`
    /// fallback), minus the dot before the origin.
    pub fn from_origin(origin: &str) -> Result<Self> {
        if origin.is_empty() || origin.starts_with('.') {
            return Err(HashError::InvalidOriginDomain);
        }

        let max = MAX_OWNERNAME_LEN
            .saturating_sub(MAX_DIGEST_LEN)
            .saturating_sub(1)
            .saturating_sub(origin.len());

        Ok(Self { max })
    }

    /// The cap in bytes
    #[must_use]
    pub const fn max(self) -> usize {
        self.max
    }

    /// Whether a result of `len` bytes has used up the budget
    #[must_use]
    pub const fn exceeded_by(self, len: usize) -> bool {
        len >= self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_len_boundaries() {
        assert_eq!(digest_len(1), 4);
        assert_eq!(digest_len(3), 4);
        assert_eq!(digest_len(4), 8);
        assert_eq!(digest_len(7), 8);
        assert_eq!(digest_len(8), 16);
        assert_eq!(digest_len(63), 16);
    }

    #[test]
    fn encoded_lengths() {
        assert_eq!(encoded_len(4), 7);
        assert_eq!(encoded_len(8), 13);
        assert_eq!(encoded_len(16), 26);
    }

    #[test]
    fn budget_from_origin() {
        let budget = LengthBudget::from_origin("rpz.example.net").unwrap();
        assert_eq!(budget.max(), 255 - 16 - 1 - 15);
        assert!(budget.exceeded_by(223));
        assert!(!budget.exceeded_by(222));
    }

    #[test]
    fn invalid_origins() {
        for origin in ["", ".", ".rpz.example.net"] {
            assert_eq!(
                LengthBudget::from_origin(origin),
                Err(HashError::InvalidOriginDomain),
                "origin {origin:?}"
            );
        }
    }

    #[test]
    fn huge_origin_saturates() {
        let origin = "a".repeat(300);
        assert_eq!(LengthBudget::from_origin(&origin).unwrap().max(), 0);
    }
}
