//! The ownername hasher.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, trace};

use crate::digest::{Blake3Keyed, KeyedHash, LabelDigest};
use crate::encoding::encode_label;
use crate::error::{HashError, Result};
use crate::labels::{Labels, Token, WILDCARD};
use crate::policy::{digest_len, LengthBudget};

/// Callback invoked after each hashed label with the plaintext cumulative
/// suffix and the hashed result built so far.
///
/// Allows a caller to do intermediate lookups at every level of the name.
pub type Observer<'a> = &'a mut dyn FnMut(&str, &str);

/// Result of [`HashedRpz::hash_wildcard`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hashed {
    /// The hashed ownername, without the origin
    pub name: String,

    /// True when the name was too long and got wildcarded at the last
    /// label that fitted
    pub wildcard: bool,
}

/// Hashes ownernames into their HashedRPZ form.
///
/// Each label is hashed together with every label to its right, so `www`
/// under `example.net` and `www` under `example.org` produce unrelated
/// digests.
///
/// One instance serialises its callers: the digest context is locked for
/// the whole of one ownername. Clone (or [`fork`](Self::fork)) the hasher
/// to get independent instances for parallel use; clones share the key but
/// nothing else.
pub struct HashedRpz<H: KeyedHash = Blake3Keyed> {
    key: Arc<str>,
    digest: Mutex<LabelDigest<H>>,
}

impl<H: KeyedHash> HashedRpz<H> {
    /// Create a hasher deriving its keyed context from `key`.
    ///
    /// The key usually is the concatenation of an in-band and an
    /// out-of-band secret; how it is composed is up to the caller.
    #[must_use]
    pub fn new(key: &str) -> Self {
        Self::with_key(Arc::from(key))
    }

    fn with_key(key: Arc<str>) -> Self {
        let digest = Mutex::new(LabelDigest::new(&key));
        Self { key, digest }
    }

    /// Create an independent hasher with the same key.
    #[must_use]
    pub fn fork(&self) -> Self {
        Self::with_key(Arc::clone(&self.key))
    }

    /// Hash `name` for inclusion under `origin` (e.g. `rpz.example.net`).
    ///
    /// A single trailing dot on `name` is ignored. The origin is not hashed;
    /// it only sets the length budget (see [`LengthBudget::from_origin`]).
    ///
    /// # Errors
    ///
    /// - [`HashError::InvalidOriginDomain`] if `origin` is empty, the root
    ///   or starts with a dot.
    /// - [`HashError::EmptyLabel`] if `name` is empty, to avoid blocking the
    ///   root.
    /// - [`HashError::EmptySublabel`] on two adjacent dots.
    /// - [`HashError::WildcardNotAtStart`] if a `*` is anywhere but the
    ///   whole first label.
    /// - [`HashError::TooLong`] if the result does not fit; it carries the
    ///   labels hashed so far, see [`hash_wildcard`](Self::hash_wildcard).
    pub fn hash(&self, name: &str, origin: &str, observer: Option<Observer<'_>>) -> Result<String> {
        let budget = LengthBudget::from_origin(origin)?;
        self.hash_with_budget(name, budget, observer)
    }

    /// Like [`hash`](Self::hash), but wildcards a name that is too long.
    ///
    /// The labels that fitted are kept and prefixed with `*.`, so
    /// `host.v.e.r.y.l.o.n.g.example.com` could become `*.<n.g.example.com>`.
    /// This over-blocks sibling names under the kept suffix. Other errors
    /// are returned unchanged.
    pub fn hash_wildcard(
        &self,
        name: &str,
        origin: &str,
        observer: Option<Observer<'_>>,
    ) -> Result<Hashed> {
        match self.hash(name, origin, observer) {
            Ok(name) => Ok(Hashed {
                name,
                wildcard: false,
            }),
            Err(HashError::TooLong { partial }) => Ok(Hashed {
                name: format!("*.{partial}"),
                wildcard: true,
            }),
            Err(e) => Err(e),
        }
    }

    /// Hash `name` against an explicit length budget.
    pub fn hash_with_budget(
        &self,
        name: &str,
        budget: LengthBudget,
        mut observer: Option<Observer<'_>>,
    ) -> Result<String> {
        let labels = Labels::new(name)?;

        let mut digest = self.digest.lock().unwrap_or_else(PoisonError::into_inner);
        let mut result = String::new();

        for token in labels {
            match token? {
                Token::Label(span) => {
                    let len = digest_len(span.label().len());
                    let hashed = digest.hash_label(span.suffix().as_bytes(), len);
                    let encoded = encode_label(hashed.as_bytes());

                    trace!(suffix_len = span.suffix().len(), digest_len = len, "hashed label");

                    result = if result.is_empty() {
                        encoded
                    } else {
                        format!("{encoded}.{result}")
                    };

                    if budget.exceeded_by(result.len()) {
                        debug!(
                            len = result.len(),
                            max = budget.max(),
                            "hashed name exceeds length budget"
                        );
                        return Err(HashError::TooLong { partial: result });
                    }

                    if let Some(notify) = observer.as_deref_mut() {
                        notify(span.suffix(), &result);
                    }
                }
                Token::Wildcard { suffix } => {
                    // Wildcards stay verbatim; everything right of it is done
                    result = if result.is_empty() {
                        WILDCARD.to_string()
                    } else {
                        format!("*.{result}")
                    };

                    if let Some(notify) = observer.as_deref_mut() {
                        notify(suffix, &result);
                    }
                }
            }
        }

        Ok(result)
    }
}

impl<H: KeyedHash> Clone for HashedRpz<H> {
    fn clone(&self) -> Self {
        self.fork()
    }
}

impl<H: KeyedHash> std::fmt::Debug for HashedRpz<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HashedRpz").finish_non_exhaustive()
    }
}
