//! Keyed per-label hashing of DNS ownernames.
//!
//! HashedRPZ turns a name such as `www.example.net` into
//! `4ln83mo.kj8qsm2gn1o42.1qpnbgg`, so a block list can be published as an
//! RPZ zone without disclosing the domains it contains, while a resolver
//! holding the key can still match names and their parents.
//!
//! - Labels are processed right to left, TLD first.
//! - Every label is hashed together with all labels to its right (its
//!   cumulative suffix) using keyed BLAKE3.
//! - The digest is truncated to 4, 8 or 16 bytes depending on the label
//!   length, then base32hex encoded (lowercase, unpadded).
//! - A leading `*` label is kept verbatim.
//!
//! # Example
//!
//! ```rust
//! use hashedrpz_core::{HashedRpz, HashError};
//!
//! let hasher: HashedRpz = HashedRpz::new("in-band key + out-of-band key");
//!
//! let name = hasher.hash("www.example.net", "rpz.example.org", None)?;
//! assert_eq!(name.split('.').count(), 3);
//!
//! assert_eq!(
//!     hasher.hash("a..example.net", "rpz.example.org", None),
//!     Err(HashError::EmptySublabel)
//! );
//! # Ok::<(), HashError>(())
//! ```

#![doc(html_root_url = "https://docs.rs/hashedrpz-core/0.2.0")]

pub mod digest;
pub mod encoding;
mod error;
mod hasher;
pub mod labels;
pub mod policy;

pub use digest::{Blake3Keyed, KeyedHash, LabelDigest};
pub use error::{ErrorKind, HashError, Result};
pub use hasher::{Hashed, HashedRpz, Observer};
pub use policy::{digest_len, LengthBudget};
