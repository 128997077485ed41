use thiserror::Error;

/// Result type alias for hashing operations
pub type Result<T> = std::result::Result<T, HashError>;

/// Errors that can occur while hashing an ownername
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HashError {
    /// The origin domain is empty, the root, or starts with a dot
    #[error("invalid origin domain (empty/root/leading-dot)")]
    InvalidOriginDomain,

    /// The ownername is empty; hashing it would block the root
    #[error("empty label provided (RPZ the root?)")]
    EmptyLabel,

    /// A wildcard appears outside the first label, or shares a label with
    /// other characters
    #[error("wildcard (*) not at start of left hand side")]
    WildcardNotAtStart,

    /// The hashed result reached the length budget.
    ///
    /// `partial` holds every label hashed up to and including the one that
    /// crossed the budget, so the caller can still wildcard it.
    #[error("domain too long to hash")]
    TooLong {
        /// Result accumulated before the budget was exceeded
        partial: String,
    },

    /// Two adjacent separators, e.g. `dom..example.com`
    #[error("empty sub label (eg. dom..example.com)")]
    EmptySublabel,
}

/// Discriminant of a [`HashError`] without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`HashError::InvalidOriginDomain`]
    InvalidOriginDomain,
    /// See [`HashError::EmptyLabel`]
    EmptyLabel,
    /// See [`HashError::WildcardNotAtStart`]
    WildcardNotAtStart,
    /// See [`HashError::TooLong`]
    TooLong,
    /// See [`HashError::EmptySublabel`]
    EmptySublabel,
}

impl ErrorKind {
    /// Human-readable description of this kind of error
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::InvalidOriginDomain => "invalid origin domain (empty/root/leading-dot)",
            Self::EmptyLabel => "empty label provided (RPZ the root?)",
            Self::WildcardNotAtStart => "wildcard (*) not at start of left hand side",
            Self::TooLong => "domain too long to hash",
            Self::EmptySublabel => "empty sub label (eg. dom..example.com)",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

impl HashError {
    /// Returns the payload-free kind of this error
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidOriginDomain => ErrorKind::InvalidOriginDomain,
            Self::EmptyLabel => ErrorKind::EmptyLabel,
            Self::WildcardNotAtStart => ErrorKind::WildcardNotAtStart,
            Self::TooLong { .. } => ErrorKind::TooLong,
            Self::EmptySublabel => ErrorKind::EmptySublabel,
        }
    }

    /// Returns true if the error is the non-fatal length budget overflow
    #[must_use]
    pub const fn is_too_long(&self) -> bool {
        matches!(self, Self::TooLong { .. })
    }

    /// Returns the partial result if this is a [`HashError::TooLong`]
    #[must_use]
    pub fn partial(&self) -> Option<&str> {
        match self {
            Self::TooLong { partial } => Some(partial),
            _ => None,
        }
    }

    /// Consumes the error, returning the partial result of a
    /// [`HashError::TooLong`]
    #[must_use]
    pub fn into_partial(self) -> Option<String> {
        match self {
            Self::TooLong { partial } => Some(partial),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_kind_description() {
        let errors = [
            HashError::InvalidOriginDomain,
            HashError::EmptyLabel,
            HashError::WildcardNotAtStart,
            HashError::TooLong {
                partial: "abc".to_string(),
            },
            HashError::EmptySublabel,
        ];

        for err in errors {
            assert_eq!(err.to_string(), err.kind().description());
        }
    }

    #[test]
    fn partial_only_for_too_long() {
        let err = HashError::TooLong {
            partial: "0123.4567".to_string(),
        };
        assert!(err.is_too_long());
        assert_eq!(err.partial(), Some("0123.4567"));
        assert_eq!(err.into_partial().as_deref(), Some("0123.4567"));

        assert!(!HashError::EmptySublabel.is_too_long());
        assert_eq!(HashError::EmptySublabel.partial(), None);
    }
}
