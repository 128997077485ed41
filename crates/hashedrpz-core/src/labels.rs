//! Right-to-left label scanning over a borrowed ownername.
//!
//! ```text
//!            +--- end
//!            V
//!   left.hand.side
//!        ^
//!        +-- start
//! ```
//!
//! `name[start..end]` is the label (`hand`), `name[start..]` the cumulative
//! suffix that gets hashed (`hand.side`). Nothing is copied.

use crate::error::{HashError, Result};

/// Literal wildcard label.
pub const WILDCARD: &str = "*";

/// Offsets of one label inside the scanned ownername.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelSpan<'a> {
    name: &'a str,
    start: usize,
    end: usize,
}

impl<'a> LabelSpan<'a> {
    /// Offset where both the label and its cumulative suffix begin
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// Offset just past the last byte of the label
    #[must_use]
    pub const fn end(&self) -> usize {
        self.end
    }

    /// The label itself
    #[must_use]
    pub fn label(&self) -> &'a str {
        &self.name[self.start..self.end]
    }

    /// The label and every label to its right
    #[must_use]
    pub fn suffix(&self) -> &'a str {
        &self.name[self.start..]
    }
}

/// One step of the right-to-left scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// A regular label to be hashed
    Label(LabelSpan<'a>),
    /// The leading `*`; always the last token of a name
    Wildcard {
        /// The whole ownername, wildcard included
        suffix: &'a str,
    },
}

/// Iterator over the labels of an ownername, TLD first.
///
/// Yields an error at the first malformed label and nothing afterwards.
#[derive(Debug, Clone)]
pub struct Labels<'a> {
    name: &'a str,
    /// End (exclusive) of the next label; `None` once the scan is over
    end: Option<usize>,
}

impl<'a> Labels<'a> {
    /// Start scanning `name`.
    ///
    /// A single trailing dot is ignored. Fails with
    /// [`HashError::EmptyLabel`] when nothing remains, and with
    /// [`HashError::EmptySublabel`] when the name ends in two dots.
    pub fn new(name: &'a str) -> Result<Self> {
        let name = match name.strip_suffix('.') {
            Some(stripped) if stripped.ends_with('.') => return Err(HashError::EmptySublabel),
            Some(stripped) => stripped,
            None => name,
        };

        if name.is_empty() {
            return Err(HashError::EmptyLabel);
        }

        Ok(Self {
            name,
            end: Some(name.len()),
        })
    }

    /// The ownername being scanned, without its trailing dot
    #[must_use]
    pub const fn name(&self) -> &'a str {
        self.name
    }

    fn fail(&mut self, err: HashError) -> Option<Result<Token<'a>>> {
        self.end = None;
        Some(Err(err))
    }
}

impl<'a> Iterator for Labels<'a> {
    type Item = Result<Token<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        let end = self.end?;

        let start = self.name[..end].rfind('.').map_or(0, |dot| dot + 1);
        if start == end {
            return self.fail(HashError::EmptySublabel);
        }

        let label = &self.name[start..end];
        if label.contains('*') {
            if start != 0 || label != WILDCARD {
                return self.fail(HashError::WildcardNotAtStart);
            }

            self.end = None;
            return Some(Ok(Token::Wildcard { suffix: self.name }));
        }

        // Skip the separator; a label starting at 0 was the last one
        self.end = start.checked_sub(1);

        Some(Ok(Token::Label(LabelSpan {
            name: self.name,
            start,
            end,
        })))
    }
}

impl std::iter::FusedIterator for Labels<'_> {}
