//! Shared types for locating legal dictionary terms in plain text.
//!
//! Offsets are always *character* offsets (Unicode scalar values) into the
//! decoded document, never byte offsets. [`Span`] is half-open, so the
//! characters covered by `Span { start: 3, end: 12 }` are `3..12`.
//!
//! Use [`LexiconEntry`] to describe a validated dictionary record, [`Span`]
//! and [`TermMatch`] to describe what was found, and [`char_slice`] to map a
//! span back to its text.
//!
//! ```rust
//! use lexicon_types::{Span, char_slice};
//!
//! let text = "El árbitro decidió";
//! let span = Span::new(3, 10);
//! assert_eq!(char_slice(text, span), Some("árbitro"));
//! assert!(Span::new(0, 18).contains(span));
//! ```

use std::collections::BTreeSet;
use std::fmt;

/// Domain tag used for the labor-law subset of the dictionary.
pub const LABOR_DOMAIN: &str = "Lab.";

/// Domain tag used for general legal vocabulary.
pub const GENERAL_DOMAIN: &str = "Gral.";

/// Domain selected when the caller does not name one.
pub const DEFAULT_DOMAIN: &str = LABOR_DOMAIN;

/// Half-open character range `[start, end)` into a source text.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of characters covered.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// True when `other` lies fully inside `self`.
    ///
    /// Equal spans contain each other.
    pub fn contains(&self, other: Span) -> bool {
        other.start >= self.start && other.end <= self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.start, self.end)
    }
}

/// One occurrence of a term: where it is and exactly how it was written.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TermMatch {
    pub span: Span,
    /// Matched substring with the document's own casing and accents.
    pub surface: String,
}

/// A dictionary record after validation.
///
/// `subterms` keeps the file order; `domain_tags` only answers membership.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LexiconEntry {
    pub name: String,
    pub subterms: Vec<String>,
    pub domain_tags: BTreeSet<String>,
}

impl LexiconEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_subterm(mut self, subterm: impl Into<String>) -> Self {
        self.subterms.push(subterm.into());
        self
    }

    pub fn with_domain(mut self, tag: impl Into<String>) -> Self {
        self.domain_tags.insert(tag.into());
        self
    }

    pub fn has_domain(&self, tag: &str) -> bool {
        self.domain_tags.contains(tag)
    }

    /// Terms to scan for this entry: every subterm in order, then the name.
    pub fn terms(&self) -> impl Iterator<Item = &str> + '_ {
        self.subterms
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.name.as_str()))
    }
}

/// Slice `text` by character offsets.
///
/// Returns `None` when the span is inverted or runs past the end of the text.
pub fn char_slice(text: &str, span: Span) -> Option<&str> {
    if span.start > span.end {
        return None;
    }
    let start = byte_offset(text, span.start)?;
    let end = byte_offset(text, span.end)?;
    Some(&text[start..end])
}

fn byte_offset(text: &str, chars: usize) -> Option<usize> {
    if chars == 0 {
        return Some(0);
    }
    match text.char_indices().nth(chars) {
        Some((idx, _)) => Some(idx),
        None if text.chars().count() == chars => Some(text.len()),
        None => None,
    }
}
