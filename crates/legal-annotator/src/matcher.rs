use lexicon_types::{Span, TermMatch};
use regex::{Regex, RegexBuilder};
use thiserror::Error;

use crate::pattern::build_patterns;

#[derive(Debug, Error)]
pub enum MatcherError {
    #[error("failed to compile pattern for {expression:?}: {source}")]
    Regex {
        expression: String,
        #[source]
        source: regex::Error,
    },
}

/// Compiled search for one lexicon term and its inflections.
///
/// Matching is case-insensitive and anchored on word boundaries on both sides
/// of the alternation, so "ley" never matches inside "leyenda". Scanning is
/// leftmost-first and non-overlapping.
#[derive(Debug, Clone)]
pub struct TermMatcher {
    expression: String,
    regex: Option<Regex>,
}

impl TermMatcher {
    pub fn new(expression: &str) -> Result<Self, MatcherError> {
        let patterns = build_patterns(expression);
        let regex = if patterns.is_empty() {
            None
        } else {
            let source = format!(r"\b(?:{})\b", patterns.join("|"));
            let compiled = RegexBuilder::new(&source)
                .case_insensitive(true)
                .build()
                .map_err(|source| MatcherError::Regex {
                    expression: expression.to_string(),
                    source,
                })?;
            Some(compiled)
        };
        Ok(Self {
            expression: expression.to_string(),
            regex,
        })
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// The compiled pattern, if the expression had any words.
    pub fn pattern(&self) -> Option<&str> {
        self.regex.as_ref().map(Regex::as_str)
    }

    /// All matches in `text`, in order, with character offsets.
    pub fn find_all(&self, text: &str) -> Vec<TermMatch> {
        let Some(regex) = &self.regex else {
            return Vec::new();
        };

        let mut out = Vec::new();
        let mut byte_cursor = 0usize;
        let mut char_cursor = 0usize;
        for m in regex.find_iter(text) {
            char_cursor += text[byte_cursor..m.start()].chars().count();
            let start = char_cursor;
            let end = start + m.as_str().chars().count();
            byte_cursor = m.end();
            char_cursor = end;
            out.push(TermMatch {
                span: Span::new(start, end),
                surface: m.as_str().to_string(),
            });
        }
        out
    }
}

/// Compile `expression` and scan `text` once.
pub fn find_matches(text: &str, expression: &str) -> Result<Vec<TermMatch>, MatcherError> {
    Ok(TermMatcher::new(expression)?.find_all(text))
}
