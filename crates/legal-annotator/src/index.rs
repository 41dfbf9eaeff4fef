use indexmap::IndexMap;
use lexicon_types::{Span, TermMatch};

/// Spans found in one document, grouped by the exact surface form matched.
///
/// Keys keep first-insertion order and spans keep the order they were
/// recorded in. Recording the same span twice under one key keeps both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultsIndex {
    entries: IndexMap<String, Vec<Span>>,
}

impl ResultsIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, surface: &str, span: Span) {
        match self.entries.get_mut(surface) {
            Some(spans) => spans.push(span),
            None => {
                self.entries.insert(surface.to_string(), vec![span]);
            }
        }
    }

    pub fn record_matches<I>(&mut self, matches: I)
    where
        I: IntoIterator<Item = TermMatch>,
    {
        for m in matches {
            self.record(&m.surface, m.span);
        }
    }

    /// Insert or replace the whole span list for `surface`.
    ///
    /// An empty list still creates the key.
    pub fn insert(&mut self, surface: impl Into<String>, spans: Vec<Span>) {
        self.entries.insert(surface.into(), spans);
    }

    pub fn get(&self, surface: &str) -> Option<&[Span]> {
        self.entries.get(surface).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Span])> + '_ {
        self.entries
            .iter()
            .map(|(surface, spans)| (surface.as_str(), spans.as_slice()))
    }

    /// Every `(surface, span)` pair in key order, then span order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, Span)> + '_ {
        self.iter()
            .flat_map(|(surface, spans)| spans.iter().map(move |span| (surface, *span)))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    /// Number of surface-form keys, including keys whose span list is empty.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of spans across all keys.
    pub fn span_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }
}

impl<S: Into<String>> FromIterator<(S, Vec<Span>)> for ResultsIndex {
    fn from_iter<T: IntoIterator<Item = (S, Vec<Span>)>>(iter: T) -> Self {
        let mut index = ResultsIndex::new();
        for (surface, spans) in iter {
            index.insert(surface, spans);
        }
        index
    }
}
