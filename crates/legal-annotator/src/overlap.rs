use lexicon_types::Span;

use crate::index::ResultsIndex;

/// Drop every span that lies inside a span recorded under a different key.
///
/// Only other keys are consulted, so duplicates under one key survive. An
/// identical span under two keys counts as contained both ways and both are
/// dropped. Keys whose spans are all dropped remain with an empty list.
pub fn resolve_overlaps(index: &ResultsIndex) -> ResultsIndex {
    index
        .iter()
        .map(|(surface, spans)| {
            let kept: Vec<Span> = spans
                .iter()
                .copied()
                .filter(|span| !contained_elsewhere(index, surface, *span))
                .collect();
            (surface, kept)
        })
        .collect()
}

fn contained_elsewhere(index: &ResultsIndex, surface: &str, span: Span) -> bool {
    index
        .iter()
        .filter(|(other, _)| *other != surface)
        .any(|(_, spans)| spans.iter().any(|outer| outer.contains(span)))
}
