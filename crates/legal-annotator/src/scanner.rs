use lexicon_db::Lexicon;
use lexicon_types::LexiconEntry;
use tracing::{debug, trace};

use crate::index::ResultsIndex;
use crate::matcher::{MatcherError, TermMatcher};
use crate::overlap::resolve_overlaps;

/// Every term of every entry in one domain, compiled and ready to scan.
///
/// The scanner itself is immutable; each scan accumulates into an index owned
/// by the caller, so one scanner can serve many documents at once.
#[derive(Debug, Clone)]
pub struct DictionaryScanner {
    domain: String,
    entry_count: usize,
    matchers: Vec<TermMatcher>,
}

impl DictionaryScanner {
    pub fn new(lexicon: &Lexicon, domain: &str) -> Result<Self, MatcherError> {
        Self::from_entries(lexicon.entries(), domain)
    }

    /// Compile matchers for the entries tagged `domain`.
    ///
    /// Order follows the lexicon; within an entry, subterms come before the
    /// entry name.
    pub fn from_entries(entries: &[LexiconEntry], domain: &str) -> Result<Self, MatcherError> {
        let mut matchers = Vec::new();
        let mut entry_count = 0usize;
        for entry in entries.iter().filter(|e| e.has_domain(domain)) {
            entry_count += 1;
            for term in entry.terms() {
                matchers.push(TermMatcher::new(term)?);
            }
        }
        for matcher in &matchers {
            trace!("{:?} -> {:?}", matcher.expression(), matcher.pattern());
        }
        debug!(
            "compiled {} term matchers for {} entries in domain {}",
            matchers.len(),
            entry_count,
            domain
        );
        Ok(Self {
            domain: domain.to_string(),
            entry_count,
            matchers,
        })
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Entries that passed the domain filter.
    pub fn entry_count(&self) -> usize {
        self.entry_count
    }

    /// Compiled terms (subterms plus names).
    pub fn term_count(&self) -> usize {
        self.matchers.len()
    }

    /// Append every match of every term to `results`, without resolving overlaps.
    pub fn accumulate(&self, text: &str, results: &mut ResultsIndex) {
        for matcher in &self.matchers {
            results.record_matches(matcher.find_all(text));
        }
    }

    /// Accumulate into `results`, then resolve overlaps once over the whole index.
    ///
    /// `results` keeps the unresolved matches; the resolved index is returned.
    pub fn scan_into(&self, text: &str, results: &mut ResultsIndex) -> ResultsIndex {
        self.accumulate(text, results);
        let resolved = resolve_overlaps(results);
        debug!(
            "kept {} of {} spans under {} surface forms",
            resolved.span_count(),
            results.span_count(),
            resolved.len()
        );
        resolved
    }

    /// Scan a document into a fresh index.
    pub fn scan(&self, text: &str) -> ResultsIndex {
        let mut results = ResultsIndex::new();
        self.scan_into(text, &mut results)
    }
}

/// One-shot scan of `entries` for `domain`, accumulating into `results`.
pub fn search_lexicon(
    entries: &[LexiconEntry],
    text: &str,
    results: &mut ResultsIndex,
    domain: &str,
) -> Result<ResultsIndex, MatcherError> {
    let scanner = DictionaryScanner::from_entries(entries, domain)?;
    Ok(scanner.scan_into(text, results))
}

#[cfg(test)]
mod tests {
    use lexicon_types::{DEFAULT_DOMAIN, GENERAL_DOMAIN, Span, char_slice};

    use super::*;
    use crate::brat::render_annotations;

    fn entry(name: &str, domain: &str) -> LexiconEntry {
        LexiconEntry::new(name).with_domain(domain)
    }

    #[test]
    fn finds_base_and_plural_forms() {
        let entries = vec![entry("arbitraje", "Lab.")];
        let text = "El arbitraje laboral fue exitoso. Hubo arbitrajes previos.";
        let mut results = ResultsIndex::new();
        let resolved = search_lexicon(&entries, text, &mut results, DEFAULT_DOMAIN).unwrap();

        let keys: Vec<&str> = resolved.keys().collect();
        assert_eq!(keys, vec!["arbitraje", "arbitrajes"]);
        assert_eq!(resolved.get("arbitraje"), Some(&[Span::new(3, 12)][..]));
        assert_eq!(resolved.get("arbitrajes"), Some(&[Span::new(39, 49)][..]));
    }

    #[test]
    fn skips_entries_outside_the_domain() {
        let entries = vec![entry("ley", GENERAL_DOMAIN), entry("huelga", "Lab.")];
        let scanner = DictionaryScanner::from_entries(&entries, "Lab.").unwrap();
        assert_eq!(scanner.entry_count(), 1);
        assert_eq!(scanner.term_count(), 1);

        let resolved = scanner.scan("La ley regula la huelga.");
        let keys: Vec<&str> = resolved.keys().collect();
        assert_eq!(keys, vec!["huelga"]);

        let general = DictionaryScanner::from_entries(&entries, GENERAL_DOMAIN).unwrap();
        let keys: Vec<String> = general
            .scan("La ley regula la huelga.")
            .keys()
            .map(str::to_string)
            .collect();
        assert_eq!(keys, vec!["ley"]);
    }

    #[test]
    fn subterms_are_scanned_before_the_name() {
        let entries = vec![
            LexiconEntry::new("despido")
                .with_subterm("despido colectivo")
                .with_domain("Lab."),
        ];
        let text = "Un despido colectivo no es un despido individual.";
        let mut results = ResultsIndex::new();
        let scanner = DictionaryScanner::from_entries(&entries, "Lab.").unwrap();
        scanner.accumulate(text, &mut results);

        let keys: Vec<&str> = results.keys().collect();
        assert_eq!(keys, vec!["despido colectivo", "despido"]);
        assert_eq!(
            results.get("despido"),
            Some(&[Span::new(3, 10), Span::new(30, 37)][..])
        );

        // The bare "despido" inside "despido colectivo" is dropped.
        let resolved = resolve_overlaps(&results);
        assert_eq!(resolved.get("despido colectivo"), Some(&[Span::new(3, 20)][..]));
        assert_eq!(resolved.get("despido"), Some(&[Span::new(30, 37)][..]));
    }

    #[test]
    fn scan_into_leaves_raw_matches_in_the_caller_index() {
        let entries = vec![
            LexiconEntry::new("convenio")
                .with_subterm("convenio colectivo")
                .with_domain("Lab."),
        ];
        let mut results = ResultsIndex::new();
        let resolved = search_lexicon(
            &entries,
            "El convenio colectivo vigente.",
            &mut results,
            "Lab.",
        )
        .unwrap();
        assert_eq!(results.span_count(), 2);
        assert_eq!(resolved.span_count(), 1);
        assert_eq!(resolved.get("convenio"), Some(&[][..]));
    }

    #[test]
    fn unrelated_entries_merge_on_identical_surface_form() {
        let entries = vec![
            LexiconEntry::new("parte").with_domain("Lab."),
            LexiconEntry::new("partes").with_domain("Lab."),
        ];
        let resolved = DictionaryScanner::from_entries(&entries, "Lab.")
            .unwrap()
            .scan("Las partes firmaron.");
        // Both entries match "partes" at the same place; one key, two spans.
        assert_eq!(resolved.len(), 1);
        assert_eq!(
            resolved.get("partes"),
            Some(&[Span::new(4, 10), Span::new(4, 10)][..])
        );
    }

    #[test]
    fn padded_name_matches_only_before_another_word() {
        let entries = vec![entry("despido ", "Lab.")];
        let mut results = ResultsIndex::new();
        let resolved =
            search_lexicon(&entries, "El despido colectivo.", &mut results, "Lab.").unwrap();
        assert_eq!(resolved.get("despido "), Some(&[Span::new(3, 11)][..]));
        assert_eq!(
            render_annotations(&resolved),
            "T1\tconcept 3 11\tdespido\n"
        );

        let mut results = ResultsIndex::new();
        let resolved = search_lexicon(&entries, "Un despido.", &mut results, "Lab.").unwrap();
        assert_eq!(resolved.span_count(), 0);
    }

    #[test]
    fn surviving_spans_slice_back_to_their_key() {
        let entries = vec![
            LexiconEntry::new("trabajador")
                .with_subterm("trabajador autónomo")
                .with_domain("Lab."),
            entry("salario", "Lab."),
            entry("jornada", "Lab."),
        ];
        let text = "Cada Trabajador Autónomo fija su jornada; los trabajadores cobran salarios.";
        let resolved = DictionaryScanner::from_entries(&entries, "Lab.")
            .unwrap()
            .scan(text);
        assert!(resolved.span_count() >= 4);
        for (surface, span) in resolved.pairs() {
            assert_eq!(char_slice(text, span), Some(surface));
        }
    }
}
