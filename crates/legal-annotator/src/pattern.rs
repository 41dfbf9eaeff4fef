use lexicon_morphy::expression_forms;

/// Regex-escaped alternatives for `expression`, one per inflected form.
///
/// One word gives its base and plural form. Several words give exactly two
/// patterns (all singular, all plural), never the mixed combinations.
pub fn build_patterns(expression: &str) -> Vec<String> {
    expression_forms(expression)
        .iter()
        .map(|form| regex::escape(form))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_word_yields_base_and_plural() {
        assert_eq!(build_patterns("arbitraje"), vec!["arbitraje", "arbitrajes"]);
        assert_eq!(build_patterns("juez"), vec!["juez", "jueces"]);
    }

    #[test]
    fn multiword_pairs_positionally() {
        let patterns = build_patterns("mesa redonda");
        assert_eq!(patterns, vec!["mesa redonda", "mesas redondas"]);
        assert!(!patterns.contains(&"mesa redondas".to_string()));
    }

    #[test]
    fn metacharacters_are_escaped() {
        assert_eq!(build_patterns("art."), vec![r"art\.", r"art\.es"]);
        assert_eq!(build_patterns("(a)"), vec![r"\(a\)", r"\(a\)es"]);
    }

    #[test]
    fn empty_expression_has_no_patterns() {
        assert!(build_patterns("").is_empty());
    }
}
