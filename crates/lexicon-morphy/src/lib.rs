//! Suffix-rule plural generation for Spanish dictionary terms.
//!
//! Deliberately shallow: each word yields exactly two surface forms, itself
//! and one plural. There is no gender agreement, no verb morphology and no
//! irregular plural list.
//!
//! # How it works
//! 1. Walk [`PLURAL_RULES`] top to bottom; the first rule whose predicate
//!    accepts the word produces the plural.
//! 2. If none applies, append `es`.
//! 3. Multiword expressions inflect every word, then pair forms by position:
//!    all singulars together, all plurals together. Mixed forms such as
//!    "mesa redondas" are never produced.
//!
//! # Example
//! ```rust
//! use lexicon_morphy::{expression_forms, inflections};
//!
//! assert_eq!(inflections("juez"), ["juez".to_string(), "jueces".to_string()]);
//! assert_eq!(
//!     expression_forms("mesa redonda"),
//!     vec!["mesa redonda".to_string(), "mesas redondas".to_string()]
//! );
//! ```
//!
//! For a runnable demo, see `cargo run -p lexicon-morphy --example lookup -- <word>...`.

/// A single suffix rule: a predicate on the word and the plural it builds.
#[derive(Clone, Copy, Debug)]
pub struct PluralRule {
    pub name: &'static str,
    pub applies: fn(&str) -> bool,
    pub apply: fn(&str) -> String,
}

/// Name reported when no rule in [`PLURAL_RULES`] applies.
pub const DEFAULT_RULE: &str = "default";

/// Plural rules in priority order.
pub const PLURAL_RULES: &[PluralRule] = &[
    PluralRule {
        name: "vowel",
        applies: ends_with_vowel,
        apply: append_s,
    },
    PluralRule {
        name: "accented-vowel",
        applies: ends_with_accented_vowel,
        apply: replace_last_with_es,
    },
    PluralRule {
        name: "z",
        applies: ends_with_z,
        apply: replace_z_with_ces,
    },
];

/// Plural form of a single word.
pub fn plural(word: &str) -> String {
    match rule_for(word) {
        Some(rule) => (rule.apply)(word),
        None => format!("{word}es"),
    }
}

/// The base form followed by its plural.
pub fn inflections(word: &str) -> [String; 2] {
    [word.to_string(), plural(word)]
}

/// Name of the rule that decides the plural of `word`.
pub fn plural_rule_for(word: &str) -> &'static str {
    rule_for(word).map_or(DEFAULT_RULE, |rule| rule.name)
}

/// Literal surface forms for a one- or multiword expression.
///
/// A single word is inflected as written, surrounding whitespace included.
/// Longer expressions are split on any whitespace and rejoined with a single
/// space. An expression without words has no forms.
pub fn expression_forms(expression: &str) -> Vec<String> {
    let words: Vec<[String; 2]> = expression.split_whitespace().map(inflections).collect();
    match words.len() {
        0 => return Vec::new(),
        1 => return inflections(expression).into(),
        _ => {}
    }

    (0..2)
        .map(|idx| {
            words
                .iter()
                .map(|forms| forms[idx].as_str())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

fn rule_for(word: &str) -> Option<&'static PluralRule> {
    PLURAL_RULES.iter().find(|rule| (rule.applies)(word))
}

fn ends_with_vowel(word: &str) -> bool {
    word.ends_with(['a', 'e', 'i', 'o', 'u'])
}

fn ends_with_accented_vowel(word: &str) -> bool {
    word.ends_with(['á', 'é', 'í', 'ó', 'ú'])
}

fn ends_with_z(word: &str) -> bool {
    word.ends_with('z')
}

fn append_s(word: &str) -> String {
    format!("{word}s")
}

// The accent is dropped together with the vowel: "café" -> "cafes".
fn replace_last_with_es(word: &str) -> String {
    let mut chars = word.chars();
    chars.next_back();
    format!("{}es", chars.as_str())
}

fn replace_z_with_ces(word: &str) -> String {
    let stem = word.strip_suffix('z').unwrap_or(word);
    format!("{stem}ces")
}
