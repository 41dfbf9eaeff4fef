pub mod brat;
pub mod corpus;
pub mod handlers;
pub mod index;
pub mod matcher;
pub mod overlap;
pub mod pattern;
pub mod scanner;

pub use brat::{
    ANNOTATION_EXTENSION, AnnotationRecord, CONCEPT_CATEGORY, annotation_records,
    render_annotations, write_annotations,
};
pub use corpus::{DocumentReport, annotate_directory, annotate_document, discover_documents};
pub use handlers::{AppState, router};
pub use index::ResultsIndex;
pub use matcher::{MatcherError, TermMatcher, find_matches};
pub use overlap::resolve_overlaps;
pub use pattern::build_patterns;
pub use scanner::{DictionaryScanner, search_lexicon};
