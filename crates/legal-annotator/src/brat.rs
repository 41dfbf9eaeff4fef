//! Standoff output in the brat `.ann` text-bound format.
//!
//! One line per kept span: `T<n>\tconcept <start> <end>\t<text>`. Identifiers
//! start at 1 and follow index key order, then span order within a key.

use std::fmt;
use std::io::{self, Write};

use lexicon_types::Span;
use serde::Serialize;

use crate::index::ResultsIndex;

/// Category written for every annotation.
pub const CONCEPT_CATEGORY: &str = "concept";

/// Extension of the annotation file written next to each document.
pub const ANNOTATION_EXTENSION: &str = "ann";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotationRecord {
    pub id: String,
    pub category: &'static str,
    pub start: usize,
    pub end: usize,
    pub text: String,
}

impl AnnotationRecord {
    fn new(number: usize, span: Span, surface: &str) -> Self {
        Self {
            id: format!("T{number}"),
            category: CONCEPT_CATEGORY,
            start: span.start,
            end: span.end,
            text: surface.trim().to_string(),
        }
    }
}

impl fmt::Display for AnnotationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{} {} {}\t{}",
            self.id, self.category, self.start, self.end, self.text
        )
    }
}

pub fn annotation_records(index: &ResultsIndex) -> Vec<AnnotationRecord> {
    index
        .pairs()
        .enumerate()
        .map(|(idx, (surface, span))| AnnotationRecord::new(idx + 1, span, surface))
        .collect()
}

/// Write one line per record to `out`, returning how many were written.
pub fn write_annotations<W: Write>(index: &ResultsIndex, mut out: W) -> io::Result<usize> {
    let records = annotation_records(index);
    for record in &records {
        writeln!(out, "{record}")?;
    }
    out.flush()?;
    Ok(records.len())
}

pub fn render_annotations(index: &ResultsIndex) -> String {
    let mut out = String::new();
    for record in annotation_records(index) {
        out.push_str(&record.to_string());
        out.push('\n');
    }
    out
}
