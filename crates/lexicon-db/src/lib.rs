//! Load a JSON legal dictionary and validate it once, up front.
//!
//! The on-disk file is an array of loosely-typed records:
//!
//! ```json
//! [
//!   {
//!     "Name": "despido",
//!     "SubLemas": [{ "Text": "despido colectivo" }],
//!     "Body": [{ "Type": "Lab.", "Definition": "..." }]
//!   }
//! ]
//! ```
//!
//! `SubLemas` is optional and every field of a `Body` record other than
//! `Type` is ignored. Each record becomes a [`LexiconEntry`]; a record missing
//! `Name`, `Body`, a `Body[].Type` or a `SubLemas[].Text` rejects the whole
//! file with [`LexiconError::MissingField`]. There is no partial recovery.
//!
//! Callers choose between memory-mapped files or owned buffers at runtime via
//! [`LoadMode`]; either way the parsed lexicon owns its strings and the
//! backing buffer is dropped after parsing.
//!
//! # Example
//! ```no_run
//! use lexicon_db::{Lexicon, LoadMode};
//!
//! # fn main() -> Result<(), lexicon_db::LexiconError> {
//! let lexicon = Lexicon::load_with_mode("/path/to/LemasInfo-dje.json", LoadMode::Mmap)?;
//! for entry in lexicon.entries_for_domain("Lab.") {
//!     println!("{} ({} subterms)", entry.name, entry.subterms.len());
//! }
//! # Ok(()) }
//! ```
//!
//! For a runnable demo, see `cargo run -p lexicon-db --example stats -- <lexicon>`.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use lexicon_types::LexiconEntry;
use memmap2::Mmap;
use serde::Deserialize;
use thiserror::Error;

/// File name looked up when the lexicon path is a directory.
pub const DEFAULT_LEXICON_FILE: &str = "LemasInfo-dje.json";

/// Strategy for reading the lexicon file.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LoadMode {
    /// Memory-map the file and parse straight from the mapping.
    Mmap,
    /// Read the file into an owned buffer (portable fallback).
    Owned,
}

/// Fields a lexicon record must carry.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Field {
    Name,
    Body,
    BodyType,
    SubLemaText,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Field::Name => "Name",
            Field::Body => "Body",
            Field::BodyType => "Body[].Type",
            Field::SubLemaText => "SubLemas[].Text",
        })
    }
}

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("failed to read lexicon {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed lexicon JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("lexicon entry {entry} is missing required field {field}")]
    MissingField { entry: usize, field: Field },
}

enum Buffer {
    Mmap(Mmap),
    Owned(Vec<u8>),
}

impl Buffer {
    fn as_slice(&self) -> &[u8] {
        match self {
            Buffer::Mmap(m) => m.as_ref(),
            Buffer::Owned(v) => v.as_slice(),
        }
    }
}

#[derive(Deserialize)]
struct RawEntry {
    #[serde(rename = "Name")]
    name: Option<String>,
    #[serde(rename = "SubLemas", default)]
    sub_lemas: Option<Vec<RawSubLema>>,
    #[serde(rename = "Body")]
    body: Option<Vec<RawBody>>,
}

#[derive(Deserialize)]
struct RawSubLema {
    #[serde(rename = "Text")]
    text: Option<String>,
}

#[derive(Deserialize)]
struct RawBody {
    #[serde(rename = "Type")]
    kind: Option<String>,
}

/// Validated, read-only dictionary.
#[derive(Clone, Debug, Default)]
pub struct Lexicon {
    entries: Vec<LexiconEntry>,
}

impl Lexicon {
    /// Load a lexicon file, memory-mapping it.
    ///
    /// `path` may also be a directory holding [`DEFAULT_LEXICON_FILE`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LexiconError> {
        Self::load_with_mode(path, LoadMode::Mmap)
    }

    /// Load a lexicon choosing between mmap and owned buffers at runtime.
    pub fn load_with_mode(path: impl AsRef<Path>, mode: LoadMode) -> Result<Self, LexiconError> {
        let path = resolve_path(path.as_ref());
        let buffer = load_file(&path, mode)?;
        Self::from_slice(buffer.as_slice())
    }

    /// Parse and validate lexicon JSON already in memory.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, LexiconError> {
        let raw: Vec<RawEntry> = serde_json::from_slice(bytes)?;
        let entries = raw
            .into_iter()
            .enumerate()
            .map(|(idx, entry)| validate(idx, entry))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { entries })
    }

    /// Wrap entries that were validated elsewhere.
    pub fn from_entries(entries: Vec<LexiconEntry>) -> Self {
        Self { entries }
    }

    /// All entries in file order.
    pub fn entries(&self) -> &[LexiconEntry] {
        &self.entries
    }

    /// Entries tagged with `tag`, in file order.
    pub fn entries_for_domain<'a>(
        &'a self,
        tag: &'a str,
    ) -> impl Iterator<Item = &'a LexiconEntry> + 'a {
        self.entries.iter().filter(move |entry| entry.has_domain(tag))
    }

    /// Number of entries.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Number of subterms across all entries.
    pub fn subterm_count(&self) -> usize {
        self.entries.iter().map(|e| e.subterms.len()).sum()
    }

    /// How many entries carry each domain tag.
    pub fn domain_counts(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for tag in self.entries.iter().flat_map(|e| e.domain_tags.iter()) {
            *counts.entry(tag.as_str()).or_insert(0) += 1;
        }
        counts
    }
}

fn validate(idx: usize, raw: RawEntry) -> Result<LexiconEntry, LexiconError> {
    let missing = |field| LexiconError::MissingField { entry: idx, field };

    let name = raw.name.ok_or_else(|| missing(Field::Name))?;
    let body = raw.body.ok_or_else(|| missing(Field::Body))?;
    let domain_tags = body
        .into_iter()
        .map(|record| record.kind.ok_or_else(|| missing(Field::BodyType)))
        .collect::<Result<BTreeSet<_>, _>>()?;
    let subterms = raw
        .sub_lemas
        .unwrap_or_default()
        .into_iter()
        .map(|sub| sub.text.ok_or_else(|| missing(Field::SubLemaText)))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(LexiconEntry {
        name,
        subterms,
        domain_tags,
    })
}

fn resolve_path(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.join(DEFAULT_LEXICON_FILE)
    } else {
        path.to_path_buf()
    }
}

fn load_file(path: &Path, mode: LoadMode) -> Result<Buffer, LexiconError> {
    let io_err = |source: std::io::Error| LexiconError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut file = File::open(path).map_err(io_err)?;
    match mode {
        LoadMode::Mmap => {
            // Empty files cannot be mapped on every platform.
            if file.metadata().map_err(io_err)?.len() == 0 {
                return Ok(Buffer::Owned(Vec::new()));
            }
            unsafe { Mmap::map(&file) }.map(Buffer::Mmap).map_err(io_err)
        }
        LoadMode::Owned => {
            let mut buf = Vec::new();
            file.read_to_end(&mut buf).map_err(io_err)?;
            Ok(Buffer::Owned(buf))
        }
    }
}
