use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::brat::{ANNOTATION_EXTENSION, write_annotations};
use crate::scanner::DictionaryScanner;

/// Extension of the documents picked up from the input directory.
pub const DOCUMENT_EXTENSION: &str = "txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub annotations: usize,
}

/// Regular `.txt` files directly inside `dir`, sorted by path.
pub fn discover_documents(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut docs = Vec::new();
    for entry in
        fs::read_dir(dir).with_context(|| format!("read input directory {}", dir.display()))?
    {
        let path = entry
            .with_context(|| format!("list input directory {}", dir.display()))?
            .path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == DOCUMENT_EXTENSION) {
            docs.push(path);
        }
    }
    docs.sort();
    Ok(docs)
}

/// `<output_dir>/<input stem>.ann`
pub fn annotation_path(output_dir: &Path, input: &Path) -> PathBuf {
    let mut name = input.file_stem().unwrap_or(input.as_os_str()).to_os_string();
    name.push(".");
    name.push(ANNOTATION_EXTENSION);
    output_dir.join(name)
}

/// Annotate one document and write its `.ann` file.
///
/// The results index lives and dies inside this call.
pub fn annotate_document(
    scanner: &DictionaryScanner,
    input: &Path,
    output_dir: &Path,
) -> Result<DocumentReport> {
    let text =
        fs::read_to_string(input).with_context(|| format!("read document {}", input.display()))?;
    let resolved = scanner.scan(&text);

    let output = annotation_path(output_dir, input);
    let file =
        File::create(&output).with_context(|| format!("create {}", output.display()))?;
    let annotations = write_annotations(&resolved, BufWriter::new(file))
        .with_context(|| format!("write {}", output.display()))?;

    Ok(DocumentReport {
        input: input.to_path_buf(),
        output,
        annotations,
    })
}

/// Annotate every `.txt` document in `input_dir` into `output_dir`.
pub fn annotate_directory(
    scanner: &DictionaryScanner,
    input_dir: &Path,
    output_dir: &Path,
) -> Result<Vec<DocumentReport>> {
    let docs = discover_documents(input_dir)?;
    if docs.is_empty() {
        warn!("no .{} documents found in {}", DOCUMENT_EXTENSION, input_dir.display());
    }

    let start = Instant::now();
    let mut reports = Vec::with_capacity(docs.len());
    for doc in docs {
        let report = annotate_document(scanner, &doc, output_dir)?;
        info!(
            "{} -> {} ({} annotations)",
            report.input.display(),
            report.output.display(),
            report.annotations
        );
        reports.push(report);
    }
    info!(
        "annotated {} documents in {} ms",
        reports.len(),
        start.elapsed().as_millis()
    );
    Ok(reports)
}
