//! Format-aware text extraction
//!
//! Every supported format turns a file into records the matcher can scan.
//! The extractor is chosen from the file extension; anything unknown is read
//! as plain text.
mod docx;
mod pdf;
mod spreadsheet;
mod text;

pub use docx::WordDocumentExtractor;
pub use pdf::PdfExtractor;
pub use spreadsheet::SpreadsheetExtractor;
pub use text::PlainTextExtractor;

use crate::error::{DocgrepError, Result};
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

/// An addressable unit of text inside a line- or paragraph-oriented file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRecord {
    /// 1-based position within the file
    pub index: usize,
    pub content: String,
}

/// The searchable text of one PDF page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    /// 1-based page number
    pub page: usize,
    pub segments: Vec<String>,
}

/// A non-empty spreadsheet cell, already stringified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellRecord {
    pub sheet: String,
    pub value: String,
}

/// Records extracted from a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extracted {
    Lines(Vec<TextRecord>),
    Paragraphs(Vec<TextRecord>),
    Pages(Vec<PageText>),
    Cells(Vec<CellRecord>),
}

impl Extracted {
    pub fn record_count(&self) -> usize {
        match self {
            Extracted::Lines(records) | Extracted::Paragraphs(records) => records.len(),
            Extracted::Pages(pages) => pages.iter().map(|p| p.segments.len()).sum(),
            Extracted::Cells(cells) => cells.len(),
        }
    }
}

/// Turns a file into records.
pub trait Extractor: Send + Sync {
    fn name(&self) -> &'static str;
    fn extract(&self, path: &Path) -> Result<Extracted>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtractorKind {
    PlainText,
    Pdf,
    WordDocument,
    Spreadsheet,
}

lazy_static! {
    static ref EXTRACTORS_BY_EXTENSION: HashMap<&'static str, ExtractorKind> = {
        let mut table = HashMap::new();
        table.insert("pdf", ExtractorKind::Pdf);
        table.insert("docx", ExtractorKind::WordDocument);
        for ext in ["xlsx", "xlsm", "xlsb", "xls", "ods"] {
            table.insert(ext, ExtractorKind::Spreadsheet);
        }
        table
    };
}

static PLAIN_TEXT: PlainTextExtractor = PlainTextExtractor;
static PDF: PdfExtractor = PdfExtractor;
static WORD_DOCUMENT: WordDocumentExtractor = WordDocumentExtractor;
static SPREADSHEET: SpreadsheetExtractor = SpreadsheetExtractor;

impl ExtractorKind {
    /// Picks the extractor for `path` by its (case-insensitive) extension.
    pub fn for_path(path: &Path) -> Self {
        path.extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .and_then(|ext| EXTRACTORS_BY_EXTENSION.get(ext.as_str()).copied())
            .unwrap_or(ExtractorKind::PlainText)
    }

    pub fn extractor(self) -> &'static dyn Extractor {
        match self {
            ExtractorKind::PlainText => &PLAIN_TEXT,
            ExtractorKind::Pdf => &PDF,
            ExtractorKind::WordDocument => &WORD_DOCUMENT,
            ExtractorKind::Spreadsheet => &SPREADSHEET,
        }
    }
}

/// Extracts `path` with the extractor its extension selects.
///
/// Failures are wrapped in [`DocgrepError::FileProcessing`] so the message
/// carries the offending path.
pub fn extract_file(path: &Path) -> Result<Extracted> {
    extract_with(ExtractorKind::for_path(path).extractor(), path)
}

/// Runs `extractor` on `path`, turning a panic inside a format parser into an
/// ordinary per-file error.
fn extract_with(extractor: &dyn Extractor, path: &Path) -> Result<Extracted> {
    log::debug!("Extracting {} as {}", path.display(), extractor.name());
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| extractor.extract(path)));
    let extracted = match outcome {
        Ok(result) => result,
        Err(payload) => {
            let panic_msg = if let Some(s) = payload.downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = payload.downcast_ref::<String>() {
                s.clone()
            } else {
                "unknown panic".to_string()
            };
            log::warn!(
                "{} extractor panicked on {}: {panic_msg}",
                extractor.name(),
                path.display()
            );
            Err(DocgrepError::Other(format!(
                "{} parser panicked: {panic_msg}",
                extractor.name()
            )))
        }
    }
    .map_err(|e| DocgrepError::FileProcessing {
        path: path.to_path_buf(),
        source: Box::new(e),
    })?;
    log::debug!("{} records in {}", extracted.record_count(), path.display());
    Ok(extracted)
}
