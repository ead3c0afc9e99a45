use super::{Extracted, Extractor, PageText};
use crate::error::Result;
use log::{debug, warn};
use lopdf::Document as PdfDocument;
use std::path::Path;

/// Pages with fewer line segments than this are split into sentences.
const MIN_LINE_SEGMENTS: usize = 3;

pub struct PdfExtractor;

impl Extractor for PdfExtractor {
    fn name(&self) -> &'static str {
        "pdf"
    }

    fn extract(&self, path: &Path) -> Result<Extracted> {
        let doc = PdfDocument::load(path)?;
        let mut pages = Vec::new();

        for page_number in doc.get_pages().into_keys() {
            let text = match doc.extract_text(&[page_number]) {
                Ok(text) => text,
                Err(e) => {
                    warn!(
                        "Skipping page {page_number} of {}: {e}",
                        path.display()
                    );
                    continue;
                }
            };
            if text.trim().is_empty() {
                debug!("No text on page {page_number} of {}", path.display());
                continue;
            }
            pages.push(PageText {
                page: page_number as usize,
                segments: segment_page(&text),
            });
        }

        Ok(Extracted::Pages(pages))
    }
}

/// Splits a page into searchable segments.
///
/// Extracted PDF text often comes without line breaks; in that case the page
/// is cut at `". "` so a whole page never becomes a single record.
pub(crate) fn segment_page(text: &str) -> Vec<String> {
    let lines: Vec<String> = text.replace('\r', "\n").split('\n').map(str::to_string).collect();
    if lines.len() < MIN_LINE_SEGMENTS {
        text.split(". ").map(str::to_string).collect()
    } else {
        lines
    }
}
