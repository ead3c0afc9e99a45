use super::{Extracted, Extractor, TextRecord};
use crate::error::Result;
use std::fs;
use std::path::Path;

const UTF8_BOM: char = '\u{feff}';

/// Line-oriented reader for everything that is not a recognised document.
///
/// Decoding is lossy: invalid UTF-8 becomes U+FFFD instead of failing, so
/// binary files produce garbage lines rather than errors.
pub struct PlainTextExtractor;

impl Extractor for PlainTextExtractor {
    fn name(&self) -> &'static str {
        "text"
    }

    fn extract(&self, path: &Path) -> Result<Extracted> {
        let bytes = fs::read(path)?;
        Ok(Extracted::Lines(lines_from_bytes(&bytes)))
    }
}

pub(crate) fn lines_from_bytes(bytes: &[u8]) -> Vec<TextRecord> {
    let decoded = String::from_utf8_lossy(bytes);
    let text: &str = decoded.strip_prefix(UTF8_BOM).unwrap_or(&decoded);
    text.lines()
        .enumerate()
        .map(|(i, line)| TextRecord {
            index: i + 1,
            content: line.to_string(),
        })
        .collect()
}
