//! Substring matching and context-window assembly
use super::{MatchHit, MatchLabel};
use crate::extract::{Extracted, TextRecord};
use memchr::memmem::Finder;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Number of records kept before and after each match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextWindow {
    pub before: usize,
    pub after: usize,
}

impl Default for ContextWindow {
    fn default() -> Self {
        Self {
            before: 2,
            after: 2,
        }
    }
}

impl ContextWindow {
    pub fn new(before: usize, after: usize) -> Self {
        Self { before, after }
    }

    /// Indices of the window around `index` in a sequence of `len` records,
    /// clamped to the sequence bounds.
    pub fn bounds(&self, index: usize, len: usize) -> RangeInclusive<usize> {
        debug_assert!(index < len);
        let start = index.saturating_sub(self.before);
        let end = index.saturating_add(self.after).min(len - 1);
        start..=end
    }
}

/// Case-aware substring matcher.
///
/// A record matches when it contains the query as a contiguous substring.
/// Matching is per record: several occurrences in one record give one hit.
pub struct Matcher {
    finder: Finder<'static>,
    case_sensitive: bool,
}

impl Matcher {
    pub fn new(query: &str, case_sensitive: bool) -> Self {
        let needle = if case_sensitive {
            query.to_string()
        } else {
            query.to_lowercase()
        };
        Self {
            finder: Finder::new(needle.as_bytes()).into_owned(),
            case_sensitive,
        }
    }

    pub fn is_match(&self, text: &str) -> bool {
        if self.case_sensitive {
            self.finder.find(text.as_bytes()).is_some()
        } else {
            self.finder.find(text.to_lowercase().as_bytes()).is_some()
        }
    }

    pub fn find_hits(&self, extracted: &Extracted, window: ContextWindow) -> Vec<MatchHit> {
        match extracted {
            Extracted::Lines(records) => self.windowed_records(records, window, MatchLabel::Line),
            Extracted::Paragraphs(records) => {
                self.windowed_records(records, window, MatchLabel::Paragraph)
            }
            Extracted::Pages(pages) => pages
                .iter()
                .flat_map(|page| {
                    self.windowed(&page.segments, window, |segment| segment.as_str())
                        .into_iter()
                        .map(move |(_, context)| MatchHit {
                            label: MatchLabel::Page(page.page),
                            context,
                        })
                })
                .collect(),
            Extracted::Cells(cells) => cells
                .iter()
                .filter(|cell| self.is_match(&cell.value))
                .map(|cell| MatchHit {
                    label: MatchLabel::Sheet(cell.sheet.clone()),
                    context: cell.value.clone(),
                })
                .collect(),
        }
    }

    fn windowed_records(
        &self,
        records: &[TextRecord],
        window: ContextWindow,
        label: fn(usize) -> MatchLabel,
    ) -> Vec<MatchHit> {
        self.windowed(records, window, |record| record.content.as_str())
            .into_iter()
            .map(|(i, context)| MatchHit {
                label: label(records[i].index),
                context,
            })
            .collect()
    }

    /// Position and joined context of every matching item. Windows of nearby
    /// matches may overlap; each match keeps its own.
    fn windowed<'a, T>(
        &self,
        items: &'a [T],
        window: ContextWindow,
        text: impl Fn(&'a T) -> &'a str,
    ) -> Vec<(usize, String)> {
        items
            .iter()
            .enumerate()
            .filter(|(_, item)| self.is_match(text(*item)))
            .map(|(i, _)| {
                let context = items[window.bounds(i, items.len())]
                    .iter()
                    .map(&text)
                    .collect::<Vec<_>>()
                    .join("\n");
                (i, context)
            })
            .collect()
    }
}

/// One-shot form of [`Matcher::find_hits`].
pub fn find_matches(
    extracted: &Extracted,
    query: &str,
    case_sensitive: bool,
    before: usize,
    after: usize,
) -> Vec<MatchHit> {
    Matcher::new(query, case_sensitive).find_hits(extracted, ContextWindow::new(before, after))
}
