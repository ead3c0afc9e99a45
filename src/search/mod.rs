//! Cross-format search engine with per-match context windows
pub mod cancel;
pub mod engine;
pub mod matcher;

use crate::error::{DocgrepError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub use cancel::CancellationToken;
pub use engine::{search, search_with, spawn_search, SearchEvent, SearchHandle};
pub use matcher::{find_matches, ContextWindow, Matcher};

/// Allow-list of file extensions, normalized to `.ext` lower case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtensionFilter {
    #[default]
    All,
    Only(Vec<String>),
}

impl ExtensionFilter {
    /// Parses a comma separated list such as `"txt, .MD"`. `*` or an empty
    /// string means every file.
    pub fn parse(spec: &str) -> Self {
        let mut extensions = Vec::new();
        for token in spec.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            if token == "*" {
                return ExtensionFilter::All;
            }
            let normalized = format!(".{}", token.trim_start_matches('.')).to_lowercase();
            if !extensions.contains(&normalized) {
                extensions.push(normalized);
            }
        }
        if extensions.is_empty() {
            ExtensionFilter::All
        } else {
            ExtensionFilter::Only(extensions)
        }
    }

    pub fn matches(&self, path: &Path) -> bool {
        match self {
            ExtensionFilter::All => true,
            ExtensionFilter::Only(extensions) => {
                let Some(name) = path.file_name() else {
                    return false;
                };
                let name = name.to_string_lossy().to_lowercase();
                extensions.iter().any(|ext| name.ends_with(ext.as_str()))
            }
        }
    }
}

impl FromStr for ExtensionFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for ExtensionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtensionFilter::All => write!(f, "*"),
            ExtensionFilter::Only(extensions) => write!(f, "{}", extensions.join(",")),
        }
    }
}

/// Search configuration
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub root: PathBuf,
    pub query: String,
    pub extensions: ExtensionFilter,
    pub case_sensitive: bool,
    pub recursive: bool,
    pub context: ContextWindow,
    pub respect_ignore_files: bool,
}

impl SearchConfig {
    pub fn new(root: impl Into<PathBuf>, query: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            query: query.into(),
            extensions: ExtensionFilter::All,
            case_sensitive: false,
            recursive: true,
            context: ContextWindow::default(),
            respect_ignore_files: false,
        }
    }

    pub fn extensions(mut self, extensions: ExtensionFilter) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn context(mut self, before: usize, after: usize) -> Self {
        self.context = ContextWindow { before, after };
        self
    }

    pub fn respect_ignore_files(mut self, respect: bool) -> Self {
        self.respect_ignore_files = respect;
        self
    }

    /// Rejects configurations that cannot start a search.
    pub fn validate(&self) -> Result<()> {
        if self.query.is_empty() {
            return Err(DocgrepError::InvalidInput(
                "search text must not be empty".to_string(),
            ));
        }
        if !self.root.is_dir() {
            return Err(DocgrepError::InvalidInput(format!(
                "'{}' is not a directory",
                self.root.display()
            )));
        }
        std::fs::read_dir(&self.root).map_err(|e| {
            DocgrepError::InvalidInput(format!("cannot read '{}': {e}", self.root.display()))
        })?;
        Ok(())
    }
}

/// Where a match sits inside its file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum MatchLabel {
    Line(usize),
    Paragraph(usize),
    Page(usize),
    Sheet(String),
}

impl fmt::Display for MatchLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchLabel::Line(n) => write!(f, "Line {n}"),
            MatchLabel::Paragraph(n) => write!(f, "Paragraph {n}"),
            MatchLabel::Page(n) => write!(f, "Page {n}"),
            MatchLabel::Sheet(name) => write!(f, "Sheet {name}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchHit {
    pub label: MatchLabel,
    pub context: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileResult {
    pub path: PathBuf,
    pub hits: Vec<MatchHit>,
}

/// A file that could not be searched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDiagnostic {
    pub path: PathBuf,
    pub message: String,
}

/// Search result with aggregate counts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSummary {
    pub results: Vec<FileResult>,
    pub files_scanned: usize,
    pub total_matches: usize,
    pub cancelled: bool,
    pub diagnostics: Vec<FileDiagnostic>,
}

impl SearchSummary {
    pub fn files_matched(&self) -> usize {
        self.results.len()
    }
}
