//! Content search across plain text, PDF, Word and spreadsheet files.
//!
//! ```no_run
//! use docgrep::{search, CancellationToken, ExtensionFilter, SearchConfig};
//!
//! let config = SearchConfig::new("docs", "invoice")
//!     .extensions(ExtensionFilter::parse(".pdf,.docx,.txt"))
//!     .context(1, 1);
//! let summary = search(&config, &CancellationToken::new())?;
//! for file in &summary.results {
//!     for hit in &file.hits {
//!         println!("{}: {}: {}", file.path.display(), hit.label, hit.context);
//!     }
//! }
//! # Ok::<(), docgrep::error::DocgrepError>(())
//! ```
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod output;
pub mod progress;
pub mod search;
pub mod walker;

pub use crate::error::{DocgrepError, Result};
pub use extract::{extract_file, Extracted, Extractor, ExtractorKind};
pub use search::{
    find_matches, search, search_with, spawn_search, CancellationToken, ContextWindow,
    ExtensionFilter, FileDiagnostic, FileResult, MatchHit, MatchLabel, Matcher, SearchConfig,
    SearchEvent, SearchHandle, SearchSummary,
};
pub use walker::walk_dir;
