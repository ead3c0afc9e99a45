//! Core search engine implementation
use super::{
    CancellationToken, FileDiagnostic, FileResult, Matcher, SearchConfig, SearchSummary,
};
use crate::error::{DocgrepError, Result};
use crate::extract::extract_file;
use crate::walker::walk_dir;
use crossbeam_channel::{unbounded, Receiver};
use log::{debug, info, warn};
use std::path::PathBuf;
use std::thread::{self, JoinHandle};
use std::time::Instant;

/// Progress notifications emitted while a search runs, in traversal order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    /// A file passed the extension filter and is about to be searched.
    FileScanned(PathBuf),
    FileMatched(FileResult),
    FileFailed(FileDiagnostic),
}

/// Runs a blocking search and returns the aggregated summary.
pub fn search(config: &SearchConfig, cancel: &CancellationToken) -> Result<SearchSummary> {
    search_with(config, cancel, |_| {})
}

/// Like [`search`], reporting each step to `on_event` as it happens.
///
/// The cancellation token is checked before every directory entry, so a
/// cancelled search stops before the next file or subdirectory and returns
/// what it has collected so far.
pub fn search_with<F>(
    config: &SearchConfig,
    cancel: &CancellationToken,
    mut on_event: F,
) -> Result<SearchSummary>
where
    F: FnMut(SearchEvent),
{
    config.validate()?;

    let start = Instant::now();
    let matcher = Matcher::new(&config.query, config.case_sensitive);
    let mut summary = SearchSummary::default();
    info!(
        "Searching {} for {:?} (extensions: {}, recursive: {})",
        config.root.display(),
        config.query,
        config.extensions,
        config.recursive
    );

    for entry in walk_dir(&config.root, config.recursive, config.respect_ignore_files) {
        if cancel.is_cancelled() {
            info!("Search cancelled after {} files", summary.files_scanned);
            summary.cancelled = true;
            break;
        }

        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry: {e}");
                continue;
            }
        };
        let path = entry.path();

        if entry.file_type().is_some_and(|t| t.is_dir()) {
            debug!("Descending into {}", path.display());
            continue;
        }
        if !path.is_file() {
            continue;
        }
        if !config.extensions.matches(path) {
            debug!("Skipping file with non-matching extension: {}", path.display());
            continue;
        }

        summary.files_scanned += 1;
        on_event(SearchEvent::FileScanned(path.to_path_buf()));

        let hits = match extract_file(path) {
            Ok(extracted) => matcher.find_hits(&extracted, config.context),
            Err(e) => {
                warn!("{e}");
                let diagnostic = FileDiagnostic {
                    path: path.to_path_buf(),
                    message: diagnostic_message(&e),
                };
                on_event(SearchEvent::FileFailed(diagnostic.clone()));
                summary.diagnostics.push(diagnostic);
                continue;
            }
        };

        if !hits.is_empty() {
            summary.total_matches += hits.len();
            let result = FileResult {
                path: path.to_path_buf(),
                hits,
            };
            on_event(SearchEvent::FileMatched(result.clone()));
            summary.results.push(result);
        }
    }

    info!(
        "Search finished in {:.2?}: {} files scanned, {} matches in {} files",
        start.elapsed(),
        summary.files_scanned,
        summary.total_matches,
        summary.files_matched()
    );
    Ok(summary)
}

fn diagnostic_message(err: &DocgrepError) -> String {
    match err {
        DocgrepError::FileProcessing { source, .. } => source.to_string(),
        other => other.to_string(),
    }
}

/// A search running on its own thread.
pub struct SearchHandle {
    events: Receiver<SearchEvent>,
    handle: JoinHandle<Result<SearchSummary>>,
    cancel: CancellationToken,
}

impl SearchHandle {
    /// Events as they are produced. The channel closes when the search ends.
    pub fn events(&self) -> &Receiver<SearchEvent> {
        &self.events
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Waits for the search to finish.
    pub fn join(self) -> Result<SearchSummary> {
        self.handle
            .join()
            .map_err(|_| DocgrepError::Other("search thread panicked".to_string()))?
    }
}

/// Starts `config` on a background thread so the caller stays free to show
/// progress or cancel.
pub fn spawn_search(config: SearchConfig, cancel: CancellationToken) -> SearchHandle {
    let (tx, rx) = unbounded();
    let worker_cancel = cancel.clone();
    let handle = thread::spawn(move || {
        search_with(&config, &worker_cancel, |event| {
            // The receiver may be gone; the summary is still returned by join.
            let _ = tx.send(event);
        })
    });

    SearchHandle {
        events: rx,
        handle,
        cancel,
    }
}
