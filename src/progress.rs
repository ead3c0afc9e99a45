use crate::search::SearchEvent;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressStats {
    pub files_scanned: usize,
    pub files_matched: usize,
    pub matches_found: usize,
    pub failures: usize,
}

/// Spinner on stderr fed by search events.
pub struct ProgressReporter {
    spinner: ProgressBar,
    stats: ProgressStats,
}

impl ProgressReporter {
    pub fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) =
            ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")
        {
            spinner.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
        }
        spinner.enable_steady_tick(Duration::from_millis(100));
        Self::with_bar(spinner)
    }

    /// A reporter that tracks counts without drawing anything.
    pub fn hidden() -> Self {
        Self::with_bar(ProgressBar::hidden())
    }

    fn with_bar(spinner: ProgressBar) -> Self {
        Self {
            spinner,
            stats: ProgressStats::default(),
        }
    }

    pub fn update(&mut self, event: &SearchEvent) {
        match event {
            SearchEvent::FileScanned(path) => {
                self.stats.files_scanned += 1;
                self.spinner.set_message(format!(
                    "{} files | {} matches | {}",
                    self.stats.files_scanned,
                    self.stats.matches_found,
                    path.display()
                ));
            }
            SearchEvent::FileMatched(result) => {
                self.stats.files_matched += 1;
                self.stats.matches_found += result.hits.len();
            }
            SearchEvent::FileFailed(_) => self.stats.failures += 1,
        }
    }

    pub fn finish(self) -> ProgressStats {
        self.spinner.finish_and_clear();
        self.stats
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}
