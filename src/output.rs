use crate::config::OutputFormat;
use crate::error::{DocgrepError, Result};
use crate::search::{FileResult, SearchSummary};
use colored::*;
use serde_json::json;
use std::fmt::Write;

/// Output formatter for search summaries
pub struct OutputFormatter {
    format: OutputFormat,
    include_summary: bool,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            include_summary: true,
        }
    }

    pub fn with_summary(mut self, include: bool) -> Self {
        self.include_summary = include;
        self
    }

    pub fn format_summary(&self, summary: &SearchSummary) -> Result<String> {
        match self.format {
            OutputFormat::Text => Ok(self.format_text(summary)),
            OutputFormat::Json => self.format_json(summary),
        }
    }

    fn format_json(&self, summary: &SearchSummary) -> Result<String> {
        let value = json!({
            "results": summary.results,
            "files_scanned": summary.files_scanned,
            "files_matched": summary.files_matched(),
            "total_matches": summary.total_matches,
            "cancelled": summary.cancelled,
            "diagnostics": summary.diagnostics,
        });
        serde_json::to_string_pretty(&value).map_err(|e| DocgrepError::Other(e.to_string()))
    }

    fn format_text(&self, summary: &SearchSummary) -> String {
        let mut output = String::new();
        for result in &summary.results {
            output.push_str(&format_file_result(result));
        }

        if self.include_summary {
            if summary.results.is_empty() {
                let _ = writeln!(output, "{}", "No matches found".yellow());
            }
            let _ = writeln!(
                output,
                "{} {} files, {} matches in {} files",
                "Scanned".green(),
                summary.files_scanned,
                summary.total_matches,
                summary.files_matched()
            );
            if summary.cancelled {
                let _ = writeln!(output, "{}", "Search cancelled, results are partial".yellow());
            }
        }
        output
    }
}

/// Text block for one file: the path, then every labelled context window.
pub fn format_file_result(result: &FileResult) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "{}", result.path.display().to_string().green().bold());
    for hit in &result.hits {
        let _ = writeln!(output, "  {}", hit.label.to_string().yellow().bold());
        for line in hit.context.lines() {
            let _ = writeln!(output, "    │ {line}");
        }
    }
    output
}
