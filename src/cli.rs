use crate::config::{Config, OutputFormat};
use crate::search::{ExtensionFilter, SearchConfig};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Cli {
    /// Text to look for
    pub query: String,

    /// Directory to search
    #[clap(default_value = ".")]
    pub path: PathBuf,

    /// Comma separated extensions, e.g. ".txt,.pdf" ("*" for all)
    #[clap(short, long, value_parser)]
    pub extensions: Option<String>,

    #[clap(short = 's', long, value_parser, default_value_t = false)]
    pub case_sensitive: bool,

    #[clap(
        short,
        long,
        value_parser,
        default_value_t = false,
        overrides_with = "no_recursive"
    )]
    pub recursive: bool,

    /// Only search files directly inside PATH
    #[clap(long, value_parser, default_value_t = false, overrides_with = "recursive")]
    pub no_recursive: bool,

    /// Records of context shown before each match
    #[clap(short = 'B', long, value_parser)]
    pub before: Option<usize>,

    /// Records of context shown after each match
    #[clap(short = 'A', long, value_parser)]
    pub after: Option<usize>,

    /// Honour .gitignore/.ignore files and skip hidden files
    #[clap(long, value_parser, default_value_t = false)]
    pub respect_ignore: bool,

    #[clap(long, value_enum)]
    pub format: Option<OutputFormat>,

    #[clap(long, value_parser, default_value_t = false)]
    pub verbose: bool,

    #[clap(long, value_parser)]
    pub log: Option<PathBuf>,
}

impl Cli {
    /// Merges command line options over the configuration file defaults.
    pub fn search_config(&self, config: &Config) -> SearchConfig {
        let defaults = &config.search;
        let extensions = self
            .extensions
            .as_deref()
            .unwrap_or(&defaults.extensions);
        let recursive = if self.no_recursive {
            false
        } else {
            self.recursive || defaults.recursive
        };

        SearchConfig::new(&self.path, &self.query)
            .extensions(ExtensionFilter::parse(extensions))
            .case_sensitive(self.case_sensitive || defaults.case_sensitive)
            .recursive(recursive)
            .context(
                self.before.unwrap_or(defaults.context_before),
                self.after.unwrap_or(defaults.context_after),
            )
            .respect_ignore_files(self.respect_ignore || defaults.respect_ignore_files)
    }

    pub fn output_format(&self, config: &Config) -> OutputFormat {
        self.format.unwrap_or(config.display.format)
    }
}
