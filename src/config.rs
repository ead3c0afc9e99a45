use crate::error::{DocgrepError, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(default)]
    pub search: SearchDefaults,

    #[serde(default)]
    pub display: DisplayConfig,
}

/// Defaults for options the command line leaves unset.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchDefaults {
    pub extensions: String,
    pub case_sensitive: bool,
    pub recursive: bool,
    pub context_before: usize,
    pub context_after: usize,
    pub respect_ignore_files: bool,
}

impl Default for SearchDefaults {
    fn default() -> Self {
        Self {
            extensions: "*".to_string(),
            case_sensitive: false,
            recursive: true,
            context_before: 2,
            context_after: 2,
            respect_ignore_files: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub format: OutputFormat,
    pub show_summary: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            show_summary: true,
        }
    }
}

impl Config {
    /// Loads the first configuration file found, or the defaults.
    pub fn load() -> Result<Self> {
        match Self::find_config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .map_err(|e| DocgrepError::Config(format!("{}: {e}", path.display())))
    }

    fn find_config_path() -> Option<PathBuf> {
        if let Some(xdg_config) = dirs::config_dir() {
            let xdg_path = xdg_config.join("docgrep/config.toml");
            if xdg_path.exists() {
                return Some(xdg_path);
            }
        }

        if let Some(home) = dirs::home_dir() {
            let home_path = home.join(".docgrep.toml");
            if home_path.exists() {
                return Some(home_path);
            }
        }

        let current_path = Path::new(".docgrep.toml");
        if current_path.exists() {
            return Some(current_path.to_path_buf());
        }

        None
    }
}
