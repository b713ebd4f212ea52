// Session configuration, loaded from .tasklist.yml or ~/.config/tasklist/tasklist.yml

use crate::filter::StatusFilter;
use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const PROJECT_CONFIG: &str = ".tasklist.yml";

/// Accepted values for `log-level`.
pub const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Configuration for an interactive session.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Filter selected when the session starts.
    #[serde(rename = "default-filter")]
    pub default_filter: StatusFilter,

    /// Colorize rendered output.
    pub color: bool,

    /// Prompt printed before each line when reading from a terminal.
    pub prompt: String,

    /// Show the `#id` column.
    #[serde(rename = "show-ids")]
    pub show_ids: bool,

    /// Log level for the stderr subscriber.
    #[serde(rename = "log-level")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_filter: StatusFilter::All,
            color: true,
            prompt: "> ".to_string(),
            show_ids: true,
            log_level: "warn".to_string(),
        }
    }
}

/// A config file found by the implicit search that could not be used.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedConfig {
    pub path: PathBuf,
    pub error: String,
}

/// Outcome of the config search.
///
/// Loading happens before the log subscriber exists, so diagnostics are
/// carried back to the caller and emitted with [`LoadedConfig::log`] once
/// logging is set up.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedConfig {
    pub config: Config,
    /// File the config came from; `None` means defaults.
    pub source: Option<PathBuf>,
    pub skipped: Vec<SkippedConfig>,
}

impl LoadedConfig {
    fn from_file(config: Config, path: &Path) -> Self {
        Self {
            config,
            source: Some(path.to_path_buf()),
            skipped: Vec::new(),
        }
    }

    /// Report where the config came from and which files were skipped
    pub fn log(&self) {
        for skipped in &self.skipped {
            warn!(path = %skipped.path.display(), error = %skipped.error, "Failed to load config, skipping");
        }
        match &self.source {
            Some(path) => info!(path = %path.display(), "Loaded config"),
            None => info!("No config file found, using defaults"),
        }
    }
}

impl Config {
    /// Load configuration with fallback chain.
    ///
    /// Search order:
    /// 1. Explicit path if provided
    /// 2. .tasklist.yml in current directory
    /// 3. ~/.config/tasklist/tasklist.yml
    /// 4. Defaults
    pub fn load(config_path: Option<&PathBuf>) -> Result<LoadedConfig> {
        if let Some(path) = config_path {
            let config =
                Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()))?;
            return Ok(LoadedConfig::from_file(config, path));
        }

        let mut candidates = vec![PathBuf::from(PROJECT_CONFIG)];
        if let Some(config_dir) = dirs::config_dir() {
            candidates.push(config_dir.join("tasklist").join("tasklist.yml"));
        }

        Ok(Self::load_first(&candidates))
    }

    /// First candidate that exists and parses, or defaults
    fn load_first(candidates: &[PathBuf]) -> LoadedConfig {
        let mut skipped = Vec::new();
        for path in candidates {
            if !path.exists() {
                continue;
            }
            match Self::load_from_file(path) {
                Ok(config) => {
                    return LoadedConfig {
                        skipped,
                        ..LoadedConfig::from_file(config, path)
                    };
                }
                Err(e) => skipped.push(SkippedConfig {
                    path: path.clone(),
                    error: format!("{:#}", e),
                }),
            }
        }

        LoadedConfig {
            config: Self::default(),
            source: None,
            skipped,
        }
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;
        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.prompt.is_empty() {
            eyre::bail!("prompt must not be empty");
        }
        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            eyre::bail!(
                "log-level must be one of {} (got {})",
                LOG_LEVELS.join(", "),
                self.log_level
            );
        }
        Ok(())
    }
}
