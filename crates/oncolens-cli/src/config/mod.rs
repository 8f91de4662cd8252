//! Configuration loading for the Oncolens CLI.
//! Reads oncolens.toml from the current directory, or the path given by
//! `--config` / ONCOLENS_CONFIG. Model parameters are compiled in and not
//! configurable here.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILE: &str = "oncolens.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub batch: BatchConfig,
    /// File the config was read from, if any.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String { "oncolens=info,warn".to_string() }

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: default_log_filter() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_format")]
    pub format: OutputFormat,
    #[serde(default = "default_top_features")]
    pub top_features: usize,
    #[serde(default = "default_probability_decimals")]
    pub probability_decimals: usize,
}

fn default_format()               -> OutputFormat { OutputFormat::Table }
fn default_top_features()         -> usize { 6 }
fn default_probability_decimals() -> usize { 1 }

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            top_features: default_top_features(),
            probability_decimals: default_probability_decimals(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,
}

fn default_export_dir() -> PathBuf { PathBuf::from(".") }

impl Default for BatchConfig {
    fn default() -> Self {
        Self { export_dir: default_export_dir() }
    }
}


impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, ./oncolens.toml is used when
    /// present and built-in defaults otherwise.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => {
                let p = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !p.exists() {
                    return Ok(Self::default());
                }
                p
            }
        };

        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let mut config = Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        config.source = Some(path);
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Resolve an export path against `batch.export_dir` unless absolute.
    pub fn export_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.batch.export_dir.join(path)
        }
    }
}
