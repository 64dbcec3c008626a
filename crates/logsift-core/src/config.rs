//! Configuration types for logsift.
//!
//! [`Config::load`] layers, lowest precedence first: the embedded defaults,
//! `~/.config/logsift/config.toml` (if present), an explicit file passed by
//! the caller, and `LOGSIFT_<SECTION>__<KEY>` environment variables.
//! [`Config::defaults`] returns the embedded defaults without touching the
//! filesystem (useful in tests).

use crate::export::ExportOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[output]
path         = "extracted_hits.csv"
clean_values = false

[run]
workers = 1
"#;

const ENV_PREFIX: &str = "LOGSIFT";

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub run: RunConfig,
}

/// `[output]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
    #[serde(default)]
    pub clean_values: bool,
}

fn default_output_path() -> PathBuf { PathBuf::from("extracted_hits.csv") }

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            clean_values: false,
        }
    }
}

impl OutputConfig {
    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            clean_values: self.clean_values,
        }
    }
}

/// `[run]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct RunConfig {
    /// Blocking extraction workers; 1 extracts inline.
    #[serde(default = "default_workers")]
    pub workers: usize,
}

fn default_workers() -> usize { 1 }

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load the layered configuration. `explicit`, when given, must exist.
    pub fn load(explicit: Option<&Path>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(user_config_path().as_path()).required(false));

        if let Some(path) = explicit {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn user_config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("logsift")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
