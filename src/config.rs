//! Configuration management for querypipe.
//!
//! Handles loading configuration from TOML files, with settings for the
//! artifact output directory, the mock engine delay, and the secrets backend.

use crate::error::{QuerypipeError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure for querypipe.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Directory where query artifacts and visualizations are written.
    pub output_dir: Option<PathBuf>,

    /// Mock engine settings.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Secret store settings.
    #[serde(default)]
    pub secrets: SecretsConfig,
}

/// Mock engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Simulated work duration in milliseconds.
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

fn default_delay_ms() -> u64 {
    100
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_delay_ms(),
        }
    }
}

impl EngineConfig {
    /// Returns the simulated delay as a [`Duration`].
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Which secret store backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecretsBackend {
    /// In-memory store, populated fresh each run.
    #[default]
    Memory,
    /// OS keyring-backed store.
    Keyring,
}

/// Secret store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecretsConfig {
    /// Backend to use for credential bundles.
    #[serde(default)]
    pub backend: SecretsBackend,

    /// Name of the credential bundle the pipelines look up.
    #[serde(default = "default_bundle")]
    pub bundle: String,
}

fn default_bundle() -> String {
    crate::secrets::DEMO_SECRET_NAME.to_string()
}

impl Default for SecretsConfig {
    fn default() -> Self {
        Self {
            backend: SecretsBackend::default(),
            bundle: default_bundle(),
        }
    }
}

impl Config {
    /// Returns the default config file path for the current platform.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("querypipe")
            .join("config.toml")
    }

    /// Loads configuration from a TOML file. A missing file yields defaults.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| QuerypipeError::config(format!("Failed to read config file: {e}")))?;

        Self::parse_toml(&content, path)
    }

    /// Parses configuration from a TOML string.
    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            QuerypipeError::config(format!(
                "Configuration error in {}:\n  {}",
                path.display(),
                e
            ))
        })
    }

    /// Returns the effective artifact output directory.
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("artifacts"))
    }
}
