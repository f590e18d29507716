//! TOML-based application configuration.
//!
//! Stores the score summarizer settings (API key, model id, call
//! timeout) and scoring defaults. Configuration is stored at
//! `~/.config/daypulse/config.toml`; a missing file yields defaults,
//! and every field is individually optional.
//!
//! Do not commit a real API key anywhere -- the key can also come from
//! the `GEMINI_API_KEY` or `GOOGLE_API_KEY` environment variables, which
//! take effect when the file leaves `api_key` unset.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::scoring::DEFAULT_WINDOW_DAYS;

/// Default summary model id (free tier).
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
/// Default deadline for the external summary call, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 8;
/// Default API endpoint base.
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Summarizer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryConfig {
    /// API key; falls back to `GEMINI_API_KEY` / `GOOGLE_API_KEY` env vars
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Endpoint base URL; overridable for self-hosted gateways and tests
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            timeout_secs: default_timeout_secs(),
            endpoint: default_endpoint(),
        }
    }
}

/// Scoring defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreConfig {
    /// Inclusive window length used when the caller omits a start date
    #[serde(default = "default_window_days")]
    pub window_days: u32,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            window_days: default_window_days(),
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub summary: SummaryConfig,
    #[serde(default)]
    pub score: ScoreConfig,
}

impl Config {
    /// Path of the configuration file.
    pub fn path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("daypulse")
            .join("config.toml")
    }

    /// Load from the default location; defaults when the file is absent.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path())
    }

    /// Load from an explicit path; defaults when the file is absent.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path).map_err(|err| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        toml::from_str(&raw).map_err(|err| ConfigError::ParseFailed(err.to_string()))
    }
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_window_days() -> u32 {
    DEFAULT_WINDOW_DAYS
}
