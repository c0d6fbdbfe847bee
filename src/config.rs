//! Configuration management for cinefav
//!
//! Config is stored at ~/.config/cinefav/config.toml. Every field is
//! optional; missing or unreadable config falls back to defaults.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::omdb::{DEFAULT_BASE_URL, DEFAULT_QUERY};
use crate::api::{DEFAULT_LIMIT, MAX_LIMIT};
use crate::debounce::DEFAULT_WINDOW;

/// Bundled OMDb key used when neither the environment nor config has one
const BUNDLED_API_KEY: &str = "3d17ef76";

/// Environment variable that overrides the API key
pub const API_KEY_ENV: &str = "OMDB_API_KEY";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// OMDb API key
    pub api_key: Option<String>,
    /// OMDb endpoint
    pub base_url: Option<String>,
    /// Search term for the default ("popular") listing
    pub default_query: Option<String>,
    /// Maximum results per search
    pub result_limit: Option<usize>,
    /// Quiet period before typed input triggers a search
    pub debounce_ms: Option<u64>,
    /// Directory for persisted favorites
    pub favorites_dir: Option<PathBuf>,
}

impl Config {
    /// Default config file path (~/.config/cinefav/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("cinefav").join("config.toml"))
    }

    /// Load config from `path`, or defaults if absent or malformed
    pub fn load_from(path: &Path) -> Self {
        let Ok(raw) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        match toml::from_str(&raw) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring malformed config");
                Self::default()
            }
        }
    }

    /// Write config to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// API key: `OMDB_API_KEY`, then config, then the bundled key
    pub fn api_key(&self) -> String {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                return key;
            }
        }
        self.api_key
            .clone()
            .unwrap_or_else(|| BUNDLED_API_KEY.to_string())
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn default_query(&self) -> &str {
        self.default_query.as_deref().unwrap_or(DEFAULT_QUERY)
    }

    /// Configured result cap, clamped to `MAX_LIMIT`
    pub fn result_limit(&self) -> usize {
        self.result_limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT)
    }

    pub fn debounce(&self) -> Duration {
        self.debounce_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_WINDOW)
    }
}
