//! Configuration for the Google search MCP server.
//!
//! Settings are layered: optional TOML file, then environment variables
//! on top. `GOOGLE_API_KEY` and `GOOGLE_SEARCH_ENGINE_ID` must be present
//! after layering or startup fails.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub google: GoogleConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
}

/// Credentials for the Custom Search JSON API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GoogleConfig {
    #[serde(default)]
    pub api_key: String,
    /// Programmable Search Engine identifier (the `cx` parameter).
    #[serde(default)]
    pub search_engine_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Results returned when the caller does not ask for a count. Capped at 10 by the API.
    #[serde(default = "default_max_results")]
    pub max_results: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_max_response_size")]
    pub max_response_size: usize,
}

fn default_max_results() -> u32 {
    10
}

fn default_timeout_seconds() -> u64 {
    10
}

fn default_user_agent() -> String {
    // Some sites serve reduced or blocked pages to non-browser agents.
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36".to_string()
}

fn default_max_response_size() -> usize {
    10 * 1024 * 1024
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout_seconds(),
            user_agent: default_user_agent(),
            max_response_size: default_max_response_size(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment.
    pub fn load() -> Result<Self> {
        let mut config = match Self::find_config_path() {
            Some(path) if path.exists() => {
                tracing::info!("Loading config from: {}", path.display());
                let content = std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read config at {}", path.display()))?;
                toml::from_str(&content)
                    .with_context(|| format!("failed to parse config at {}", path.display()))?
            }
            _ => {
                tracing::debug!("No config file found, using defaults");
                Self::default()
            }
        };

        if let Ok(key) = std::env::var("GOOGLE_API_KEY") {
            config.google.api_key = key;
        }
        if let Ok(id) = std::env::var("GOOGLE_SEARCH_ENGINE_ID") {
            config.google.search_engine_id = id;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.google.api_key.is_empty() || self.google.search_engine_id.is_empty() {
            bail!(
                "GOOGLE_API_KEY and GOOGLE_SEARCH_ENGINE_ID are required; \
                 set them in the environment or in the config file"
            );
        }
        Ok(())
    }

    /// Explicit path via `GOOGLE_SEARCH_CONFIG_PATH`, otherwise the
    /// platform config directory.
    fn find_config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("GOOGLE_SEARCH_CONFIG_PATH") {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| dir.join("google-search-mcp").join("config.toml"))
    }
}
