//! Configuration for the fa command-line tools
//!
//! The configuration file is optional TOML. Every key has a default, so a
//! missing file behaves exactly like an empty one.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Environment variable that points at an explicit config file
pub const CONFIG_ENV: &str = "FA_CONFIG";

/// Endpoint every marketplace plugin must declare as its `mcpServer`
pub const DEFAULT_MCP_SERVER: &str = "https://ai.farmadvisor.com/mcp";

/// Directory (relative to the marketplace root) holding plugin directories
pub const DEFAULT_PLUGINS_DIR: &str = "plugins";

/// Root manifest file name (relative to the marketplace root)
pub const DEFAULT_MARKETPLACE_FILE: &str = "marketplace.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Could not determine home directory")]
    NoHomeDir,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mcp_server: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugins_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marketplace_file: Option<String>,
}

impl Config {
    /// Resolve the config file location.
    ///
    /// `FA_CONFIG` wins when set and non-empty; otherwise the platform config
    /// directory is used (`~/.config/fa/fa.toml` on Unix).
    pub fn path() -> Result<PathBuf, ConfigError> {
        if let Ok(env_path) = std::env::var(CONFIG_ENV) {
            let trimmed = env_path.trim();
            if !trimmed.is_empty() {
                return Ok(PathBuf::from(trimmed));
            }
        }

        #[cfg(not(target_os = "windows"))]
        let default = dirs::home_dir()
            .ok_or(ConfigError::NoHomeDir)?
            .join(".config")
            .join("fa")
            .join("fa.toml");

        #[cfg(target_os = "windows")]
        let default = dirs::config_dir()
            .ok_or(ConfigError::NoHomeDir)?
            .join("fa")
            .join("fa.toml");

        Ok(default)
    }

    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Config::default());
        }
        debug!("Reading config from {}", path.display());
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn mcp_server(&self) -> &str {
        self.mcp_server.as_deref().unwrap_or(DEFAULT_MCP_SERVER)
    }

    pub fn plugins_dir(&self) -> &str {
        self.plugins_dir.as_deref().unwrap_or(DEFAULT_PLUGINS_DIR)
    }

    pub fn marketplace_file(&self) -> &str {
        self.marketplace_file
            .as_deref()
            .unwrap_or(DEFAULT_MARKETPLACE_FILE)
    }
}
