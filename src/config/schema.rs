//! Configuration schema for fetch-cache
//!
//! Configuration is stored at `~/.config/fetch-cache/config.toml`

use crate::cache::DEFAULT_MAX_SIZE;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Cache settings
    pub cache: CacheConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
        }
    }
}

/// Cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Enable artifact caching (default: true)
    pub enabled: bool,

    /// Directory holding `.vendir-cache/` (default: home directory)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,

    /// Largest source tree that will be cached, e.g. "1Mi", "500Ki", "2G"
    pub max_size: String,
}

impl CacheConfig {
    /// Cache root, falling back to the home directory
    pub fn resolved_root(&self) -> PathBuf {
        self.root
            .clone()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            root: None,
            max_size: DEFAULT_MAX_SIZE.to_string(),
        }
    }
}
