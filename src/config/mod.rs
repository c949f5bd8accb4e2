//! Configuration management for fetch-cache

pub mod schema;

pub use schema::{CacheConfig, Config};

use crate::error::{FetchCacheError, FetchCacheResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Configuration manager
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new config manager with default path
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Create a config manager with a custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("fetch-cache")
            .join("config.toml")
    }

    /// Load configuration, falling back to defaults if the file is absent
    pub async fn load(&self) -> FetchCacheResult<Config> {
        if !self.config_path.exists() {
            debug!("Config file not found, using defaults");
            return Ok(Config::default());
        }

        self.load_from_file(&self.config_path).await
    }

    /// Load configuration from a specific file
    pub async fn load_from_file(&self, path: &Path) -> FetchCacheResult<Config> {
        let content = fs::read_to_string(path).await.map_err(|e| {
            FetchCacheError::io(format!("reading config from {}", path.display()), e)
        })?;

        toml::from_str(&content).map_err(|e| FetchCacheError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Save configuration to file
    pub async fn save(&self, config: &Config) -> FetchCacheResult<()> {
        self.ensure_config_dir().await?;

        let content = toml::to_string_pretty(config)?;
        fs::write(&self.config_path, content).await.map_err(|e| {
            FetchCacheError::io(
                format!("writing config to {}", self.config_path.display()),
                e,
            )
        })?;

        info!("Configuration saved to {}", self.config_path.display());
        Ok(())
    }

    /// Ensure the config directory exists
    async fn ensure_config_dir(&self) -> FetchCacheResult<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| FetchCacheError::ConfigDirCreate {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }
        Ok(())
    }

    /// Get the config file path
    pub fn path(&self) -> &Path {
        &self.config_path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache settings given on the command line or through the environment.
///
/// These win over the config file.
#[derive(Debug, Clone, Default)]
pub struct CacheOverrides {
    /// Cache root directory
    pub root: Option<PathBuf>,
    /// Quota expression
    pub max_size: Option<String>,
    /// Turn caching off
    pub disable: bool,
}

impl CacheOverrides {
    /// Apply the overrides to a loaded configuration
    pub fn apply(&self, config: &mut Config) {
        if let Some(ref root) = self.root {
            debug!("Cache root overridden: {}", root.display());
            config.cache.root = Some(root.clone());
        }
        if let Some(ref max_size) = self.max_size {
            debug!("Cache max size overridden: {}", max_size);
            config.cache.max_size = max_size.clone();
        }
        if self.disable {
            debug!("Caching disabled (--no-cache)");
            config.cache.enabled = false;
        }
    }
}
