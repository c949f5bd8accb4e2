//! Error types for fetch-cache
//!
//! All modules use `FetchCacheResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for fetch-cache operations
pub type FetchCacheResult<T> = Result<T, FetchCacheError>;

/// All errors that can occur in fetch-cache
#[derive(Error, Debug)]
pub enum FetchCacheError {
    // Cache errors
    #[error("Invalid cache size {expr:?}: {reason}")]
    QuotaInvalid { expr: String, reason: String },

    #[error("Cache entry not found: {namespace:?}/{key}")]
    EntryNotFound { namespace: String, key: String },

    #[error("Invalid cache entry {namespace:?}/{key:?}: {reason}")]
    EntryInvalid {
        namespace: String,
        key: String,
        reason: String,
    },

    #[error("Source directory not found: {0}")]
    SourceNotFound(PathBuf),

    #[error("Cannot cache {source_dir}: it overlaps the cache directory {cache_dir}")]
    SourceOverlapsCache {
        source_dir: PathBuf,
        cache_dir: PathBuf,
    },

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid path: {path}: {reason}")]
    PathInvalid { path: PathBuf, reason: String },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl FetchCacheError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create an invalid quota error
    pub fn quota(expr: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::QuotaInvalid {
            expr: expr.into(),
            reason: reason.into(),
        }
    }

    /// Create an entry-not-found error
    pub fn entry_not_found(namespace: &str, key: &str) -> Self {
        Self::EntryNotFound {
            namespace: namespace.to_string(),
            key: key.to_string(),
        }
    }

    /// Whether this error means the cache simply had nothing to offer.
    ///
    /// Callers fall back to a remote fetch in this case.
    pub fn is_miss(&self) -> bool {
        matches!(self, Self::EntryNotFound { .. })
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::QuotaInvalid { .. } => {
                Some("Use a byte quantity such as 500Ki, 10Mi, 1.5Gi or 2M")
            }
            Self::EntryNotFound { .. } => Some("Run: fetch-cache has <namespace> <key>"),
            Self::ConfigInvalid { .. } => Some("Run: fetch-cache config init --force"),
            Self::SourceOverlapsCache { .. } => {
                Some("Point --cache-dir outside the directory being cached")
            }
            _ => None,
        }
    }
}
