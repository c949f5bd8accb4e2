//! Artifact cache abstraction
//!
//! Fetchers only talk to the cache through this trait, so caching can be
//! switched off without touching them:
//! - `Cache`: the on-disk cache under `<root>/.vendir-cache/fetcher/`
//! - `NoCache`: always misses, never stores

use crate::error::{FetchCacheError, FetchCacheResult};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// What `save` did with a source tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The tree was copied into the cache
    Stored { bytes: u64 },
    /// The tree was larger than the quota and was not cached
    SkippedOverQuota { bytes: u64, quota: u64 },
    /// Caching is turned off
    Disabled,
}

impl fmt::Display for SaveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stored { bytes } => write!(f, "stored ({} bytes)", bytes),
            Self::SkippedOverQuota { bytes, quota } => {
                write!(f, "skipped ({} bytes exceeds quota of {} bytes)", bytes, quota)
            }
            Self::Disabled => write!(f, "skipped (cache disabled)"),
        }
    }
}

/// Cache of fetched artifact trees keyed by (namespace, cache id)
pub trait ArtifactCache: Send + Sync {
    /// Path of the cached tree, or `None` on a miss
    fn has(&self, namespace: &str, cache_id: &str) -> Option<PathBuf>;

    /// Store a copy of `source_dir`, replacing any previous entry for the key
    fn save_with_outcome(
        &self,
        namespace: &str,
        cache_id: &str,
        source_dir: &Path,
    ) -> FetchCacheResult<SaveOutcome>;

    /// Copy the cached tree into `dest_dir`; fails on a miss
    fn copy_from(&self, namespace: &str, cache_id: &str, dest_dir: &Path)
        -> FetchCacheResult<()>;

    /// Store a copy of `source_dir`.
    ///
    /// Trees over the quota are silently left uncached.
    fn save(&self, namespace: &str, cache_id: &str, source_dir: &Path) -> FetchCacheResult<()> {
        self.save_with_outcome(namespace, cache_id, source_dir)
            .map(|_| ())
    }

    /// Human-readable backend name for display
    fn backend_name(&self) -> &'static str;
}

/// Cache used when caching is turned off
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCache;

impl ArtifactCache for NoCache {
    fn has(&self, _namespace: &str, _cache_id: &str) -> Option<PathBuf> {
        None
    }

    fn save_with_outcome(
        &self,
        namespace: &str,
        cache_id: &str,
        _source_dir: &Path,
    ) -> FetchCacheResult<SaveOutcome> {
        debug!("Cache disabled, not saving {:?}/{}", namespace, cache_id);
        Ok(SaveOutcome::Disabled)
    }

    fn copy_from(
        &self,
        namespace: &str,
        cache_id: &str,
        _dest_dir: &Path,
    ) -> FetchCacheResult<()> {
        Err(FetchCacheError::entry_not_found(namespace, cache_id))
    }

    fn backend_name(&self) -> &'static str {
        "disabled"
    }
}
