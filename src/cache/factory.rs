//! Cache factory
//!
//! Picks the cache implementation from configuration.

use crate::cache::backend::{ArtifactCache, NoCache};
use crate::cache::store::Cache;
use crate::config::CacheConfig;
use crate::error::FetchCacheResult;
use tracing::debug;

/// Create the cache described by `config`
///
/// # Returns
/// * `Ok(Box<dyn ArtifactCache>)` - `NoCache` when caching is disabled, otherwise the on-disk cache
/// * `Err` - If `max_size` is not a valid quantity
pub fn create_cache(config: &CacheConfig) -> FetchCacheResult<Box<dyn ArtifactCache>> {
    if !config.enabled {
        debug!("Artifact caching disabled");
        return Ok(Box::new(NoCache));
    }

    let cache = Cache::new(config.resolved_root(), &config.max_size)?;
    debug!(
        "Using cache at {} (max size {})",
        cache.fetcher_dir().display(),
        cache.quota()
    );
    Ok(Box::new(cache))
}
