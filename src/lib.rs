//! fetch-cache - Local artifact cache for vendoring fetchers
//!
//! Keeps previously fetched directory trees on disk, keyed by fetcher
//! namespace and an opaque cache id, so a re-sync can copy them back
//! instead of fetching from the remote source again.

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod ui;

pub use cache::{ArtifactCache, Cache, NoCache, Quota, SaveOutcome};
pub use error::{FetchCacheError, FetchCacheResult};
