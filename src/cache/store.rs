//! On-disk artifact cache
//!
//! Layout under the cache root:
//!
//! ```text
//! <root>/.vendir-cache/fetcher/<namespace>/<base64(cache id)>/...
//! ```
//!
//! An empty namespace adds no path segment. Entries are replaced wholesale
//! on every save; nothing is evicted otherwise.

use super::backend::{ArtifactCache, SaveOutcome};
use super::copy::copy_tree;
use super::key::encode_key;
use super::quota::Quota;
use super::size::tree_size;
use crate::error::{FetchCacheError, FetchCacheResult};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Reserved directory created under the cache root
pub const CACHE_DIR: &str = ".vendir-cache";

/// Subdirectory holding fetcher entries
pub const FETCHER_DIR: &str = "fetcher";

/// Filesystem-backed artifact cache
#[derive(Debug, Clone)]
pub struct Cache {
    root: PathBuf,
    quota: Quota,
}

impl Cache {
    /// Create a cache rooted at `root` that only stores trees up to `max_size`.
    ///
    /// Nothing is created on disk until the first save.
    pub fn new(root: impl Into<PathBuf>, max_size: &str) -> FetchCacheResult<Self> {
        let quota = Quota::parse(max_size)?;
        Ok(Self::with_quota(root, quota))
    }

    /// Create a cache with an already parsed quota
    pub fn with_quota(root: impl Into<PathBuf>, quota: Quota) -> Self {
        Self {
            root: root.into(),
            quota,
        }
    }

    /// Cache root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Size quota applied to every save
    pub fn quota(&self) -> &Quota {
        &self.quota
    }

    /// Directory all entries live under
    pub fn fetcher_dir(&self) -> PathBuf {
        self.root.join(CACHE_DIR).join(FETCHER_DIR)
    }

    /// Where the entry for (namespace, cache id) lives, whether or not it exists
    pub fn entry_path(&self, namespace: &str, cache_id: &str) -> FetchCacheResult<PathBuf> {
        let invalid = |reason: &str| FetchCacheError::EntryInvalid {
            namespace: namespace.to_string(),
            key: cache_id.to_string(),
            reason: reason.to_string(),
        };

        if cache_id.is_empty() {
            return Err(invalid("cache id must not be empty"));
        }
        if namespace.contains(['/', '\\']) {
            return Err(invalid("namespace must not contain path separators"));
        }
        if namespace == "." || namespace == ".." {
            return Err(invalid("namespace must not be a relative directory"));
        }

        let mut path = self.fetcher_dir();
        if !namespace.is_empty() {
            path.push(namespace);
        }
        path.push(encode_key(cache_id));
        Ok(path)
    }

    /// Refuse sources that contain the cache directory or live inside the
    /// entry being replaced. Copying the first would recurse into its own
    /// output; removing the entry would destroy the second.
    fn check_overlap(&self, source_dir: &Path, entry: &Path) -> FetchCacheResult<()> {
        let source = resolve_path(source_dir)?;
        let cache_dir = resolve_path(&self.root.join(CACHE_DIR))?;
        let entry = resolve_path(entry)?;

        if cache_dir.starts_with(&source) || source.starts_with(&entry) {
            return Err(FetchCacheError::SourceOverlapsCache {
                source_dir: source_dir.to_path_buf(),
                cache_dir: self.fetcher_dir(),
            });
        }
        Ok(())
    }

    /// Remove a half-written entry so the key reads as a miss
    fn discard_on_error(
        &self,
        entry: &Path,
        copied: FetchCacheResult<()>,
    ) -> FetchCacheResult<()> {
        if let Err(e) = copied {
            warn!("Caching into {} failed, removing partial entry", entry.display());
            if let Err(cleanup) = self.remove_entry(entry) {
                warn!("Failed to remove partial cache entry: {}", cleanup);
            }
            return Err(e);
        }
        Ok(())
    }

    fn remove_entry(&self, entry: &Path) -> FetchCacheResult<()> {
        let context = || format!("removing cache entry {}", entry.display());

        let metadata = match fs::symlink_metadata(entry) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(FetchCacheError::io(context(), e)),
        };

        if !metadata.is_dir() {
            return fs::remove_file(entry).map_err(|e| FetchCacheError::io(context(), e));
        }

        debug!("Removing previous cache entry {}", entry.display());
        match fs::remove_dir_all(entry) {
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                // Cached trees keep their read-only directory modes
                make_dirs_writable(entry);
                fs::remove_dir_all(entry).map_err(|e| FetchCacheError::io(context(), e))
            }
            result => result.map_err(|e| FetchCacheError::io(context(), e)),
        }
    }
}

impl ArtifactCache for Cache {
    fn has(&self, namespace: &str, cache_id: &str) -> Option<PathBuf> {
        let path = self.entry_path(namespace, cache_id).ok()?;
        if path.is_dir() {
            debug!("Cache hit for {:?}/{}", namespace, cache_id);
            Some(path)
        } else {
            debug!("Cache miss for {:?}/{}", namespace, cache_id);
            None
        }
    }

    /// The source is validated before the old entry is removed, so a save
    /// that fails with `SourceNotFound` or `SourceOverlapsCache` leaves the
    /// previous entry in place.
    fn save_with_outcome(
        &self,
        namespace: &str,
        cache_id: &str,
        source_dir: &Path,
    ) -> FetchCacheResult<SaveOutcome> {
        let entry = self.entry_path(namespace, cache_id)?;
        if !source_dir.is_dir() {
            return Err(FetchCacheError::SourceNotFound(source_dir.to_path_buf()));
        }
        self.check_overlap(source_dir, &entry)?;

        self.remove_entry(&entry)?;

        let bytes = tree_size(source_dir)?;
        if !self.quota.admits(bytes) {
            debug!(
                "Not caching {:?}/{}: {} bytes exceeds quota {} ({} bytes)",
                namespace,
                cache_id,
                bytes,
                self.quota,
                self.quota.bytes()
            );
            return Ok(SaveOutcome::SkippedOverQuota {
                bytes,
                quota: self.quota.bytes(),
            });
        }

        fs::create_dir_all(&entry).map_err(|e| {
            FetchCacheError::io(format!("creating cache entry {}", entry.display()), e)
        })?;

        self.discard_on_error(&entry, copy_tree(source_dir, &entry))?;

        info!(
            "Cached {:?}/{} ({} bytes) at {}",
            namespace,
            cache_id,
            bytes,
            entry.display()
        );
        Ok(SaveOutcome::Stored { bytes })
    }

    fn copy_from(
        &self,
        namespace: &str,
        cache_id: &str,
        dest_dir: &Path,
    ) -> FetchCacheResult<()> {
        let entry = self.entry_path(namespace, cache_id)?;
        if !entry.is_dir() {
            return Err(FetchCacheError::entry_not_found(namespace, cache_id));
        }

        copy_tree(&entry, dest_dir)?;
        info!(
            "Restored {:?}/{} into {}",
            namespace,
            cache_id,
            dest_dir.display()
        );
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "filesystem"
    }
}

/// Absolute form of `path` with symlinks resolved for the part that exists
fn resolve_path(path: &Path) -> FetchCacheResult<PathBuf> {
    let absolute = std::path::absolute(path)
        .map_err(|e| FetchCacheError::io(format!("resolving {}", path.display()), e))?;

    for existing in absolute.ancestors() {
        if let Ok(resolved) = existing.canonicalize() {
            return Ok(match absolute.strip_prefix(existing) {
                Ok(rest) if !rest.as_os_str().is_empty() => resolved.join(rest),
                _ => resolved,
            });
        }
    }
    Ok(absolute)
}

/// Add the owner write bit to every directory under `path`, best effort
#[cfg(unix)]
fn make_dirs_writable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    for entry in walkdir::WalkDir::new(path)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_dir() {
            continue;
        }
        if let Ok(metadata) = entry.metadata() {
            let mode = metadata.permissions().mode();
            let _ = fs::set_permissions(entry.path(), fs::Permissions::from_mode(mode | 0o700));
        }
    }
}

#[cfg(not(unix))]
fn make_dirs_writable(path: &Path) {
    for entry in walkdir::WalkDir::new(path)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if let Ok(metadata) = entry.metadata() {
            let mut perms = metadata.permissions();
            perms.set_readonly(false);
            let _ = fs::set_permissions(entry.path(), perms);
        }
    }
}
