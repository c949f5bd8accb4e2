//! Directory tree size calculation

use crate::error::{FetchCacheError, FetchCacheResult};
use std::path::Path;
use walkdir::WalkDir;

/// Sum the sizes of all regular files under `dir`.
///
/// Directories add nothing. Symlinks are not followed and count as zero
/// bytes, so a link to a large file outside the tree does not inflate the
/// result.
pub fn tree_size(dir: &Path) -> FetchCacheResult<u64> {
    let mut total: u64 = 0;

    for entry in WalkDir::new(dir).follow_links(false) {
        let entry = entry.map_err(walk_error)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let metadata = entry.metadata().map_err(walk_error)?;
        total = total.saturating_add(metadata.len());
    }

    Ok(total)
}

/// Convert a walkdir failure into an IO error naming the offending path
pub(super) fn walk_error(err: walkdir::Error) -> FetchCacheError {
    let context = match err.path() {
        Some(path) => format!("walking {}", path.display()),
        None => "walking directory tree".to_string(),
    };
    FetchCacheError::io(context, err.into())
}
