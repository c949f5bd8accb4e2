//! Recursive directory copy that keeps permission bits
//!
//! Cached trees are restored into vendored directories where executable
//! and read-only bits matter (scripts, generated files), so every file
//! and subdirectory gets the exact mode of its source.

use super::size::walk_error;
use crate::error::{FetchCacheError, FetchCacheResult};
use std::fs::{self, Permissions};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Mirror the contents of `src` into `dst`, creating `dst` if needed.
///
/// Symlinks are recreated with their original target rather than followed.
/// The first failure aborts the copy; whatever was written so far stays.
pub fn copy_tree(src: &Path, dst: &Path) -> FetchCacheResult<()> {
    fs::create_dir_all(dst)
        .map_err(|e| FetchCacheError::io(format!("creating {}", dst.display()), e))?;

    // Directory modes are applied last so read-only directories can be filled first
    let mut dir_modes: Vec<(PathBuf, Permissions)> = Vec::new();
    let mut files = 0usize;

    for entry in WalkDir::new(src).min_depth(1).follow_links(false) {
        let entry = entry.map_err(walk_error)?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .map_err(|_| FetchCacheError::PathInvalid {
                path: entry.path().to_path_buf(),
                reason: format!("not under {}", src.display()),
            })?;
        let target = dst.join(rel);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            fs::create_dir_all(&target)
                .map_err(|e| FetchCacheError::io(format!("creating {}", target.display()), e))?;
            let metadata = entry.metadata().map_err(walk_error)?;
            dir_modes.push((target, metadata.permissions()));
        } else if file_type.is_symlink() {
            copy_symlink(entry.path(), &target)?;
        } else if file_type.is_file() {
            let metadata = entry.metadata().map_err(walk_error)?;
            copy_file(entry.path(), &target, metadata.permissions())?;
            files += 1;
        } else {
            warn!("Skipping special file {}", entry.path().display());
        }
    }

    for (dir, perms) in dir_modes.into_iter().rev() {
        fs::set_permissions(&dir, perms).map_err(|e| {
            FetchCacheError::io(format!("setting permissions on {}", dir.display()), e)
        })?;
    }

    debug!(
        "Copied {} file(s) from {} to {}",
        files,
        src.display(),
        dst.display()
    );
    Ok(())
}

fn copy_file(src: &Path, dst: &Path, perms: Permissions) -> FetchCacheResult<()> {
    fs::copy(src, dst).map_err(|e| {
        FetchCacheError::io(format!("copying {} to {}", src.display(), dst.display()), e)
    })?;
    fs::set_permissions(dst, perms).map_err(|e| {
        FetchCacheError::io(format!("setting permissions on {}", dst.display()), e)
    })
}

#[cfg(unix)]
fn copy_symlink(src: &Path, dst: &Path) -> FetchCacheResult<()> {
    let target = fs::read_link(src)
        .map_err(|e| FetchCacheError::io(format!("reading link {}", src.display()), e))?;

    if dst.symlink_metadata().is_ok() {
        fs::remove_file(dst)
            .map_err(|e| FetchCacheError::io(format!("replacing {}", dst.display()), e))?;
    }

    std::os::unix::fs::symlink(&target, dst)
        .map_err(|e| FetchCacheError::io(format!("creating link {}", dst.display()), e))
}

#[cfg(not(unix))]
fn copy_symlink(src: &Path, _dst: &Path) -> FetchCacheResult<()> {
    warn!("Skipping symlink {} (unsupported on this platform)", src.display());
    Ok(())
}
