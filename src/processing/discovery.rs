//! File discovery.
//!
//! Walks the root directory and lazily yields regular files whose
//! extension is in the configured set. Ordering is whatever the
//! filesystem returns; callers must not rely on it.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

use crate::utils::matches_extension;

/// Lazily yield matching files under `root`.
///
/// Non-recursive mode enumerates direct children only. Directories and
/// symlinked directories never qualify (and are never descended into);
/// a symlink pointing at a regular file does. Traversal errors such as
/// unreadable subtrees are logged and skipped.
pub fn discover(
    root: &Path,
    extensions: &BTreeSet<String>,
    recursive: bool,
) -> impl Iterator<Item = PathBuf> {
    let extensions = extensions.clone();
    let max_depth = if recursive { usize::MAX } else { 1 };

    WalkDir::new(root)
        .min_depth(1)
        .max_depth(max_depth)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable entry: {e}");
                None
            }
        })
        .filter(move |entry| {
            entry.path().is_file() && matches_extension(entry.path(), &extensions)
        })
        .map(|entry| entry.into_path())
}
