//! Small filesystem helpers shared by the pipeline stages.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::utils::PipelineResult;

/// Destination for a conversion: the source path with its extension
/// replaced by `.jpg`.
pub fn jpeg_sibling(path: &Path) -> PathBuf {
    path.with_extension("jpg")
}

/// Remove a file, treating an already-missing file as success.
pub fn remove_file_idempotent(path: &Path) -> PipelineResult<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// File name for user-facing messages, lossily decoded.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
