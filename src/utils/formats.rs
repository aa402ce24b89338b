//! Extension-set handling for file discovery.
//!
//! Matching is purely extension-based: tokens are trimmed, lower-cased
//! and stripped of any leading dot, so `".HEIC, Heif"` and `"heic,heif"`
//! produce the same set.

use std::collections::BTreeSet;
use std::path::Path;

use crate::utils::ValidationError;

/// Extensions scanned when `--ext` is not given.
pub const DEFAULT_EXTENSIONS: &str = "heic,heif";

/// Parse a comma-separated extension list into a normalised set.
pub fn parse_extension_list(raw: &str) -> Result<BTreeSet<String>, ValidationError> {
    let set: BTreeSet<String> = raw
        .split(',')
        .map(|token| token.trim().trim_start_matches('.').to_lowercase())
        .filter(|token| !token.is_empty())
        .collect();

    if set.is_empty() {
        return Err(ValidationError::settings(format!(
            "--ext '{raw}' yielded no valid extensions"
        )));
    }

    Ok(set)
}

/// Check whether a path's extension (lower-cased) is in the set.
pub fn matches_extension(path: &Path, extensions: &BTreeSet<String>) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| extensions.contains(&e.to_lowercase()))
        .unwrap_or(false)
}

/// Render the set for user-facing messages (`heic, heif`).
pub fn display_extensions(extensions: &BTreeSet<String>) -> String {
    extensions
        .iter()
        .cloned()
        .collect::<Vec<_>>()
        .join(", ")
}
