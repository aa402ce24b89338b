//! Subcommand entry points.
//!
//! Each subcommand builds a [`PipelineSettings`](crate::core::PipelineSettings)
//! from its arguments and hands it to the shared pipeline; the modes
//! differ only in which stages the plan enables. All validation happens
//! here, before any file is touched.

mod convert;
mod sanitize;
mod strip;

pub use convert::run_convert;
pub use sanitize::run_sanitize;
pub use strip::run_strip;

use std::collections::BTreeSet;
use std::path::Path;

use crate::cli::ScanArgs;
use crate::utils::{ValidationError, parse_extension_list};

/// Validate the scan root and normalise the extension list.
fn scan_settings(scan: &ScanArgs) -> Result<BTreeSet<String>, ValidationError> {
    validate_directory(&scan.directory)?;
    parse_extension_list(&scan.ext)
}

fn validate_directory(path: &Path) -> Result<(), ValidationError> {
    if !path.exists() {
        return Err(ValidationError::directory_not_found(path));
    }
    if !path.is_dir() {
        return Err(ValidationError::not_a_directory(path));
    }
    Ok(())
}
