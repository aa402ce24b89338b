//! External metadata-stripping capability.
//!
//! Wraps the ExifTool binary behind a narrow interface: a file path in,
//! success or a stderr-carrying error out. The wipe is destructive and
//! in-place; with `keep_datetimes` the same invocation copies exactly
//! three timestamp tags back from the file's own pre-strip metadata via
//! `-tagsfromfile @`.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;
use which::which;

use crate::utils::{PipelineError, PipelineResult, ValidationError};

/// Handle to a resolved ExifTool binary.
#[derive(Debug, Clone)]
pub struct ExifTool {
    program: PathBuf,
}

impl ExifTool {
    /// Locate ExifTool on PATH.
    pub fn resolve() -> Result<Self, ValidationError> {
        which("exiftool")
            .map(|program| Self { program })
            .map_err(|_| ValidationError::ExifToolMissing)
    }

    /// Use an explicit binary path instead of searching PATH.
    pub fn at(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// The binary this handle invokes.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Remove every metadata tag from `file` in place.
    ///
    /// Default behaviour removes everything; `keep_datetimes` re-injects
    /// DateTimeOriginal/CreateDate/ModifyDate sourced from the original
    /// tags in the same invocation.
    pub fn strip_metadata(&self, file: &Path, keep_datetimes: bool) -> PipelineResult<()> {
        let args = strip_args(file, keep_datetimes);
        debug!("Running: {} {:?}", self.program.display(), args);

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|e| PipelineError::exiftool(format!("failed to run ExifTool: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PipelineError::exiftool(stderr.trim().to_string()));
        }

        Ok(())
    }
}

/// Argument list for the in-place wipe.
fn strip_args(file: &Path, keep_datetimes: bool) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec!["-overwrite_original".into(), "-all=".into()];

    if keep_datetimes {
        args.extend([
            OsString::from("-tagsfromfile"),
            OsString::from("@"),
            OsString::from("-datetimeoriginal"),
            OsString::from("-createdate"),
            OsString::from("-modifydate"),
        ]);
    }

    args.push(file.as_os_str().to_os_string());
    args
}
