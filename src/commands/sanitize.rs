//! `heicsan sanitize`: one-step privacy wipe and convert.

use anyhow::Result;
use tracing::debug;

use crate::cli::SanitizeArgs;
use crate::core::{PipelineSettings, RunSummary, StagePlan};
use crate::processing::{self, ExifTool};

/// Strip every tag, convert to JPEG, and delete the original unless
/// `--keep` was given.
pub fn run_sanitize(args: &SanitizeArgs) -> Result<RunSummary> {
    let extensions = super::scan_settings(&args.scan)?;
    let exiftool = ExifTool::resolve()?;

    let settings = PipelineSettings {
        root: args.scan.directory.clone(),
        recursive: args.scan.recursive,
        extensions,
        quality: args.quality,
        stages: StagePlan {
            strip: true,
            convert: true,
            keep_datetimes: false,
            delete_source: !args.keep,
            delete_on_skip: !args.keep,
        },
        exiftool: Some(exiftool.program().to_path_buf()),
    };

    debug!("Sanitize settings: {settings:?}");
    Ok(processing::run(&settings))
}
