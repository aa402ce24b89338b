//! `heicsan strip`: in-place metadata wipe without conversion.

use anyhow::Result;
use tracing::debug;

use crate::cli::StripArgs;
use crate::core::{DEFAULT_QUALITY, PipelineSettings, RunSummary, StagePlan};
use crate::processing::{self, ExifTool};

/// Wipe metadata from matching files in place, optionally restoring the
/// capture-time tags afterwards.
pub fn run_strip(args: &StripArgs) -> Result<RunSummary> {
    let extensions = super::scan_settings(&args.scan)?;
    let exiftool = ExifTool::resolve()?;

    let settings = PipelineSettings {
        root: args.scan.directory.clone(),
        recursive: args.scan.recursive,
        extensions,
        quality: DEFAULT_QUALITY,
        stages: StagePlan {
            strip: true,
            convert: false,
            keep_datetimes: args.keep_datetimes,
            delete_source: false,
            delete_on_skip: false,
        },
        exiftool: Some(exiftool.program().to_path_buf()),
    };

    debug!("Strip settings: {settings:?}");
    Ok(processing::run(&settings))
}
