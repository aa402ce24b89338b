//! `heicsan convert`: JPEG conversion with optional capture-time carry-over.

use anyhow::Result;
use tracing::debug;

use crate::cli::ConvertArgs;
use crate::core::{PipelineSettings, RunSummary, StagePlan};
use crate::processing;

/// Convert matching files to JPEG siblings. Originals are kept unless
/// `--delete` was given.
pub fn run_convert(args: &ConvertArgs) -> Result<RunSummary> {
    let extensions = super::scan_settings(&args.scan)?;

    let settings = PipelineSettings {
        root: args.scan.directory.clone(),
        recursive: args.scan.recursive,
        extensions,
        quality: args.quality,
        stages: StagePlan {
            strip: false,
            convert: true,
            keep_datetimes: args.keep_datetimes,
            delete_source: args.delete,
            delete_on_skip: false,
        },
        exiftool: None,
    };

    debug!("Convert settings: {settings:?}");
    Ok(processing::run(&settings))
}
