//! Run orchestration.
//!
//! Iterates discovered files strictly sequentially, applies the enabled
//! stages to each, and isolates per-file failures so one bad file never
//! aborts the batch. Emits one status line per file and a single summary
//! at the end.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::core::{FileOutcome, PipelineSettings, RunSummary};
use crate::processing::convert::{self, Conversion};
use crate::processing::discovery;
use crate::processing::exiftool::ExifTool;
use crate::utils::{
    PipelineError, PipelineResult, display_extensions, display_name, remove_file_idempotent,
};

/// Run the configured stages over every matching file under the root.
///
/// Per-file failures are reported and counted, never propagated; the
/// only errors that abort a run are detected before this loop begins.
pub fn run(settings: &PipelineSettings) -> RunSummary {
    let mut summary = RunSummary::default();
    let exiftool = settings.exiftool.as_deref().map(ExifTool::at);

    for path in discovery::discover(&settings.root, &settings.extensions, settings.recursive) {
        summary.discovered += 1;

        let outcome = process_file(&path, settings, exiftool.as_ref())
            .unwrap_or_else(|e| FileOutcome::Failed {
                error: e.to_string(),
            });

        summary.record(&outcome);
        report(&path, &outcome, settings);
    }

    print_summary(&summary, settings);
    summary
}

/// Apply the enabled stages, in their fixed order, to a single file.
fn process_file(
    path: &Path,
    settings: &PipelineSettings,
    exiftool: Option<&ExifTool>,
) -> PipelineResult<FileOutcome> {
    let stages = settings.stages;

    if stages.strip {
        let tool = exiftool
            .ok_or_else(|| PipelineError::exiftool("no ExifTool binary resolved for this run"))?;
        tool.strip_metadata(path, stages.keep_datetimes)?;
    }

    if stages.convert {
        match convert::convert_to_jpeg(path, settings.quality, stages.keep_datetimes)? {
            Conversion::AlreadyExists(existing) => {
                // Idempotent cleanup of a leftover source, sanitize only.
                if stages.delete_on_skip {
                    remove_file_idempotent(path)?;
                }
                return Ok(FileOutcome::Skipped { existing });
            }
            Conversion::Written(output) => {
                if stages.delete_source {
                    delete_source(path, &output)?;
                }
                return Ok(FileOutcome::Processed {
                    output: Some(output),
                    deleted: stages.delete_source,
                });
            }
        }
    }

    Ok(FileOutcome::Processed {
        output: None,
        deleted: false,
    })
}

/// Unlink the source, but only once the output is confirmed on disk.
fn delete_source(src: &Path, output: &Path) -> PipelineResult<()> {
    if !output.exists() {
        return Err(PipelineError::IO(format!(
            "output missing after conversion: {}",
            output.display()
        )));
    }

    fs::remove_file(src)?;
    debug!("Deleted original {}", src.display());
    Ok(())
}

/// Print the per-file status line.
fn report(path: &Path, outcome: &FileOutcome, settings: &PipelineSettings) {
    match outcome {
        FileOutcome::Processed { output, deleted } => {
            match output {
                Some(output) => {
                    println!("[OK] {} → {}", display_name(path), display_name(output));
                }
                None => {
                    let rel = path.strip_prefix(&settings.root).unwrap_or(path);
                    println!("[OK] Stripped metadata from {}", rel.display());
                }
            }
            if *deleted {
                println!("      Deleted original {}", display_name(path));
            }
        }
        FileOutcome::Skipped { existing } => {
            println!("[SKIP] {} already exists", display_name(existing));
        }
        FileOutcome::Failed { error } => {
            warn!("Processing failed for {}: {error}", path.display());
            eprintln!("[ERROR] {}: {error}", display_name(path));
        }
    }
}

/// Print one of the three summary shapes.
fn print_summary(summary: &RunSummary, settings: &PipelineSettings) {
    if summary.discovered == 0 {
        println!(
            "No files with extensions {} found in {}",
            display_extensions(&settings.extensions),
            settings.root.display()
        );
    } else if summary.processed == 0 {
        println!("No files processed (review [ERROR] lines above).");
    } else {
        println!(
            "Done. Processed {} file{}.",
            summary.processed,
            if summary.processed == 1 { "" } else { "s" }
        );
    }
}
