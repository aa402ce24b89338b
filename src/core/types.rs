//! Core types for pipeline configuration and per-file outcomes.

use std::collections::BTreeSet;
use std::path::PathBuf;

/// JPEG quality used when the caller does not choose one.
pub const DEFAULT_QUALITY: u8 = 90;

/// Which stages run for each discovered file.
///
/// Stages always execute in a fixed order: strip, then convert, then
/// delete-source. Subcommands differ only in which subset they enable
/// and how `keep_datetimes` is interpreted (ExifTool re-injection for
/// the strip stage, selective EXIF carry-over for the convert stage).
#[derive(Debug, Clone, Copy, Default)]
pub struct StagePlan {
    /// Wipe metadata in place with the external tool
    pub strip: bool,
    /// Re-encode as JPEG next to the source
    pub convert: bool,
    /// Carry the capture-time tags through the wipe/re-encode
    pub keep_datetimes: bool,
    /// Unlink the source once its output is confirmed
    pub delete_source: bool,
    /// Also unlink a leftover source whose output already exists
    pub delete_on_skip: bool,
}

/// Configuration for one run, fully derived from the command line.
///
/// Nothing here outlives the process; every run re-derives its settings
/// from the current invocation's arguments.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    /// Root directory to scan
    pub root: PathBuf,
    /// Descend into subdirectories
    pub recursive: bool,
    /// Normalised extension set (lowercase, no leading dot)
    pub extensions: BTreeSet<String>,
    /// JPEG quality (1-100)
    pub quality: u8,
    /// Enabled stages
    pub stages: StagePlan,
    /// Resolved ExifTool binary, present when `stages.strip` is set
    pub exiftool: Option<PathBuf>,
}

/// Result of processing a single file.
#[derive(Debug)]
pub enum FileOutcome {
    /// All enabled stages completed
    Processed {
        output: Option<PathBuf>,
        /// The source was unlinked by the delete stage
        deleted: bool,
    },
    /// Destination already exists; nothing was written
    Skipped { existing: PathBuf },
    /// A stage failed; the batch continues
    Failed { error: String },
}

/// Counters accumulated over one run. Printed, never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Files yielded by discovery
    pub discovered: usize,
    /// Files whose enabled stages all completed
    pub processed: usize,
    /// Files skipped because the destination already existed
    pub skipped: usize,
    /// Files that failed a stage
    pub failed: usize,
}

impl RunSummary {
    /// Record one outcome.
    pub fn record(&mut self, outcome: &FileOutcome) {
        match outcome {
            FileOutcome::Processed { .. } => self.processed += 1,
            FileOutcome::Skipped { .. } => self.skipped += 1,
            FileOutcome::Failed { .. } => self.failed += 1,
        }
    }
}
