//! Core pipeline types.
//!
//! This module contains the fundamental types used throughout the tool:
//! - [`PipelineSettings`]: configuration for one run
//! - [`StagePlan`]: which stages are enabled
//! - [`FileOutcome`]: per-file result consumed by the orchestrator
//! - [`RunSummary`]: counters printed at the end of a run

mod types;

pub use types::{DEFAULT_QUALITY, FileOutcome, PipelineSettings, RunSummary, StagePlan};
