//! Command-line interface definitions.
//!
//! Three subcommands share one scan surface and differ only in which
//! pipeline stages they enable:
//! - `sanitize`: strip everything, convert, delete originals by default
//! - `convert`: convert only, optionally carrying capture times
//! - `strip`: wipe metadata in place, no conversion, no deletion

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::core::DEFAULT_QUALITY;
use crate::utils::DEFAULT_EXTENSIONS;

/// Batch HEIC/HEIF metadata stripper and JPEG converter.
#[derive(Debug, Parser)]
#[command(name = "heicsan", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Strip all metadata, convert to JPEG, and delete originals (unless --keep)
    Sanitize(SanitizeArgs),
    /// Convert to JPEG, optionally preserving capture times
    Convert(ConvertArgs),
    /// Strip metadata in place without converting
    Strip(StripArgs),
}

/// Arguments shared by every subcommand: where to look, what to match.
#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Directory containing images to process
    pub directory: PathBuf,

    /// Process images in subdirectories as well
    #[arg(short, long)]
    pub recursive: bool,

    /// Comma-separated list of extensions to match (case-insensitive)
    #[arg(long, default_value = DEFAULT_EXTENSIONS, value_name = "EXT1,EXT2")]
    pub ext: String,
}

#[derive(Debug, Args)]
pub struct SanitizeArgs {
    #[command(flatten)]
    pub scan: ScanArgs,

    /// JPEG quality (1-100)
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_QUALITY,
        value_parser = clap::value_parser!(u8).range(1..=100)
    )]
    pub quality: u8,

    /// Keep the original file instead of deleting it
    #[arg(long)]
    pub keep: bool,
}

#[derive(Debug, Args)]
pub struct ConvertArgs {
    #[command(flatten)]
    pub scan: ScanArgs,

    /// JPEG quality (1-100)
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_QUALITY,
        value_parser = clap::value_parser!(u8).range(1..=100)
    )]
    pub quality: u8,

    /// Delete original files after conversion
    #[arg(long)]
    pub delete: bool,

    /// Preserve DateTimeOriginal/CreateDate/ModifyDate in the output
    #[arg(short = 'k', long)]
    pub keep_datetimes: bool,
}

#[derive(Debug, Args)]
pub struct StripArgs {
    #[command(flatten)]
    pub scan: ScanArgs,

    /// Copy DateTimeOriginal/CreateDate/ModifyDate back in after the wipe
    #[arg(short = 'k', long)]
    pub keep_datetimes: bool,
}
