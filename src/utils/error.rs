//! Error types for the sanitiser.
//!
//! Provides a hierarchy of error types using `thiserror` for ergonomic error handling.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Validation errors for run configuration.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Path-related validation error
    #[error("Path error: {0}")]
    Path(#[from] PathError),
    /// Invalid settings error
    #[error("Settings error: {0}")]
    Settings(String),
    /// The external metadata tool is not installed
    #[error("ExifTool not found on PATH (install it via brew / apt / choco)")]
    ExifToolMissing,
}

/// File path errors.
#[derive(Error, Debug)]
pub enum PathError {
    /// Directory does not exist
    #[error("Directory not found: {0}")]
    NotFound(PathBuf),
    /// Path exists but is not a directory
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
    /// IO error accessing the path
    #[error("IO error: {0}")]
    IO(String),
}

/// Main error type for per-file pipeline operations.
///
/// Every failure inside a single file's transform is converted to this
/// type before the orchestrator reports it.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Run configuration validation failed
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Image decoding failed
    #[error("Decode error: {0}")]
    Decode(String),

    /// JPEG encoding or metadata rebuild failed
    #[error("Encode error: {0}")]
    Encode(String),

    /// File IO error
    #[error("IO error: {0}")]
    IO(String),

    /// ExifTool invocation error
    #[error("ExifTool error: {0}")]
    ExifTool(String),
}

/// Convenience result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

// Helper methods for error creation
impl PipelineError {
    pub fn decode<T: Into<String>>(msg: T) -> Self {
        Self::Decode(msg.into())
    }

    pub fn encode<T: Into<String>>(msg: T) -> Self {
        Self::Encode(msg.into())
    }

    pub fn exiftool<T: Into<String>>(msg: T) -> Self {
        Self::ExifTool(msg.into())
    }
}

// Helper methods for validation error creation
impl ValidationError {
    pub fn directory_not_found(path: impl Into<PathBuf>) -> Self {
        Self::Path(PathError::NotFound(path.into()))
    }

    pub fn not_a_directory(path: impl Into<PathBuf>) -> Self {
        Self::Path(PathError::NotADirectory(path.into()))
    }

    pub fn settings(msg: impl Into<String>) -> Self {
        Self::Settings(msg.into())
    }
}

// Convert std::io::Error to PipelineError
impl From<io::Error> for PipelineError {
    fn from(err: io::Error) -> Self {
        Self::IO(err.to_string())
    }
}

// Convert io::Error to PathError
impl From<io::Error> for PathError {
    fn from(err: io::Error) -> Self {
        Self::IO(err.to_string())
    }
}
