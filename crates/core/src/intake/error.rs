//! Error types for file intake.

use std::path::PathBuf;
use thiserror::Error;

/// Reasons a selected file is not accepted.
#[derive(Error, Debug)]
pub enum IntakeError {
    /// The file name does not end in `.csv`.
    #[error("Please upload a CSV file (got {file_name})")]
    UnsupportedExtension { file_name: String },

    /// The file could not be read from disk.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Type alias for Result with IntakeError.
pub type IntakeResult<T> = Result<T, IntakeError>;
