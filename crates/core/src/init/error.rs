//! Errors raised by `showcase init`.

use std::path::PathBuf;
use thiserror::Error;

pub type InitResult<T> = Result<T, InitError>;

#[derive(Debug, Error)]
pub enum InitError {
    /// `.showcase-kit` is already there and `--force` was not given.
    #[error(".showcase-kit directory already exists at {0:?}. Use --force to overwrite.")]
    DirectoryExists(PathBuf),

    /// The binary was built without this embedded template.
    #[error("Embedded template missing: {0}")]
    TemplateNotFound(String),

    #[error("Failed to create directory {path:?}: {source}")]
    DirectoryCreate {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path:?}: {source}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },
}
