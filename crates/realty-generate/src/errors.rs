use std::path::PathBuf;

use thiserror::Error;

/// Errors emitted while generating or appending rows.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("target CSV not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("target is not a regular file: {}", .0.display())]
    NotAFile(PathBuf),
    #[error("invalid profile: {0}")]
    InvalidProfile(String),
    #[error("core error: {0}")]
    Core(#[from] realty_core::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}
