//! CLI error types.

use std::path::PathBuf;

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid date format.
    #[error("Invalid date format: {0}. Use YYYY-MM-DD.")]
    InvalidDate(String),

    /// Invalid price.
    #[error("Invalid price: {0}. Must be positive.")]
    InvalidPrice(f64),

    /// The snapshot lacks a section the command needs.
    #[error("Snapshot {path} has no {section}")]
    MissingSection {
        /// Snapshot file.
        path: PathBuf,
        /// Missing top-level key.
        section: &'static str,
    },
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
