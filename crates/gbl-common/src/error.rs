//! Error types for the GBL ingest pipeline

use thiserror::Error;

/// Result type alias for GBL operations
pub type Result<T> = std::result::Result<T, GblError>;

/// Main error type for the GBL ingest pipeline
#[derive(Error, Debug)]
pub enum GblError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0} does not exist. Halting.")]
    MissingIntakeDir(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
