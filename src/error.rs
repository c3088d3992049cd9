//! Error types for trialtab

use thiserror::Error;

/// Errors that can occur while tabulating a dataset
#[derive(Debug, Error)]
pub enum TabulateError {
    #[error("Failed to parse record: {0}")]
    ParseError(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    CsvError(#[from] csv::Error),
}
