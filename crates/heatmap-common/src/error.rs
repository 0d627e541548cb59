//! Error types for the heat-map crates.

use thiserror::Error;

/// Result type alias using ChartError.
pub type ChartResult<T> = Result<T, ChartError>;

/// Primary error type for chart operations.
#[derive(Debug, Error)]
pub enum ChartError {
    // === Input Errors ===
    #[error("Failed to fetch dataset: {0}")]
    Fetch(String),

    #[error("Dataset contains no usable records")]
    NoData,

    #[error("Malformed record: year {year}, month {month}")]
    MalformedRecord { year: i32, month: u32 },

    // === Configuration Errors ===
    #[error("Invalid chart options: {0}")]
    InvalidOptions(String),

    // === Rendering Errors ===
    #[error("Rendering failed: {0}")]
    Render(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    // === Infrastructure Errors ===
    #[error("I/O error: {0}")]
    Io(String),
}

// Conversion from common error types
impl From<std::io::Error> for ChartError {
    fn from(err: std::io::Error) -> Self {
        ChartError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ChartError {
    fn from(err: serde_json::Error) -> Self {
        ChartError::Fetch(format!("JSON error: {}", err))
    }
}
