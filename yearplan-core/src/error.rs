//! Error types for yearplan.

use thiserror::Error;

/// Errors that can occur in yearplan operations.
#[derive(Error, Debug)]
pub enum YearPlanError {
    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid year: {0}")]
    InvalidYear(i32),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for YearPlanError {
    fn from(err: serde_json::Error) -> Self {
        YearPlanError::Serialization(err.to_string())
    }
}

/// Result type alias for yearplan operations.
pub type YearPlanResult<T> = Result<T, YearPlanError>;
