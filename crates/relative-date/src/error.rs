//! Error types for relative-date operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("Invalid instant: {0}")]
    InvalidInstant(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("Invalid labels: {0}")]
    InvalidLabels(String),
}

pub type Result<T> = std::result::Result<T, FormatError>;
