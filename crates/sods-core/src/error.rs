//! Error types for sods-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in sods-core
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid cell address format
    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    /// Invalid cell range format
    #[error("Invalid cell range: {0}")]
    InvalidRange(String),

    /// Row number out of bounds
    #[error("Row {0} out of bounds (1..={1})")]
    RowOutOfBounds(u32, u32),

    /// Column number out of bounds
    #[error("Column {0} out of bounds (1..={1})")]
    ColumnOutOfBounds(u32, u32),

    /// Cell attributes contradict each other
    #[error("Invalid cell: {0}")]
    InvalidCell(String),

    /// Date value is not an ISO date or date-time
    #[error("Invalid date value: {0}")]
    InvalidDate(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a new "other" error with a message
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }
}
