//! ODS error types

use thiserror::Error;

/// Result type for ODS operations
pub type OdsResult<T> = std::result::Result<T, OdsError>;

/// Errors that abort an ODS load or save
///
/// Malformed values inside an otherwise readable document (bad repeat
/// counts, unknown value types, missing properties) are not errors; they
/// fall back to cell defaults.
#[derive(Debug, Error)]
pub enum OdsError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP error
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// XML error
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Invalid file format
    #[error("Invalid ODS format: {0}")]
    InvalidFormat(String),

    /// Missing required part
    #[error("Missing required part: {0}")]
    MissingPart(String),

    /// A cell or conditional map references a style that is not defined
    #[error("Style not found: {0}")]
    MissingStyle(String),

    /// Core error
    #[error("Core error: {0}")]
    Core(#[from] sods_core::Error),
}
