//! Error types for the relayout library.

use std::io;
use thiserror::Error;

/// Result type alias for relayout operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during document analysis.
///
/// The inference pipeline itself degrades gracefully (empty pages, unknown
/// fonts and rejected table candidates are all normal, non-error outcomes);
/// errors are reserved for invalid caller configuration and a malformed
/// input contract.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing extracted content.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The table confidence threshold is outside the accepted range.
    #[error("Invalid table confidence threshold {0} (expected 0.0..=1.0)")]
    InvalidThreshold(f32),

    /// A page in the input references a number beyond the reported page count.
    #[error("Page {0} is out of range (document reports {1} pages)")]
    PageOutOfRange(u32, u32),

    /// Error serializing or deserializing the document model.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidThreshold(1.5);
        assert_eq!(
            err.to_string(),
            "Invalid table confidence threshold 1.5 (expected 0.0..=1.0)"
        );

        let err = Error::PageOutOfRange(10, 5);
        assert_eq!(err.to_string(), "Page 10 is out of range (document reports 5 pages)");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
