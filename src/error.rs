//! Error types for the docbridge library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for docbridge operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during document conversion.
///
/// Every public conversion operation catches all of these at its boundary
/// and folds them into a failed [`ConversionOutcome`](crate::ConversionOutcome);
/// none escape to the caller as a panic or an unhandled `Err`.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The source path does not exist.
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// The input parsed but is semantically empty or unusable
    /// (no document body, no workbook, no tables).
    #[error("invalid document: {0}")]
    InvalidFormat(String),

    /// No render-engine executable could be resolved for the PDF path.
    #[error("render engine not found: {0}")]
    RenderEngineNotFound(String),

    /// The render-engine subprocess launched but failed to produce a PDF.
    #[error("render failed: {0}")]
    Render(String),

    /// ZIP container error from an OOXML package.
    #[error("package error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// XML error from an OOXML part.
    #[error("XML error: {0}")]
    Xml(#[from] roxmltree::Error),

    /// Any other conversion failure, with the underlying message preserved.
    #[error("{0}")]
    Conversion(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::NotFound(PathBuf::from("missing.docx"));
        assert_eq!(err.to_string(), "file not found: missing.docx");

        let err = Error::InvalidFormat("no document body".into());
        assert_eq!(err.to_string(), "invalid document: no document body");

        let err = Error::RenderEngineNotFound("/opt/chrome".into());
        assert_eq!(err.to_string(), "render engine not found: /opt/chrome");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
