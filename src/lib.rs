//! # docbridge
//!
//! Office document conversion for Rust.
//!
//! docbridge converts among word-processing packages (DOCX), spreadsheet
//! packages (XLSX), HTML, plain text, and PDF. Every path goes through a
//! small format-agnostic document model; the mapping is intentionally
//! lossy but predictable: block order, heading levels, table structure,
//! and cell text survive, rich styling does not.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::path::Path;
//!
//! let outcome = docbridge::convert::docx_to_html(
//!     Path::new("report.docx"),
//!     Path::new("report.html"),
//! );
//! if outcome.success {
//!     println!("wrote {:?} ({} blocks)", outcome.output_path, outcome.items_processed);
//! }
//! ```
//!
//! PDF conversion drives an external headless browser (Chrome or Edge)
//! and is asynchronous:
//!
//! ```no_run
//! use std::path::Path;
//! use docbridge::PdfRenderOptions;
//!
//! # async fn run() {
//! let outcome = docbridge::convert::html_to_pdf(
//!     Path::new("report.html"),
//!     Path::new("report.pdf"),
//!     &PdfRenderOptions::default(),
//! )
//! .await;
//! # }
//! ```
//!
//! Every operation returns a [`ConversionOutcome`]; errors never escape
//! as panics or unhandled `Err` values.

pub mod convert;
pub mod error;
pub mod html;
pub mod model;
pub mod package;
pub mod pdf;

// Re-export commonly used types
pub use convert::ConversionOutcome;
pub use error::{Error, Result};
pub use model::{Block, Cell, Document, Metadata, Row, Sheet, StyleTag, TableBlock, TextBlock};
pub use pdf::PdfRenderOptions;

use std::path::Path;

/// Parse a DOCX file into the document model.
pub fn parse_docx<P: AsRef<Path>>(path: P) -> Result<Document> {
    package::docx::parse(path.as_ref())
}

/// Parse an XLSX workbook into sheets, in workbook order.
pub fn parse_xlsx<P: AsRef<Path>>(path: P) -> Result<Vec<Sheet>> {
    package::xlsx::parse(path.as_ref())
}

/// Parse an HTML file into the document model.
pub fn parse_html<P: AsRef<Path>>(path: P) -> Result<Document> {
    html::parse::parse_file(path.as_ref())
}

/// List an XLSX workbook's sheet names, in workbook order.
pub fn sheet_names<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    package::xlsx::sheet_names(path.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_docx_missing() {
        let result = parse_docx("definitely-missing.docx");
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[test]
    fn test_parse_html_missing() {
        let result = parse_html("definitely-missing.html");
        assert!(matches!(result, Err(Error::NotFound(_))));
    }
}
