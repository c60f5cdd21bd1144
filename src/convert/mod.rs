//! Public conversion operations.
//!
//! These functions form the outermost boundary of the library: every
//! error from parsing, serialization, or rendering is caught here and
//! folded into a failed [`ConversionOutcome`]. Nothing propagates to the
//! caller as `Err` or as a panic. There is no retry logic; a failure is
//! terminal for the call.

mod outcome;

pub use outcome::ConversionOutcome;

use std::path::Path;

use crate::error::{Error, Result};
use crate::model::{Block, Document, Sheet};
use crate::pdf::PdfRenderOptions;
use crate::{html, package, pdf};

fn seal(result: Result<ConversionOutcome>) -> ConversionOutcome {
    result.unwrap_or_else(|e| {
        log::warn!("conversion failed: {e}");
        ConversionOutcome::failure(&e)
    })
}

fn stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Document".into())
}

/// Convert a DOCX file to a self-contained HTML document.
///
/// `items_processed` counts non-empty paragraphs plus tables.
pub fn docx_to_html(input: &Path, output: &Path) -> ConversionOutcome {
    fn run(input: &Path, output: &Path) -> Result<ConversionOutcome> {
        let doc = package::docx::parse(input)?;
        let content = html::render::document_to_html(&doc);
        std::fs::write(output, content)?;
        Ok(ConversionOutcome::success(output, doc.block_count())
            .with_message(format!(
                "parsed {} blocks from {}",
                doc.block_count(),
                input.display()
            ))
            .with_message(format!("wrote HTML to {}", output.display())))
    }
    seal(run(input, output))
}

/// Convert an HTML file to a DOCX package.
///
/// One paragraph per qualifying top-level body child; tables in the
/// source HTML are not reconstructed on this path.
pub fn html_to_docx(input: &Path, output: &Path) -> ConversionOutcome {
    fn run(input: &Path, output: &Path) -> Result<ConversionOutcome> {
        let doc = html::parse::parse_file(input)?;
        package::docx::write(&doc, output)?;
        Ok(ConversionOutcome::success(output, doc.block_count())
            .with_message(format!(
                "parsed {} blocks from {}",
                doc.block_count(),
                input.display()
            ))
            .with_message(format!("wrote DOCX to {}", output.display())))
    }
    seal(run(input, output))
}

/// Convert an XLSX workbook to a self-contained HTML document, one table
/// per sheet.
///
/// `items_processed` counts sheets with at least one row.
pub fn xlsx_to_html(input: &Path, output: &Path) -> ConversionOutcome {
    fn run(input: &Path, output: &Path) -> Result<ConversionOutcome> {
        let sheets = package::xlsx::parse(input)?;
        let content = html::render::sheets_to_html(&sheets, &stem(input));
        std::fs::write(output, content)?;
        Ok(ConversionOutcome::success(output, sheets.len())
            .with_message(format!(
                "parsed {} sheets from {}",
                sheets.len(),
                input.display()
            ))
            .with_message(format!("wrote HTML to {}", output.display())))
    }
    seal(run(input, output))
}

/// Convert the `<table>` elements of an HTML file to an XLSX workbook.
///
/// Sheets are named `Sheet1..SheetN` in document order. Fails when the
/// source contains no tables.
pub fn html_to_xlsx(input: &Path, output: &Path) -> ConversionOutcome {
    fn run(input: &Path, output: &Path) -> Result<ConversionOutcome> {
        let tables = html::parse::tables_in_file(input)?;
        if tables.is_empty() {
            return Err(Error::InvalidFormat("no tables found".into()));
        }
        let sheets: Vec<Sheet> = tables
            .into_iter()
            .enumerate()
            .map(|(i, table)| Sheet::new(format!("Sheet{}", i + 1), table.rows))
            .collect();
        package::xlsx::write(&sheets, output)?;
        Ok(ConversionOutcome::success(output, sheets.len())
            .with_message(format!(
                "consumed {} tables from {}",
                sheets.len(),
                input.display()
            ))
            .with_message(format!("wrote XLSX to {}", output.display())))
    }
    seal(run(input, output))
}

/// Convert a plain-text file to HTML, one paragraph per non-blank line.
pub fn text_to_html(input: &Path, output: &Path) -> ConversionOutcome {
    fn run(input: &Path, output: &Path) -> Result<ConversionOutcome> {
        if !input.exists() {
            return Err(Error::NotFound(input.to_path_buf()));
        }
        let text = std::fs::read_to_string(input)?;
        let blocks: Vec<Block> = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(Block::paragraph)
            .collect();
        let count = blocks.len();
        let mut doc = Document::with_blocks(blocks);
        doc.metadata.title = Some(stem(input));
        std::fs::write(output, html::render::document_to_html(&doc))?;
        Ok(ConversionOutcome::success(output, count)
            .with_message(format!("read {count} paragraphs from {}", input.display()))
            .with_message(format!("wrote HTML to {}", output.display())))
    }
    seal(run(input, output))
}

/// Convert an HTML file to plain text, one line group per block.
pub fn html_to_text(input: &Path, output: &Path) -> ConversionOutcome {
    fn run(input: &Path, output: &Path) -> Result<ConversionOutcome> {
        let doc = html::parse::parse_file(input)?;
        let mut text = doc.plain_text();
        text.push('\n');
        std::fs::write(output, text)?;
        Ok(ConversionOutcome::success(output, doc.block_count())
            .with_message(format!(
                "parsed {} blocks from {}",
                doc.block_count(),
                input.display()
            ))
            .with_message(format!("wrote text to {}", output.display())))
    }
    seal(run(input, output))
}

/// Render an HTML file to PDF with the external render engine.
pub async fn html_to_pdf(
    input: &Path,
    output: &Path,
    options: &PdfRenderOptions,
) -> ConversionOutcome {
    let result = pdf::html_to_pdf(input, output, options).await.map(|()| {
        ConversionOutcome::success(output, 1)
            .with_message(format!("rendered {} to PDF", input.display()))
    });
    seal(result)
}

/// Convert a DOCX file to PDF via an intermediate HTML artifact.
///
/// The temporary HTML file is removed on every exit path; a failure
/// before rendering leaves nothing behind.
pub async fn docx_to_pdf(
    input: &Path,
    output: &Path,
    options: &PdfRenderOptions,
) -> ConversionOutcome {
    let result = pdf::document_to_pdf(input, output, options)
        .await
        .map(|blocks| {
            ConversionOutcome::success(output, blocks)
                .with_message(format!("rendered {blocks} blocks to {}", output.display()))
        });
    seal(result)
}

/// Convert an XLSX workbook to PDF via an intermediate HTML artifact.
pub async fn xlsx_to_pdf(
    input: &Path,
    output: &Path,
    options: &PdfRenderOptions,
) -> ConversionOutcome {
    let result = pdf::spreadsheet_to_pdf(input, output, options)
        .await
        .map(|sheets| {
            ConversionOutcome::success(output, sheets)
                .with_message(format!("rendered {sheets} sheets to {}", output.display()))
        });
    seal(result)
}
