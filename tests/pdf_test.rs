//! Failure-path tests for the PDF orchestrator.
//!
//! Success paths need a real browser install, so these tests exercise
//! discovery failures, missing sources, and temp-artifact hygiene.

use std::path::Path;

use docbridge::{convert, package, Block, Document, PdfRenderOptions};

fn bogus_engine() -> PdfRenderOptions {
    PdfRenderOptions::default().with_engine_path("/definitely/missing/chrome-binary")
}

/// docbridge temp artifacts currently present in the system temp dir.
fn staged_artifacts() -> usize {
    std::fs::read_dir(std::env::temp_dir())
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .filter(|e| e.file_name().to_string_lossy().starts_with("docbridge-"))
                .count()
        })
        .unwrap_or(0)
}

#[tokio::test]
async fn missing_engine_path_fails_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let html = dir.path().join("page.html");
    let pdf = dir.path().join("page.pdf");
    std::fs::write(&html, "<html><body><p>hi</p></body></html>").unwrap();

    let outcome = convert::html_to_pdf(&html, &pdf, &bogus_engine()).await;

    assert!(!outcome.success);
    assert!(outcome.output_path.is_none());
    let message = outcome.error_message.unwrap();
    assert!(
        message.contains("/definitely/missing/chrome-binary"),
        "message should name the missing executable: {message}"
    );
    assert!(!pdf.exists());
}

#[tokio::test]
async fn missing_html_source_fails_before_rendering() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = dir.path().join("out.pdf");

    let outcome =
        convert::html_to_pdf(Path::new("missing-source.html"), &pdf, &bogus_engine()).await;

    assert!(!outcome.success);
    assert!(outcome
        .error_message
        .unwrap()
        .contains("missing-source.html"));
}

#[tokio::test]
async fn docx_to_pdf_failures_leave_no_temp_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = dir.path().join("out.pdf");
    let before = staged_artifacts();

    // Missing source: fails before any temporary HTML file is created.
    let outcome =
        convert::docx_to_pdf(Path::new("missing-source.docx"), &pdf, &bogus_engine()).await;
    assert!(!outcome.success);
    assert!(outcome
        .error_message
        .as_deref()
        .unwrap()
        .contains("missing-source.docx"));
    assert!(!pdf.exists());

    // Valid source but no engine: the staged HTML must be cleaned up when
    // the render step fails.
    let docx = dir.path().join("doc.docx");
    let doc = Document::with_blocks(vec![Block::paragraph("content")]);
    package::docx::write(&doc, &docx).unwrap();

    let outcome = convert::docx_to_pdf(&docx, &pdf, &bogus_engine()).await;
    assert!(!outcome.success);
    assert!(!pdf.exists());

    assert_eq!(staged_artifacts(), before);
}

#[tokio::test]
async fn xlsx_to_pdf_missing_source_fails_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = dir.path().join("out.pdf");

    let outcome =
        convert::xlsx_to_pdf(Path::new("missing-book.xlsx"), &pdf, &bogus_engine()).await;

    assert!(!outcome.success);
    assert!(outcome.error_message.unwrap().contains("missing-book.xlsx"));
    assert!(!pdf.exists());
}
