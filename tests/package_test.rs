//! Integration tests for the package read/write paths.

use docbridge::model::{Cell, Row, Sheet};
use docbridge::{convert, package, parse_docx, parse_xlsx, sheet_names, Block, StyleTag};

#[test]
fn html_to_docx_and_back() {
    let dir = tempfile::tempdir().unwrap();
    let html_in = dir.path().join("in.html");
    let docx = dir.path().join("doc.docx");
    let html_out = dir.path().join("out.html");

    std::fs::write(
        &html_in,
        "<html><body><h1>Report</h1><p>First paragraph.</p><h2>Details</h2><p>Second &amp; last.</p></body></html>",
    )
    .unwrap();

    let outcome = convert::html_to_docx(&html_in, &docx);
    assert!(outcome.success, "{:?}", outcome.error_message);
    assert_eq!(outcome.items_processed, 4);

    let doc = parse_docx(&docx).unwrap();
    assert_eq!(doc.block_count(), 4);
    let Block::Text(first) = &doc.blocks[0] else {
        panic!("expected a text block");
    };
    assert_eq!(first.style, StyleTag::Heading1);
    assert_eq!(first.text, "Report");
    let Block::Text(last) = &doc.blocks[3] else {
        panic!("expected a text block");
    };
    assert_eq!(last.text, "Second & last.");

    let outcome = convert::docx_to_html(&docx, &html_out);
    assert!(outcome.success);
    assert_eq!(outcome.items_processed, 4);

    let html = std::fs::read_to_string(&html_out).unwrap();
    assert!(html.contains("<h1>Report</h1>"));
    assert!(html.contains("<h2>Details</h2>"));
    assert!(html.contains("<p>Second &amp; last.</p>"));
}

#[test]
fn docx_without_core_properties_has_empty_metadata() {
    let dir = tempfile::tempdir().unwrap();
    let docx = dir.path().join("plain.docx");

    let doc = docbridge::Document::with_blocks(vec![Block::paragraph("text")]);
    package::docx::write(&doc, &docx).unwrap();

    let parsed = parse_docx(&docx).unwrap();
    assert!(parsed.metadata.is_empty());
}

#[test]
fn sheet_names_preserve_workbook_order() {
    let dir = tempfile::tempdir().unwrap();
    let xlsx = dir.path().join("book.xlsx");

    let sheets = vec![
        Sheet::new(
            "Q1",
            vec![
                Row::new(vec![Cell::header("Region"), Cell::header("Total")]),
                Row::from_strings(["North", "120"]),
            ],
        ),
        Sheet::new(
            "Q2",
            vec![
                Row::new(vec![Cell::header("Region"), Cell::header("Total")]),
                Row::from_strings(["North", "95"]),
            ],
        ),
    ];
    package::xlsx::write(&sheets, &xlsx).unwrap();

    assert_eq!(sheet_names(&xlsx).unwrap(), ["Q1", "Q2"]);

    let parsed = parse_xlsx(&xlsx).unwrap();
    assert_eq!(parsed.len(), 2);
    assert_eq!(parsed[0].name, "Q1");
    assert_eq!(parsed[0].row_count(), 2);
    assert!(parsed[0].rows[0].is_header());
    assert!(!parsed[0].rows[1].is_header());
    assert_eq!(parsed[1].rows[1].cells[1].text, "95");
}

#[test]
fn sheet_filter_extracts_a_single_sheet() {
    let dir = tempfile::tempdir().unwrap();
    let xlsx = dir.path().join("book.xlsx");

    let sheets = vec![
        Sheet::new("Q1", vec![Row::from_strings(["a"])]),
        Sheet::new("Q2", vec![Row::from_strings(["b"])]),
    ];
    package::xlsx::write(&sheets, &xlsx).unwrap();

    let only_q2 = package::xlsx::parse_filtered(&xlsx, Some("Q2")).unwrap();
    assert_eq!(only_q2.len(), 1);
    assert_eq!(only_q2[0].name, "Q2");
    assert_eq!(only_q2[0].rows[0].cells[0].text, "b");

    let none = package::xlsx::parse_filtered(&xlsx, Some("Q9")).unwrap();
    assert!(none.is_empty());
}

#[test]
fn html_tables_become_numbered_sheets() {
    let dir = tempfile::tempdir().unwrap();
    let html = dir.path().join("tables.html");
    let xlsx = dir.path().join("tables.xlsx");

    std::fs::write(
        &html,
        "<html><body>\
           <table><tr><th>A</th><th>B</th></tr><tr><td>1</td><td>2</td></tr></table>\
           <table><tr><td>42</td></tr></table>\
         </body></html>",
    )
    .unwrap();

    let outcome = convert::html_to_xlsx(&html, &xlsx);
    assert!(outcome.success, "{:?}", outcome.error_message);
    assert_eq!(outcome.items_processed, 2);

    assert_eq!(sheet_names(&xlsx).unwrap(), ["Sheet1", "Sheet2"]);

    let sheets = parse_xlsx(&xlsx).unwrap();
    assert_eq!(sheets[0].row_count(), 2);
    assert_eq!(sheets[0].rows[0].cells.len(), 2);
    assert_eq!(sheets[0].rows[1].cells[0].text, "1");
    // Numeric-looking cells stay string-typed.
    assert_eq!(sheets[1].row_count(), 1);
    assert_eq!(sheets[1].rows[0].cells[0].text, "42");
}

#[test]
fn xlsx_to_html_renders_sheet_headings() {
    let dir = tempfile::tempdir().unwrap();
    let xlsx = dir.path().join("book.xlsx");
    let html_out = dir.path().join("book.html");

    let sheets = vec![Sheet::new(
        "Summary",
        vec![
            Row::new(vec![Cell::header("Key"), Cell::header("Value")]),
            Row::from_strings(["total", "7"]),
        ],
    )];
    package::xlsx::write(&sheets, &xlsx).unwrap();

    let outcome = convert::xlsx_to_html(&xlsx, &html_out);
    assert!(outcome.success);
    assert_eq!(outcome.items_processed, 1);

    let html = std::fs::read_to_string(&html_out).unwrap();
    assert!(html.contains("<h2>Summary</h2>"));
    assert!(html.contains("<th>Key</th><th>Value</th>"));
    assert!(html.contains("<td>total</td><td>7</td>"));
}

#[test]
fn whitespace_paragraphs_do_not_survive_docx_parse() {
    let dir = tempfile::tempdir().unwrap();
    let docx = dir.path().join("spaced.docx");

    let doc = docbridge::Document::with_blocks(vec![
        Block::paragraph("   "),
        Block::paragraph("real content"),
    ]);
    package::docx::write(&doc, &docx).unwrap();

    let parsed = parse_docx(&docx).unwrap();
    assert_eq!(parsed.blocks, vec![Block::paragraph("real content")]);
}

#[test]
fn empty_html_body_converts_to_empty_docx() {
    let dir = tempfile::tempdir().unwrap();
    let html = dir.path().join("empty.html");
    let docx = dir.path().join("empty.docx");

    std::fs::write(&html, "<html><body></body></html>").unwrap();

    let outcome = convert::html_to_docx(&html, &docx);
    assert!(outcome.success);
    assert_eq!(outcome.items_processed, 0);

    // An empty block sequence is a valid document.
    let parsed = parse_docx(&docx).unwrap();
    assert!(parsed.is_empty());
}
