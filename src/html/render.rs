//! HTML rendering: document model and sheets to a self-contained page.

use html_escape::encode_text;

use crate::model::{Block, Document, Sheet, TableBlock};

/// Fixed inline styling for every generated page. The `@page` rule gives
/// the PDF path its A4 geometry and 1 cm margins; backgrounds stay on via
/// `print-color-adjust`.
const STYLE: &str = "\
body { font-family: Calibri, Arial, sans-serif; margin: 2em; color: #222; }
table { border-collapse: collapse; margin: 1em 0; }
th, td { border: 1px solid #999; padding: 4px 8px; text-align: left; }
th { background: #efefef; }
@page { size: A4; margin: 1cm; }
@media print { body { -webkit-print-color-adjust: exact; print-color-adjust: exact; } }";

/// Serialize a [`Document`] to a complete HTML document.
///
/// `TextBlock`s become the element named by their style tag; tables become
/// `<table>` with `<th>` cells on header-flagged rows. All text is
/// HTML-escaped, so literal markup in cell text renders as text, never as
/// elements. Infallible for well-formed models.
pub fn document_to_html(doc: &Document) -> String {
    let title = doc.metadata.title.as_deref().unwrap_or("Document");
    let mut body = String::new();
    for block in &doc.blocks {
        render_block(&mut body, block);
    }
    page(title, &body)
}

/// Serialize sheets to a complete HTML document: one table per sheet,
/// preceded by a sheet-name heading.
pub fn sheets_to_html(sheets: &[Sheet], title: &str) -> String {
    let mut body = String::new();
    for sheet in sheets {
        body.push_str(&format!("<h2>{}</h2>\n", encode_text(&sheet.name)));
        render_table(
            &mut body,
            &TableBlock {
                rows: sheet.rows.clone(),
            },
        );
    }
    page(title, &body)
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>\n{STYLE}\n</style>\n</head>\n<body>\n{body}</body>\n</html>\n",
        encode_text(title),
    )
}

fn render_block(out: &mut String, block: &Block) {
    match block {
        Block::Text(text) => {
            let tag = text.style.tag_name();
            out.push_str(&format!("<{tag}>{}</{tag}>\n", encode_text(&text.text)));
        }
        Block::Table(table) => render_table(out, table),
    }
}

fn render_table(out: &mut String, table: &TableBlock) {
    out.push_str("<table>\n");
    for row in &table.rows {
        out.push_str("<tr>");
        for cell in &row.cells {
            let tag = if cell.is_header { "th" } else { "td" };
            out.push_str(&format!("<{tag}>{}</{tag}>", encode_text(&cell.text)));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</table>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Cell, Row};

    #[test]
    fn test_heading_tags() {
        for level in 1..=6u8 {
            let doc = Document::with_blocks(vec![Block::heading(level, "Title")]);
            let html = document_to_html(&doc);
            assert!(html.contains(&format!("<h{level}>Title</h{level}>")));
        }
    }

    #[test]
    fn test_text_is_escaped() {
        let doc = Document::with_blocks(vec![Block::paragraph("<script>alert(1)</script>")]);
        let html = document_to_html(&doc);
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_table_header_cells() {
        let doc = Document::with_blocks(vec![Block::table(vec![
            Row::new(vec![Cell::header("Name"), Cell::header("Age")]),
            Row::from_strings(["Alice", "30"]),
        ])]);
        let html = document_to_html(&doc);
        assert!(html.contains("<th>Name</th><th>Age</th>"));
        assert!(html.contains("<td>Alice</td><td>30</td>"));
    }

    #[test]
    fn test_sheets_render_name_headings() {
        let sheets = vec![
            Sheet::new("Q1", vec![Row::new(vec![Cell::header("Region")])]),
            Sheet::new("Q2", vec![Row::new(vec![Cell::header("Region")])]),
        ];
        let html = sheets_to_html(&sheets, "book");
        let q1 = html.find("<h2>Q1</h2>").unwrap();
        let q2 = html.find("<h2>Q2</h2>").unwrap();
        assert!(q1 < q2);
        assert_eq!(html.matches("<table>").count(), 2);
    }

    #[test]
    fn test_page_is_self_contained() {
        let html = document_to_html(&Document::new());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<style>"));
        assert!(html.contains("@page { size: A4; margin: 1cm; }"));
        assert!(html.contains("<title>Document</title>"));
    }

    #[test]
    fn test_metadata_title_used() {
        let mut doc = Document::new();
        doc.metadata.title = Some("Annual <Report>".into());
        let html = document_to_html(&doc);
        assert!(html.contains("<title>Annual &lt;Report&gt;</title>"));
    }
}
