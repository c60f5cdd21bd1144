//! HTML parsing: DOM to document model, plus table scanning for the
//! spreadsheet inverse path.

use std::path::Path;

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};
use crate::model::{Block, Cell, Document, Row, StyleTag, TableBlock, TextBlock};

static HEADING_TAG: Lazy<Regex> = Lazy::new(|| Regex::new("^h[1-6]$").expect("valid regex"));

/// Parse an HTML file into a [`Document`].
///
/// Fails with [`Error::NotFound`] if the path does not exist.
pub fn parse_file(path: &Path) -> Result<Document> {
    if !path.exists() {
        return Err(Error::NotFound(path.to_path_buf()));
    }
    let html = std::fs::read_to_string(path)?;
    Ok(parse_str(&html))
}

/// Parse an HTML string into a [`Document`].
///
/// Only the body's direct child elements are considered; each child whose
/// decoded, trimmed text is non-empty becomes one text block. `h1`..`h6`
/// children carry their heading level; everything else is body text.
/// Tables are not reconstructed on this path.
pub fn parse_str(html: &str) -> Document {
    let dom = parse_dom(html);
    let mut blocks = Vec::new();

    for child in body_children(&dom) {
        let Some(tag) = tag_lower(&child) else {
            continue;
        };
        let text = collect_text(&child);
        let text = text.trim();
        if text.is_empty() {
            continue;
        }
        let style = if HEADING_TAG.is_match(&tag) {
            StyleTag::heading(tag.as_bytes()[1] - b'0').unwrap_or_default()
        } else {
            StyleTag::Paragraph
        };
        blocks.push(Block::Text(TextBlock {
            style,
            text: text.to_string(),
        }));
    }

    log::debug!("parsed {} blocks from HTML body", blocks.len());
    Document::with_blocks(blocks)
}

/// Collect every `<table>` element of an HTML file, in document order.
///
/// Fails with [`Error::NotFound`] if the path does not exist.
pub fn tables_in_file(path: &Path) -> Result<Vec<TableBlock>> {
    if !path.exists() {
        return Err(Error::NotFound(path.to_path_buf()));
    }
    let html = std::fs::read_to_string(path)?;
    Ok(tables_in_str(&html))
}

/// Collect every `<table>` element of an HTML string, in document order.
///
/// Rows are the table's `tr` elements; cells are each row's `td` and `th`
/// children in document order, with decoded, trimmed text.
pub fn tables_in_str(html: &str) -> Vec<TableBlock> {
    let dom = parse_dom(html);
    let mut table_nodes = Vec::new();
    find_elements(&dom.document, "table", &mut table_nodes);

    table_nodes.iter().map(parse_table).collect()
}

fn parse_dom(html: &str) -> RcDom {
    parse_document(RcDom::default(), Default::default()).one(html)
}

fn tag_lower(node: &Handle) -> Option<String> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.to_string().to_ascii_lowercase()),
        _ => None,
    }
}

/// Decoded text content of a node and all its descendants.
fn collect_text(node: &Handle) -> String {
    fn walk(node: &Handle, out: &mut String) {
        if let NodeData::Text { contents } = &node.data {
            out.push_str(&contents.borrow());
        }
        for child in node.children.borrow().iter() {
            walk(child, out);
        }
    }
    let mut out = String::new();
    walk(node, &mut out);
    out
}

/// The body element's children, falling back to the document root's
/// children when no body element exists.
fn body_children(dom: &RcDom) -> Vec<Handle> {
    fn find_body(node: &Handle, out: &mut Vec<Handle>) -> bool {
        if let NodeData::Element { name, .. } = &node.data {
            if name.local.to_string().eq_ignore_ascii_case("body") {
                out.extend(node.children.borrow().iter().cloned());
                return true;
            }
        }
        for child in node.children.borrow().iter() {
            if find_body(child, out) {
                return true;
            }
        }
        false
    }

    let mut children = Vec::new();
    if !find_body(&dom.document, &mut children) {
        children = dom.document.children.borrow().iter().cloned().collect();
    }
    children
}

fn find_elements(node: &Handle, name: &str, out: &mut Vec<Handle>) {
    if tag_lower(node).as_deref() == Some(name) {
        out.push(node.clone());
    }
    for child in node.children.borrow().iter() {
        find_elements(child, name, out);
    }
}

fn parse_table(node: &Handle) -> TableBlock {
    let mut tr_nodes = Vec::new();
    find_elements(node, "tr", &mut tr_nodes);

    let mut rows = Vec::new();
    for tr in tr_nodes {
        let mut cells = Vec::new();
        for child in tr.children.borrow().iter() {
            let Some(tag) = tag_lower(child) else {
                continue;
            };
            if tag != "td" && tag != "th" {
                continue;
            }
            cells.push(Cell {
                text: collect_text(child).trim().to_string(),
                is_header: tag == "th",
            });
        }
        rows.push(Row::new(cells));
    }
    TableBlock::new(rows)
}
