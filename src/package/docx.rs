//! Word-processing package (DOCX) reading and writing.

use std::io::{Read, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use zip::write::SimpleFileOptions;

use crate::error::{Error, Result};
use crate::model::{Block, Cell, Document, Metadata, Row, StyleTag, TableBlock, TextBlock};

use super::xml_escape;

const WML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

fn wml<'a>(node: roxmltree::Node<'a, 'a>, name: &str) -> Option<roxmltree::Node<'a, 'a>> {
    node.children()
        .find(|n| n.tag_name().name() == name && n.tag_name().namespace() == Some(WML_NS))
}

fn wml_attr<'a>(node: roxmltree::Node<'a, 'a>, child: &str) -> Option<&'a str> {
    wml(node, child).and_then(|n| n.attribute((WML_NS, "val")))
}

/// All `w:t` text under a node, concatenated in document order.
fn text_content(node: roxmltree::Node) -> String {
    node.descendants()
        .filter(|n| n.tag_name().name() == "t" && n.tag_name().namespace() == Some(WML_NS))
        .filter_map(|n| n.text())
        .collect()
}

/// Parse a DOCX file into a [`Document`].
///
/// Fails with [`Error::NotFound`] if the path does not exist and with
/// [`Error::InvalidFormat`] if the package has no document body.
/// Whitespace-only paragraphs contribute no block.
pub fn parse(path: &Path) -> Result<Document> {
    if !path.exists() {
        return Err(Error::NotFound(path.to_path_buf()));
    }
    let file = std::fs::File::open(path)?;
    let mut zip = zip::ZipArchive::new(file)?;

    let metadata = parse_core_properties(&mut zip);

    let mut xml_content = String::new();
    zip.by_name("word/document.xml")
        .map_err(|_| Error::InvalidFormat("no document body".into()))?
        .read_to_string(&mut xml_content)?;

    let xml = roxmltree::Document::parse(&xml_content)?;
    let body = wml(xml.root_element(), "body")
        .ok_or_else(|| Error::InvalidFormat("no document body".into()))?;

    let mut blocks = Vec::new();
    for node in body.children() {
        if node.tag_name().namespace() != Some(WML_NS) {
            continue;
        }
        match node.tag_name().name() {
            "p" => {
                let text = text_content(node);
                if text.trim().is_empty() {
                    continue;
                }
                let style = wml(node, "pPr")
                    .and_then(|ppr| wml_attr(ppr, "pStyle"))
                    .map(StyleTag::from_docx_style_id)
                    .unwrap_or_default();
                blocks.push(Block::Text(TextBlock { style, text }));
            }
            "tbl" => blocks.push(Block::Table(parse_table(node))),
            _ => {}
        }
    }

    log::debug!("parsed {} blocks from {}", blocks.len(), path.display());
    Ok(Document { metadata, blocks })
}

fn parse_table(node: roxmltree::Node) -> TableBlock {
    let mut rows = Vec::new();
    for (row_index, tr) in node
        .children()
        .filter(|n| n.tag_name().name() == "tr" && n.tag_name().namespace() == Some(WML_NS))
        .enumerate()
    {
        let cells = tr
            .children()
            .filter(|n| n.tag_name().name() == "tc" && n.tag_name().namespace() == Some(WML_NS))
            .map(|tc| Cell {
                text: text_content(tc),
                is_header: row_index == 0,
            })
            .collect();
        rows.push(Row::new(cells));
    }
    TableBlock::new(rows)
}

/// Read `docProps/core.xml` into a fixed metadata struct.
///
/// An absent or unparseable part yields default metadata, never an error.
fn parse_core_properties(zip: &mut zip::ZipArchive<std::fs::File>) -> Metadata {
    let mut metadata = Metadata::default();

    let mut xml_content = String::new();
    let Ok(mut file) = zip.by_name("docProps/core.xml") else {
        return metadata;
    };
    if file.read_to_string(&mut xml_content).is_err() {
        return metadata;
    }
    let Ok(xml) = roxmltree::Document::parse(&xml_content) else {
        return metadata;
    };

    for node in xml.root_element().children().filter(|n| n.is_element()) {
        let value = node.text().map(str::to_string).filter(|t| !t.is_empty());
        match node.tag_name().name() {
            "title" => metadata.title = value,
            "creator" => metadata.author = value,
            "subject" => metadata.subject = value,
            "lastModifiedBy" => metadata.last_modified_by = value,
            "created" => metadata.created = node.text().and_then(parse_w3c_date),
            "modified" => metadata.modified = node.text().and_then(parse_w3c_date),
            _ => {}
        }
    }
    metadata
}

fn parse_w3c_date(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Write a [`Document`] as a minimal DOCX package.
///
/// One `w:p` per text block, tagged with the heading style where present.
/// Table blocks are not emitted on this path; the spreadsheet inverse is
/// the only direction that reconstructs tables from HTML.
pub fn write(doc: &Document, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    let mut zip = zip::ZipWriter::new(file);
    let opts = SimpleFileOptions::default();

    zip.start_file("[Content_Types].xml", opts)?;
    zip.write_all(CONTENT_TYPES.as_bytes())?;

    zip.start_file("_rels/.rels", opts)?;
    zip.write_all(ROOT_RELS.as_bytes())?;

    zip.start_file("word/document.xml", opts)?;
    zip.write_all(document_xml(doc).as_bytes())?;

    zip.start_file("word/styles.xml", opts)?;
    zip.write_all(styles_xml().as_bytes())?;

    zip.finish()?;
    Ok(())
}

fn document_xml(doc: &Document) -> String {
    let mut body = String::new();
    let mut skipped_tables = 0usize;
    for block in &doc.blocks {
        match block {
            Block::Text(text) => body.push_str(&paragraph_xml(text)),
            Block::Table(_) => skipped_tables += 1,
        }
    }
    if skipped_tables > 0 {
        log::debug!("dropped {skipped_tables} table blocks on the word-processing inverse path");
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    {body}
    <w:sectPr>
      <w:pgSz w:w="11906" w:h="16838"/>
      <w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440"/>
    </w:sectPr>
  </w:body>
</w:document>"#
    )
}

fn paragraph_xml(block: &TextBlock) -> String {
    let mut out = String::from("<w:p>");
    if let Some(style_id) = block.style.docx_style_id() {
        out.push_str(&format!("<w:pPr><w:pStyle w:val=\"{style_id}\"/></w:pPr>"));
    }
    out.push_str("<w:r><w:t xml:space=\"preserve\">");
    out.push_str(&xml_escape(&block.text));
    out.push_str("</w:t></w:r></w:p>");
    out
}

fn styles_xml() -> String {
    // Half-point font sizes for Heading1..Heading6.
    const HEADING_SIZES: [u8; 6] = [32, 28, 26, 24, 22, 20];

    let mut out = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:style w:type="paragraph" w:default="1" w:styleId="Normal">
    <w:name w:val="Normal"/>
    <w:qFormat/>
  </w:style>
"#,
    );
    for (i, size) in HEADING_SIZES.iter().enumerate() {
        let level = i + 1;
        out.push_str(&format!(
            r#"  <w:style w:type="paragraph" w:styleId="Heading{level}">
    <w:name w:val="heading {level}"/>
    <w:basedOn w:val="Normal"/>
    <w:next w:val="Normal"/>
    <w:qFormat/>
    <w:pPr><w:keepNext/><w:spacing w:before="240" w:after="120"/><w:outlineLvl w:val="{outline}"/></w:pPr>
    <w:rPr><w:b/><w:sz w:val="{size}"/></w:rPr>
  </w:style>
"#,
            outline = i,
        ));
    }
    out.push_str("</w:styles>");
    out
}

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
  <Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>
</Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#;
