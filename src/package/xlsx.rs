//! Spreadsheet package (XLSX) reading and writing.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::path::Path;

use zip::write::SimpleFileOptions;

use crate::error::{Error, Result};
use crate::model::{Cell, Row, Sheet};

use super::xml_escape;

const SML_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const REL_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const PKG_REL_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

type Archive = zip::ZipArchive<std::fs::File>;

fn read_part(zip: &mut Archive, name: &str) -> Option<String> {
    let mut content = String::new();
    let Ok(mut file) = zip.by_name(name) else {
        return None;
    };
    if file.read_to_string(&mut content).is_err() {
        return None;
    }
    Some(content)
}

/// Parse every sheet of an XLSX file, in workbook order.
///
/// Sheets without any row are dropped. Fails with [`Error::NotFound`] if
/// the path does not exist and with [`Error::InvalidFormat`] if the
/// package has no workbook part.
pub fn parse(path: &Path) -> Result<Vec<Sheet>> {
    parse_filtered(path, None)
}

/// Parse sheets, optionally restricted to a single sheet name.
pub fn parse_filtered(path: &Path, name_filter: Option<&str>) -> Result<Vec<Sheet>> {
    if !path.exists() {
        return Err(Error::NotFound(path.to_path_buf()));
    }
    let file = std::fs::File::open(path)?;
    let mut zip = zip::ZipArchive::new(file)?;

    let workbook_xml = read_part(&mut zip, "xl/workbook.xml")
        .ok_or_else(|| Error::InvalidFormat("no workbook".into()))?;
    let entries = workbook_entries(&workbook_xml)?;
    let targets = worksheet_targets(&mut zip);
    let shared = shared_strings(&mut zip)?;

    let mut sheets = Vec::new();
    for (position, entry) in entries.iter().enumerate() {
        if name_filter.is_some_and(|wanted| wanted != entry.name) {
            continue;
        }
        // Resolve the worksheet part through the relationship id, falling
        // back to the conventional by-position part name.
        let part = entry
            .rel_id
            .as_deref()
            .and_then(|id| targets.get(id).cloned())
            .unwrap_or_else(|| format!("xl/worksheets/sheet{}.xml", position + 1));
        let Some(sheet_xml) = read_part(&mut zip, &part) else {
            log::warn!("worksheet part {part} missing for sheet '{}'", entry.name);
            continue;
        };
        let rows = parse_rows(&sheet_xml, &shared)?;
        if rows.is_empty() {
            continue;
        }
        sheets.push(Sheet::new(entry.name.clone(), rows));
    }

    log::debug!("parsed {} sheets from {}", sheets.len(), path.display());
    Ok(sheets)
}

/// List sheet names in workbook order, including empty sheets.
pub fn sheet_names(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Err(Error::NotFound(path.to_path_buf()));
    }
    let file = std::fs::File::open(path)?;
    let mut zip = zip::ZipArchive::new(file)?;
    let workbook_xml = read_part(&mut zip, "xl/workbook.xml")
        .ok_or_else(|| Error::InvalidFormat("no workbook".into()))?;
    Ok(workbook_entries(&workbook_xml)?
        .into_iter()
        .map(|e| e.name)
        .collect())
}

struct SheetEntry {
    name: String,
    rel_id: Option<String>,
}

fn workbook_entries(workbook_xml: &str) -> Result<Vec<SheetEntry>> {
    let xml = roxmltree::Document::parse(workbook_xml)?;
    let mut entries = Vec::new();
    for node in xml.descendants() {
        if node.tag_name().name() != "sheet" || node.tag_name().namespace() != Some(SML_NS) {
            continue;
        }
        let Some(name) = node.attribute("name") else {
            continue;
        };
        entries.push(SheetEntry {
            name: name.to_string(),
            rel_id: node.attribute((REL_NS, "id")).map(str::to_string),
        });
    }
    Ok(entries)
}

/// Map relationship ids to worksheet part names inside the package.
fn worksheet_targets(zip: &mut Archive) -> HashMap<String, String> {
    let mut targets = HashMap::new();
    let Some(rels_xml) = read_part(zip, "xl/_rels/workbook.xml.rels") else {
        return targets;
    };
    let Ok(xml) = roxmltree::Document::parse(&rels_xml) else {
        return targets;
    };
    for node in xml.descendants() {
        if node.tag_name().name() != "Relationship"
            || node.tag_name().namespace() != Some(PKG_REL_NS)
        {
            continue;
        }
        let (Some(id), Some(target)) = (node.attribute("Id"), node.attribute("Target")) else {
            continue;
        };
        let part = match target.strip_prefix('/') {
            Some(absolute) => absolute.to_string(),
            None => format!("xl/{target}"),
        };
        targets.insert(id.to_string(), part);
    }
    targets
}

/// Load the shared-string table, one entry per `si` in index order.
fn shared_strings(zip: &mut Archive) -> Result<Vec<String>> {
    let Some(content) = read_part(zip, "xl/sharedStrings.xml") else {
        return Ok(Vec::new());
    };
    let xml = roxmltree::Document::parse(&content)?;
    let mut strings = Vec::new();
    for si in xml.root_element().children() {
        if si.tag_name().name() != "si" || si.tag_name().namespace() != Some(SML_NS) {
            continue;
        }
        let text: String = si
            .descendants()
            .filter(|n| n.tag_name().name() == "t" && n.tag_name().namespace() == Some(SML_NS))
            .filter_map(|n| n.text())
            .collect();
        strings.push(text);
    }
    Ok(strings)
}

fn parse_rows(sheet_xml: &str, shared: &[String]) -> Result<Vec<Row>> {
    let xml = roxmltree::Document::parse(sheet_xml)?;
    let mut rows = Vec::new();
    for (row_index, row_node) in xml
        .descendants()
        .filter(|n| n.tag_name().name() == "row" && n.tag_name().namespace() == Some(SML_NS))
        .enumerate()
    {
        let cells = row_node
            .children()
            .filter(|n| n.tag_name().name() == "c" && n.tag_name().namespace() == Some(SML_NS))
            .map(|c| Cell {
                text: cell_text(c, shared),
                // First row of each sheet renders as a header row; this is
                // a fixed rule, independent of the actual cell content.
                is_header: row_index == 0,
            })
            .collect();
        rows.push(Row::new(cells));
    }
    Ok(rows)
}

/// Resolve a cell's displayed text.
///
/// Shared-string references resolve by integer index; inline strings take
/// their embedded text; anything else uses the raw stored value. A missing
/// value yields empty text.
fn cell_text(cell: roxmltree::Node, shared: &[String]) -> String {
    match cell.attribute("t") {
        Some("s") => {
            let value: String = cell
                .children()
                .find(|n| n.tag_name().name() == "v")
                .and_then(|n| n.text())
                .unwrap_or_default()
                .to_string();
            value
                .trim()
                .parse::<usize>()
                .ok()
                .and_then(|index| shared.get(index))
                .cloned()
                .unwrap_or_default()
        }
        Some("inlineStr") => cell
            .descendants()
            .filter(|n| n.tag_name().name() == "t" && n.tag_name().namespace() == Some(SML_NS))
            .filter_map(|n| n.text())
            .collect(),
        _ => cell
            .children()
            .find(|n| n.tag_name().name() == "v")
            .and_then(|n| n.text())
            .unwrap_or_default()
            .to_string(),
    }
}

/// Write sheets as a minimal XLSX package.
///
/// Cell values are written as inline strings; no numeric or date typing
/// is attempted.
pub fn write(sheets: &[Sheet], path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    let mut zip = zip::ZipWriter::new(file);
    let opts = SimpleFileOptions::default();

    zip.start_file("[Content_Types].xml", opts)?;
    zip.write_all(content_types_xml(sheets.len()).as_bytes())?;

    zip.start_file("_rels/.rels", opts)?;
    zip.write_all(ROOT_RELS.as_bytes())?;

    zip.start_file("xl/workbook.xml", opts)?;
    zip.write_all(workbook_xml(sheets).as_bytes())?;

    zip.start_file("xl/_rels/workbook.xml.rels", opts)?;
    zip.write_all(workbook_rels_xml(sheets.len()).as_bytes())?;

    for (i, sheet) in sheets.iter().enumerate() {
        zip.start_file(format!("xl/worksheets/sheet{}.xml", i + 1), opts)?;
        zip.write_all(worksheet_xml(sheet).as_bytes())?;
    }

    zip.finish()?;
    Ok(())
}

fn content_types_xml(sheet_count: usize) -> String {
    let mut out = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
"#,
    );
    for i in 1..=sheet_count {
        out.push_str(&format!(
            "  <Override PartName=\"/xl/worksheets/sheet{i}.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml\"/>\n"
        ));
    }
    out.push_str("</Types>");
    out
}

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;

fn workbook_xml(sheets: &[Sheet]) -> String {
    let mut out = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <sheets>
"#,
    );
    for (i, sheet) in sheets.iter().enumerate() {
        out.push_str(&format!(
            "    <sheet name=\"{}\" sheetId=\"{}\" r:id=\"rId{}\"/>\n",
            xml_escape(&sheet.name),
            i + 1,
            i + 1,
        ));
    }
    out.push_str("  </sheets>\n</workbook>");
    out
}

fn workbook_rels_xml(sheet_count: usize) -> String {
    let mut out = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
"#,
    );
    for i in 1..=sheet_count {
        out.push_str(&format!(
            "  <Relationship Id=\"rId{i}\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet\" Target=\"worksheets/sheet{i}.xml\"/>\n"
        ));
    }
    out.push_str("</Relationships>");
    out
}

fn worksheet_xml(sheet: &Sheet) -> String {
    let mut out = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
  <sheetData>
"#,
    );
    for (row_index, row) in sheet.rows.iter().enumerate() {
        out.push_str(&format!("    <row r=\"{}\">", row_index + 1));
        for (col_index, cell) in row.cells.iter().enumerate() {
            out.push_str(&format!(
                "<c r=\"{}{}\" t=\"inlineStr\"><is><t xml:space=\"preserve\">{}</t></is></c>",
                column_name(col_index),
                row_index + 1,
                xml_escape(&cell.text),
            ));
        }
        out.push_str("</row>\n");
    }
    out.push_str("  </sheetData>\n</worksheet>");
    out
}

/// Spreadsheet column name for a zero-based index: A, B, .., Z, AA, AB, ..
fn column_name(index: usize) -> String {
    let mut n = index + 1;
    let mut name = String::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        name.insert(0, (b'A' + rem as u8) as char);
        n = (n - 1) / 26;
    }
    name
}
