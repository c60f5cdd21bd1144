//! Block-level content types.

use serde::{Deserialize, Serialize};

/// Paragraph style tag carried by a [`TextBlock`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleTag {
    /// Body text
    #[default]
    Paragraph,
    /// Heading level 1
    Heading1,
    /// Heading level 2
    Heading2,
    /// Heading level 3
    Heading3,
    /// Heading level 4
    Heading4,
    /// Heading level 5
    Heading5,
    /// Heading level 6
    Heading6,
}

impl StyleTag {
    /// Style tag for a heading level, if `level` is in `1..=6`.
    pub fn heading(level: u8) -> Option<Self> {
        match level {
            1 => Some(StyleTag::Heading1),
            2 => Some(StyleTag::Heading2),
            3 => Some(StyleTag::Heading3),
            4 => Some(StyleTag::Heading4),
            5 => Some(StyleTag::Heading5),
            6 => Some(StyleTag::Heading6),
            _ => None,
        }
    }

    /// Heading level in `1..=6`, or `None` for body text.
    pub fn heading_level(&self) -> Option<u8> {
        match self {
            StyleTag::Paragraph => None,
            StyleTag::Heading1 => Some(1),
            StyleTag::Heading2 => Some(2),
            StyleTag::Heading3 => Some(3),
            StyleTag::Heading4 => Some(4),
            StyleTag::Heading5 => Some(5),
            StyleTag::Heading6 => Some(6),
        }
    }

    /// The HTML element name this style renders as.
    pub fn tag_name(&self) -> &'static str {
        match self.heading_level() {
            Some(1) => "h1",
            Some(2) => "h2",
            Some(3) => "h3",
            Some(4) => "h4",
            Some(5) => "h5",
            Some(6) => "h6",
            _ => "p",
        }
    }

    /// The WordprocessingML paragraph style identifier, or `None` for body text.
    pub fn docx_style_id(&self) -> Option<&'static str> {
        match self {
            StyleTag::Paragraph => None,
            StyleTag::Heading1 => Some("Heading1"),
            StyleTag::Heading2 => Some("Heading2"),
            StyleTag::Heading3 => Some("Heading3"),
            StyleTag::Heading4 => Some("Heading4"),
            StyleTag::Heading5 => Some("Heading5"),
            StyleTag::Heading6 => Some("Heading6"),
        }
    }

    /// Map a WordprocessingML style identifier onto a style tag.
    ///
    /// Anything outside the fixed `Heading1..Heading6` table is body text.
    pub fn from_docx_style_id(id: &str) -> Self {
        match id {
            "Heading1" => StyleTag::Heading1,
            "Heading2" => StyleTag::Heading2,
            "Heading3" => StyleTag::Heading3,
            "Heading4" => StyleTag::Heading4,
            "Heading5" => StyleTag::Heading5,
            "Heading6" => StyleTag::Heading6,
            _ => StyleTag::Paragraph,
        }
    }
}

/// A paragraph or heading with its text content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextBlock {
    /// Paragraph style
    pub style: StyleTag,

    /// Decoded text content
    pub text: String,
}

impl TextBlock {
    /// Create a body-text block.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self {
            style: StyleTag::Paragraph,
            text: text.into(),
        }
    }

    /// Create a heading block; levels outside `1..=6` fall back to body text.
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Self {
            style: StyleTag::heading(level).unwrap_or_default(),
            text: text.into(),
        }
    }
}

/// A table as ordered rows of cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableBlock {
    /// Rows in document order
    pub rows: Vec<Row>,
}

impl TableBlock {
    /// Create a table from rows.
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns, based on the first row.
    pub fn column_count(&self) -> usize {
        self.rows.first().map(|r| r.cells.len()).unwrap_or(0)
    }
}

/// A table row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    /// Cells in document order
    pub cells: Vec<Cell>,
}

impl Row {
    /// Create a row from cells.
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    /// Create a row of body cells from text values.
    pub fn from_strings<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self::new(values.into_iter().map(Cell::text).collect())
    }

    /// True when every cell in the row is flagged as header.
    pub fn is_header(&self) -> bool {
        !self.cells.is_empty() && self.cells.iter().all(|c| c.is_header)
    }
}

/// A single table cell.
///
/// `is_header` is derived from row position when the source is parsed
/// (first table row, or spreadsheet row 1); it is recorded here so the
/// renderer does not have to re-derive it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Decoded cell text
    pub text: String,

    /// Whether the cell belongs to a header row
    pub is_header: bool,
}

impl Cell {
    /// Create a body cell.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_header: false,
        }
    }

    /// Create a header cell.
    pub fn header(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_header: true,
        }
    }
}

/// A block-level element of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A paragraph or heading
    Text(TextBlock),

    /// A table
    Table(TableBlock),
}

impl Block {
    /// Create a body-text block.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Block::Text(TextBlock::paragraph(text))
    }

    /// Create a heading block.
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Block::Text(TextBlock::heading(level, text))
    }

    /// Create a table block.
    pub fn table(rows: Vec<Row>) -> Self {
        Block::Table(TableBlock::new(rows))
    }

    /// Check if this block is a table.
    pub fn is_table(&self) -> bool {
        matches!(self, Block::Table(_))
    }

    /// Plain text content of the block.
    pub fn plain_text(&self) -> String {
        match self {
            Block::Text(t) => t.text.clone(),
            Block::Table(t) => t
                .rows
                .iter()
                .map(|row| {
                    row.cells
                        .iter()
                        .map(|c| c.text.as_str())
                        .collect::<Vec<_>>()
                        .join("\t")
                })
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}
