//! Workbook sheet types.

use super::Row;
use serde::{Deserialize, Serialize};

/// A single spreadsheet sheet: a name plus ordered rows.
///
/// Structurally a degenerate document with exactly one table; the HTML
/// renderer emits one table per sheet preceded by a sheet-name heading.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sheet {
    /// Sheet name, in workbook order
    pub name: String,

    /// Rows in sheet order; row 1 is the header row
    pub rows: Vec<Row>,
}

impl Sheet {
    /// Create a sheet from a name and rows.
    pub fn new(name: impl Into<String>, rows: Vec<Row>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if the sheet has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Cell;

    #[test]
    fn test_sheet_new() {
        let sheet = Sheet::new(
            "Q1",
            vec![Row::new(vec![Cell::header("Region"), Cell::header("Total")])],
        );
        assert_eq!(sheet.name, "Q1");
        assert_eq!(sheet.row_count(), 1);
        assert!(!sheet.is_empty());
    }
}
