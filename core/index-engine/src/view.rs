//! FILENAME: core/index-engine/src/view.rs
//! Index View - Tabular output handed back to the I/O layer.
//!
//! Each row carries one (count, key) entry per level, outermost parent first
//! and form last, followed by the formatted references. A parent entry is
//! only present on the first row of its block; the rows after it leave the
//! entry blank to mean "same parent as above".

use serde::Serialize;
use sheet::CellValue;

/// Count and key of one level of one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelEntry {
    pub count: usize,
    pub key: String,
}

impl LevelEntry {
    pub fn new(count: usize, key: impl Into<String>) -> Self {
        LevelEntry {
            count,
            key: key.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexRow {
    /// `None` marks a blank-filled (continued) parent level.
    /// The form level is always present.
    pub levels: Vec<Option<LevelEntry>>,

    /// References of the form, grouped and joined.
    pub refs: String,
}

impl IndexRow {
    /// The form entry of this row.
    pub fn form(&self) -> Option<&LevelEntry> {
        self.levels.last().and_then(Option::as_ref)
    }

    /// Renders the row as cells: two per level, then the references.
    pub fn to_cells(&self) -> Vec<CellValue> {
        let mut cells = Vec::with_capacity(self.levels.len() * 2 + 1);
        for level in &self.levels {
            match level {
                Some(entry) => {
                    cells.push(CellValue::Count(entry.count));
                    cells.push(CellValue::text(entry.key.as_str()));
                }
                None => {
                    cells.push(CellValue::Empty);
                    cells.push(CellValue::Empty);
                }
            }
        }
        cells.push(CellValue::text(self.refs.as_str()));
        cells
    }
}

/// The complete flattened index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexView {
    /// Output header, see `IndexDefinition::output_columns`.
    pub columns: Vec<String>,

    pub rows: Vec<IndexRow>,

    /// Number of references in the whole index.
    pub total: usize,
}

impl IndexView {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows as cells, ready to be written to a spreadsheet.
    pub fn to_sheet_rows(&self) -> Vec<Vec<CellValue>> {
        self.rows.iter().map(IndexRow::to_cells).collect()
    }

    /// Rows as display strings. Blank-filled cells are empty strings.
    pub fn display_rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| row.to_cells().iter().map(CellValue::display_value).collect())
            .collect()
    }
}
