//! FILENAME: core/sheet/src/cell.rs
//! PURPOSE: Defines the value of a single output cell.
//! CONTEXT: Input cells are plain strings (empty cells are normalized to "",
//! never to a null marker). Output cells need to distinguish counts from
//! text and from deliberately blank cells, which is what `CellValue` does.

use serde::{Deserialize, Serialize};

/// Represents the content of one cell of a generated table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellValue {
    Empty,
    Count(usize),
    Text(String),
}

impl CellValue {
    pub fn text(s: impl Into<String>) -> Self {
        CellValue::Text(s.into())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Returns the display value of the cell as a String.
    /// Blank cells render as the empty string.
    pub fn display_value(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Count(n) => n.to_string(),
            CellValue::Text(s) => s.clone(),
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Empty
    }
}

impl From<usize> for CellValue {
    fn from(n: usize) -> Self {
        CellValue::Count(n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}
