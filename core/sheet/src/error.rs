//! FILENAME: core/sheet/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SheetError {
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Row {row} is out of range, sheet has {rows} rows")]
    RowOutOfRange { row: usize, rows: usize },

    #[error("Row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}
