//! FILENAME: core/index-engine/src/error.rs

use sheet::SheetError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IndexError {
    // Configuration errors: raised before any row is processed.
    #[error("Column not found: {0}")]
    MissingColumn(String),

    #[error("At least one reference column is required")]
    NoReferenceColumns,

    #[error("Split delimiter must not be empty")]
    EmptySplitChar,

    #[error("Filter column listed more than once: {0}")]
    DuplicateFilterColumn(String),

    #[error("Filter on column {0} has no patterns")]
    EmptyFilter(String),

    #[error("Invalid pattern {pattern:?} for filter column {column}: {source}")]
    InvalidPattern {
        column: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid index definition: {0}")]
    Definition(#[from] serde_json::Error),

    // Data errors: abort the build mid-way.
    #[error("Row {row} has {found} cells, expected {expected}")]
    ShortRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Row {row} is out of range, sheet has {rows} rows")]
    RowOutOfRange { row: usize, rows: usize },

    #[error("Index path has {found} levels, expected {expected}")]
    DepthMismatch { expected: usize, found: usize },
}

impl IndexError {
    /// True for errors caused by the definition or the column set rather
    /// than by the content of a row.
    pub fn is_configuration_error(&self) -> bool {
        !matches!(
            self,
            IndexError::ShortRow { .. }
                | IndexError::RowOutOfRange { .. }
                | IndexError::DepthMismatch { .. }
        )
    }
}

impl From<SheetError> for IndexError {
    fn from(err: SheetError) -> Self {
        match err {
            SheetError::ColumnNotFound(name) => IndexError::MissingColumn(name),
            SheetError::RowOutOfRange { row, rows } => IndexError::RowOutOfRange { row, rows },
            SheetError::RaggedRow { row, expected, found } => {
                IndexError::ShortRow { row, expected, found }
            }
        }
    }
}
