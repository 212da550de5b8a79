//! FILENAME: core/sheet/src/sheet.rs
//! PURPOSE: A named-column table of string cells.
//! CONTEXT: Rows are kept in source order; the index builder depends on that
//! order for reference grouping. Columns are addressed by header name so the
//! caller may hand over the requested columns in any order.

use crate::error::SheetError;
use serde::{Deserialize, Serialize};

/// Dense row-major storage: `rows[r][c]` is the cell under `columns[c]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sheet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    /// Creates a sheet with the given header and no rows.
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Sheet {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Appends a row. Cells are stored as-is; shape is checked when the
    /// sheet is projected.
    pub fn push_row<S: Into<String>>(&mut self, cells: impl IntoIterator<Item = S>) {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    /// Builder-style variant of `push_row`.
    pub fn with_row<S: Into<String>>(mut self, cells: impl IntoIterator<Item = S>) -> Self {
        self.push_row(cells);
        self
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the position of the first column with this header.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Resolves every name to its column position, failing on the first
    /// missing one.
    pub fn resolve_columns<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<usize>, SheetError> {
        names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                self.column_index(name)
                    .ok_or_else(|| SheetError::ColumnNotFound(name.to_string()))
            })
            .collect()
    }

    /// Returns the cells of a row.
    pub fn row(&self, row: usize) -> Result<&[String], SheetError> {
        self.rows
            .get(row)
            .map(Vec::as_slice)
            .ok_or(SheetError::RowOutOfRange {
                row,
                rows: self.rows.len(),
            })
    }

    /// Returns a cell, or a `RaggedRow` error if the row is too short.
    pub fn cell(&self, row: usize, col: usize) -> Result<&str, SheetError> {
        let cells = self.row(row)?;
        cells.get(col).map(String::as_str).ok_or(SheetError::RaggedRow {
            row,
            expected: self.columns.len(),
            found: cells.len(),
        })
    }

    /// Checks that a row has a cell for every column of the header.
    pub fn check_row(&self, row: usize) -> Result<(), SheetError> {
        let found = self.row(row)?.len();
        if found < self.columns.len() {
            return Err(SheetError::RaggedRow {
                row,
                expected: self.columns.len(),
                found,
            });
        }
        Ok(())
    }

    /// Builds a new sheet holding only `names`, in that order.
    /// A column may be requested more than once.
    pub fn project<S: AsRef<str>>(&self, names: &[S]) -> Result<Sheet, SheetError> {
        let indices = self.resolve_columns(names)?;

        let mut rows = Vec::with_capacity(self.rows.len());
        for row in 0..self.rows.len() {
            let projected = indices
                .iter()
                .map(|&col| self.cell(row, col).map(str::to_string))
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(projected);
        }

        Ok(Sheet {
            columns: names.iter().map(|n| n.as_ref().to_string()).collect(),
            rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Sheet {
        Sheet::new(["form", "ref", "parent"])
            .with_row(["abc", "r0", "x@y"])
            .with_row(["def", "r1", ""])
    }

    #[test]
    fn test_column_index() {
        let sheet = sample();
        assert_eq!(sheet.column_index("ref"), Some(1));
        assert_eq!(sheet.column_index("missing"), None);
    }

    #[test]
    fn test_project_reorders_columns() {
        let projected = sample().project(&["parent", "form"]).unwrap();
        assert_eq!(projected.columns, vec!["parent", "form"]);
        assert_eq!(projected.rows[0], vec!["x@y", "abc"]);
        assert_eq!(projected.rows[1], vec!["", "def"]);
    }

    #[test]
    fn test_project_missing_column() {
        let err = sample().project(&["form", "nope"]).unwrap_err();
        assert_eq!(err, SheetError::ColumnNotFound("nope".to_string()));
    }

    #[test]
    fn test_short_row_is_an_error() {
        let sheet = sample().with_row(["ghi"]);
        assert_eq!(sheet.cell(2, 0).unwrap(), "ghi");
        assert!(sheet.check_row(1).is_ok());
        assert!(sheet.check_row(2).is_err());
        let err = sheet.project(&["form", "ref"]).unwrap_err();
        assert_eq!(
            err,
            SheetError::RaggedRow {
                row: 2,
                expected: 3,
                found: 1
            }
        );
    }

    #[test]
    fn test_row_out_of_range() {
        let sheet = sample();
        let expected = SheetError::RowOutOfRange { row: 2, rows: 2 };
        assert_eq!(sheet.cell(2, 0).unwrap_err(), expected);
        assert_eq!(sheet.check_row(2).unwrap_err(), expected);
        assert_eq!(sheet.row(1).unwrap().len(), 3);
    }

    #[test]
    fn test_resolve_columns() {
        let sheet = sample();
        assert_eq!(sheet.resolve_columns(&["parent", "form"]).unwrap(), vec![2, 0]);
        assert!(sheet.resolve_columns::<&str>(&[]).unwrap().is_empty());
    }
}
