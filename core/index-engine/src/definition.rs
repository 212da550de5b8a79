//! FILENAME: core/index-engine/src/definition.rs
//! Index Definition - The serializable configuration.
//!
//! This module contains the types needed to DESCRIBE an index:
//! which columns carry references, the form and its parents, how
//! multi-valued cells are split, and which elements are filtered.
//! A definition is an immutable snapshot of user intent; it is resolved
//! against a concrete sheet by the engine.

use serde::{Deserialize, Serialize};
use crate::error::IndexError;

// ============================================================================
// FORMATTING CONSTANTS
// ============================================================================

/// Joins the reference-column cells of one row into a single reference.
pub const REF_COL_SEPARATOR: &str = ", ";

/// Joins the grouped references of one form.
pub const REF_SEPARATOR: &str = "; ";

/// Appended to a level column name to name its count column.
pub const COUNT_COL_SUFFIX: &str = "_count";

/// Name of the last output column.
pub const REFS_COL_NAME: &str = "refs";

/// Formats a reference repeated `count` times in a row.
pub fn format_ref_with_count(reference: &str, count: usize) -> String {
    format!("{} ({})", reference, count)
}

/// Name of the count column that precedes `column` in the output.
pub fn count_column_name(column: &str) -> String {
    format!("{}{}", column, COUNT_COL_SUFFIX)
}

// ============================================================================
// FILTERS
// ============================================================================

/// Regular expressions applied to the (possibly split) values of one column.
/// A value matches when any pattern matches it entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterDefinition {
    /// Header of the filtered column. May also be a parent column.
    pub column: String,

    /// Patterns in `regex` syntax. They are anchored at both ends when compiled.
    pub patterns: Vec<String>,
}

impl FilterDefinition {
    pub fn new<S: Into<String>>(
        column: impl Into<String>,
        patterns: impl IntoIterator<Item = S>,
    ) -> Self {
        FilterDefinition {
            column: column.into(),
            patterns: patterns.into_iter().map(Into::into).collect(),
        }
    }
}

// ============================================================================
// INDEX DEFINITION
// ============================================================================

/// Describes how rows of a sheet become an index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDefinition {
    /// Columns joined (in this order) into the reference of a row.
    pub ref_columns: Vec<String>,

    /// Column holding the indexed form. Rows with an empty form are skipped.
    pub form_column: String,

    /// Grouping columns, outermost first.
    #[serde(default)]
    pub parent_columns: Vec<String>,

    /// Delimiter for multi-valued parent and filter cells. `None` disables splitting.
    #[serde(default)]
    pub split_char: Option<String>,

    /// Element filters. With no filters every element is kept.
    #[serde(default)]
    pub filters: Vec<FilterDefinition>,

    /// Keep the elements that did NOT match any filter instead of those that did.
    #[serde(default)]
    pub filter_exclude: bool,
}

impl IndexDefinition {
    pub fn new<S: Into<String>>(
        ref_columns: impl IntoIterator<Item = S>,
        form_column: impl Into<String>,
    ) -> Self {
        IndexDefinition {
            ref_columns: ref_columns.into_iter().map(Into::into).collect(),
            form_column: form_column.into(),
            parent_columns: Vec::new(),
            split_char: None,
            filters: Vec::new(),
            filter_exclude: false,
        }
    }

    pub fn with_parent_columns<S: Into<String>>(
        mut self,
        columns: impl IntoIterator<Item = S>,
    ) -> Self {
        self.parent_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_split_char(mut self, split_char: impl Into<String>) -> Self {
        self.split_char = Some(split_char.into());
        self
    }

    pub fn with_filter(mut self, filter: FilterDefinition) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn with_filter_exclude(mut self, exclude: bool) -> Self {
        self.filter_exclude = exclude;
        self
    }

    /// Number of tree levels: one per parent column plus the form level.
    pub fn depth(&self) -> usize {
        self.parent_columns.len() + 1
    }

    /// The columns the I/O layer has to read, each listed once:
    /// references, form, parents, then filter columns not already listed.
    pub fn required_columns(&self) -> Vec<String> {
        let mut columns: Vec<String> = Vec::new();
        let candidates = self
            .ref_columns
            .iter()
            .chain(std::iter::once(&self.form_column))
            .chain(self.parent_columns.iter())
            .chain(self.filters.iter().map(|f| &f.column));

        for column in candidates {
            if !columns.contains(column) {
                columns.push(column.clone());
            }
        }
        columns
    }

    /// Output header: `<col>_count`, `<col>` per parent then for the form,
    /// followed by `refs`.
    pub fn output_columns(&self) -> Vec<String> {
        let mut columns = Vec::with_capacity(self.depth() * 2 + 1);
        for column in self.parent_columns.iter().chain(std::iter::once(&self.form_column)) {
            columns.push(count_column_name(column));
            columns.push(column.clone());
        }
        columns.push(REFS_COL_NAME.to_string());
        columns
    }

    /// Checks everything that can be checked without a sheet.
    /// Patterns are checked when the filters are compiled.
    pub fn validate(&self) -> Result<(), IndexError> {
        if self.ref_columns.is_empty() {
            return Err(IndexError::NoReferenceColumns);
        }

        if let Some(split_char) = &self.split_char {
            if split_char.is_empty() {
                return Err(IndexError::EmptySplitChar);
            }
        }

        for (i, filter) in self.filters.iter().enumerate() {
            if self.filters[..i].iter().any(|f| f.column == filter.column) {
                return Err(IndexError::DuplicateFilterColumn(filter.column.clone()));
            }
            if filter.patterns.is_empty() {
                return Err(IndexError::EmptyFilter(filter.column.clone()));
            }
        }

        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, IndexError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, IndexError> {
        Ok(serde_json::to_string(self)?)
    }
}
