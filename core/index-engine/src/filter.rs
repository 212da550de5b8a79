//! FILENAME: core/index-engine/src/filter.rs
//! Compiled element filters.

use regex::Regex;
use sheet::Sheet;
use crate::definition::FilterDefinition;
use crate::error::IndexError;

/// A filter resolved against a sheet: the column position and the anchored
/// patterns.
#[derive(Debug, Clone)]
pub struct CompiledFilter {
    /// Header of the filtered column.
    pub column: String,

    /// Position of the column in the sheet.
    pub col_index: usize,

    patterns: Vec<Regex>,
}

impl CompiledFilter {
    pub fn compile(definition: &FilterDefinition, col_index: usize) -> Result<Self, IndexError> {
        let patterns = definition
            .patterns
            .iter()
            .map(|pattern| {
                Regex::new(&format!("^(?:{})$", pattern)).map_err(|source| {
                    IndexError::InvalidPattern {
                        column: definition.column.clone(),
                        pattern: pattern.clone(),
                        source,
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CompiledFilter {
            column: definition.column.clone(),
            col_index,
            patterns,
        })
    }

    /// True when any pattern matches the whole value.
    pub fn matches(&self, value: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(value))
    }
}

/// Resolves and compiles every filter of a definition.
pub fn compile_filters(
    filters: &[FilterDefinition],
    sheet: &Sheet,
) -> Result<Vec<CompiledFilter>, IndexError> {
    filters
        .iter()
        .map(|filter| {
            let col_index = sheet
                .column_index(&filter.column)
                .ok_or_else(|| IndexError::MissingColumn(filter.column.clone()))?;
            CompiledFilter::compile(filter, col_index)
        })
        .collect()
}
