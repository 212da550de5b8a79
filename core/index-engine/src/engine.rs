//! FILENAME: core/index-engine/src/engine.rs
//! Index Engine - Builds an index from a sheet and a definition.
//!
//! Algorithm:
//! 1. Validate the definition and resolve every column against the sheet
//!    (configuration errors surface here, before any row is read)
//! 2. Fold the rows, in order, into the index tree
//! 3. Flatten the tree in collated order into an IndexView

use log::{debug, trace};
use sheet::Sheet;
use crate::collation::IndexCollator;
use crate::definition::{IndexDefinition, REF_COL_SEPARATOR};
use crate::error::IndexError;
use crate::filter::{compile_filters, CompiledFilter};
use crate::flatten::flatten_tree;
use crate::parse::RowParser;
use crate::tree::IndexTree;
use crate::view::IndexView;

/// A definition resolved against one sheet.
pub struct IndexBuilder<'a> {
    definition: &'a IndexDefinition,
    sheet: &'a Sheet,
    ref_cols: Vec<usize>,
    form_col: usize,
    parent_cols: Vec<usize>,
    filters: Vec<CompiledFilter>,
}

impl<'a> IndexBuilder<'a> {
    /// Validates the definition and resolves its columns.
    pub fn new(definition: &'a IndexDefinition, sheet: &'a Sheet) -> Result<Self, IndexError> {
        definition.validate()?;

        let ref_cols = sheet.resolve_columns(&definition.ref_columns)?;
        let form_col = sheet.resolve_columns(std::slice::from_ref(&definition.form_column))?[0];
        let parent_cols = sheet.resolve_columns(&definition.parent_columns)?;
        let filters = compile_filters(&definition.filters, sheet)?;

        Ok(IndexBuilder {
            definition,
            sheet,
            ref_cols,
            form_col,
            parent_cols,
            filters,
        })
    }

    /// Folds every row into a new tree.
    pub fn build_tree(&self) -> Result<IndexTree, IndexError> {
        let parser = RowParser::new(
            self.parent_cols.clone(),
            self.definition.split_char.as_deref(),
            &self.filters,
            self.definition.filter_exclude,
        );

        let mut tree = IndexTree::new(self.definition.depth());
        let mut skipped = 0;
        let mut dropped = 0;

        for (row, cells) in self.sheet.rows.iter().enumerate() {
            self.sheet.check_row(row)?;

            let form = cells[self.form_col].as_str();
            if form.is_empty() {
                trace!("row {}: empty form, skipped", row);
                skipped += 1;
                continue;
            }

            let reference = self
                .ref_cols
                .iter()
                .map(|&col| cells[col].as_str())
                .collect::<Vec<_>>()
                .join(REF_COL_SEPARATOR);

            let paths = parser.parse_row(row, cells)?;
            if paths.is_empty() {
                dropped += 1;
            }
            for path in &paths {
                tree.insert(path, form, &reference)?;
            }
        }

        debug!(
            "index tree built: {} rows, {} skipped (empty form), \
             {} without retained elements, {} references",
            self.sheet.row_count(),
            skipped,
            dropped,
            tree.count()
        );

        Ok(tree)
    }

    /// Builds the tree and flattens it.
    pub fn build(&self) -> Result<IndexView, IndexError> {
        let tree = self.build_tree()?;

        let mut collator = IndexCollator::new();
        let (rows, total) = flatten_tree(&tree, &mut collator);
        debug!("index flattened: {} rows, {} references", rows.len(), total);

        Ok(IndexView {
            columns: self.definition.output_columns(),
            rows,
            total,
        })
    }
}

/// Builds the index of `sheet` described by `definition`.
/// Columns are looked up by name, so the sheet may hold them in any order
/// and may carry extra columns.
pub fn build_index(sheet: &Sheet, definition: &IndexDefinition) -> Result<IndexView, IndexError> {
    IndexBuilder::new(definition, sheet)?.build()
}
