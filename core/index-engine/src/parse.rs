//! FILENAME: core/index-engine/src/parse.rs
//! Row Parser - Turns one row into the parent paths it is indexed under.
//!
//! Without a delimiter a row yields exactly one path: the raw parent values.
//! With a delimiter every parent cell is split and the pieces are zipped by
//! position, so `x@a` / `yy@bb` gives the paths `(x, yy)` and `(a, bb)`.
//! This is a positional zip, not a cross product.
//!
//! Length mismatch: when zipped cells split into different numbers of
//! pieces, the row is truncated to the shortest one. A filter cell that
//! splits into a single piece applies to every position; otherwise it takes
//! part in the zip like a parent cell.

use log::{trace, warn};
use smallvec::SmallVec;
use crate::error::IndexError;
use crate::filter::CompiledFilter;

/// One parent path, outermost value first.
pub type ParentPath<'r> = SmallVec<[&'r str; 4]>;

pub struct RowParser<'d> {
    parent_cols: Vec<usize>,
    split_char: Option<&'d str>,
    filters: &'d [CompiledFilter],
    filter_exclude: bool,
}

impl<'d> RowParser<'d> {
    pub fn new(
        parent_cols: Vec<usize>,
        split_char: Option<&'d str>,
        filters: &'d [CompiledFilter],
        filter_exclude: bool,
    ) -> Self {
        RowParser {
            parent_cols,
            split_char,
            filters,
            filter_exclude,
        }
    }

    /// Returns the retained parent paths of a row, in position order.
    /// `row` is only used for error reporting and logging.
    pub fn parse_row<'r>(
        &self,
        row: usize,
        cells: &'r [String],
    ) -> Result<Vec<ParentPath<'r>>, IndexError> {
        let parents = self
            .parent_cols
            .iter()
            .map(|&col| Ok(self.split(cell(row, cells, col)?)))
            .collect::<Result<Vec<_>, IndexError>>()?;

        let filter_values = self
            .filters
            .iter()
            .map(|f| Ok(self.split(cell(row, cells, f.col_index)?)))
            .collect::<Result<Vec<_>, IndexError>>()?;

        let len = self.zip_len(row, &parents, &filter_values);

        let mut paths = Vec::with_capacity(len);
        for pos in 0..len {
            if !self.is_retained(&filter_values, pos) {
                trace!("row {}: element {} filtered out", row, pos);
                continue;
            }
            paths.push(parents.iter().map(|pieces| pieces[pos]).collect());
        }

        Ok(paths)
    }

    fn split<'r>(&self, value: &'r str) -> Vec<&'r str> {
        match self.split_char {
            Some(delimiter) => value.split(delimiter).collect(),
            None => vec![value],
        }
    }

    /// Number of positions produced by the zip. Single-piece filter cells are
    /// broadcast and don't limit it; a row with nothing to zip has one position.
    fn zip_len(&self, row: usize, parents: &[Vec<&str>], filter_values: &[Vec<&str>]) -> usize {
        let lengths: Vec<usize> = parents
            .iter()
            .map(Vec::len)
            .chain(filter_values.iter().map(Vec::len).filter(|&n| n != 1))
            .collect();

        let (min, max) = match (lengths.iter().min(), lengths.iter().max()) {
            (Some(&min), Some(&max)) => (min, max),
            _ => return 1,
        };

        if min != max {
            warn!(
                "row {}: split cells have between {} and {} values, keeping the first {}",
                row, min, max, min
            );
        }
        min
    }

    fn is_retained(&self, filter_values: &[Vec<&str>], pos: usize) -> bool {
        if self.filters.is_empty() {
            return true;
        }

        let matched = self
            .filters
            .iter()
            .zip(filter_values)
            .any(|(filter, values)| {
                let value = if values.len() == 1 { values[0] } else { values[pos] };
                filter.matches(value)
            });

        matched != self.filter_exclude
    }
}

fn cell(row: usize, cells: &[String], col: usize) -> Result<&str, IndexError> {
    cells.get(col).map(String::as_str).ok_or(IndexError::ShortRow {
        row,
        expected: col + 1,
        found: cells.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::FilterDefinition;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn paths(parsed: Vec<ParentPath<'_>>) -> Vec<Vec<String>> {
        parsed
            .into_iter()
            .map(|p| p.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    fn filter(col_index: usize, patterns: &[&str]) -> CompiledFilter {
        CompiledFilter::compile(&FilterDefinition::new("f", patterns.to_vec()), col_index).unwrap()
    }

    #[test]
    fn test_no_split_gives_one_path() {
        let parser = RowParser::new(vec![1, 2], None, &[], false);
        let cells = row(&["abc", "x@a", "yy@bb"]);
        assert_eq!(paths(parser.parse_row(0, &cells).unwrap()), vec![vec!["x@a", "yy@bb"]]);
    }

    #[test]
    fn test_split_zips_by_position() {
        let parser = RowParser::new(vec![1, 2], Some("@"), &[], false);
        let cells = row(&["abc", "x@a@j", "yy@bb@kk"]);
        assert_eq!(
            paths(parser.parse_row(0, &cells).unwrap()),
            vec![vec!["x", "yy"], vec!["a", "bb"], vec!["j", "kk"]]
        );
    }

    #[test]
    fn test_split_truncates_to_shortest() {
        let parser = RowParser::new(vec![0, 1], Some("@"), &[], false);
        let cells = row(&["a@b@c", "x@y"]);
        assert_eq!(
            paths(parser.parse_row(0, &cells).unwrap()),
            vec![vec!["a", "x"], vec!["b", "y"]]
        );
    }

    #[test]
    fn test_no_parents_gives_one_empty_path() {
        let parser = RowParser::new(Vec::new(), Some("@"), &[], false);
        let cells = row(&["abc"]);
        let parsed = parser.parse_row(0, &cells).unwrap();
        assert_eq!(parsed.len(), 1);
        assert!(parsed[0].is_empty());
    }

    #[test]
    fn test_empty_parent_is_a_key() {
        let parser = RowParser::new(vec![0], Some("@"), &[], false);
        let cells = row(&[""]);
        assert_eq!(paths(parser.parse_row(0, &cells).unwrap()), vec![vec![""]]);
    }

    #[test]
    fn test_include_filter_on_parent() {
        let filters = [filter(0, &["x"])];
        let parser = RowParser::new(vec![0, 1], Some("@"), &filters, false);
        let cells = row(&["x@a@j", "yy@bb@kk"]);
        assert_eq!(paths(parser.parse_row(0, &cells).unwrap()), vec![vec!["x", "yy"]]);
    }

    #[test]
    fn test_exclude_filter_on_parent() {
        let filters = [filter(0, &["x"])];
        let parser = RowParser::new(vec![0, 1], Some("@"), &filters, true);
        let cells = row(&["x@a@j", "yy@bb@kk"]);
        assert_eq!(
            paths(parser.parse_row(0, &cells).unwrap()),
            vec![vec!["a", "bb"], vec!["j", "kk"]]
        );
    }

    #[test]
    fn test_single_filter_value_is_broadcast() {
        let filters = [filter(2, &["keep"])];
        let parser = RowParser::new(vec![0], Some("@"), &filters, false);

        let kept = row(&["a@b", "", "keep"]);
        assert_eq!(paths(parser.parse_row(0, &kept).unwrap()), vec![vec!["a"], vec!["b"]]);

        let dropped = row(&["a@b", "", "other"]);
        assert!(parser.parse_row(1, &dropped).unwrap().is_empty());
    }

    #[test]
    fn test_split_filter_value_is_positional() {
        let filters = [filter(1, &["n"])];
        let parser = RowParser::new(vec![0], Some("@"), &filters, false);
        let cells = row(&["a@b@c", "n@v@n"]);
        assert_eq!(paths(parser.parse_row(0, &cells).unwrap()), vec![vec!["a"], vec!["c"]]);
    }

    #[test]
    fn test_any_filter_matching_is_enough() {
        let filters = [filter(0, &["x"]), filter(1, &["bb"])];
        let parser = RowParser::new(vec![0, 1], Some("@"), &filters, false);
        let cells = row(&["x@a@j", "yy@bb@kk"]);
        assert_eq!(
            paths(parser.parse_row(0, &cells).unwrap()),
            vec![vec!["x", "yy"], vec!["a", "bb"]]
        );
    }

    #[test]
    fn test_short_row() {
        let parser = RowParser::new(vec![0, 3], None, &[], false);
        let cells = row(&["a", "b"]);
        assert!(matches!(
            parser.parse_row(5, &cells),
            Err(IndexError::ShortRow { row: 5, expected: 4, found: 2 })
        ));
    }
}
