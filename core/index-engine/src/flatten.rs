//! FILENAME: core/index-engine/src/flatten.rs
//! Flattener - Walks the index tree into rows.
//!
//! Depth-first, siblings in collated order. A leaf yields one row
//! `[count, form, refs]`. A branch flattens each child and prefixes the
//! child's first row with `[child total, key]` and every following row with
//! a blank entry. Each call returns its rows and the number of references
//! below it, so totals are summed on the way up.

use rustc_hash::FxHashMap;
use crate::collation::IndexCollator;
use crate::refs::format_refs;
use crate::tree::{IndexNode, IndexTree};
use crate::view::{IndexRow, LevelEntry};

/// Flattens a whole tree. Returns the rows and the grand total.
pub fn flatten_tree(tree: &IndexTree, collator: &mut IndexCollator) -> (Vec<IndexRow>, usize) {
    match tree.root() {
        IndexNode::Branch(children) => flatten_children(children, tree.depth(), collator),
        IndexNode::Leaf(_) => (Vec::new(), 0),
    }
}

/// Flattens the children of one branch. `depth` is the number of levels
/// left, used to size the rows.
fn flatten_children(
    children: &FxHashMap<String, IndexNode>,
    depth: usize,
    collator: &mut IndexCollator,
) -> (Vec<IndexRow>, usize) {
    let mut keys: Vec<&String> = children.keys().collect();
    collator.sort(&mut keys);

    let mut rows = Vec::new();
    let mut total = 0;

    for key in keys {
        match &children[key] {
            IndexNode::Leaf(refs) => {
                let mut levels = Vec::with_capacity(depth);
                levels.push(Some(LevelEntry::new(refs.len(), key.as_str())));
                total += refs.len();
                rows.push(IndexRow {
                    levels,
                    refs: format_refs(refs),
                });
            }
            IndexNode::Branch(grandchildren) => {
                let (child_rows, child_total) =
                    flatten_children(grandchildren, depth.saturating_sub(1), collator);
                total += child_total;

                for (i, mut row) in child_rows.into_iter().enumerate() {
                    let entry = if i == 0 {
                        Some(LevelEntry::new(child_total, key.as_str()))
                    } else {
                        None
                    };
                    row.levels.insert(0, entry);
                    rows.push(row);
                }
            }
        }
    }

    (rows, total)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(rows: &[IndexRow], level: usize) -> Vec<Option<String>> {
        rows.iter()
            .map(|r| r.levels[level].as_ref().map(|e| e.key.clone()))
            .collect()
    }

    #[test]
    fn test_form_level_rows() {
        let mut tree = IndexTree::new(1);
        tree.insert(&[], "def", "r0").unwrap();
        tree.insert(&[], "abc", "r1").unwrap();
        tree.insert(&[], "abc", "r1").unwrap();

        let (rows, total) = flatten_tree(&tree, &mut IndexCollator::new());
        assert_eq!(total, 3);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].levels, vec![Some(LevelEntry::new(2, "abc"))]);
        assert_eq!(rows[0].refs, "r1 (2)");
        assert_eq!(rows[1].levels, vec![Some(LevelEntry::new(1, "def"))]);
    }

    #[test]
    fn test_blank_fill_within_a_block() {
        let mut tree = IndexTree::new(2);
        tree.insert(&["b"], "x", "r0").unwrap();
        tree.insert(&["a"], "y", "r1").unwrap();
        tree.insert(&["a"], "x", "r2").unwrap();
        tree.insert(&["a"], "x", "r3").unwrap();

        let (rows, total) = flatten_tree(&tree, &mut IndexCollator::new());
        assert_eq!(total, 4);
        assert_eq!(
            keys(&rows, 0),
            vec![Some("a".to_string()), None, Some("b".to_string())]
        );
        assert_eq!(rows[0].levels[0], Some(LevelEntry::new(3, "a")));
        assert_eq!(rows[0].form(), Some(&LevelEntry::new(2, "x")));
        assert_eq!(rows[1].form(), Some(&LevelEntry::new(1, "y")));
        assert_eq!(rows[2].levels[0], Some(LevelEntry::new(1, "b")));
    }

    #[test]
    fn test_siblings_in_collated_order() {
        let mut tree = IndexTree::new(2);
        tree.insert(&["abc"], "f", "r0").unwrap();
        tree.insert(&["âab"], "f", "r1").unwrap();

        let (rows, _) = flatten_tree(&tree, &mut IndexCollator::new());
        assert_eq!(
            keys(&rows, 0),
            vec![Some("âab".to_string()), Some("abc".to_string())]
        );
    }

    #[test]
    fn test_empty_tree() {
        let (rows, total) = flatten_tree(&IndexTree::new(3), &mut IndexCollator::new());
        assert!(rows.is_empty());
        assert_eq!(total, 0);
    }
}
