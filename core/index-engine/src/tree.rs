//! FILENAME: core/index-engine/src/tree.rs
//! Index Tree - The nested grouping built from the rows.
//!
//! The tree has a fixed depth known up front: one branch level per parent
//! column, then the form level whose children are leaves holding the
//! references in the order they were appended. Nodes are only created on
//! insert, so every leaf holds at least one reference and no branch is empty.

use rustc_hash::FxHashMap;
use serde::Serialize;
use crate::error::IndexError;

/// A node of the index tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum IndexNode {
    /// References of one form, in row-processing order.
    Leaf(Vec<String>),
    /// Children keyed by parent value (or by form, at the form level).
    Branch(FxHashMap<String, IndexNode>),
}

impl IndexNode {
    fn branch() -> Self {
        IndexNode::Branch(FxHashMap::default())
    }

    /// Number of references below this node.
    pub fn count(&self) -> usize {
        match self {
            IndexNode::Leaf(refs) => refs.len(),
            IndexNode::Branch(children) => children.values().map(IndexNode::count).sum(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&IndexNode> {
        match self {
            IndexNode::Leaf(_) => None,
            IndexNode::Branch(children) => children.get(key),
        }
    }

    fn children_mut(
        &mut self,
        expected: usize,
        found: usize,
    ) -> Result<&mut FxHashMap<String, IndexNode>, IndexError> {
        match self {
            IndexNode::Branch(children) => Ok(children),
            IndexNode::Leaf(_) => Err(IndexError::DepthMismatch { expected, found }),
        }
    }
}

/// The whole index: a root branch and the number of levels below it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexTree {
    root: IndexNode,
    depth: usize,
}

impl IndexTree {
    /// Creates an empty tree with `depth` levels (parents + form).
    pub fn new(depth: usize) -> Self {
        IndexTree {
            root: IndexNode::branch(),
            depth,
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn root(&self) -> &IndexNode {
        &self.root
    }

    pub fn is_empty(&self) -> bool {
        matches!(&self.root, IndexNode::Branch(children) if children.is_empty())
    }

    /// Total number of references in the tree.
    pub fn count(&self) -> usize {
        self.root.count()
    }

    /// Appends `reference` to the leaf at `path / form`, creating the
    /// missing nodes. `path` must have one value per parent level.
    pub fn insert(&mut self, path: &[&str], form: &str, reference: &str) -> Result<(), IndexError> {
        let expected = self.depth - 1;
        if path.len() != expected {
            return Err(IndexError::DepthMismatch {
                expected,
                found: path.len(),
            });
        }

        let mut node = &mut self.root;
        for key in path {
            node = node
                .children_mut(expected, path.len())?
                .entry((*key).to_string())
                .or_insert_with(IndexNode::branch);
        }

        let leaf = node
            .children_mut(expected, path.len())?
            .entry(form.to_string())
            .or_insert_with(|| IndexNode::Leaf(Vec::new()));
        match leaf {
            IndexNode::Leaf(refs) => {
                refs.push(reference.to_string());
                Ok(())
            }
            IndexNode::Branch(_) => Err(IndexError::DepthMismatch {
                expected,
                found: path.len(),
            }),
        }
    }
}
