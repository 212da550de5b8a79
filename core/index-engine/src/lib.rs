//! FILENAME: core/index-engine/src/lib.rs
//! Multi-level alphabetical index builder.
//!
//! Turns rows holding references, a form and zero or more parent values
//! into an index grouped by parent, then by form, with counts at every level
//! and run-length grouped references.
//!
//! Layers:
//! - `definition`: Serializable configuration (what the index IS)
//! - `parse` / `filter`: Row splitting and element filtering
//! - `tree`: The nested grouping built from the rows
//! - `collation` / `refs` / `flatten`: Ordering, reference formatting, traversal
//! - `view`: Tabular output for the I/O layer
//! - `engine`: Ties the steps together

pub mod collation;
pub mod definition;
pub mod engine;
pub mod error;
pub mod filter;
pub mod flatten;
pub mod parse;
pub mod refs;
pub mod tree;
pub mod view;


pub use collation::IndexCollator;
pub use definition::*;
pub use engine::{build_index, IndexBuilder};
pub use error::IndexError;
pub use refs::format_refs;
pub use tree::{IndexNode, IndexTree};
pub use view::{IndexRow, IndexView, LevelEntry};
