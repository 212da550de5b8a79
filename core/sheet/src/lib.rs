//! FILENAME: core/sheet/src/lib.rs
//! PURPOSE: Library root for the in-memory tabular data used by the indexer.
//! CONTEXT: The I/O layer reads spreadsheet columns into a `Sheet` of string
//! cells, hands it to the index engine, and writes the returned `CellValue`
//! rows back out. Nothing in this crate touches the filesystem.

pub mod cell;
pub mod error;
pub mod sheet;

// Re-export commonly used types at the crate root
pub use cell::CellValue;
pub use error::SheetError;
pub use sheet::Sheet;
