//! FILENAME: core/index-engine/src/refs.rs
//! Run-length grouping of the references attached to one form.
//!
//! Only ADJACENT duplicates are grouped: `[r0, r0, r1, r0]` becomes
//! `"r0 (2); r1; r0"`. Adjacency comes from row order, and from a split cell
//! producing the same path several times for one row.

use crate::definition::{format_ref_with_count, REF_SEPARATOR};

/// Formats an ordered list of references. An empty list gives an empty string.
pub fn format_refs<S: AsRef<str>>(refs: &[S]) -> String {
    let mut grouped: Vec<String> = Vec::new();
    let mut iter = refs.iter().map(AsRef::as_ref);

    let mut current = match iter.next() {
        Some(first) => first,
        None => return String::new(),
    };
    let mut count = 1;

    for reference in iter {
        if reference == current {
            count += 1;
        } else {
            grouped.push(format_run(current, count));
            current = reference;
            count = 1;
        }
    }
    grouped.push(format_run(current, count));

    grouped.join(REF_SEPARATOR)
}

fn format_run(reference: &str, count: usize) -> String {
    if count > 1 {
        format_ref_with_count(reference, count)
    } else {
        reference.to_string()
    }
}
