//! FILENAME: core/index-engine/src/collation.rs
//! Key ordering for every level of the index.
//!
//! Keys are ordered with the Unicode Collation Algorithm using the CLDR root
//! collation (accent- and case-aware, locale independent), so "âab" sorts
//! before "abc" even though 'â' has the higher code point.
//!
//! Variable weighting is non-ignorable: spaces and punctuation carry primary
//! weights below letters, so "a c" and "a-d" sort before "aa".

use std::cmp::Ordering;
use feruca::{Collator, Tailoring};

pub struct IndexCollator {
    inner: Collator,
}

impl IndexCollator {
    pub fn new() -> Self {
        IndexCollator {
            // CLDR root, shifting off, tiebreak on
            inner: Collator::new(Tailoring::default(), false, true),
        }
    }

    /// Compares two keys. Strings the collation considers equal fall back to
    /// code point order so that sorting stays deterministic.
    pub fn compare(&mut self, a: &str, b: &str) -> Ordering {
        self.inner.collate(a, b).then_with(|| a.cmp(b))
    }

    /// Sorts keys in collated order.
    pub fn sort<S: AsRef<str>>(&mut self, keys: &mut [S]) {
        keys.sort_by(|a, b| self.compare(a.as_ref(), b.as_ref()));
    }
}

impl Default for IndexCollator {
    fn default() -> Self {
        Self::new()
    }
}
