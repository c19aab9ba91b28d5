//! Round-robin interleaving of the per-category sequences.
//!
//! For each rank position, emits one entry per category that still has an
//! item at that position, in [`Category::all`] priority order. Shorter
//! sequences are skipped once exhausted; nothing is padded.

use crate::types::{Category, CombinedEntry};

/// Build the combined view from the length of each category sequence.
///
/// `lengths` pairs a category with the number of results it holds. The
/// output order depends only on priority order and position, never on the
/// order of `lengths`.
pub fn interleave(lengths: &[(Category, usize)]) -> Vec<CombinedEntry> {
    let len_of = |category: Category| {
        lengths
            .iter()
            .filter(|(c, _)| *c == category)
            .map(|(_, len)| *len)
            .sum::<usize>()
    };
    let longest = Category::all().iter().map(|&c| len_of(c)).max().unwrap_or(0);
    let total = Category::all().iter().map(|&c| len_of(c)).sum();

    let mut combined = Vec::with_capacity(total);
    for index in 0..longest {
        for &category in Category::all() {
            if index < len_of(category) {
                combined.push(CombinedEntry { category, index });
            }
        }
    }
    combined
}
