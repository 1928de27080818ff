//! Subset enumeration.
//!
//! Hypothesis enumeration is built from two nested powersets, so the
//! result is materialized and can be walked repeatedly.

/// Number of subsets of a set with `n` elements, or `None` on overflow.
pub fn subset_count(n: usize) -> Option<usize> {
    u32::try_from(n).ok().and_then(|bits| 1usize.checked_shl(bits))
}

/// Return every subset of `items`, including the empty set and `items` itself.
///
/// Subsets are ordered by bitmask over the input order: index `k` of the
/// result holds the elements whose positions are set in `k`. An empty input
/// yields a single empty subset.
///
/// Returns `None` when the subset count does not fit in a `usize`.
pub fn powerset<T: Clone>(items: &[T]) -> Option<Vec<Vec<T>>> {
    let count = subset_count(items.len())?;
    let subsets: Vec<Vec<T>> = (0..count)
        .map(|mask| {
            items
                .iter()
                .enumerate()
                .filter(|(i, _)| (mask >> i) & 1 == 1)
                .map(|(_, item)| item.clone())
                .collect()
        })
        .collect();
    Some(subsets)
}
