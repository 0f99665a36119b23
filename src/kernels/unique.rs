//! # **Unique Kernel** - *First-Occurrence Detection*
//!
//! Marks the first occurrence of every distinct value, treating all NA
//! positions as one value class. The resulting mask, run through `filter`,
//! de-duplicates a vector while preserving original order.

use std::collections::HashSet;
use std::hash::Hash;

/// True at each position holding the first occurrence of its value; the first
/// NA position also counts once.
pub(crate) fn is_unique_by_key<T, K: Eq + Hash>(
    data: &[T],
    na: &[bool],
    key: impl Fn(&T) -> K,
) -> Vec<bool> {
    let mut seen: HashSet<K> = HashSet::new();
    let mut was_na = false;

    data.iter()
        .enumerate()
        .map(|(i, value)| {
            if na[i] {
                if was_na {
                    false
                } else {
                    was_na = true;
                    true
                }
            } else {
                seen.insert(key(value))
            }
        })
        .collect()
}
