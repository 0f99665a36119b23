//! # **Sort Kernel** - *Stable Sorted-Index Computation*
//!
//! Computes the permutation of 1-based indices that stably sorts a payload
//! ascending. The sort key and equality are injected per concrete payload
//! (`false < true` for booleans, chronological order for time, and so on).
//!
//! ## NA placement
//! Missing elements sort after all present elements, keeping their original
//! relative order; their dense rank is the single class after the last
//! present value.

use std::cmp::Ordering;

/// Stable ascending permutation of `1..=length`. `less` compares 0-based
/// data positions; NA positions go last in original order.
pub(crate) fn sorted_indices(
    length: usize,
    na: &[bool],
    less: impl Fn(usize, usize) -> bool,
) -> Vec<usize> {
    let mut present: Vec<usize> = (0..length).filter(|&i| !na[i]).collect();
    present.sort_by(|&a, &b| {
        if less(a, b) {
            Ordering::Less
        } else if less(b, a) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    });

    let mut indices: Vec<usize> = present.into_iter().map(|i| i + 1).collect();
    indices.extend((0..length).filter(|&i| na[i]).map(|i| i + 1));

    indices
}

/// `sorted_indices` plus dense ranks aligned with the sorted order: equal
/// elements share a rank, the next distinct element takes the next rank, and
/// all NA elements share the final rank.
pub(crate) fn sorted_indices_with_ranks(
    length: usize,
    na: &[bool],
    less: impl Fn(usize, usize) -> bool,
    equal: impl Fn(usize, usize) -> bool,
) -> (Vec<usize>, Vec<usize>) {
    let indices = sorted_indices(length, na, less);
    let mut ranks = Vec::with_capacity(length);

    let mut rank = 0;
    let mut prev: Option<usize> = None;
    for &idx in &indices {
        let pos = idx - 1;
        let same = match prev {
            Some(p) => {
                if na[p] && na[pos] {
                    true
                } else if na[p] != na[pos] {
                    false
                } else {
                    equal(p, pos)
                }
            }
            None => false,
        };
        if !same {
            rank += 1;
        }
        ranks.push(rank);
        prev = Some(pos);
    }

    (indices, ranks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_indices_stable_with_na_last() {
        let data = [3i64, 1, 3, 2];
        let na = [false, false, true, false];
        let indices = sorted_indices(4, &na, |a, b| data[a] < data[b]);
        assert_eq!(indices, vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_sorted_indices_ties_keep_original_order() {
        let data = [2i64, 1, 2, 1];
        let na = [false; 4];
        let indices = sorted_indices(4, &na, |a, b| data[a] < data[b]);
        assert_eq!(indices, vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_dense_ranks() {
        let data = [20i64, 10, 20, 30];
        let na = [false, false, false, true];
        let (indices, ranks) = sorted_indices_with_ranks(
            4,
            &na,
            |a, b| data[a] < data[b],
            |a, b| data[a] == data[b],
        );
        assert_eq!(indices, vec![2, 1, 3, 4]);
        assert_eq!(ranks, vec![1, 2, 2, 3]);
    }
}
