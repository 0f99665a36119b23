//! # **Search Kernel** - *Value Lookup and Relational Comparison*
//!
//! Generic `find`/`find_all` and the six relational comparisons, driven by a
//! per-payload needle converter. Conversion failure (a type-incompatible
//! needle) yields the operation's "safe" default: `0`/empty for lookup,
//! all-false for the positive comparisons, all-true for `neq`.
//!
//! NA positions never match a concrete needle and compare false everywhere
//! except `neq`, where they compare true.

use std::borrow::Borrow;

/// First 1-based position equal to `needle`, or 0 when absent or the needle
/// was not convertible.
pub(crate) fn find<T: ?Sized + PartialEq, U: Borrow<T>, V: Borrow<T>>(
    needle: Option<V>,
    data: &[U],
    na: &[bool],
) -> usize {
    let needle = match needle {
        Some(v) => v,
        None => return 0,
    };

    data.iter()
        .zip(na)
        .position(|(value, &is_na)| !is_na && value.borrow() == needle.borrow())
        .map_or(0, |pos| pos + 1)
}

/// All 1-based positions equal to `needle`; empty when none match.
pub(crate) fn find_all<T: ?Sized + PartialEq, U: Borrow<T>, V: Borrow<T>>(
    needle: Option<V>,
    data: &[U],
    na: &[bool],
) -> Vec<usize> {
    let needle = match needle {
        Some(v) => v,
        None => return Vec::new(),
    };

    data.iter()
        .zip(na)
        .enumerate()
        .filter_map(|(i, (value, &is_na))| {
            (!is_na && value.borrow() == needle.borrow()).then_some(i + 1)
        })
        .collect()
}

fn compare<T: ?Sized, U: Borrow<T>, V: Borrow<T>>(
    needle: Option<V>,
    data: &[U],
    na: &[bool],
    default: bool,
    cmp: impl Fn(&T, &T) -> bool,
) -> Vec<bool> {
    match needle {
        Some(needle) => data
            .iter()
            .zip(na)
            .map(|(value, &is_na)| {
                if is_na {
                    default
                } else {
                    cmp(value.borrow(), needle.borrow())
                }
            })
            .collect(),
        None => vec![default; data.len()],
    }
}

pub(crate) fn cmp_eq<T: ?Sized + PartialEq, U: Borrow<T>, V: Borrow<T>>(
    needle: Option<V>,
    data: &[U],
    na: &[bool],
) -> Vec<bool> {
    compare(needle, data, na, false, |a, b| a == b)
}

pub(crate) fn cmp_neq<T: ?Sized + PartialEq, U: Borrow<T>, V: Borrow<T>>(
    needle: Option<V>,
    data: &[U],
    na: &[bool],
) -> Vec<bool> {
    compare(needle, data, na, true, |a, b| a != b)
}

pub(crate) fn cmp_gt<T: ?Sized + PartialOrd, U: Borrow<T>, V: Borrow<T>>(
    needle: Option<V>,
    data: &[U],
    na: &[bool],
) -> Vec<bool> {
    compare(needle, data, na, false, |a, b| a > b)
}

pub(crate) fn cmp_lt<T: ?Sized + PartialOrd, U: Borrow<T>, V: Borrow<T>>(
    needle: Option<V>,
    data: &[U],
    na: &[bool],
) -> Vec<bool> {
    compare(needle, data, na, false, |a, b| a < b)
}

pub(crate) fn cmp_gte<T: ?Sized + PartialOrd, U: Borrow<T>, V: Borrow<T>>(
    needle: Option<V>,
    data: &[U],
    na: &[bool],
) -> Vec<bool> {
    compare(needle, data, na, false, |a, b| a >= b)
}

pub(crate) fn cmp_lte<T: ?Sized + PartialOrd, U: Borrow<T>, V: Borrow<T>>(
    needle: Option<V>,
    data: &[U],
    na: &[bool],
) -> Vec<bool> {
    compare(needle, data, na, false, |a, b| a <= b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_skips_na() {
        let data = vec![1i64, 2, 2, 3];
        let na = vec![false, true, false, false];
        assert_eq!(find(Some(2), &data, &na), 3);
        assert_eq!(find(Some(9), &data, &na), 0);
        assert_eq!(find::<i64, _, i64>(None, &data, &na), 0);
    }

    #[test]
    fn test_find_all() {
        let data = vec!["a".to_string(), "b".to_string(), "a".to_string()];
        let na = vec![false; 3];
        assert_eq!(find_all::<str, _, _>(Some("a"), &data, &na), vec![1, 3]);
        assert_eq!(find_all::<str, _, _>(Some("z"), &data, &na), Vec::<usize>::new());
    }

    #[test]
    fn test_eq_neq_na_defaults() {
        let data = vec![5i64, 7, 5];
        let na = vec![false, false, true];
        assert_eq!(cmp_eq(Some(5), &data, &na), vec![true, false, false]);
        assert_eq!(cmp_neq(Some(5), &data, &na), vec![false, true, true]);
        // Incompatible needle: eq all-false, neq all-true.
        assert_eq!(cmp_eq::<i64, _, i64>(None, &data, &na), vec![false; 3]);
        assert_eq!(cmp_neq::<i64, _, i64>(None, &data, &na), vec![true; 3]);
    }

    #[test]
    fn test_relational() {
        let data = vec![1i64, 5, 10];
        let na = vec![false, false, false];
        assert_eq!(cmp_gt(Some(4), &data, &na), vec![false, true, true]);
        assert_eq!(cmp_lte(Some(5), &data, &na), vec![true, true, false]);
    }
}
