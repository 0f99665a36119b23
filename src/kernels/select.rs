//! # **Select Kernel** - *1-Based Gather and Index Utilities*
//!
//! Generic gather used by every payload's `by_indices`. Indexing is 1-based
//! throughout: index `0` and out-of-range indices gather the type's NA
//! placeholder instead of erroring, so index lists may freely mix valid and
//! invalid entries (dataframe row-reindexing relies on that).

/// Gathers `data`/`na` by 1-based `indices`. Index `0` or `> data.len()`
/// yields `(na_value, true)`.
pub(crate) fn by_indices_with_na<T: Clone>(
    indices: &[usize],
    data: &[T],
    na: &[bool],
    na_value: T,
) -> (Vec<T>, Vec<bool>) {
    let mut out_data = Vec::with_capacity(indices.len());
    let mut out_na = Vec::with_capacity(indices.len());

    for &idx in indices {
        if idx >= 1 && idx <= data.len() {
            out_data.push(data[idx - 1].clone());
            out_na.push(na[idx - 1]);
        } else {
            out_data.push(na_value.clone());
            out_na.push(true);
        }
    }

    (out_data, out_na)
}

/// Gathers maskless data by 1-based `indices`, filling invalid positions with
/// `default`. Used by payload types that track missing elements in-band.
pub(crate) fn by_indices_without_na<T: Clone>(
    indices: &[usize],
    data: &[T],
    default: T,
) -> Vec<T> {
    indices
        .iter()
        .map(|&idx| {
            if idx >= 1 && idx <= data.len() {
                data[idx - 1].clone()
            } else {
                default.clone()
            }
        })
        .collect()
}

/// Converts a boolean mask into the 1-based indices of its `true` positions,
/// capped at `length`.
pub(crate) fn mask_to_indices(length: usize, mask: &[bool]) -> Vec<usize> {
    mask.iter()
        .take(length)
        .enumerate()
        .filter_map(|(i, &keep)| keep.then_some(i + 1))
        .collect()
}

/// The identity index list `1..=length`.
pub(crate) fn indices_array(length: usize) -> Vec<usize> {
    (1..=length).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_indices_with_na_gather() {
        let data = vec![10, 20, 30];
        let na = vec![false, true, false];
        let (out, out_na) = by_indices_with_na(&[3, 1, 1, 2], &data, &na, 0);
        assert_eq!(out, vec![30, 10, 10, 20]);
        assert_eq!(out_na, vec![false, false, false, true]);
    }

    #[test]
    fn test_by_indices_with_na_invalid_indices() {
        let data = vec![1.5, 2.5];
        let na = vec![false, false];
        let (out, out_na) = by_indices_with_na(&[0, 2, 7], &data, &na, f64::NAN);
        assert!(out[0].is_nan());
        assert_eq!(out[1], 2.5);
        assert!(out[2].is_nan());
        assert_eq!(out_na, vec![true, false, true]);
    }

    #[test]
    fn test_mask_to_indices() {
        assert_eq!(mask_to_indices(4, &[true, false, true, true]), vec![1, 3, 4]);
        assert_eq!(mask_to_indices(2, &[true, false, true]), vec![1]);
        assert_eq!(mask_to_indices(0, &[]), Vec::<usize>::new());
    }
}
