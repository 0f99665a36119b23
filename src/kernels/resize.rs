//! # **Resize Kernel** - *Truncation and R-Style Recycling*
//!
//! Backing logic for every payload's `adjust`: shrinking truncates, growing
//! cycles the existing data (`[1,2,3]` adjusted to 7 becomes
//! `[1,2,3,1,2,3,1]`), never zero-fills.

/// Truncates `data`/`na` to `size` elements.
pub(crate) fn adjust_to_lesser_with_na<T: Clone>(
    data: &[T],
    na: &[bool],
    size: usize,
) -> (Vec<T>, Vec<bool>) {
    (data[..size].to_vec(), na[..size].to_vec())
}

/// Grows `data`/`na` to `size` elements by cycling the existing values.
/// `data` must be non-empty.
pub(crate) fn adjust_to_bigger_with_na<T: Clone>(
    data: &[T],
    na: &[bool],
    size: usize,
) -> (Vec<T>, Vec<bool>) {
    let length = data.len();
    let mut out_data = Vec::with_capacity(size);
    let mut out_na = Vec::with_capacity(size);

    for i in 0..size {
        out_data.push(data[i % length].clone());
        out_na.push(na[i % length]);
    }

    (out_data, out_na)
}

/// Maskless variant of `adjust_to_lesser_with_na`.
pub(crate) fn adjust_to_lesser_without_na<T: Clone>(data: &[T], size: usize) -> Vec<T> {
    data[..size].to_vec()
}

/// Maskless variant of `adjust_to_bigger_with_na`.
pub(crate) fn adjust_to_bigger_without_na<T: Clone>(data: &[T], size: usize) -> Vec<T> {
    let length = data.len();
    (0..size).map(|i| data[i % length].clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        let (data, na) = adjust_to_lesser_with_na(&[1, 2, 3, 4], &[false, true, false, false], 2);
        assert_eq!(data, vec![1, 2]);
        assert_eq!(na, vec![false, true]);
    }

    #[test]
    fn test_recycle() {
        let (data, na) = adjust_to_bigger_with_na(&[1, 2, 3], &[false, false, true], 7);
        assert_eq!(data, vec![1, 2, 3, 1, 2, 3, 1]);
        assert_eq!(na, vec![false, false, true, false, false, true, false]);
    }

    #[test]
    fn test_recycle_whole_multiples() {
        let (data, _) = adjust_to_bigger_with_na(&[5, 6], &[false, false], 6);
        assert_eq!(data, vec![5, 6, 5, 6, 5, 6]);
    }
}
