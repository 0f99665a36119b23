//! # **Coalesce Kernel** - *NA-Filling Merge*
//!
//! For each position where the left side is NA and the right side is not,
//! takes the right side's value; otherwise keeps the left side. Callers
//! length-adjust (recycle) the right side before invoking.

/// Merges `src` into the NA slots of `dst`. Both sides must have equal length.
pub(crate) fn coalesce_with_na<T: Clone>(
    dst_data: &[T],
    dst_na: &[bool],
    src_data: &[T],
    src_na: &[bool],
) -> (Vec<T>, Vec<bool>) {
    let mut out_data = Vec::with_capacity(dst_data.len());
    let mut out_na = Vec::with_capacity(dst_data.len());

    for i in 0..dst_data.len() {
        if dst_na[i] && !src_na[i] {
            out_data.push(src_data[i].clone());
            out_na.push(false);
        } else {
            out_data.push(dst_data[i].clone());
            out_na.push(dst_na[i]);
        }
    }

    (out_data, out_na)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coalesce_fills_only_na() {
        let (data, na) = coalesce_with_na(
            &[1, 0, 3, 0],
            &[false, true, false, true],
            &[9, 8, 7, 0],
            &[false, false, false, true],
        );
        assert_eq!(data, vec![1, 8, 3, 0]);
        assert_eq!(na, vec![false, false, false, true]);
    }
}
