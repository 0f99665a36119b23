//! # **Stat Kernel** - *NA-Contaminating Aggregation Folds*
//!
//! Shared implementations of `sum`, `prod`, `mean`, `cum_sum`, `min` and
//! `max`. All of them follow statistical-computing convention: any NA in the
//! input makes the aggregate NA, there is no silent skipping.

use std::borrow::Borrow;
use std::ops::{Add, Mul};

use num_traits::{One, Zero};

/// Sum of all elements; `(na_value, true)` when any element is NA.
pub(crate) fn sum_with_na<T: Copy + Zero + Add<Output = T>>(
    data: &[T],
    na: &[bool],
    na_value: T,
) -> (T, bool) {
    if na.iter().any(|&is_na| is_na) {
        return (na_value, true);
    }
    (data.iter().fold(T::zero(), |acc, &v| acc + v), false)
}

/// Product of all elements; `(na_value, true)` when any element is NA.
pub(crate) fn prod_with_na<T: Copy + One + Mul<Output = T>>(
    data: &[T],
    na: &[bool],
    na_value: T,
) -> (T, bool) {
    if na.iter().any(|&is_na| is_na) {
        return (na_value, true);
    }
    (data.iter().fold(T::one(), |acc, &v| acc * v), false)
}

/// Running sums; the suffix from the first NA onwards is all NA.
pub(crate) fn cum_sum_with_na<T: Copy + Zero + Add<Output = T>>(
    data: &[T],
    na: &[bool],
    na_value: T,
) -> (Vec<T>, Vec<bool>) {
    let mut out_data = Vec::with_capacity(data.len());
    let mut out_na = Vec::with_capacity(data.len());
    let mut acc = T::zero();
    let mut poisoned = false;

    for (i, &value) in data.iter().enumerate() {
        poisoned = poisoned || na[i];
        if poisoned {
            out_data.push(na_value);
            out_na.push(true);
        } else {
            acc = acc + value;
            out_data.push(acc);
            out_na.push(false);
        }
    }

    (out_data, out_na)
}

/// Smallest element under `less`; NA when empty or any element is NA.
pub(crate) fn min_with_na<T: ?Sized, U: Borrow<T> + Clone>(
    data: &[U],
    na: &[bool],
    na_value: U,
    less: impl Fn(&T, &T) -> bool,
) -> (U, bool) {
    extremum_with_na(data, na, na_value, less)
}

/// Largest element under `less`; NA when empty or any element is NA.
pub(crate) fn max_with_na<T: ?Sized, U: Borrow<T> + Clone>(
    data: &[U],
    na: &[bool],
    na_value: U,
    less: impl Fn(&T, &T) -> bool,
) -> (U, bool) {
    extremum_with_na(data, na, na_value, |a, b| less(b, a))
}

fn extremum_with_na<T: ?Sized, U: Borrow<T> + Clone>(
    data: &[U],
    na: &[bool],
    na_value: U,
    less: impl Fn(&T, &T) -> bool,
) -> (U, bool) {
    if data.is_empty() || na.iter().any(|&is_na| is_na) {
        return (na_value, true);
    }

    let mut best = &data[0];
    for value in &data[1..] {
        if less(value.borrow(), best.borrow()) {
            best = value;
        }
    }

    (best.clone(), false)
}
