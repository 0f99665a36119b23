//! # **Apply Kernel** - *Predicate Selection, Elementwise Transform, Fold*
//!
//! The generic implementations behind `which`, `apply` and `summarize`,
//! parameterized over the element type and reused by every payload via its
//! enum arm.
//!
//! ## NA discipline
//! - `which` hands the NA flag to the predicate; what to do with missing
//!   elements is the caller's choice.
//! - `apply` forces the placeholder value whenever the transform reports NA,
//!   so stale data can never leak under an NA flag.
//! - `fold` is NA-contaminating: the first step that reports NA short-circuits
//!   the whole fold to an NA result.

use std::borrow::Borrow;

use crate::enums::ops::{ApplyFn, FoldFn, WhichFn};

/// Evaluates the predicate at every position, 1-based index in the indexed
/// shape. Returns the keep-mask.
pub(crate) fn which_with_na<T: ?Sized, U: Borrow<T>>(
    data: &[U],
    na: &[bool],
    whicher: &WhichFn<'_, T>,
) -> Vec<bool> {
    data.iter()
        .zip(na)
        .enumerate()
        .map(|(i, (value, &is_na))| match whicher {
            WhichFn::Elem(f) => f(value.borrow(), is_na),
            WhichFn::Indexed(f) => f(i + 1, value.borrow(), is_na),
        })
        .collect()
}

/// Transforms every element, replacing any result flagged NA with `na_value`.
pub(crate) fn apply_with_na<T: ?Sized, U: Borrow<T>, R: Clone>(
    data: &[U],
    na: &[bool],
    applier: &ApplyFn<'_, T, R>,
    na_value: R,
) -> (Vec<R>, Vec<bool>) {
    let mut out_data = Vec::with_capacity(data.len());
    let mut out_na = Vec::with_capacity(data.len());

    for (i, (value, &is_na)) in data.iter().zip(na).enumerate() {
        let (new_value, new_na) = match applier {
            ApplyFn::Elem(f) => f(value.borrow(), is_na),
            ApplyFn::Indexed(f) => f(i + 1, value.borrow(), is_na),
        };
        if new_na {
            out_data.push(na_value.clone());
        } else {
            out_data.push(new_value);
        }
        out_na.push(new_na);
    }

    (out_data, out_na)
}

/// Left-fold over all elements with a 1-based index, starting from `init`.
/// Short-circuits to `(na_value, true)` as soon as any step reports NA.
pub(crate) fn fold_with_na<T: ?Sized, U: Borrow<T>, A: Clone>(
    data: &[U],
    na: &[bool],
    folder: FoldFn<'_, T, A>,
    init: A,
    na_value: A,
) -> (A, bool) {
    let mut acc = init;

    for (i, (value, &is_na)) in data.iter().zip(na).enumerate() {
        let (new_acc, acc_na) = folder(i + 1, acc, value.borrow(), is_na);
        if acc_na {
            return (na_value, true);
        }
        acc = new_acc;
    }

    (acc, false)
}
