//! # **Ops Module** - *Typed Predicate, Transform and Fold Carriers*
//!
//! Closed enums carrying the caller-supplied closures for the generic vector
//! operations: `Whicher` (predicate selection), `Applier` (elementwise
//! transform), `Summarizer` (left-fold reduction) and `Selector` (the uniform
//! argument of `Vector::filter`).
//!
//! ## Behaviour
//! - Each carrier is tagged with the element type the closure expects. A
//!   carrier whose tag does not match the payload's type is "unsupported":
//!   `which` degrades to an all-false mask, `apply` and `summarize` degrade
//!   to an all-NA payload. Nothing errors.
//! - Predicates and transforms come in two shapes: element-only
//!   `(value, is_na)`, or indexed `(index, value, is_na)` with a 1-based
//!   index.
//! - An `Applier` that reports `is_na = true` forces the stored value to the
//!   payload's placeholder, so stale data can never leak under an NA flag.
//! - A `Summarizer` short-circuits to a length-1 NA payload the moment any
//!   step reports NA.

use num_complex::Complex64;
use time::OffsetDateTime;

use crate::enums::value::Value;

/// A selection predicate in one of its two supported shapes.
pub enum WhichFn<'a, T: ?Sized> {
    /// `(value, is_na) -> keep`
    Elem(&'a dyn Fn(&T, bool) -> bool),
    /// `(index, value, is_na) -> keep`, index is 1-based.
    Indexed(&'a dyn Fn(usize, &T, bool) -> bool),
}

/// An elementwise transform in one of its two supported shapes.
pub enum ApplyFn<'a, T: ?Sized, R> {
    /// `(value, is_na) -> (new_value, new_is_na)`
    Elem(&'a dyn Fn(&T, bool) -> (R, bool)),
    /// `(index, value, is_na) -> (new_value, new_is_na)`, index is 1-based.
    Indexed(&'a dyn Fn(usize, &T, bool) -> (R, bool)),
}

/// A left-fold step: `(index, accumulator, value, is_na) -> (accumulator, is_na)`.
pub type FoldFn<'a, T, A> = &'a dyn Fn(usize, A, &T, bool) -> (A, bool);

/// Typed selection predicate handed to `which` / `filter`.
pub enum Whicher<'a> {
    Integer(WhichFn<'a, i64>),
    Float(WhichFn<'a, f64>),
    Complex(WhichFn<'a, Complex64>),
    Boolean(WhichFn<'a, bool>),
    Str(WhichFn<'a, str>),
    Time(WhichFn<'a, OffsetDateTime>),
    Any(WhichFn<'a, Value>),
}

/// Typed elementwise transform handed to `apply`.
pub enum Applier<'a> {
    Integer(ApplyFn<'a, i64, i64>),
    Float(ApplyFn<'a, f64, f64>),
    Complex(ApplyFn<'a, Complex64, Complex64>),
    Boolean(ApplyFn<'a, bool, bool>),
    Str(ApplyFn<'a, str, String>),
    Time(ApplyFn<'a, OffsetDateTime, OffsetDateTime>),
    Any(ApplyFn<'a, Value, Value>),
}

/// Typed left-fold handed to `summarize`. The accumulator is the payload's
/// native element type; folding starts from the type's zero value.
pub enum Summarizer<'a> {
    Integer(FoldFn<'a, i64, i64>),
    Float(FoldFn<'a, f64, f64>),
    Complex(FoldFn<'a, Complex64, Complex64>),
    Boolean(FoldFn<'a, bool, bool>),
    Str(FoldFn<'a, str, String>),
    Time(FoldFn<'a, OffsetDateTime, OffsetDateTime>),
    Any(FoldFn<'a, Value, Value>),
}

macro_rules! which_ctors {
    ($($variant:ident => $elem:ident / $indexed:ident : $t:ty),+ $(,)?) => {
        impl<'a> Whicher<'a> {
            $(
                /// Element-shape predicate over this payload type.
                pub fn $elem(f: &'a dyn Fn(&$t, bool) -> bool) -> Self {
                    Whicher::$variant(WhichFn::Elem(f))
                }

                /// Indexed-shape predicate over this payload type (1-based index).
                pub fn $indexed(f: &'a dyn Fn(usize, &$t, bool) -> bool) -> Self {
                    Whicher::$variant(WhichFn::Indexed(f))
                }
            )+
        }
    };
}

which_ctors!(
    Integer => int / int_indexed : i64,
    Float => float / float_indexed : f64,
    Complex => complex / complex_indexed : Complex64,
    Boolean => boolean / boolean_indexed : bool,
    Str => str / str_indexed : str,
    Time => time / time_indexed : OffsetDateTime,
    Any => any / any_indexed : Value,
);

macro_rules! apply_ctors {
    ($($variant:ident => $elem:ident / $indexed:ident : $t:ty => $r:ty),+ $(,)?) => {
        impl<'a> Applier<'a> {
            $(
                /// Element-shape transform over this payload type.
                pub fn $elem(f: &'a dyn Fn(&$t, bool) -> ($r, bool)) -> Self {
                    Applier::$variant(ApplyFn::Elem(f))
                }

                /// Indexed-shape transform over this payload type (1-based index).
                pub fn $indexed(f: &'a dyn Fn(usize, &$t, bool) -> ($r, bool)) -> Self {
                    Applier::$variant(ApplyFn::Indexed(f))
                }
            )+
        }
    };
}

apply_ctors!(
    Integer => int / int_indexed : i64 => i64,
    Float => float / float_indexed : f64 => f64,
    Complex => complex / complex_indexed : Complex64 => Complex64,
    Boolean => boolean / boolean_indexed : bool => bool,
    Str => str / str_indexed : str => String,
    Time => time / time_indexed : OffsetDateTime => OffsetDateTime,
    Any => any / any_indexed : Value => Value,
);

/// The uniform argument of `Vector::filter`: a single 1-based index, a list
/// of indices, a boolean mask, or a typed predicate.
pub enum Selector<'a> {
    Index(usize),
    Indices(&'a [usize]),
    Mask(&'a [bool]),
    Which(Whicher<'a>),
}

impl From<usize> for Selector<'_> {
    fn from(idx: usize) -> Self {
        Selector::Index(idx)
    }
}

impl<'a> From<&'a [usize]> for Selector<'a> {
    fn from(indices: &'a [usize]) -> Self {
        Selector::Indices(indices)
    }
}

impl<'a> From<&'a Vec<usize>> for Selector<'a> {
    fn from(indices: &'a Vec<usize>) -> Self {
        Selector::Indices(indices)
    }
}

impl<'a> From<&'a [bool]> for Selector<'a> {
    fn from(mask: &'a [bool]) -> Self {
        Selector::Mask(mask)
    }
}

impl<'a> From<&'a Vec<bool>> for Selector<'a> {
    fn from(mask: &'a Vec<bool>) -> Self {
        Selector::Mask(mask)
    }
}

impl<'a> From<Whicher<'a>> for Selector<'a> {
    fn from(whicher: Whicher<'a>) -> Self {
        Selector::Which(whicher)
    }
}
