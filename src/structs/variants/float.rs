//! # **FloatPayload Module** - *Typed Float Backing Store*
//!
//! Dense `f64` payload with a per-element NA mask and a configurable print
//! precision.
//!
//! ## Overview
//! - Logical type: IEEE-754 double floats. `NaN` and the infinities are
//!   ordinary values, distinct from NA.
//! - Physical storage: `Vec<f64>` plus [`NaMask`]; NA slots hold `NaN`.
//! - `precision` only affects string rendering, never arithmetic.
//!
//! ## Capabilities
//! Full contract plus `sum`/`prod`/`mean`/`cum_sum`/`min`/`max`.

use num_complex::Complex64;

use crate::enums::ops::{ApplyFn, FoldFn, WhichFn};
use crate::enums::payload::Payload;
use crate::enums::value::Value;
use crate::kernels::apply::{apply_with_na, fold_with_na, which_with_na};
use crate::kernels::coalesce::coalesce_with_na;
use crate::kernels::group::groups_for_data;
use crate::kernels::search::{cmp_eq, cmp_gt, cmp_gte, cmp_lt, cmp_lte, cmp_neq, find, find_all};
use crate::kernels::select::by_indices_with_na;
use crate::kernels::sort::{sorted_indices, sorted_indices_with_ranks};
use crate::kernels::stat::{cum_sum_with_na, max_with_na, min_with_na, prod_with_na, sum_with_na};
use crate::kernels::unique::is_unique_by_key;
use crate::structs::na_mask::NaMask;
use crate::structs::variants::na::NaPayload;

/// Default number of decimal places when rendering floats.
pub const DEFAULT_FLOAT_PRECISION: usize = 3;

/// # FloatPayload
///
/// Float backing store for one vector.
///
/// ### Fields
/// - `data`: dense values, `NaN` at NA slots.
/// - `na`: missing-value mask of equal length.
/// - `precision`: decimal places used by string renderings.
#[derive(Clone, Debug)]
pub struct FloatPayload {
    pub(crate) data: Vec<f64>,
    pub(crate) na: NaMask,
    pub(crate) precision: usize,
}

impl FloatPayload {
    /// Builds a float payload. An NA mask whose length differs from the data
    /// degrades the result to the empty NA payload.
    pub fn new(data: Vec<f64>, na: Option<Vec<bool>>) -> Payload {
        match na {
            Some(na) if na.len() != data.len() => Payload::Na(NaPayload::new(0)),
            Some(na) => Payload::Float(Self::from_parts(data, na)),
            None => {
                let len = data.len();
                Payload::Float(Self::from_parts(data, vec![false; len]))
            }
        }
    }

    /// Internal constructor; lengths must already match. Forces `NaN` into
    /// every NA slot.
    pub(crate) fn from_parts(mut data: Vec<f64>, na: Vec<bool>) -> Self {
        for (value, &is_na) in data.iter_mut().zip(&na) {
            if is_na {
                *value = f64::NAN;
            }
        }
        Self {
            data,
            na: NaMask::from_flags(na),
            precision: DEFAULT_FLOAT_PRECISION,
        }
    }

    fn derived(&self, data: Vec<f64>, na: Vec<bool>) -> Payload {
        let mut out = Self::from_parts(data, na);
        out.precision = self.precision;
        Payload::Float(out)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub(crate) fn na_mask(&self) -> &NaMask {
        &self.na
    }

    pub(crate) fn with_precision(&self, precision: usize) -> Payload {
        let mut out = self.clone();
        out.precision = precision;
        Payload::Float(out)
    }

    pub(crate) fn by_indices(&self, indices: &[usize]) -> Payload {
        let (data, na) = by_indices_with_na(indices, &self.data, self.na.as_slice(), f64::NAN);
        self.derived(data, na)
    }

    pub(crate) fn integers(&self) -> (Vec<i64>, Vec<bool>) {
        let mut na = self.na.is_na();
        let data = self
            .data
            .iter()
            .zip(na.iter_mut())
            .map(|(&v, is_na)| {
                if *is_na || !v.is_finite() {
                    *is_na = true;
                    0
                } else {
                    v as i64
                }
            })
            .collect();
        (data, na)
    }

    pub(crate) fn floats(&self) -> (Vec<f64>, Vec<bool>) {
        (self.data.clone(), self.na.is_na())
    }

    pub(crate) fn complexes(&self) -> (Vec<Complex64>, Vec<bool>) {
        let data = self
            .data
            .iter()
            .zip(self.na.as_slice())
            .map(|(&v, &is_na)| {
                if is_na {
                    Complex64::new(f64::NAN, f64::NAN)
                } else {
                    Complex64::new(v, 0.0)
                }
            })
            .collect();
        (data, self.na.is_na())
    }

    pub(crate) fn booleans(&self) -> (Vec<bool>, Vec<bool>) {
        let data = self
            .data
            .iter()
            .zip(self.na.as_slice())
            .map(|(&v, &is_na)| !is_na && v != 0.0)
            .collect();
        (data, self.na.is_na())
    }

    pub(crate) fn strings(&self) -> (Vec<String>, Vec<bool>) {
        let data = (1..=self.len())
            .map(|idx| {
                if self.na.get(idx - 1) {
                    String::new()
                } else {
                    self.str_for_elem(idx)
                }
            })
            .collect();
        (data, self.na.is_na())
    }

    pub(crate) fn values(&self) -> (Vec<Value>, Vec<bool>) {
        let data = self
            .data
            .iter()
            .zip(self.na.as_slice())
            .map(|(&v, &is_na)| if is_na { Value::Na } else { Value::Float(v) })
            .collect();
        (data, self.na.is_na())
    }

    pub(crate) fn which(&self, whicher: &WhichFn<'_, f64>) -> Vec<bool> {
        which_with_na(&self.data, self.na.as_slice(), whicher)
    }

    pub(crate) fn apply(&self, applier: &ApplyFn<'_, f64, f64>) -> Payload {
        let (data, na) = apply_with_na(&self.data, self.na.as_slice(), applier, f64::NAN);
        self.derived(data, na)
    }

    pub(crate) fn summarize(&self, folder: FoldFn<'_, f64, f64>) -> Payload {
        let (value, is_na) = fold_with_na(&self.data, self.na.as_slice(), folder, 0.0, f64::NAN);
        self.derived(vec![value], vec![is_na])
    }

    pub(crate) fn append(&self, other: &Payload) -> Payload {
        let (mut data, mut na) = self.floats();
        match other.floats() {
            Some((other_data, other_na)) => {
                data.extend(other_data);
                na.extend(other_na);
            }
            None => {
                data.extend(std::iter::repeat(f64::NAN).take(other.len()));
                na.extend(std::iter::repeat(true).take(other.len()));
            }
        }
        self.derived(data, na)
    }

    pub(crate) fn adjust(&self, size: usize) -> Payload {
        use crate::kernels::resize::{adjust_to_bigger_with_na, adjust_to_lesser_with_na};
        let (data, na) = if size < self.len() {
            adjust_to_lesser_with_na(&self.data, self.na.as_slice(), size)
        } else if size > self.len() {
            adjust_to_bigger_with_na(&self.data, self.na.as_slice(), size)
        } else {
            return Payload::Float(self.clone());
        };
        self.derived(data, na)
    }

    pub(crate) fn coalesce(&self, other: &Payload) -> Payload {
        let adjusted;
        let other = if other.len() != self.len() {
            adjusted = other.adjust(self.len());
            &adjusted
        } else {
            other
        };

        match other.floats() {
            Some((src_data, src_na)) => {
                let (data, na) =
                    coalesce_with_na(&self.data, self.na.as_slice(), &src_data, &src_na);
                self.derived(data, na)
            }
            None => Payload::Float(self.clone()),
        }
    }

    pub(crate) fn groups(&self) -> (Vec<Vec<usize>>, Vec<Value>) {
        // Bit patterns as hash keys so that equal floats group together and
        // NaN payload values stay distinguishable.
        groups_for_data(
            &self.data,
            self.na.as_slice(),
            |v| v.to_bits(),
            |v| Value::Float(*v),
        )
    }

    pub(crate) fn str_for_elem(&self, idx: usize) -> String {
        if self.na.get(idx - 1) {
            return "NA".to_string();
        }
        format_float(self.data[idx - 1], self.precision)
    }

    fn needle(val: &Value) -> Option<f64> {
        match val {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            Value::Complex(c) if c.im == 0.0 => Some(c.re),
            _ => None,
        }
    }

    pub(crate) fn find(&self, needle: &Value) -> usize {
        find(Self::needle(needle), &self.data, self.na.as_slice())
    }

    pub(crate) fn find_all(&self, needle: &Value) -> Vec<usize> {
        find_all(Self::needle(needle), &self.data, self.na.as_slice())
    }

    pub(crate) fn eq(&self, val: &Value) -> Vec<bool> {
        cmp_eq(Self::needle(val), &self.data, self.na.as_slice())
    }

    pub(crate) fn neq(&self, val: &Value) -> Vec<bool> {
        cmp_neq(Self::needle(val), &self.data, self.na.as_slice())
    }

    pub(crate) fn gt(&self, val: &Value) -> Vec<bool> {
        cmp_gt(Self::needle(val), &self.data, self.na.as_slice())
    }

    pub(crate) fn lt(&self, val: &Value) -> Vec<bool> {
        cmp_lt(Self::needle(val), &self.data, self.na.as_slice())
    }

    pub(crate) fn gte(&self, val: &Value) -> Vec<bool> {
        cmp_gte(Self::needle(val), &self.data, self.na.as_slice())
    }

    pub(crate) fn lte(&self, val: &Value) -> Vec<bool> {
        cmp_lte(Self::needle(val), &self.data, self.na.as_slice())
    }

    pub(crate) fn sorted_indices(&self) -> Vec<usize> {
        sorted_indices(self.len(), self.na.as_slice(), |a, b| {
            self.data[a] < self.data[b]
        })
    }

    pub(crate) fn sorted_indices_with_ranks(&self) -> (Vec<usize>, Vec<usize>) {
        sorted_indices_with_ranks(
            self.len(),
            self.na.as_slice(),
            |a, b| self.data[a] < self.data[b],
            |a, b| self.data[a] == self.data[b],
        )
    }

    pub(crate) fn is_unique(&self) -> Vec<bool> {
        is_unique_by_key(&self.data, self.na.as_slice(), |v| v.to_bits())
    }

    pub(crate) fn sum(&self) -> Payload {
        let (value, is_na) = sum_with_na(&self.data, self.na.as_slice(), f64::NAN);
        self.derived(vec![value], vec![is_na])
    }

    pub(crate) fn prod(&self) -> Payload {
        let (value, is_na) = prod_with_na(&self.data, self.na.as_slice(), f64::NAN);
        self.derived(vec![value], vec![is_na])
    }

    pub(crate) fn mean(&self) -> Payload {
        if self.is_empty() {
            return self.derived(vec![f64::NAN], vec![true]);
        }
        let (sum, is_na) = sum_with_na(&self.data, self.na.as_slice(), f64::NAN);
        if is_na {
            self.derived(vec![f64::NAN], vec![true])
        } else {
            self.derived(vec![sum / self.len() as f64], vec![false])
        }
    }

    pub(crate) fn cum_sum(&self) -> Payload {
        let (data, na) = cum_sum_with_na(&self.data, self.na.as_slice(), f64::NAN);
        self.derived(data, na)
    }

    pub(crate) fn min(&self) -> Payload {
        let (value, is_na) = min_with_na(&self.data, self.na.as_slice(), f64::NAN, |a, b| a < b);
        self.derived(vec![value], vec![is_na])
    }

    pub(crate) fn max(&self) -> Payload {
        let (value, is_na) = max_with_na(&self.data, self.na.as_slice(), f64::NAN, |a, b| a < b);
        self.derived(vec![value], vec![is_na])
    }
}

/// Renders a float with fixed decimal places. Non-finite values use the
/// spellings `NaN`, `+Inf` and `-Inf`.
pub(crate) fn format_float(value: f64, precision: usize) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "+Inf".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Inf".to_string()
    } else {
        format!("{:.*}", precision, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(data: Vec<f64>, na: Option<Vec<bool>>) -> FloatPayload {
        match FloatPayload::new(data, na) {
            Payload::Float(p) => p,
            _ => panic!("expected float payload"),
        }
    }

    #[test]
    fn test_na_slots_hold_nan() {
        let p = payload(vec![1.5, 2.5], Some(vec![false, true]));
        assert!(p.data[1].is_nan());
    }

    #[test]
    fn test_str_for_elem_renderings() {
        let p = payload(
            vec![1.2345, f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 0.0],
            Some(vec![false, false, false, false, true]),
        );
        assert_eq!(p.str_for_elem(1), "1.234");
        assert_eq!(p.str_for_elem(2), "NaN");
        assert_eq!(p.str_for_elem(3), "+Inf");
        assert_eq!(p.str_for_elem(4), "-Inf");
        assert_eq!(p.str_for_elem(5), "NA");
    }

    #[test]
    fn test_precision_survives_derivation() {
        let p = match payload(vec![1.23456], None).with_precision(5) {
            Payload::Float(p) => p,
            _ => unreachable!(),
        };
        let doubled = p.apply(&ApplyFn::Elem(&|v: &f64, na| (v * 2.0, na)));
        assert_eq!(doubled.str_for_elem(1), "2.46912");
    }

    #[test]
    fn test_integers_conversion() {
        let p = payload(vec![1.9, -2.9, f64::NAN, f64::INFINITY], None);
        let (data, na) = p.integers();
        assert_eq!(data, vec![1, -2, 0, 0]);
        assert_eq!(na, vec![false, false, true, true]);
    }

    #[test]
    fn test_sum_exact() {
        let p = payload(vec![-20.0, 10.0, 4.0, -20.0, 27.0], None);
        let (data, na) = p.sum().floats().unwrap();
        assert_eq!(data, vec![1.0]);
        assert_eq!(na, vec![false]);
    }

    #[test]
    fn test_mean() {
        let p = payload(vec![1.0, 2.0, 3.0], None);
        assert_eq!(p.mean().floats().unwrap().0, vec![2.0]);

        let p = payload(vec![1.0, 2.0], Some(vec![false, true]));
        assert_eq!(p.mean().floats().unwrap().1, vec![true]);
    }

    #[test]
    fn test_cum_sum_poisons_after_na() {
        let p = payload(vec![1.0, 2.0, 3.0], Some(vec![false, true, false]));
        let (data, na) = p.cum_sum().floats().unwrap();
        assert_eq!(data[0], 1.0);
        assert!(data[1].is_nan() && data[2].is_nan());
        assert_eq!(na, vec![false, true, true]);
    }

    #[test]
    fn test_min_max() {
        let p = payload(vec![3.0, 1.0, 2.0], None);
        assert_eq!(p.min().floats().unwrap().0, vec![1.0]);
        assert_eq!(p.max().floats().unwrap().0, vec![3.0]);

        let with_na = payload(vec![3.0, 1.0], Some(vec![false, true]));
        assert_eq!(with_na.min().floats().unwrap().1, vec![true]);
    }

    #[test]
    fn test_eq_float_needle() {
        let p = payload(vec![1.0, 2.0, f64::NAN], None);
        assert_eq!(p.eq(&Value::Int(2)), vec![false, true, false]);
        assert_eq!(p.eq(&Value::Float(f64::NAN)), vec![false, false, false]);
    }
}
