//! # **IntegerPayload Module** - *Typed Integer Backing Store*
//!
//! Dense `i64` payload with a per-element NA mask.
//!
//! ## Overview
//! - Logical type: signed 64-bit integers.
//! - Physical storage: `Vec<i64>` plus [`NaMask`]; NA slots hold `0` and must
//!   never be read as real values.
//! - Usable standalone or as the integer arm of the [`Payload`] enum.
//!
//! ## Capabilities
//! Full contract: gather, all numeric/boolean/string conversions, predicate
//! selection, elementwise transform, fold summarization, append, recycling
//! adjust, NA-coalescing, grouping, sorting, uniqueness, value lookup and the
//! six relational comparisons, plus `sum`/`prod`/`cum_sum`/`min`/`max`.

use num_complex::Complex64;

use crate::enums::ops::{ApplyFn, FoldFn, WhichFn};
use crate::enums::payload::Payload;
use crate::enums::value::Value;
use crate::kernels::apply::{apply_with_na, fold_with_na, which_with_na};
use crate::kernels::coalesce::coalesce_with_na;
use crate::kernels::group::groups_for_data;
use crate::kernels::resize::{adjust_to_bigger_with_na, adjust_to_lesser_with_na};
use crate::kernels::search::{cmp_eq, cmp_gt, cmp_gte, cmp_lt, cmp_lte, cmp_neq, find, find_all};
use crate::kernels::select::by_indices_with_na;
use crate::kernels::sort::{sorted_indices, sorted_indices_with_ranks};
use crate::kernels::stat::{cum_sum_with_na, max_with_na, min_with_na, prod_with_na, sum_with_na};
use crate::kernels::unique::is_unique_by_key;
use crate::structs::na_mask::NaMask;
use crate::structs::variants::na::NaPayload;

/// # IntegerPayload
///
/// Integer backing store for one vector.
///
/// ### Fields
/// - `data`: dense values, `0` at NA slots.
/// - `na`: missing-value mask of equal length.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct IntegerPayload {
    pub(crate) data: Vec<i64>,
    pub(crate) na: NaMask,
}

impl IntegerPayload {
    /// Builds an integer payload. An NA mask whose length differs from the
    /// data is a hard construction failure: the result degrades to the empty
    /// NA payload.
    pub fn new(data: Vec<i64>, na: Option<Vec<bool>>) -> Payload {
        match na {
            Some(na) if na.len() != data.len() => Payload::Na(NaPayload::new(0)),
            Some(na) => Payload::Integer(Self::from_parts(data, na)),
            None => {
                let len = data.len();
                Payload::Integer(Self::from_parts(data, vec![false; len]))
            }
        }
    }

    /// Internal constructor; lengths must already match. Forces `0` into
    /// every NA slot.
    pub(crate) fn from_parts(mut data: Vec<i64>, na: Vec<bool>) -> Self {
        for (value, &is_na) in data.iter_mut().zip(&na) {
            if is_na {
                *value = 0;
            }
        }
        Self {
            data,
            na: NaMask::from_flags(na),
        }
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

    pub(crate) fn by_indices(&self, indices: &[usize]) -> Payload {
        let (data, na) = by_indices_with_na(indices, &self.data, self.na.as_slice(), 0);
        Payload::Integer(Self::from_parts(data, na))
    }

    pub(crate) fn integers(&self) -> (Vec<i64>, Vec<bool>) {
        (self.data.clone(), self.na.is_na())
    }

    pub(crate) fn floats(&self) -> (Vec<f64>, Vec<bool>) {
        let data = self
            .data
            .iter()
            .zip(self.na.as_slice())
            .map(|(&v, &is_na)| if is_na { f64::NAN } else { v as f64 })
            .collect();
        (data, self.na.is_na())
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
                    Complex64::new(v as f64, 0.0)
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
            .map(|(&v, &is_na)| !is_na && v != 0)
            .collect();
        (data, self.na.is_na())
    }

    pub(crate) fn strings(&self) -> (Vec<String>, Vec<bool>) {
        let data = self
            .data
            .iter()
            .zip(self.na.as_slice())
            .map(|(&v, &is_na)| if is_na { String::new() } else { v.to_string() })
            .collect();
        (data, self.na.is_na())
    }

    pub(crate) fn values(&self) -> (Vec<Value>, Vec<bool>) {
        let data = self
            .data
            .iter()
            .zip(self.na.as_slice())
            .map(|(&v, &is_na)| if is_na { Value::Na } else { Value::Int(v) })
            .collect();
        (data, self.na.is_na())
    }

    pub(crate) fn which(&self, whicher: &WhichFn<'_, i64>) -> Vec<bool> {
        which_with_na(&self.data, self.na.as_slice(), whicher)
    }

    pub(crate) fn apply(&self, applier: &ApplyFn<'_, i64, i64>) -> Payload {
        let (data, na) = apply_with_na(&self.data, self.na.as_slice(), applier, 0);
        Payload::Integer(Self::from_parts(data, na))
    }

    pub(crate) fn summarize(&self, folder: FoldFn<'_, i64, i64>) -> Payload {
        let (value, is_na) = fold_with_na(&self.data, self.na.as_slice(), folder, 0, 0);
        Payload::Integer(Self::from_parts(vec![value], vec![is_na]))
    }

    pub(crate) fn append(&self, other: &Payload) -> Payload {
        let (mut data, mut na) = self.integers();
        match other.integers() {
            Some((other_data, other_na)) => {
                data.extend(other_data);
                na.extend(other_na);
            }
            None => {
                data.extend(std::iter::repeat(0).take(other.len()));
                na.extend(std::iter::repeat(true).take(other.len()));
            }
        }
        Payload::Integer(Self::from_parts(data, na))
    }

    pub(crate) fn adjust(&self, size: usize) -> Payload {
        let (data, na) = if size < self.len() {
            adjust_to_lesser_with_na(&self.data, self.na.as_slice(), size)
        } else if size > self.len() {
            adjust_to_bigger_with_na(&self.data, self.na.as_slice(), size)
        } else {
            return Payload::Integer(self.clone());
        };
        Payload::Integer(Self::from_parts(data, na))
    }

    pub(crate) fn coalesce(&self, other: &Payload) -> Payload {
        let adjusted;
        let other = if other.len() != self.len() {
            adjusted = other.adjust(self.len());
            &adjusted
        } else {
            other
        };

        match other.integers() {
            Some((src_data, src_na)) => {
                let (data, na) =
                    coalesce_with_na(&self.data, self.na.as_slice(), &src_data, &src_na);
                Payload::Integer(Self::from_parts(data, na))
            }
            None => Payload::Integer(self.clone()),
        }
    }

    pub(crate) fn groups(&self) -> (Vec<Vec<usize>>, Vec<Value>) {
        groups_for_data(&self.data, self.na.as_slice(), |v| *v, |v| Value::Int(*v))
    }

    pub(crate) fn str_for_elem(&self, idx: usize) -> String {
        if self.na.get(idx - 1) {
            "NA".to_string()
        } else {
            self.data[idx - 1].to_string()
        }
    }

    /// Needle conversion for comparisons: exact integer renderings only.
    fn needle(val: &Value) -> Option<i64> {
        match val {
            Value::Int(v) => Some(*v),
            Value::Float(v) if v.is_finite() && v.fract() == 0.0 => Some(*v as i64),
            Value::Complex(c) if c.im == 0.0 && c.re.is_finite() && c.re.fract() == 0.0 => {
                Some(c.re as i64)
            }
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
        is_unique_by_key(&self.data, self.na.as_slice(), |v| *v)
    }

    pub(crate) fn sum(&self) -> Payload {
        let (value, is_na) = sum_with_na(&self.data, self.na.as_slice(), 0);
        Payload::Integer(Self::from_parts(vec![value], vec![is_na]))
    }

    pub(crate) fn prod(&self) -> Payload {
        let (value, is_na) = prod_with_na(&self.data, self.na.as_slice(), 0);
        Payload::Integer(Self::from_parts(vec![value], vec![is_na]))
    }

    pub(crate) fn cum_sum(&self) -> Payload {
        let (data, na) = cum_sum_with_na(&self.data, self.na.as_slice(), 0);
        Payload::Integer(Self::from_parts(data, na))
    }

    pub(crate) fn min(&self) -> Payload {
        let (value, is_na) = min_with_na(&self.data, self.na.as_slice(), 0, |a, b| a < b);
        Payload::Integer(Self::from_parts(vec![value], vec![is_na]))
    }

    pub(crate) fn max(&self) -> Payload {
        let (value, is_na) = max_with_na(&self.data, self.na.as_slice(), 0, |a, b| a < b);
        Payload::Integer(Self::from_parts(vec![value], vec![is_na]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(data: Vec<i64>, na: Option<Vec<bool>>) -> IntegerPayload {
        match IntegerPayload::new(data, na) {
            Payload::Integer(p) => p,
            _ => panic!("expected integer payload"),
        }
    }

    #[test]
    fn test_construction_zeroes_na_slots() {
        let p = payload(vec![1, 2, 3], Some(vec![false, true, false]));
        assert_eq!(p.data, vec![1, 0, 3]);
        assert!(p.na.get(1));
    }

    #[test]
    fn test_na_length_mismatch_degrades() {
        let p = IntegerPayload::new(vec![1, 2, 3], Some(vec![false, true]));
        assert_eq!(p.len(), 0);
        assert!(matches!(p, Payload::Na(_)));
    }

    #[test]
    fn test_by_indices_with_invalid() {
        let p = payload(vec![10, 20, 30], None);
        let out = p.by_indices(&[3, 0, 1, 5]);
        assert_eq!(out.len(), 4);
        assert_eq!(out.str_for_elem(1), "30");
        assert_eq!(out.str_for_elem(2), "NA");
        assert_eq!(out.str_for_elem(3), "10");
        assert_eq!(out.str_for_elem(4), "NA");
    }

    #[test]
    fn test_float_conversion_nan_at_na() {
        let p = payload(vec![1, 2], Some(vec![false, true]));
        let (floats, na) = p.floats();
        assert_eq!(floats[0], 1.0);
        assert!(floats[1].is_nan());
        assert_eq!(na, vec![false, true]);
    }

    #[test]
    fn test_adjust_recycles() {
        let p = payload(vec![1, 2, 3], None);
        let grown = p.adjust(7);
        let (data, _) = grown.integers().unwrap();
        assert_eq!(data, vec![1, 2, 3, 1, 2, 3, 1]);

        let same = p.adjust(3);
        assert_eq!(same.integers().unwrap().0, vec![1, 2, 3]);

        let shrunk = p.adjust(2);
        assert_eq!(shrunk.integers().unwrap().0, vec![1, 2]);
    }

    #[test]
    fn test_append_non_convertible_fills_na() {
        let p = payload(vec![1, 2], None);
        let times = crate::structs::variants::time::TimePayload::new(
            vec![time::OffsetDateTime::UNIX_EPOCH],
            None,
        );
        let out = p.append(&times);
        assert_eq!(out.len(), 3);
        let (_, na) = out.integers().unwrap();
        assert_eq!(na, vec![false, false, true]);
    }

    #[test]
    fn test_coalesce() {
        let p = payload(vec![1, 0, 3], Some(vec![false, true, false]));
        let other = payload(vec![9, 8, 7], None);
        let (data, na) = p.coalesce(&Payload::Integer(other)).integers().unwrap();
        assert_eq!(data, vec![1, 8, 3]);
        assert_eq!(na, vec![false, false, false]);
    }

    #[test]
    fn test_comparator_rejects_fractional() {
        let p = payload(vec![1, 2, 3], None);
        assert_eq!(p.eq(&Value::Float(2.0)), vec![false, true, false]);
        assert_eq!(p.eq(&Value::Float(2.5)), vec![false, false, false]);
        assert_eq!(p.neq(&Value::Str("2".into())), vec![true, true, true]);
    }

    #[test]
    fn test_groups() {
        let p = payload(vec![5, 6, 5, 7], Some(vec![false, false, false, true]));
        let (groups, values) = p.groups();
        assert_eq!(groups, vec![vec![1, 3], vec![2], vec![4]]);
        assert_eq!(values, vec![Value::Int(5), Value::Int(6), Value::Na]);
    }

    #[test]
    fn test_sum_contaminated_by_na() {
        let p = payload(vec![1, 2, 3], Some(vec![false, true, false]));
        let (_, na) = p.sum().integers().unwrap();
        assert_eq!(na, vec![true]);

        let p = payload(vec![1, 2, 3], None);
        let (data, na) = p.sum().integers().unwrap();
        assert_eq!(data, vec![6]);
        assert_eq!(na, vec![false]);
    }

    #[test]
    fn test_sorted_indices() {
        let p = payload(vec![3, 1, 2, 1], Some(vec![false, false, false, true]));
        assert_eq!(p.sorted_indices(), vec![2, 3, 1, 4]);
    }
}
