//! # **BooleanPayload Module** - *Typed Boolean Backing Store*
//!
//! Dense `bool` payload with a per-element NA mask. NA slots hold `false`.
//! Ordering treats `false < true`.

use num_complex::Complex64;

use crate::enums::ops::{ApplyFn, FoldFn, WhichFn};
use crate::enums::payload::Payload;
use crate::enums::value::Value;
use crate::kernels::apply::{apply_with_na, fold_with_na, which_with_na};
use crate::kernels::coalesce::coalesce_with_na;
use crate::kernels::group::groups_for_data;
use crate::kernels::resize::{adjust_to_bigger_with_na, adjust_to_lesser_with_na};
use crate::kernels::search::{cmp_eq, cmp_neq, find, find_all};
use crate::kernels::select::by_indices_with_na;
use crate::kernels::sort::{sorted_indices, sorted_indices_with_ranks};
use crate::kernels::unique::is_unique_by_key;
use crate::structs::na_mask::NaMask;
use crate::structs::variants::na::NaPayload;

/// # BooleanPayload
///
/// Boolean backing store for one vector.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct BooleanPayload {
    pub(crate) data: Vec<bool>,
    pub(crate) na: NaMask,
}

impl BooleanPayload {
    /// Builds a boolean payload. An NA mask whose length differs from the
    /// data degrades the result to the empty NA payload.
    pub fn new(data: Vec<bool>, na: Option<Vec<bool>>) -> Payload {
        match na {
            Some(na) if na.len() != data.len() => Payload::Na(NaPayload::new(0)),
            Some(na) => Payload::Boolean(Self::from_parts(data, na)),
            None => {
                let len = data.len();
                Payload::Boolean(Self::from_parts(data, vec![false; len]))
            }
        }
    }

    pub(crate) fn from_parts(mut data: Vec<bool>, na: Vec<bool>) -> Self {
        for (value, &is_na) in data.iter_mut().zip(&na) {
            if is_na {
                *value = false;
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
        let (data, na) = by_indices_with_na(indices, &self.data, self.na.as_slice(), false);
        Payload::Boolean(Self::from_parts(data, na))
    }

    pub(crate) fn integers(&self) -> (Vec<i64>, Vec<bool>) {
        let data = self.data.iter().map(|&v| v as i64).collect();
        (data, self.na.is_na())
    }

    pub(crate) fn floats(&self) -> (Vec<f64>, Vec<bool>) {
        let data = self
            .data
            .iter()
            .zip(self.na.as_slice())
            .map(|(&v, &is_na)| {
                if is_na {
                    f64::NAN
                } else if v {
                    1.0
                } else {
                    0.0
                }
            })
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
                    Complex64::new(if v { 1.0 } else { 0.0 }, 0.0)
                }
            })
            .collect();
        (data, self.na.is_na())
    }

    pub(crate) fn booleans(&self) -> (Vec<bool>, Vec<bool>) {
        (self.data.clone(), self.na.is_na())
    }

    pub(crate) fn strings(&self) -> (Vec<String>, Vec<bool>) {
        let data = self
            .data
            .iter()
            .zip(self.na.as_slice())
            .map(|(&v, &is_na)| {
                if is_na {
                    String::new()
                } else {
                    v.to_string()
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
            .map(|(&v, &is_na)| if is_na { Value::Na } else { Value::Bool(v) })
            .collect();
        (data, self.na.is_na())
    }

    pub(crate) fn which(&self, whicher: &WhichFn<'_, bool>) -> Vec<bool> {
        which_with_na(&self.data, self.na.as_slice(), whicher)
    }

    pub(crate) fn apply(&self, applier: &ApplyFn<'_, bool, bool>) -> Payload {
        let (data, na) = apply_with_na(&self.data, self.na.as_slice(), applier, false);
        Payload::Boolean(Self::from_parts(data, na))
    }

    pub(crate) fn summarize(&self, folder: FoldFn<'_, bool, bool>) -> Payload {
        let (value, is_na) = fold_with_na(&self.data, self.na.as_slice(), folder, false, false);
        Payload::Boolean(Self::from_parts(vec![value], vec![is_na]))
    }

    pub(crate) fn append(&self, other: &Payload) -> Payload {
        let (mut data, mut na) = self.booleans();
        match other.booleans() {
            Some((other_data, other_na)) => {
                data.extend(other_data);
                na.extend(other_na);
            }
            None => {
                data.extend(std::iter::repeat(false).take(other.len()));
                na.extend(std::iter::repeat(true).take(other.len()));
            }
        }
        Payload::Boolean(Self::from_parts(data, na))
    }

    pub(crate) fn adjust(&self, size: usize) -> Payload {
        let (data, na) = if size < self.len() {
            adjust_to_lesser_with_na(&self.data, self.na.as_slice(), size)
        } else if size > self.len() {
            adjust_to_bigger_with_na(&self.data, self.na.as_slice(), size)
        } else {
            return Payload::Boolean(self.clone());
        };
        Payload::Boolean(Self::from_parts(data, na))
    }

    pub(crate) fn coalesce(&self, other: &Payload) -> Payload {
        let adjusted;
        let other = if other.len() != self.len() {
            adjusted = other.adjust(self.len());
            &adjusted
        } else {
            other
        };

        match other.booleans() {
            Some((src_data, src_na)) => {
                let (data, na) =
                    coalesce_with_na(&self.data, self.na.as_slice(), &src_data, &src_na);
                Payload::Boolean(Self::from_parts(data, na))
            }
            None => Payload::Boolean(self.clone()),
        }
    }

    pub(crate) fn groups(&self) -> (Vec<Vec<usize>>, Vec<Value>) {
        groups_for_data(&self.data, self.na.as_slice(), |v| *v, |v| Value::Bool(*v))
    }

    pub(crate) fn str_for_elem(&self, idx: usize) -> String {
        if self.na.get(idx - 1) {
            "NA".to_string()
        } else {
            self.data[idx - 1].to_string()
        }
    }

    fn needle(val: &Value) -> Option<bool> {
        match val {
            Value::Bool(v) => Some(*v),
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

    pub(crate) fn sorted_indices(&self) -> Vec<usize> {
        sorted_indices(self.len(), self.na.as_slice(), |a, b| {
            !self.data[a] & self.data[b]
        })
    }

    pub(crate) fn sorted_indices_with_ranks(&self) -> (Vec<usize>, Vec<usize>) {
        sorted_indices_with_ranks(
            self.len(),
            self.na.as_slice(),
            |a, b| !self.data[a] & self.data[b],
            |a, b| self.data[a] == self.data[b],
        )
    }

    pub(crate) fn is_unique(&self) -> Vec<bool> {
        is_unique_by_key(&self.data, self.na.as_slice(), |v| *v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(data: Vec<bool>, na: Option<Vec<bool>>) -> BooleanPayload {
        match BooleanPayload::new(data, na) {
            Payload::Boolean(p) => p,
            _ => panic!("expected boolean payload"),
        }
    }

    #[test]
    fn test_integers_conversion() {
        let p = payload(vec![true, false, true], Some(vec![false, false, true]));
        let (data, na) = p.integers();
        assert_eq!(data, vec![1, 0, 0]);
        assert_eq!(na, vec![false, false, true]);
    }

    #[test]
    fn test_strings() {
        let p = payload(vec![true, false], Some(vec![false, true]));
        assert_eq!(p.strings().0, vec!["true".to_string(), String::new()]);
        assert_eq!(p.str_for_elem(2), "NA");
    }

    #[test]
    fn test_needle_rejects_non_boolean() {
        let p = payload(vec![true, false], None);
        assert_eq!(p.find(&Value::Bool(false)), 2);
        assert_eq!(p.find(&Value::Int(1)), 0);
    }

    #[test]
    fn test_sorted_false_before_true() {
        let p = payload(vec![true, false, true, false], None);
        assert_eq!(p.sorted_indices(), vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_groups() {
        let p = payload(vec![true, false, true], None);
        let (groups, values) = p.groups();
        assert_eq!(groups, vec![vec![1, 3], vec![2]]);
        assert_eq!(values, vec![Value::Bool(true), Value::Bool(false)]);
    }
}
