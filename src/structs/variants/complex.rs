//! # **ComplexPayload Module** - *Typed Complex Backing Store*
//!
//! Dense `Complex64` payload with a per-element NA mask.
//!
//! ## Overview
//! - Logical type: complex numbers with `f64` components.
//! - Physical storage: `Vec<Complex64>` plus [`NaMask`]; NA slots hold
//!   `NaN + NaN·i`.
//! - Complex numbers carry no total order, so the ordering comparisons and
//!   sorting are not part of this payload's surface.
//!
//! ## Capabilities
//! Gather, conversions, predicate selection, transform, summarization,
//! append, adjust, coalesce, grouping, uniqueness, equality search, plus
//! `sum`/`prod`/`mean`/`cum_sum`.

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
use crate::kernels::stat::{cum_sum_with_na, prod_with_na, sum_with_na};
use crate::kernels::unique::is_unique_by_key;
use crate::structs::na_mask::NaMask;
use crate::structs::variants::float::DEFAULT_FLOAT_PRECISION;
use crate::structs::variants::na::NaPayload;

const NA_COMPLEX: Complex64 = Complex64::new(f64::NAN, f64::NAN);

/// # ComplexPayload
///
/// Complex backing store for one vector.
#[derive(Clone, Debug)]
pub struct ComplexPayload {
    pub(crate) data: Vec<Complex64>,
    pub(crate) na: NaMask,
    pub(crate) precision: usize,
}

impl ComplexPayload {
    /// Builds a complex payload. An NA mask whose length differs from the
    /// data degrades the result to the empty NA payload.
    pub fn new(data: Vec<Complex64>, na: Option<Vec<bool>>) -> Payload {
        match na {
            Some(na) if na.len() != data.len() => Payload::Na(NaPayload::new(0)),
            Some(na) => Payload::Complex(Self::from_parts(data, na)),
            None => {
                let len = data.len();
                Payload::Complex(Self::from_parts(data, vec![false; len]))
            }
        }
    }

    pub(crate) fn from_parts(mut data: Vec<Complex64>, na: Vec<bool>) -> Self {
        for (value, &is_na) in data.iter_mut().zip(&na) {
            if is_na {
                *value = NA_COMPLEX;
            }
        }
        Self {
            data,
            na: NaMask::from_flags(na),
            precision: DEFAULT_FLOAT_PRECISION,
        }
    }

    fn derived(&self, data: Vec<Complex64>, na: Vec<bool>) -> Payload {
        let mut out = Self::from_parts(data, na);
        out.precision = self.precision;
        Payload::Complex(out)
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
        Payload::Complex(out)
    }

    pub(crate) fn by_indices(&self, indices: &[usize]) -> Payload {
        let (data, na) = by_indices_with_na(indices, &self.data, self.na.as_slice(), NA_COMPLEX);
        self.derived(data, na)
    }

    pub(crate) fn integers(&self) -> (Vec<i64>, Vec<bool>) {
        let mut na = self.na.is_na();
        let data = self
            .data
            .iter()
            .zip(na.iter_mut())
            .map(|(v, is_na)| {
                if *is_na || !v.re.is_finite() {
                    *is_na = true;
                    0
                } else {
                    v.re as i64
                }
            })
            .collect();
        (data, na)
    }

    pub(crate) fn floats(&self) -> (Vec<f64>, Vec<bool>) {
        let data = self
            .data
            .iter()
            .zip(self.na.as_slice())
            .map(|(v, &is_na)| if is_na { f64::NAN } else { v.re })
            .collect();
        (data, self.na.is_na())
    }

    pub(crate) fn complexes(&self) -> (Vec<Complex64>, Vec<bool>) {
        (self.data.clone(), self.na.is_na())
    }

    pub(crate) fn booleans(&self) -> (Vec<bool>, Vec<bool>) {
        let data = self
            .data
            .iter()
            .zip(self.na.as_slice())
            .map(|(v, &is_na)| !is_na && (v.re != 0.0 || v.im != 0.0))
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
            .map(|(v, &is_na)| if is_na { Value::Na } else { Value::Complex(*v) })
            .collect();
        (data, self.na.is_na())
    }

    pub(crate) fn which(&self, whicher: &WhichFn<'_, Complex64>) -> Vec<bool> {
        which_with_na(&self.data, self.na.as_slice(), whicher)
    }

    pub(crate) fn apply(&self, applier: &ApplyFn<'_, Complex64, Complex64>) -> Payload {
        let (data, na) = apply_with_na(&self.data, self.na.as_slice(), applier, NA_COMPLEX);
        self.derived(data, na)
    }

    pub(crate) fn summarize(&self, folder: FoldFn<'_, Complex64, Complex64>) -> Payload {
        let (value, is_na) = fold_with_na(
            &self.data,
            self.na.as_slice(),
            folder,
            Complex64::new(0.0, 0.0),
            NA_COMPLEX,
        );
        self.derived(vec![value], vec![is_na])
    }

    pub(crate) fn append(&self, other: &Payload) -> Payload {
        let (mut data, mut na) = self.complexes();
        match other.complexes() {
            Some((other_data, other_na)) => {
                data.extend(other_data);
                na.extend(other_na);
            }
            None => {
                data.extend(std::iter::repeat(NA_COMPLEX).take(other.len()));
                na.extend(std::iter::repeat(true).take(other.len()));
            }
        }
        self.derived(data, na)
    }

    pub(crate) fn adjust(&self, size: usize) -> Payload {
        let (data, na) = if size < self.len() {
            adjust_to_lesser_with_na(&self.data, self.na.as_slice(), size)
        } else if size > self.len() {
            adjust_to_bigger_with_na(&self.data, self.na.as_slice(), size)
        } else {
            return Payload::Complex(self.clone());
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

        match other.complexes() {
            Some((src_data, src_na)) => {
                let (data, na) =
                    coalesce_with_na(&self.data, self.na.as_slice(), &src_data, &src_na);
                self.derived(data, na)
            }
            None => Payload::Complex(self.clone()),
        }
    }

    pub(crate) fn groups(&self) -> (Vec<Vec<usize>>, Vec<Value>) {
        groups_for_data(
            &self.data,
            self.na.as_slice(),
            |v| (v.re.to_bits(), v.im.to_bits()),
            |v| Value::Complex(*v),
        )
    }

    pub(crate) fn str_for_elem(&self, idx: usize) -> String {
        if self.na.get(idx - 1) {
            return "NA".to_string();
        }
        format_complex(self.data[idx - 1], self.precision)
    }

    fn needle(val: &Value) -> Option<Complex64> {
        match val {
            Value::Complex(c) => Some(*c),
            Value::Float(v) => Some(Complex64::new(*v, 0.0)),
            Value::Int(v) => Some(Complex64::new(*v as f64, 0.0)),
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

    pub(crate) fn is_unique(&self) -> Vec<bool> {
        is_unique_by_key(&self.data, self.na.as_slice(), |v| {
            (v.re.to_bits(), v.im.to_bits())
        })
    }

    pub(crate) fn sum(&self) -> Payload {
        let (value, is_na) = sum_with_na(&self.data, self.na.as_slice(), NA_COMPLEX);
        self.derived(vec![value], vec![is_na])
    }

    pub(crate) fn prod(&self) -> Payload {
        let (value, is_na) = prod_with_na(&self.data, self.na.as_slice(), NA_COMPLEX);
        self.derived(vec![value], vec![is_na])
    }

    pub(crate) fn mean(&self) -> Payload {
        if self.is_empty() {
            return self.derived(vec![NA_COMPLEX], vec![true]);
        }
        let (sum, is_na) = sum_with_na(&self.data, self.na.as_slice(), NA_COMPLEX);
        if is_na {
            self.derived(vec![NA_COMPLEX], vec![true])
        } else {
            self.derived(vec![sum / self.len() as f64], vec![false])
        }
    }

    pub(crate) fn cum_sum(&self) -> Payload {
        let (data, na) = cum_sum_with_na(&self.data, self.na.as_slice(), NA_COMPLEX);
        self.derived(data, na)
    }
}

/// Renders a complex number as `(re±imi)` with fixed decimal places. Any NaN
/// component collapses the rendering to `NaN`, any infinite one to `Inf`.
pub(crate) fn format_complex(value: Complex64, precision: usize) -> String {
    if value.re.is_nan() || value.im.is_nan() {
        "NaN".to_string()
    } else if value.re.is_infinite() || value.im.is_infinite() {
        "Inf".to_string()
    } else {
        format!("({:.p$}{:+.p$}i)", value.re, value.im, p = precision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(data: Vec<Complex64>, na: Option<Vec<bool>>) -> ComplexPayload {
        match ComplexPayload::new(data, na) {
            Payload::Complex(p) => p,
            _ => panic!("expected complex payload"),
        }
    }

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    #[test]
    fn test_str_for_elem_format() {
        let p = payload(
            vec![c(1.0, 0.0), c(-11.0, 2.5), NA_COMPLEX, c(f64::INFINITY, 0.0), c(0.0, 0.0)],
            Some(vec![false, false, false, false, true]),
        );
        assert_eq!(p.str_for_elem(1), "(1.000+0.000i)");
        assert_eq!(p.str_for_elem(2), "(-11.000+2.500i)");
        assert_eq!(p.str_for_elem(3), "NaN");
        assert_eq!(p.str_for_elem(4), "Inf");
        assert_eq!(p.str_for_elem(5), "NA");
    }

    #[test]
    fn test_integers_real_part() {
        let p = payload(vec![c(3.7, 1.0), c(-2.0, 0.0)], Some(vec![false, false]));
        let (data, na) = p.integers();
        assert_eq!(data, vec![3, -2]);
        assert_eq!(na, vec![false, false]);
    }

    #[test]
    fn test_booleans_nonzero() {
        let p = payload(
            vec![c(0.0, 0.0), c(0.0, 1.0), c(2.0, 0.0)],
            Some(vec![false, false, false]),
        );
        assert_eq!(p.booleans().0, vec![false, true, true]);
    }

    #[test]
    fn test_eq_promotes_real_needle() {
        let p = payload(vec![c(2.0, 0.0), c(2.0, 1.0)], None);
        assert_eq!(p.eq(&Value::Int(2)), vec![true, false]);
        assert_eq!(p.eq(&Value::Complex(c(2.0, 1.0))), vec![false, true]);
    }

    #[test]
    fn test_sum_and_mean() {
        let p = payload(vec![c(1.0, 2.0), c(3.0, -4.0)], None);
        assert_eq!(p.sum().complexes().unwrap().0, vec![c(4.0, -2.0)]);
        assert_eq!(p.mean().complexes().unwrap().0, vec![c(2.0, -1.0)]);
    }

    #[test]
    fn test_groups_by_both_components() {
        let p = payload(vec![c(1.0, 1.0), c(1.0, 2.0), c(1.0, 1.0)], None);
        let (groups, _) = p.groups();
        assert_eq!(groups, vec![vec![1, 3], vec![2]]);
    }
}
