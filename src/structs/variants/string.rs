//! # **StringPayload Module** - *Typed String Backing Store*
//!
//! Owned `String` payload with a per-element NA mask. NA slots hold the
//! empty string.
//!
//! ## Conversion notes
//! Numeric conversions parse each element. A failed parse is not promoted to
//! NA: integers and floats fall back to `0`, complexes to `NaN + NaN·i`, and
//! the mask keeps only the original NA flags. Boolean conversion tests for
//! non-emptiness rather than parsing `true`/`false`.

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
use crate::kernels::stat::{max_with_na, min_with_na};
use crate::kernels::unique::is_unique_by_key;
use crate::structs::na_mask::NaMask;
use crate::structs::variants::na::NaPayload;

/// # StringPayload
///
/// String backing store for one vector.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct StringPayload {
    pub(crate) data: Vec<String>,
    pub(crate) na: NaMask,
}

impl StringPayload {
    /// Builds a string payload. An NA mask whose length differs from the
    /// data degrades the result to the empty NA payload.
    pub fn new(data: Vec<String>, na: Option<Vec<bool>>) -> Payload {
        match na {
            Some(na) if na.len() != data.len() => Payload::Na(NaPayload::new(0)),
            Some(na) => Payload::String(Self::from_parts(data, na)),
            None => {
                let len = data.len();
                Payload::String(Self::from_parts(data, vec![false; len]))
            }
        }
    }

    pub(crate) fn from_parts(mut data: Vec<String>, na: Vec<bool>) -> Self {
        for (value, &is_na) in data.iter_mut().zip(&na) {
            if is_na {
                value.clear();
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
        let (data, na) = by_indices_with_na(indices, &self.data, self.na.as_slice(), String::new());
        Payload::String(Self::from_parts(data, na))
    }

    pub(crate) fn integers(&self) -> (Vec<i64>, Vec<bool>) {
        let data = self
            .data
            .iter()
            .zip(self.na.as_slice())
            .map(|(v, &is_na)| {
                if is_na {
                    0
                } else {
                    v.parse::<f64>().map(|f| f as i64).unwrap_or(0)
                }
            })
            .collect();
        (data, self.na.is_na())
    }

    pub(crate) fn floats(&self) -> (Vec<f64>, Vec<bool>) {
        let data = self
            .data
            .iter()
            .zip(self.na.as_slice())
            .map(|(v, &is_na)| {
                if is_na {
                    f64::NAN
                } else {
                    v.parse::<f64>().unwrap_or(0.0)
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
            .map(|(v, &is_na)| {
                if is_na {
                    Complex64::new(f64::NAN, f64::NAN)
                } else {
                    parse_complex(v).unwrap_or(Complex64::new(f64::NAN, f64::NAN))
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
            .map(|(v, &is_na)| !is_na && !v.is_empty())
            .collect();
        (data, self.na.is_na())
    }

    pub(crate) fn strings(&self) -> (Vec<String>, Vec<bool>) {
        (self.data.clone(), self.na.is_na())
    }

    pub(crate) fn values(&self) -> (Vec<Value>, Vec<bool>) {
        let data = self
            .data
            .iter()
            .zip(self.na.as_slice())
            .map(|(v, &is_na)| {
                if is_na {
                    Value::Na
                } else {
                    Value::Str(v.clone())
                }
            })
            .collect();
        (data, self.na.is_na())
    }

    pub(crate) fn which(&self, whicher: &WhichFn<'_, str>) -> Vec<bool> {
        which_with_na(&self.data, self.na.as_slice(), whicher)
    }

    pub(crate) fn apply(&self, applier: &ApplyFn<'_, str, String>) -> Payload {
        let (data, na) = apply_with_na(&self.data, self.na.as_slice(), applier, String::new());
        Payload::String(Self::from_parts(data, na))
    }

    pub(crate) fn summarize(&self, folder: FoldFn<'_, str, String>) -> Payload {
        let (value, is_na) = fold_with_na(
            &self.data,
            self.na.as_slice(),
            folder,
            String::new(),
            String::new(),
        );
        Payload::String(Self::from_parts(vec![value], vec![is_na]))
    }

    pub(crate) fn append(&self, other: &Payload) -> Payload {
        let (mut data, mut na) = self.strings();
        match other.strings() {
            Some((other_data, other_na)) => {
                data.extend(other_data);
                na.extend(other_na);
            }
            None => {
                data.extend(std::iter::repeat(String::new()).take(other.len()));
                na.extend(std::iter::repeat(true).take(other.len()));
            }
        }
        Payload::String(Self::from_parts(data, na))
    }

    pub(crate) fn adjust(&self, size: usize) -> Payload {
        let (data, na) = if size < self.len() {
            adjust_to_lesser_with_na(&self.data, self.na.as_slice(), size)
        } else if size > self.len() {
            adjust_to_bigger_with_na(&self.data, self.na.as_slice(), size)
        } else {
            return Payload::String(self.clone());
        };
        Payload::String(Self::from_parts(data, na))
    }

    pub(crate) fn coalesce(&self, other: &Payload) -> Payload {
        let adjusted;
        let other = if other.len() != self.len() {
            adjusted = other.adjust(self.len());
            &adjusted
        } else {
            other
        };

        match other.strings() {
            Some((src_data, src_na)) => {
                let (data, na) =
                    coalesce_with_na(&self.data, self.na.as_slice(), &src_data, &src_na);
                Payload::String(Self::from_parts(data, na))
            }
            None => Payload::String(self.clone()),
        }
    }

    pub(crate) fn groups(&self) -> (Vec<Vec<usize>>, Vec<Value>) {
        groups_for_data(
            &self.data,
            self.na.as_slice(),
            |v| v.clone(),
            |v| Value::Str(v.clone()),
        )
    }

    pub(crate) fn str_for_elem(&self, idx: usize) -> String {
        if self.na.get(idx - 1) {
            "NA".to_string()
        } else {
            self.data[idx - 1].clone()
        }
    }

    fn needle(val: &Value) -> Option<&str> {
        match val {
            Value::Str(v) => Some(v.as_str()),
            _ => None,
        }
    }

    pub(crate) fn find(&self, needle: &Value) -> usize {
        find::<str, _, _>(Self::needle(needle), &self.data, self.na.as_slice())
    }

    pub(crate) fn find_all(&self, needle: &Value) -> Vec<usize> {
        find_all::<str, _, _>(Self::needle(needle), &self.data, self.na.as_slice())
    }

    pub(crate) fn eq(&self, val: &Value) -> Vec<bool> {
        cmp_eq::<str, _, _>(Self::needle(val), &self.data, self.na.as_slice())
    }

    pub(crate) fn neq(&self, val: &Value) -> Vec<bool> {
        cmp_neq::<str, _, _>(Self::needle(val), &self.data, self.na.as_slice())
    }

    pub(crate) fn gt(&self, val: &Value) -> Vec<bool> {
        cmp_gt::<str, _, _>(Self::needle(val), &self.data, self.na.as_slice())
    }

    pub(crate) fn lt(&self, val: &Value) -> Vec<bool> {
        cmp_lt::<str, _, _>(Self::needle(val), &self.data, self.na.as_slice())
    }

    pub(crate) fn gte(&self, val: &Value) -> Vec<bool> {
        cmp_gte::<str, _, _>(Self::needle(val), &self.data, self.na.as_slice())
    }

    pub(crate) fn lte(&self, val: &Value) -> Vec<bool> {
        cmp_lte::<str, _, _>(Self::needle(val), &self.data, self.na.as_slice())
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
        is_unique_by_key(&self.data, self.na.as_slice(), |v| v.clone())
    }

    pub(crate) fn min(&self) -> Payload {
        let (value, is_na) = min_with_na::<str, _>(
            &self.data,
            self.na.as_slice(),
            String::new(),
            |a, b| a < b,
        );
        Payload::String(Self::from_parts(vec![value], vec![is_na]))
    }

    pub(crate) fn max(&self) -> Payload {
        let (value, is_na) = max_with_na::<str, _>(
            &self.data,
            self.na.as_slice(),
            String::new(),
            |a, b| a < b,
        );
        Payload::String(Self::from_parts(vec![value], vec![is_na]))
    }
}

/// Parses `re`, `imi` or `(re+imi)` renderings into a complex number.
fn parse_complex(s: &str) -> Option<Complex64> {
    let s = s.trim();
    let inner = s.strip_prefix('(').and_then(|s| s.strip_suffix(')')).unwrap_or(s);

    if let Some(imag) = inner.strip_suffix('i') {
        // Split at the sign of the imaginary part, skipping a leading sign
        // and exponent signs.
        let bytes = imag.as_bytes();
        let mut split = None;
        for i in (1..bytes.len()).rev() {
            let b = bytes[i];
            if (b == b'+' || b == b'-') && !matches!(bytes[i - 1], b'e' | b'E') {
                split = Some(i);
                break;
            }
        }
        match split {
            Some(i) => {
                let re = imag[..i].parse::<f64>().ok()?;
                let im_str = &imag[i..];
                let im = if im_str == "+" {
                    1.0
                } else if im_str == "-" {
                    -1.0
                } else {
                    im_str.parse::<f64>().ok()?
                };
                Some(Complex64::new(re, im))
            }
            None => {
                let im = if imag.is_empty() || imag == "+" {
                    1.0
                } else if imag == "-" {
                    -1.0
                } else {
                    imag.parse::<f64>().ok()?
                };
                Some(Complex64::new(0.0, im))
            }
        }
    } else {
        inner.parse::<f64>().ok().map(|re| Complex64::new(re, 0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(data: &[&str], na: Option<Vec<bool>>) -> StringPayload {
        let data = data.iter().map(|s| s.to_string()).collect();
        match StringPayload::new(data, na) {
            Payload::String(p) => p,
            _ => panic!("expected string payload"),
        }
    }

    #[test]
    fn test_integers_parse_failure_is_zero_not_na() {
        let p = payload(&["1", "2.9", "oops", ""], Some(vec![false, false, false, true]));
        let (data, na) = p.integers();
        assert_eq!(data, vec![1, 2, 0, 0]);
        assert_eq!(na, vec![false, false, false, true]);
    }

    #[test]
    fn test_floats_parse_failure_is_zero_not_na() {
        let p = payload(&["1.5", "oops"], None);
        let (data, na) = p.floats();
        assert_eq!(data, vec![1.5, 0.0]);
        assert_eq!(na, vec![false, false]);
    }

    #[test]
    fn test_complexes_parse_failure_is_nan_not_na() {
        let p = payload(&["(1.000+2.000i)", "3", "oops"], None);
        let (data, na) = p.complexes();
        assert_eq!(data[0], Complex64::new(1.0, 2.0));
        assert_eq!(data[1], Complex64::new(3.0, 0.0));
        assert!(data[2].re.is_nan() && data[2].im.is_nan());
        assert_eq!(na, vec![false, false, false]);
    }

    #[test]
    fn test_booleans_non_emptiness() {
        let p = payload(&["x", "", "false"], Some(vec![false, false, false]));
        assert_eq!(p.booleans().0, vec![true, false, true]);
    }

    #[test]
    fn test_find_type_mismatch_returns_zero() {
        let p = payload(&["1", "4", "4"], None);
        assert_eq!(p.find(&Value::Str("4".into())), 2);
        assert_eq!(p.find_all(&Value::Str("4".into())), vec![2, 3]);
        assert_eq!(p.find(&Value::Bool(true)), 0);
    }

    #[test]
    fn test_lexicographic_min_max() {
        let p = payload(&["pear", "apple", "plum"], None);
        assert_eq!(p.min().strings().unwrap().0, vec!["apple".to_string()]);
        assert_eq!(p.max().strings().unwrap().0, vec!["plum".to_string()]);
    }

    #[test]
    fn test_sorted_indices_lexicographic() {
        let p = payload(&["b", "a", "c", "a"], Some(vec![false, false, false, true]));
        assert_eq!(p.sorted_indices(), vec![2, 1, 3, 4]);
    }

    #[test]
    fn test_parse_complex_forms() {
        assert_eq!(parse_complex("2i"), Some(Complex64::new(0.0, 2.0)));
        assert_eq!(parse_complex("1-3i"), Some(Complex64::new(1.0, -3.0)));
        assert_eq!(parse_complex("(1.5+0.5i)"), Some(Complex64::new(1.5, 0.5)));
        assert_eq!(parse_complex("-7"), Some(Complex64::new(-7.0, 0.0)));
        assert_eq!(parse_complex("nope"), None);
    }
}
