//! # **AnyPayload Module** - *Heterogeneous Backing Store*
//!
//! Payload of tagged [`Value`] elements for data that does not fit a single
//! native type. Typed conversions extract whichever elements are
//! representable and mark the rest NA.

use num_complex::Complex64;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::enums::ops::{ApplyFn, FoldFn, WhichFn};
use crate::enums::payload::Payload;
use crate::enums::value::Value;
use crate::kernels::apply::{apply_with_na, fold_with_na, which_with_na};
use crate::kernels::coalesce::coalesce_with_na;
use crate::kernels::group::groups_for_data;
use crate::kernels::resize::{adjust_to_bigger_with_na, adjust_to_lesser_with_na};
use crate::kernels::search::{cmp_eq, cmp_neq, find, find_all};
use crate::kernels::select::by_indices_with_na;
use crate::kernels::unique::is_unique_by_key;
use crate::structs::na_mask::NaMask;
use crate::structs::variants::complex::format_complex;
use crate::structs::variants::float::{format_float, DEFAULT_FLOAT_PRECISION};
use crate::structs::variants::na::NaPayload;

/// # AnyPayload
///
/// Heterogeneous backing store for one vector.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct AnyPayload {
    pub(crate) data: Vec<Value>,
    pub(crate) na: NaMask,
}

/// Hashable stand-in for a `Value`, used as a grouping and uniqueness key.
#[derive(PartialEq, Eq, Hash)]
enum ValueKey {
    Int(i64),
    Float(u64),
    Complex(u64, u64),
    Bool(bool),
    Str(String),
    Time(i128),
    Na,
}

fn value_key(v: &Value) -> ValueKey {
    match v {
        Value::Int(v) => ValueKey::Int(*v),
        Value::Float(v) => ValueKey::Float(v.to_bits()),
        Value::Complex(c) => ValueKey::Complex(c.re.to_bits(), c.im.to_bits()),
        Value::Bool(b) => ValueKey::Bool(*b),
        Value::Str(s) => ValueKey::Str(s.clone()),
        Value::Time(t) => ValueKey::Time(t.unix_timestamp_nanos()),
        Value::Na => ValueKey::Na,
    }
}

impl AnyPayload {
    /// Builds a generic payload. An NA mask whose length differs from the
    /// data degrades the result to the empty NA payload. Elements that are
    /// `Value::Na` are folded into the mask.
    pub fn new(data: Vec<Value>, na: Option<Vec<bool>>) -> Payload {
        match na {
            Some(na) if na.len() != data.len() => Payload::Na(NaPayload::new(0)),
            Some(na) => Payload::Any(Self::from_parts(data, na)),
            None => {
                let len = data.len();
                Payload::Any(Self::from_parts(data, vec![false; len]))
            }
        }
    }

    pub(crate) fn from_parts(mut data: Vec<Value>, mut na: Vec<bool>) -> Self {
        for (value, is_na) in data.iter_mut().zip(na.iter_mut()) {
            if value.is_na() {
                *is_na = true;
            }
            if *is_na {
                *value = Value::Na;
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
        let (data, na) = by_indices_with_na(indices, &self.data, self.na.as_slice(), Value::Na);
        Payload::Any(Self::from_parts(data, na))
    }

    /// Extracts a typed column, marking non-representable elements NA.
    fn extract<T>(
        &self,
        convert: impl Fn(&Value) -> Option<T>,
        na_value: T,
    ) -> (Vec<T>, Vec<bool>)
    where
        T: Clone,
    {
        let mut na = self.na.is_na();
        let data = self
            .data
            .iter()
            .zip(na.iter_mut())
            .map(|(v, is_na)| match convert(v) {
                Some(out) if !*is_na => out,
                _ => {
                    *is_na = true;
                    na_value.clone()
                }
            })
            .collect();
        (data, na)
    }

    pub(crate) fn integers(&self) -> (Vec<i64>, Vec<bool>) {
        self.extract(Value::as_integer, 0)
    }

    pub(crate) fn floats(&self) -> (Vec<f64>, Vec<bool>) {
        self.extract(Value::as_float, f64::NAN)
    }

    pub(crate) fn complexes(&self) -> (Vec<Complex64>, Vec<bool>) {
        self.extract(Value::as_complex, Complex64::new(f64::NAN, f64::NAN))
    }

    pub(crate) fn booleans(&self) -> (Vec<bool>, Vec<bool>) {
        self.extract(Value::as_boolean, false)
    }

    pub(crate) fn strings(&self) -> (Vec<String>, Vec<bool>) {
        self.extract(
            |v| {
                if v.is_na() {
                    None
                } else {
                    Some(render_value(v))
                }
            },
            String::new(),
        )
    }

    pub(crate) fn times(&self) -> (Vec<OffsetDateTime>, Vec<bool>) {
        self.extract(Value::as_time, OffsetDateTime::UNIX_EPOCH)
    }

    pub(crate) fn values(&self) -> (Vec<Value>, Vec<bool>) {
        (self.data.clone(), self.na.is_na())
    }

    pub(crate) fn which(&self, whicher: &WhichFn<'_, Value>) -> Vec<bool> {
        which_with_na(&self.data, self.na.as_slice(), whicher)
    }

    pub(crate) fn apply(&self, applier: &ApplyFn<'_, Value, Value>) -> Payload {
        let (data, na) = apply_with_na(&self.data, self.na.as_slice(), applier, Value::Na);
        Payload::Any(Self::from_parts(data, na))
    }

    pub(crate) fn summarize(&self, folder: FoldFn<'_, Value, Value>) -> Payload {
        let (value, is_na) =
            fold_with_na(&self.data, self.na.as_slice(), folder, Value::Na, Value::Na);
        Payload::Any(Self::from_parts(vec![value], vec![is_na]))
    }

    pub(crate) fn append(&self, other: &Payload) -> Payload {
        let (mut data, mut na) = self.values();
        let (other_data, other_na) = other.values();
        data.extend(other_data);
        na.extend(other_na);
        Payload::Any(Self::from_parts(data, na))
    }

    pub(crate) fn adjust(&self, size: usize) -> Payload {
        let (data, na) = if size < self.len() {
            adjust_to_lesser_with_na(&self.data, self.na.as_slice(), size)
        } else if size > self.len() {
            adjust_to_bigger_with_na(&self.data, self.na.as_slice(), size)
        } else {
            return Payload::Any(self.clone());
        };
        Payload::Any(Self::from_parts(data, na))
    }

    pub(crate) fn coalesce(&self, other: &Payload) -> Payload {
        let adjusted;
        let other = if other.len() != self.len() {
            adjusted = other.adjust(self.len());
            &adjusted
        } else {
            other
        };

        let (src_data, src_na) = other.values();
        let (data, na) = coalesce_with_na(&self.data, self.na.as_slice(), &src_data, &src_na);
        Payload::Any(Self::from_parts(data, na))
    }

    pub(crate) fn groups(&self) -> (Vec<Vec<usize>>, Vec<Value>) {
        groups_for_data(&self.data, self.na.as_slice(), value_key, Clone::clone)
    }

    pub(crate) fn str_for_elem(&self, idx: usize) -> String {
        if self.na.get(idx - 1) {
            "NA".to_string()
        } else {
            render_value(&self.data[idx - 1])
        }
    }

    fn needle(val: &Value) -> Option<Value> {
        if val.is_na() {
            None
        } else {
            Some(val.clone())
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
        is_unique_by_key(&self.data, self.na.as_slice(), value_key)
    }
}

/// Default rendering of a single value, matching what each typed payload
/// would print.
pub(crate) fn render_value(v: &Value) -> String {
    match v {
        Value::Int(v) => v.to_string(),
        Value::Float(v) => format_float(*v, DEFAULT_FLOAT_PRECISION),
        Value::Complex(c) => format_complex(*c, DEFAULT_FLOAT_PRECISION),
        Value::Bool(b) => b.to_string(),
        Value::Str(s) => s.clone(),
        Value::Time(t) => t.format(&Rfc3339).unwrap_or_default(),
        Value::Na => "NA".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(data: Vec<Value>, na: Option<Vec<bool>>) -> AnyPayload {
        match AnyPayload::new(data, na) {
            Payload::Any(p) => p,
            _ => panic!("expected any payload"),
        }
    }

    #[test]
    fn test_na_values_fold_into_mask() {
        let p = payload(vec![Value::Int(1), Value::Na, Value::Bool(true)], None);
        assert_eq!(p.na.is_na(), vec![false, true, false]);
    }

    #[test]
    fn test_integers_extracts_representable() {
        let p = payload(
            vec![
                Value::Int(7),
                Value::Float(2.0),
                Value::Float(2.5),
                Value::Bool(true),
                Value::Str("3".into()),
            ],
            None,
        );
        let (data, na) = p.integers();
        assert_eq!(data, vec![7, 2, 0, 1, 0]);
        assert_eq!(na, vec![false, false, true, false, true]);
    }

    #[test]
    fn test_strings_renders_each_variant() {
        let p = payload(
            vec![Value::Int(1), Value::Float(1.5), Value::Bool(false)],
            None,
        );
        assert_eq!(
            p.strings().0,
            vec!["1".to_string(), "1.500".to_string(), "false".to_string()]
        );
    }

    #[test]
    fn test_eq_is_structural() {
        let p = payload(vec![Value::Int(2), Value::Float(2.0)], None);
        assert_eq!(p.eq(&Value::Int(2)), vec![true, false]);
        assert_eq!(p.eq(&Value::Na), vec![false, false]);
    }

    #[test]
    fn test_groups_mixed_types() {
        let p = payload(
            vec![Value::Int(1), Value::Str("1".into()), Value::Int(1)],
            None,
        );
        let (groups, values) = p.groups();
        assert_eq!(groups, vec![vec![1, 3], vec![2]]);
        assert_eq!(values[0], Value::Int(1));
    }
}
