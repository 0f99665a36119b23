//! # **NaPayload Module** - *Typeless Missing-Value Store*
//!
//! A payload of a known length whose every element is NA. Produced by
//! `na_vector`, by failed constructions and by operations that cannot keep a
//! typed payload. It converts into any typed payload as all-NA data.

use num_complex::Complex64;
use time::OffsetDateTime;

use crate::enums::payload::Payload;
use crate::enums::value::Value;

/// # NaPayload
///
/// All-NA backing store of a fixed length.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct NaPayload {
    pub(crate) length: usize,
}

impl NaPayload {
    pub fn new(length: usize) -> Self {
        Self { length }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.length
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub(crate) fn by_indices(&self, indices: &[usize]) -> Payload {
        Payload::Na(Self::new(indices.len()))
    }

    pub(crate) fn integers(&self) -> (Vec<i64>, Vec<bool>) {
        (vec![0; self.length], vec![true; self.length])
    }

    pub(crate) fn floats(&self) -> (Vec<f64>, Vec<bool>) {
        (vec![f64::NAN; self.length], vec![true; self.length])
    }

    pub(crate) fn complexes(&self) -> (Vec<Complex64>, Vec<bool>) {
        (
            vec![Complex64::new(f64::NAN, f64::NAN); self.length],
            vec![true; self.length],
        )
    }

    pub(crate) fn booleans(&self) -> (Vec<bool>, Vec<bool>) {
        (vec![false; self.length], vec![true; self.length])
    }

    pub(crate) fn strings(&self) -> (Vec<String>, Vec<bool>) {
        (vec![String::new(); self.length], vec![true; self.length])
    }

    pub(crate) fn times(&self) -> (Vec<OffsetDateTime>, Vec<bool>) {
        (
            vec![OffsetDateTime::UNIX_EPOCH; self.length],
            vec![true; self.length],
        )
    }

    pub(crate) fn values(&self) -> (Vec<Value>, Vec<bool>) {
        (vec![Value::Na; self.length], vec![true; self.length])
    }

    pub(crate) fn append(&self, other: &Payload) -> Payload {
        Payload::Na(Self::new(self.length + other.len()))
    }

    pub(crate) fn adjust(&self, size: usize) -> Payload {
        Payload::Na(Self::new(size))
    }

    pub(crate) fn groups(&self) -> (Vec<Vec<usize>>, Vec<Value>) {
        if self.length == 0 {
            (Vec::new(), Vec::new())
        } else {
            ((vec![(1..=self.length).collect()]), vec![Value::Na])
        }
    }

    pub(crate) fn is_unique(&self) -> Vec<bool> {
        (0..self.length).map(|i| i == 0).collect()
    }
}
