//! # **VectorPayload Module** - *Nested Vector Backing Store*
//!
//! Payload whose elements are whole vectors, for list-column style data.
//! Missingness is carried directly by the element: `None` is the NA of this
//! payload, so no separate mask is kept.

use crate::enums::payload::Payload;
use crate::kernels::resize::{adjust_to_bigger_without_na, adjust_to_lesser_without_na};
use crate::kernels::select::by_indices_without_na;
use crate::structs::vector::Vector;

/// # VectorPayload
///
/// Nested-vector backing store for one vector.
#[derive(Clone, Default)]
pub struct VectorPayload {
    pub(crate) data: Vec<Option<Vector>>,
}

impl VectorPayload {
    pub fn new(data: Vec<Option<Vector>>) -> Payload {
        Payload::Vector(Self { data })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub(crate) fn is_na(&self) -> Vec<bool> {
        self.data.iter().map(Option::is_none).collect()
    }

    pub(crate) fn vectors(&self) -> Vec<Option<Vector>> {
        self.data.clone()
    }

    pub(crate) fn by_indices(&self, indices: &[usize]) -> Payload {
        let data = by_indices_without_na(indices, &self.data, None);
        Payload::Vector(Self { data })
    }

    pub(crate) fn append(&self, other: &Payload) -> Payload {
        let mut data = self.data.clone();
        match other {
            Payload::Vector(other) => data.extend(other.data.iter().cloned()),
            _ => data.extend(std::iter::repeat(None).take(other.len())),
        }
        Payload::Vector(Self { data })
    }

    pub(crate) fn adjust(&self, size: usize) -> Payload {
        let data = if size < self.len() {
            adjust_to_lesser_without_na(&self.data, size)
        } else if size > self.len() {
            adjust_to_bigger_without_na(&self.data, size)
        } else {
            self.data.clone()
        };
        Payload::Vector(Self { data })
    }

    pub(crate) fn coalesce(&self, other: &Payload) -> Payload {
        let adjusted;
        let other = if other.len() != self.len() {
            adjusted = other.adjust(self.len());
            &adjusted
        } else {
            other
        };

        match other {
            Payload::Vector(src) => {
                let data = self
                    .data
                    .iter()
                    .zip(&src.data)
                    .map(|(dst, src)| dst.clone().or_else(|| src.clone()))
                    .collect();
                Payload::Vector(Self { data })
            }
            _ => Payload::Vector(self.clone()),
        }
    }

    pub(crate) fn str_for_elem(&self, idx: usize) -> String {
        match &self.data[idx - 1] {
            Some(vec) => vec.to_string(),
            None => "NA".to_string(),
        }
    }
}
