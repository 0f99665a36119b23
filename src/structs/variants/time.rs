//! # **TimePayload Module** - *Typed Timestamp Backing Store*
//!
//! Dense [`OffsetDateTime`] payload with a per-element NA mask and a
//! configurable rendering format (RFC 3339 by default).
//!
//! ## Overview
//! - Timestamps have a total order, so sorting, ranking and `min`/`max` are
//!   available; numeric conversions are not.
//! - NA slots hold the Unix epoch and must never be read as real values.

use time::format_description::well_known::Rfc3339;
use time::format_description::OwnedFormatItem;
use time::OffsetDateTime;

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

/// Rendering format for timestamps.
#[derive(Clone, Debug, Default)]
pub(crate) enum TimeFormat {
    #[default]
    Rfc3339,
    Custom(OwnedFormatItem),
}

/// # TimePayload
///
/// Timestamp backing store for one vector.
#[derive(Clone, Debug)]
pub struct TimePayload {
    pub(crate) data: Vec<OffsetDateTime>,
    pub(crate) na: NaMask,
    pub(crate) format: TimeFormat,
}

impl TimePayload {
    /// Builds a time payload. An NA mask whose length differs from the data
    /// degrades the result to the empty NA payload.
    pub fn new(data: Vec<OffsetDateTime>, na: Option<Vec<bool>>) -> Payload {
        match na {
            Some(na) if na.len() != data.len() => Payload::Na(NaPayload::new(0)),
            Some(na) => Payload::Time(Self::from_parts(data, na)),
            None => {
                let len = data.len();
                Payload::Time(Self::from_parts(data, vec![false; len]))
            }
        }
    }

    pub(crate) fn from_parts(mut data: Vec<OffsetDateTime>, na: Vec<bool>) -> Self {
        for (value, &is_na) in data.iter_mut().zip(&na) {
            if is_na {
                *value = OffsetDateTime::UNIX_EPOCH;
            }
        }
        Self {
            data,
            na: NaMask::from_flags(na),
            format: TimeFormat::default(),
        }
    }

    fn derived(&self, data: Vec<OffsetDateTime>, na: Vec<bool>) -> Payload {
        let mut out = Self::from_parts(data, na);
        out.format = self.format.clone();
        Payload::Time(out)
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

    pub(crate) fn with_format(&self, format: OwnedFormatItem) -> Payload {
        let mut out = self.clone();
        out.format = TimeFormat::Custom(format);
        Payload::Time(out)
    }

    pub(crate) fn by_indices(&self, indices: &[usize]) -> Payload {
        let (data, na) = by_indices_with_na(
            indices,
            &self.data,
            self.na.as_slice(),
            OffsetDateTime::UNIX_EPOCH,
        );
        self.derived(data, na)
    }

    pub(crate) fn times(&self) -> (Vec<OffsetDateTime>, Vec<bool>) {
        (self.data.clone(), self.na.is_na())
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
            .map(|(&v, &is_na)| if is_na { Value::Na } else { Value::Time(v) })
            .collect();
        (data, self.na.is_na())
    }

    pub(crate) fn which(&self, whicher: &WhichFn<'_, OffsetDateTime>) -> Vec<bool> {
        which_with_na(&self.data, self.na.as_slice(), whicher)
    }

    pub(crate) fn apply(&self, applier: &ApplyFn<'_, OffsetDateTime, OffsetDateTime>) -> Payload {
        let (data, na) = apply_with_na(
            &self.data,
            self.na.as_slice(),
            applier,
            OffsetDateTime::UNIX_EPOCH,
        );
        self.derived(data, na)
    }

    pub(crate) fn summarize(
        &self,
        folder: FoldFn<'_, OffsetDateTime, OffsetDateTime>,
    ) -> Payload {
        let (value, is_na) = fold_with_na(
            &self.data,
            self.na.as_slice(),
            folder,
            OffsetDateTime::UNIX_EPOCH,
            OffsetDateTime::UNIX_EPOCH,
        );
        self.derived(vec![value], vec![is_na])
    }

    pub(crate) fn append(&self, other: &Payload) -> Payload {
        let (mut data, mut na) = self.times();
        match other.times() {
            Some((other_data, other_na)) => {
                data.extend(other_data);
                na.extend(other_na);
            }
            None => {
                data.extend(std::iter::repeat(OffsetDateTime::UNIX_EPOCH).take(other.len()));
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
            return Payload::Time(self.clone());
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

        match other.times() {
            Some((src_data, src_na)) => {
                let (data, na) =
                    coalesce_with_na(&self.data, self.na.as_slice(), &src_data, &src_na);
                self.derived(data, na)
            }
            None => Payload::Time(self.clone()),
        }
    }

    pub(crate) fn groups(&self) -> (Vec<Vec<usize>>, Vec<Value>) {
        groups_for_data(
            &self.data,
            self.na.as_slice(),
            |v| v.unix_timestamp_nanos(),
            |v| Value::Time(*v),
        )
    }

    pub(crate) fn str_for_elem(&self, idx: usize) -> String {
        if self.na.get(idx - 1) {
            return "NA".to_string();
        }
        let value = &self.data[idx - 1];
        let rendered = match &self.format {
            TimeFormat::Rfc3339 => value.format(&Rfc3339),
            TimeFormat::Custom(items) => value.format(items),
        };
        rendered.unwrap_or_default()
    }

    fn needle(val: &Value) -> Option<OffsetDateTime> {
        match val {
            Value::Time(v) => Some(*v),
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
        is_unique_by_key(&self.data, self.na.as_slice(), |v| v.unix_timestamp_nanos())
    }

    pub(crate) fn min(&self) -> Payload {
        let (value, is_na) = min_with_na(
            &self.data,
            self.na.as_slice(),
            OffsetDateTime::UNIX_EPOCH,
            |a: &OffsetDateTime, b: &OffsetDateTime| a < b,
        );
        self.derived(vec![value], vec![is_na])
    }

    pub(crate) fn max(&self) -> Payload {
        let (value, is_na) = max_with_na(
            &self.data,
            self.na.as_slice(),
            OffsetDateTime::UNIX_EPOCH,
            |a: &OffsetDateTime, b: &OffsetDateTime| a < b,
        );
        self.derived(vec![value], vec![is_na])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn payload(data: Vec<OffsetDateTime>, na: Option<Vec<bool>>) -> TimePayload {
        match TimePayload::new(data, na) {
            Payload::Time(p) => p,
            _ => panic!("expected time payload"),
        }
    }

    #[test]
    fn test_str_for_elem_rfc3339() {
        let p = payload(
            vec![datetime!(2021-05-01 12:30:00 UTC), OffsetDateTime::UNIX_EPOCH],
            Some(vec![false, true]),
        );
        assert_eq!(p.str_for_elem(1), "2021-05-01T12:30:00Z");
        assert_eq!(p.str_for_elem(2), "NA");
    }

    #[test]
    fn test_custom_format() {
        let items = time::format_description::parse_owned::<2>("[year]-[month]-[day]")
            .expect("valid format");
        let p = payload(vec![datetime!(2021-05-01 12:30:00 UTC)], None);
        let formatted = p.with_format(items);
        assert_eq!(formatted.str_for_elem(1), "2021-05-01");
    }

    #[test]
    fn test_sorted_and_min_max() {
        let a = datetime!(2020-01-01 0:00 UTC);
        let b = datetime!(2021-01-01 0:00 UTC);
        let c = datetime!(2019-06-15 0:00 UTC);
        let p = payload(vec![a, b, c], None);
        assert_eq!(p.sorted_indices(), vec![3, 1, 2]);
        assert_eq!(p.min().times().unwrap().0, vec![c]);
        assert_eq!(p.max().times().unwrap().0, vec![b]);
    }

    #[test]
    fn test_find_requires_time_needle() {
        let a = datetime!(2020-01-01 0:00 UTC);
        let p = payload(vec![a], None);
        assert_eq!(p.find(&Value::Time(a)), 1);
        assert_eq!(p.find(&Value::Str("2020".into())), 0);
    }

    #[test]
    fn test_groups_trailing_na() {
        let a = datetime!(2020-01-01 0:00 UTC);
        let b = datetime!(2021-01-01 0:00 UTC);
        let p = payload(vec![a, b, a, b], Some(vec![false, false, false, true]));
        let (groups, values) = p.groups();
        assert_eq!(groups, vec![vec![1, 3], vec![2], vec![4]]);
        assert_eq!(values[2], Value::Na);
    }
}
