//! # **Vector Module** - *Immutable Named Column*
//!
//! The user-facing handle over a [`Payload`]: a name, the typed backing
//! store and an optional group partition. Every operation returns a new
//! vector; nothing mutates in place.
//!
//! ## Indexing
//! All element positions are 1-based. Index `0` and out-of-range indices
//! select an NA element where an operation keeps them, and are dropped where
//! it does not (`by_indices` drops indices beyond the length but keeps `0`).
//!
//! ## Degradation
//! Failures degrade to values instead of erroring: malformed construction
//! yields a zero-length NA vector, unsupported operations yield NA results
//! of the appropriate shape.

use std::fmt::{self, Display, Formatter};

use num_complex::Complex64;
use time::OffsetDateTime;

use crate::enums::error::NavecError;
use crate::enums::ops::{Applier, Selector, Summarizer, Whicher};
use crate::enums::payload::{Payload, PayloadType};
use crate::enums::value::Value;
use crate::kernels::select::{indices_array, mask_to_indices};
use crate::structs::group_index::GroupIndex;
use crate::structs::variants::any::AnyPayload;
use crate::structs::variants::boolean::BooleanPayload;
use crate::structs::variants::complex::ComplexPayload;
use crate::structs::variants::float::FloatPayload;
use crate::structs::variants::integer::IntegerPayload;
use crate::structs::variants::na::NaPayload;
use crate::structs::variants::string::StringPayload;
use crate::structs::variants::time::TimePayload;
use crate::structs::variants::vector::VectorPayload;
use crate::traits::print::MAX_PREVIEW;

/// # Vector
///
/// An immutable named column over a typed payload.
#[derive(Clone, Default)]
pub struct Vector {
    name: String,
    payload: Payload,
    group_index: Option<GroupIndex>,
}

impl Vector {
    pub(crate) fn from_payload(payload: Payload) -> Self {
        Self {
            name: String::new(),
            payload,
            group_index: None,
        }
    }

    fn derived(&self, payload: Payload) -> Self {
        Self {
            name: self.name.clone(),
            payload,
            group_index: None,
        }
    }

    // Constructors

    pub fn integer(data: Vec<i64>) -> Self {
        Self::from_payload(IntegerPayload::new(data, None))
    }

    pub fn integer_with_na(data: Vec<i64>, na: Vec<bool>) -> Self {
        Self::from_payload(IntegerPayload::new(data, Some(na)))
    }

    pub fn float(data: Vec<f64>) -> Self {
        Self::from_payload(FloatPayload::new(data, None))
    }

    pub fn float_with_na(data: Vec<f64>, na: Vec<bool>) -> Self {
        Self::from_payload(FloatPayload::new(data, Some(na)))
    }

    pub fn complex(data: Vec<Complex64>) -> Self {
        Self::from_payload(ComplexPayload::new(data, None))
    }

    pub fn complex_with_na(data: Vec<Complex64>, na: Vec<bool>) -> Self {
        Self::from_payload(ComplexPayload::new(data, Some(na)))
    }

    pub fn boolean(data: Vec<bool>) -> Self {
        Self::from_payload(BooleanPayload::new(data, None))
    }

    pub fn boolean_with_na(data: Vec<bool>, na: Vec<bool>) -> Self {
        Self::from_payload(BooleanPayload::new(data, Some(na)))
    }

    pub fn string<S: Into<String>>(data: Vec<S>) -> Self {
        let data = data.into_iter().map(Into::into).collect();
        Self::from_payload(StringPayload::new(data, None))
    }

    pub fn string_with_na<S: Into<String>>(data: Vec<S>, na: Vec<bool>) -> Self {
        let data = data.into_iter().map(Into::into).collect();
        Self::from_payload(StringPayload::new(data, Some(na)))
    }

    pub fn time(data: Vec<OffsetDateTime>) -> Self {
        Self::from_payload(TimePayload::new(data, None))
    }

    pub fn time_with_na(data: Vec<OffsetDateTime>, na: Vec<bool>) -> Self {
        Self::from_payload(TimePayload::new(data, Some(na)))
    }

    pub fn any(data: Vec<Value>) -> Self {
        Self::from_payload(AnyPayload::new(data, None))
    }

    pub fn any_with_na(data: Vec<Value>, na: Vec<bool>) -> Self {
        Self::from_payload(AnyPayload::new(data, Some(na)))
    }

    fn check_na_len(data_len: usize, na_len: usize) -> Result<(), NavecError> {
        if data_len == na_len {
            Ok(())
        } else {
            Err(NavecError::NaLengthMismatch { data_len, na_len })
        }
    }

    /// Strict variant of [`Vector::integer_with_na`]: a mask length mismatch
    /// is an error instead of a silent degradation.
    pub fn try_integer_with_na(data: Vec<i64>, na: Vec<bool>) -> Result<Self, NavecError> {
        Self::check_na_len(data.len(), na.len())?;
        Ok(Self::integer_with_na(data, na))
    }

    /// Strict variant of [`Vector::float_with_na`].
    pub fn try_float_with_na(data: Vec<f64>, na: Vec<bool>) -> Result<Self, NavecError> {
        Self::check_na_len(data.len(), na.len())?;
        Ok(Self::float_with_na(data, na))
    }

    /// Strict variant of [`Vector::complex_with_na`].
    pub fn try_complex_with_na(
        data: Vec<Complex64>,
        na: Vec<bool>,
    ) -> Result<Self, NavecError> {
        Self::check_na_len(data.len(), na.len())?;
        Ok(Self::complex_with_na(data, na))
    }

    /// Strict variant of [`Vector::boolean_with_na`].
    pub fn try_boolean_with_na(data: Vec<bool>, na: Vec<bool>) -> Result<Self, NavecError> {
        Self::check_na_len(data.len(), na.len())?;
        Ok(Self::boolean_with_na(data, na))
    }

    /// Strict variant of [`Vector::string_with_na`].
    pub fn try_string_with_na<S: Into<String>>(
        data: Vec<S>,
        na: Vec<bool>,
    ) -> Result<Self, NavecError> {
        Self::check_na_len(data.len(), na.len())?;
        Ok(Self::string_with_na(data, na))
    }

    /// Strict variant of [`Vector::time_with_na`].
    pub fn try_time_with_na(
        data: Vec<OffsetDateTime>,
        na: Vec<bool>,
    ) -> Result<Self, NavecError> {
        Self::check_na_len(data.len(), na.len())?;
        Ok(Self::time_with_na(data, na))
    }

    /// A list-column of nested vectors; `None` elements are NA.
    pub fn vector_of(data: Vec<Option<Vector>>) -> Self {
        Self::from_payload(VectorPayload::new(data))
    }

    /// A typeless all-NA vector of the given length.
    pub fn na_vector(length: usize) -> Self {
        Self::from_payload(Payload::Na(NaPayload::new(length)))
    }

    /// Append-concatenation of several vectors into one, in order. The
    /// first vector's type wins. An empty slice yields an empty NA vector.
    pub fn combine(vectors: &[Vector]) -> Self {
        let mut iter = vectors.iter();
        let first = match iter.next() {
            Some(v) => v.clone(),
            None => return Self::na_vector(0),
        };
        iter.fold(first, |acc, v| acc.append(v))
    }

    // Builder options

    pub fn named<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    /// Decimal places used when rendering float and complex elements.
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.payload = self.payload.with_precision(precision);
        self
    }

    /// Rendering format for time elements, as a `time` crate format
    /// description such as `"[year]-[month]-[day]"`.
    pub fn with_time_format(mut self, format: &str) -> Result<Self, NavecError> {
        let items = time::format_description::parse_owned::<2>(format).map_err(|e| {
            NavecError::TimeFormatError {
                format: format.to_string(),
                message: e.to_string(),
            }
        })?;
        self.payload = self.payload.with_time_format(items);
        Ok(self)
    }

    // Accessors

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name<S: Into<String>>(&mut self, name: S) {
        self.name = name.into();
    }

    pub fn type_tag(&self) -> PayloadType {
        self.payload.type_tag()
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    // Selection

    /// Gathers elements by 1-based indices. Indices beyond the length are
    /// dropped; index `0` is kept and yields an NA element.
    pub fn by_indices(&self, indices: &[usize]) -> Vector {
        let selected: Vec<usize> = indices
            .iter()
            .copied()
            .filter(|&idx| idx <= self.len())
            .collect();
        self.derived(self.payload.by_indices(&selected))
    }

    /// Selects a 1-based range with R-like conventions: `from > to` walks
    /// backwards, non-positive bounds exclude the range instead of keeping
    /// it, and mixed signs select nothing.
    pub fn from_to(&self, from: i64, to: i64) -> Vector {
        self.by_indices(&self.from_to_indices(from, to))
    }

    fn from_to_indices(&self, from: i64, to: i64) -> Vec<usize> {
        if (from < 0 && to > 0) || (from > 0 && to < 0) {
            return Vec::new();
        }

        if from == 0 && to == 0 {
            Vec::new()
        } else if from > 0 && from > to {
            self.range_reverse(to, from)
        } else if from <= 0 && to <= 0 {
            let (mut from, mut to) = (from.saturating_neg(), to.saturating_neg());
            if from > to {
                std::mem::swap(&mut from, &mut to);
            }
            self.range_excluding(from, to)
        } else {
            self.range_regular(from, to)
        }
    }

    fn normalize_range(&self, from: i64, to: i64) -> (usize, usize) {
        let to = to.min(self.len() as i64);
        let from = from.max(1);
        (from as usize, to.max(0) as usize)
    }

    fn range_regular(&self, from: i64, to: i64) -> Vec<usize> {
        let (from, to) = self.normalize_range(from, to);
        (from..=to).collect()
    }

    fn range_reverse(&self, from: i64, to: i64) -> Vec<usize> {
        let (from, to) = self.normalize_range(from, to);
        (from..=to).rev().collect()
    }

    fn range_excluding(&self, from: i64, to: i64) -> Vec<usize> {
        let (from, to) = self.normalize_range(from, to);
        (1..from)
            .chain(to + 1..=self.len())
            .collect()
    }

    /// Uniform selection: a single index, an index list, a boolean mask or
    /// a typed predicate. A predicate the payload does not support selects
    /// an empty NA vector.
    pub fn filter<'a, S: Into<Selector<'a>>>(&self, selector: S) -> Vector {
        match selector.into() {
            Selector::Index(idx) => self.by_indices(&[idx]),
            Selector::Indices(indices) => self.by_indices(indices),
            Selector::Mask(mask) => self.by_indices(&mask_to_indices(self.len(), mask)),
            Selector::Which(whicher) => {
                if self.supports_whicher(&whicher) {
                    let mask = self.which(&whicher);
                    self.by_indices(&mask_to_indices(self.len(), &mask))
                } else {
                    Vector::na_vector(0)
                }
            }
        }
    }

    pub fn supports_whicher(&self, whicher: &Whicher<'_>) -> bool {
        self.payload.supports_whicher(whicher)
    }

    /// Runs a typed predicate over the elements; a predicate of the wrong
    /// type selects nothing.
    pub fn which(&self, whicher: &Whicher<'_>) -> Vec<bool> {
        self.payload.which(whicher)
    }

    pub fn supports_applier(&self, applier: &Applier<'_>) -> bool {
        self.payload.supports_applier(applier)
    }

    /// Transforms each element; a transform of the wrong type degrades to
    /// an all-NA vector of the same length.
    pub fn apply(&self, applier: &Applier<'_>) -> Vector {
        self.derived(self.payload.apply(applier))
    }

    /// Left-folds the elements to a single-element vector; NA at any step
    /// short-circuits to NA.
    pub fn summarize(&self, summarizer: &Summarizer<'_>) -> Vector {
        self.derived(self.payload.summarize(summarizer))
    }

    /// Concatenates another vector, converting it into this vector's type.
    pub fn append(&self, other: &Vector) -> Vector {
        self.derived(self.payload.append(&other.payload))
    }

    /// Resizes to exactly `size` elements, truncating or recycling.
    pub fn adjust(&self, size: usize) -> Vector {
        self.derived(self.payload.adjust(size))
    }

    /// Fills NA elements from the given vectors, left to right. The chain
    /// stops early if an intermediate payload cannot coalesce.
    pub fn coalesce(&self, others: &[Vector]) -> Vector {
        let mut payload = self.payload.clone();
        for other in others {
            match payload.coalesce(&other.payload) {
                Some(next) => payload = next,
                None => break,
            }
        }
        self.derived(payload)
    }

    // Grouping

    /// Partitions positions into equal-value groups in first-occurrence
    /// order, NA group last. Ungroupable types form one group with an NA
    /// representative.
    pub fn groups(&self) -> (Vec<Vec<usize>>, Vec<Value>) {
        match self.payload.groups() {
            Some(groups) => groups,
            None => (vec![indices_array(self.len())], vec![Value::Na]),
        }
    }

    /// Attaches a precomputed group partition. An empty partition leaves
    /// the vector ungrouped.
    pub fn group_by_indices(&self, groups: GroupIndex) -> Vector {
        if groups.is_empty() {
            return self.clone();
        }
        let mut out = self.clone();
        out.group_index = Some(groups);
        out
    }

    pub fn is_grouped(&self) -> bool {
        self.group_index.is_some()
    }

    pub fn group_index(&self) -> Option<&GroupIndex> {
        self.group_index.as_ref()
    }

    /// One sub-vector per group; empty when ungrouped.
    pub fn group_vectors(&self) -> Vec<Vector> {
        match &self.group_index {
            Some(index) => index
                .groups()
                .iter()
                .map(|indices| self.by_indices(indices))
                .collect(),
            None => Vec::new(),
        }
    }

    /// The first position of each group; `[1]` for an ungrouped vector.
    pub fn group_first_elements(&self) -> Vec<usize> {
        match &self.group_index {
            Some(index) if self.len() > 0 => index.first_elements(),
            Some(_) => Vec::new(),
            None => vec![1],
        }
    }

    pub fn ungroup(&self) -> Vector {
        let mut out = self.clone();
        out.group_index = None;
        out
    }

    // NA views

    pub fn is_na(&self) -> Vec<bool> {
        self.payload.is_na()
    }

    pub fn not_na(&self) -> Vec<bool> {
        self.payload.is_na().iter().map(|&b| !b).collect()
    }

    pub fn has_na(&self) -> bool {
        self.payload.is_na().iter().any(|&b| b)
    }

    /// 1-based positions of the NA elements.
    pub fn with_na(&self) -> Vec<usize> {
        mask_to_indices(self.len(), &self.payload.is_na())
    }

    /// 1-based positions of the non-NA elements.
    pub fn without_na(&self) -> Vec<usize> {
        mask_to_indices(self.len(), &self.not_na())
    }

    // Conversions

    pub fn integers(&self) -> Option<(Vec<i64>, Vec<bool>)> {
        self.payload.integers()
    }

    pub fn floats(&self) -> Option<(Vec<f64>, Vec<bool>)> {
        self.payload.floats()
    }

    pub fn complexes(&self) -> Option<(Vec<Complex64>, Vec<bool>)> {
        self.payload.complexes()
    }

    pub fn booleans(&self) -> Option<(Vec<bool>, Vec<bool>)> {
        self.payload.booleans()
    }

    pub fn strings(&self) -> Option<(Vec<String>, Vec<bool>)> {
        self.payload.strings()
    }

    pub fn times(&self) -> Option<(Vec<OffsetDateTime>, Vec<bool>)> {
        self.payload.times()
    }

    pub fn values(&self) -> (Vec<Value>, Vec<bool>) {
        self.payload.values()
    }

    /// Integer vector with the same name; all-NA when the type does not
    /// convert.
    pub fn as_integer(&self) -> Vector {
        match self.payload.integers() {
            Some((data, na)) => self.derived(IntegerPayload::new(data, Some(na))),
            None => Vector::na_vector(self.len()).named(self.name.clone()),
        }
    }

    pub fn as_float(&self) -> Vector {
        match self.payload.floats() {
            Some((data, na)) => self.derived(FloatPayload::new(data, Some(na))),
            None => Vector::na_vector(self.len()).named(self.name.clone()),
        }
    }

    pub fn as_complex(&self) -> Vector {
        match self.payload.complexes() {
            Some((data, na)) => self.derived(ComplexPayload::new(data, Some(na))),
            None => Vector::na_vector(self.len()).named(self.name.clone()),
        }
    }

    pub fn as_boolean(&self) -> Vector {
        match self.payload.booleans() {
            Some((data, na)) => self.derived(BooleanPayload::new(data, Some(na))),
            None => Vector::na_vector(self.len()).named(self.name.clone()),
        }
    }

    pub fn as_string(&self) -> Vector {
        match self.payload.strings() {
            Some((data, na)) => self.derived(StringPayload::new(data, Some(na))),
            None => Vector::na_vector(self.len()).named(self.name.clone()),
        }
    }

    pub fn as_time(&self) -> Vector {
        match self.payload.times() {
            Some((data, na)) => self.derived(TimePayload::new(data, Some(na))),
            None => Vector::na_vector(self.len()).named(self.name.clone()),
        }
    }

    pub fn as_any(&self) -> Vector {
        let (data, na) = self.payload.values();
        self.derived(AnyPayload::new(data, Some(na)))
    }

    // Search and comparison

    /// 1-based position of the first match, `0` when absent.
    pub fn find<V: Into<Value>>(&self, needle: V) -> usize {
        self.payload.find(&needle.into())
    }

    /// 1-based positions of all matches.
    pub fn find_all<V: Into<Value>>(&self, needle: V) -> Vec<usize> {
        self.payload.find_all(&needle.into())
    }

    pub fn has<V: Into<Value>>(&self, needle: V) -> bool {
        self.find(needle) > 0
    }

    pub fn eq<V: Into<Value>>(&self, val: V) -> Vec<bool> {
        self.payload.eq(&val.into())
    }

    pub fn neq<V: Into<Value>>(&self, val: V) -> Vec<bool> {
        self.payload.neq(&val.into())
    }

    pub fn gt<V: Into<Value>>(&self, val: V) -> Vec<bool> {
        self.payload.gt(&val.into())
    }

    pub fn lt<V: Into<Value>>(&self, val: V) -> Vec<bool> {
        self.payload.lt(&val.into())
    }

    pub fn gte<V: Into<Value>>(&self, val: V) -> Vec<bool> {
        self.payload.gte(&val.into())
    }

    pub fn lte<V: Into<Value>>(&self, val: V) -> Vec<bool> {
        self.payload.lte(&val.into())
    }

    // Ordering and uniqueness

    /// Stable ascending order as 1-based indices, NA last.
    pub fn sorted_indices(&self) -> Vec<usize> {
        self.payload.sorted_indices()
    }

    /// Sorted order plus dense ranks aligned to original positions; all NA
    /// elements share the final rank.
    pub fn sorted_indices_with_ranks(&self) -> (Vec<usize>, Vec<usize>) {
        self.payload.sorted_indices_with_ranks()
    }

    /// Keeps the first occurrence of each element.
    pub fn unique(&self) -> Vector {
        let mask = self.payload.is_unique();
        self.filter(&mask)
    }

    pub fn is_unique(&self) -> Vec<bool> {
        self.payload.is_unique()
    }

    // Statistics; grouped vectors aggregate per group and re-combine.

    pub fn sum(&self) -> Vector {
        self.grouped_stat(|p| p.sum(), 1)
    }

    pub fn prod(&self) -> Vector {
        self.grouped_stat(|p| p.prod(), 1)
    }

    pub fn mean(&self) -> Vector {
        self.grouped_stat(|p| p.mean(), 1)
    }

    pub fn min(&self) -> Vector {
        self.grouped_stat(|p| p.min(), 1)
    }

    pub fn max(&self) -> Vector {
        self.grouped_stat(|p| p.max(), 1)
    }

    pub fn cum_sum(&self) -> Vector {
        self.grouped_stat(|p| p.cum_sum(), self.len())
    }

    fn grouped_stat(
        &self,
        stat: impl Fn(&Payload) -> Option<Payload> + Copy,
        na_len: usize,
    ) -> Vector {
        if self.is_grouped() {
            let parts: Vec<Vector> = self
                .group_vectors()
                .iter()
                .map(|v| v.grouped_stat(stat, na_len))
                .collect();
            return Vector::combine(&parts).named(self.name.clone());
        }

        match stat(&self.payload) {
            Some(payload) => self.derived(payload),
            None => Vector::na_vector(na_len).named(self.name.clone()),
        }
    }

    /// Rendering of the element at a 1-based index.
    pub fn str_for_elem(&self, idx: usize) -> String {
        self.payload.str_for_elem(idx)
    }
}

impl Display for Vector {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        let shown = self.len().min(MAX_PREVIEW);
        for idx in 1..=shown {
            if idx > 1 {
                write!(f, ", ")?;
            }
            write!(f, "{}", self.payload.str_for_elem(idx))?;
        }
        if self.len() > MAX_PREVIEW {
            write!(f, ", ...")?;
        }
        write!(f, "]")
    }
}

impl fmt::Debug for Vector {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vector")
            .field("name", &self.name)
            .field("type", &self.type_tag())
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::ops::ApplyFn;

    #[test]
    fn test_by_indices_drops_out_of_range_keeps_zero() {
        let v = Vector::integer(vec![10, 20, 30]);
        let out = v.by_indices(&[2, 0, 9, 3]);
        assert_eq!(out.len(), 3);
        assert_eq!(out.str_for_elem(1), "20");
        assert_eq!(out.str_for_elem(2), "NA");
        assert_eq!(out.str_for_elem(3), "30");
    }

    #[test]
    fn test_from_to_variants() {
        let v = Vector::integer(vec![1, 2, 3, 4, 5]);
        assert_eq!(v.from_to(2, 4).integers().unwrap().0, vec![2, 3, 4]);
        assert_eq!(v.from_to(4, 2).integers().unwrap().0, vec![4, 3, 2]);
        assert_eq!(v.from_to(-2, -4).integers().unwrap().0, vec![1, 5]);
        assert_eq!(v.from_to(-4, -2).integers().unwrap().0, vec![1, 5]);
        assert!(v.from_to(-2, 4).is_empty());
        assert!(v.from_to(0, 0).is_empty());
        assert_eq!(v.from_to(3, 99).integers().unwrap().0, vec![3, 4, 5]);
    }

    #[test]
    fn test_from_to_extreme_bounds() {
        let v = Vector::integer(vec![1, 2, 3, 4, 5]);
        assert!(v.from_to(i64::MAX, -1).is_empty());
        assert!(v.from_to(-1, i64::MAX).is_empty());
        assert_eq!(v.from_to(1, i64::MAX).integers().unwrap().0, vec![1, 2, 3, 4, 5]);
        assert_eq!(v.from_to(i64::MIN, -3).integers().unwrap().0, vec![1, 2]);
    }

    #[test]
    fn test_adjust_empty_grows_all_na() {
        let grown = Vector::integer(vec![]).adjust(3);
        assert_eq!(grown.len(), 3);
        assert_eq!(grown.is_na(), vec![true, true, true]);
        assert!(Vector::string(Vec::<String>::new()).adjust(0).is_empty());
    }

    #[test]
    fn test_str_for_elem_out_of_range_is_na() {
        let v = Vector::integer(vec![7, 8]);
        assert_eq!(v.str_for_elem(0), "NA");
        assert_eq!(v.str_for_elem(1), "7");
        assert_eq!(v.str_for_elem(3), "NA");
    }

    #[test]
    fn test_filter_selector_shapes() {
        let v = Vector::integer(vec![10, 20, 30, 40]);
        assert_eq!(v.filter(2).integers().unwrap().0, vec![20]);

        let indices = vec![1, 3];
        assert_eq!(v.filter(&indices).integers().unwrap().0, vec![10, 30]);

        let mask = vec![true, false, false, true];
        assert_eq!(v.filter(&mask).integers().unwrap().0, vec![10, 40]);

        let whicher = Whicher::int(&|val: &i64, _| *val > 15);
        assert_eq!(v.filter(whicher).integers().unwrap().0, vec![20, 30, 40]);
    }

    #[test]
    fn test_filter_unsupported_whicher_is_empty_na() {
        let v = Vector::integer(vec![1, 2]);
        let whicher = Whicher::str(&|_: &str, _| true);
        let out = v.filter(whicher);
        assert_eq!(out.len(), 0);
        assert_eq!(out.type_tag(), PayloadType::Na);
    }

    #[test]
    fn test_named_and_derived_keep_name() {
        let v = Vector::integer(vec![1, 2, 3]).named("counts");
        assert_eq!(v.name(), "counts");
        assert_eq!(v.adjust(5).name(), "counts");
        assert_eq!(v.as_float().name(), "counts");
    }

    #[test]
    fn test_apply_indexed() {
        let v = Vector::integer(vec![10, 20, 30]);
        let applier = Applier::int_indexed(&|idx, val: &i64, na| (val + idx as i64, na));
        assert_eq!(v.apply(&applier).integers().unwrap().0, vec![11, 22, 33]);
    }

    #[test]
    fn test_summarize_short_circuits_on_na() {
        let v = Vector::integer_with_na(vec![1, 2, 3], vec![false, true, false]);
        let summarizer = Summarizer::Integer(&|_, acc, val, na| (acc + val, na));
        let out = v.summarize(&summarizer);
        assert_eq!(out.len(), 1);
        assert_eq!(out.is_na(), vec![true]);
    }

    #[test]
    fn test_append_converts_other() {
        let v = Vector::integer(vec![1, 2]);
        let out = v.append(&Vector::string(vec!["3", "x"]));
        let (data, na) = out.integers().unwrap();
        assert_eq!(data, vec![1, 2, 3, 0]);
        assert_eq!(na, vec![false, false, false, false]);
    }

    #[test]
    fn test_coalesce_fills_left_to_right() {
        let v = Vector::integer_with_na(vec![1, 0, 0], vec![false, true, true]);
        let first = Vector::integer_with_na(vec![0, 5, 0], vec![true, false, true]);
        let second = Vector::integer(vec![9, 9, 9]);
        let out = v.coalesce(&[first, second]);
        assert_eq!(out.integers().unwrap().0, vec![1, 5, 9]);
        assert_eq!(out.is_na(), vec![false, false, false]);
    }

    #[test]
    fn test_coalesce_chain_aborts_on_typeless_receiver() {
        let v = Vector::na_vector(2);
        let out = v.coalesce(&[Vector::integer(vec![7, 8])]);
        assert_eq!(out.type_tag(), PayloadType::Na);
        assert_eq!(out.is_na(), vec![true, true]);
    }

    #[test]
    fn test_grouped_sum_recombines_in_group_order() {
        let values = Vector::integer(vec![10, 20, 30, 100, 200, 300]);
        let groups = GroupIndex::new(vec![vec![1, 4], vec![2, 5], vec![3, 6]]);
        let grouped = values.group_by_indices(groups);
        assert!(grouped.is_grouped());
        assert_eq!(grouped.sum().integers().unwrap().0, vec![110, 220, 330]);
    }

    #[test]
    fn test_unique() {
        let v = Vector::integer_with_na(vec![1, 2, 1, 3, 2], vec![false, false, false, true, false]);
        let (data, na) = v.unique().integers().unwrap();
        assert_eq!(data, vec![1, 2, 0]);
        assert_eq!(na, vec![false, false, true]);
    }

    #[test]
    fn test_display_preview_cap() {
        let v = Vector::integer((1..=12).collect());
        assert_eq!(
            v.to_string(),
            "[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, ...]"
        );
        assert_eq!(Vector::integer(vec![1, 2]).to_string(), "[1, 2]");
    }

    #[test]
    fn test_with_time_format_rejects_garbage() {
        let v = Vector::time(vec![OffsetDateTime::UNIX_EPOCH]);
        assert!(v.with_time_format("[not-a-thing]").is_err());
    }

    #[test]
    fn test_not_na_views() {
        let v = Vector::integer_with_na(vec![1, 2, 3], vec![false, true, false]);
        assert!(v.has_na());
        assert_eq!(v.with_na(), vec![2]);
        assert_eq!(v.without_na(), vec![1, 3]);
    }

    #[test]
    fn test_as_integer_from_unconvertible_is_all_na() {
        let v = Vector::time(vec![OffsetDateTime::UNIX_EPOCH]).named("ts");
        let out = v.as_integer();
        assert_eq!(out.type_tag(), PayloadType::Na);
        assert_eq!(out.len(), 1);
        assert_eq!(out.name(), "ts");
    }

    #[test]
    fn test_apply_na_result_forces_placeholder() {
        let v = Vector::integer(vec![1, 2, 3]);
        let applier = Applier::Integer(ApplyFn::Elem(&|val: &i64, _| (*val, *val == 2)));
        let out = v.apply(&applier);
        assert_eq!(out.integers().unwrap().0, vec![1, 0, 3]);
        assert_eq!(out.is_na(), vec![false, true, false]);
    }
}
