//! # **Payload Module** - *Unified Columnar Storage Enum*
//!
//! Central dispatch enum over the typed backing stores. Everything the
//! vector facade does funnels through here, so capability checks stay in one
//! place: an operation a payload type cannot carry degrades to a harmless
//! value (empty result, all-NA payload, identity ordering) instead of
//! erroring.
//!
//! ## Variants
//! - `Integer`, `Float`, `Complex`, `Boolean`, `String`, `Time`: the native
//!   typed stores.
//! - `Any`: heterogeneous store of tagged values.
//! - `Vector`: nested list-column store.
//! - `Na`: typeless all-NA store of a known length.

use std::fmt::{self, Display, Formatter};

use num_complex::Complex64;
use time::format_description::OwnedFormatItem;
use time::OffsetDateTime;

use crate::enums::ops::{Applier, Summarizer, Whicher};
use crate::enums::value::Value;
use crate::kernels::select::indices_array;
use crate::structs::variants::any::AnyPayload;
use crate::structs::variants::boolean::BooleanPayload;
use crate::structs::variants::complex::ComplexPayload;
use crate::structs::variants::float::FloatPayload;
use crate::structs::variants::integer::IntegerPayload;
use crate::structs::variants::na::NaPayload;
use crate::structs::variants::string::StringPayload;
use crate::structs::variants::time::TimePayload;
use crate::structs::variants::vector::VectorPayload;

/// Tag identifying a payload's logical type.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PayloadType {
    Integer,
    Float,
    Complex,
    Boolean,
    String,
    Time,
    Any,
    Vector,
    Na,
}

impl Display for PayloadType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            PayloadType::Integer => "integer",
            PayloadType::Float => "float",
            PayloadType::Complex => "complex",
            PayloadType::Boolean => "boolean",
            PayloadType::String => "string",
            PayloadType::Time => "time",
            PayloadType::Any => "any",
            PayloadType::Vector => "vector",
            PayloadType::Na => "na",
        };
        write!(f, "{name}")
    }
}

/// # Payload
///
/// The typed backing store of one vector.
#[derive(Clone)]
pub enum Payload {
    Integer(IntegerPayload),
    Float(FloatPayload),
    Complex(ComplexPayload),
    Boolean(BooleanPayload),
    String(StringPayload),
    Time(TimePayload),
    Any(AnyPayload),
    Vector(VectorPayload),
    Na(NaPayload),
}

impl Default for Payload {
    fn default() -> Self {
        Payload::Na(NaPayload::new(0))
    }
}

impl Payload {
    /// Logical type tag of this payload.
    pub fn type_tag(&self) -> PayloadType {
        match self {
            Payload::Integer(_) => PayloadType::Integer,
            Payload::Float(_) => PayloadType::Float,
            Payload::Complex(_) => PayloadType::Complex,
            Payload::Boolean(_) => PayloadType::Boolean,
            Payload::String(_) => PayloadType::String,
            Payload::Time(_) => PayloadType::Time,
            Payload::Any(_) => PayloadType::Any,
            Payload::Vector(_) => PayloadType::Vector,
            Payload::Na(_) => PayloadType::Na,
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        match self {
            Payload::Integer(p) => p.len(),
            Payload::Float(p) => p.len(),
            Payload::Complex(p) => p.len(),
            Payload::Boolean(p) => p.len(),
            Payload::String(p) => p.len(),
            Payload::Time(p) => p.len(),
            Payload::Any(p) => p.len(),
            Payload::Vector(p) => p.len(),
            Payload::Na(p) => p.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Per-element NA flags.
    pub fn is_na(&self) -> Vec<bool> {
        match self {
            Payload::Integer(p) => p.na_mask().is_na(),
            Payload::Float(p) => p.na_mask().is_na(),
            Payload::Complex(p) => p.na_mask().is_na(),
            Payload::Boolean(p) => p.na_mask().is_na(),
            Payload::String(p) => p.na_mask().is_na(),
            Payload::Time(p) => p.na_mask().is_na(),
            Payload::Any(p) => p.na_mask().is_na(),
            Payload::Vector(p) => p.is_na(),
            Payload::Na(p) => vec![true; p.len()],
        }
    }

    /// Gathers elements by 1-based indices. Index `0` and out-of-range
    /// indices produce NA elements.
    pub fn by_indices(&self, indices: &[usize]) -> Payload {
        match self {
            Payload::Integer(p) => p.by_indices(indices),
            Payload::Float(p) => p.by_indices(indices),
            Payload::Complex(p) => p.by_indices(indices),
            Payload::Boolean(p) => p.by_indices(indices),
            Payload::String(p) => p.by_indices(indices),
            Payload::Time(p) => p.by_indices(indices),
            Payload::Any(p) => p.by_indices(indices),
            Payload::Vector(p) => p.by_indices(indices),
            Payload::Na(p) => p.by_indices(indices),
        }
    }

    /// Integer view of the payload, when the type converts.
    pub fn integers(&self) -> Option<(Vec<i64>, Vec<bool>)> {
        match self {
            Payload::Integer(p) => Some(p.integers()),
            Payload::Float(p) => Some(p.integers()),
            Payload::Complex(p) => Some(p.integers()),
            Payload::Boolean(p) => Some(p.integers()),
            Payload::String(p) => Some(p.integers()),
            Payload::Any(p) => Some(p.integers()),
            Payload::Na(p) => Some(p.integers()),
            Payload::Time(_) | Payload::Vector(_) => None,
        }
    }

    /// Float view of the payload, when the type converts.
    pub fn floats(&self) -> Option<(Vec<f64>, Vec<bool>)> {
        match self {
            Payload::Integer(p) => Some(p.floats()),
            Payload::Float(p) => Some(p.floats()),
            Payload::Complex(p) => Some(p.floats()),
            Payload::Boolean(p) => Some(p.floats()),
            Payload::String(p) => Some(p.floats()),
            Payload::Any(p) => Some(p.floats()),
            Payload::Na(p) => Some(p.floats()),
            Payload::Time(_) | Payload::Vector(_) => None,
        }
    }

    /// Complex view of the payload, when the type converts.
    pub fn complexes(&self) -> Option<(Vec<Complex64>, Vec<bool>)> {
        match self {
            Payload::Integer(p) => Some(p.complexes()),
            Payload::Float(p) => Some(p.complexes()),
            Payload::Complex(p) => Some(p.complexes()),
            Payload::Boolean(p) => Some(p.complexes()),
            Payload::String(p) => Some(p.complexes()),
            Payload::Any(p) => Some(p.complexes()),
            Payload::Na(p) => Some(p.complexes()),
            Payload::Time(_) | Payload::Vector(_) => None,
        }
    }

    /// Boolean view of the payload, when the type converts.
    pub fn booleans(&self) -> Option<(Vec<bool>, Vec<bool>)> {
        match self {
            Payload::Integer(p) => Some(p.booleans()),
            Payload::Float(p) => Some(p.booleans()),
            Payload::Complex(p) => Some(p.booleans()),
            Payload::Boolean(p) => Some(p.booleans()),
            Payload::String(p) => Some(p.booleans()),
            Payload::Any(p) => Some(p.booleans()),
            Payload::Na(p) => Some(p.booleans()),
            Payload::Time(_) | Payload::Vector(_) => None,
        }
    }

    /// String view of the payload, when the type converts.
    pub fn strings(&self) -> Option<(Vec<String>, Vec<bool>)> {
        match self {
            Payload::Integer(p) => Some(p.strings()),
            Payload::Float(p) => Some(p.strings()),
            Payload::Complex(p) => Some(p.strings()),
            Payload::Boolean(p) => Some(p.strings()),
            Payload::String(p) => Some(p.strings()),
            Payload::Time(p) => Some(p.strings()),
            Payload::Any(p) => Some(p.strings()),
            Payload::Na(p) => Some(p.strings()),
            Payload::Vector(_) => None,
        }
    }

    /// Timestamp view of the payload, when the type converts.
    pub fn times(&self) -> Option<(Vec<OffsetDateTime>, Vec<bool>)> {
        match self {
            Payload::Time(p) => Some(p.times()),
            Payload::Any(p) => Some(p.times()),
            Payload::Na(p) => Some(p.times()),
            _ => None,
        }
    }

    /// Tagged-value view of the payload. Nested vectors have no scalar
    /// rendering, so their elements all come back NA.
    pub fn values(&self) -> (Vec<Value>, Vec<bool>) {
        match self {
            Payload::Integer(p) => p.values(),
            Payload::Float(p) => p.values(),
            Payload::Complex(p) => p.values(),
            Payload::Boolean(p) => p.values(),
            Payload::String(p) => p.values(),
            Payload::Time(p) => p.values(),
            Payload::Any(p) => p.values(),
            Payload::Vector(p) => (vec![Value::Na; p.len()], vec![true; p.len()]),
            Payload::Na(p) => p.values(),
        }
    }

    /// True when this payload runs predicates of the given carrier type.
    pub fn supports_whicher(&self, whicher: &Whicher<'_>) -> bool {
        matches!(
            (self, whicher),
            (Payload::Integer(_), Whicher::Integer(_))
                | (Payload::Float(_), Whicher::Float(_))
                | (Payload::Complex(_), Whicher::Complex(_))
                | (Payload::Boolean(_), Whicher::Boolean(_))
                | (Payload::String(_), Whicher::Str(_))
                | (Payload::Time(_), Whicher::Time(_))
                | (Payload::Any(_), Whicher::Any(_))
        )
    }

    /// Runs a typed predicate; a carrier mismatch selects nothing.
    pub fn which(&self, whicher: &Whicher<'_>) -> Vec<bool> {
        match (self, whicher) {
            (Payload::Integer(p), Whicher::Integer(f)) => p.which(f),
            (Payload::Float(p), Whicher::Float(f)) => p.which(f),
            (Payload::Complex(p), Whicher::Complex(f)) => p.which(f),
            (Payload::Boolean(p), Whicher::Boolean(f)) => p.which(f),
            (Payload::String(p), Whicher::Str(f)) => p.which(f),
            (Payload::Time(p), Whicher::Time(f)) => p.which(f),
            (Payload::Any(p), Whicher::Any(f)) => p.which(f),
            _ => vec![false; self.len()],
        }
    }

    /// True when this payload runs transforms of the given carrier type.
    pub fn supports_applier(&self, applier: &Applier<'_>) -> bool {
        matches!(
            (self, applier),
            (Payload::Integer(_), Applier::Integer(_))
                | (Payload::Float(_), Applier::Float(_))
                | (Payload::Complex(_), Applier::Complex(_))
                | (Payload::Boolean(_), Applier::Boolean(_))
                | (Payload::String(_), Applier::Str(_))
                | (Payload::Time(_), Applier::Time(_))
                | (Payload::Any(_), Applier::Any(_))
        )
    }

    /// Runs a typed transform; a carrier mismatch degrades to all-NA.
    pub fn apply(&self, applier: &Applier<'_>) -> Payload {
        match (self, applier) {
            (Payload::Integer(p), Applier::Integer(f)) => p.apply(f),
            (Payload::Float(p), Applier::Float(f)) => p.apply(f),
            (Payload::Complex(p), Applier::Complex(f)) => p.apply(f),
            (Payload::Boolean(p), Applier::Boolean(f)) => p.apply(f),
            (Payload::String(p), Applier::Str(f)) => p.apply(f),
            (Payload::Time(p), Applier::Time(f)) => p.apply(f),
            (Payload::Any(p), Applier::Any(f)) => p.apply(f),
            _ => Payload::Na(NaPayload::new(self.len())),
        }
    }

    /// Runs a typed left-fold; a carrier mismatch degrades to a length-1 NA.
    pub fn summarize(&self, summarizer: &Summarizer<'_>) -> Payload {
        match (self, summarizer) {
            (Payload::Integer(p), Summarizer::Integer(f)) => p.summarize(*f),
            (Payload::Float(p), Summarizer::Float(f)) => p.summarize(*f),
            (Payload::Complex(p), Summarizer::Complex(f)) => p.summarize(*f),
            (Payload::Boolean(p), Summarizer::Boolean(f)) => p.summarize(*f),
            (Payload::String(p), Summarizer::Str(f)) => p.summarize(*f),
            (Payload::Time(p), Summarizer::Time(f)) => p.summarize(*f),
            (Payload::Any(p), Summarizer::Any(f)) => p.summarize(*f),
            _ => Payload::Na(NaPayload::new(1)),
        }
    }

    /// Concatenates `other` onto this payload, converting it into this
    /// payload's type. Elements that do not convert become NA.
    pub fn append(&self, other: &Payload) -> Payload {
        match self {
            Payload::Integer(p) => p.append(other),
            Payload::Float(p) => p.append(other),
            Payload::Complex(p) => p.append(other),
            Payload::Boolean(p) => p.append(other),
            Payload::String(p) => p.append(other),
            Payload::Time(p) => p.append(other),
            Payload::Any(p) => p.append(other),
            Payload::Vector(p) => p.append(other),
            Payload::Na(p) => p.append(other),
        }
    }

    /// Resizes to exactly `size` elements, truncating or recycling.
    pub fn adjust(&self, size: usize) -> Payload {
        // Growing an empty payload has nothing to recycle; the result is
        // all-NA at the requested size.
        if self.is_empty() && size > 0 {
            return Payload::Na(NaPayload::new(size));
        }
        match self {
            Payload::Integer(p) => p.adjust(size),
            Payload::Float(p) => p.adjust(size),
            Payload::Complex(p) => p.adjust(size),
            Payload::Boolean(p) => p.adjust(size),
            Payload::String(p) => p.adjust(size),
            Payload::Time(p) => p.adjust(size),
            Payload::Any(p) => p.adjust(size),
            Payload::Vector(p) => p.adjust(size),
            Payload::Na(p) => p.adjust(size),
        }
    }

    /// Fills NA slots from `other`. `None` when this payload type cannot
    /// coalesce, which aborts a coalescing chain.
    pub fn coalesce(&self, other: &Payload) -> Option<Payload> {
        match self {
            Payload::Integer(p) => Some(p.coalesce(other)),
            Payload::Float(p) => Some(p.coalesce(other)),
            Payload::Complex(p) => Some(p.coalesce(other)),
            Payload::Boolean(p) => Some(p.coalesce(other)),
            Payload::String(p) => Some(p.coalesce(other)),
            Payload::Time(p) => Some(p.coalesce(other)),
            Payload::Any(p) => Some(p.coalesce(other)),
            Payload::Vector(p) => Some(p.coalesce(other)),
            Payload::Na(_) => None,
        }
    }

    /// Partitions elements into equal-value groups in first-occurrence
    /// order, NA group last. `None` when the type cannot group.
    pub fn groups(&self) -> Option<(Vec<Vec<usize>>, Vec<Value>)> {
        match self {
            Payload::Integer(p) => Some(p.groups()),
            Payload::Float(p) => Some(p.groups()),
            Payload::Complex(p) => Some(p.groups()),
            Payload::Boolean(p) => Some(p.groups()),
            Payload::String(p) => Some(p.groups()),
            Payload::Time(p) => Some(p.groups()),
            Payload::Any(p) => Some(p.groups()),
            Payload::Na(p) => Some(p.groups()),
            Payload::Vector(_) => None,
        }
    }

    /// 1-based position of the first match, `0` when absent or the needle
    /// does not fit the payload type.
    pub fn find(&self, needle: &Value) -> usize {
        match self {
            Payload::Integer(p) => p.find(needle),
            Payload::Float(p) => p.find(needle),
            Payload::Complex(p) => p.find(needle),
            Payload::Boolean(p) => p.find(needle),
            Payload::String(p) => p.find(needle),
            Payload::Time(p) => p.find(needle),
            Payload::Any(p) => p.find(needle),
            Payload::Vector(_) | Payload::Na(_) => 0,
        }
    }

    /// 1-based positions of all matches.
    pub fn find_all(&self, needle: &Value) -> Vec<usize> {
        match self {
            Payload::Integer(p) => p.find_all(needle),
            Payload::Float(p) => p.find_all(needle),
            Payload::Complex(p) => p.find_all(needle),
            Payload::Boolean(p) => p.find_all(needle),
            Payload::String(p) => p.find_all(needle),
            Payload::Time(p) => p.find_all(needle),
            Payload::Any(p) => p.find_all(needle),
            Payload::Vector(_) | Payload::Na(_) => Vec::new(),
        }
    }

    /// Elementwise equality with a scalar. NA elements and incompatible
    /// needles compare false.
    pub fn eq(&self, val: &Value) -> Vec<bool> {
        match self {
            Payload::Integer(p) => p.eq(val),
            Payload::Float(p) => p.eq(val),
            Payload::Complex(p) => p.eq(val),
            Payload::Boolean(p) => p.eq(val),
            Payload::String(p) => p.eq(val),
            Payload::Time(p) => p.eq(val),
            Payload::Any(p) => p.eq(val),
            Payload::Vector(_) | Payload::Na(_) => vec![false; self.len()],
        }
    }

    /// Elementwise inequality. NA elements and incompatible needles compare
    /// true.
    pub fn neq(&self, val: &Value) -> Vec<bool> {
        match self {
            Payload::Integer(p) => p.neq(val),
            Payload::Float(p) => p.neq(val),
            Payload::Complex(p) => p.neq(val),
            Payload::Boolean(p) => p.neq(val),
            Payload::String(p) => p.neq(val),
            Payload::Time(p) => p.neq(val),
            Payload::Any(p) => p.neq(val),
            Payload::Vector(_) | Payload::Na(_) => vec![true; self.len()],
        }
    }

    /// Elementwise `>` against a scalar, where the type is ordered.
    pub fn gt(&self, val: &Value) -> Vec<bool> {
        match self {
            Payload::Integer(p) => p.gt(val),
            Payload::Float(p) => p.gt(val),
            Payload::String(p) => p.gt(val),
            Payload::Time(p) => p.gt(val),
            _ => vec![false; self.len()],
        }
    }

    /// Elementwise `<` against a scalar, where the type is ordered.
    pub fn lt(&self, val: &Value) -> Vec<bool> {
        match self {
            Payload::Integer(p) => p.lt(val),
            Payload::Float(p) => p.lt(val),
            Payload::String(p) => p.lt(val),
            Payload::Time(p) => p.lt(val),
            _ => vec![false; self.len()],
        }
    }

    /// Elementwise `>=` against a scalar, where the type is ordered.
    pub fn gte(&self, val: &Value) -> Vec<bool> {
        match self {
            Payload::Integer(p) => p.gte(val),
            Payload::Float(p) => p.gte(val),
            Payload::String(p) => p.gte(val),
            Payload::Time(p) => p.gte(val),
            _ => vec![false; self.len()],
        }
    }

    /// Elementwise `<=` against a scalar, where the type is ordered.
    pub fn lte(&self, val: &Value) -> Vec<bool> {
        match self {
            Payload::Integer(p) => p.lte(val),
            Payload::Float(p) => p.lte(val),
            Payload::String(p) => p.lte(val),
            Payload::Time(p) => p.lte(val),
            _ => vec![false; self.len()],
        }
    }

    /// Stable ascending order as 1-based indices, NA elements trailing in
    /// original order. Unordered types keep their current order.
    pub fn sorted_indices(&self) -> Vec<usize> {
        match self {
            Payload::Integer(p) => p.sorted_indices(),
            Payload::Float(p) => p.sorted_indices(),
            Payload::Boolean(p) => p.sorted_indices(),
            Payload::String(p) => p.sorted_indices(),
            Payload::Time(p) => p.sorted_indices(),
            _ => indices_array(self.len()),
        }
    }

    /// Sorted order plus dense ranks aligned to the original positions.
    pub fn sorted_indices_with_ranks(&self) -> (Vec<usize>, Vec<usize>) {
        match self {
            Payload::Integer(p) => p.sorted_indices_with_ranks(),
            Payload::Float(p) => p.sorted_indices_with_ranks(),
            Payload::Boolean(p) => p.sorted_indices_with_ranks(),
            Payload::String(p) => p.sorted_indices_with_ranks(),
            Payload::Time(p) => p.sorted_indices_with_ranks(),
            _ => (indices_array(self.len()), indices_array(self.len())),
        }
    }

    /// True at each element's first occurrence; all NAs share one
    /// occurrence. Types without equality keys report everything unique.
    pub fn is_unique(&self) -> Vec<bool> {
        match self {
            Payload::Integer(p) => p.is_unique(),
            Payload::Float(p) => p.is_unique(),
            Payload::Complex(p) => p.is_unique(),
            Payload::Boolean(p) => p.is_unique(),
            Payload::String(p) => p.is_unique(),
            Payload::Time(p) => p.is_unique(),
            Payload::Any(p) => p.is_unique(),
            Payload::Na(p) => p.is_unique(),
            Payload::Vector(p) => vec![true; p.len()],
        }
    }

    /// Sum over all elements, `None` for non-summable types.
    pub fn sum(&self) -> Option<Payload> {
        match self {
            Payload::Integer(p) => Some(p.sum()),
            Payload::Float(p) => Some(p.sum()),
            Payload::Complex(p) => Some(p.sum()),
            _ => None,
        }
    }

    /// Product over all elements, `None` for non-summable types.
    pub fn prod(&self) -> Option<Payload> {
        match self {
            Payload::Integer(p) => Some(p.prod()),
            Payload::Float(p) => Some(p.prod()),
            Payload::Complex(p) => Some(p.prod()),
            _ => None,
        }
    }

    /// Arithmetic mean, `None` for types without one.
    pub fn mean(&self) -> Option<Payload> {
        match self {
            Payload::Float(p) => Some(p.mean()),
            Payload::Complex(p) => Some(p.mean()),
            _ => None,
        }
    }

    /// Running sum, `None` for non-summable types.
    pub fn cum_sum(&self) -> Option<Payload> {
        match self {
            Payload::Integer(p) => Some(p.cum_sum()),
            Payload::Float(p) => Some(p.cum_sum()),
            Payload::Complex(p) => Some(p.cum_sum()),
            _ => None,
        }
    }

    /// Smallest element, `None` for unordered types.
    pub fn min(&self) -> Option<Payload> {
        match self {
            Payload::Integer(p) => Some(p.min()),
            Payload::Float(p) => Some(p.min()),
            Payload::String(p) => Some(p.min()),
            Payload::Time(p) => Some(p.min()),
            _ => None,
        }
    }

    /// Largest element, `None` for unordered types.
    pub fn max(&self) -> Option<Payload> {
        match self {
            Payload::Integer(p) => Some(p.max()),
            Payload::Float(p) => Some(p.max()),
            Payload::String(p) => Some(p.max()),
            Payload::Time(p) => Some(p.max()),
            _ => None,
        }
    }

    /// Rendering of the element at a 1-based index.
    pub fn str_for_elem(&self, idx: usize) -> String {
        // 1-based; index 0 and out-of-range render as missing.
        if idx == 0 || idx > self.len() {
            return "NA".to_string();
        }
        match self {
            Payload::Integer(p) => p.str_for_elem(idx),
            Payload::Float(p) => p.str_for_elem(idx),
            Payload::Complex(p) => p.str_for_elem(idx),
            Payload::Boolean(p) => p.str_for_elem(idx),
            Payload::String(p) => p.str_for_elem(idx),
            Payload::Time(p) => p.str_for_elem(idx),
            Payload::Any(p) => p.str_for_elem(idx),
            Payload::Vector(p) => p.str_for_elem(idx),
            Payload::Na(_) => "NA".to_string(),
        }
    }

    /// Sets the decimal precision on float and complex payloads; other
    /// types are unchanged.
    pub fn with_precision(&self, precision: usize) -> Payload {
        match self {
            Payload::Float(p) => p.with_precision(precision),
            Payload::Complex(p) => p.with_precision(precision),
            other => other.clone(),
        }
    }

    /// Sets the rendering format on time payloads; other types are
    /// unchanged.
    pub fn with_time_format(&self, format: OwnedFormatItem) -> Payload {
        match self {
            Payload::Time(p) => p.with_format(format),
            other => other.clone(),
        }
    }
}
