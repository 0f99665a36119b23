//! # **Value Module** - *Unified Scalar Type*
//!
//! Contains the `Value` enum, a unified container for one element of any
//! payload type.
//!
//! ## Purpose
//! - Comparison needle for `eq`/`find`-style operations, so heterogeneous
//!   callers can hand in plain Rust scalars via `From` conversions.
//! - Representative value of a group produced by `Groups()`-style partitioning
//!   (the NA group carries `Value::Na`).
//! - Element type of the generic ("any") payload.
//!
//! ## Supports
//! - `From` conversions from the native scalar types
//! - lossless extraction through `as_*` accessors, with the same coercion
//!   rules the typed payloads use (exact narrowing only)

use num_complex::Complex64;
use time::OffsetDateTime;

/// # Value
///
/// One element of any vector, tagged by its payload type.
///
/// ## Details
/// - `Value::Na` represents a missing element regardless of payload type.
/// - Equality is structural; `Float` compares with `f64` semantics, so
///   `Value::Float(f64::NAN) != Value::Float(f64::NAN)`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Complex(Complex64),
    Bool(bool),
    Str(String),
    Time(OffsetDateTime),
    Na,
}

impl Value {
    /// True when the value is the missing-value marker.
    #[inline]
    pub fn is_na(&self) -> bool {
        matches!(self, Value::Na)
    }

    /// Integer rendering of the value, when exactly representable.
    ///
    /// Floats with a fractional part, complex numbers with a non-zero
    /// imaginary part, NaN and infinities are not representable.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            Value::Float(v) if v.is_finite() && v.fract() == 0.0 => Some(*v as i64),
            Value::Complex(c) if c.im == 0.0 && c.re.is_finite() && c.re.fract() == 0.0 => {
                Some(c.re as i64)
            }
            Value::Bool(b) => Some(i64::from(*b)),
            _ => None,
        }
    }

    /// Float rendering of the value, when representable.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            Value::Complex(c) if c.im == 0.0 => Some(c.re),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    /// Complex rendering of the value, when representable.
    pub fn as_complex(&self) -> Option<Complex64> {
        match self {
            Value::Int(v) => Some(Complex64::new(*v as f64, 0.0)),
            Value::Float(v) => Some(Complex64::new(*v, 0.0)),
            Value::Complex(c) => Some(*c),
            Value::Bool(b) => Some(Complex64::new(if *b { 1.0 } else { 0.0 }, 0.0)),
            _ => None,
        }
    }

    /// Boolean rendering; only `Bool` values qualify.
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// String rendering; only `Str` values qualify.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Time rendering; only `Time` values qualify.
    pub fn as_time(&self) -> Option<OffsetDateTime> {
        match self {
            Value::Time(t) => Some(*t),
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v as f64)
    }
}

impl From<Complex64> for Value {
    fn from(v: Complex64) -> Self {
        Value::Complex(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<OffsetDateTime> for Value {
    fn from(v: OffsetDateTime) -> Self {
        Value::Time(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Value::Na,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_integer_exact_only() {
        assert_eq!(Value::Int(5).as_integer(), Some(5));
        assert_eq!(Value::Float(5.0).as_integer(), Some(5));
        assert_eq!(Value::Float(5.5).as_integer(), None);
        assert_eq!(Value::Float(f64::NAN).as_integer(), None);
        assert_eq!(Value::Complex(Complex64::new(4.0, 0.0)).as_integer(), Some(4));
        assert_eq!(Value::Complex(Complex64::new(4.0, 1.0)).as_integer(), None);
        assert_eq!(Value::Bool(true).as_integer(), Some(1));
        assert_eq!(Value::Str("5".into()).as_integer(), None);
    }

    #[test]
    fn test_as_float() {
        assert_eq!(Value::Int(2).as_float(), Some(2.0));
        assert_eq!(Value::Float(2.5).as_float(), Some(2.5));
        assert_eq!(Value::Complex(Complex64::new(1.5, 0.0)).as_float(), Some(1.5));
        assert_eq!(Value::Complex(Complex64::new(1.5, 2.0)).as_float(), None);
        assert_eq!(Value::Na.as_float(), None);
    }

    #[test]
    fn test_from_conversions() {
        assert_eq!(Value::from(3i32), Value::Int(3));
        assert_eq!(Value::from("abc"), Value::Str("abc".into()));
        assert_eq!(Value::from(None::<i64>), Value::Na);
        assert_eq!(Value::from(Some(2.0f64)), Value::Float(2.0));
    }
}
