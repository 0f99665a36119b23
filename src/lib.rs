//! # **navec** - *Columnar Vectors with Missing-Value Semantics*
//!
//! Typed immutable vectors (integer, float, complex, boolean, string, time,
//! generic and nested), each carrying a per-element NA mask, plus a
//! dataframe built from heterogeneous vectors.
//!
//! ## Conventions
//! - All element positions are 1-based; index `0` selects an NA element.
//! - Operations return new vectors; nothing mutates in place.
//! - Failures degrade to values (NA elements, empty NA vectors) instead of
//!   panicking; constructors with malformed NA masks yield a zero-length NA
//!   vector.
//! - Shorter operands recycle to the needed length, R-style.
//!
//! ## Quick start
//! ```
//! use navec::{Vector, Whicher};
//!
//! let v = Vector::integer_with_na(vec![1, 2, 3, 4], vec![false, false, true, false]);
//! let kept = v.filter(Whicher::int(&|val: &i64, _| *val > 1));
//! assert_eq!(kept.len(), 2);
//! assert_eq!(v.sum().is_na(), vec![true]);
//! ```

pub mod enums {
    pub mod error;
    pub mod ops;
    pub mod payload;
    pub mod value;
}

pub mod structs {
    pub mod variants {
        pub mod any;
        pub mod boolean;
        pub mod complex;
        pub mod float;
        pub mod integer;
        pub mod na;
        pub mod string;
        pub mod time;
        pub mod vector;
    }
    pub mod dataframe;
    pub mod group_index;
    pub mod na_mask;
    pub mod vector;
}

pub mod traits {
    pub mod print;
}

pub mod math;

mod kernels {
    pub(crate) mod apply;
    pub(crate) mod coalesce;
    pub(crate) mod group;
    pub(crate) mod resize;
    pub(crate) mod search;
    pub(crate) mod select;
    pub(crate) mod sort;
    pub(crate) mod stat;
    pub(crate) mod unique;
}

pub use enums::error::NavecError;
pub use enums::ops::{ApplyFn, Applier, FoldFn, Selector, Summarizer, WhichFn, Whicher};
pub use enums::payload::{Payload, PayloadType};
pub use enums::value::Value;
pub use structs::dataframe::Dataframe;
pub use structs::group_index::GroupIndex;
pub use structs::na_mask::NaMask;
pub use structs::variants::any::AnyPayload;
pub use structs::variants::boolean::BooleanPayload;
pub use structs::variants::complex::ComplexPayload;
pub use structs::variants::float::{FloatPayload, DEFAULT_FLOAT_PRECISION};
pub use structs::variants::integer::IntegerPayload;
pub use structs::variants::na::NaPayload;
pub use structs::variants::string::StringPayload;
pub use structs::variants::time::TimePayload;
pub use structs::variants::vector::VectorPayload;
pub use structs::vector::Vector;
pub use traits::print::Print;
