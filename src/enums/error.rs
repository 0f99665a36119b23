//! # **Error Module** - *Custom navec Error Type*
//!
//! Defines the unified error type for navec.
//!
//! ## Features
//! - Covers column length mismatches in strict dataframe construction and
//!   invalid time-format strings.
//! - Implements `Display` for readable output and `Error` for integration
//!   with standard Rust error handling.
//!
//! Most data-shape problems in this crate deliberately do *not* surface here:
//! the core degrades to empty or all-NA results instead of failing, so this
//! type only appears at the few API edges where a caller asked for strictness.

use std::error::Error;
use std::fmt;

/// Catch-all error type for `navec`.
#[derive(Debug, PartialEq)]
pub enum NavecError {
    ColumnLengthMismatch {
        col: String,
        expected: usize,
        found: usize,
    },
    NaLengthMismatch {
        data_len: usize,
        na_len: usize,
    },
    TimeFormatError {
        format: String,
        message: String,
    },
}

impl fmt::Display for NavecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavecError::ColumnLengthMismatch {
                col,
                expected,
                found,
            } => {
                write!(
                    f,
                    "Column length mismatch in column '{}': expected {}, found {}.",
                    col, expected, found
                )
            }
            NavecError::NaLengthMismatch { data_len, na_len } => {
                write!(
                    f,
                    "NA mask length mismatch: data has {} elements, mask has {}.",
                    data_len, na_len
                )
            }
            NavecError::TimeFormatError { format, message } => {
                write!(f, "Invalid time format '{}': {}", format, message)
            }
        }
    }
}

impl Error for NavecError {}
