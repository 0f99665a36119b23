//! # **Print Module** - *Console Rendering Helpers*
//!
//! A small `Print` trait wrapping `Display` so any printable object can be
//! dumped with `myobj.print()` instead of `println!("{}", myobj)`.

use std::fmt::Display;

/// Maximum number of elements shown before a rendering is elided with `...`.
pub(crate) const MAX_PREVIEW: usize = 10;

/// # Print
///
/// Convenience printing for anything that implements `Display`.
pub trait Print {
    #[inline]
    fn print(&self)
    where
        Self: Display,
    {
        println!("{}", self);
    }
}

impl<T: Display> Print for T {}
