//! # **NaMask Module** - *Per-Element Missing-Value Tracker*
//!
//! Boolean missing-value mask attached to every payload (`true` = NA).
//!
//! ## Behaviour
//! - The mask always has the same length as the payload data it belongs to;
//!   payload constructors reject mismatched masks by degrading to the empty
//!   NA payload rather than panicking.
//! - Positions reported by `with_na` / `without_na` are 1-based, matching the
//!   indexing convention of the whole crate.

/// # NaMask
///
/// Per-element "is missing" flags for one payload.
///
/// ### Fields
/// - `flags`: one bool per element, `true` = NA.
///
/// # Example
/// ```rust
/// use navec::NaMask;
///
/// let mask = NaMask::from_flags(vec![false, true, false]);
/// assert!(mask.has_na());
/// assert_eq!(mask.with_na(), vec![2]);
/// assert_eq!(mask.without_na(), vec![1, 3]);
/// ```
#[derive(Clone, PartialEq, Debug, Default)]
pub struct NaMask {
    flags: Vec<bool>,
}

impl NaMask {
    /// All-false mask of the given length (no missing values).
    #[inline]
    pub fn new(len: usize) -> Self {
        Self {
            flags: vec![false; len],
        }
    }

    /// Mask owning the given flags.
    #[inline]
    pub fn from_flags(flags: Vec<bool>) -> Self {
        Self { flags }
    }

    /// All-true mask of the given length (every element missing).
    #[inline]
    pub fn new_all_na(len: usize) -> Self {
        Self {
            flags: vec![true; len],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// NA flag at 0-based position `idx`.
    #[inline]
    pub fn get(&self, idx: usize) -> bool {
        self.flags[idx]
    }

    /// Sets the NA flag at 0-based position `idx`.
    #[inline]
    pub fn set(&mut self, idx: usize, value: bool) {
        self.flags[idx] = value;
    }

    /// The raw flags, one per element.
    #[inline]
    pub fn as_slice(&self) -> &[bool] {
        &self.flags
    }

    /// Copy of the flags: `true` at each missing position.
    pub fn is_na(&self) -> Vec<bool> {
        self.flags.clone()
    }

    /// Inverted flags: `true` at each present position.
    pub fn not_na(&self) -> Vec<bool> {
        self.flags.iter().map(|f| !f).collect()
    }

    /// True if any element is missing.
    pub fn has_na(&self) -> bool {
        self.flags.iter().any(|f| *f)
    }

    /// 1-based positions of the missing elements.
    pub fn with_na(&self) -> Vec<usize> {
        self.flags
            .iter()
            .enumerate()
            .filter_map(|(i, f)| f.then_some(i + 1))
            .collect()
    }

    /// 1-based positions of the present elements.
    pub fn without_na(&self) -> Vec<usize> {
        self.flags
            .iter()
            .enumerate()
            .filter_map(|(i, f)| (!f).then_some(i + 1))
            .collect()
    }
}

impl From<Vec<bool>> for NaMask {
    fn from(flags: Vec<bool>) -> Self {
        NaMask::from_flags(flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_all_false() {
        let mask = NaMask::new(3);
        assert_eq!(mask.len(), 3);
        assert!(!mask.has_na());
        assert_eq!(mask.is_na(), vec![false, false, false]);
        assert_eq!(mask.with_na(), Vec::<usize>::new());
        assert_eq!(mask.without_na(), vec![1, 2, 3]);
    }

    #[test]
    fn test_views_are_one_based() {
        let mask = NaMask::from_flags(vec![true, false, true, false]);
        assert!(mask.has_na());
        assert_eq!(mask.with_na(), vec![1, 3]);
        assert_eq!(mask.without_na(), vec![2, 4]);
        assert_eq!(mask.not_na(), vec![false, true, false, true]);
    }

    #[test]
    fn test_all_na() {
        let mask = NaMask::new_all_na(2);
        assert!(mask.get(0) && mask.get(1));
        assert_eq!(mask.without_na(), Vec::<usize>::new());
    }
}
