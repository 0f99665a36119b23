//! # **GroupIndex Module** - *Partition of Vector Positions*
//!
//! The result of grouping: one list of 1-based indices per group, in
//! first-occurrence order, with the NA group (when present) last.

/// # GroupIndex
///
/// A partition of a vector's 1-based positions into groups.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct GroupIndex {
    pub(crate) groups: Vec<Vec<usize>>,
}

impl GroupIndex {
    pub fn new(groups: Vec<Vec<usize>>) -> Self {
        Self { groups }
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// The index lists, one per group.
    pub fn groups(&self) -> &[Vec<usize>] {
        &self.groups
    }

    /// The first position of each non-empty group.
    pub fn first_elements(&self) -> Vec<usize> {
        self.groups
            .iter()
            .filter_map(|indices| indices.first().copied())
            .collect()
    }
}

impl From<Vec<Vec<usize>>> for GroupIndex {
    fn from(groups: Vec<Vec<usize>>) -> Self {
        Self::new(groups)
    }
}
