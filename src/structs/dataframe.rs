//! # **Dataframe Module** - *Named Column Collection*
//!
//! A rectangular collection of equally long vectors, with row selection,
//! column selection, mutation, binding and grouped aggregation. Everything
//! is expressed through the vector contract; the dataframe itself never
//! touches payload internals.

use std::fmt::{self, Display, Formatter};

use crate::enums::error::NavecError;
use crate::kernels::select::mask_to_indices;
use crate::structs::group_index::GroupIndex;
use crate::structs::vector::Vector;

/// # Dataframe
///
/// Equal-length named columns with an optional group partition.
#[derive(Clone, Default)]
pub struct Dataframe {
    columns: Vec<Vector>,
    group_index: Option<GroupIndex>,
    grouped_by: Vec<String>,
}

impl Dataframe {
    /// Builds a dataframe, recycling shorter columns to the longest one.
    pub fn new(columns: Vec<Vector>) -> Self {
        let row_num = columns.iter().map(Vector::len).max().unwrap_or(0);
        let columns = columns
            .into_iter()
            .map(|col| {
                if col.len() == row_num {
                    col
                } else {
                    let name = col.name().to_string();
                    col.adjust(row_num).named(name)
                }
            })
            .collect();
        Self {
            columns,
            group_index: None,
            grouped_by: Vec::new(),
        }
    }

    /// Strict construction: every column must match the first one's length.
    pub fn try_new(columns: Vec<Vector>) -> Result<Self, NavecError> {
        if let Some(first) = columns.first() {
            let expected = first.len();
            for col in &columns {
                if col.len() != expected {
                    return Err(NavecError::ColumnLengthMismatch {
                        col: col.name().to_string(),
                        expected,
                        found: col.len(),
                    });
                }
            }
        }
        Ok(Self {
            columns,
            group_index: None,
            grouped_by: Vec::new(),
        })
    }

    pub fn names(&self) -> Vec<&str> {
        self.columns.iter().map(Vector::name).collect()
    }

    pub fn col_num(&self) -> usize {
        self.columns.len()
    }

    pub fn row_num(&self) -> usize {
        self.columns.first().map_or(0, Vector::len)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|col| col.name() == name)
    }

    fn column_position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|col| col.name() == name)
    }

    /// The named column. On a grouped dataframe the returned vector carries
    /// the group partition, so its aggregations run per group.
    pub fn column(&self, name: &str) -> Option<Vector> {
        let col = self.columns[self.column_position(name)?].clone();
        Some(match &self.group_index {
            Some(index) => col.group_by_indices(index.clone()),
            None => col,
        })
    }

    /// The column at a 1-based position.
    pub fn column_at(&self, idx: usize) -> Option<Vector> {
        if idx >= 1 && idx <= self.col_num() {
            let name = self.columns[idx - 1].name().to_string();
            self.column(&name)
        } else {
            None
        }
    }

    /// Selects columns by name, in the order given. A name prefixed with
    /// `-` removes the column instead, starting from the full set when no
    /// columns were picked yet. Unknown names are ignored.
    pub fn select(&self, selectors: &[&str]) -> Dataframe {
        let mut picked: Vec<String> = Vec::new();

        for &selector in selectors {
            let (remove, name) = match selector.strip_prefix('-') {
                Some(rest) if !self.has_column(selector) => (true, rest),
                _ => (false, selector),
            };

            if !self.has_column(name) {
                continue;
            }

            if remove {
                if picked.is_empty() {
                    picked = self.names().iter().map(|s| s.to_string()).collect();
                }
                picked.retain(|n| n != name);
            } else if !picked.iter().any(|n| n == name) {
                picked.push(name.to_string());
            }
        }

        let columns = picked
            .iter()
            .filter_map(|name| {
                self.column_position(name)
                    .map(|pos| self.columns[pos].clone())
            })
            .collect();
        Dataframe::new(columns)
    }

    /// Selects columns by 1-based position, ignoring out-of-range indices.
    pub fn select_at(&self, indices: &[usize]) -> Dataframe {
        let columns = indices
            .iter()
            .filter(|&&idx| idx >= 1 && idx <= self.col_num())
            .map(|&idx| self.columns[idx - 1].clone())
            .collect();
        Dataframe::new(columns)
    }

    /// Renames columns by `(old, new)` pairs; unknown old names are ignored.
    pub fn rename(&self, renames: &[(&str, &str)]) -> Dataframe {
        let mut out = self.clone();
        for &(old, new) in renames {
            if let Some(pos) = out.column_position(old) {
                out.columns[pos].set_name(new);
            }
        }
        out
    }

    /// Adds or replaces columns by name. A replacement keeps the original
    /// position; new columns append at the end. Shorter columns recycle to
    /// the row count.
    pub fn mutate(&self, columns: Vec<Vector>) -> Dataframe {
        let mut out_columns = self.columns.clone();
        for col in columns {
            let col = if col.len() == self.row_num() || self.col_num() == 0 {
                col
            } else {
                let name = col.name().to_string();
                col.adjust(self.row_num()).named(name)
            };
            match self.column_position(col.name()) {
                Some(pos) => out_columns[pos] = col,
                None => out_columns.push(col),
            }
        }
        let mut out = Dataframe::new(out_columns);
        out.group_index = self.group_index.clone();
        out.grouped_by = self.grouped_by.clone();
        out
    }

    /// Appends another dataframe's columns after this one's.
    pub fn bind_columns(&self, other: &Dataframe) -> Dataframe {
        let mut columns = self.columns.clone();
        columns.extend(other.columns.iter().cloned());
        Dataframe::new(columns)
    }

    /// Appends another dataframe's rows. Columns the other dataframe lacks
    /// are filled with NA; its extra columns are dropped.
    pub fn bind_rows(&self, other: &Dataframe) -> Dataframe {
        let columns = self
            .columns
            .iter()
            .map(|col| {
                let name = col.name().to_string();
                let appendix = match other.column(&name) {
                    Some(other_col) => other_col,
                    None => Vector::na_vector(other.row_num()),
                };
                col.append(&appendix).named(name)
            })
            .collect();
        Dataframe::new(columns)
    }

    /// Gathers rows by 1-based indices; index `0` yields an all-NA row.
    pub fn by_indices(&self, indices: &[usize]) -> Dataframe {
        let columns = self
            .columns
            .iter()
            .map(|col| {
                let name = col.name().to_string();
                col.by_indices(indices).named(name)
            })
            .collect();
        Dataframe::new(columns)
    }

    /// Keeps the rows where the mask is true.
    pub fn filter(&self, mask: &[bool]) -> Dataframe {
        self.by_indices(&mask_to_indices(self.row_num(), mask))
    }

    /// Groups rows by the given columns, refining left to right: rows fall
    /// into the same group when every key column matches. Groups come in
    /// first-occurrence order; unknown names are ignored.
    pub fn group_by(&self, names: &[&str]) -> Dataframe {
        let keys: Vec<String> = names
            .iter()
            .filter(|name| self.has_column(name))
            .map(|name| name.to_string())
            .collect();
        if keys.is_empty() {
            return self.clone();
        }

        let mut groups: Vec<Vec<usize>> = vec![(1..=self.row_num()).collect()];
        for name in &keys {
            let pos = match self.column_position(name) {
                Some(pos) => pos,
                None => continue,
            };
            let col = &self.columns[pos];

            let mut refined = Vec::new();
            for group in &groups {
                let (sub_groups, _) = col.by_indices(group).groups();
                for sub in sub_groups {
                    refined.push(sub.iter().map(|&local| group[local - 1]).collect());
                }
            }
            groups = refined;
        }

        let mut out = self.clone();
        out.group_index = Some(GroupIndex::new(groups));
        out.grouped_by = keys;
        out
    }

    pub fn is_grouped(&self) -> bool {
        self.group_index.is_some()
    }

    pub fn ungroup(&self) -> Dataframe {
        let mut out = self.clone();
        out.group_index = None;
        out.grouped_by.clear();
        out
    }

    /// Aggregates each group to one row. Each entry names a column and the
    /// aggregation to run over its grouped vector; the key columns come
    /// first, holding each group's representative value.
    pub fn summarize(
        &self,
        aggregations: &[(&str, &dyn Fn(&Vector) -> Vector)],
    ) -> Dataframe {
        let first_elements = match &self.group_index {
            Some(index) => index.first_elements(),
            None if self.row_num() > 0 => vec![1],
            None => Vec::new(),
        };

        let mut columns: Vec<Vector> = self
            .grouped_by
            .iter()
            .filter_map(|name| {
                self.column_position(name).map(|pos| {
                    self.columns[pos]
                        .by_indices(&first_elements)
                        .named(name.clone())
                })
            })
            .collect();

        for &(name, aggregate) in aggregations {
            let col = match self.column(name) {
                Some(col) => col,
                None => continue,
            };
            columns.push(aggregate(&col).named(name));
        }

        Dataframe::new(columns)
    }
}

impl Display for Dataframe {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Dataframe: {} x {}", self.row_num(), self.col_num())?;
        for col in &self.columns {
            writeln!(f, "{}: {}", col.name(), col)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::payload::PayloadType;

    fn sample() -> Dataframe {
        Dataframe::new(vec![
            Vector::integer(vec![100, 200, 200, 30, 30, 120, 140, 70]).named("A"),
            Vector::integer_with_na(
                vec![100, 100, 40, 30, 40, 80, 90, 110],
                vec![false, true, true, true, false, false, false, false],
            )
            .named("B"),
            Vector::boolean(vec![true, false, false, false, true, false, true, false]).named("C"),
            Vector::string(vec!["A", "B", "C", "A", "B", "D", "D", "D"]).named("D"),
        ])
    }

    #[test]
    fn test_new_recycles_short_columns() {
        let df = Dataframe::new(vec![
            Vector::integer(vec![1, 2, 3, 4, 5, 6]).named("x"),
            Vector::integer(vec![1, 2, 3]).named("y"),
        ]);
        assert_eq!(df.row_num(), 6);
        let y = df.column("y").expect("column y");
        assert_eq!(y.integers().unwrap().0, vec![1, 2, 3, 1, 2, 3]);
    }

    #[test]
    fn test_new_with_empty_column_fills_na() {
        let df = Dataframe::new(vec![
            Vector::integer(vec![1, 2, 3]).named("x"),
            Vector::integer(vec![]).named("y"),
        ]);
        assert_eq!(df.row_num(), 3);
        let y = df.column("y").expect("column y");
        assert_eq!(y.is_na(), vec![true, true, true]);
    }

    #[test]
    fn test_try_new_rejects_mismatch() {
        let result = Dataframe::try_new(vec![
            Vector::integer(vec![1, 2, 3]).named("x"),
            Vector::integer(vec![1, 2]).named("y"),
        ]);
        assert!(matches!(
            result,
            Err(NavecError::ColumnLengthMismatch { expected: 3, found: 2, .. })
        ));
    }

    #[test]
    fn test_select_by_name_and_exclusion() {
        let df = sample();
        assert_eq!(df.select(&["D", "A"]).names(), vec!["D", "A"]);
        assert_eq!(df.select(&["-B", "-C"]).names(), vec!["A", "D"]);
        assert_eq!(df.select(&["A", "nope"]).names(), vec!["A"]);
    }

    #[test]
    fn test_select_at() {
        let df = sample();
        assert_eq!(df.select_at(&[4, 1, 9]).names(), vec!["D", "A"]);
    }

    #[test]
    fn test_rename() {
        let df = sample().rename(&[("A", "alpha"), ("nope", "x")]);
        assert_eq!(df.names(), vec!["alpha", "B", "C", "D"]);
    }

    #[test]
    fn test_mutate_replaces_in_place_and_appends() {
        let df = sample().mutate(vec![
            Vector::integer(vec![0]).named("B"),
            Vector::integer(vec![7]).named("E"),
        ]);
        assert_eq!(df.names(), vec!["A", "B", "C", "D", "E"]);
        let b = df.column("B").expect("column B");
        assert_eq!(b.integers().unwrap().0, vec![0; 8]);
    }

    #[test]
    fn test_bind_rows_fills_missing_with_na() {
        let left = Dataframe::new(vec![
            Vector::integer(vec![1, 2]).named("x"),
            Vector::string(vec!["a", "b"]).named("y"),
        ]);
        let right = Dataframe::new(vec![Vector::integer(vec![3]).named("x")]);
        let out = left.bind_rows(&right);
        assert_eq!(out.row_num(), 3);
        let y = out.column("y").expect("column y");
        assert_eq!(y.is_na(), vec![false, false, true]);
    }

    #[test]
    fn test_filter_rows() {
        let df = sample();
        let mask: Vec<bool> = df.column("C").expect("column C").booleans().unwrap().0;
        let out = df.filter(&mask);
        assert_eq!(out.row_num(), 3);
        let a = out.column("A").expect("column A");
        assert_eq!(a.integers().unwrap().0, vec![100, 30, 140]);
    }

    #[test]
    fn test_grouped_sum_matches_group_order() {
        let grouped = sample().group_by(&["D"]);
        assert!(grouped.is_grouped());

        let out = grouped.summarize(&[
            ("A", &|v: &Vector| v.sum()),
            ("B", &|v: &Vector| v.sum()),
        ]);

        assert_eq!(out.names(), vec!["D", "A", "B"]);
        let d = out.column("D").expect("column D");
        assert_eq!(
            d.strings().unwrap().0,
            vec!["A".to_string(), "B".into(), "C".into(), "D".into()]
        );
        let a = out.column("A").expect("column A");
        assert_eq!(a.integers().unwrap().0, vec![130, 230, 200, 330]);
        let b = out.column("B").expect("column B");
        assert_eq!(b.is_na(), vec![true, true, true, false]);
        assert_eq!(b.integers().unwrap().0[3], 280);
    }

    #[test]
    fn test_group_by_multiple_columns_refines() {
        let df = Dataframe::new(vec![
            Vector::string(vec!["x", "x", "y", "x"]).named("k1"),
            Vector::integer(vec![1, 2, 1, 1]).named("k2"),
            Vector::integer(vec![10, 20, 30, 40]).named("v"),
        ]);
        let grouped = df.group_by(&["k1", "k2"]);
        let out = grouped.summarize(&[("v", &|v: &Vector| v.sum())]);
        assert_eq!(out.row_num(), 3);
        let v = out.column("v").expect("column v");
        assert_eq!(v.integers().unwrap().0, vec![50, 20, 30]);
    }

    #[test]
    fn test_ungrouped_summarize_is_single_row() {
        let df = sample();
        let out = df.summarize(&[("A", &|v: &Vector| v.sum())]);
        assert_eq!(out.row_num(), 1);
        let a = out.column("A").expect("column A");
        assert_eq!(a.integers().unwrap().0, vec![890]);
    }

    #[test]
    fn test_by_indices_keeps_zero_as_na_row() {
        let df = sample();
        let out = df.by_indices(&[1, 0]);
        assert_eq!(out.row_num(), 2);
        let a = out.column("A").expect("column A");
        assert_eq!(a.is_na(), vec![false, true]);
        assert_eq!(a.type_tag(), PayloadType::Integer);
    }
}
