//! # **Group Kernel** - *Equivalence-Class Partitioning*
//!
//! Partitions positions into groups of equal values, preserving the
//! first-occurrence order of distinct values. All NA positions form their own
//! trailing group whose representative value is `Value::Na`.
//!
//! Float and complex payloads inject a bit-pattern key so that `NaN` groups
//! with `NaN`.

use std::collections::HashMap;
use std::hash::Hash;

use crate::enums::value::Value;

/// Groups 1-based positions by the key of their value. Returns the ordered
/// groups and one representative `Value` per group; the NA group (if any) is
/// last with `Value::Na`.
pub(crate) fn groups_for_data<T, K: Eq + Hash>(
    data: &[T],
    na: &[bool],
    key: impl Fn(&T) -> K,
    representative: impl Fn(&T) -> Value,
) -> (Vec<Vec<usize>>, Vec<Value>) {
    let mut groups: Vec<Vec<usize>> = Vec::new();
    let mut values: Vec<Value> = Vec::new();
    let mut seen: HashMap<K, usize> = HashMap::new();
    let mut na_group: Vec<usize> = Vec::new();

    for (i, value) in data.iter().enumerate() {
        if na[i] {
            na_group.push(i + 1);
            continue;
        }
        match seen.get(&key(value)) {
            Some(&group_idx) => groups[group_idx].push(i + 1),
            None => {
                seen.insert(key(value), groups.len());
                groups.push(vec![i + 1]);
                values.push(representative(value));
            }
        }
    }

    if !na_group.is_empty() {
        groups.push(na_group);
        values.push(Value::Na);
    }

    (groups, values)
}
