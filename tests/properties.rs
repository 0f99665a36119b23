//! End-to-end behavioral properties of the vector and dataframe API.

use navec::{Dataframe, PayloadType, Value, Vector, Whicher};
use num_complex::Complex64;

#[test]
fn round_trip_conversion_is_exact_per_type() {
    let ints = Vector::integer(vec![i64::MIN, -1, 0, 1, i64::MAX]);
    assert_eq!(
        ints.integers().unwrap().0,
        vec![i64::MIN, -1, 0, 1, i64::MAX]
    );

    let floats = Vector::float(vec![-1.5, 0.0, 3.25]);
    assert_eq!(floats.floats().unwrap().0, vec![-1.5, 0.0, 3.25]);

    let complexes = Vector::complex(vec![Complex64::new(1.5, -2.5)]);
    assert_eq!(
        complexes.complexes().unwrap().0,
        vec![Complex64::new(1.5, -2.5)]
    );

    let strings = Vector::string(vec!["a", "", "c"]);
    assert_eq!(
        strings.strings().unwrap().0,
        vec!["a".to_string(), String::new(), "c".to_string()]
    );

    let booleans = Vector::boolean(vec![true, false]);
    assert_eq!(booleans.booleans().unwrap().0, vec![true, false]);
}

#[test]
fn na_propagates_through_every_conversion() {
    let v = Vector::integer_with_na(vec![1, 2, 3], vec![false, true, false]);
    let expected = vec![false, true, false];

    assert_eq!(v.integers().unwrap().1, expected);
    assert_eq!(v.floats().unwrap().1, expected);
    assert_eq!(v.complexes().unwrap().1, expected);
    assert_eq!(v.booleans().unwrap().1, expected);
    assert_eq!(v.strings().unwrap().1, expected);
    assert_eq!(v.values().1, expected);
}

#[test]
fn adjust_recycling_law() {
    let v = Vector::integer(vec![4, 7]);
    for k in 1..=4 {
        let grown = v.adjust(2 * k);
        let expected: Vec<i64> = std::iter::repeat([4i64, 7])
            .take(k)
            .flatten()
            .collect();
        assert_eq!(grown.integers().unwrap().0, expected);
    }
}

#[test]
fn adjust_same_size_is_identity() {
    let v = Vector::string_with_na(vec!["a", "b", "c"], vec![false, true, false]);
    let out = v.adjust(3);
    assert_eq!(out.strings().unwrap(), v.strings().unwrap());
}

#[test]
fn append_length_law_holds_across_types() {
    let ints = Vector::integer(vec![1, 2, 3]);
    let strings = Vector::string(vec!["x"]);
    let times = Vector::time(vec![time::OffsetDateTime::UNIX_EPOCH]);
    let na = Vector::na_vector(4);

    assert_eq!(ints.append(&strings).len(), 4);
    assert_eq!(ints.append(&times).len(), 4);
    assert_eq!(strings.append(&ints).len(), 4);
    assert_eq!(na.append(&ints).len(), 7);
}

#[test]
fn coalesce_is_na_only_where_both_are_na() {
    let v = Vector::integer_with_na(vec![1, 0, 0, 4], vec![false, true, true, false]);
    let other = Vector::integer_with_na(vec![9, 9, 0, 9], vec![false, false, true, false]);
    let out = v.coalesce(&[other.clone()]);

    let self_na = v.is_na();
    let other_na = other.is_na();
    let out_na = out.is_na();
    for i in 0..v.len() {
        assert_eq!(out_na[i], self_na[i] && other_na[i], "position {}", i + 1);
    }
    assert_eq!(out.integers().unwrap().0, vec![1, 9, 0, 4]);
}

#[test]
fn groups_partition_every_index_exactly_once() {
    let v = Vector::string_with_na(
        vec!["a", "b", "a", "c", "b", ""],
        vec![false, false, false, false, false, true],
    );
    let (groups, values) = v.groups();

    let mut seen = vec![0usize; v.len()];
    for group in &groups {
        for &idx in group {
            seen[idx - 1] += 1;
        }
    }
    assert!(seen.iter().all(|&count| count == 1));
    assert_eq!(values.last(), Some(&Value::Na));
}

#[test]
fn sorted_indices_is_stable_permutation() {
    let v = Vector::integer_with_na(
        vec![3, 1, 3, 2, 0, 1],
        vec![false, false, false, false, true, false],
    );
    let indices = v.sorted_indices();

    let mut sorted_check = indices.clone();
    sorted_check.sort_unstable();
    assert_eq!(sorted_check, vec![1, 2, 3, 4, 5, 6]);

    // Values in non-decreasing order, NA trailing; ties keep original order.
    assert_eq!(indices, vec![2, 6, 4, 1, 3, 5]);
    let (data, na) = v.by_indices(&indices).integers().unwrap();
    assert_eq!(data[..5], [1, 1, 2, 3, 3]);
    assert_eq!(na, vec![false, false, false, false, false, true]);
}

#[test]
fn scenario_integer_na_ceil() {
    let v = Vector::integer_with_na(vec![1, 2, 0, 4, 5], vec![false, true, false, false, false]);
    let out = navec::math::ceil(&v);

    assert_eq!(out.type_tag(), PayloadType::Float);
    let (data, na) = out.floats().unwrap();
    assert_eq!(data[0], 1.0);
    assert!(data[1].is_nan());
    assert_eq!(data[2], 0.0);
    assert_eq!(data[4], 5.0);
    assert_eq!(na, vec![false, true, false, false, false]);
}

#[test]
fn scenario_recycling_to_seven() {
    let v = Vector::integer(vec![1, 2, 3]);
    assert_eq!(
        v.adjust(7).integers().unwrap().0,
        vec![1, 2, 3, 1, 2, 3, 1]
    );
}

#[test]
fn scenario_string_find() {
    let v = Vector::string(vec!["1", "2", "1", "4", "0"]);
    assert_eq!(v.find("4"), 4);
    assert_eq!(v.find(true), 0);
}

#[test]
fn scenario_grouped_sum_by_label() {
    let df = Dataframe::new(vec![
        Vector::integer(vec![100, 200, 200, 30, 30, 120, 140, 70]).named("value"),
        Vector::string(vec!["A", "B", "C", "A", "B", "D", "D", "D"]).named("label"),
    ]);

    let out = df
        .group_by(&["label"])
        .summarize(&[("value", &|v: &Vector| v.sum())]);

    let labels = out.column("label").expect("label column");
    assert_eq!(
        labels.strings().unwrap().0,
        vec!["A".to_string(), "B".into(), "C".into(), "D".into()]
    );
    let sums = out.column("value").expect("value column");
    assert_eq!(sums.integers().unwrap().0, vec![130, 230, 200, 330]);
}

#[test]
fn which_and_filter_agree() {
    let v = Vector::float(vec![0.5, 1.5, 2.5, 3.5]);
    let whicher = Whicher::float(&|val: &f64, _| *val > 1.0);
    let mask = v.which(&whicher);
    assert_eq!(mask, vec![false, true, true, true]);
    assert_eq!(v.filter(&mask).len(), v.filter(whicher).len());
}
