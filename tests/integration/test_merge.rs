// Copyright © 2024 Pathway

use proptest::prelude::*;

use report_filter_engine::engine::merge::{
    merge_durations, merge_machine, merge_name, merge_name_with_histograms,
    merge_ranges, merge_report, merge_type,
};
use report_filter_engine::engine::{
    Histogram, Machine, RangeStat, Report, Semigroup, Stats, TransactionName, TransactionType,
};

use super::helpers::{links, name, name_with_histograms, transaction_type};

#[test]
fn test_merge_into_fresh_node_copies_stats() {
    let source = Stats {
        total_count: 12,
        fail_count: 3,
        sum: 240.0,
        sum2: 6000.0,
        min: Some(2.0),
        max: Some(90.0),
    };
    let mut target = Stats::default();
    target.plus_equals(&source);
    assert_eq!(target, source);
    assert!(Stats::default().is_zero());
    assert!(!target.is_zero());
}

#[test]
fn test_stats_extrema_and_derived_values() {
    let mut lhs = Stats {
        total_count: 2,
        fail_count: 1,
        sum: 10.0,
        sum2: 58.0,
        min: Some(3.0),
        max: Some(7.0),
    };
    let rhs = Stats {
        total_count: 2,
        fail_count: 0,
        sum: 10.0,
        sum2: 50.0,
        min: Some(5.0),
        max: Some(5.0),
    };
    lhs.plus_equals(&rhs);

    assert_eq!(lhs.total_count, 4);
    assert_eq!(lhs.fail_count, 1);
    assert_eq!(lhs.min, Some(3.0));
    assert_eq!(lhs.max, Some(7.0));
    assert!((lhs.avg() - 5.0).abs() < 1e-9);
    assert!((lhs.fail_percent() - 25.0).abs() < 1e-9);
    assert!((lhs.std() - 2f64.sqrt()).abs() < 1e-9);
    assert!(Stats::default().avg().abs() < f64::EPSILON);
}

#[test]
fn test_merge_is_additive_not_idempotent() {
    let source = Machine {
        stats: Stats::with_count(4),
        ..Machine::new("m1")
    };
    let mut target = Machine::new("ALL");
    merge_machine(&mut target, &source);
    merge_machine(&mut target, &source);
    assert_eq!(target.stats.total_count, 8);
    assert_eq!(source.stats.total_count, 4);
}

#[test]
fn test_merge_report_sums_counters() {
    let mut target = Report::new("cat");
    let source = Report {
        stats: Stats::with_count(3),
        ..Report::new("cat")
    };
    merge_report(&mut target, &source);
    merge_report(&mut target, &source);
    assert_eq!(target.stats.total_count, 6);
}

#[test]
fn test_merge_type_clears_links_and_keeps_children() {
    let mut target = transaction_type("T", 1, vec![name("N", 1)]);
    let source = transaction_type("T", 2, vec![name("M", 2)]);
    merge_type(&mut target, &source);

    assert_eq!(target.stats.total_count, 3);
    assert!(target.links.is_empty());
    assert_eq!(source.links, links("T"));
    assert_eq!(target.names.keys().map(|k| k.as_str()).collect::<Vec<_>>(), ["N"]);
}

#[test]
fn test_merge_name_leaves_histograms_alone() {
    let mut target = TransactionName::new("N");
    let source = name_with_histograms("N", 5, &[(1, 5)], &[]);
    merge_name(&mut target, &source);

    assert_eq!(target.stats.total_count, 5);
    assert!(target.links.is_empty());
    assert!(target.durations.is_empty());
}

#[test]
fn test_histograms_merge_as_key_union() {
    let mut durations: Histogram<u64> = [(1, 2), (3, 4)].into_iter().collect();
    let other: Histogram<u64> = [(3, 1), (7, 9)].into_iter().collect();
    merge_durations(&mut durations, &other);
    assert_eq!(
        durations.iter().map(|(k, v)| (k, *v)).collect::<Vec<_>>(),
        vec![(1, 2), (3, 5), (7, 9)]
    );

    let mut ranges: Histogram<RangeStat> = [(0, RangeStat::new(1, 0, 5.0))].into_iter().collect();
    let other: Histogram<RangeStat> = [
        (0, RangeStat::new(2, 1, 15.0)),
        (1, RangeStat::new(1, 1, 3.0)),
    ]
    .into_iter()
    .collect();
    merge_ranges(&mut ranges, &other);
    assert_eq!(ranges.get(0), Some(&RangeStat::new(3, 1, 20.0)));
    assert_eq!(ranges.get(1), Some(&RangeStat::new(1, 1, 3.0)));
    assert_eq!(ranges.len(), 2);
}

#[test]
fn test_merge_name_with_histograms() {
    let mut target = name_with_histograms("N", 1, &[(1, 1)], &[(2, RangeStat::new(1, 0, 1.0))]);
    let source = name_with_histograms("N", 2, &[(1, 2)], &[(2, RangeStat::new(2, 2, 4.0))]);
    merge_name_with_histograms(&mut target, &source);

    assert_eq!(target.stats.total_count, 3);
    assert_eq!(target.durations.get(1), Some(&3));
    assert_eq!(target.ranges.get(2), Some(&RangeStat::new(3, 2, 5.0)));
    assert!(target.links.is_empty());
}

fn small_float() -> impl Strategy<Value = f64> {
    (0u32..10_000).prop_map(f64::from)
}

fn arb_stats() -> impl Strategy<Value = Stats> {
    (
        0u64..1_000,
        0u64..1_000,
        small_float(),
        small_float(),
        proptest::option::of(small_float()),
        proptest::option::of(small_float()),
    )
        .prop_map(|(total_count, fail_count, sum, sum2, min, max)| Stats {
            total_count,
            fail_count,
            sum,
            sum2,
            min,
            max,
        })
}

fn arb_durations() -> impl Strategy<Value = Histogram<u64>> {
    proptest::collection::btree_map(0u32..8, 0u64..100, 0..6)
        .prop_map(|buckets| buckets.into_iter().collect())
}

fn arb_ranges() -> impl Strategy<Value = Histogram<RangeStat>> {
    proptest::collection::btree_map(
        0u32..8,
        (0u64..100, 0u64..10, small_float())
            .prop_map(|(count, fails, sum)| RangeStat::new(count, fails, sum)),
        0..6,
    )
    .prop_map(|buckets| buckets.into_iter().collect())
}

fn arb_name() -> impl Strategy<Value = TransactionName> {
    (arb_stats(), arb_durations(), arb_ranges()).prop_map(|(stats, durations, ranges)| {
        TransactionName {
            stats,
            durations,
            ranges,
            ..TransactionName::new("N")
        }
    })
}

fn merged(parts: &[&TransactionName]) -> TransactionName {
    let mut result = TransactionName::new("N");
    for part in parts {
        merge_name_with_histograms(&mut result, part);
    }
    result
}

proptest! {
    #[test]
    fn test_name_merge_is_commutative_and_associative(
        a in arb_name(),
        b in arb_name(),
        c in arb_name(),
    ) {
        let abc = merged(&[&a, &b, &c]);
        prop_assert_eq!(&abc, &merged(&[&c, &a, &b]));
        prop_assert_eq!(&abc, &merged(&[&b, &c, &a]));

        let bc = merged(&[&b, &c]);
        prop_assert_eq!(&abc, &merged(&[&a, &bc]));
        let ab = merged(&[&a, &b]);
        prop_assert_eq!(&abc, &merged(&[&ab, &c]));
    }

    #[test]
    fn test_type_merge_is_commutative(a in arb_stats(), b in arb_stats()) {
        let lhs = TransactionType { stats: a, ..TransactionType::new("T") };
        let rhs = TransactionType { stats: b, ..TransactionType::new("T") };

        let mut left_first = TransactionType::new("T");
        merge_type(&mut left_first, &lhs);
        merge_type(&mut left_first, &rhs);
        let mut right_first = TransactionType::new("T");
        merge_type(&mut right_first, &rhs);
        merge_type(&mut right_first, &lhs);

        prop_assert_eq!(left_first, right_first);
    }
}
