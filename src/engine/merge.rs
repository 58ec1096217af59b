// Copyright © 2024 Pathway

//! Additive merging of report statistics.
//!
//! Every function here folds `source` into `target` and leaves `source` untouched.
//! Merging is commutative and associative, and merging into a freshly created node
//! yields a copy of the source's statistics. It is a plain addition, so merging the
//! same source twice counts it twice.
//!
//! Child collections are never touched: structural decisions belong to the
//! traversals in [`crate::engine::screen`] and [`crate::engine::tailor`].

use super::model::{
    Histogram, Machine, RangeStat, Report, Stats, TransactionName, TransactionType,
};

/// A type with an associative, commutative addition and a test for zero.
pub trait Semigroup {
    fn plus_equals(&mut self, rhs: &Self);

    fn is_zero(&self) -> bool;
}

impl Semigroup for u64 {
    #[inline]
    fn plus_equals(&mut self, rhs: &Self) {
        *self += rhs;
    }

    #[inline]
    fn is_zero(&self) -> bool {
        *self == 0
    }
}

fn combine_extremum(lhs: Option<f64>, rhs: Option<f64>, pick: fn(f64, f64) -> f64) -> Option<f64> {
    match (lhs, rhs) {
        (Some(lhs), Some(rhs)) => Some(pick(lhs, rhs)),
        (lhs, rhs) => lhs.or(rhs),
    }
}

impl Semigroup for Stats {
    fn plus_equals(&mut self, rhs: &Self) {
        self.total_count.plus_equals(&rhs.total_count);
        self.fail_count.plus_equals(&rhs.fail_count);
        self.sum += rhs.sum;
        self.sum2 += rhs.sum2;
        self.min = combine_extremum(self.min, rhs.min, f64::min);
        self.max = combine_extremum(self.max, rhs.max, f64::max);
    }

    #[allow(clippy::float_cmp)]
    fn is_zero(&self) -> bool {
        self.total_count.is_zero()
            && self.fail_count.is_zero()
            && self.sum == 0.0
            && self.sum2 == 0.0
            && self.min.is_none()
            && self.max.is_none()
    }
}

impl Semigroup for RangeStat {
    fn plus_equals(&mut self, rhs: &Self) {
        self.count.plus_equals(&rhs.count);
        self.fails.plus_equals(&rhs.fails);
        self.sum += rhs.sum;
    }

    #[allow(clippy::float_cmp)]
    fn is_zero(&self) -> bool {
        self.count.is_zero() && self.fails.is_zero() && self.sum == 0.0
    }
}

impl<V: Semigroup + Default> Semigroup for Histogram<V> {
    fn plus_equals(&mut self, rhs: &Self) {
        for (bucket, value) in rhs.iter() {
            self.entry_or_default(bucket).plus_equals(value);
        }
    }

    fn is_zero(&self) -> bool {
        self.iter().all(|(_bucket, value)| value.is_zero())
    }
}

pub fn merge_report(target: &mut Report, source: &Report) {
    target.stats.plus_equals(&source.stats);
}

pub fn merge_machine(target: &mut Machine, source: &Machine) {
    target.stats.plus_equals(&source.stats);
}

/// Sums the type counters; the merged node no longer points at a single sample,
/// so its links are dropped.
pub fn merge_type(target: &mut TransactionType, source: &TransactionType) {
    target.stats.plus_equals(&source.stats);
    target.links.clear();
}

/// Sums the name counters and drops the links. Histograms are merged separately
/// with [`merge_durations`] and [`merge_ranges`].
pub fn merge_name(target: &mut TransactionName, source: &TransactionName) {
    target.stats.plus_equals(&source.stats);
    target.links.clear();
}

pub fn merge_durations(target: &mut Histogram<u64>, source: &Histogram<u64>) {
    target.plus_equals(source);
}

pub fn merge_ranges(target: &mut Histogram<RangeStat>, source: &Histogram<RangeStat>) {
    target.plus_equals(source);
}

/// [`merge_name`] followed by both histogram merges.
pub fn merge_name_with_histograms(target: &mut TransactionName, source: &TransactionName) {
    merge_name(target, source);
    merge_durations(&mut target.durations, &source.durations);
    merge_ranges(&mut target.ranges, &source.ranges);
}
