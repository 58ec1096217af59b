// Copyright © 2024 Pathway

//! The transaction report tree.
//!
//! A [`Report`] owns two parallel breakdowns of the same traffic: the machine tree
//! (machine -> transaction type -> transaction name) and the business-dimension
//! tree (type domain -> name domain -> business unit). Children are always
//! addressed by id; insertion order is preserved.

#![allow(clippy::module_name_repetitions)]

use std::collections::BTreeMap;

use arcstr::ArcStr;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Machine id of the cross-machine aggregate.
pub const ALL: &str = "ALL";

pub type Children<T> = IndexMap<ArcStr, T>;

/// Scalar counters carried by every statistical node.
///
/// `min` and `max` are `None` until at least one sample has been seen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub total_count: u64,
    pub fail_count: u64,
    pub sum: f64,
    pub sum2: f64,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Stats {
    pub fn with_count(total_count: u64) -> Self {
        Self {
            total_count,
            ..Self::default()
        }
    }

    #[allow(clippy::cast_precision_loss)]
    pub fn avg(&self) -> f64 {
        if self.total_count == 0 {
            0.0
        } else {
            self.sum / self.total_count as f64
        }
    }

    #[allow(clippy::cast_precision_loss)]
    pub fn fail_percent(&self) -> f64 {
        if self.total_count == 0 {
            0.0
        } else {
            self.fail_count as f64 * 100.0 / self.total_count as f64
        }
    }

    #[allow(clippy::cast_precision_loss)]
    pub fn std(&self) -> f64 {
        if self.total_count == 0 {
            return 0.0;
        }
        let count = self.total_count as f64;
        let avg = self.sum / count;
        (self.sum2 / count - avg * avg).max(0.0).sqrt()
    }
}

/// Links to a single representative raw sample. Display-only: they stop meaning
/// anything once two nodes are merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleLinks {
    pub success: Option<String>,
    pub fail: Option<String>,
    pub slowest: Option<String>,
}

impl SampleLinks {
    pub fn clear(&mut self) {
        self.success = None;
        self.fail = None;
        self.slowest = None;
    }

    pub fn is_empty(&self) -> bool {
        self.success.is_none() && self.fail.is_none() && self.slowest.is_none()
    }
}

/// Ordered bucket-id -> value distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Histogram<V> {
    buckets: BTreeMap<u32, V>,
}

impl<V> Default for Histogram<V> {
    fn default() -> Self {
        Self {
            buckets: BTreeMap::new(),
        }
    }
}

impl<V> Histogram<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, bucket: u32) -> Option<&V> {
        self.buckets.get(&bucket)
    }

    pub fn insert(&mut self, bucket: u32, value: V) -> Option<V> {
        self.buckets.insert(bucket, value)
    }

    pub fn entry_or_default(&mut self, bucket: u32) -> &mut V
    where
        V: Default,
    {
        self.buckets.entry(bucket).or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &V)> {
        self.buckets.iter().map(|(bucket, value)| (*bucket, value))
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn clear(&mut self) {
        self.buckets.clear();
    }
}

impl<V> FromIterator<(u32, V)> for Histogram<V> {
    fn from_iter<I: IntoIterator<Item = (u32, V)>>(iter: I) -> Self {
        Self {
            buckets: iter.into_iter().collect(),
        }
    }
}

/// One bucket of the range histogram.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RangeStat {
    pub count: u64,
    pub fails: u64,
    pub sum: f64,
}

impl RangeStat {
    pub fn new(count: u64, fails: u64, sum: f64) -> Self {
        Self { count, fails, sum }
    }
}

macro_rules! child_accessors {
    ($field:ident, $ty:ty, $find:ident, $find_mut:ident, $find_or_create:ident, $add:ident) => {
        pub fn $find(&self, id: &str) -> Option<&$ty> {
            self.$field.get(id)
        }

        pub fn $find_mut(&mut self, id: &str) -> Option<&mut $ty> {
            self.$field.get_mut(id)
        }

        pub fn $find_or_create(&mut self, id: &ArcStr) -> &mut $ty {
            self.$field
                .entry(id.clone())
                .or_insert_with(|| <$ty>::new(id.clone()))
        }

        /// Inserts `child`, replacing any sibling with the same id.
        pub fn $add(&mut self, child: $ty) {
            self.$field.insert(child.id.clone(), child);
        }
    };
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub domain: ArcStr,
    #[serde(default)]
    pub stats: Stats,
    #[serde(default)]
    pub machines: Children<Machine>,
    #[serde(default)]
    pub type_domains: Children<TypeDomain>,
}

impl Report {
    pub fn new(domain: impl Into<ArcStr>) -> Self {
        Self {
            domain: domain.into(),
            ..Self::default()
        }
    }

    child_accessors!(
        machines,
        Machine,
        find_machine,
        find_machine_mut,
        find_or_create_machine,
        add_machine
    );

    child_accessors!(
        type_domains,
        TypeDomain,
        find_type_domain,
        find_type_domain_mut,
        find_or_create_type_domain,
        add_type_domain
    );
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Machine {
    pub id: ArcStr,
    #[serde(default)]
    pub stats: Stats,
    #[serde(default)]
    pub types: Children<TransactionType>,
}

impl Machine {
    pub fn new(id: impl Into<ArcStr>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn is_all(&self) -> bool {
        self.id.as_str() == ALL
    }

    child_accessors!(
        types,
        TransactionType,
        find_type,
        find_type_mut,
        find_or_create_type,
        add_type
    );
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionType {
    pub id: ArcStr,
    #[serde(default)]
    pub stats: Stats,
    #[serde(default)]
    pub links: SampleLinks,
    #[serde(default)]
    pub names: Children<TransactionName>,
}

impl TransactionType {
    pub fn new(id: impl Into<ArcStr>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    child_accessors!(
        names,
        TransactionName,
        find_name,
        find_name_mut,
        find_or_create_name,
        add_name
    );
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionName {
    pub id: ArcStr,
    #[serde(default)]
    pub stats: Stats,
    #[serde(default)]
    pub links: SampleLinks,
    #[serde(default)]
    pub durations: Histogram<u64>,
    #[serde(default)]
    pub ranges: Histogram<RangeStat>,
}

impl TransactionName {
    pub fn new(id: impl Into<ArcStr>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}

/// Business-dimension root for one transaction type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeDomain {
    pub id: ArcStr,
    #[serde(default)]
    pub bus: Children<Bu>,
    #[serde(default)]
    pub name_domains: Children<NameDomain>,
}

impl TypeDomain {
    pub fn new(id: impl Into<ArcStr>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    child_accessors!(bus, Bu, find_bu, find_bu_mut, find_or_create_bu, add_bu);

    child_accessors!(
        name_domains,
        NameDomain,
        find_name_domain,
        find_name_domain_mut,
        find_or_create_name_domain,
        add_name_domain
    );
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NameDomain {
    pub id: ArcStr,
    #[serde(default)]
    pub bus: Children<Bu>,
}

impl NameDomain {
    pub fn new(id: impl Into<ArcStr>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    child_accessors!(bus, Bu, find_bu, find_bu_mut, find_or_create_bu, add_bu);
}

/// Business-unit record, keyed by machine or business-unit id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bu {
    pub id: ArcStr,
    #[serde(default)]
    pub stats: Stats,
}

impl Bu {
    pub fn new(id: impl Into<ArcStr>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}
