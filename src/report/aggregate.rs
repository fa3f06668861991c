//! Group-by helpers over sales rows.
//!
//! Groups come back in ascending key order (`BTreeMap`), which is also the
//! order the charts display them in.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::domain::SalesRecord;

/// `f64` grouping key ordered with `total_cmp` so it can live in a `BTreeMap`.
#[derive(Debug, Clone, Copy)]
pub struct FloatKey(pub f64);

impl PartialEq for FloatKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatKey {}

impl PartialOrd for FloatKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Accumulator {
    sum: f64,
    count: usize,
}

fn accumulate<'a, K, I, FK, FV>(rows: I, key: FK, value: FV) -> BTreeMap<K, Accumulator>
where
    K: Ord,
    I: IntoIterator<Item = &'a SalesRecord>,
    FK: Fn(&SalesRecord) -> K,
    FV: Fn(&SalesRecord) -> f64,
{
    let mut groups: BTreeMap<K, Accumulator> = BTreeMap::new();
    for row in rows {
        let acc = groups.entry(key(row)).or_default();
        acc.sum += value(row);
        acc.count += 1;
    }
    groups
}

/// Sum of `value` per group.
pub fn group_sum<'a, K, I, FK, FV>(rows: I, key: FK, value: FV) -> BTreeMap<K, f64>
where
    K: Ord,
    I: IntoIterator<Item = &'a SalesRecord>,
    FK: Fn(&SalesRecord) -> K,
    FV: Fn(&SalesRecord) -> f64,
{
    accumulate(rows, key, value)
        .into_iter()
        .map(|(k, acc)| (k, acc.sum))
        .collect()
}

/// Arithmetic mean of `value` per group.
pub fn group_mean<'a, K, I, FK, FV>(rows: I, key: FK, value: FV) -> BTreeMap<K, f64>
where
    K: Ord,
    I: IntoIterator<Item = &'a SalesRecord>,
    FK: Fn(&SalesRecord) -> K,
    FV: Fn(&SalesRecord) -> f64,
{
    accumulate(rows, key, value)
        .into_iter()
        .map(|(k, acc)| (k, acc.sum / acc.count as f64))
        .collect()
}
