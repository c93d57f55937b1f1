//! Grouping and reduction primitives over the transactions table.
//!
//! Every aggregation in the report is one of these shapes: group by a
//! key, then sum a value, count rows, or take the share of rows with a
//! negative value. Group keys come back sorted, so repeated runs over
//! the same table produce identical output.

use crate::models::Transaction;
use std::collections::BTreeMap;

/// Sum `value` over rows grouped by `key`.
pub fn sum_by<K, FK, FV>(rows: &[Transaction], key: FK, value: FV) -> Vec<(K, f64)>
where
    K: Ord,
    FK: Fn(&Transaction) -> K,
    FV: Fn(&Transaction) -> f64,
{
    let mut groups: BTreeMap<K, f64> = BTreeMap::new();
    for row in rows {
        *groups.entry(key(row)).or_insert(0.0) += value(row);
    }
    groups.into_iter().collect()
}

/// Count rows grouped by `key`.
#[allow(dead_code)] // Companion primitive to sum_by, used in tests
pub fn count_by<K, FK>(rows: &[Transaction], key: FK) -> Vec<(K, usize)>
where
    K: Ord,
    FK: Fn(&Transaction) -> K,
{
    let mut groups: BTreeMap<K, usize> = BTreeMap::new();
    for row in rows {
        *groups.entry(key(row)).or_insert(0) += 1;
    }
    groups.into_iter().collect()
}

/// Per group, the share of rows whose `value` is negative, as a
/// percentage of all rows in the group. A group with no negative rows
/// yields 0.0.
pub fn negative_share_by<K, FK, FV>(rows: &[Transaction], key: FK, value: FV) -> Vec<(K, f64)>
where
    K: Ord,
    FK: Fn(&Transaction) -> K,
    FV: Fn(&Transaction) -> f64,
{
    let mut groups: BTreeMap<K, (usize, usize)> = BTreeMap::new();
    for row in rows {
        let entry = groups.entry(key(row)).or_insert((0, 0));
        entry.0 += 1;
        if value(row) < 0.0 {
            entry.1 += 1;
        }
    }

    groups
        .into_iter()
        .map(|(key, (total, negative))| (key, negative as f64 / total as f64 * 100.0))
        .collect()
}

/// Sum `value` over the whole table.
#[allow(dead_code)] // Companion primitive to sum_by, used in tests
pub fn total<FV>(rows: &[Transaction], value: FV) -> f64
where
    FV: Fn(&Transaction) -> f64,
{
    rows.iter().map(value).sum()
}
