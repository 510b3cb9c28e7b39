//! Linear-scan baselines
//!
//! Reference answers for the index: every record is compared directly,
//! no bitmaps involved.

use crate::index::Condition;
use crate::table::{Record, Value};

/// Positions of records whose full value sequence equals `values`
pub fn naive_search(records: &[Record], values: &[Value]) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, r)| r.values == values)
        .map(|(i, _)| i)
        .collect()
}

/// Positions of records satisfying every condition
///
/// Conditions on a column a record does not have never match.
pub fn scan(records: &[Record], conditions: &[Condition]) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, r)| {
            conditions
                .iter()
                .all(|c| r.values.get(c.column) == Some(&c.value))
        })
        .map(|(i, _)| i)
        .collect()
}
