//! Distinct values of one column, in first-occurrence order

use crate::table::Value;
use std::collections::HashMap;

/// Ordered set of the values seen in a column
///
/// `values` fixes the iteration (and rendering) order; `lookup` resolves a
/// value to its entry in O(1) expected time. Entries are never removed.
#[derive(Clone, Debug, Default)]
pub struct Vocabulary {
    values: Vec<Value>,
    lookup: HashMap<Value, usize>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Entry index of `value`, if it was ever seen
    #[inline]
    pub fn index_of(&self, value: &Value) -> Option<usize> {
        self.lookup.get(value).copied()
    }

    /// Value stored at entry `index`
    pub fn value(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Entry index of `value`, appending it when unseen
    ///
    /// The flag is true when a new entry was created.
    pub fn insert(&mut self, value: &Value) -> (usize, bool) {
        if let Some(&index) = self.lookup.get(value) {
            return (index, false);
        }
        let index = self.values.len();
        self.values.push(value.clone());
        self.lookup.insert(value.clone(), index);
        (index, true)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }
}
