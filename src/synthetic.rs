//! Synthetic categorical dataset
//!
//! Cartesian product of four small alphabets, enumerated as nested loops
//! with the last column varying fastest:
//! - column 0: every char in `'A'..='z'` (58 code points)
//! - column 1: every char in `'A'..='z'`
//! - column 2: a decimal digit
//! - column 3: one of `True`, `False`, `Maybe`, `None`

use crate::table::{Record, Value};

const LABELS: [&str; 4] = ["True", "False", "Maybe", "None"];
const LETTERS: u32 = 'z' as u32 - 'A' as u32 + 1;
const DIGITS: u32 = 10;

/// Total number of distinct records in the product
pub const CARTESIAN_SIZE: usize = (LETTERS * LETTERS * DIGITS) as usize * LABELS.len();

/// Iterator over the product, ids counting from 0
#[derive(Clone, Debug, Default)]
pub struct CartesianRecords {
    next: usize,
}

impl CartesianRecords {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Iterator for CartesianRecords {
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        if self.next >= CARTESIAN_SIZE {
            return None;
        }
        let id = self.next;
        self.next += 1;

        let labels = LABELS.len();
        let label = LABELS[id % labels];
        let rest = (id / labels) as u32;
        let digit = rest % DIGITS;
        let rest = rest / DIGITS;
        let second = rest % LETTERS;
        let first = rest / LETTERS;

        let letter = |offset: u32| char::from_u32('A' as u32 + offset).map(Value::from);
        let values = vec![
            letter(first)?,
            letter(second)?,
            Value::from(char::from_digit(digit, 10)?),
            Value::from(label),
        ];
        Some(Record { id: id as u64, values })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = CARTESIAN_SIZE - self.next;
        (left, Some(left))
    }
}

/// First `limit` records of the product (fewer if the product is smaller)
pub fn cartesian_records(limit: usize) -> Vec<Record> {
    CartesianRecords::new().take(limit).collect()
}
