//! Bitmap index engine
//!
//! Owns the record table and, per column, a [`Vocabulary`] plus a
//! [`BitmapStore`]. Equality conditions resolve to bitmaps through the
//! vocabulary and are combined with a word-wise AND.
//!
//! Two invariants hold after every operation:
//! - one-hot: each row has exactly one set bit per column
//! - length: every bitmap has exactly `row_count()` bits
//!
//! Queries return row positions. Positions shift down on delete, so a
//! result is only meaningful until the next mutation.

pub mod render;
pub mod store;
pub mod vocabulary;

pub use store::BitmapStore;
pub use vocabulary::Vocabulary;

use crate::error::{Error, Result};
use crate::table::{Bitmap, Record, Value};
use tracing::{debug, trace};

/// Equality condition on one column
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Condition {
    pub column: usize,
    pub value: Value,
}

impl Condition {
    pub fn new(column: usize, value: impl Into<Value>) -> Self {
        Self {
            column,
            value: value.into(),
        }
    }
}

impl<V: Into<Value>> From<(usize, V)> for Condition {
    fn from((column, value): (usize, V)) -> Self {
        Condition::new(column, value)
    }
}

/// Vocabulary and bitmaps of one column
#[derive(Clone, Debug, Default)]
struct ColumnIndex {
    vocabulary: Vocabulary,
    store: BitmapStore,
}

impl ColumnIndex {
    /// Append one row holding `value`, growing the vocabulary if needed
    ///
    /// Returns true when `value` created a new entry.
    fn push(&mut self, value: &Value) -> bool {
        let (entry, created) = self.vocabulary.insert(value);
        if created {
            self.store.add_entry();
        }
        self.store.push_row(entry);
        created
    }
}

/// In-memory bitmap index over a table of records
///
/// Single writer: mutations take `&mut self`, so no query result borrowed
/// from the index can outlive an append or delete.
#[derive(Clone, Debug)]
pub struct BitmapIndex {
    records: Vec<Record>,
    columns: Vec<ColumnIndex>,
}

impl BitmapIndex {
    /// Build the index from a non-empty table
    ///
    /// Every record must have as many values as the first one. Vocabulary
    /// entries are created in first-occurrence order, row by row.
    pub fn build(records: Vec<Record>) -> Result<Self> {
        let first = records.first().ok_or(Error::EmptyTable)?;
        let expected = first.col_count();
        if let Some(bad) = records.iter().find(|r| r.col_count() != expected) {
            return Err(Error::SchemaMismatch {
                expected,
                actual: bad.col_count(),
            });
        }

        let mut columns = vec![ColumnIndex::default(); expected];
        for record in &records {
            for (column, value) in columns.iter_mut().zip(record.values.iter()) {
                column.push(value);
            }
        }

        debug!(
            rows = records.len(),
            columns = expected,
            entries = columns.iter().map(|c| c.vocabulary.len()).sum::<usize>(),
            "built bitmap index"
        );
        Ok(Self { records, columns })
    }

    #[inline]
    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Records in row-position order
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn record(&self, position: usize) -> Option<&Record> {
        self.records.get(position)
    }

    pub fn vocabulary(&self, column: usize) -> Option<&Vocabulary> {
        self.columns.get(column).map(|c| &c.vocabulary)
    }

    /// Bitmap of rows holding `value` in `column`
    pub fn bitmap(&self, column: usize, value: &Value) -> Option<&Bitmap> {
        let column = self.columns.get(column)?;
        let entry = column.vocabulary.index_of(value)?;
        column.store.bitmap(entry)
    }

    /// Current position of the first row carrying identifier `id`
    ///
    /// Linear in the row count. Resolve identifiers here before calling
    /// [`BitmapIndex::delete`], which only takes positions.
    pub fn position_of(&self, id: u64) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }

    /// Bitmap of rows satisfying every condition
    ///
    /// An empty condition list matches every row.
    pub fn matching(&self, conditions: &[Condition]) -> Result<Bitmap> {
        let mut acc = Bitmap::new_all_set(self.row_count());
        for cond in conditions {
            let column = self
                .columns
                .get(cond.column)
                .ok_or(Error::ColumnOutOfRange {
                    column: cond.column,
                    columns: self.columns.len(),
                })?;
            let bitmap = column
                .vocabulary
                .index_of(&cond.value)
                .and_then(|entry| column.store.bitmap(entry))
                .ok_or_else(|| Error::UnknownValue {
                    column: cond.column,
                    value: cond.value.clone(),
                })?;
            acc.and_assign(bitmap);
        }
        Ok(acc)
    }

    /// Row positions satisfying every condition, ascending
    pub fn get(&self, conditions: &[Condition]) -> Result<Vec<usize>> {
        let acc = self.matching(conditions)?;
        Ok(acc.iter_ones().collect())
    }

    /// Append a record at the end of the table
    ///
    /// Returns the new row position. Unseen values get a new vocabulary
    /// entry whose bitmap is clear for every earlier row.
    pub fn append(&mut self, record: Record) -> Result<usize> {
        if record.col_count() != self.columns.len() {
            return Err(Error::SchemaMismatch {
                expected: self.columns.len(),
                actual: record.col_count(),
            });
        }

        let position = self.records.len();
        for (i, (column, value)) in self.columns.iter_mut().zip(record.values.iter()).enumerate() {
            if column.push(value) {
                debug!(column = i, %value, entries = column.vocabulary.len(), "new vocabulary entry");
            }
        }
        trace!(id = record.id, position, "appended row");
        self.records.push(record);
        Ok(position)
    }

    /// Remove the row at `position`, shifting later rows down by one
    ///
    /// Vocabulary entries are kept even when no row holds them any more.
    pub fn delete(&mut self, position: usize) -> Result<Record> {
        if position >= self.records.len() {
            return Err(Error::PositionOutOfRange {
                position,
                rows: self.records.len(),
            });
        }

        for column in &mut self.columns {
            column.store.remove_row(position);
        }
        let record = self.records.remove(position);
        trace!(id = record.id, position, "deleted row");
        Ok(record)
    }

    /// Textual dump of the index, same as the `Display` output
    pub fn render(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BitmapIndex {
        BitmapIndex::build(vec![
            Record::new(1, ["a", "A"]),
            Record::new(2, ["b", "A"]),
            Record::new(3, ["a", "B"]),
        ])
        .unwrap()
    }

    fn cond(column: usize, value: &str) -> Condition {
        Condition::new(column, value)
    }

    #[test]
    fn test_build_vocabulary_order() {
        let index = sample();
        assert_eq!(index.row_count(), 3);
        assert_eq!(index.column_count(), 2);
        let col1: Vec<String> = index.vocabulary(1).unwrap().iter().map(|v| v.to_string()).collect();
        assert_eq!(col1, vec!["A", "B"]);
        assert!(index.vocabulary(2).is_none());
    }

    #[test]
    fn test_build_errors() {
        assert_eq!(BitmapIndex::build(vec![]).unwrap_err(), Error::EmptyTable);
        let err = BitmapIndex::build(vec![Record::new(1, ["a", "A"]), Record::new(2, ["b"])]).unwrap_err();
        assert_eq!(err, Error::SchemaMismatch { expected: 2, actual: 1 });
    }

    #[test]
    fn test_get_single_and_conjunctive() {
        let index = sample();
        assert_eq!(index.get(&[cond(0, "a")]).unwrap(), vec![0, 2]);
        assert_eq!(index.get(&[cond(0, "a"), cond(1, "A")]).unwrap(), vec![0]);
        assert_eq!(index.get(&[cond(0, "b"), cond(1, "B")]).unwrap(), Vec::<usize>::new());
        assert_eq!(index.get(&[]).unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_get_unknown_value() {
        let index = sample();
        let err = index.get(&[cond(0, "z")]).unwrap_err();
        assert_eq!(err, Error::UnknownValue { column: 0, value: Value::from("z") });
        // Known in another column only
        assert!(matches!(index.get(&[cond(0, "A")]), Err(Error::UnknownValue { .. })));
        assert_eq!(
            index.get(&[cond(5, "a")]).unwrap_err(),
            Error::ColumnOutOfRange { column: 5, columns: 2 }
        );
    }

    #[test]
    fn test_append_and_delete_scenario() {
        let mut index = sample();
        assert_eq!(index.append(Record::new(4, ["a", "A"])).unwrap(), 3);
        assert_eq!(index.get(&[cond(0, "a")]).unwrap(), vec![0, 2, 3]);

        let removed = index.delete(2).unwrap();
        assert_eq!(removed.id, 3);
        assert_eq!(index.get(&[cond(0, "a")]).unwrap(), vec![0, 2]);
        assert_eq!(index.record(2).unwrap().id, 4);
    }

    #[test]
    fn test_append_new_value() {
        let mut index = sample();
        index.append(Record::new(4, ["C", "D"])).unwrap();
        let bm = index.bitmap(0, &Value::from("C")).unwrap();
        assert_eq!(bm.len(), 4);
        assert_eq!(bm.iter_ones().collect::<Vec<_>>(), vec![3]);
        assert_eq!(index.bitmap(0, &Value::from("a")).unwrap().len(), 4);
        assert_eq!(index.get(&[cond(0, "C"), cond(1, "D")]).unwrap(), vec![3]);
    }

    #[test]
    fn test_append_schema_mismatch_leaves_index_untouched() {
        let mut index = sample();
        let err = index.append(Record::new(9, ["new", "X", "extra"])).unwrap_err();
        assert_eq!(err, Error::SchemaMismatch { expected: 2, actual: 3 });
        assert_eq!(index.row_count(), 3);
        assert!(index.vocabulary(0).unwrap().index_of(&Value::from("new")).is_none());
    }

    #[test]
    fn test_delete_out_of_range() {
        let mut index = sample();
        assert_eq!(index.delete(3).unwrap_err(), Error::PositionOutOfRange { position: 3, rows: 3 });
        assert_eq!(index.row_count(), 3);
    }

    #[test]
    fn test_delete_keeps_vocabulary() {
        let mut index = sample();
        index.delete(1).unwrap();
        assert_eq!(index.get(&[cond(0, "b")]).unwrap(), Vec::<usize>::new());
        assert_eq!(index.vocabulary(0).unwrap().len(), 2);
    }

    #[test]
    fn test_delete_every_row() {
        let mut index = sample();
        for _ in 0..3 {
            index.delete(0).unwrap();
        }
        assert_eq!(index.row_count(), 0);
        assert_eq!(index.get(&[]).unwrap(), Vec::<usize>::new());
        assert_eq!(index.get(&[cond(0, "a")]).unwrap(), Vec::<usize>::new());

        assert_eq!(index.append(Record::new(10, ["b", "B"])).unwrap(), 0);
        assert_eq!(index.get(&[cond(0, "b")]).unwrap(), vec![0]);
    }

    #[test]
    fn test_position_of() {
        let mut index = sample();
        index.append(Record::new(4, ["a", "A"])).unwrap();
        index.delete(0).unwrap();
        assert_eq!(index.position_of(4), Some(2));
        assert_eq!(index.position_of(1), None);
    }

    #[test]
    fn test_mixed_value_types() {
        let index = BitmapIndex::build(vec![
            Record { id: 1, values: vec!["x".into(), true.into(), 1i64.into()] },
            Record { id: 2, values: vec!["x".into(), false.into(), 2i64.into()] },
        ])
        .unwrap();
        assert_eq!(index.get(&[Condition::new(1, false)]).unwrap(), vec![1]);
        assert_eq!(index.get(&[Condition::from((2, 1i64)), Condition::from((0, "x"))]).unwrap(), vec![0]);
        assert!(index.get(&[Condition::new(2, "1")]).is_err());
    }
}
