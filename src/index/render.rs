//! Tab-separated dump of an index
//!
//! Header: one cell per (column, vocabulary value), `||` between columns.
//! Body: one line per row with the bit of every bitmap, then the record.

use super::BitmapIndex;
use std::fmt;

const CELL_END: &str = "\t \t|";

impl fmt::Display for BitmapIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for column in &self.columns {
            for value in column.vocabulary.iter() {
                write!(f, "{}{}", value, CELL_END)?;
            }
            f.write_str("|")?;
        }
        writeln!(f)?;

        for (row, record) in self.records.iter().enumerate() {
            for column in &self.columns {
                for bitmap in column.store.iter() {
                    write!(f, "{}{}", bitmap.get(row) as u8, CELL_END)?;
                }
                f.write_str("|")?;
            }
            writeln!(f, "{}", record)?;
        }
        Ok(())
    }
}
