use crate::table::Value;
use thiserror::Error;

/// Errors returned by [`crate::BitmapIndex`] operations
///
/// Every variant is a caller-input error. A failed operation leaves the
/// index untouched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("cannot build an index from an empty table")]
    EmptyTable,
    #[error("record has {actual} values, index has {expected} columns")]
    SchemaMismatch { expected: usize, actual: usize },
    #[error("value {value} was never indexed in column {column}")]
    UnknownValue { column: usize, value: Value },
    #[error("column {column} out of range ({columns} columns)")]
    ColumnOutOfRange { column: usize, columns: usize },
    #[error("row position {position} out of range ({rows} rows)")]
    PositionOutOfRange { position: usize, rows: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
