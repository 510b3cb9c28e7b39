//! bitmap-index: in-memory columnar bitmap index
//!
//! One bitmap per distinct value per column; multi-column equality queries
//! are answered by AND-ing bitmaps instead of scanning rows.

pub mod error;
pub mod index;
pub mod scan;
pub mod synthetic;
pub mod table;

pub use error::{Error, Result};
pub use index::{BitmapIndex, BitmapStore, Condition, Vocabulary};
pub use table::{Bitmap, Record, Value};
