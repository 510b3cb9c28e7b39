//! Core row and bitmap types

pub mod bitmap;
pub mod record;

pub use bitmap::Bitmap;
pub use record::{Record, Value};
