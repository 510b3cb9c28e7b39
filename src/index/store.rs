//! Per-column bitmap store
//!
//! Holds one bitmap per vocabulary entry of a column. Every bitmap is
//! exactly `rows` bits long, and each row has exactly one set bit across
//! the store (one-hot).

use crate::table::Bitmap;

#[derive(Clone, Debug, Default)]
pub struct BitmapStore {
    bitmaps: Vec<Bitmap>,
    rows: usize,
}

impl BitmapStore {
    /// Create a store with no rows and no entries
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of bitmaps (= vocabulary entries)
    #[inline]
    pub fn len(&self) -> usize {
        self.bitmaps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bitmaps.is_empty()
    }

    /// Add the bitmap for a new vocabulary entry
    ///
    /// No existing row holds the new value, so it starts all clear.
    pub fn add_entry(&mut self) -> usize {
        self.bitmaps.push(Bitmap::new_all_clear(self.rows));
        self.bitmaps.len() - 1
    }

    /// Append a row holding entry `hot`
    pub fn push_row(&mut self, hot: usize) {
        debug_assert!(hot < self.bitmaps.len());
        for (entry, bitmap) in self.bitmaps.iter_mut().enumerate() {
            bitmap.push(entry == hot);
        }
        self.rows += 1;
    }

    /// Remove the row at `position` from every bitmap
    pub fn remove_row(&mut self, position: usize) {
        debug_assert!(position < self.rows);
        for bitmap in &mut self.bitmaps {
            bitmap.remove(position);
        }
        self.rows -= 1;
    }

    pub fn bitmap(&self, entry: usize) -> Option<&Bitmap> {
        self.bitmaps.get(entry)
    }

    /// Entry whose bit is set at `position`
    pub fn hot_entry(&self, position: usize) -> Option<usize> {
        self.bitmaps.iter().position(|b| b.get(position))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Bitmap> {
        self.bitmaps.iter()
    }
}
