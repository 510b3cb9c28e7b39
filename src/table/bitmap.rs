//! Bit-packed row bitmap (1 bit per row)
//!
//! One bitmap marks which rows of a column hold a given value:
//! - bit i = 1: row i holds the value
//! - bit i = 0: row i holds some other value
//!
//! Bits past `len` in the last word are always zero.

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    /// Each u64 holds 64 row bits (LSB = bit 0)
    bits: Vec<u64>,
    /// Total number of rows (not words)
    len: usize,
}

impl Bitmap {
    /// Create bitmap with all bits set to 1 (every row matches)
    pub fn new_all_set(len: usize) -> Self {
        let words = (len + 63) / 64;
        let mut bits = vec![!0u64; words];

        // Mask off unused bits in last word
        let rem = len % 64;
        if rem != 0 {
            bits[words - 1] = (1u64 << rem) - 1;
        }

        Self { bits, len }
    }

    /// Create bitmap with all bits set to 0 (no row matches)
    pub fn new_all_clear(len: usize) -> Self {
        let words = (len + 63) / 64;
        Self {
            bits: vec![0u64; words],
            len,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get bit at row i
    #[inline]
    pub fn get(&self, i: usize) -> bool {
        debug_assert!(i < self.len);
        let w = i >> 6; // word index (i / 64)
        let b = i & 63; // bit index (i % 64)
        (self.bits[w] >> b) & 1 == 1
    }

    /// Set bit at row i
    #[inline]
    pub fn set(&mut self, i: usize, v: bool) {
        debug_assert!(i < self.len);
        let w = i >> 6;
        let b = i & 63;
        let mask = 1u64 << b;
        if v {
            self.bits[w] |= mask;
        } else {
            self.bits[w] &= !mask;
        }
    }

    /// Append one bit at row `len`
    pub fn push(&mut self, v: bool) {
        if self.len % 64 == 0 {
            self.bits.push(0);
        }
        self.len += 1;
        self.set(self.len - 1, v);
    }

    /// Remove the bit at row i, shifting every later bit down by one
    ///
    /// Returns the removed bit.
    pub fn remove(&mut self, i: usize) -> bool {
        assert!(i < self.len, "row {} out of range for bitmap of {}", i, self.len);
        let removed = self.get(i);
        let w = i >> 6;
        let b = i & 63;

        // Within the first word: keep bits below b, shift bits above b down
        let word = self.bits[w];
        let low = word & ((1u64 << b) - 1);
        let high = if b == 63 { 0 } else { (word >> (b + 1)) << b };
        self.bits[w] = low | high;

        // Carry the lowest bit of each following word into the top of its predecessor
        for k in w..self.bits.len() - 1 {
            self.bits[k] |= (self.bits[k + 1] & 1) << 63;
            self.bits[k + 1] >>= 1;
        }

        self.len -= 1;
        self.bits.truncate((self.len + 63) / 64);
        removed
    }

    /// Get raw word at word index (for fast iteration)
    #[inline]
    pub fn word(&self, w: usize) -> u64 {
        self.bits[w]
    }

    /// Number of u64 words
    #[inline]
    pub fn words_len(&self) -> usize {
        self.bits.len()
    }

    /// Bitwise AND in place: self &= other
    pub fn and_assign(&mut self, other: &Bitmap) {
        assert_eq!(self.len, other.len);
        for (a, b) in self.bits.iter_mut().zip(other.bits.iter()) {
            *a &= *b;
        }
    }

    /// Number of set bits
    pub fn count_ones(&self) -> usize {
        self.bits.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Positions of set bits, ascending
    pub fn iter_ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter().enumerate().flat_map(|(w, &word)| {
            let mut rest = word;
            std::iter::from_fn(move || {
                if rest == 0 {
                    return None;
                }
                let b = rest.trailing_zeros() as usize;
                rest &= rest - 1;
                Some((w << 6) + b)
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_set() {
        let bm = Bitmap::new_all_set(100);
        assert_eq!(bm.len(), 100);
        for i in 0..100 {
            assert!(bm.get(i), "bit {} should be set", i);
        }
        assert_eq!(bm.count_ones(), 100);
    }

    #[test]
    fn test_all_clear() {
        let bm = Bitmap::new_all_clear(100);
        assert_eq!(bm.len(), 100);
        for i in 0..100 {
            assert!(!bm.get(i), "bit {} should be clear", i);
        }
        assert_eq!(bm.iter_ones().count(), 0);
    }

    #[test]
    fn test_set_get() {
        let mut bm = Bitmap::new_all_set(100);
        bm.set(50, false);
        assert!(!bm.get(50));
        assert!(bm.get(49));
        assert!(bm.get(51));
    }

    #[test]
    fn test_and() {
        let mut a = Bitmap::new_all_set(128);
        let mut b = Bitmap::new_all_set(128);
        a.set(10, false);
        b.set(20, false);

        a.and_assign(&b);

        assert!(!a.get(10), "a was clear");
        assert!(!a.get(20), "b was clear");
        assert!(a.get(30), "both set");
    }

    #[test]
    fn test_push_across_word_boundary() {
        let mut bm = Bitmap::new_all_clear(63);
        bm.push(true);
        bm.push(true);
        assert_eq!(bm.len(), 65);
        assert_eq!(bm.words_len(), 2);
        assert!(bm.get(63));
        assert!(bm.get(64));
        assert_eq!(bm.iter_ones().collect::<Vec<_>>(), vec![63, 64]);
    }

    #[test]
    fn test_remove_shifts_later_bits() {
        // Set every third bit over three words
        let mut bm = Bitmap::new_all_clear(150);
        for i in (0..150).step_by(3) {
            bm.set(i, true);
        }
        let mut expected: Vec<bool> = (0..150).map(|i| i % 3 == 0).collect();

        for &pos in &[149, 64, 63, 0, 70] {
            let removed = bm.remove(pos);
            assert_eq!(removed, expected.remove(pos));
            assert_eq!(bm.len(), expected.len());
            for (i, &bit) in expected.iter().enumerate() {
                assert_eq!(bm.get(i), bit, "bit {} after removing {}", i, pos);
            }
        }
    }

    #[test]
    fn test_remove_drops_empty_tail_word() {
        let mut bm = Bitmap::new_all_set(65);
        bm.remove(0);
        assert_eq!(bm.len(), 64);
        assert_eq!(bm.words_len(), 1);
        assert_eq!(bm.word(0), !0u64);
        assert_eq!(bm.count_ones(), 64);
    }

    #[test]
    fn test_remove_keeps_tail_clear() {
        let mut bm = Bitmap::new_all_set(10);
        bm.remove(9);
        bm.remove(0);
        assert_eq!(bm.len(), 8);
        assert_eq!(bm.word(0), 0xFF);
        bm.push(false);
        assert!(!bm.get(8));
    }

    #[test]
    fn test_iter_ones_ascending() {
        let mut bm = Bitmap::new_all_clear(200);
        for &i in &[199, 0, 64, 127, 128] {
            bm.set(i, true);
        }
        assert_eq!(bm.iter_ones().collect::<Vec<_>>(), vec![0, 64, 127, 128, 199]);
    }
}
