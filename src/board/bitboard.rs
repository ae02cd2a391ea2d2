//! Occupancy bitboard indexed by row-major cell number

use super::MAX_CELLS;

const WORDS: usize = MAX_CELLS.div_ceil(64); // 10 words = 640 bits

/// One bit per cell, sized for the largest supported board.
/// Cell numbering is owned by [`Board`](super::Board); bits past its
/// last cell stay clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bitboard {
    bits: [u64; WORDS],
}

impl Bitboard {
    /// Create empty bitboard
    pub const fn new() -> Self {
        Self { bits: [0; WORDS] }
    }

    /// Set the bit for cell `idx`
    #[inline]
    pub fn set(&mut self, idx: usize) {
        self.bits[idx / 64] |= 1u64 << (idx % 64);
    }

    /// Clear the bit for cell `idx`
    #[inline]
    pub fn clear(&mut self, idx: usize) {
        self.bits[idx / 64] &= !(1u64 << (idx % 64));
    }

    /// Check if the bit for cell `idx` is set
    #[inline]
    pub fn get(&self, idx: usize) -> bool {
        (self.bits[idx / 64] >> (idx % 64)) & 1 == 1
    }

    /// Count total set bits (popcount)
    #[inline]
    pub fn count(&self) -> u32 {
        self.bits.iter().map(|b| b.count_ones()).sum()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.iter().all(|&b| b == 0)
    }

    pub fn clear_all(&mut self) {
        self.bits = [0; WORDS];
    }

    /// Iterate over set cell indices in ascending order
    pub fn iter_ones(&self) -> BitboardIter {
        BitboardIter {
            bits: self.bits,
            word_idx: 0,
            current_word: self.bits[0],
        }
    }
}

impl std::ops::BitOr for Bitboard {
    type Output = Bitboard;

    fn bitor(mut self, rhs: Bitboard) -> Bitboard {
        for (a, b) in self.bits.iter_mut().zip(rhs.bits) {
            *a |= b;
        }
        self
    }
}

/// Iterator over set bits in a Bitboard
pub struct BitboardIter {
    bits: [u64; WORDS],
    word_idx: usize,
    current_word: u64,
}

impl Iterator for BitboardIter {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        while self.current_word == 0 {
            self.word_idx += 1;
            if self.word_idx >= WORDS {
                return None;
            }
            self.current_word = self.bits[self.word_idx];
        }

        let bit_pos = self.current_word.trailing_zeros() as usize;
        // Clear the bit we just found
        self.current_word &= self.current_word - 1;
        Some(self.word_idx * 64 + bit_pos)
    }
}
