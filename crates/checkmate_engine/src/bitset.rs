//! # BitSet - Bitboards Derived From the Mailbox
//!
//! One bit per square (bit 0 = a1, bit 63 = h8). The engine keeps a
//! `[[BitSet; 6]; 2]` table per position, one bitboard per colour and piece
//! kind, rebuilt from the mailbox after every move. Evaluation uses them for
//! counting (`POPCNT`) and for pawn-structure masks; move generation reads
//! the mailbox directly.
//!
//! Common operations:
//! - **Insert**: `bitboard |= 1 << square`
//! - **Remove**: `bitboard &= !(1 << square)`
//! - **Contains**: `bitboard & (1 << square) != 0`
//! - **Count**: `bitboard.count_ones()`

use crate::types::Square;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BitSet(pub u64);

impl BitSet {
    pub const EMPTY: BitSet = BitSet(0);

    pub fn new() -> Self {
        BitSet(0)
    }

    #[inline]
    pub fn insert(&mut self, square: Square) {
        self.0 |= square.bit();
    }

    #[inline]
    pub fn remove(&mut self, square: Square) {
        self.0 &= !square.bit();
    }

    #[inline]
    pub fn contains(&self, square: Square) -> bool {
        (self.0 & square.bit()) != 0
    }

    #[inline]
    pub fn count_ones(&self) -> u32 {
        self.0.count_ones()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    /// Squares in ascending index order
    pub fn iter(&self) -> BitSetIter {
        BitSetIter(self.0)
    }
}

pub struct BitSetIter(u64);

impl Iterator for BitSetIter {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        if self.0 == 0 {
            return None;
        }
        let index = self.0.trailing_zeros() as u8;
        // clear lowest set bit
        self.0 &= self.0 - 1;
        Square::new(index)
    }
}
