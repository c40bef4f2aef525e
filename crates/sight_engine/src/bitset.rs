//! # BitSet - Board Squares as a 64-bit Set
//!
//! ## Overview
//!
//! Every set of squares the engine reasons about (occupancy, attacks, legal destinations, check
//! restrictions, en-passant targets) is a [`BitSet`]: one `u64` where bit `rank * 8 + file` stands for
//! that square. Union, intersection and complement are single instructions, and counting squares is a
//! hardware POPCNT.
//!
//! ## Layout
//!
//! - Bit 0 = a1 (bottom-left for White)
//! - Bit 7 = h1
//! - Bit 56 = a8
//! - Bit 63 = h8
//!
//! ## Templates
//!
//! Masks for rows, columns, both diagonal families, king and knight neighbourhoods, and partial ray
//! segments are derived from the compile-time tables in [`crate::move_gen::tables`]. Ray segments are
//! the usual source of off-by-one bugs in bitboard engines, so their contract is precise:
//! [`BitSet::segment`] excludes the starting square and includes the far endpoint.
//!
//! ## Flips
//!
//! - Horizontal flip mirrors files (a <-> h): reverse every byte's bits
//! - Vertical flip mirrors ranks (1 <-> 8): swap the bytes
//! - 180 degree rotation is both at once, which is plain bit reversal

use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, Not};

use serde::{Deserialize, Serialize};

use crate::error::ChessEngineResult;
use crate::move_gen::tables::{KING_STEPS, KNIGHT_LEAPS, RAYS};
use crate::types::{Direction, Square};

const FIRST_ROW: u64 = 0xFF;
const FIRST_COLUMN: u64 = 0x0101_0101_0101_0101;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BitSet(pub u64);

impl BitSet {
    pub const EMPTY: BitSet = BitSet(0);
    pub const FULL: BitSet = BitSet(u64::MAX);

    pub fn new() -> Self {
        BitSet(0)
    }

    #[inline]
    pub fn insert(&mut self, square: Square) {
        self.0 |= 1 << square.index();
    }

    #[inline]
    pub fn remove(&mut self, square: Square) {
        self.0 &= !(1 << square.index());
    }

    #[inline]
    pub fn contains(&self, square: Square) -> bool {
        (self.0 & (1 << square.index())) != 0
    }

    /// Sets every square of `mask`
    #[inline]
    pub fn insert_all(&mut self, mask: BitSet) {
        self.0 |= mask.0;
    }

    /// Clears every square of `mask`
    #[inline]
    pub fn remove_all(&mut self, mask: BitSet) {
        self.0 &= !mask.0;
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

    /// Lowest square in the set
    #[inline]
    pub fn first(&self) -> Option<Square> {
        if self.0 == 0 {
            None
        } else {
            Square::from_index(self.0.trailing_zeros() as u8)
        }
    }

    /// Iterates squares from a1 toward h8
    pub fn iter(self) -> BitSetIter {
        BitSetIter(self.0)
    }

    /// The row (rank) through the given coordinates
    pub fn row(file: i8, rank: i8) -> ChessEngineResult<BitSet> {
        let square = Square::new(file, rank)?;
        Ok(BitSet(FIRST_ROW << (8 * square.rank())))
    }

    /// The column (file) through the given coordinates
    pub fn column(file: i8, rank: i8) -> ChessEngineResult<BitSet> {
        let square = Square::new(file, rank)?;
        Ok(BitSet(FIRST_COLUMN << square.file()))
    }

    /// The a1-h8 family diagonal through the given coordinates
    pub fn diagonal(file: i8, rank: i8) -> ChessEngineResult<BitSet> {
        let square = Square::new(file, rank)?;
        Ok(square.bit()
            | RAYS[Direction::DownLeft.index()][square.index()]
            | RAYS[Direction::UpRight.index()][square.index()])
    }

    /// The h1-a8 family diagonal through the given coordinates
    pub fn anti_diagonal(file: i8, rank: i8) -> ChessEngineResult<BitSet> {
        let square = Square::new(file, rank)?;
        Ok(square.bit()
            | RAYS[Direction::UpLeft.index()][square.index()]
            | RAYS[Direction::DownRight.index()][square.index()])
    }

    /// The squares a king on `square` touches
    #[inline]
    pub fn king_ring(square: Square) -> BitSet {
        KING_STEPS[square.index()]
    }

    /// The squares a knight on `square` leaps to
    #[inline]
    pub fn knight_leaps(square: Square) -> BitSet {
        KNIGHT_LEAPS[square.index()]
    }

    /// Every square from `square` to the edge in `dir`, excluding `square`
    #[inline]
    pub fn ray(square: Square, dir: Direction) -> BitSet {
        RAYS[dir.index()][square.index()]
    }

    /// Squares strictly after `from` up to and including `to`, walking in `dir`
    ///
    /// If `to` is not on that ray the whole ray is returned.
    #[inline]
    pub fn segment(from: Square, dir: Direction, to: Square) -> BitSet {
        let ray = RAYS[dir.index()][from.index()];
        if !ray.contains(to) {
            return ray;
        }
        BitSet(ray.0 & !RAYS[dir.index()][to.index()].0)
    }

    /// Mirror a-file onto h-file
    #[inline]
    pub fn flip_horizontal(self) -> BitSet {
        BitSet(self.0.reverse_bits().swap_bytes())
    }

    /// Mirror rank 1 onto rank 8
    #[inline]
    pub fn flip_vertical(self) -> BitSet {
        BitSet(self.0.swap_bytes())
    }

    #[inline]
    pub fn rotate_180(self) -> BitSet {
        BitSet(self.0.reverse_bits())
    }
}

pub struct BitSetIter(u64);

impl Iterator for BitSetIter {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        if self.0 == 0 {
            return None;
        }
        let index = self.0.trailing_zeros() as u8;
        self.0 &= self.0 - 1;
        Square::from_index(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}

impl IntoIterator for BitSet {
    type Item = Square;
    type IntoIter = BitSetIter;

    fn into_iter(self) -> BitSetIter {
        self.iter()
    }
}

impl FromIterator<Square> for BitSet {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        let mut bits = BitSet::new();
        for square in iter {
            bits.insert(square);
        }
        bits
    }
}

impl BitOr for BitSet {
    type Output = BitSet;
    #[inline]
    fn bitor(self, rhs: BitSet) -> BitSet {
        BitSet(self.0 | rhs.0)
    }
}

impl BitOrAssign for BitSet {
    #[inline]
    fn bitor_assign(&mut self, rhs: BitSet) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for BitSet {
    type Output = BitSet;
    #[inline]
    fn bitand(self, rhs: BitSet) -> BitSet {
        BitSet(self.0 & rhs.0)
    }
}

impl BitAndAssign for BitSet {
    #[inline]
    fn bitand_assign(&mut self, rhs: BitSet) {
        self.0 &= rhs.0;
    }
}

impl BitXor for BitSet {
    type Output = BitSet;
    #[inline]
    fn bitxor(self, rhs: BitSet) -> BitSet {
        BitSet(self.0 ^ rhs.0)
    }
}

impl Not for BitSet {
    type Output = BitSet;
    #[inline]
    fn not(self) -> BitSet {
        BitSet(!self.0)
    }
}

impl fmt::Display for BitSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            for file in 0..8u8 {
                let mark = if self.contains(Square::at(file, rank)) {
                    '1'
                } else {
                    '.'
                };
                write!(f, "{}", mark)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
