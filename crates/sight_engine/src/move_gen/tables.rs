//! Precomputed square templates
//!
//! Leap patterns and rays depend only on the square, never on what stands on the board. They are
//! built by `const fn` at compile time into immutable statics, so there is nothing to initialize or
//! synchronize at runtime.
//!
//! ## Tables
//!
//! - `KNIGHT_LEAPS[sq]`: the up-to-eight knight destinations
//! - `KING_STEPS[sq]`: the up-to-eight adjacent squares
//! - `PAWN_ATTACKS[color][sq]`: the two forward diagonals for that color
//! - `RAYS[dir][sq]`: every square from `sq` toward the edge in `dir`, excluding `sq`

use crate::bitset::BitSet;

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// Same order as `Direction`
const DIRECTION_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
];

const fn on_board(file: i8, rank: i8) -> bool {
    file >= 0 && file < 8 && rank >= 0 && rank < 8
}

const fn build_leaps(offsets: &[(i8, i8); 8]) -> [BitSet; 64] {
    let mut table = [BitSet(0); 64];
    let mut square = 0;
    while square < 64 {
        let file = (square % 8) as i8;
        let rank = (square / 8) as i8;
        let mut bits = 0u64;
        let mut i = 0;
        while i < 8 {
            let (df, dr) = offsets[i];
            if on_board(file + df, rank + dr) {
                bits |= 1u64 << ((rank + dr) * 8 + file + df);
            }
            i += 1;
        }
        table[square] = BitSet(bits);
        square += 1;
    }
    table
}

const fn build_pawn_attacks() -> [[BitSet; 64]; 2] {
    let mut table = [[BitSet(0); 64]; 2];
    let mut color = 0;
    while color < 2 {
        let forward: i8 = if color == 0 { 1 } else { -1 };
        let mut square = 0;
        while square < 64 {
            let file = (square % 8) as i8;
            let rank = (square / 8) as i8;
            let mut bits = 0u64;
            if on_board(file - 1, rank + forward) {
                bits |= 1u64 << ((rank + forward) * 8 + file - 1);
            }
            if on_board(file + 1, rank + forward) {
                bits |= 1u64 << ((rank + forward) * 8 + file + 1);
            }
            table[color][square] = BitSet(bits);
            square += 1;
        }
        color += 1;
    }
    table
}

const fn build_rays() -> [[BitSet; 64]; 8] {
    let mut table = [[BitSet(0); 64]; 8];
    let mut dir = 0;
    while dir < 8 {
        let (df, dr) = DIRECTION_OFFSETS[dir];
        let mut square = 0;
        while square < 64 {
            let mut file = (square % 8) as i8 + df;
            let mut rank = (square / 8) as i8 + dr;
            let mut bits = 0u64;
            while on_board(file, rank) {
                bits |= 1u64 << (rank * 8 + file);
                file += df;
                rank += dr;
            }
            table[dir][square] = BitSet(bits);
            square += 1;
        }
        dir += 1;
    }
    table
}

pub static KNIGHT_LEAPS: [BitSet; 64] = build_leaps(&KNIGHT_OFFSETS);
pub static KING_STEPS: [BitSet; 64] = build_leaps(&DIRECTION_OFFSETS);
pub static PAWN_ATTACKS: [[BitSet; 64]; 2] = build_pawn_attacks();
pub static RAYS: [[BitSet; 64]; 8] = build_rays();

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Direction, Square};

    #[test]
    fn test_leap_counts() {
        let a1 = Square::at(0, 0);
        let d4 = Square::at(3, 3);
        assert_eq!(KNIGHT_LEAPS[a1.index()].count_ones(), 2);
        assert_eq!(KNIGHT_LEAPS[d4.index()].count_ones(), 8);
        assert_eq!(KING_STEPS[a1.index()].count_ones(), 3);
        assert_eq!(KING_STEPS[d4.index()].count_ones(), 8);
    }

    #[test]
    fn test_pawn_attacks_clip_at_edges() {
        let a2 = Square::at(0, 1);
        assert_eq!(PAWN_ATTACKS[0][a2.index()], Square::at(1, 2).bit());
        assert_eq!(PAWN_ATTACKS[1][a2.index()], Square::at(1, 0).bit());
        assert!(PAWN_ATTACKS[0][Square::at(4, 7).index()].is_empty());
    }

    #[test]
    fn test_rays_stop_at_edge() {
        let c1 = Square::at(2, 0);
        let up_left = RAYS[Direction::UpLeft.index()][c1.index()];
        assert_eq!(up_left, Square::at(1, 1).bit() | Square::at(0, 2).bit());
        assert!(RAYS[Direction::Down.index()][c1.index()].is_empty());
        assert_eq!(RAYS[Direction::Up.index()][c1.index()].count_ones(), 7);
    }
}
