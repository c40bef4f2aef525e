//! Knight generation
//!
//! ## Knight Movement Rules
//!
//! - Knights move in an "L" shape: 2 squares in one direction, 1 square perpendicular
//! - Knights can jump over other pieces
//!
//! Leap targets are not on any sight line, so the board refreshes knights by scanning the leap
//! squares around every changed square. The sight graph is still used for the knight's king bearing,
//! which is what makes a pinned knight immobile.

use super::{always_full, king_bearing, KindBehavior, PieceUpdate};
use crate::bitset::BitSet;
use crate::board::Board;

pub(crate) const BEHAVIOR: KindBehavior = KindBehavior {
    generate: generate_knight,
    react: always_full,
};

fn generate_knight(board: &Board, index: usize) -> PieceUpdate {
    let piece = &board.pieces[index];
    let Some(from) = piece.square else {
        return PieceUpdate::default();
    };
    let attacks = BitSet::knight_leaps(from);
    PieceUpdate {
        attacks,
        moves: attacks & !board.occupancy[piece.color.index()],
        king_bearing: king_bearing(board, index),
    }
}
