//! Pawn generation
//!
//! ## Pawn Movement Rules
//!
//! - Attack the two forward diagonals, whether or not anything stands there
//! - Capture only onto enemy-occupied forward diagonals
//! - Advance one square onto an empty square, or two from the starting rank when both are empty
//!
//! En passant is not cached here: its target lives for a single ply, so the legality layer adds it
//! at query time. Promotion is decided by the move itself, not by generation.

use super::tables::PAWN_ATTACKS;
use super::{always_full, king_bearing, KindBehavior, PieceUpdate};
use crate::board::Board;

pub(crate) const BEHAVIOR: KindBehavior = KindBehavior {
    generate: generate_pawn,
    react: always_full,
};

fn generate_pawn(board: &Board, index: usize) -> PieceUpdate {
    let piece = &board.pieces[index];
    let Some(from) = piece.square else {
        return PieceUpdate::default();
    };
    let color = piece.color;
    let enemy = board.occupancy[color.opposite().index()];
    let occupied = board.occupancy[0] | board.occupancy[1];

    let attacks = PAWN_ATTACKS[color.index()][from.index()];
    let mut moves = attacks & enemy;
    if let Some(one) = from.offset(0, color.forward()) {
        if !occupied.contains(one) {
            moves.insert(one);
            if from.rank() == color.pawn_rank() {
                if let Some(two) = one.offset(0, color.forward()) {
                    if !occupied.contains(two) {
                        moves.insert(two);
                    }
                }
            }
        }
    }

    PieceUpdate {
        attacks,
        moves,
        king_bearing: king_bearing(board, index),
    }
}
