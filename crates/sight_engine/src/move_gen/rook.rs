//! Rook generation
//!
//! ## Rook Movement Rules
//!
//! - Rooks move horizontally (along ranks) or vertically (along files)
//! - Cannot jump over pieces
//! - Cannot move to squares occupied by own pieces
//! - Can capture opponent pieces on destination squares
//!
//! A change on a diagonal cannot alter what a rook reaches, only whether it now sees its own king
//! through that diagonal.

use super::sliding::{self, ORTHOGONALS};
use super::{KindBehavior, PieceUpdate, Reaction};
use crate::board::Board;
use crate::types::Direction;

pub(crate) const BEHAVIOR: KindBehavior = KindBehavior {
    generate: generate_rook,
    react: rook_reaction,
};

fn generate_rook(board: &Board, index: usize) -> PieceUpdate {
    sliding::generate(board, index, &ORTHOGONALS)
}

fn rook_reaction(dir: Direction) -> Reaction {
    if dir.is_diagonal() {
        Reaction::BearingOnly
    } else {
        Reaction::Full
    }
}
