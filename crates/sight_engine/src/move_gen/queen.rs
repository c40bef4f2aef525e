//! Queen generation
//!
//! The queen combines rook and bishop movement, so every sight change is relevant to it.

use super::sliding;
use super::{always_full, KindBehavior, PieceUpdate};
use crate::board::Board;
use crate::types::Direction;

pub(crate) const BEHAVIOR: KindBehavior = KindBehavior {
    generate: generate_queen,
    react: always_full,
};

fn generate_queen(board: &Board, index: usize) -> PieceUpdate {
    sliding::generate(board, index, &Direction::ALL)
}
