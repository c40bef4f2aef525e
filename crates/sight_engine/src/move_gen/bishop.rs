//! Bishop generation
//!
//! ## Bishop Movement Rules
//!
//! - Bishops move diagonally any number of squares
//! - Cannot jump over pieces
//! - Always stay on the same square color

use super::sliding::{self, DIAGONALS};
use super::{KindBehavior, PieceUpdate, Reaction};
use crate::board::Board;
use crate::types::Direction;

pub(crate) const BEHAVIOR: KindBehavior = KindBehavior {
    generate: generate_bishop,
    react: bishop_reaction,
};

fn generate_bishop(board: &Board, index: usize) -> PieceUpdate {
    sliding::generate(board, index, &DIAGONALS)
}

fn bishop_reaction(dir: Direction) -> Reaction {
    if dir.is_diagonal() {
        Reaction::Full
    } else {
        Reaction::BearingOnly
    }
}
