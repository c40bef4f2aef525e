//! Per-kind attack and move generation
//!
//! Piece behaviour is a closed set, so instead of trait objects every kind gets a [`KindBehavior`]
//! row in a static table: one function that regenerates the piece's cached sets from the board, and
//! one that decides how much work a change in a given sight direction requires.
//!
//! Generation never applies the board-wide legality filter (check restriction, pins, en passant).
//! That happens at query time in the board's legality layer.

use crate::bitset::BitSet;
use crate::board::Board;
use crate::constants::slot_index;
use crate::sight::NodeId;
use crate::types::{Direction, PieceKind, Square};

pub mod bishop;
pub mod king;
pub mod knight;
pub mod pawn;
pub mod queen;
pub mod rook;
pub mod sliding;
pub mod tables;

/// Freshly generated cache values for one piece
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct PieceUpdate {
    pub attacks: BitSet,
    pub moves: BitSet,
    pub king_bearing: Option<Direction>,
}

/// What a piece must redo when its sight neighbor in some direction changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Reaction {
    /// Regenerate attacks, moves and bearing
    Full,
    /// Only the cached king bearing can have changed
    BearingOnly,
    Ignore,
}

pub(crate) struct KindBehavior {
    pub generate: fn(&Board, usize) -> PieceUpdate,
    pub react: fn(Direction) -> Reaction,
}

static BEHAVIORS: [KindBehavior; 6] = [
    pawn::BEHAVIOR,
    rook::BEHAVIOR,
    knight::BEHAVIOR,
    bishop::BEHAVIOR,
    queen::BEHAVIOR,
    king::BEHAVIOR,
];

#[inline]
pub(crate) fn behavior(kind: PieceKind) -> &'static KindBehavior {
    &BEHAVIORS[kind.index()]
}

pub(crate) fn always_full(_: Direction) -> Reaction {
    Reaction::Full
}

/// Direction in which the piece at `index` sees its own king
pub(crate) fn king_bearing(board: &Board, index: usize) -> Option<Direction> {
    let color = board.pieces[index].color;
    let king = slot_index(color.index(), PieceKind::King, 0);
    board.sight.find(index as NodeId, king as NodeId)
}

/// First square of `occupied` walking from `from` in `dir`
pub(crate) fn nearest_on_ray(from: Square, dir: Direction, occupied: BitSet) -> Option<Square> {
    let blockers = BitSet::ray(from, dir) & occupied;
    if blockers.is_empty() {
        return None;
    }
    let (df, dr) = dir.offset();
    // Rays toward higher indices meet their nearest blocker at the lowest set bit
    if dr > 0 || (dr == 0 && df > 0) {
        blockers.first()
    } else {
        Square::from_index(63 - blockers.0.leading_zeros() as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    #[test]
    fn test_nearest_on_ray_both_orientations() {
        let occupied: BitSet = [sq("d2"), sq("d6"), sq("d7"), sq("a4"), sq("b4")]
            .into_iter()
            .collect();
        assert_eq!(nearest_on_ray(sq("d4"), Direction::Up, occupied), Some(sq("d6")));
        assert_eq!(nearest_on_ray(sq("d4"), Direction::Down, occupied), Some(sq("d2")));
        assert_eq!(nearest_on_ray(sq("d4"), Direction::Left, occupied), Some(sq("b4")));
        assert_eq!(nearest_on_ray(sq("d4"), Direction::Right, occupied), None);
    }

    #[test]
    fn test_reaction_table() {
        assert_eq!((behavior(PieceKind::Rook).react)(Direction::Up), Reaction::Full);
        assert_eq!(
            (behavior(PieceKind::Rook).react)(Direction::UpLeft),
            Reaction::BearingOnly
        );
        assert_eq!((behavior(PieceKind::Bishop).react)(Direction::UpLeft), Reaction::Full);
        assert_eq!(
            (behavior(PieceKind::Bishop).react)(Direction::Left),
            Reaction::BearingOnly
        );
        assert_eq!((behavior(PieceKind::Knight).react)(Direction::Left), Reaction::Full);
        assert_eq!((behavior(PieceKind::King).react)(Direction::Left), Reaction::Ignore);
    }
}
