//! King generation
//!
//! ## King Movement Rules
//!
//! - Kings move one square in any direction
//! - Cannot move onto a square the opponent attacks
//! - Can castle (kingside or queenside) if conditions are met
//!
//! ## Castling Conditions
//!
//! 1. The right for that side and rook has not been revoked
//! 2. The king stands on its home square and sees, through the sight graph, its own rook on the
//!    expected corner (which also proves the squares between are empty)
//! 3. The king square, the square it crosses and the square it lands on are not attacked
//!
//! Because king moves depend on the opponent's attack sets, the board regenerates both kings after
//! every other piece is up to date.

use super::{KindBehavior, PieceUpdate, Reaction};
use crate::bitset::BitSet;
use crate::board::Board;
use crate::sight::{NodeId, SightGraph};
use crate::types::{Direction, PieceKind, Square};

pub(crate) const BEHAVIOR: KindBehavior = KindBehavior {
    generate: generate_king,
    react: king_reaction,
};

fn king_reaction(_: Direction) -> Reaction {
    Reaction::Ignore
}

fn generate_king(board: &Board, index: usize) -> PieceUpdate {
    let piece = &board.pieces[index];
    let Some(from) = piece.square else {
        return PieceUpdate::default();
    };
    let color = piece.color;
    let attacks = BitSet::king_ring(from);
    let enemy_attacks = board.attacks_of(color.opposite());
    let mut moves = attacks & !board.occupancy[color.index()] & !enemy_attacks;

    if from == Square::at(4, color.home_rank()) && !enemy_attacks.contains(from) {
        moves |= castle_targets(board, index, enemy_attacks);
    }

    PieceUpdate {
        attacks,
        moves,
        king_bearing: None,
    }
}

/// Landing squares of every castle currently available to the king at `index`
fn castle_targets(board: &Board, index: usize, enemy_attacks: BitSet) -> BitSet {
    let color = board.pieces[index].color;
    let home = color.home_rank();
    let mut targets = BitSet::EMPTY;
    for kingside in [true, false] {
        if !board.castle_rights.allows(color, kingside) {
            continue;
        }
        let (dir, rook_file, transit_file, landing_file) = if kingside {
            (Direction::Right, 7, 5, 6)
        } else {
            (Direction::Left, 0, 3, 2)
        };

        let seen = board.sight.neighbor(index as NodeId, dir);
        if SightGraph::is_sentinel(seen) {
            continue;
        }
        let rook = &board.pieces[seen as usize];
        if rook.color != color
            || rook.kind != PieceKind::Rook
            || rook.square != Some(Square::at(rook_file, home))
        {
            continue;
        }

        let transit = Square::at(transit_file, home);
        let landing = Square::at(landing_file, home);
        if !enemy_attacks.contains(transit) && !enemy_attacks.contains(landing) {
            targets.insert(landing);
        }
    }
    targets
}
