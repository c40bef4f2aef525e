//! Sliding piece generation
//!
//! Common functionality for sliding pieces (bishops, rooks, queens).
//!
//! ## Algorithm
//!
//! For each direction of the piece, the sight graph already knows the first occupant. Everything up
//! to and including that occupant is attacked; everything before it is a move, and the occupant's
//! square is a move too when it holds an enemy. When the enemy is the king, the square behind it is
//! attacked as well, so the king cannot step back along the same line and still be in check.

use crate::bitset::BitSet;
use crate::board::Board;
use crate::error::integrity_fault;
use crate::sight::{NodeId, SightGraph};
use crate::types::{Direction, PieceKind};

use super::{king_bearing, PieceUpdate};

pub const ORTHOGONALS: [Direction; 4] = [
    Direction::Left,
    Direction::Up,
    Direction::Right,
    Direction::Down,
];

pub const DIAGONALS: [Direction; 4] = [
    Direction::DownLeft,
    Direction::UpLeft,
    Direction::UpRight,
    Direction::DownRight,
];

/// Generates attacks and moves for the slider at `index` along `dirs`
pub(crate) fn generate(board: &Board, index: usize, dirs: &[Direction]) -> PieceUpdate {
    let piece = &board.pieces[index];
    let Some(from) = piece.square else {
        return PieceUpdate::default();
    };

    let mut attacks = BitSet::EMPTY;
    let mut moves = BitSet::EMPTY;
    for &dir in dirs {
        let hit = board.sight.neighbor(index as NodeId, dir);
        if SightGraph::is_sentinel(hit) {
            let ray = BitSet::ray(from, dir);
            attacks |= ray;
            moves |= ray;
            continue;
        }

        let target = &board.pieces[hit as usize];
        let Some(at) = target.square else {
            integrity_fault!("slider {} sees off-board piece {}", index, hit);
        };
        let segment = BitSet::segment(from, dir, at);
        attacks |= segment;
        if target.color == piece.color {
            moves |= segment & !at.bit();
        } else {
            moves |= segment;
            if target.kind == PieceKind::King {
                if let Some(past) = at.step(dir) {
                    attacks.insert(past);
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
