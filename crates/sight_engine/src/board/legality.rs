//! Per-piece legality filter
//!
//! A piece's cached move set knows nothing about the rest of its side. At query time it is cut down:
//!
//! - Nothing is legal once the game is over
//! - In single check, non-king pieces may only land on the check restriction
//! - A piece that sees its own king with an enemy slider of the matching axis directly behind it
//!   is pinned to that line
//! - An en-passant capture is added for the side to move, and kept only if removing both pawns
//!   does not open a line onto the king
//!
//! The last point covers the double discovery along the king's rank that ordinary pin detection
//! cannot see, since two pieces leave the line at once.

use super::Board;
use crate::bitset::BitSet;
use crate::move_gen::nearest_on_ray;
use crate::move_gen::tables::PAWN_ATTACKS;
use crate::sight::{NodeId, SightGraph};
use crate::types::{Direction, PieceKind, Square};

impl Board {
    /// Legal destinations of the piece at arena `index`
    pub(crate) fn legal_moves_of(&self, index: usize) -> BitSet {
        if self.state.is_game_over() {
            return BitSet::EMPTY;
        }
        let piece = &self.pieces[index];
        let Some(from) = piece.square else {
            return BitSet::EMPTY;
        };
        let mut moves = piece.moves;
        if piece.kind == PieceKind::King {
            return moves;
        }

        let en_passant = self.en_passant_capture(index);
        let mut restriction = BitSet::FULL;
        if self.state.checked_side() == Some(piece.color) {
            restriction = self.check_restriction;
            if let Some((target, victim)) = en_passant {
                // Capturing the checking pawn en passant answers the check
                if restriction.contains(victim) {
                    restriction.insert(target);
                }
            }
        }
        if let Some((target, _)) = en_passant {
            moves.insert(target);
        }
        moves &= restriction;

        if let Some(bearing) = piece.king_bearing {
            let danger = self.sight.neighbor(index as NodeId, bearing.inverse());
            if !SightGraph::is_sentinel(danger) {
                let attacker = &self.pieces[danger as usize];
                if attacker.color != piece.color && attacker.kind.slides_along(bearing) {
                    if let Some(at) = attacker.square {
                        let king = self.king_square(piece.color);
                        moves &= BitSet::segment(king, bearing.inverse(), at);
                    }
                }
            }
        }

        if let Some((target, victim)) = en_passant {
            if moves.contains(target) && !self.en_passant_is_safe(index, from, target, victim) {
                moves.remove(target);
            }
        }
        moves
    }

    /// En-passant target and victim square available to the pawn at `index`
    pub(crate) fn en_passant_capture(&self, index: usize) -> Option<(Square, Square)> {
        let piece = &self.pieces[index];
        let target = self.en_passant.first()?;
        let from = piece.square?;
        if piece.kind != PieceKind::Pawn
            || piece.color != self.turn
            || !PAWN_ATTACKS[piece.color.index()][from.index()].contains(target)
        {
            return None;
        }
        let victim = Square::at(target.file(), from.rank());
        let node = self.grid[victim.index()]?;
        let captured = &self.pieces[node as usize];
        (captured.kind == PieceKind::Pawn && captured.color != piece.color)
            .then_some((target, victim))
    }

    /// Whether the king is safe from sliders once `from` and `victim` empty and `target` fills
    fn en_passant_is_safe(&self, index: usize, from: Square, target: Square, victim: Square) -> bool {
        let color = self.pieces[index].color;
        let king = self.king_square(color);
        let mut occupied = self.occupancy[0] | self.occupancy[1];
        occupied.remove(from);
        occupied.remove(victim);
        occupied.insert(target);

        for dir in Direction::ALL {
            let Some(hit) = nearest_on_ray(king, dir, occupied) else {
                continue;
            };
            if hit == target {
                continue;
            }
            if let Some(node) = self.grid[hit.index()] {
                let other = &self.pieces[node as usize];
                if other.color != color && other.kind.slides_along(dir) {
                    return false;
                }
            }
        }
        true
    }
}
