//! # Board - The Position Engine
//!
//! ## Overview
//!
//! [`Board`] is a ready-to-play position: every on-board piece has up-to-date attack and move sets,
//! the game state is derived, and the move log is attached. It is produced by finalizing a
//! [`Setup`] (the draft form used for free editing) and can be turned back into one with
//! [`Board::into_setup`]. Legality queries therefore never run against a half-built position.
//!
//! ## Storage
//!
//! - `grid`: the occupant of each square, as an arena index into `pieces`
//! - `pieces`: the fixed 32-slot pool (16 per color, see [`crate::constants`])
//! - `sight`: the line-of-sight graph over pieces and border sentinels
//! - `occupancy`: one [`BitSet`] per color, always disjoint
//!
//! ## Incremental Refresh
//!
//! Moving a piece is a pick-up followed by a put-down. Each of those refreshes only the pieces that
//! can be affected: the sight neighbors of the changed square (which decide per kind whether a full
//! regeneration is needed), the knights a leap away, and finally both kings. See `placement.rs`.
//!
//! ## Submodules
//!
//! - `placement`: linking pieces in and out and the refresh cascade
//! - `legality`: per-piece legal destinations (check restriction, pins, en passant)
//! - `status`: check, checkmate and stalemate detection
//! - `execute`: move execution, undo, redo and move-list import/export
//! - `setup`: the draft position type

use std::fmt;

use crate::bitset::BitSet;
use crate::constants::{slot_index, PIECE_SLOTS, SLOTS_PER_COLOR};
use crate::error::integrity_fault;
use crate::hash;
use crate::history::History;
use crate::piece::{PieceIdentity, PieceRecord};
use crate::sight::{NodeId, SightGraph};
use crate::types::{CastleRights, Color, GameState, Move, PieceKind, Square};

mod execute;
mod legality;
mod placement;
mod setup;
mod status;

pub use setup::Setup;

/// A finalized, playable position with its move log
#[derive(Debug, Clone)]
pub struct Board {
    pub(crate) grid: [Option<NodeId>; 64],
    pub(crate) pieces: [PieceRecord; PIECE_SLOTS],
    pub(crate) sight: SightGraph,
    pub(crate) occupancy: [BitSet; 2],
    pub(crate) turn: Color,
    pub(crate) castle_rights: CastleRights,
    pub(crate) en_passant: BitSet,
    pub(crate) check_restriction: BitSet,
    pub(crate) fifty_move: u8,
    pub(crate) state: GameState,
    /// White material minus Black material
    pub(crate) value: i32,
    pub(crate) history: History,
}

impl Board {
    /// The standard opening position
    pub fn new() -> Self {
        match Setup::standard().finalize() {
            Ok(board) => board,
            Err(err) => integrity_fault!("opening position failed to finalize: {}", err),
        }
    }

    /// Storage for an empty board with every slot off the board
    pub(crate) fn blank() -> Self {
        Board {
            grid: [None; 64],
            pieces: std::array::from_fn(PieceRecord::for_index),
            sight: SightGraph::new(),
            occupancy: [BitSet::EMPTY; 2],
            turn: Color::White,
            castle_rights: CastleRights::ALL,
            en_passant: BitSet::EMPTY,
            check_restriction: BitSet::EMPTY,
            fifty_move: 0,
            state: GameState::Play,
            value: 0,
            history: History::new(),
        }
    }

    /// Resets to the opening position, dropping history
    pub fn reset(&mut self) {
        *self = Board::new();
    }

    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    #[inline]
    pub fn state(&self) -> GameState {
        self.state
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    #[inline]
    pub fn castle_rights(&self) -> CastleRights {
        self.castle_rights
    }

    /// Square a pawn may capture onto en passant this ply
    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant.first()
    }

    /// Squares a non-king piece may move to while its side is in single check
    #[inline]
    pub fn check_restriction(&self) -> BitSet {
        self.check_restriction
    }

    #[inline]
    pub fn fifty_move_counter(&self) -> u8 {
        self.fifty_move
    }

    /// Material balance from the side to move's point of view
    #[inline]
    pub fn value(&self) -> i32 {
        match self.turn {
            Color::White => self.value,
            Color::Black => -self.value,
        }
    }

    /// Material balance from White's point of view
    #[inline]
    pub fn white_value(&self) -> i32 {
        self.value
    }

    /// Zobrist key of the position
    pub fn hash_key(&self) -> u64 {
        hash::position_key(self)
    }

    #[inline]
    pub fn occupancy(&self, color: Color) -> BitSet {
        self.occupancy[color.index()]
    }

    pub fn piece_at(&self, square: Square) -> Option<PieceIdentity> {
        self.grid[square.index()].map(|node| self.pieces[node as usize].identity())
    }

    /// Number of on-board pieces per color, indexed by `PieceKind`
    pub fn piece_counts(&self, color: Color) -> [u8; 6] {
        let mut counts = [0u8; 6];
        for piece in self.color_pieces(color) {
            if piece.is_on_board() {
                counts[piece.kind.index()] += 1;
            }
        }
        counts
    }

    pub fn king_square(&self, color: Color) -> Square {
        match self.pieces[Self::king_index(color)].square {
            Some(square) => square,
            None => integrity_fault!("{} king is not on the board", color),
        }
    }

    /// Union of every on-board attack set of `color`
    pub fn attacks_of(&self, color: Color) -> BitSet {
        self.color_pieces(color)
            .iter()
            .fold(BitSet::EMPTY, |acc, piece| acc | piece.attacks)
    }

    /// Squares the piece on `square` attacks
    pub fn attacks_from(&self, square: Square) -> BitSet {
        self.grid[square.index()]
            .map(|node| self.pieces[node as usize].attacks)
            .unwrap_or_default()
    }

    /// Legal destinations of the piece on `square`, for whichever side it belongs to
    pub fn legal_moves_from(&self, square: Square) -> BitSet {
        match self.grid[square.index()] {
            Some(node) => self.legal_moves_of(node as usize),
            None => BitSet::EMPTY,
        }
    }

    /// Union of the legal destinations of every piece of `color`
    pub fn legal_destinations(&self, color: Color) -> BitSet {
        self.on_board_indices(color)
            .fold(BitSet::EMPTY, |acc, index| acc | self.legal_moves_of(index))
    }

    /// Squares holding a piece of the side to move with at least one legal move
    pub fn movers(&self) -> BitSet {
        let mut movers = BitSet::EMPTY;
        for index in self.on_board_indices(self.turn) {
            if !self.legal_moves_of(index).is_empty() {
                if let Some(square) = self.pieces[index].square {
                    movers.insert(square);
                }
            }
        }
        movers
    }

    /// Every legal move of the side to move, promotions expanded into the four kinds
    pub fn all_legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::new();
        for index in self.on_board_indices(self.turn) {
            let piece = &self.pieces[index];
            let Some(from) = piece.square else { continue };
            for to in self.legal_moves_of(index) {
                if piece.kind == PieceKind::Pawn && to.rank() == piece.color.last_rank() {
                    for kind in PieceKind::PROMOTIONS {
                        moves.push(Move::with_promotion(from, to, kind));
                    }
                } else {
                    moves.push(Move::new(from, to));
                }
            }
        }
        moves
    }

    /// Whether a move from `from` to `to` is legal right now
    pub fn is_legal(&self, from: Square, to: Square) -> bool {
        match self.grid[from.index()] {
            Some(node) => {
                self.pieces[node as usize].color == self.turn
                    && self.legal_moves_of(node as usize).contains(to)
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Recorded plies, including any redo line
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Plies currently applied
    pub fn history_position(&self) -> usize {
        self.history.position()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Audits every structural invariant, aborting on the first violation
    ///
    /// Checks occupancy disjointness, agreement of grid, occupancy and piece squares, one king per
    /// color, and reciprocity of the sight graph.
    pub fn validate_integrity(&self) {
        if !(self.occupancy[0] & self.occupancy[1]).is_empty() {
            integrity_fault!("color occupancies overlap");
        }
        let mut expected = [BitSet::EMPTY; 2];
        for (index, piece) in self.pieces.iter().enumerate() {
            if let Some(square) = piece.square {
                if self.grid[square.index()] != Some(index as NodeId) {
                    integrity_fault!("piece {} claims {} but the grid disagrees", index, square);
                }
                expected[piece.color.index()].insert(square);
            }
        }
        for square in Square::iter() {
            if let Some(node) = self.grid[square.index()] {
                if self.pieces[node as usize].square != Some(square) {
                    integrity_fault!("grid holds piece {} on {} but it is elsewhere", node, square);
                }
            }
        }
        if expected != self.occupancy {
            integrity_fault!("occupancy bitsets disagree with piece squares");
        }
        for color in Color::ALL {
            if !self.pieces[Self::king_index(color)].is_on_board() {
                integrity_fault!("{} king is not on the board", color);
            }
        }
        if let Err(reason) = self.sight.validate(&self.grid) {
            integrity_fault!("sight graph broken: {}", reason);
        }
    }

    #[inline]
    pub(crate) fn king_index(color: Color) -> usize {
        slot_index(color.index(), PieceKind::King, 0)
    }

    #[inline]
    pub(crate) fn color_pieces(&self, color: Color) -> &[PieceRecord] {
        let start = color.index() * SLOTS_PER_COLOR;
        &self.pieces[start..start + SLOTS_PER_COLOR]
    }

    pub(crate) fn on_board_indices(&self, color: Color) -> impl Iterator<Item = usize> + '_ {
        let start = color.index() * SLOTS_PER_COLOR;
        (start..start + SLOTS_PER_COLOR).filter(move |&i| self.pieces[i].is_on_board())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8u8 {
                let symbol = match self.piece_at(Square::at(file, rank)) {
                    Some(piece) if piece.color == Color::White => piece.kind.symbol(),
                    Some(piece) => piece.kind.symbol().to_ascii_lowercase(),
                    None => '.',
                };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        writeln!(f, "  abcdefgh")
    }
}
