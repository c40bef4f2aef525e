//! Draft positions
//!
//! A [`Setup`] is a position being edited: pieces can be placed and removed freely and no move or
//! attack set is maintained. [`Setup::finalize`] checks the position, refreshes every piece once,
//! derives the game state, and hands back a playable [`Board`].

use tracing::{debug, warn};

use super::Board;
use crate::bitset::BitSet;
use crate::constants::{slot_index, FIFTY_MOVE_LIMIT};
use crate::error::{ChessEngineError, ChessEngineResult};
use crate::piece::PieceIdentity;
use crate::types::{CastleRights, Color, PieceKind, Square};

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// A position under construction
#[derive(Debug, Clone)]
pub struct Setup {
    board: Board,
}

impl Setup {
    /// No pieces, White to move, no castle rights
    pub fn empty() -> Self {
        let mut board = Board::blank();
        board.castle_rights = CastleRights::NONE;
        Setup { board }
    }

    /// The standard opening position
    pub fn standard() -> Self {
        let mut board = Board::blank();
        for color in Color::ALL {
            let mut used = [0usize; 6];
            for (file, kind) in BACK_RANK.iter().enumerate() {
                let slot = used[kind.index()];
                used[kind.index()] += 1;
                let index = slot_index(color.index(), *kind, slot);
                board.register(index, Square::at(file as u8, color.home_rank()));
            }
            for file in 0..8u8 {
                let index = slot_index(color.index(), PieceKind::Pawn, file as usize);
                board.register(index, Square::at(file, color.pawn_rank()));
            }
        }
        Setup { board }
    }

    /// Places a `color` `kind` on `square`, using the first free slot
    ///
    /// When every slot of `kind` is taken, a free pawn slot is re-typed to hold it.
    ///
    /// # Errors
    ///
    /// - [`ChessEngineError::OccupiedSquare`] if `square` holds a piece
    /// - [`ChessEngineError::PawnOnBackRank`] for a pawn on the first or last rank
    /// - [`ChessEngineError::PoolExhausted`] if no slot is free
    pub fn place(
        &mut self,
        color: Color,
        kind: PieceKind,
        square: Square,
    ) -> ChessEngineResult<PieceIdentity> {
        self.check_target(kind, square)?;

        let own_slots = (0..kind.pool_size()).map(|slot| slot_index(color.index(), kind, slot));
        let pawn_slots = (0..PieceKind::Pawn.pool_size())
            .map(|slot| slot_index(color.index(), PieceKind::Pawn, slot));
        let overflow = kind != PieceKind::Pawn && kind != PieceKind::King;
        let free = own_slots
            .chain(pawn_slots.filter(|_| overflow))
            .find(|&index| !self.board.pieces[index].is_on_board())
            .ok_or(ChessEngineError::PoolExhausted { color, kind })?;

        self.board.pieces[free].retype(kind);
        self.board.register(free, square);
        Ok(self.board.pieces[free].identity())
    }

    /// Places the exact pool slot named by `identity`
    pub fn place_piece(&mut self, identity: PieceIdentity, square: Square) -> ChessEngineResult<()> {
        let slot_ok = (identity.slot as usize) < identity.slot_kind.pool_size()
            && (identity.kind == identity.slot_kind
                || (identity.slot_kind == PieceKind::Pawn && identity.kind.is_promotion_target()));
        if !slot_ok {
            return Err(ChessEngineError::PoolExhausted {
                color: identity.color,
                kind: identity.kind,
            });
        }
        self.check_target(identity.kind, square)?;
        let index = identity.index();
        if self.board.pieces[index].is_on_board() {
            return Err(ChessEngineError::PieceAlreadyPlaced {
                color: identity.color,
                kind: identity.slot_kind,
                slot: identity.slot,
            });
        }
        self.board.pieces[index].retype(identity.kind);
        self.board.register(index, square);
        Ok(())
    }

    /// Removes whatever stands on `square`
    pub fn remove(&mut self, square: Square) -> ChessEngineResult<PieceIdentity> {
        let Some(node) = self.board.grid[square.index()] else {
            return Err(ChessEngineError::EmptySquare { square });
        };
        let identity = self.board.pieces[node as usize].identity();
        self.board.unregister(square);
        Ok(identity)
    }

    /// Removes every piece
    pub fn clear(&mut self) {
        for square in Square::iter() {
            if self.board.grid[square.index()].is_some() {
                self.board.unregister(square);
            }
        }
        self.board.en_passant = BitSet::EMPTY;
    }

    pub fn piece_at(&self, square: Square) -> Option<PieceIdentity> {
        self.board.piece_at(square)
    }

    pub fn set_turn(&mut self, color: Color) -> &mut Self {
        self.board.turn = color;
        self
    }

    pub fn set_castle_rights(&mut self, rights: CastleRights) -> &mut Self {
        self.board.castle_rights = rights;
        self
    }

    pub fn set_en_passant(&mut self, target: Option<Square>) -> &mut Self {
        self.board.en_passant = target.map(Square::bit).unwrap_or_default();
        self
    }

    /// Counter is capped at the drawing limit
    pub fn set_fifty_move_counter(&mut self, plies: u8) -> &mut Self {
        self.board.fifty_move = plies.min(FIFTY_MOVE_LIMIT);
        self
    }

    pub fn turn(&self) -> Color {
        self.board.turn
    }

    pub fn castle_rights(&self) -> CastleRights {
        self.board.castle_rights
    }

    pub fn en_passant(&self) -> Option<Square> {
        self.board.en_passant.first()
    }

    pub fn fifty_move_counter(&self) -> u8 {
        self.board.fifty_move
    }

    /// Turns the draft into a playable board
    ///
    /// Castle rights whose king or rook is not on its home square are dropped, as is an en-passant
    /// target that no double push could have produced. History starts empty.
    ///
    /// # Errors
    ///
    /// [`ChessEngineError::MissingKing`] if either side has no king.
    /// [`ChessEngineError::IllegalPosition`] if the side not to move is in check, which includes
    /// two kings standing next to each other.
    pub fn finalize(self) -> ChessEngineResult<Board> {
        let mut board = self.board;
        for color in Color::ALL {
            if !board.pieces[Board::king_index(color)].is_on_board() {
                return Err(ChessEngineError::MissingKing { color });
            }
        }
        sanitize_castle_rights(&mut board);
        sanitize_en_passant(&mut board);

        board.history.clear();
        board.refresh_all();
        let waiting = board.turn.opposite();
        if board
            .attacks_of(board.turn)
            .contains(board.king_square(waiting))
        {
            warn!("[ENGINE] Rejected draft: {} king can be captured", waiting);
            return Err(ChessEngineError::IllegalPosition {
                reason: format!("{} is in check but {} is to move", waiting, board.turn),
            });
        }
        board.update_game_state();
        debug!(
            "[ENGINE] Position ready: {} to move, {}",
            board.turn, board.state
        );
        Ok(board)
    }

    fn check_target(&self, kind: PieceKind, square: Square) -> ChessEngineResult<()> {
        if self.board.grid[square.index()].is_some() {
            return Err(ChessEngineError::OccupiedSquare { square });
        }
        if kind == PieceKind::Pawn && (square.rank() == 0 || square.rank() == 7) {
            return Err(ChessEngineError::PawnOnBackRank { square });
        }
        Ok(())
    }
}

impl Default for Setup {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    /// Back to a draft for editing; history is dropped
    pub fn into_setup(mut self) -> Setup {
        self.history.clear();
        Setup { board: self }
    }
}

fn sanitize_castle_rights(board: &mut Board) {
    for color in Color::ALL {
        let home = color.home_rank();
        let king_home = board.pieces[Board::king_index(color)].square == Some(Square::at(4, home));
        for (kingside, file) in [(true, 7u8), (false, 0u8)] {
            let rook_home = board
                .piece_at(Square::at(file, home))
                .is_some_and(|p| p.color == color && p.kind == PieceKind::Rook);
            if !(king_home && rook_home) {
                board.castle_rights.revoke(color, kingside);
            }
        }
    }
}

fn sanitize_en_passant(board: &mut Board) {
    let Some(target) = board.en_passant.first() else {
        return;
    };
    // The side that just moved is the one not on move
    let pusher = board.turn.opposite();
    let expected_rank = match pusher {
        Color::White => 2,
        Color::Black => 5,
    };
    let pawn_square = Square::at(target.file(), board.turn.en_passant_rank());
    let pushed = board
        .piece_at(pawn_square)
        .is_some_and(|p| p.color == pusher && p.kind == PieceKind::Pawn);
    if target.rank() != expected_rank || board.grid[target.index()].is_some() || !pushed {
        board.en_passant = BitSet::EMPTY;
    }
}
