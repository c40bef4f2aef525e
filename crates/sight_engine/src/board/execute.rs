//! Move execution, undo and redo
//!
//! ## Execution
//!
//! [`Board::move_piece`] validates the request against the legality filter before touching anything,
//! so every error leaves the board as it was. A successful move lifts the mover, removes any victim,
//! places the mover (re-typed when promoting), relocates the rook of a castle, records a history
//! entry with the pre-move state, and rederives the game state.
//!
//! ## Undo and Redo
//!
//! Undo is the structural mirror of execution driven purely by the stored entry: the pre-move
//! state is restored verbatim and no detection runs. Redo instead replays the recorded move through
//! [`Board::move_piece`], so it is validated like any other move.

use tracing::{debug, warn};

use super::Board;
use crate::error::{integrity_fault, ChessEngineError, ChessEngineResult};
use crate::history::HistoryEntry;
use crate::types::{Move, MoveKind, PieceKind, Square};

impl Board {
    /// Executes `mv` for the side to move
    ///
    /// # Errors
    ///
    /// - [`ChessEngineError::GameOver`] once the game has ended
    /// - [`ChessEngineError::SameSquare`] if source and destination coincide
    /// - [`ChessEngineError::EmptySquare`] if there is nothing to move
    /// - [`ChessEngineError::WrongTurn`] if the piece belongs to the other side
    /// - [`ChessEngineError::IllegalMove`] if the destination is not a legal move
    /// - [`ChessEngineError::InvalidPromotion`] if a pawn reaches the last rank without a valid kind
    pub fn move_piece(&mut self, mv: Move) -> ChessEngineResult<MoveKind> {
        let Move { from, to, promotion } = mv;
        if self.state.is_game_over() {
            return Err(ChessEngineError::GameOver { state: self.state });
        }
        if from == to {
            return Err(ChessEngineError::SameSquare { square: from });
        }
        let Some(node) = self.grid[from.index()] else {
            return Err(ChessEngineError::EmptySquare { square: from });
        };
        let index = node as usize;
        let piece = &self.pieces[index];
        if piece.color != self.turn {
            return Err(ChessEngineError::WrongTurn {
                square: from,
                found: piece.color,
                expected: self.turn,
            });
        }
        if !self.legal_moves_of(index).contains(to) {
            return Err(ChessEngineError::IllegalMove { from, to });
        }

        let color = piece.color;
        let mover_kind = piece.kind;
        let promotes = mover_kind == PieceKind::Pawn && to.rank() == color.last_rank();
        if promotes && !promotion.is_some_and(PieceKind::is_promotion_target) {
            return Err(ChessEngineError::InvalidPromotion { kind: promotion });
        }

        let capture_square = match self.grid[to.index()] {
            Some(_) => Some(to),
            None if mover_kind == PieceKind::Pawn && from.file() != to.file() => {
                Some(Square::at(to.file(), from.rank()))
            }
            None => None,
        };
        let captured = capture_square.and_then(|square| self.piece_at(square));
        let castles = mover_kind == PieceKind::King && from.file().abs_diff(to.file()) == 2;
        let kind = match (promotion, promotes, capture_square) {
            (Some(kind), true, _) => MoveKind::PromoteTo(kind),
            _ if castles => MoveKind::Castle,
            (_, _, Some(square)) if square != to => MoveKind::EnPassant,
            (_, _, Some(_)) => MoveKind::Capture,
            _ => MoveKind::Move,
        };

        let pre_state = self.state;
        let pre_fifty = self.fifty_move;
        let pre_restriction = self.check_restriction;
        let pre_en_passant = self.en_passant;
        let pre_rights = self.castle_rights;

        self.en_passant.clear();
        if mover_kind == PieceKind::King {
            self.castle_rights.revoke_color(color);
        }
        self.castle_rights.revoke_corner(from);
        self.castle_rights.revoke_corner(to);

        self.pick_up(from);
        if let Some(square) = capture_square {
            self.pick_up(square);
        }
        if let MoveKind::PromoteTo(new_kind) = kind {
            self.pieces[index].retype(new_kind);
        }
        self.put_down(index, to);
        if castles {
            let (rook_from, rook_to) = castle_rook_squares(to);
            let rook = self.pick_up(rook_from);
            self.put_down(rook, rook_to);
        }
        if mover_kind == PieceKind::Pawn && from.rank().abs_diff(to.rank()) == 2 {
            self.en_passant
                .insert(Square::at(from.file(), (from.rank() + to.rank()) / 2));
        }

        self.fifty_move = if mover_kind == PieceKind::Pawn || captured.is_some() {
            0
        } else {
            self.fifty_move.saturating_add(1)
        };
        self.turn = self.turn.opposite();

        let entry = HistoryEntry {
            from,
            to,
            moved: self.pieces[index].identity(),
            captured,
            kind,
            state: pre_state,
            fifty_move: pre_fifty,
            check_restriction: pre_restriction,
            en_passant: pre_en_passant,
            castle_rights: pre_rights,
        };
        let kept_line = self.history.record(entry);
        debug!(
            "[ENGINE] {}{}",
            entry,
            if kept_line { " (redo line kept)" } else { "" }
        );

        self.update_game_state();
        Ok(kind)
    }

    /// Reverts the last applied move from its history entry
    pub fn undo(&mut self) -> ChessEngineResult<HistoryEntry> {
        let entry = self
            .history
            .step_back()
            .ok_or(ChessEngineError::UndoExhausted)?;
        let index = entry.moved.index();

        self.state = entry.state;
        self.fifty_move = entry.fifty_move;
        self.check_restriction = entry.check_restriction;
        self.en_passant = entry.en_passant;
        self.castle_rights = entry.castle_rights;
        self.turn = entry.moved.color;

        if self.grid[entry.to.index()] != Some(index as u8) {
            integrity_fault!("history says {} stands on {}", entry.moved, entry.to);
        }
        self.pick_up(entry.to);
        if entry.kind == MoveKind::Castle {
            let (rook_from, rook_to) = castle_rook_squares(entry.to);
            let rook = self.pick_up(rook_to);
            self.put_down(rook, rook_from);
        }
        if let MoveKind::PromoteTo(_) = entry.kind {
            self.pieces[index].retype(PieceKind::Pawn);
        }
        self.put_down(index, entry.from);
        if let Some(captured) = entry.captured {
            let victim = captured.index();
            self.pieces[victim].retype(captured.kind);
            self.put_down(victim, entry.capture_square());
        }

        debug!("[HISTORY] Undid: {}", entry);
        Ok(entry)
    }

    /// Replays the next recorded move through full validation
    pub fn redo(&mut self) -> ChessEngineResult<MoveKind> {
        let mv = self
            .history
            .peek_next()
            .map(HistoryEntry::as_move)
            .ok_or(ChessEngineError::RedoExhausted)?;
        debug!("[HISTORY] Redo {}", mv);
        self.move_piece(mv)
    }

    /// Redoes `steps` moves when positive, undoes them when negative
    ///
    /// Stops quietly at either end of the history and returns how many steps were taken.
    pub fn undo_redo(&mut self, steps: i32) -> usize {
        let mut taken = 0;
        for _ in 0..steps.unsigned_abs() {
            let ok = if steps > 0 {
                self.redo().is_ok()
            } else {
                self.undo().is_ok()
            };
            if !ok {
                break;
            }
            taken += 1;
        }
        taken
    }

    pub fn undo_all(&mut self) -> usize {
        self.undo_redo(-(self.history.position() as i32))
    }

    pub fn redo_all(&mut self) -> usize {
        let remaining = self.history.len() - self.history.position();
        self.undo_redo(remaining as i32)
    }

    /// Moves played up to the history pointer, in order
    pub fn export_moves(&self) -> Vec<Move> {
        self.history
            .played()
            .iter()
            .map(HistoryEntry::as_move)
            .collect()
    }

    /// Plays `moves` in order from the current position, all or nothing
    ///
    /// The moves extend this board's history, so a game can be imported in parts and a board
    /// finalized from a [`Setup`](super::Setup) replays from its own start. Use
    /// [`Board::from_moves`] to import onto the opening position. On failure the board is
    /// untouched and the error names the first move that did not apply.
    pub fn import_moves(&mut self, moves: &[Move]) -> ChessEngineResult<()> {
        let mut scratch = self.clone();
        for (index, &mv) in moves.iter().enumerate() {
            if let Err(source) = scratch.move_piece(mv) {
                warn!("[HISTORY] Import rejected at move {} ({}): {}", index, mv, source);
                return Err(ChessEngineError::ImportFailed {
                    index,
                    source: Box::new(source),
                });
            }
        }
        *self = scratch;
        Ok(())
    }

    /// Opening position with `moves` played
    pub fn from_moves(moves: &[Move]) -> ChessEngineResult<Board> {
        let mut board = Board::new();
        board.import_moves(moves)?;
        Ok(board)
    }

    /// Independent copy rebuilt by replaying the played moves from the start of the history
    ///
    /// Any redo line is not carried over.
    pub fn clone_with_history(&self) -> Board {
        let mut base = self.clone();
        base.undo_all();
        base.history.clear();
        if let Err(err) = base.import_moves(&self.export_moves()) {
            integrity_fault!("recorded history does not replay: {}", err);
        }
        base
    }
}

/// Rook source and destination for a king landing on `king_to`
fn castle_rook_squares(king_to: Square) -> (Square, Square) {
    let rank = king_to.rank();
    if king_to.file() == 6 {
        (Square::at(7, rank), Square::at(5, rank))
    } else {
        (Square::at(0, rank), Square::at(3, rank))
    }
}
