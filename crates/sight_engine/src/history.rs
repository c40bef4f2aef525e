//! Reversible move log
//!
//! Each [`HistoryEntry`] stores the move, who moved, what was captured, and the ancillary state as
//! it was *before* the move. That is enough for the board to invert the move directly, without
//! rerunning any detection.
//!
//! The log has a pointer. Undo moves it back, redo forward. Recording a move at a pointer that has
//! entries after it either keeps that line (when the move is exactly the next recorded one) or
//! truncates it.

use std::fmt;

use crate::bitset::BitSet;
use crate::piece::PieceIdentity;
use crate::types::{CastleRights, GameState, Move, MoveKind, PieceKind, Square};

/// One executed ply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryEntry {
    pub from: Square,
    pub to: Square,
    /// Mover as it stands after the move (a promoted pawn already carries its new kind)
    pub moved: PieceIdentity,
    pub captured: Option<PieceIdentity>,
    pub kind: MoveKind,
    pub state: GameState,
    pub fifty_move: u8,
    pub check_restriction: BitSet,
    pub en_passant: BitSet,
    pub castle_rights: CastleRights,
}

impl HistoryEntry {
    /// The move that replays this entry
    pub fn as_move(&self) -> Move {
        match self.kind {
            MoveKind::PromoteTo(kind) => Move::with_promotion(self.from, self.to, kind),
            _ => Move::new(self.from, self.to),
        }
    }

    /// Square the captured piece stood on
    pub fn capture_square(&self) -> Square {
        match self.kind {
            MoveKind::EnPassant => Square::at(self.to.file(), self.from.rank()),
            _ => self.to,
        }
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mover = match self.kind {
            MoveKind::PromoteTo(_) => format!("{} {}", self.moved.color, PieceKind::Pawn),
            _ => self.moved.to_string(),
        };
        match self.kind {
            MoveKind::Move => write!(f, "{} moved from {} to {}", mover, self.from, self.to),
            MoveKind::Capture | MoveKind::EnPassant => {
                write!(f, "{} moved from {} to {}", mover, self.from, self.to)?;
                if let Some(captured) = self.captured {
                    write!(f, ", capturing {}", captured)?;
                }
                if self.kind == MoveKind::EnPassant {
                    write!(f, " en passant")?;
                }
                Ok(())
            }
            MoveKind::Castle => {
                let side = if self.to.file() > self.from.file() {
                    "kingside"
                } else {
                    "queenside"
                };
                write!(f, "{} King castled {}", self.moved.color, side)
            }
            MoveKind::PromoteTo(kind) => {
                write!(f, "{} moved from {} to {}", mover, self.from, self.to)?;
                if let Some(captured) = self.captured {
                    write!(f, ", capturing {}", captured)?;
                }
                write!(f, " and promoted to {}", kind)
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
    position: usize,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `entry` at the pointer
    ///
    /// Returns `true` when the entry matched the recorded next move and the forward line was kept.
    pub fn record(&mut self, entry: HistoryEntry) -> bool {
        if self.entries.get(self.position) == Some(&entry) {
            self.position += 1;
            return true;
        }
        self.entries.truncate(self.position);
        self.entries.push(entry);
        self.position += 1;
        false
    }

    /// Steps the pointer back and returns the entry it passed
    pub fn step_back(&mut self) -> Option<HistoryEntry> {
        if self.position == 0 {
            return None;
        }
        self.position -= 1;
        Some(self.entries[self.position])
    }

    /// Entry a redo would replay, without moving the pointer
    pub fn peek_next(&self) -> Option<&HistoryEntry> {
        self.entries.get(self.position)
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.position.checked_sub(1).map(|i| &self.entries[i])
    }

    #[inline]
    pub fn can_undo(&self) -> bool {
        self.position > 0
    }

    #[inline]
    pub fn can_redo(&self) -> bool {
        self.position < self.entries.len()
    }

    /// Recorded entries, including any redo line
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries currently applied
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Entries up to the pointer
    pub fn played(&self) -> &[HistoryEntry] {
        &self.entries[..self.position]
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.position = 0;
    }
}
