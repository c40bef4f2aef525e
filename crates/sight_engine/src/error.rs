//! Error types for the chess engine
//!
//! Caller mistakes (bad coordinates, wrong turn, illegal destination, exhausted history, full piece
//! pools) are reported as [`ChessEngineError`] values and never leave the board modified.
//!
//! Internal-consistency faults are a different class: a missing king, overlapping occupancy, or a
//! broken sight link mean the engine itself is wrong. Those go through [`integrity_fault!`], which
//! logs and panics instead of producing a recoverable value.

use thiserror::Error;

use crate::types::{Color, GameState, PieceKind, Square};

/// Errors that can occur in the chess engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessEngineError {
    /// Coordinates outside the 8x8 board
    #[error("Square out of bounds: file {file}, rank {rank} (both must be 0-7)")]
    OutOfBounds { file: i8, rank: i8 },

    /// Text that is not an algebraic square name
    #[error("Not a square name: {name:?}")]
    BadSquareName { name: String },

    /// No piece at the source square
    #[error("No piece at square {square}")]
    EmptySquare { square: Square },

    /// Target square of a placement already holds a piece
    #[error("Square {square} is already occupied")]
    OccupiedSquare { square: Square },

    /// Piece belongs to the side not on move
    #[error("Piece at {square} belongs to {found}, but {expected} is to move")]
    WrongTurn {
        square: Square,
        found: Color,
        expected: Color,
    },

    /// Destination is not among the piece's legal moves
    #[error("Illegal move from {from} to {to}")]
    IllegalMove { from: Square, to: Square },

    /// Source and destination coincide
    #[error("Source and destination are both {square}")]
    SameSquare { square: Square },

    /// Pawn reached the last rank without a usable promotion kind
    #[error("Invalid promotion kind {kind:?} (expected Queen, Rook, Bishop or Knight)")]
    InvalidPromotion { kind: Option<PieceKind> },

    /// A specific pool slot was placed twice
    #[error("{color} {kind} slot {slot} is already on the board")]
    PieceAlreadyPlaced {
        color: Color,
        kind: PieceKind,
        slot: u8,
    },

    /// No free slot for the requested piece, not even a spare pawn slot
    #[error("No free slot left for a {color} {kind}")]
    PoolExhausted { color: Color, kind: PieceKind },

    /// Pawns cannot stand on the first or last rank
    #[error("Pawn cannot be placed on {square}")]
    PawnOnBackRank { square: Square },

    /// Nothing left to undo
    #[error("No move to undo")]
    UndoExhausted,

    /// Nothing left to redo
    #[error("No move to redo")]
    RedoExhausted,

    /// The game has already ended
    #[error("Game is over: {state}")]
    GameOver { state: GameState },

    /// A side has no king when the position is finalized
    #[error("{color} has no king on the board")]
    MissingKing { color: Color },

    /// A finalized draft could not have arisen in play
    #[error("Illegal position: {reason}")]
    IllegalPosition { reason: String },

    /// A move list could not be replayed
    #[error("Import failed at move {index}: {source}")]
    ImportFailed {
        index: usize,
        #[source]
        source: Box<ChessEngineError>,
    },

    /// Packed position words do not describe a valid position
    #[error("Invalid snapshot: {reason}")]
    InvalidSnapshot { reason: String },
}

/// Result type alias for chess engine operations
pub type ChessEngineResult<T> = Result<T, ChessEngineError>;

/// Aborts on a broken engine invariant
///
/// These are bugs, not caller errors, so the position is treated as poisoned and never repaired.
macro_rules! integrity_fault {
    ($($arg:tt)*) => {{
        let message = format!($($arg)*);
        tracing::error!("[ENGINE] Integrity fault: {}", message);
        panic!("engine integrity fault: {}", message);
    }};
}

pub(crate) use integrity_fault;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_error_keeps_source() {
        let inner = ChessEngineError::IllegalMove {
            from: Square::at(4, 1),
            to: Square::at(4, 4),
        };
        let err = ChessEngineError::ImportFailed {
            index: 3,
            source: Box::new(inner.clone()),
        };
        assert_eq!(err.to_string(), "Import failed at move 3: Illegal move from e2 to e5");
        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(source, Some(inner.to_string()));
    }

    #[test]
    #[should_panic(expected = "engine integrity fault: both kings")]
    fn test_integrity_fault_panics() {
        integrity_fault!("both kings {}", "in check");
    }
}
