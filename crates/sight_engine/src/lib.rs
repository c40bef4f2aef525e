//! # Sight Engine - Legality-Correct Chess Positions
//!
//! A chess position engine that keeps every piece's legal moves up to date incrementally. Each
//! occupant of the board is linked to its nearest neighbor in all eight directions (with a ring of
//! border sentinels closing every ray), so a move only refreshes the pieces that could actually be
//! affected instead of rescanning the board.
//!
//! ## Quick Start
//!
//! ```rust
//! use sight_engine::{Board, Move, Square};
//!
//! let mut board = Board::new();
//! assert_eq!(board.all_legal_moves().len(), 20);
//!
//! let e2 = Square::from_algebraic("e2").unwrap();
//! let e4 = Square::from_algebraic("e4").unwrap();
//! board.move_piece(Move::new(e2, e4)).unwrap();
//! board.undo().unwrap();
//! assert_eq!(board.snapshot(), Board::new().snapshot());
//! ```
//!
//! ## Modules
//!
//! - [`bitset`]: 64-square sets and line templates
//! - [`sight`]: the line-of-sight graph
//! - [`move_gen`]: per-kind attack and move generation
//! - [`board`]: placement, execution, legality, detection, undo/redo
//! - [`history`]: the reversible move log
//! - [`snapshot`]: five-word position encoding
//! - [`search`]: move choosers and the background search task

pub mod bitset;
pub mod board;
pub mod constants;
pub mod error;
pub mod hash;
pub mod history;
pub mod move_gen;
pub mod piece;
pub mod search;
pub mod sight;
pub mod snapshot;
pub mod types;

pub use bitset::BitSet;
pub use board::{Board, Setup};
pub use error::{ChessEngineError, ChessEngineResult};
pub use history::{History, HistoryEntry};
pub use piece::PieceIdentity;
pub use search::{
    CancelToken, MinimaxSearcher, RandomSearcher, SearchContext, SearchEvent, SearchTask, Searcher,
};
pub use snapshot::Snapshot;
pub use types::{CastleRights, Color, Direction, GameState, Move, MoveKind, PieceKind, Square};
