//! # Engine Constants - Pool Layout, Sight Arena and Rule Limits
//!
//! ## Piece Pool
//!
//! Each side owns a fixed pool of 16 slots, laid out by slot kind:
//!
//! ```text
//! offset  0..8   Pawn slots
//! offset  8..10  Rook slots
//! offset 10..12  Knight slots
//! offset 12..14  Bishop slots
//! offset 14      Queen slot
//! offset 15      King slot
//! ```
//!
//! White's pool is arena indices 0..16 and Black's 16..32. A slot keeps its index for the whole game;
//! promotion re-types a pawn slot in place rather than allocating.
//!
//! ## Sight Arena
//!
//! The visibility graph addresses both real pieces and border sentinels through one index space:
//! the 32 pool slots first, then the 36 sentinel cells ringing the board.

use crate::types::PieceKind;

/// Slots per side
pub const SLOTS_PER_COLOR: usize = 16;

/// Real piece records in the arena
pub const PIECE_SLOTS: usize = 32;

/// Border cells around the 8x8 board (a 10x10 ring)
pub const SENTINEL_COUNT: usize = 36;

/// Total sight nodes
pub const NODE_COUNT: usize = PIECE_SLOTS + SENTINEL_COUNT;

/// Position of each slot kind inside a color's pool, indexed by `PieceKind`
pub const KIND_OFFSET: [usize; 6] = [0, 8, 10, 12, 14, 15];

/// Plies without a pawn move or capture before the game is drawn
pub const FIFTY_MOVE_LIMIT: u8 = 50;

/// Score of a won position for the side that delivered mate
pub const MATE_SCORE: i32 = 1_000_000;

/// Arena index of a pool slot
#[inline]
pub const fn slot_index(color: usize, slot_kind: PieceKind, slot: usize) -> usize {
    color * SLOTS_PER_COLOR + KIND_OFFSET[slot_kind as usize] + slot
}

/// Slot kind and slot number stored at a pool offset
pub const fn slot_of_offset(offset: usize) -> (PieceKind, usize) {
    match offset {
        0..=7 => (PieceKind::Pawn, offset),
        8 | 9 => (PieceKind::Rook, offset - 8),
        10 | 11 => (PieceKind::Knight, offset - 10),
        12 | 13 => (PieceKind::Bishop, offset - 12),
        14 => (PieceKind::Queen, 0),
        _ => (PieceKind::King, 0),
    }
}
