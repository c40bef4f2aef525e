//! # Snapshot - A Position in Five Words
//!
//! ## Layout
//!
//! A [`Snapshot`] packs one position, without history, into 320 bits. Every pool slot gets a field
//! with an on-board bit followed by a 6-bit square. Pawn slots carry three more bits with their
//! current kind, so promoted pawns survive the trip.
//!
//! ```text
//! word 0  White R0 R1 N0 N1 B0 B1 Q K   8 x 7 bits   | bits 56..63 en passant (valid + square) | bit 63 Black to move
//! word 1  Black R0 R1 N0 N1 B0 B1 Q K   8 x 7 bits   | bits 56..62 fifty-move counter
//! word 2  White pawns 0..6              6 x 10 bits  | bits 60..64 castle rights
//! word 3  Black pawns 0..6              6 x 10 bits
//! word 4  White pawns 6, 7 then Black pawns 6, 7     4 x 10 bits
//! ```
//!
//! Decoding goes through [`Setup`], so a snapshot can only ever produce a finalized, valid board.

use serde::{Deserialize, Serialize};

use crate::board::{Board, Setup};
use crate::constants::{slot_of_offset, FIFTY_MOVE_LIMIT, SLOTS_PER_COLOR};
use crate::error::{integrity_fault, ChessEngineError, ChessEngineResult};
use crate::piece::PieceIdentity;
use crate::types::{CastleRights, Color, PieceKind, Square};

const OFFICER_BITS: u32 = 7;
const PAWN_BITS: u32 = 10;
const EN_PASSANT_SHIFT: u32 = 56;
const TURN_SHIFT: u32 = 63;
const FIFTY_SHIFT: u32 = 56;
const CASTLE_SHIFT: u32 = 60;
/// Pool offset of the first non-pawn slot
const FIRST_OFFICER: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Snapshot {
    pub words: [u64; 5],
}

/// Word and bit position of a pool slot's field
fn field_location(color: Color, offset: usize) -> (usize, u32) {
    if offset >= FIRST_OFFICER {
        let word = color.index();
        (word, (offset - FIRST_OFFICER) as u32 * OFFICER_BITS)
    } else if offset < 6 {
        (2 + color.index(), offset as u32 * PAWN_BITS)
    } else {
        let position = color.index() * 2 + (offset - 6);
        (4, position as u32 * PAWN_BITS)
    }
}

impl Snapshot {
    pub fn from_words(words: [u64; 5]) -> Self {
        Snapshot { words }
    }

    /// Packs `board`'s position
    pub fn encode(board: &Board) -> Self {
        let mut words = [0u64; 5];
        for (index, piece) in board.pieces.iter().enumerate() {
            let Some(square) = piece.square else { continue };
            let offset = index % SLOTS_PER_COLOR;
            let (word, shift) = field_location(piece.color, offset);
            let mut field = 1 | ((square.index() as u64) << 1);
            if offset < FIRST_OFFICER {
                field |= (piece.kind.index() as u64) << 7;
            }
            words[word] |= field << shift;
        }

        if let Some(target) = board.en_passant.first() {
            words[0] |= (1 | ((target.index() as u64) << 1)) << EN_PASSANT_SHIFT;
        }
        if board.turn == Color::Black {
            words[0] |= 1 << TURN_SHIFT;
        }
        words[1] |= (board.fifty_move.min(FIFTY_MOVE_LIMIT) as u64) << FIFTY_SHIFT;
        words[2] |= (board.castle_rights.bits() as u64) << CASTLE_SHIFT;
        Snapshot { words }
    }

    /// Rebuilds a board with this position and an empty history
    ///
    /// # Errors
    ///
    /// [`ChessEngineError::InvalidSnapshot`] if the words do not describe a valid position.
    pub fn decode(&self) -> ChessEngineResult<Board> {
        let invalid = |reason: String| ChessEngineError::InvalidSnapshot { reason };
        let words = &self.words;
        let mut setup = Setup::empty();

        for color in Color::ALL {
            for offset in 0..SLOTS_PER_COLOR {
                let (word, shift) = field_location(color, offset);
                let width = if offset < FIRST_OFFICER {
                    PAWN_BITS
                } else {
                    OFFICER_BITS
                };
                let field = (words[word] >> shift) & ((1 << width) - 1);
                if field & 1 == 0 {
                    continue;
                }
                let square = Square::from_index(((field >> 1) & 0x3F) as u8)
                    .ok_or_else(|| invalid(format!("bad square in slot {}", offset)))?;
                let (slot_kind, slot) = slot_of_offset(offset);
                let kind = if offset < FIRST_OFFICER {
                    PieceKind::from_index((field >> 7) as usize)
                        .filter(|k| *k == PieceKind::Pawn || k.is_promotion_target())
                        .ok_or_else(|| invalid(format!("bad kind {} in pawn slot", field >> 7)))?
                } else {
                    slot_kind
                };
                let identity = PieceIdentity {
                    color,
                    kind,
                    slot_kind,
                    slot: slot as u8,
                    was_pawn: kind != slot_kind,
                };
                setup
                    .place_piece(identity, square)
                    .map_err(|err| invalid(err.to_string()))?;
            }
        }

        let en_passant = (words[0] >> EN_PASSANT_SHIFT) & 0x7F;
        let target = if en_passant & 1 == 1 {
            Square::from_index((en_passant >> 1) as u8)
        } else {
            None
        };
        let turn = if (words[0] >> TURN_SHIFT) & 1 == 1 {
            Color::Black
        } else {
            Color::White
        };
        let fifty = ((words[1] >> FIFTY_SHIFT) & 0x3F) as u8;
        if fifty > FIFTY_MOVE_LIMIT {
            return Err(invalid(format!("fifty-move counter {} above limit", fifty)));
        }
        let rights = CastleRights::from_bits((words[2] >> CASTLE_SHIFT) as u8);

        setup
            .set_turn(turn)
            .set_castle_rights(rights)
            .set_en_passant(target)
            .set_fifty_move_counter(fifty);
        setup.finalize().map_err(|err| invalid(err.to_string()))
    }
}

impl Board {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::encode(self)
    }

    pub fn from_snapshot(snapshot: &Snapshot) -> ChessEngineResult<Board> {
        snapshot.decode()
    }

    /// Independent copy of the position without history
    pub fn clone_position(&self) -> Board {
        match self.snapshot().decode() {
            Ok(board) => board,
            Err(err) => integrity_fault!("snapshot of a live board does not decode: {}", err),
        }
    }
}
