//! Piece records held in the board's fixed pool

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::bitset::BitSet;
use crate::constants::{slot_index, slot_of_offset, SLOTS_PER_COLOR};
use crate::types::{Color, Direction, PieceKind, Square};

/// Who a piece is, independent of where it stands
///
/// `kind` is the current behaviour. `slot_kind` and `slot` name the pool slot, which for a promoted
/// pawn is still a pawn slot (and `was_pawn` is set).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceIdentity {
    pub color: Color,
    pub kind: PieceKind,
    pub slot_kind: PieceKind,
    pub slot: u8,
    pub was_pawn: bool,
}

impl PieceIdentity {
    /// Arena index of this identity's slot
    #[inline]
    pub fn index(&self) -> usize {
        slot_index(self.color.index(), self.slot_kind, self.slot as usize)
    }
}

impl fmt::Display for PieceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color, self.kind)
    }
}

/// One pool slot: fixed identity plus the cached per-piece results
#[derive(Debug, Clone)]
pub(crate) struct PieceRecord {
    pub color: Color,
    pub kind: PieceKind,
    pub slot_kind: PieceKind,
    pub slot: u8,
    pub was_pawn: bool,
    pub square: Option<Square>,
    pub attacks: BitSet,
    pub moves: BitSet,
    pub king_bearing: Option<Direction>,
}

impl PieceRecord {
    /// Slot `index` of a full pool in its original kind, off the board
    pub fn for_index(index: usize) -> Self {
        let color = if index < SLOTS_PER_COLOR {
            Color::White
        } else {
            Color::Black
        };
        let (slot_kind, slot) = slot_of_offset(index % SLOTS_PER_COLOR);
        PieceRecord {
            color,
            kind: slot_kind,
            slot_kind,
            slot: slot as u8,
            was_pawn: false,
            square: None,
            attacks: BitSet::EMPTY,
            moves: BitSet::EMPTY,
            king_bearing: None,
        }
    }

    #[inline]
    pub fn identity(&self) -> PieceIdentity {
        PieceIdentity {
            color: self.color,
            kind: self.kind,
            slot_kind: self.slot_kind,
            slot: self.slot,
            was_pawn: self.was_pawn,
        }
    }

    #[inline]
    pub fn is_on_board(&self) -> bool {
        self.square.is_some()
    }

    pub fn clear_caches(&mut self) {
        self.attacks = BitSet::EMPTY;
        self.moves = BitSet::EMPTY;
        self.king_bearing = None;
    }

    /// Re-types the slot, or restores it to its own kind
    pub fn retype(&mut self, kind: PieceKind) {
        self.kind = kind;
        self.was_pawn = self.slot_kind == PieceKind::Pawn && kind != PieceKind::Pawn;
    }
}
