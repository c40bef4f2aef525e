//! Zobrist position keys
//!
//! One random 64-bit key per (color, kind, square), plus keys for the side to move, each castle
//! right, and each en-passant file. The en-passant file only counts when a pawn of the side to move
//! stands ready to capture. A position's key is the XOR of the keys that apply. The table is
//! generated once from a fixed seed, so keys are stable across runs and processes.

use std::sync::OnceLock;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::Board;
use crate::types::Color;

const ZOBRIST_SEED: u64 = 0x5EED_C4E5_0F_B0A2D;

struct ZobristTable {
    pieces: [[[u64; 64]; 6]; 2],
    black_to_move: u64,
    castle: [u64; 4],
    en_passant_file: [u64; 8],
}

impl ZobristTable {
    fn generate() -> Self {
        let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);
        let mut pieces = [[[0u64; 64]; 6]; 2];
        for by_kind in pieces.iter_mut() {
            for by_square in by_kind.iter_mut() {
                for key in by_square.iter_mut() {
                    *key = rng.random();
                }
            }
        }
        ZobristTable {
            pieces,
            black_to_move: rng.random(),
            castle: std::array::from_fn(|_| rng.random()),
            en_passant_file: std::array::from_fn(|_| rng.random()),
        }
    }
}

fn table() -> &'static ZobristTable {
    static TABLE: OnceLock<ZobristTable> = OnceLock::new();
    TABLE.get_or_init(ZobristTable::generate)
}

/// Key of the board's current position
pub fn position_key(board: &Board) -> u64 {
    let table = table();
    let mut key = 0u64;
    for piece in board.pieces.iter() {
        if let Some(square) = piece.square {
            key ^= table.pieces[piece.color.index()][piece.kind.index()][square.index()];
        }
    }
    if board.turn == Color::Black {
        key ^= table.black_to_move;
    }
    let rights = board.castle_rights.bits();
    for (bit, castle_key) in table.castle.iter().enumerate() {
        if rights & (1 << bit) != 0 {
            key ^= castle_key;
        }
    }
    // Only a target some pawn can take changes the position
    if let Some(target) = board.en_passant.first() {
        if board
            .on_board_indices(board.turn)
            .any(|index| board.en_passant_capture(index).is_some())
        {
            key ^= table.en_passant_file[target.file() as usize];
        }
    }
    key
}

#[cfg(test)]
mod tests {
    use crate::board::Board;
    use crate::types::{Move, Square};

    fn mv(from: &str, to: &str) -> Move {
        Move::new(
            Square::from_algebraic(from).unwrap(),
            Square::from_algebraic(to).unwrap(),
        )
    }

    #[test]
    fn test_transposition_has_same_key() {
        let a = Board::from_moves(&[mv("g1", "f3"), mv("g8", "f6"), mv("b1", "c3")]).unwrap();
        let b = Board::from_moves(&[mv("b1", "c3"), mv("g8", "f6"), mv("g1", "f3")]).unwrap();
        assert_eq!(a.hash_key(), b.hash_key());
        assert_ne!(a.hash_key(), Board::new().hash_key());
    }

    #[test]
    fn test_side_to_move_changes_key() {
        let there = Board::from_moves(&[mv("g1", "f3")]).unwrap();
        let back = Board::from_moves(&[mv("g1", "f3"), mv("g8", "f6"), mv("f3", "g1"), mv("f6", "g8")])
            .unwrap();
        assert_eq!(back.hash_key(), Board::new().hash_key());
        assert_ne!(there.hash_key(), back.hash_key());
    }

    #[test]
    fn test_unreachable_en_passant_is_not_hashed() {
        // After 1. e4 no black pawn can take on e3, so the move order does not matter
        let pushed = Board::from_moves(&[mv("g1", "f3"), mv("g8", "f6"), mv("e2", "e4")]).unwrap();
        let developed =
            Board::from_moves(&[mv("e2", "e4"), mv("g8", "f6"), mv("g1", "f3")]).unwrap();
        assert!(pushed.en_passant().is_some());
        assert_eq!(developed.en_passant(), None);
        assert_eq!(pushed.hash_key(), developed.hash_key());
    }

    #[test]
    fn test_capturable_en_passant_changes_key() {
        let double = Board::from_moves(&[
            mv("e2", "e4"),
            mv("g8", "f6"),
            mv("e4", "e5"),
            mv("d7", "d5"),
        ])
        .unwrap();
        assert_eq!(double.en_passant(), Some(Square::from_algebraic("d6").unwrap()));

        let mut setup = double.clone().into_setup();
        setup.set_en_passant(None);
        let cleared = setup.finalize().unwrap();
        assert_eq!(cleared.en_passant(), None);
        assert_ne!(double.hash_key(), cleared.hash_key());
    }
}
