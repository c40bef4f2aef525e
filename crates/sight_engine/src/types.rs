//! # Core Types - Colors, Pieces, Squares, Directions and Moves
//!
//! ## Overview
//!
//! This module defines the small value types every other part of the engine speaks in. All of them
//! are `Copy`, fit in one or two bytes, and carry no references into the board, so they can be stored
//! freely in history entries, snapshots and move lists.
//!
//! ## Square Numbering
//!
//! Squares use the same bijection as [`crate::bitset::BitSet`]:
//!
//! - `index = rank * 8 + file`
//! - Bit 0 = a1, bit 7 = h1, bit 56 = a8, bit 63 = h8
//!
//! Files and ranks are both in `[0, 7]`. White starts on ranks 0 and 1, Black on ranks 6 and 7.
//!
//! ## Directions
//!
//! The eight compass directions are numbered so that the inverse of a direction is always
//! `(d + 4) % 8`, and diagonals occupy the even slots:
//!
//! ```text
//!   UpLeft(2)    Up(3)    UpRight(4)
//!   Left(1)        .      Right(5)
//!   DownLeft(0)  Down(7)  DownRight(6)
//! ```
//!
//! There is deliberately no `Unknown` variant. Where a direction may be absent (a piece that cannot
//! see its own king), the engine uses `Option<Direction>`, so "look up the ray for an unknown
//! direction" cannot be expressed at all.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::bitset::BitSet;
use crate::error::{ChessEngineError, ChessEngineResult};

/// Side of the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Rank holding this side's king and rooks at the start
    #[inline]
    pub fn home_rank(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    /// Rank holding this side's pawns at the start
    #[inline]
    pub fn pawn_rank(self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    /// Rank on which this side's pawns promote
    #[inline]
    pub fn last_rank(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// Rank a pawn of this color must stand on to capture en passant
    #[inline]
    pub fn en_passant_rank(self) -> u8 {
        match self {
            Color::White => 4,
            Color::Black => 3,
        }
    }

    /// Rank step of a pawn advance
    #[inline]
    pub fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::White => "White",
            Color::Black => "Black",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Kind of a chess piece
///
/// The declaration order is also the order of the per-color piece pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn = 0,
    Rook = 1,
    Knight = 2,
    Bishop = 3,
    Queen = 4,
    King = 5,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Kinds a pawn may become on the last rank
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<PieceKind> {
        PieceKind::ALL.get(index).copied()
    }

    /// Number of slots each side owns for this kind
    #[inline]
    pub fn pool_size(self) -> usize {
        match self {
            PieceKind::Pawn => 8,
            PieceKind::Rook | PieceKind::Knight | PieceKind::Bishop => 2,
            PieceKind::Queen | PieceKind::King => 1,
        }
    }

    /// Material weight used for the running board value
    #[inline]
    pub fn value(self) -> i32 {
        match self {
            PieceKind::Pawn => 1,
            PieceKind::Knight | PieceKind::Bishop => 3,
            PieceKind::Rook => 5,
            PieceKind::Queen => 9,
            PieceKind::King => 0,
        }
    }

    #[inline]
    pub fn is_promotion_target(self) -> bool {
        matches!(
            self,
            PieceKind::Queen | PieceKind::Rook | PieceKind::Bishop | PieceKind::Knight
        )
    }

    /// Whether this kind slides along the axis of `dir`
    #[inline]
    pub fn slides_along(self, dir: Direction) -> bool {
        match self {
            PieceKind::Queen => true,
            PieceKind::Rook => !dir.is_diagonal(),
            PieceKind::Bishop => dir.is_diagonal(),
            _ => false,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Rook => "Rook",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
        }
    }

    /// Upper-case letter used by board printouts
    pub fn symbol(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Rook => 'R',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One of the 64 board squares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Square(u8);

impl Square {
    /// Builds a square from signed coordinates, rejecting anything off the board
    pub fn new(file: i8, rank: i8) -> ChessEngineResult<Square> {
        if !(0..8).contains(&file) || !(0..8).contains(&rank) {
            return Err(ChessEngineError::OutOfBounds { file, rank });
        }
        Ok(Square((rank * 8 + file) as u8))
    }

    /// Builds a square from in-range coordinates
    #[inline]
    pub(crate) const fn at(file: u8, rank: u8) -> Square {
        Square(rank * 8 + file)
    }

    #[inline]
    pub fn from_index(index: u8) -> Option<Square> {
        (index < 64).then_some(Square(index))
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn file(self) -> u8 {
        self.0 % 8
    }

    #[inline]
    pub fn rank(self) -> u8 {
        self.0 / 8
    }

    #[inline]
    pub fn bit(self) -> BitSet {
        BitSet(1u64 << self.0)
    }

    /// The square `(df, dr)` away, if it is on the board
    #[inline]
    pub fn offset(self, df: i8, dr: i8) -> Option<Square> {
        let file = self.file() as i8 + df;
        let rank = self.rank() as i8 + dr;
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Some(Square((rank * 8 + file) as u8))
        } else {
            None
        }
    }

    /// The adjacent square in `dir`, if any
    #[inline]
    pub fn step(self, dir: Direction) -> Option<Square> {
        let (df, dr) = dir.offset();
        self.offset(df, dr)
    }

    /// Parses algebraic names such as `e4`
    pub fn from_algebraic(name: &str) -> ChessEngineResult<Square> {
        let bytes = name.as_bytes();
        if bytes.len() != 2 {
            return Err(ChessEngineError::BadSquareName {
                name: name.to_string(),
            });
        }
        let file = bytes[0].wrapping_sub(b'a') as i8;
        let rank = bytes[1].wrapping_sub(b'1') as i8;
        Square::new(file, rank).map_err(|_| ChessEngineError::BadSquareName {
            name: name.to_string(),
        })
    }

    pub fn iter() -> impl Iterator<Item = Square> {
        (0..64u8).map(Square)
    }
}

impl TryFrom<u8> for Square {
    type Error = ChessEngineError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Square::from_index(index).ok_or(ChessEngineError::OutOfBounds {
            file: (index % 8) as i8,
            rank: (index / 8) as i8,
        })
    }
}

impl From<Square> for u8 {
    fn from(square: Square) -> u8 {
        square.0
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            (b'a' + self.file()) as char,
            (b'1' + self.rank()) as char
        )
    }
}

/// Compass direction on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    DownLeft = 0,
    Left = 1,
    UpLeft = 2,
    Up = 3,
    UpRight = 4,
    Right = 5,
    DownRight = 6,
    Down = 7,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::DownLeft,
        Direction::Left,
        Direction::UpLeft,
        Direction::Up,
        Direction::UpRight,
        Direction::Right,
        Direction::DownRight,
        Direction::Down,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn from_index(index: usize) -> Direction {
        Direction::ALL[index % 8]
    }

    #[inline]
    pub fn inverse(self) -> Direction {
        Direction::from_index(self.index() + 4)
    }

    #[inline]
    pub fn is_diagonal(self) -> bool {
        self.index() % 2 == 0
    }

    /// `(file, rank)` step
    #[inline]
    pub fn offset(self) -> (i8, i8) {
        match self {
            Direction::DownLeft => (-1, -1),
            Direction::Left => (-1, 0),
            Direction::UpLeft => (-1, 1),
            Direction::Up => (0, 1),
            Direction::UpRight => (1, 1),
            Direction::Right => (1, 0),
            Direction::DownRight => (1, -1),
            Direction::Down => (0, -1),
        }
    }

    /// Direction of the straight line from `from` to `to`, if they share one
    pub fn between(from: Square, to: Square) -> Option<Direction> {
        let df = to.file() as i8 - from.file() as i8;
        let dr = to.rank() as i8 - from.rank() as i8;
        if (df == 0 && dr == 0) || (df != 0 && dr != 0 && df.abs() != dr.abs()) {
            return None;
        }
        let step = (df.signum(), dr.signum());
        Direction::ALL.into_iter().find(|d| d.offset() == step)
    }
}

/// Game outcome as seen after the last executed move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    Play,
    WhiteInCheck,
    BlackInCheck,
    WhiteWins,
    BlackWins,
    Stalemate,
}

impl GameState {
    #[inline]
    pub fn is_game_over(self) -> bool {
        matches!(
            self,
            GameState::WhiteWins | GameState::BlackWins | GameState::Stalemate
        )
    }

    /// Side currently in check, if any
    #[inline]
    pub fn checked_side(self) -> Option<Color> {
        match self {
            GameState::WhiteInCheck => Some(Color::White),
            GameState::BlackInCheck => Some(Color::Black),
            _ => None,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            GameState::Play => "Normal Play",
            GameState::WhiteInCheck => "White is in Check",
            GameState::BlackInCheck => "Black is in Check",
            GameState::WhiteWins => "White Wins",
            GameState::BlackWins => "Black Wins",
            GameState::Stalemate => "Stalemate",
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// A requested move: source, destination and the promotion kind when a pawn reaches the last rank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Move {
            from,
            to,
            promotion: None,
        }
    }

    pub fn with_promotion(from: Square, to: Square, kind: PieceKind) -> Self {
        Move {
            from,
            to,
            promotion: Some(kind),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "={}", kind.symbol())?;
        }
        Ok(())
    }
}

/// How an executed move changed the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    Move,
    Capture,
    EnPassant,
    Castle,
    PromoteTo(PieceKind),
}

/// Castle availability, one bit per side and rook
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CastleRights(u8);

impl CastleRights {
    pub const WHITE_KINGSIDE: u8 = 0b0001;
    pub const WHITE_QUEENSIDE: u8 = 0b0010;
    pub const BLACK_KINGSIDE: u8 = 0b0100;
    pub const BLACK_QUEENSIDE: u8 = 0b1000;

    pub const NONE: CastleRights = CastleRights(0);
    pub const ALL: CastleRights = CastleRights(0b1111);

    pub fn from_bits(bits: u8) -> Self {
        CastleRights(bits & 0b1111)
    }

    #[inline]
    pub fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub(crate) fn flag(color: Color, kingside: bool) -> u8 {
        match (color, kingside) {
            (Color::White, true) => Self::WHITE_KINGSIDE,
            (Color::White, false) => Self::WHITE_QUEENSIDE,
            (Color::Black, true) => Self::BLACK_KINGSIDE,
            (Color::Black, false) => Self::BLACK_QUEENSIDE,
        }
    }

    #[inline]
    pub fn allows(self, color: Color, kingside: bool) -> bool {
        self.0 & Self::flag(color, kingside) != 0
    }

    pub fn revoke(&mut self, color: Color, kingside: bool) {
        self.0 &= !Self::flag(color, kingside);
    }

    pub fn revoke_color(&mut self, color: Color) {
        self.revoke(color, true);
        self.revoke(color, false);
    }

    /// Drops whichever right depends on a rook standing on `square`
    pub(crate) fn revoke_corner(&mut self, square: Square) {
        for color in Color::ALL {
            if square.rank() != color.home_rank() {
                continue;
            }
            match square.file() {
                0 => self.revoke(color, false),
                7 => self.revoke(color, true),
                _ => {}
            }
        }
    }
}

impl Default for CastleRights {
    fn default() -> Self {
        CastleRights::ALL
    }
}
