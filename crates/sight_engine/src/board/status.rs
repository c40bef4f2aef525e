//! Check, checkmate and stalemate detection

use tracing::debug;

use super::Board;
use crate::bitset::BitSet;
use crate::constants::FIFTY_MOVE_LIMIT;
use crate::error::integrity_fault;
use crate::types::{Color, Direction, GameState};

impl Board {
    /// Derives the check restriction and game state from the current attack sets
    pub(crate) fn update_game_state(&mut self) {
        let white_checked = self
            .attacks_of(Color::Black)
            .contains(self.king_square(Color::White));
        let black_checked = self
            .attacks_of(Color::White)
            .contains(self.king_square(Color::Black));

        let checked = match (white_checked, black_checked) {
            (true, true) => integrity_fault!("both kings are in check"),
            (true, false) => Some(Color::White),
            (false, true) => Some(Color::Black),
            (false, false) => None,
        };

        self.check_restriction = match checked {
            Some(color) => self.restriction_for(color),
            None => BitSet::EMPTY,
        };
        // Provisional state so the legality filter does not treat the game as over
        self.state = match checked {
            Some(Color::White) => GameState::WhiteInCheck,
            Some(Color::Black) => GameState::BlackInCheck,
            None => GameState::Play,
        };

        let has_moves = self
            .on_board_indices(self.turn)
            .any(|index| !self.legal_moves_of(index).is_empty());
        let only_kings = (self.occupancy[0] | self.occupancy[1]).count_ones() == 2;

        if checked == Some(self.turn) && !has_moves {
            self.state = match self.turn {
                Color::White => GameState::BlackWins,
                Color::Black => GameState::WhiteWins,
            };
        } else if checked.is_none() && (!has_moves || only_kings) {
            self.state = GameState::Stalemate;
        } else if self.fifty_move >= FIFTY_MOVE_LIMIT {
            self.state = GameState::Stalemate;
        }
        if self.state.is_game_over() {
            debug!("[ENGINE] Game over: {}", self.state);
        }
    }

    /// Squares that answer a check on `color`'s king, empty under double check
    fn restriction_for(&self, color: Color) -> BitSet {
        let king = self.king_square(color);
        let mut attackers = self
            .on_board_indices(color.opposite())
            .filter(|&index| self.pieces[index].attacks.contains(king));

        let Some(first) = attackers.next() else {
            return BitSet::EMPTY;
        };
        if attackers.next().is_some() {
            return BitSet::EMPTY;
        }

        let attacker = &self.pieces[first];
        let Some(at) = attacker.square else {
            return BitSet::EMPTY;
        };
        match Direction::between(king, at) {
            Some(dir) if attacker.kind.slides_along(dir) => BitSet::segment(king, dir, at),
            _ => at.bit(),
        }
    }
}
