//! Fixed-depth minimax over material
//!
//! ## Algorithm
//!
//! Plain negamax: every legal move is executed on the board, scored recursively from the
//! opponent's point of view, and undone. Leaves are scored by material for the side to move; a
//! checkmated side to move scores `-MATE_SCORE`, a drawn position zero.
//!
//! At the root, all moves sharing the best score are collected and one is chosen at random, so
//! equal positions do not always produce the same game. Progress is reported after each piece's
//! moves have been searched, and cancellation is checked before each root move, the only points
//! at which the board is guaranteed to be back at the root position.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::{SearchContext, Searcher};
use crate::board::Board;
use crate::constants::MATE_SCORE;
use crate::error::integrity_fault;
use crate::types::{GameState, Move, Square};

#[derive(Debug, Clone)]
pub struct MinimaxSearcher {
    depth: u8,
    rng: StdRng,
}

impl MinimaxSearcher {
    /// Searches `depth` plies (at least one)
    pub fn new(depth: u8) -> Self {
        Self::with_seed(depth, rand::random())
    }

    pub fn with_seed(depth: u8, seed: u64) -> Self {
        MinimaxSearcher {
            depth: depth.max(1),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }
}

impl Searcher for MinimaxSearcher {
    fn choose(&mut self, board: &mut Board, ctx: &SearchContext) -> Option<Move> {
        let moves = board.all_legal_moves();
        if moves.is_empty() {
            return None;
        }
        let movers = board.movers().count_ones().max(1);

        let mut best_score = i32::MIN;
        let mut best_moves = Vec::new();
        let mut done_movers = 0;
        let mut current_from: Option<Square> = None;

        for mv in moves {
            if ctx.is_cancelled() {
                debug!("[SEARCH] Cancelled after {} of {} pieces", done_movers, movers);
                return None;
            }
            if current_from.is_some_and(|from| from != mv.from) {
                done_movers += 1;
                ctx.report((done_movers * 100 / movers) as u8);
            }
            current_from = Some(mv.from);

            if board.move_piece(mv).is_err() {
                continue;
            }
            let score = -negamax(board, self.depth - 1);
            if board.undo().is_err() {
                integrity_fault!("search could not undo {}", mv);
            }

            if score > best_score {
                best_score = score;
                best_moves.clear();
            }
            if score == best_score {
                best_moves.push(mv);
            }
        }
        ctx.report(100);

        if best_moves.is_empty() {
            return None;
        }
        let choice = best_moves[self.rng.random_range(0..best_moves.len())];
        debug!(
            "[SEARCH] Chose {} (score {}, {} tied)",
            choice,
            best_score,
            best_moves.len()
        );
        Some(choice)
    }

    fn name(&self) -> &'static str {
        "minimax"
    }
}

/// Best achievable score for the side to move, `depth` plies deep
fn negamax(board: &mut Board, depth: u8) -> i32 {
    match board.state() {
        GameState::WhiteWins | GameState::BlackWins => return -MATE_SCORE,
        GameState::Stalemate => return 0,
        _ => {}
    }
    if depth == 0 {
        return board.value();
    }

    let mut best = i32::MIN;
    for mv in board.all_legal_moves() {
        if board.move_piece(mv).is_err() {
            continue;
        }
        let score = -negamax(board, depth - 1);
        if board.undo().is_err() {
            integrity_fault!("search could not undo {}", mv);
        }
        best = best.max(score);
    }
    if best == i32::MIN {
        board.value()
    } else {
        best
    }
}
