//! Uniform random move choice
//!
//! Picks a random piece among those with a legal move, then a random destination for it. Pawns
//! reaching the last rank always become queens.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{SearchContext, Searcher};
use crate::board::Board;
use crate::types::{Move, PieceKind};

#[derive(Debug, Clone)]
pub struct RandomSearcher {
    rng: StdRng,
}

impl RandomSearcher {
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Reproducible choices for tests and benchmarks
    pub fn with_seed(seed: u64) -> Self {
        RandomSearcher {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomSearcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Searcher for RandomSearcher {
    fn choose(&mut self, board: &mut Board, ctx: &SearchContext) -> Option<Move> {
        if ctx.is_cancelled() {
            return None;
        }
        let movers: Vec<_> = board.movers().iter().collect();
        if movers.is_empty() {
            return None;
        }
        let from = movers[self.rng.random_range(0..movers.len())];
        let targets: Vec<_> = board.legal_moves_from(from).iter().collect();
        let to = targets[self.rng.random_range(0..targets.len())];

        let piece = board.piece_at(from)?;
        let promotion = (piece.kind == PieceKind::Pawn && to.rank() == piece.color.last_rank())
            .then_some(PieceKind::Queen);
        ctx.report(100);
        Some(Move { from, to, promotion })
    }

    fn name(&self) -> &'static str {
        "random"
    }
}
