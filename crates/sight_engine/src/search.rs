//! Move choosers and the background search task
//!
//! A [`Searcher`] picks a move for the side to move. It may explore variations, but only by
//! executing and undoing moves on the board it was handed, one line at a time, so the board is
//! back in its original position whenever `choose` returns. Note that exploring discards any redo
//! line the board had.
//!
//! [`SearchTask`] runs a searcher on its own thread against a board rebuilt from a
//! [`crate::Snapshot`], reporting progress and the final choice over a channel. Cancelling it is
//! cooperative: searchers poll the [`CancelToken`] only between top-level moves.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crossbeam_channel::Sender;

use crate::board::Board;
use crate::types::Move;

pub mod minimax;
pub mod random;
pub mod task;

pub use minimax::MinimaxSearcher;
pub use random::RandomSearcher;
pub use task::{SearchEvent, SearchTask};

/// Shared flag asking a search to stop at its next safe point
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// What a searcher may consult besides the board
#[derive(Debug, Clone, Default)]
pub struct SearchContext {
    cancel: CancelToken,
    progress: Option<Sender<SearchEvent>>,
}

impl SearchContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn with_progress(mut self, progress: Sender<SearchEvent>) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Sends a percent-complete notice if anyone listens
    pub fn report(&self, percent: u8) {
        if let Some(progress) = &self.progress {
            // A dropped receiver only means nobody is watching any more
            let _ = progress.send(SearchEvent::Progress(percent.min(100)));
        }
    }
}

/// Chooses a move for the side to move
pub trait Searcher {
    /// Returns `None` when there is no legal move or the search was cancelled
    fn choose(&mut self, board: &mut Board, ctx: &SearchContext) -> Option<Move>;

    fn name(&self) -> &'static str;
}
