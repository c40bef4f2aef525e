//! Searching on a background thread
//!
//! The task owns its own board, rebuilt from a snapshot of the caller's, so the caller's board is
//! never shared or mutated from another thread.

use std::thread::{self, JoinHandle};

use crossbeam_channel::{unbounded, Receiver};
use tracing::{debug, error};

use super::{CancelToken, SearchContext, Searcher};
use crate::board::Board;
use crate::snapshot::Snapshot;
use crate::types::Move;

/// Notices sent by a running search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchEvent {
    /// Percent of the root moves searched
    Progress(u8),
    /// The search ended; `None` if cancelled or no move exists
    Finished(Option<Move>),
}

pub struct SearchTask {
    cancel: CancelToken,
    events: Receiver<SearchEvent>,
    handle: JoinHandle<Option<Move>>,
}

impl SearchTask {
    /// Starts `searcher` on a copy of `board`'s position
    pub fn spawn<S>(board: &Board, searcher: S) -> SearchTask
    where
        S: Searcher + Send + 'static,
    {
        Self::spawn_snapshot(board.snapshot(), searcher)
    }

    pub fn spawn_snapshot<S>(snapshot: Snapshot, mut searcher: S) -> SearchTask
    where
        S: Searcher + Send + 'static,
    {
        let cancel = CancelToken::new();
        let (sender, events) = unbounded();
        let ctx = SearchContext::new()
            .with_cancel(cancel.clone())
            .with_progress(sender.clone());

        let handle = thread::spawn(move || {
            let choice = match Board::from_snapshot(&snapshot) {
                Ok(mut board) => {
                    debug!("[SEARCH] {} search started", searcher.name());
                    searcher.choose(&mut board, &ctx)
                }
                Err(err) => {
                    error!("[SEARCH] Could not rebuild the position: {}", err);
                    None
                }
            };
            let choice = if ctx.is_cancelled() { None } else { choice };
            let _ = sender.send(SearchEvent::Finished(choice));
            choice
        });

        SearchTask {
            cancel,
            events,
            handle,
        }
    }

    /// Asks the search to stop at its next safe point
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Progress and completion notices
    pub fn progress(&self) -> &Receiver<SearchEvent> {
        &self.events
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the search and returns its choice
    pub fn join(self) -> Option<Move> {
        match self.handle.join() {
            Ok(choice) => choice,
            Err(_) => {
                error!("[SEARCH] Search thread panicked");
                None
            }
        }
    }
}
