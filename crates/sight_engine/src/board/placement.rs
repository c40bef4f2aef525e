//! Linking pieces in and out, and the refresh cascade that follows
//!
//! `register`/`unregister` only touch storage (grid, occupancy, sight links, material). The
//! `pick_up`/`put_down` pair used by move execution and undo adds the incremental refresh:
//!
//! 1. The placed piece is regenerated
//! 2. Each sight neighbor of the changed square is told which of its directions changed
//! 3. Knights a leap away are regenerated, since no sight line reaches them
//! 4. Both kings are regenerated after a put-down

use tracing::trace;

use super::Board;
use crate::bitset::BitSet;
use crate::error::integrity_fault;
use crate::move_gen::{behavior, king_bearing, Reaction};
use crate::sight::{NodeId, SightGraph};
use crate::types::{Color, Direction, PieceKind, Square};

impl Board {
    /// Puts the piece at `index` on `square` without refreshing anything else
    pub(crate) fn register(&mut self, index: usize, square: Square) {
        if self.grid[square.index()].is_some() {
            integrity_fault!("cannot register piece {} on occupied {}", index, square);
        }
        self.sight.link(&self.grid, square, index as NodeId);
        self.grid[square.index()] = Some(index as NodeId);

        let piece = &mut self.pieces[index];
        piece.square = Some(square);
        self.occupancy[piece.color.index()].insert(square);
        self.value += signed_value(piece.color, piece.kind);
        if piece.kind == PieceKind::King {
            piece.attacks = BitSet::king_ring(square);
        }
    }

    /// Takes the piece off `square` without refreshing anything else
    pub(crate) fn unregister(&mut self, square: Square) -> usize {
        let Some(node) = self.grid[square.index()] else {
            integrity_fault!("cannot unregister from empty {}", square);
        };
        let index = node as usize;
        self.sight.unlink(node);
        self.grid[square.index()] = None;

        let piece = &mut self.pieces[index];
        piece.square = None;
        piece.clear_caches();
        self.occupancy[piece.color.index()].remove(square);
        self.value -= signed_value(piece.color, piece.kind);
        index
    }

    /// Lifts the piece on `square` and refreshes whatever could see it
    pub(crate) fn pick_up(&mut self, square: Square) -> usize {
        let neighbors = match self.grid[square.index()] {
            Some(node) => self.sight.neighbors(node),
            None => integrity_fault!("pick up from empty {}", square),
        };
        let index = self.unregister(square);
        trace!("[ENGINE] Picked up piece {} from {}", index, square);

        for dir in Direction::ALL {
            self.notify(neighbors[dir.index()], dir.inverse());
        }
        self.refresh_knights_near(square);
        index
    }

    /// Places the piece at `index` on `square` and runs the full refresh cascade
    pub(crate) fn put_down(&mut self, index: usize, square: Square) {
        self.register(index, square);
        self.regenerate(index);
        trace!("[ENGINE] Put down piece {} on {}", index, square);

        let neighbors = self.sight.neighbors(index as NodeId);
        for dir in Direction::ALL {
            self.notify(neighbors[dir.index()], dir.inverse());
        }
        self.refresh_knights_near(square);
        self.regenerate_kings();
    }

    /// Recomputes attacks, moves and bearing of the piece at `index`
    pub(crate) fn regenerate(&mut self, index: usize) {
        let update = (behavior(self.pieces[index].kind).generate)(self, index);
        let piece = &mut self.pieces[index];
        piece.attacks = update.attacks;
        piece.moves = update.moves;
        piece.king_bearing = update.king_bearing;
    }

    pub(crate) fn regenerate_kings(&mut self) {
        for color in Color::ALL {
            self.regenerate(Board::king_index(color));
        }
    }

    /// Regenerates every on-board piece, kings last
    pub(crate) fn refresh_all(&mut self) {
        for index in 0..self.pieces.len() {
            if self.pieces[index].is_on_board() && self.pieces[index].kind != PieceKind::King {
                self.regenerate(index);
            }
        }
        self.regenerate_kings();
    }

    /// Tells the occupant `node` that its sight entry in `dir` changed
    fn notify(&mut self, node: NodeId, dir: Direction) {
        if SightGraph::is_sentinel(node) {
            return;
        }
        let index = node as usize;
        match (behavior(self.pieces[index].kind).react)(dir) {
            Reaction::Full => self.regenerate(index),
            Reaction::BearingOnly => {
                self.pieces[index].king_bearing = king_bearing(self, index);
            }
            Reaction::Ignore => {}
        }
    }

    fn refresh_knights_near(&mut self, square: Square) {
        for target in BitSet::knight_leaps(square) {
            if let Some(node) = self.grid[target.index()] {
                if self.pieces[node as usize].kind == PieceKind::Knight {
                    self.regenerate(node as usize);
                }
            }
        }
    }
}

#[inline]
fn signed_value(color: Color, kind: PieceKind) -> i32 {
    match color {
        Color::White => kind.value(),
        Color::Black => -kind.value(),
    }
}
