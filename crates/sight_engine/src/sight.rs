//! # Sight Graph - Incremental Line-of-Sight Links
//!
//! ## Overview
//!
//! For every occupant of the board the graph stores, per compass direction, the nearest other
//! occupant in that direction. A sliding piece can therefore answer "what do I hit going up?" or
//! "do I see my own king, and from where?" with a single array lookup instead of a board scan.
//!
//! ## Sentinels
//!
//! The 8x8 board is wrapped in a ring of 36 sentinel nodes (the border of a 10x10 grid). Every ray
//! ends on a real piece or on a sentinel, so a lookup never returns "nothing" and never needs a
//! bounds check. Sentinel entries come in three shapes, fixed at construction:
//!
//! - Pointing across the board: the nearest occupant on that ray (the far sentinel when the ray is
//!   empty). These entries are rewired by [`SightGraph::link`] and [`SightGraph::unlink`].
//! - Pointing along the ring: the adjacent sentinel, which points straight back.
//! - Pointing outward: the sentinel itself.
//!
//! Ring cells are numbered counter-clockwise from the bottom-left corner:
//!
//! ```text
//!   27 26 25 24 23 22 21 20 19 18
//!   28  .  .  .  .  .  .  .  . 17
//!   ..                         ..
//!   35  .  .  .  .  .  .  .  . 10
//!    0  1  2  3  4  5  6  7  8  9
//! ```
//!
//! ## Invariant
//!
//! Links are reciprocal: if `links[a][d] == b` and `b != a`, then `links[b][inverse(d)] == a`.
//! [`SightGraph::validate`] checks this for every node, sentinels included.

use crate::constants::{NODE_COUNT, PIECE_SLOTS, SENTINEL_COUNT};
use crate::error::integrity_fault;
use crate::types::{Direction, Square};

/// Arena index of a sight node (piece slot or sentinel)
pub type NodeId = u8;

/// Entry of a node that is not on the board
pub const UNLINKED: NodeId = NodeId::MAX;

#[derive(Debug, Clone)]
pub struct SightGraph {
    links: [[NodeId; 8]; NODE_COUNT],
}

impl SightGraph {
    /// Graph of an empty board: only sentinels, every crossing ray ending on the far sentinel
    pub fn new() -> Self {
        let mut links = [[UNLINKED; 8]; NODE_COUNT];
        for ring in 0..SENTINEL_COUNT {
            let (x, y) = ring_cell(ring);
            let node = PIECE_SLOTS + ring;
            for dir in Direction::ALL {
                let (dx, dy) = dir.offset();
                let (nx, ny) = (x + dx, y + dy);
                links[node][dir.index()] = if on_board(nx, ny) {
                    let (mut ex, mut ey) = (nx, ny);
                    while on_board(ex, ey) {
                        ex += dx;
                        ey += dy;
                    }
                    sentinel_at(ex, ey)
                } else if in_ring(nx, ny) {
                    sentinel_at(nx, ny)
                } else {
                    node as NodeId
                };
            }
        }
        SightGraph { links }
    }

    #[inline]
    pub fn is_sentinel(node: NodeId) -> bool {
        (node as usize) >= PIECE_SLOTS && (node as usize) < NODE_COUNT
    }

    /// Nearest occupant of `node` in `dir`
    #[inline]
    pub fn neighbor(&self, node: NodeId, dir: Direction) -> NodeId {
        self.links[node as usize][dir.index()]
    }

    /// All eight entries of `node`, indexed by direction
    #[inline]
    pub fn neighbors(&self, node: NodeId) -> [NodeId; 8] {
        self.links[node as usize]
    }

    /// Direction in which `node` sees `target`, if it does
    pub fn find(&self, node: NodeId, target: NodeId) -> Option<Direction> {
        self.links[node as usize]
            .iter()
            .position(|&n| n == target)
            .map(Direction::from_index)
    }

    /// Inserts `node` standing on `square`
    ///
    /// `grid` is the board's occupant map and must not yet contain `node`. Each of the four axes is
    /// scanned in both directions; the two occupants found were linked to each other and are now
    /// linked to `node` instead.
    pub fn link(&mut self, grid: &[Option<NodeId>; 64], square: Square, node: NodeId) {
        for dir in &Direction::ALL[..4] {
            let dir = *dir;
            let back = dir.inverse();
            let ahead = scan(grid, square, dir);
            let behind = scan(grid, square, back);
            if self.links[ahead as usize][back.index()] != behind
                || self.links[behind as usize][dir.index()] != ahead
            {
                integrity_fault!(
                    "sight links of {} and {} around {} are not reciprocal",
                    ahead,
                    behind,
                    square
                );
            }
            self.links[node as usize][dir.index()] = ahead;
            self.links[node as usize][back.index()] = behind;
            self.links[ahead as usize][back.index()] = node;
            self.links[behind as usize][dir.index()] = node;
        }
    }

    /// Removes `node` from the graph, stitching each pair of opposite neighbors together
    pub fn unlink(&mut self, node: NodeId) {
        for dir in &Direction::ALL[..4] {
            let dir = *dir;
            let back = dir.inverse();
            let ahead = self.links[node as usize][dir.index()];
            let behind = self.links[node as usize][back.index()];
            if ahead == UNLINKED || behind == UNLINKED {
                integrity_fault!("node {} is missing a sight link on the {:?} axis", node, dir);
            }
            self.links[ahead as usize][back.index()] = behind;
            self.links[behind as usize][dir.index()] = ahead;
        }
        self.links[node as usize] = [UNLINKED; 8];
    }

    /// Checks reciprocity of every entry and agreement with `grid`
    ///
    /// Returns a description of the first violation.
    pub fn validate(&self, grid: &[Option<NodeId>; 64]) -> Result<(), String> {
        for square in Square::iter() {
            if let Some(node) = grid[square.index()] {
                for dir in Direction::ALL {
                    let expected = scan(grid, square, dir);
                    if self.neighbor(node, dir) != expected {
                        return Err(format!(
                            "node {} on {} sees {} going {:?}, expected {}",
                            node,
                            square,
                            self.neighbor(node, dir),
                            dir,
                            expected
                        ));
                    }
                }
            }
        }
        for node in 0..NODE_COUNT {
            let on_board = node >= PIECE_SLOTS || grid.contains(&Some(node as NodeId));
            if !on_board {
                if self.links[node].iter().any(|&n| n != UNLINKED) {
                    return Err(format!("off-board node {} still has links", node));
                }
                continue;
            }
            for dir in Direction::ALL {
                let other = self.links[node][dir.index()];
                if other == UNLINKED {
                    return Err(format!("node {} has no link going {:?}", node, dir));
                }
                if other as usize == node {
                    continue;
                }
                let back = self.links[other as usize][dir.inverse().index()];
                if back as usize != node {
                    return Err(format!(
                        "node {} sees {} going {:?}, but {} sees {} going back",
                        node, other, dir, other, back
                    ));
                }
            }
        }
        Ok(())
    }
}

impl Default for SightGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn on_board(x: i8, y: i8) -> bool {
    (0..8).contains(&x) && (0..8).contains(&y)
}

#[inline]
fn in_ring(x: i8, y: i8) -> bool {
    (-1..=8).contains(&x) && (-1..=8).contains(&y) && !on_board(x, y)
}

/// Sentinel node occupying ring cell `(x, y)`
fn sentinel_at(x: i8, y: i8) -> NodeId {
    let ring = if y == -1 {
        x + 1
    } else if x == 8 {
        10 + y
    } else if y == 8 {
        19 + (7 - x)
    } else {
        28 + (7 - y)
    };
    (PIECE_SLOTS as i8 + ring) as NodeId
}

/// Coordinates of ring cell `ring`
fn ring_cell(ring: usize) -> (i8, i8) {
    let ring = ring as i8;
    match ring {
        0..=9 => (ring - 1, -1),
        10..=18 => (8, ring - 10),
        19..=27 => (7 - (ring - 19), 8),
        _ => (-1, 7 - (ring - 28)),
    }
}

/// First occupant from `square` going `dir`, or the sentinel that ends the ray
fn scan(grid: &[Option<NodeId>; 64], square: Square, dir: Direction) -> NodeId {
    let (dx, dy) = dir.offset();
    let mut x = square.file() as i8 + dx;
    let mut y = square.rank() as i8 + dy;
    while on_board(x, y) {
        if let Some(node) = grid[(y * 8 + x) as usize] {
            return node;
        }
        x += dx;
        y += dy;
    }
    sentinel_at(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    fn place(graph: &mut SightGraph, grid: &mut [Option<NodeId>; 64], square: Square, node: NodeId) {
        graph.link(grid, square, node);
        grid[square.index()] = Some(node);
    }

    #[test]
    fn test_ring_numbering_is_a_bijection() {
        let mut seen = [false; SENTINEL_COUNT];
        for ring in 0..SENTINEL_COUNT {
            let (x, y) = ring_cell(ring);
            assert!(in_ring(x, y));
            let node = sentinel_at(x, y) as usize - PIECE_SLOTS;
            assert_eq!(node, ring);
            assert!(!seen[ring]);
            seen[ring] = true;
        }
    }

    #[test]
    fn test_empty_graph_is_reciprocal() {
        let graph = SightGraph::new();
        let grid = [None; 64];
        assert_eq!(graph.validate(&grid), Ok(()));
        // a1 corner sentinel looks across the long diagonal to the h8 corner sentinel
        let corner = sentinel_at(-1, -1);
        assert_eq!(graph.neighbor(corner, Direction::UpRight), sentinel_at(8, 8));
        assert_eq!(graph.neighbor(corner, Direction::Down), corner);
        assert_eq!(graph.neighbor(corner, Direction::Right), sentinel_at(0, -1));
    }

    #[test]
    fn test_link_and_unlink_keep_reciprocity() {
        let mut graph = SightGraph::new();
        let mut grid = [None; 64];
        place(&mut graph, &mut grid, sq("e1"), 15);
        place(&mut graph, &mut grid, sq("e4"), 0);
        place(&mut graph, &mut grid, sq("e8"), 31);
        place(&mut graph, &mut grid, sq("b4"), 8);
        assert_eq!(graph.validate(&grid), Ok(()));

        assert_eq!(graph.neighbor(15, Direction::Up), 0);
        assert_eq!(graph.neighbor(0, Direction::Up), 31);
        assert_eq!(graph.neighbor(0, Direction::Left), 8);
        assert_eq!(graph.find(0, 15), Some(Direction::Down));
        assert_eq!(graph.find(8, 31), None);

        graph.unlink(0);
        grid[sq("e4").index()] = None;
        assert_eq!(graph.validate(&grid), Ok(()));
        assert_eq!(graph.neighbor(15, Direction::Up), 31);
        assert_eq!(graph.find(31, 15), Some(Direction::Down));
        assert!(SightGraph::is_sentinel(graph.neighbor(8, Direction::Right)));
    }

    #[test]
    fn test_validate_reports_stale_links() {
        let mut graph = SightGraph::new();
        let mut grid = [None; 64];
        place(&mut graph, &mut grid, sq("d4"), 3);
        // Occupant map disagrees with the links
        grid[sq("d4").index()] = None;
        grid[sq("d5").index()] = Some(3);
        assert!(graph.validate(&grid).is_err());
    }

    #[test]
    #[should_panic(expected = "missing a sight link")]
    fn test_unlink_of_unplaced_node_is_fatal() {
        let mut graph = SightGraph::new();
        graph.unlink(4);
    }
}
