//! Headless game driver
//!
//! Runs self-play through the engine's search harness: every move is chosen by a
//! [`SearchTask`] on its own thread and then applied to the driver's board.

use std::time::{Duration, Instant};

use anyhow::Context;
use clap::ValueEnum;
use sight_engine::{
    Board, Color, GameState, MinimaxSearcher, Move, RandomSearcher, SearchContext, SearchEvent,
    SearchTask, Searcher,
};
use tracing::{debug, info};

/// Longest game the driver will play before giving up on it
pub const DEFAULT_MAX_PLIES: u32 = 1000;

/// Who chooses the moves for one side
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Controller {
    Random,
    Minimax,
}

/// Totals from a speed test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedReport {
    pub games: u32,
    pub plies: u64,
    pub elapsed: Duration,
}

impl SpeedReport {
    pub fn plies_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.plies as f64 / secs
        } else {
            0.0
        }
    }
}

/// Plays `games` random games on the calling thread as fast as possible
///
/// Each finished game is checked with [`Board::validate_integrity`]. A progress line is logged
/// every `report_interval` games.
pub fn speed_test(games: u32, max_plies: u32, report_interval: u32) -> SpeedReport {
    let start = Instant::now();
    let mut searcher = RandomSearcher::new();
    let ctx = SearchContext::new();
    let mut plies = 0u64;
    let mut board = Board::new();

    for game in 1..=games {
        board.reset();
        let mut played = 0;
        while played < max_plies {
            let Some(mv) = searcher.choose(&mut board, &ctx) else {
                break;
            };
            if board.move_piece(mv).is_err() {
                break;
            }
            played += 1;
        }
        board.validate_integrity();
        plies += u64::from(played);
        debug!("[DRIVER] Game {} ended after {} plies: {}", game, played, board.state());

        if report_interval > 0 && game % report_interval == 0 {
            let report = SpeedReport {
                games: game,
                plies,
                elapsed: start.elapsed(),
            };
            info!(
                "[DRIVER] {} games, {} plies, {:.0} plies/s",
                report.games,
                report.plies,
                report.plies_per_second()
            );
        }
    }

    SpeedReport {
        games,
        plies,
        elapsed: start.elapsed(),
    }
}

/// The outcome of one driven game
#[derive(Debug, Clone)]
pub struct GameRecord {
    pub moves: Vec<Move>,
    pub state: GameState,
    pub board: Board,
}

/// Settings for [`play_game`]
#[derive(Debug, Clone, Copy)]
pub struct PlayOptions {
    pub white: Controller,
    pub black: Controller,
    pub depth: u8,
    pub max_plies: u32,
    pub show_progress: bool,
}

/// Plays one game with a controller per side
///
/// Stops when the game is over, a controller has no move, or `max_plies` is reached.
pub fn play_game(options: PlayOptions) -> anyhow::Result<GameRecord> {
    let mut board = Board::new();

    for ply in 0..options.max_plies {
        if board.is_game_over() {
            break;
        }
        let controller = match board.turn() {
            Color::White => options.white,
            Color::Black => options.black,
        };
        let task = match controller {
            Controller::Random => SearchTask::spawn(&board, RandomSearcher::new()),
            Controller::Minimax => SearchTask::spawn(&board, MinimaxSearcher::new(options.depth)),
        };
        if options.show_progress {
            for event in task.progress().iter() {
                match event {
                    SearchEvent::Progress(percent) => debug!("[DRIVER] Searching {}%", percent),
                    SearchEvent::Finished(_) => break,
                }
            }
        }
        let Some(mv) = task.join() else {
            info!("[DRIVER] {:?} found no move at ply {}", controller, ply);
            break;
        };
        board
            .move_piece(mv)
            .with_context(|| format!("applying {} at ply {}", mv, ply))?;
        if let Some(entry) = board.history().last() {
            info!("[DRIVER] {}. {}", ply + 1, entry);
        }
    }

    Ok(GameRecord {
        moves: board.export_moves(),
        state: board.state(),
        board,
    })
}
