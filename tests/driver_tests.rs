//! Integration tests for the headless driver
//!
//! These run the same entry points as the `sightline` binary, with small game counts.

use std::path::PathBuf;

use sight_engine::Board;
use sightline::config::DriverConfig;
use sightline::driver::{play_game, speed_test, Controller, PlayOptions};

fn scratch_path(name: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("sightline-test-{}", std::process::id()))
        .join(name)
}

#[test]
fn test_speed_test_counts_games() {
    //! A short speed test plays every requested game

    let report = speed_test(3, 60, 2);
    assert_eq!(report.games, 3);
    assert!(report.plies > 0);
    assert!(report.plies <= 180);
    assert!(report.plies_per_second() >= 0.0);
}

#[test]
fn test_play_game_is_replayable() {
    //! The recorded move list replays to the same final position

    let record = play_game(PlayOptions {
        white: Controller::Random,
        black: Controller::Minimax,
        depth: 1,
        max_plies: 30,
        show_progress: true,
    })
    .unwrap();

    assert!(record.moves.len() <= 30);
    assert_eq!(record.state, record.board.state());
    let replayed = Board::from_moves(&record.moves).unwrap();
    assert_eq!(replayed.snapshot(), record.board.snapshot());
}

#[test]
fn test_missing_config_uses_defaults() {
    let config = DriverConfig::load(Some(&scratch_path("does-not-exist.json")));
    assert_eq!(config, DriverConfig::default());
}

#[test]
fn test_invalid_config_uses_defaults() {
    //! A malformed file is reported and ignored

    let path = scratch_path("invalid.json");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "{ not json").unwrap();
    assert_eq!(DriverConfig::load_from(&path), DriverConfig::default());
}

#[test]
fn test_config_save_and_load() {
    let path = scratch_path("nested/saved.json");
    let config = DriverConfig {
        search_depth: 2,
        report_interval: 10,
        show_progress: true,
    };
    config.save(&path).unwrap();
    assert_eq!(DriverConfig::load(Some(&path)), config);

    // Missing fields fall back to their defaults
    let partial = scratch_path("partial.json");
    std::fs::create_dir_all(partial.parent().unwrap()).unwrap();
    std::fs::write(&partial, r#"{ "search_depth": 5 }"#).unwrap();
    let loaded = DriverConfig::load_from(&partial);
    assert_eq!(loaded.search_depth, 5);
    assert_eq!(loaded.report_interval, DriverConfig::default().report_interval);
}

#[test]
fn test_config_store_reports_path() {
    //! Storing to an explicit path writes there and the next load picks it up

    let path = scratch_path("store/sightline.json");
    let config = DriverConfig {
        search_depth: 4,
        ..DriverConfig::default()
    };
    let written = config.store(Some(&path)).unwrap();
    assert_eq!(written, path);
    assert!(path.exists());
    assert_eq!(DriverConfig::load(Some(&path)).search_depth, 4);
}
