use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use sightline::config::DriverConfig;
use sightline::driver::{self, Controller, PlayOptions, DEFAULT_MAX_PLIES};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sightline")]
#[command(about = "Headless self-play driver for the sight engine")]
struct Args {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Random self-play as fast as possible
    SpeedTest {
        #[arg(long, default_value = "1000")]
        games: u32,

        #[arg(long, default_value_t = DEFAULT_MAX_PLIES)]
        max_plies: u32,
    },
    /// One game with a chosen controller per side
    Play {
        #[arg(long, value_enum, default_value = "minimax")]
        white: Controller,

        #[arg(long, value_enum, default_value = "random")]
        black: Controller,

        /// Minimax depth (overrides the config file)
        #[arg(long)]
        depth: Option<u8>,

        #[arg(long, default_value_t = DEFAULT_MAX_PLIES)]
        max_plies: u32,
    },
    /// Write the current settings to the config file, with any overrides applied
    WriteConfig {
        #[arg(long)]
        search_depth: Option<u8>,

        #[arg(long)]
        report_interval: Option<u32>,

        #[arg(long)]
        show_progress: Option<bool>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let mut config = DriverConfig::load(args.config.as_deref());

    match args.command {
        Command::SpeedTest { games, max_plies } => {
            let report = driver::speed_test(games, max_plies, config.report_interval);
            println!(
                "{} games, {} plies in {:.2?} ({:.0} plies/s)",
                report.games,
                report.plies,
                report.elapsed,
                report.plies_per_second()
            );
        }
        Command::Play {
            white,
            black,
            depth,
            max_plies,
        } => {
            let record = driver::play_game(PlayOptions {
                white,
                black,
                depth: depth.unwrap_or(config.search_depth),
                max_plies,
                show_progress: config.show_progress,
            })
            .context("self-play game failed")?;
            println!("{}", record.board);
            println!(
                "{} after {} plies",
                record.state.description(),
                record.moves.len()
            );
        }
        Command::WriteConfig {
            search_depth,
            report_interval,
            show_progress,
        } => {
            if let Some(depth) = search_depth {
                config.search_depth = depth;
            }
            if let Some(interval) = report_interval {
                config.report_interval = interval;
            }
            if let Some(show) = show_progress {
                config.show_progress = show;
            }
            let path = config
                .store(args.config.as_deref())
                .context("could not write config")?;
            println!("Wrote {}", path.display());
        }
    }

    Ok(())
}
