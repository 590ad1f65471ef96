use std::io::{self, IsTerminal};

use anyhow::Context;
use clap::Parser;
use clap_verbosity_flag::Verbosity;
use gridsweep_core::Board;
use tracing_subscriber::filter::LevelFilter;

use crate::config::{Difficulty, Preset};
use crate::session::Session;

mod config;
mod error;
mod input;
mod render;
mod session;

#[derive(Parser, Debug)]
#[command(version, about = "Reveal every safe cell without hitting a hazard", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: Verbosity,

    /// Difficulty preset, skips the menu
    #[arg(short, long, value_enum, conflicts_with_all = ["rows", "cols", "mines"])]
    preset: Option<Preset>,

    /// Rows of a custom board
    #[arg(long, requires_all = ["cols", "mines"])]
    rows: Option<i64>,

    /// Columns of a custom board
    #[arg(long, requires_all = ["rows", "mines"])]
    cols: Option<i64>,

    /// Hazards on a custom board
    #[arg(long, requires_all = ["rows", "cols"])]
    mines: Option<i64>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Keep previous turns on screen instead of clearing the terminal
    #[arg(long)]
    no_clear: bool,
}

impl Args {
    /// Board settings given on the command line, `None` means ask through the menu.
    fn difficulty(&self) -> anyhow::Result<Option<Difficulty>> {
        if let Some(preset) = self.preset {
            return Ok(Some(preset.difficulty()));
        }
        match (self.rows, self.cols, self.mines) {
            (Some(rows), Some(cols), Some(mines)) => Difficulty::custom(rows, cols, mines)
                .map(Some)
                .context("Invalid custom board"),
            _ => Ok(None),
        }
    }
}

fn init_logging(verbose: &Verbosity) {
    let level = match verbose.log_level_filter() {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.verbose);

    let fixed = args.difficulty()?;
    let clear_screen = !args.no_clear && io::stdout().is_terminal();
    log::debug!("seed: {:?}, difficulty: {:?}", args.seed, fixed);

    let mut session = Session::new(io::stdin().lock(), io::stdout().lock(), clear_screen);

    for round in 0u64.. {
        let difficulty = match fixed {
            Some(difficulty) => difficulty,
            None => match session.choose_difficulty()? {
                Some(difficulty) => difficulty,
                None => break,
            },
        };

        let config = difficulty
            .board_config()
            .context("Difficulty does not describe a valid board")?;
        let board = match args.seed {
            Some(seed) => Board::with_seed(config, seed.wrapping_add(round)),
            None => Board::new(config),
        };
        log::info!(
            "Starting round {} on a {}x{} board with {} hazards",
            round + 1,
            difficulty.rows,
            difficulty.cols,
            difficulty.hazards
        );

        session.play(board)?;

        if !session.ask_play_again()? {
            break;
        }
    }

    session.farewell()?;
    Ok(())
}
