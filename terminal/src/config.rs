use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use common::{FoodPlacer, DEFAULT_TICK_INTERVAL_MS};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "snakegrid",
    about = "Advance a text-encoded snake board one tick at a time"
)]
pub struct Args {
    /// Board file to load (`.gz` files are decompressed). Uses the built-in board when omitted
    #[arg(long)]
    pub board: Option<PathBuf>,

    /// Number of ticks to run
    #[arg(long, default_value_t = 20)]
    pub ticks: u32,

    /// Food placement after a snake eats: random | first-empty | none
    #[arg(long, value_enum, default_value_t = FoodMode::Random)]
    pub food: FoodMode,

    /// Seed for random food placement
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Redraw the board in place after every tick
    #[arg(long)]
    pub watch: bool,

    /// Delay between frames in watch mode
    #[arg(long, default_value_t = DEFAULT_TICK_INTERVAL_MS)]
    pub tick_ms: u64,

    /// Keep ticking after every snake has died
    #[arg(long)]
    pub keep_going: bool,

    /// Save the final board to this file
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Print a JSON summary of the run
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FoodMode {
    Random,
    FirstEmpty,
    #[value(name = "none")]
    Disabled,
}

impl FoodMode {
    pub fn placer(self, seed: u64) -> FoodPlacer {
        match self {
            FoodMode::Random => FoodPlacer::random(seed),
            FoodMode::FirstEmpty => FoodPlacer::FirstEmpty,
            FoodMode::Disabled => FoodPlacer::Disabled,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardSource {
    Default,
    File(PathBuf),
}

/// Validated settings for one run
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub board: BoardSource,
    pub ticks: u32,
    pub food: FoodMode,
    pub seed: u64,
    pub frame_delay: Option<Duration>,
    pub stop_when_dead: bool,
    pub output: Option<PathBuf>,
    pub json: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            board: BoardSource::Default,
            ticks: 20,
            food: FoodMode::Random,
            seed: 42,
            frame_delay: None,
            stop_when_dead: true,
            output: None,
            json: false,
        }
    }
}

impl RunConfig {
    pub fn from_args(args: Args) -> Result<Self> {
        let frame_delay = if args.watch {
            if args.tick_ms == 0 {
                bail!("--tick-ms must be greater than zero in watch mode");
            }
            Some(Duration::from_millis(args.tick_ms))
        } else {
            None
        };

        Ok(RunConfig {
            board: args.board.map_or(BoardSource::Default, BoardSource::File),
            ticks: args.ticks,
            food: args.food,
            seed: args.seed,
            frame_delay,
            stop_when_dead: !args.keep_going,
            output: args.output,
            json: args.json,
        })
    }
}
