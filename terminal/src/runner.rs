use anyhow::{Context, Result};
use common::{create_default_state, print_board, save_board, GameState, Snake, TickEvent};
use crossterm::{
    cursor::MoveTo,
    queue,
    terminal::{Clear, ClearType},
};
use flate2::read::GzDecoder;
use serde::Serialize;
use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufReader, Write};
use tracing::{debug, info, warn};

use crate::config::{BoardSource, RunConfig};

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u32,
    pub food_eaten: u32,
    pub food_placed: u32,
    /// Snake ids in the order they died
    pub deaths: Vec<usize>,
    pub alive: usize,
    pub snakes: Vec<Snake>,
}

pub fn load_state(source: &BoardSource) -> Result<GameState> {
    match source {
        BoardSource::Default => {
            create_default_state().context("Failed to build default board")
        }
        BoardSource::File(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open board file: {:?}", path))?;
            let state = if path.extension() == Some(OsStr::new("gz")) {
                GameState::from_reader(BufReader::new(GzDecoder::new(file)))
            } else {
                GameState::from_reader(BufReader::new(file))
            };
            state.with_context(|| format!("Failed to load board: {:?}", path))
        }
    }
}

/// Run the configured number of ticks, writing boards and the optional
/// summary to `out`.
pub fn run<W: Write>(config: &RunConfig, out: &mut W) -> Result<RunSummary> {
    let mut state = load_state(&config.board)?;
    let mut placer = config.food.placer(config.seed);
    let mut summary = RunSummary {
        ticks: 0,
        food_eaten: 0,
        food_placed: 0,
        deaths: Vec::new(),
        alive: state.alive_count(),
        snakes: Vec::new(),
    };

    info!(
        "Loaded {} row board with {} snake(s), {} alive",
        state.num_rows(),
        state.num_snakes(),
        summary.alive
    );

    if config.frame_delay.is_some() {
        draw_frame(out, &state)?;
    }

    for _ in 0..config.ticks {
        if config.stop_when_dead && state.alive_count() == 0 {
            info!("All snakes are dead after {} tick(s)", summary.ticks);
            break;
        }

        let tick = state.tick + 1;
        let report = state
            .update_state(|s| placer.place(s))
            .with_context(|| format!("Tick {} failed", tick))?;
        summary.ticks += 1;

        for event in &report.events {
            match event {
                TickEvent::FoodEaten { snake_id, position } => {
                    debug!("Snake {} ate food at {}", snake_id, position);
                    summary.food_eaten += 1;
                }
                TickEvent::SnakeDied { snake_id, .. } => summary.deaths.push(*snake_id),
                TickEvent::SnakeMoved { .. } => {}
            }
        }

        match report.food_result {
            Some(Ok(Some(_))) => summary.food_placed += 1,
            Some(Ok(None)) => warn!("No empty cell left for food on tick {}", tick),
            Some(Err(err)) => {
                return Err(err).with_context(|| format!("Food placement failed on tick {}", tick));
            }
            None => {}
        }

        if let Some(delay) = config.frame_delay {
            draw_frame(out, &state)?;
            std::thread::sleep(delay);
        }
    }

    if config.frame_delay.is_none() {
        print_board(&state, out)?;
    }

    if let Some(path) = &config.output {
        save_board(&state, path)?;
        info!("Saved final board to {:?}", path);
    }

    summary.alive = state.alive_count();
    summary.snakes = state.snakes.clone();

    if config.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&summary)?)?;
    }

    Ok(summary)
}

fn draw_frame<W: Write>(out: &mut W, state: &GameState) -> Result<()> {
    queue!(out, MoveTo(0, 0), Clear(ClearType::All))?;
    print_board(state, out)?;
    writeln!(
        out,
        "tick {}  alive {}/{}",
        state.tick,
        state.alive_count(),
        state.num_snakes()
    )?;
    out.flush()?;
    Ok(())
}
