use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;

use crate::{GameState, Grid};

/// Read the next line, terminator included. A last line without `\n` gets
/// one appended. Returns `None` once the stream is exhausted, so an empty
/// line (`"\n"`) and end of input stay distinguishable.
pub fn read_line<R: BufRead>(reader: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    let read = reader
        .read_line(&mut line)
        .context("Failed to read board line")?;
    if read == 0 {
        return Ok(None);
    }
    if !line.ends_with('\n') {
        line.push('\n');
    }
    Ok(Some(line))
}

/// Read every line of `reader` into a board. The returned state has no
/// snake records; call [`GameState::initialize_snakes`] to rebuild them.
pub fn load_board<R: BufRead>(mut reader: R) -> Result<GameState> {
    let mut lines = Vec::new();
    while let Some(line) = read_line(&mut reader)? {
        lines.push(line);
    }

    let board = Grid::from_lines(&lines).context("Failed to parse board")?;
    Ok(GameState::from_grid(board))
}

impl GameState {
    /// Load a board and reconstruct its snakes.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut state = load_board(reader)?;
        state
            .initialize_snakes()
            .context("Failed to reconstruct snakes from board")?;
        Ok(state)
    }
}

pub fn print_board<W: Write>(state: &GameState, out: &mut W) -> Result<()> {
    write!(out, "{}", state.board).context("Failed to write board")?;
    Ok(())
}

pub fn save_board(state: &GameState, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create board file: {:?}", path))?;
    let mut writer = BufWriter::new(file);
    print_board(state, &mut writer)?;
    writer
        .flush()
        .with_context(|| format!("Failed to write board file: {:?}", path))?;
    Ok(())
}
