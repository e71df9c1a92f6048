use serde::{Deserialize, Serialize};

use crate::constants::{DEAD_HEAD, EMPTY, FOOD, WALL};
use crate::error::{CellFamily, GridError};
use crate::{Grid, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn head_char(self) -> char {
        match self {
            Direction::Up => 'W',
            Direction::Down => 'S',
            Direction::Left => 'A',
            Direction::Right => 'D',
        }
    }

    pub fn body_char(self) -> char {
        match self {
            Direction::Up => '^',
            Direction::Down => 'v',
            Direction::Left => '<',
            Direction::Right => '>',
        }
    }

    pub fn tail_char(self) -> char {
        match self {
            Direction::Up => 'w',
            Direction::Down => 's',
            Direction::Left => 'a',
            Direction::Right => 'd',
        }
    }
}

/// Direction encoded by a tail, body or live head cell.
pub fn direction_of(c: char) -> Option<Direction> {
    match c {
        '^' | 'w' | 'W' => Some(Direction::Up),
        'v' | 's' | 'S' => Some(Direction::Down),
        '<' | 'a' | 'A' => Some(Direction::Left),
        '>' | 'd' | 'D' => Some(Direction::Right),
        _ => None,
    }
}

pub fn is_tail(c: char) -> bool {
    matches!(c, 'w' | 'a' | 's' | 'd')
}

/// Live heads plus the dead head marker.
pub fn is_head(c: char) -> bool {
    matches!(c, 'W' | 'A' | 'S' | 'D') || c == DEAD_HEAD
}

pub fn is_body(c: char) -> bool {
    matches!(c, '^' | '<' | 'v' | '>')
}

/// Any cell that belongs to a snake, dead heads included.
pub fn is_snake(c: char) -> bool {
    is_tail(c) || is_head(c) || is_body(c)
}

pub fn is_known_cell(c: char) -> bool {
    is_snake(c) || matches!(c, WALL | EMPTY | FOOD)
}

/// The cell reached by moving one step from `pos` in the direction encoded
/// by `c`. Characters without a direction leave the position unchanged.
///
/// Moving up or left from index 0 wraps to `usize::MAX`, which every grid
/// lookup reports as out of bounds.
pub fn step(pos: Position, c: char) -> Position {
    match direction_of(c) {
        Some(Direction::Up) => Position::new(pos.row.wrapping_sub(1), pos.col),
        Some(Direction::Down) => Position::new(pos.row.wrapping_add(1), pos.col),
        Some(Direction::Left) => Position::new(pos.row, pos.col.wrapping_sub(1)),
        Some(Direction::Right) => Position::new(pos.row, pos.col.wrapping_add(1)),
        None => pos,
    }
}

pub fn body_to_tail(c: char) -> Result<char, GridError> {
    match c {
        '^' => Ok('w'),
        '<' => Ok('a'),
        'v' => Ok('s'),
        '>' => Ok('d'),
        _ => Err(GridError::InvalidCellTransition {
            from: CellFamily::Body,
            ch: c,
        }),
    }
}

pub fn head_to_body(c: char) -> Result<char, GridError> {
    match c {
        'W' => Ok('^'),
        'A' => Ok('<'),
        'S' => Ok('v'),
        'D' => Ok('>'),
        _ => Err(GridError::InvalidCellTransition {
            from: CellFamily::Head,
            ch: c,
        }),
    }
}

/// Walk the chain of direction cells starting at `tail` until a head cell
/// (live or dead) is reached.
///
/// A chain that leaves the grid, hits a non-snake cell, stalls, or takes
/// more steps than the grid has cells is reported as `CorruptGrid`.
pub fn find_head(grid: &Grid, tail: Position) -> Result<Position, GridError> {
    let max_steps = grid.cell_count();
    let mut pos = tail;
    let mut ch = grid.at(pos.row, pos.col)?;

    for _ in 0..=max_steps {
        if is_head(ch) {
            return Ok(pos);
        }
        if !is_snake(ch) {
            return Err(GridError::corrupt(
                pos.row,
                pos.col,
                format!("chain from tail {} reaches non-snake cell {:?}", tail, ch),
            ));
        }

        let next = step(pos, ch);
        ch = grid.at(next.row, next.col).map_err(|_| {
            GridError::corrupt(
                pos.row,
                pos.col,
                format!("chain from tail {} leaves the grid", tail),
            )
        })?;
        pos = next;
    }

    Err(GridError::corrupt(
        tail.row,
        tail.col,
        "chain never reaches a head (cycle)",
    ))
}
