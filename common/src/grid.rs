use std::fmt;

use crate::cell::is_known_cell;
use crate::error::GridError;
use crate::Position;

/// Character matrix holding walls, food, empty space and every snake.
///
/// Rows are stored without their line terminator; printing the grid writes
/// each row back followed by `\n`. Rows are not required to share a width.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Grid {
    rows: Vec<Vec<char>>,
}

impl Grid {
    /// Build a grid from text lines. A trailing `\n` or `\r\n` on each line
    /// is dropped; any other character must belong to the board alphabet.
    pub fn from_lines<I, S>(lines: I) -> Result<Self, GridError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut rows = Vec::new();
        for (row, line) in lines.into_iter().enumerate() {
            let line = line.as_ref();
            let line = line.strip_suffix('\n').unwrap_or(line);
            let line = line.strip_suffix('\r').unwrap_or(line);

            let mut cells = Vec::with_capacity(line.len());
            for (col, ch) in line.chars().enumerate() {
                if !is_known_cell(ch) {
                    return Err(GridError::UnknownCell { row, col, ch });
                }
                cells.push(ch);
            }
            rows.push(cells);
        }

        Ok(Grid { rows })
    }

    pub fn from_text(text: &str) -> Result<Self, GridError> {
        Self::from_lines(text.split_inclusive('\n'))
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn row_width(&self, row: usize) -> usize {
        self.rows.get(row).map_or(0, Vec::len)
    }

    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    pub fn is_rectangular(&self) -> bool {
        self.rows.windows(2).all(|pair| pair[0].len() == pair[1].len())
    }

    pub fn at(&self, row: usize, col: usize) -> Result<char, GridError> {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(col))
            .copied()
            .ok_or(GridError::OutOfBounds { row, col })
    }

    pub fn at_pos(&self, pos: Position) -> Result<char, GridError> {
        self.at(pos.row, pos.col)
    }

    pub fn set(&mut self, row: usize, col: usize, ch: char) -> Result<(), GridError> {
        let cell = self
            .rows
            .get_mut(row)
            .and_then(|cells| cells.get_mut(col))
            .ok_or(GridError::OutOfBounds { row, col })?;
        *cell = ch;
        Ok(())
    }

    pub fn set_pos(&mut self, pos: Position, ch: char) -> Result<(), GridError> {
        self.set(pos.row, pos.col, ch)
    }

    /// Every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Position, char)> + '_ {
        self.rows.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(move |(col, &ch)| (Position::new(row, col), ch))
        })
    }

    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        self.rows.iter().map(|cells| cells.iter().collect())
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}
