use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Cached endpoints of a snake living on the grid.
///
/// The body itself is never stored: it is the chain of direction cells
/// leading from `tail` to `head`, and only the grid knows its shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snake {
    pub tail: Position,
    pub head: Position,
    pub is_alive: bool,
}

impl Snake {
    pub fn new(tail: Position, head: Position, is_alive: bool) -> Self {
        Snake {
            tail,
            head,
            is_alive,
        }
    }
}
