use thiserror::Error;

/// Failures raised by the grid codec and the tick engine.
///
/// None of these are reachable from a well-formed board. A snake dying is a
/// normal tick outcome and is never reported through this type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("cannot convert {ch:?} from a {from} cell")]
    InvalidCellTransition { from: CellFamily, ch: char },

    #[error("corrupt grid at ({row}, {col}): {reason}")]
    CorruptGrid {
        row: usize,
        col: usize,
        reason: String,
    },

    #[error("cell ({row}, {col}) is outside the grid")]
    OutOfBounds { row: usize, col: usize },

    #[error("unknown cell {ch:?} at ({row}, {col})")]
    UnknownCell { row: usize, col: usize, ch: char },

    #[error("snake {0} not found")]
    SnakeNotFound(usize),
}

/// Which character family a failed conversion expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellFamily {
    Head,
    Body,
    Tail,
}

impl std::fmt::Display for CellFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CellFamily::Head => "head",
            CellFamily::Body => "body",
            CellFamily::Tail => "tail",
        };
        f.write_str(name)
    }
}

impl GridError {
    pub(crate) fn corrupt(row: usize, col: usize, reason: impl Into<String>) -> Self {
        GridError::CorruptGrid {
            row,
            col,
            reason: reason.into(),
        }
    }
}
