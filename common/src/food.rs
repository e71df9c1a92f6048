use log::debug;
use serde::{Deserialize, Serialize};

use crate::constants::{EMPTY, FOOD};
use crate::error::GridError;
use crate::util::PseudoRandom;
use crate::{GameState, Position};

/// Food placement policies usable as the tick engine's food callback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FoodPlacer {
    /// Uniform pick among empty cells
    Random(PseudoRandom),
    /// First empty cell in row-major order
    FirstEmpty,
    /// Never places food
    Disabled,
}

impl FoodPlacer {
    pub fn random(seed: u64) -> Self {
        FoodPlacer::Random(PseudoRandom::new(seed))
    }

    /// Put one piece of food on an empty cell. Returns where it went, or
    /// `None` when the board has no empty cell or placement is disabled.
    pub fn place(&mut self, state: &mut GameState) -> Result<Option<Position>, GridError> {
        let position = match self {
            FoodPlacer::Disabled => None,
            FoodPlacer::FirstEmpty => state
                .board
                .cells()
                .find(|&(_, ch)| ch == EMPTY)
                .map(|(pos, _)| pos),
            FoodPlacer::Random(rng) => {
                let empty: Vec<Position> = state
                    .board
                    .cells()
                    .filter(|&(_, ch)| ch == EMPTY)
                    .map(|(pos, _)| pos)
                    .collect();
                if empty.is_empty() {
                    None
                } else {
                    Some(empty[rng.next_index(empty.len())])
                }
            }
        };

        if let Some(pos) = position {
            state.board.set_pos(pos, FOOD)?;
            debug!("Placed food at {}", pos);
        }
        Ok(position)
    }
}
