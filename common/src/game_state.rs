use anyhow::Result;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::cell::{body_to_tail, find_head, head_to_body, is_tail, step};
use crate::constants::{DEAD_HEAD, DEFAULT_BOARD, EMPTY, FOOD};
use crate::error::{CellFamily, GridError};
use crate::{Grid, Position, Snake};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum TickEvent {
    SnakeMoved { snake_id: usize, head: Position, tail: Position },
    FoodEaten { snake_id: usize, position: Position },
    SnakeDied { snake_id: usize, position: Position },
}

/// What happened during one call to [`GameState::update_state`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickReport<R> {
    pub tick: u32,
    pub events: Vec<TickEvent>,
    /// Value returned by the food callback, `None` when no snake ate.
    pub food_result: Option<R>,
}

impl<R> TickReport<R> {
    pub fn food_eaten(&self) -> bool {
        self.events
            .iter()
            .any(|event| matches!(event, TickEvent::FoodEaten { .. }))
    }

    pub fn deaths(&self) -> impl Iterator<Item = usize> + '_ {
        self.events.iter().filter_map(|event| match event {
            TickEvent::SnakeDied { snake_id, .. } => Some(*snake_id),
            _ => None,
        })
    }
}

/// Serializable view of a state for snapshots
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct StateSnapshot {
    pub tick: u32,
    pub board: Vec<String>,
    pub snakes: Vec<Snake>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameState {
    pub tick: u32,
    pub board: Grid,
    pub snakes: Vec<Snake>,
}

/// Parse the built-in default board and reconstruct its snake.
pub fn create_default_state() -> Result<GameState, GridError> {
    GameState::from_text(DEFAULT_BOARD)
}

impl GameState {
    /// State over an already parsed board with no snake records yet.
    pub fn from_grid(board: Grid) -> Self {
        GameState {
            tick: 0,
            board,
            snakes: Vec::new(),
        }
    }

    /// Parse `text` and rebuild the snake list from it.
    pub fn from_text(text: &str) -> Result<Self, GridError> {
        let mut state = GameState::from_grid(Grid::from_text(text)?);
        state.initialize_snakes()?;
        Ok(state)
    }

    pub fn num_rows(&self) -> usize {
        self.board.num_rows()
    }

    pub fn num_snakes(&self) -> usize {
        self.snakes.len()
    }

    pub fn snake(&self, snake_id: usize) -> Result<&Snake, GridError> {
        self.snakes
            .get(snake_id)
            .ok_or(GridError::SnakeNotFound(snake_id))
    }

    pub fn alive_count(&self) -> usize {
        self.snakes.iter().filter(|snake| snake.is_alive).count()
    }

    /// Rebuild the snake list by scanning the board row by row. Each tail
    /// cell starts a snake; its head is found by walking the body, and the
    /// snake is dead if that head is `x`.
    pub fn initialize_snakes(&mut self) -> Result<(), GridError> {
        if !self.board.is_rectangular() {
            warn!("Board rows have different widths");
        }

        let tails: Vec<Position> = self
            .board
            .cells()
            .filter(|&(_, ch)| is_tail(ch))
            .map(|(pos, _)| pos)
            .collect();

        let mut snakes = Vec::with_capacity(tails.len());
        for tail in tails {
            let head = find_head(&self.board, tail)?;
            let is_alive = self.board.at_pos(head)? != DEAD_HEAD;
            snakes.push(Snake::new(tail, head, is_alive));
        }

        debug!("Reconstructed {} snake(s) from board", snakes.len());
        self.snakes = snakes;
        Ok(())
    }

    /// Cells of a snake from tail to head, following the body directions.
    pub fn snake_body(&self, snake_id: usize) -> Result<Vec<Position>, GridError> {
        let snake = *self.snake(snake_id)?;
        let max_len = self.board.cell_count();
        let mut body = vec![snake.tail];
        let mut pos = snake.tail;

        while pos != snake.head {
            if body.len() > max_len {
                return Err(GridError::corrupt(
                    snake.tail.row,
                    snake.tail.col,
                    format!("body of snake {} never reaches its head", snake_id),
                ));
            }
            let ch = self.board.at_pos(pos)?;
            let next = step(pos, ch);
            if next == pos {
                return Err(GridError::corrupt(
                    pos.row,
                    pos.col,
                    format!("body of snake {} stops at {:?}", snake_id, ch),
                ));
            }
            body.push(next);
            pos = next;
        }

        Ok(body)
    }

    pub fn snake_length(&self, snake_id: usize) -> Result<usize, GridError> {
        Ok(self.snake_body(snake_id)?.len())
    }

    /// Advance every live snake by one cell, in list order.
    ///
    /// A snake entering an empty cell moves; entering food it grows and the
    /// tail stays put; anything else kills it, leaving its body on the board
    /// with an `x` for a head. When at least one snake ate, `add_food` runs
    /// once after all snakes have moved and its return value is handed back
    /// untouched in the report.
    ///
    /// Snakes earlier in the list move first, so later snakes see the cells
    /// they vacated or entered. A tail that is about to move away still
    /// counts as an obstacle.
    ///
    /// On error the state is left exactly as it was before the call.
    pub fn update_state<F, R>(&mut self, add_food: F) -> Result<TickReport<R>, GridError>
    where
        F: FnOnce(&mut GameState) -> R,
    {
        // Snapshot so a failed tick can be rolled back
        let old_board = self.board.clone();
        let old_snakes = self.snakes.clone();

        let events = match self.move_snakes() {
            Ok(events) => events,
            Err(err) => {
                self.board = old_board;
                self.snakes = old_snakes;
                return Err(err);
            }
        };

        self.tick += 1;

        let need_food = events
            .iter()
            .any(|event| matches!(event, TickEvent::FoodEaten { .. }));
        let food_result = if need_food {
            Some(add_food(self))
        } else {
            None
        };

        Ok(TickReport {
            tick: self.tick,
            events,
            food_result,
        })
    }

    fn move_snakes(&mut self) -> Result<Vec<TickEvent>, GridError> {
        let mut events = Vec::new();

        for snake_id in 0..self.snakes.len() {
            if !self.snakes[snake_id].is_alive {
                continue;
            }

            let (next, target) = self.next_square(snake_id)?;
            match target {
                Some(EMPTY) => {
                    self.update_head(snake_id, next)?;
                    self.update_tail(snake_id)?;
                    let snake = &self.snakes[snake_id];
                    events.push(TickEvent::SnakeMoved {
                        snake_id,
                        head: snake.head,
                        tail: snake.tail,
                    });
                }
                Some(FOOD) => {
                    self.update_head(snake_id, next)?;
                    events.push(TickEvent::FoodEaten {
                        snake_id,
                        position: next,
                    });
                }
                _ => {
                    let position = self.snakes[snake_id].head;
                    self.board.set_pos(position, DEAD_HEAD)?;
                    self.snakes[snake_id].is_alive = false;
                    info!("Snake {} died at {}", snake_id, position);
                    events.push(TickEvent::SnakeDied { snake_id, position });
                }
            }
        }

        Ok(events)
    }

    /// Where the head of `snake_id` goes next and what is there. `None`
    /// means the destination lies outside the board.
    fn next_square(&self, snake_id: usize) -> Result<(Position, Option<char>), GridError> {
        let head = self.snakes[snake_id].head;
        let head_char = self.board.at_pos(head)?;
        // Validates that the record really points at a live head
        head_to_body(head_char)?;

        let next = step(head, head_char);
        Ok((next, self.board.at_pos(next).ok()))
    }

    fn update_head(&mut self, snake_id: usize, next: Position) -> Result<(), GridError> {
        let head = self.snakes[snake_id].head;
        let head_char = self.board.at_pos(head)?;

        self.board.set_pos(head, head_to_body(head_char)?)?;
        self.board.set_pos(next, head_char)?;
        self.snakes[snake_id].head = next;

        debug!("Snake {} head {} -> {}", snake_id, head, next);
        Ok(())
    }

    fn update_tail(&mut self, snake_id: usize) -> Result<(), GridError> {
        let tail = self.snakes[snake_id].tail;
        let tail_char = self.board.at_pos(tail)?;
        if !is_tail(tail_char) {
            return Err(GridError::InvalidCellTransition {
                from: CellFamily::Tail,
                ch: tail_char,
            });
        }

        let next = step(tail, tail_char);
        let new_tail = body_to_tail(self.board.at_pos(next)?)?;
        self.board.set_pos(next, new_tail)?;
        self.board.set_pos(tail, EMPTY)?;
        self.snakes[snake_id].tail = next;

        debug!("Snake {} tail {} -> {}", snake_id, tail, next);
        Ok(())
    }

    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            tick: self.tick,
            board: self.board.rows().collect(),
            snakes: self.snakes.clone(),
        }
    }

    pub fn snapshot_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.snapshot())?)
    }
}
