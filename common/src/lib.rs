mod board_io;
mod cell;
mod constants;
mod error;
mod food;
mod game_state;
mod grid;
mod snake;

pub mod util;

pub use board_io::*;
pub use cell::*;
pub use constants::*;
pub use error::*;
pub use food::*;
pub use game_state::*;
pub use grid::*;
pub use snake::*;
pub use util::PseudoRandom;
