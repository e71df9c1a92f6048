pub const WALL: char = '#';
pub const EMPTY: char = ' ';
pub const FOOD: char = '*';
pub const DEAD_HEAD: char = 'x';

/// Default tick interval in milliseconds for animated host loops
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 150;

/// Starting board used when no external board is supplied: one snake
/// `d>D` heading right with food ahead of it.
pub const DEFAULT_BOARD: &str = include_str!("../boards/default.txt");
