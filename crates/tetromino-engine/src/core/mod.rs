pub use self::{board::*, piece::*, types::*};

pub(crate) mod board;
pub(crate) mod piece;
pub(crate) mod types;

/// Default number of columns on the board.
pub const BOARD_WIDTH: usize = 10;
/// Default number of rows on the board.
pub const BOARD_HEIGHT: usize = 20;

/// Number of rows at the top of the board that end the game when occupied.
pub const GAME_OVER_ROWS: usize = 4;

/// Default gravity period at level 1, in milliseconds.
pub const INITIAL_DROP_INTERVAL: u32 = 1000;
/// Fastest gravity period, in milliseconds.
pub const MIN_DROP_INTERVAL: u32 = 100;
/// Amount the gravity period shrinks per level, in milliseconds.
pub const DROP_INTERVAL_STEP: u32 = 50;

/// Base score awarded for each cleared line.
pub const SCORE_PER_LINE: usize = 100;
/// Score awarded for each row a piece travels during a hard drop.
pub const HARD_DROP_SCORE: usize = 2;
/// Number of cleared lines needed to advance one level.
pub const LINES_PER_LEVEL: usize = 10;
