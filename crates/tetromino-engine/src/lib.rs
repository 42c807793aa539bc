//! Falling-block puzzle game engine.
//!
//! The crate models the board, the seven tetrominoes and the game controller
//! that drives gravity, locking, line clears, scoring and leveling. It has no
//! notion of frames, pixels or input devices: a caller issues commands and
//! polls state.
//!
//! - [`core`] - value types, pieces and the board
//! - [`engine`] - the [`Game`] controller, its configuration and statistics

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Error returned when a [`GameConfig`] cannot be used to build a game.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("board width must be at least 4, got {width}")]
    BoardTooNarrow { width: usize },
    #[display("board height must be greater than 4, got {height}")]
    BoardTooShort { height: usize },
    #[display("board size {width}x{height} is too large")]
    BoardTooLarge { width: usize, height: usize },
    #[display("lines per level must be positive")]
    ZeroLinesPerLevel,
    #[display("minimum drop interval must be positive")]
    ZeroMinDropInterval,
    #[display("minimum drop interval {min} exceeds initial drop interval {initial}")]
    DropIntervalRange { min: u32, initial: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid piece seed: expected 32 hexadecimal digits")]
pub struct ParsePieceSeedError;
