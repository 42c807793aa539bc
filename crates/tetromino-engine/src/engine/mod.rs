//! Game controller logic and state management.
//!
//! This module builds gameplay on top of the [`core`](crate::core) types:
//!
//! - [`Game`] - the controller: state machine, current and next piece, gravity
//! - [`GameConfig`] - board size, gravity and scoring parameters
//! - [`GameStats`] - score, level, lines, piece count and play time
//! - [`PieceFactory`] - uniform random piece generation
//! - [`PieceSeed`] - seed for deterministic piece generation
//!
//! # Game Flow
//!
//! 1. Create a [`Game`]; it starts in the menu with a piece already spawned
//! 2. Call [`Game::start`] to begin playing
//! 3. Forward player commands (move, rotate, hard drop)
//! 4. Call [`Game::update`] from a periodic timer to apply gravity
//! 5. Pieces lock when they can no longer fall; full lines are cleared
//! 6. The game ends when locked blocks reach the top rows
//!
//! # Example
//!
//! ```
//! use tetromino_engine::{Direction, Game, GameState};
//!
//! let mut game = Game::new();
//! game.start();
//!
//! game.move_tetromino(-1, 0);
//! game.rotate_tetromino(Direction::Right);
//! game.drop_tetromino();
//!
//! // Gravity tick of half a second.
//! assert!(game.update(500));
//! assert_eq!(game.stats().completed_pieces(), 1);
//! assert_eq!(game.state(), GameState::Playing);
//! ```

pub use self::{game::*, game_config::*, game_stats::*, piece_factory::*};

mod game;
mod game_config;
mod game_stats;
mod piece_factory;
