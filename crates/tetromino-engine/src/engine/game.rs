use std::mem;

use tracing::{debug, info, trace};

use crate::{
    ConfigError,
    core::{Board, Direction, GameState, Piece},
};

use super::{GameConfig, GameStats, PieceFactory, PieceSeed};

/// Offsets tried, in order, when a rotated piece does not fit where it is.
///
/// This is a simplified kick table, not the Super Rotation System: one step
/// left, one step right, then one step up. Each offset is applied to the
/// rotated piece's own position, so kicks never accumulate.
const WALL_KICKS: [(i32, i32); 3] = [(-1, 0), (1, 0), (0, -1)];

/// The game controller.
///
/// `Game` owns the board, the falling piece, the next piece and every
/// counter. All operations are synchronous and take `&mut self`; a caller that
/// shares a game between threads must put the whole value behind one lock.
///
/// Commands issued outside [`GameState::Playing`] are ignored and report
/// `false`. The only failure visible to a player is [`GameState::GameOver`].
#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    state: GameState,
    board: Board,
    current: Option<Piece>,
    next: Piece,
    factory: PieceFactory,
    stats: GameStats,
    drop_timer: u32,
    drop_interval: u32,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a game with the default configuration and a random seed.
    #[must_use]
    pub fn new() -> Self {
        let config = GameConfig::default();
        let factory = PieceFactory::new(config.spawn_position());
        Self::from_parts(config, factory)
    }

    /// Creates a game with a custom configuration and a random seed.
    pub fn with_config(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let factory = PieceFactory::new(config.spawn_position());
        Ok(Self::from_parts(config, factory))
    }

    /// Like [`Self::with_config`], but with a fixed piece sequence.
    pub fn with_seed(config: GameConfig, seed: PieceSeed) -> Result<Self, ConfigError> {
        config.validate()?;
        let factory = PieceFactory::with_seed(config.spawn_position(), seed);
        Ok(Self::from_parts(config, factory))
    }

    fn from_parts(config: GameConfig, mut factory: PieceFactory) -> Self {
        let next = factory.create_random();
        let mut game = Self {
            state: GameState::Menu,
            board: Board::new(config.board_width, config.board_height),
            current: None,
            next,
            factory,
            stats: GameStats::new(),
            drop_timer: 0,
            drop_interval: config.initial_drop_interval,
            config,
        };
        game.spawn_new_tetromino();
        game
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> GameState {
        self.state
    }

    /// Forces the game into `state` without checking the transition.
    pub fn set_state(&mut self, state: GameState) {
        if self.state != state {
            trace!(from = ?self.state, to = ?state, "state change");
        }
        self.state = state;
    }

    /// Leaves the menu and starts playing.
    ///
    /// Returns `false` if the game was not in the menu.
    pub fn start(&mut self) -> bool {
        self.transition(GameState::Menu, GameState::Playing)
    }

    pub fn pause(&mut self) -> bool {
        self.transition(GameState::Playing, GameState::Paused)
    }

    pub fn resume(&mut self) -> bool {
        self.transition(GameState::Paused, GameState::Playing)
    }

    /// Switches between playing and paused; other states are left alone.
    pub fn toggle_pause(&mut self) {
        if !self.pause() {
            self.resume();
        }
    }

    fn transition(&mut self, from: GameState, to: GameState) -> bool {
        if self.state != from {
            return false;
        }
        self.set_state(to);
        true
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the falling piece, or `None` once the game is over.
    #[must_use]
    pub fn current_tetromino(&self) -> Option<&Piece> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn next_tetromino(&self) -> &Piece {
        &self.next
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.stats.score()
    }

    #[must_use]
    pub fn level(&self) -> usize {
        self.stats.level()
    }

    #[must_use]
    pub fn lines_cleared(&self) -> usize {
        self.stats.lines_cleared()
    }

    /// Current gravity period in milliseconds.
    #[must_use]
    pub fn drop_interval(&self) -> u32 {
        self.drop_interval
    }

    /// Milliseconds accumulated since the last gravity step.
    #[must_use]
    pub fn drop_timer(&self) -> u32 {
        self.drop_timer
    }

    /// Returns a copy of the board with the falling piece drawn in.
    #[must_use]
    pub fn render_board(&self) -> Board {
        let mut board = self.board.clone();
        if let Some(piece) = &self.current {
            board.place_tetromino(piece);
        }
        board
    }

    fn falling_piece(&self) -> Option<Piece> {
        self.current.filter(|_| self.state.is_playing())
    }

    /// Replaces the falling piece with `candidate` if it fits on the board.
    fn try_commit(&mut self, candidate: Piece) -> bool {
        if !self.board.is_valid_position(&candidate) {
            return false;
        }
        self.current = Some(candidate);
        true
    }

    /// Moves the falling piece by `(dx, dy)` if the target is free.
    ///
    /// Returns `true` if the piece moved.
    pub fn move_tetromino(&mut self, dx: i32, dy: i32) -> bool {
        let Some(piece) = self.falling_piece() else {
            return false;
        };
        self.try_commit(piece.translated(dx, dy))
    }

    /// Rotates the falling piece, trying wall kicks if the plain rotation is
    /// blocked.
    ///
    /// Returns `true` if the piece rotated.
    pub fn rotate_tetromino(&mut self, direction: Direction) -> bool {
        let Some(piece) = self.falling_piece() else {
            return false;
        };
        let rotated = piece.rotated(direction);
        if self.try_commit(rotated) {
            return true;
        }
        WALL_KICKS
            .iter()
            .any(|&(dx, dy)| self.try_commit(rotated.translated(dx, dy)))
    }

    /// Drops the falling piece as far as it goes and locks it.
    ///
    /// Every row travelled is worth the configured hard-drop bonus. The piece
    /// locks even if it could not move at all.
    pub fn drop_tetromino(&mut self) {
        if self.falling_piece().is_none() {
            return;
        }
        let mut rows: usize = 0;
        while self.move_tetromino(0, 1) {
            rows += 1;
        }
        self.stats.add_score(rows.saturating_mul(self.config.hard_drop_score));
        self.lock_current_tetromino();
    }

    /// Advances the gravity timer by `delta_millis`.
    ///
    /// When the timer reaches the drop interval it restarts from zero and the
    /// piece falls one row, locking if it cannot. Returns `true` whenever the
    /// game is playing, whether or not anything fell.
    pub fn update(&mut self, delta_millis: u32) -> bool {
        if !self.state.is_playing() {
            return false;
        }
        self.stats.add_elapsed(delta_millis);
        self.drop_timer = self.drop_timer.saturating_add(delta_millis);
        if self.drop_timer >= self.drop_interval {
            self.drop_timer = 0;
            if !self.move_tetromino(0, 1) {
                self.lock_current_tetromino();
            }
        }
        true
    }

    /// Returns to the menu with an empty board and fresh counters.
    pub fn reset(&mut self) {
        self.set_state(GameState::Menu);
        self.board.clear();
        self.stats = GameStats::new();
        self.drop_timer = 0;
        self.drop_interval = self.config.initial_drop_interval;
        self.next = self.factory.create_random();
        self.spawn_new_tetromino();
    }

    fn lock_current_tetromino(&mut self) {
        let Some(piece) = self.current.take() else {
            return;
        };
        self.board.place_tetromino(&piece);
        let cleared_lines = self.board.clear_lines();
        debug!(kind = ?piece.kind(), position = ?piece.position(), cleared_lines, "piece locked");

        if let Some(level) = self.stats.complete_piece_drop(cleared_lines, &self.config) {
            self.drop_interval = self.config.drop_interval_for_level(level);
            info!(level, drop_interval = self.drop_interval, "level up");
        }

        if self.board.is_game_over() {
            self.game_over();
            return;
        }
        self.spawn_new_tetromino();
    }

    /// Promotes the next piece and draws a new one.
    fn spawn_new_tetromino(&mut self) {
        let next = self.factory.create_random();
        let piece = mem::replace(&mut self.next, next);
        if self.board.is_valid_position(&piece) {
            self.current = Some(piece);
        } else {
            self.game_over();
        }
    }

    fn game_over(&mut self) {
        self.current = None;
        self.set_state(GameState::GameOver);
        info!(
            score = self.stats.score(),
            level = self.stats.level(),
            lines_cleared = self.stats.lines_cleared(),
            "game over"
        );
    }
}
