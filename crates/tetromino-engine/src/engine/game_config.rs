use serde::{Deserialize, Serialize};

use crate::{
    ConfigError,
    core::{
        BOARD_HEIGHT, BOARD_WIDTH, DROP_INTERVAL_STEP, GAME_OVER_ROWS, HARD_DROP_SCORE,
        INITIAL_DROP_INTERVAL, LINES_PER_LEVEL, MIN_DROP_INTERVAL, Position, SCORE_PER_LINE,
    },
};

/// Largest accepted board side, so that every cell fits in an `i32` coordinate.
const MAX_BOARD_SIDE: usize = 1 << 12;

/// Tunable parameters of a game.
///
/// Every field has a default, so a partial JSON document is enough:
///
/// ```
/// use tetromino_engine::GameConfig;
///
/// let config: GameConfig = serde_json::from_str(r#"{ "board_width": 12 }"#).unwrap();
/// assert_eq!(config.board_width, 12);
/// assert_eq!(config.board_height, 20);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub board_width: usize,
    pub board_height: usize,
    /// Gravity period at level 1, in milliseconds.
    pub initial_drop_interval: u32,
    /// Lower bound of the gravity period, in milliseconds.
    pub min_drop_interval: u32,
    /// Gravity speed-up per level, in milliseconds.
    pub drop_interval_step: u32,
    pub score_per_line: usize,
    pub lines_per_level: usize,
    /// Bonus for every row a piece falls during a hard drop.
    pub hard_drop_score: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_width: BOARD_WIDTH,
            board_height: BOARD_HEIGHT,
            initial_drop_interval: INITIAL_DROP_INTERVAL,
            min_drop_interval: MIN_DROP_INTERVAL,
            drop_interval_step: DROP_INTERVAL_STEP,
            score_per_line: SCORE_PER_LINE,
            lines_per_level: LINES_PER_LEVEL,
            hard_drop_score: HARD_DROP_SCORE,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Self {
            board_width: width,
            board_height: height,
            initial_drop_interval: initial,
            min_drop_interval: min,
            ..
        } = *self;
        if width < 4 {
            return Err(ConfigError::BoardTooNarrow { width });
        }
        if height <= GAME_OVER_ROWS {
            return Err(ConfigError::BoardTooShort { height });
        }
        if width > MAX_BOARD_SIDE || height > MAX_BOARD_SIDE {
            return Err(ConfigError::BoardTooLarge { width, height });
        }
        if self.lines_per_level == 0 {
            return Err(ConfigError::ZeroLinesPerLevel);
        }
        if min == 0 {
            return Err(ConfigError::ZeroMinDropInterval);
        }
        if min > initial {
            return Err(ConfigError::DropIntervalRange { min, initial });
        }
        Ok(())
    }

    /// Where new pieces appear: the middle column of the top row.
    #[must_use]
    pub fn spawn_position(&self) -> Position {
        Position::new(i32::try_from(self.board_width / 2).unwrap_or(i32::MAX), 0)
    }

    /// Level reached after clearing `lines_cleared` lines in total.
    ///
    /// ```
    /// use tetromino_engine::GameConfig;
    ///
    /// let config = GameConfig::default();
    /// assert_eq!(config.level_for_lines(0), 1);
    /// assert_eq!(config.level_for_lines(9), 1);
    /// assert_eq!(config.level_for_lines(10), 2);
    /// ```
    #[must_use]
    pub fn level_for_lines(&self, lines_cleared: usize) -> usize {
        lines_cleared.checked_div(self.lines_per_level).unwrap_or(0) + 1
    }

    /// Gravity period at `level`, floored at the minimum interval.
    #[must_use]
    pub fn drop_interval_for_level(&self, level: usize) -> u32 {
        let steps = u32::try_from(level.saturating_sub(1)).unwrap_or(u32::MAX);
        self.initial_drop_interval
            .saturating_sub(steps.saturating_mul(self.drop_interval_step))
            .max(self.min_drop_interval)
    }
}
