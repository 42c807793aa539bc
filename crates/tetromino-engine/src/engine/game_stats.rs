use serde::{Deserialize, Serialize};

use super::GameConfig;

/// Score multiplier for clearing `lines` rows with a single piece.
///
/// - 1 line: ×1
/// - 2 lines: ×3
/// - 3 lines: ×5
/// - 4 lines: ×8
///
/// Larger counts cannot come from one tetromino and score ×1.
#[must_use]
pub const fn line_clear_multiplier(lines: usize) -> usize {
    match lines {
        2 => 3,
        3 => 5,
        4 => 8,
        _ => 1,
    }
}

/// Game statistics tracking score, level, lines cleared and piece count.
///
/// # Scoring
///
/// Each lock that clears lines adds
/// `lines × score_per_line × multiplier × level`, using the level in effect
/// before the clear. Hard drops add a bonus per row travelled. There are no
/// combo, back-to-back or T-spin bonuses.
///
/// # Example
///
/// ```
/// use tetromino_engine::{GameConfig, GameStats};
///
/// let mut stats = GameStats::new();
/// stats.complete_piece_drop(4, &GameConfig::default());
///
/// assert_eq!(stats.score(), 3200);
/// assert_eq!(stats.lines_cleared(), 4);
/// assert_eq!(stats.line_clear_counter()[4], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GameStats {
    score: usize,
    level: usize,
    lines_cleared: usize,
    completed_pieces: usize,
    line_clear_counter: [usize; 5],
    elapsed_millis: u64,
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    /// Creates statistics for a fresh game: level 1, everything else zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            level: 1,
            lines_cleared: 0,
            completed_pieces: 0,
            line_clear_counter: [0; 5],
            elapsed_millis: 0,
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub const fn level(&self) -> usize {
        self.level
    }

    #[must_use]
    pub const fn lines_cleared(&self) -> usize {
        self.lines_cleared
    }

    /// Returns the total number of pieces that have been locked into place.
    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    /// Returns a histogram of locks by number of lines cleared.
    ///
    /// - `[0]`: locks that cleared nothing
    /// - `[1]`..`[4]`: singles, doubles, triples and four-line clears
    #[must_use]
    pub const fn line_clear_counter(&self) -> &[usize; 5] {
        &self.line_clear_counter
    }

    /// Play time accumulated from `update` calls while playing.
    #[must_use]
    pub const fn elapsed_millis(&self) -> u64 {
        self.elapsed_millis
    }

    pub(crate) fn add_elapsed(&mut self, millis: u32) {
        self.elapsed_millis = self.elapsed_millis.saturating_add(u64::from(millis));
    }

    pub(crate) const fn add_score(&mut self, points: usize) {
        self.score = self.score.saturating_add(points);
    }

    /// Updates statistics after a piece locks.
    ///
    /// Returns the new level if this lock raised it.
    pub fn complete_piece_drop(
        &mut self,
        cleared_lines: usize,
        config: &GameConfig,
    ) -> Option<usize> {
        self.completed_pieces += 1;
        if let Some(count) = self.line_clear_counter.get_mut(cleared_lines) {
            *count += 1;
        }
        if cleared_lines == 0 {
            return None;
        }

        self.add_score(
            cleared_lines
                .saturating_mul(config.score_per_line)
                .saturating_mul(line_clear_multiplier(cleared_lines))
                .saturating_mul(self.level),
        );
        self.lines_cleared += cleared_lines;

        let level = config.level_for_lines(self.lines_cleared);
        if level <= self.level {
            return None;
        }
        self.level = level;
        Some(level)
    }
}
