use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

/// A board coordinate or a block offset.
///
/// `x` is the column and `y` is the row. The origin is the top-left corner of
/// the board and `y` grows downward. Coordinates are signed because pieces may
/// have blocks above the visible board while spawning or rotating.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Content of a single board cell.
///
/// The seven non-empty variants double as the color of a piece and as the fill
/// marker of a locked cell. A cell is occupied iff it is not [`Color::Empty`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum Color {
    #[default]
    Empty = 0,
    I = 1,
    O = 2,
    T = 3,
    S = 4,
    Z = 5,
    J = 6,
    L = 7,
}

impl Color {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Color::Empty
    }

    /// Returns the single character used when printing boards.
    ///
    /// ```
    /// use tetromino_engine::Color;
    ///
    /// assert_eq!(Color::Empty.as_char(), '.');
    /// assert_eq!(Color::Z.as_char(), 'Z');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Color::Empty => '.',
            Color::I => 'I',
            Color::O => 'O',
            Color::T => 'T',
            Color::S => 'S',
            Color::Z => 'Z',
            Color::J => 'J',
            Color::L => 'L',
        }
    }
}

/// The seven tetromino shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum TetrominoType {
    /// I-piece.
    I = 0,
    /// O-piece.
    O = 1,
    /// T-piece.
    T = 2,
    /// S-piece.
    S = 3,
    /// Z-piece.
    Z = 4,
    /// J-piece.
    J = 5,
    /// L-piece.
    L = 6,
}

impl Distribution<TetrominoType> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> TetrominoType {
        TetrominoType::ALL[rng.random_range(0..TetrominoType::LEN)]
    }
}

impl TetrominoType {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    /// All piece types, in ordinal order.
    pub const ALL: [Self; Self::LEN] = [
        TetrominoType::I,
        TetrominoType::O,
        TetrominoType::T,
        TetrominoType::S,
        TetrominoType::Z,
        TetrominoType::J,
        TetrominoType::L,
    ];

    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            TetrominoType::I => Color::I,
            TetrominoType::O => Color::O,
            TetrominoType::T => Color::T,
            TetrominoType::S => Color::S,
            TetrominoType::Z => Color::Z,
            TetrominoType::J => Color::J,
            TetrominoType::L => Color::L,
        }
    }

    #[must_use]
    pub const fn as_char(self) -> char {
        self.color().as_char()
    }

    pub(crate) const fn as_usize(self) -> usize {
        self as usize
    }
}

/// Rotation direction passed to [`Piece::rotated`](super::Piece::rotated).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum Direction {
    /// Leaves the rotation unchanged.
    #[default]
    None,
    /// Counterclockwise.
    Left,
    /// Clockwise.
    Right,
}

/// Top-level state of a game.
///
/// A game starts in [`GameState::Menu`]. Only the controller's public
/// operations move it between states.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, derive_more::IsVariant,
)]
pub enum GameState {
    #[default]
    Menu,
    Playing,
    Paused,
    GameOver,
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_each_type_has_its_own_color() {
        for kind in TetrominoType::ALL {
            let color = kind.color();
            assert!(!color.is_empty());
            assert_eq!(color.as_char(), kind.as_char());
        }
        let colors: HashSet<_> = TetrominoType::ALL.iter().map(|k| k.color()).collect();
        assert_eq!(colors.len(), TetrominoType::LEN);
    }

    #[test]
    fn test_ordinal_matches_all_table() {
        for (i, kind) in TetrominoType::ALL.iter().enumerate() {
            assert_eq!(kind.as_usize(), i);
        }
    }

    #[test]
    fn test_uniform_sampling_produces_every_type() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut seen = [0_usize; TetrominoType::LEN];
        for _ in 0..7000 {
            let kind: TetrominoType = rng.random();
            seen[kind.as_usize()] += 1;
        }
        for count in seen {
            assert!((700..1300).contains(&count), "unbalanced count: {count}");
        }
    }

    #[test]
    fn test_position_offset() {
        let p = Position::new(3, -1);
        assert_eq!(p.offset(-1, 2), Position::new(2, 1));
    }

    #[test]
    fn test_game_state_default_is_menu() {
        assert!(GameState::default().is_menu());
    }
}
