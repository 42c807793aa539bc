use super::types::{Color, Direction, Position, TetrominoType};

/// Relative block offsets of one rotation state.
pub type PieceBlocks = [Position; 4];

/// All four rotation states of one piece type.
type ShapeTable = [PieceBlocks; 4];

/// A tetromino with its own shape table, a position and a rotation index.
///
/// Pieces are values: moving and rotating return new `Piece` instances and
/// never touch the original, so a candidate move can be checked against the
/// board and then either committed or dropped.
///
/// # Coordinate System
///
/// - `position` is the absolute board coordinate of the piece's pivot
/// - block offsets are relative to the pivot and may be negative
/// - rotation index 0 is the spawn orientation, 1 is 90° clockwise
///
/// # Example
///
/// ```
/// use tetromino_engine::{Direction, Piece, Position, TetrominoType};
///
/// let piece = Piece::new(TetrominoType::T, Position::new(5, 0));
/// let rotated = piece.rotated(Direction::Right);
///
/// assert_eq!(piece.rotation(), 0);
/// assert_eq!(rotated.rotation(), 1);
/// assert_eq!(rotated.position(), piece.position());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: TetrominoType,
    position: Position,
    rotation: u8,
    shapes: ShapeTable,
}

impl Piece {
    #[must_use]
    pub fn new(kind: TetrominoType, position: Position) -> Self {
        Self {
            kind,
            position,
            rotation: 0,
            shapes: SHAPES[kind.as_usize()],
        }
    }

    #[must_use]
    pub fn kind(&self) -> TetrominoType {
        self.kind
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.kind.color()
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Returns the rotation index.
    ///
    /// This is normally in `0..4`; see [`Self::with_rotation`].
    #[must_use]
    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    /// Returns the four block offsets of the current rotation state.
    ///
    /// An out of range rotation index falls back to the spawn orientation.
    #[must_use]
    pub fn blocks(&self) -> PieceBlocks {
        self.shapes
            .get(usize::from(self.rotation))
            .copied()
            .unwrap_or(self.shapes[0])
    }

    /// Returns the absolute board coordinates of the four blocks.
    pub fn absolute_blocks(&self) -> impl Iterator<Item = Position> + '_ {
        self.blocks()
            .into_iter()
            .map(move |b| self.position.offset(b.x, b.y))
    }

    #[must_use]
    pub fn with_position(&self, position: Position) -> Self {
        Self { position, ..*self }
    }

    /// Returns a copy with the given raw rotation index.
    ///
    /// The index is stored as is; [`Self::blocks`] treats anything outside
    /// `0..4` as the spawn orientation.
    #[must_use]
    pub fn with_rotation(&self, rotation: u8) -> Self {
        Self { rotation, ..*self }
    }

    #[must_use]
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        self.with_position(self.position.offset(dx, dy))
    }

    /// Returns a rotated copy at the same position.
    ///
    /// Whether the result fits on the board is for the caller to check.
    #[must_use]
    pub fn rotated(&self, direction: Direction) -> Self {
        match direction {
            Direction::None => *self,
            Direction::Left => self.rotated_left(),
            Direction::Right => self.rotated_right(),
        }
    }

    #[must_use]
    pub fn rotated_right(&self) -> Self {
        self.with_rotation((self.rotation % 4 + 1) % 4)
    }

    #[must_use]
    pub fn rotated_left(&self) -> Self {
        self.with_rotation((self.rotation % 4 + 3) % 4)
    }

    /// Renders the current rotation state into a 4×4 preview grid.
    ///
    /// The blocks are moved so that their bounding box starts at the origin,
    /// then centered with integer division of the remaining space.
    ///
    /// ```
    /// use tetromino_engine::{Color, Piece, Position, TetrominoType};
    ///
    /// let preview = Piece::new(TetrominoType::O, Position::new(5, 0)).preview();
    /// assert_eq!(preview[1], [Color::Empty, Color::O, Color::O, Color::Empty]);
    /// assert_eq!(preview[2], [Color::Empty, Color::O, Color::O, Color::Empty]);
    /// ```
    #[must_use]
    pub fn preview(&self) -> [[Color; PREVIEW_SIZE]; PREVIEW_SIZE] {
        let blocks = self.blocks();
        let min_x = blocks.iter().map(|b| b.x).min().unwrap_or(0);
        let max_x = blocks.iter().map(|b| b.x).max().unwrap_or(0);
        let min_y = blocks.iter().map(|b| b.y).min().unwrap_or(0);
        let max_y = blocks.iter().map(|b| b.y).max().unwrap_or(0);

        let offset_x = (PREVIEW_EXTENT - (max_x - min_x + 1)) / 2;
        let offset_y = (PREVIEW_EXTENT - (max_y - min_y + 1)) / 2;

        let mut grid = [[Color::Empty; PREVIEW_SIZE]; PREVIEW_SIZE];
        for b in blocks {
            let x = b.x - min_x + offset_x;
            let y = b.y - min_y + offset_y;
            if let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y))
                && x < PREVIEW_SIZE
                && y < PREVIEW_SIZE
            {
                grid[y][x] = self.color();
            }
        }
        grid
    }
}

/// Side length of the square grid returned by [`Piece::preview`].
pub const PREVIEW_SIZE: usize = 4;

#[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
const PREVIEW_EXTENT: i32 = PREVIEW_SIZE as i32;

const fn p(x: i32, y: i32) -> Position {
    Position::new(x, y)
}

/// Block offsets for every type and rotation, indexed by
/// `[TetrominoType as usize][rotation]`.
const SHAPES: [ShapeTable; TetrominoType::LEN] = {
    const I_H: PieceBlocks = [p(-1, 0), p(0, 0), p(1, 0), p(2, 0)];
    const I_V: PieceBlocks = [p(0, -1), p(0, 0), p(0, 1), p(0, 2)];
    const O: PieceBlocks = [p(0, 0), p(1, 0), p(0, 1), p(1, 1)];
    const S_H: PieceBlocks = [p(-1, 1), p(0, 1), p(0, 0), p(1, 0)];
    const S_V: PieceBlocks = [p(0, -1), p(0, 0), p(1, 0), p(1, 1)];
    const Z_H: PieceBlocks = [p(-1, 0), p(0, 0), p(0, 1), p(1, 1)];
    const Z_V: PieceBlocks = [p(1, -1), p(1, 0), p(0, 0), p(0, 1)];
    [
        // I-piece
        [I_H, I_V, I_H, I_V],
        // O-piece
        [O, O, O, O],
        // T-piece
        [
            [p(-1, 0), p(0, 0), p(1, 0), p(0, 1)],
            [p(0, -1), p(0, 0), p(0, 1), p(-1, 0)],
            [p(-1, 0), p(0, 0), p(1, 0), p(0, -1)],
            [p(0, -1), p(0, 0), p(0, 1), p(1, 0)],
        ],
        // S-piece
        [S_H, S_V, S_H, S_V],
        // Z-piece
        [Z_H, Z_V, Z_H, Z_V],
        // J-piece
        [
            [p(-1, 0), p(0, 0), p(1, 0), p(-1, 1)],
            [p(0, -1), p(0, 0), p(0, 1), p(-1, -1)],
            [p(-1, 0), p(0, 0), p(1, 0), p(1, -1)],
            [p(0, -1), p(0, 0), p(0, 1), p(1, 1)],
        ],
        // L-piece
        [
            [p(-1, 0), p(0, 0), p(1, 0), p(1, 1)],
            [p(0, -1), p(0, 0), p(0, 1), p(-1, 1)],
            [p(-1, 0), p(0, 0), p(1, 0), p(-1, -1)],
            [p(0, -1), p(0, 0), p(0, 1), p(1, -1)],
        ],
    ]
};
