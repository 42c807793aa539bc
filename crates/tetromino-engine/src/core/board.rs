use std::fmt;

use super::{
    GAME_OVER_ROWS,
    piece::Piece,
    types::{Color, Position},
};

/// Fixed-size grid of cell colors.
///
/// Rows are stored top to bottom in row-major order. Row 0 is the top of the
/// board and `height - 1` is the bottom.
///
/// The board never fails on bad coordinates: reads outside the grid return
/// [`Color::Empty`] and writes outside the grid are ignored.
///
/// # Example
///
/// ```
/// use tetromino_engine::{Board, Color, Piece, Position, TetrominoType};
///
/// let mut board = Board::new(10, 20);
/// let piece = Piece::new(TetrominoType::O, Position::new(4, 18));
///
/// assert!(board.is_valid_position(&piece));
/// board.place_tetromino(&piece);
/// assert_eq!(board.get_cell(4, 18), Color::O);
/// assert!(!board.is_valid_position(&piece));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Color>,
}

impl Board {
    /// Creates an empty `width × height` board.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Color::Empty; width * height],
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        (x < self.width && y < self.height).then_some(y * self.width + x)
    }

    fn row(&self, y: usize) -> &[Color] {
        &self.cells[y * self.width..][..self.width]
    }

    /// Returns the cell at `(x, y)`, or [`Color::Empty`] outside the grid.
    #[must_use]
    pub fn get_cell(&self, x: i32, y: i32) -> Color {
        self.index(x, y).map_or(Color::Empty, |i| self.cells[i])
    }

    /// Sets the cell at `(x, y)`. Coordinates outside the grid are ignored.
    pub fn set_cell(&mut self, x: i32, y: i32, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = color;
        }
    }

    /// Returns an iterator over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Color]> {
        self.cells.chunks_exact(self.width.max(1))
    }

    /// Checks whether `piece` fits on the board.
    ///
    /// A block fails if it is left or right of the grid, below the bottom row,
    /// or on an occupied cell. Blocks above row 0 only need to be inside the
    /// side walls so that pieces can spawn and rotate partially outside the
    /// visible area.
    #[must_use]
    pub fn is_valid_position(&self, piece: &Piece) -> bool {
        piece.absolute_blocks().all(|Position { x, y }| {
            let in_columns = usize::try_from(x).is_ok_and(|x| x < self.width);
            if y < 0 {
                return in_columns;
            }
            self.index(x, y).is_some_and(|i| self.cells[i].is_empty())
        })
    }

    /// Writes the piece's color into every block that lies on the grid.
    ///
    /// Blocks outside the grid (usually above the top row) are skipped.
    pub fn place_tetromino(&mut self, piece: &Piece) {
        let color = piece.color();
        for Position { x, y } in piece.absolute_blocks() {
            self.set_cell(x, y, color);
        }
    }

    fn is_row_full(&self, y: usize) -> bool {
        let row = self.row(y);
        !row.is_empty() && row.iter().all(|c| !c.is_empty())
    }

    /// Shifts every row above `y` down by one and blanks the top row.
    fn remove_row(&mut self, y: usize) {
        self.cells.copy_within(..y * self.width, self.width);
        self.cells[..self.width].fill(Color::Empty);
    }

    /// Clears filled lines and returns the number of lines cleared.
    ///
    /// Rows are scanned from the bottom up. After a row is removed, the same
    /// index is checked again since the row above has moved into it.
    pub fn clear_lines(&mut self) -> usize {
        let mut count = 0;
        let mut y = self.height;
        while y > 0 {
            if self.is_row_full(y - 1) {
                self.remove_row(y - 1);
                count += 1;
                continue;
            }
            y -= 1;
        }
        count
    }

    /// Returns `true` if any cell in the top rows is occupied.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.cells
            .iter()
            .take(GAME_OVER_ROWS * self.width)
            .any(|c| !c.is_empty())
    }

    /// Resets every cell to [`Color::Empty`].
    pub fn clear(&mut self) {
        self.cells.fill(Color::Empty);
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for cell in row {
                write!(f, "{}", cell.as_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
