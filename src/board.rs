//! Fixed-size occupancy grid.
//!
//! Cells only ever go from empty to filled. There is no line clearing, so the
//! board fills up monotonically until a freshly spawned piece no longer fits.

/// Playing field width in cells.
pub const BOARD_WIDTH: usize = 5;
/// Playing field height in cells.
pub const BOARD_HEIGHT: usize = 5;

/// The playing field. Row-major, `cells[y][x]`, `true` = filled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Board {
    cells: [[bool; BOARD_WIDTH]; BOARD_HEIGHT],
}

impl Board {
    /// An empty board.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cells: [[false; BOARD_WIDTH]; BOARD_HEIGHT],
        }
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        BOARD_WIDTH
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        BOARD_HEIGHT
    }

    /// Whether `(x, y)` names a cell on this board.
    #[must_use]
    pub fn contains(&self, x: i8, y: i8) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width() && (y as usize) < self.height()
    }

    /// Occupancy of `(x, y)`. Coordinates off the board read as empty.
    #[must_use]
    pub fn is_filled(&self, x: i8, y: i8) -> bool {
        self.contains(x, y) && self.cells[y as usize][x as usize]
    }

    /// Mark `(x, y)` filled. Filling an already filled cell is a no-op.
    ///
    /// Returns `false` (and leaves the board alone) for coordinates off the board.
    pub(crate) fn fill(&mut self, x: i8, y: i8) -> bool {
        if !self.contains(x, y) {
            return false;
        }
        self.cells[y as usize][x as usize] = true;
        true
    }

    /// Number of filled cells.
    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.cells.iter().flatten().filter(|&&c| c).count()
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[bool; BOARD_WIDTH]> {
        self.cells.iter()
    }
}
