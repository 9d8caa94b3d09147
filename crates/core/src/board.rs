//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell can be empty or filled with a piece kind.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//! Pieces may hang above the board (y < 0); those cells never collide and are
//! never merged.

use arrayvec::ArrayVec;

use crate::pieces::ShapeMatrix;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH * BOARD_HEIGHT) as usize;

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// Row-major copy of the board, as handed to collaborators
pub type BoardRows = [[Cell; WIDTH]; HEIGHT];

/// Row indices removed by a single clear, bottom row first
pub type ClearedRows = ArrayVec<usize, HEIGHT>;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is within bounds and empty
    pub fn is_valid(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Check if position is within bounds and filled
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Out of bounds on any side (including above the board) or filled.
    ///
    /// This is the corner test used by spin detection, where the ceiling
    /// counts as a wall.
    pub fn is_blocked(&self, x: i8, y: i8) -> bool {
        !self.is_valid(x, y)
    }

    /// Whether a single piece cell at (x, y) would collide.
    ///
    /// Side walls and the floor collide; cells above the board do not.
    #[inline]
    pub fn cell_collides(&self, x: i8, y: i8) -> bool {
        if x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return true;
        }
        y >= 0 && self.is_occupied(x, y)
    }

    /// Placement test: does `shape` with its top-left corner at (x, y)
    /// overlap a wall, the floor or a filled cell?
    pub fn collides(&self, shape: &ShapeMatrix, x: i8, y: i8) -> bool {
        shape
            .cells()
            .any(|(dx, dy)| self.cell_collides(x + dx, y + dy))
    }

    /// Copy the visible cells of a piece into the board.
    ///
    /// Cells above the board (y < 0) are discarded. Cells outside the side
    /// walls or below the floor are ignored; callers only merge placements
    /// that passed [`Board::collides`].
    pub fn merge(&mut self, shape: &ShapeMatrix, x: i8, y: i8, kind: PieceKind) {
        for (dx, dy) in shape.cells() {
            let py = y + dy;
            if py >= 0 {
                self.set(x + dx, py, Some(kind));
            }
        }
    }

    /// Number of filled cells in a row (0 when out of bounds)
    pub fn row_fill(&self, y: usize) -> usize {
        if y >= HEIGHT {
            return 0;
        }
        let start = y * WIDTH;
        self.cells[start..start + WIDTH]
            .iter()
            .filter(|cell| cell.is_some())
            .count()
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= HEIGHT {
            return false;
        }
        let start = y * WIDTH;
        self.cells[start..start + WIDTH]
            .iter()
            .all(|cell| cell.is_some())
    }

    /// Remove a row, shift all rows above it down and empty the top row.
    /// Returns false if `y` is out of bounds.
    pub fn remove_row(&mut self, y: usize) -> bool {
        if y >= HEIGHT {
            return false;
        }

        // copy_within handles the overlapping ranges
        for row in (1..=y).rev() {
            let src_start = (row - 1) * WIDTH;
            self.cells
                .copy_within(src_start..src_start + WIDTH, row * WIDTH);
        }

        for cell in &mut self.cells[..WIDTH] {
            *cell = None;
        }

        true
    }

    /// Clear all full rows in one bottom-up pass.
    ///
    /// Remaining rows keep their order and settle at the bottom; empty rows
    /// fill the top. Returns the original indices of the removed rows,
    /// bottom row first.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared_rows = ClearedRows::new();
        let mut write_y = HEIGHT;

        for read_y in (0..HEIGHT).rev() {
            if self.is_row_full(read_y) {
                cleared_rows.push(read_y);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * WIDTH;
                    self.cells
                        .copy_within(src_start..src_start + WIDTH, write_y * WIDTH);
                }
            }
        }

        for cell in &mut self.cells[..write_y * WIDTH] {
            *cell = None;
        }

        cleared_rows
    }

    /// The row with the most filled cells, as `(row, fill)`.
    ///
    /// Scans top to bottom and keeps the first row that strictly beats the
    /// best so far, so ties go to the lowest row index. Returns None on an
    /// empty board.
    pub fn fullest_row(&self) -> Option<(usize, usize)> {
        let mut best: Option<(usize, usize)> = None;
        for y in 0..HEIGHT {
            let fill = self.row_fill(y);
            if fill > best.map_or(0, |(_, f)| f) {
                best = Some((y, fill));
            }
        }
        best
    }

    /// Deep copy of the grid as rows
    pub fn rows(&self) -> BoardRows {
        let mut out = [[None; WIDTH]; HEIGHT];
        for (y, row) in out.iter_mut().enumerate() {
            row.copy_from_slice(&self.cells[y * WIDTH..(y + 1) * WIDTH]);
        }
        out
    }

    /// Build a board from rows
    pub fn from_rows(rows: &BoardRows) -> Self {
        let mut board = Self::new();
        for (y, row) in rows.iter().enumerate() {
            board.cells[y * WIDTH..(y + 1) * WIDTH].copy_from_slice(row);
        }
        board
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Whether every cell is empty
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_none())
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells = [None; BOARD_SIZE];
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
