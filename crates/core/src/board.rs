//! Board module - manages the game grid
//!
//! The board is a 10x20 grid of shape ids: 0 is empty, 1..=7 is the shape that
//! locked there. Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (row, col) where row ranges 0..19 (top to bottom), col ranges 0..9
//! (left to right).

use arrayvec::ArrayVec;
use thiserror::Error;

use crate::pieces::Piece;
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Cell value for an empty cell
pub const EMPTY: u8 = 0;

/// Row indices removed by a single clear, bottom to top
pub type ClearedRows = ArrayVec<usize, { BOARD_HEIGHT as usize }>;

/// Out-of-range board access.
///
/// Reading outside the grid is a caller bug, never a gameplay outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoundsError {
    #[error("cell (row {row}, col {col}) is outside the board")]
    OutOfBounds { row: i8, col: i8 },
    #[error("row {0} is outside the board")]
    Row(usize),
}

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order (row * WIDTH + col)
    cells: [u8; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [EMPTY; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (row, col) coordinates
    #[inline(always)]
    fn index(row: i8, col: i8) -> Option<usize> {
        if row < 0 || row >= BOARD_HEIGHT as i8 || col < 0 || col >= BOARD_WIDTH as i8 {
            return None;
        }
        Some((row as usize) * (BOARD_WIDTH as usize) + (col as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Bounds-checked read of a single cell.
    pub fn cell_at(&self, row: i8, col: i8) -> Result<u8, BoundsError> {
        Self::index(row, col)
            .map(|idx| self.cells[idx])
            .ok_or(BoundsError::OutOfBounds { row, col })
    }

    /// Bounds-checked write of a single cell.
    pub fn set(&mut self, row: i8, col: i8, value: u8) -> Result<(), BoundsError> {
        let idx = Self::index(row, col).ok_or(BoundsError::OutOfBounds { row, col })?;
        self.cells[idx] = value;
        Ok(())
    }

    /// Check if position is inside the grid and filled
    pub fn is_occupied(&self, row: i8, col: i8) -> bool {
        matches!(Self::index(row, col), Some(idx) if self.cells[idx] != EMPTY)
    }

    /// Check if a row is completely filled
    ///
    /// Rows outside the grid are a caller bug; release builds report them as
    /// not full.
    pub fn is_row_full(&self, row: usize) -> bool {
        debug_assert!(row < BOARD_HEIGHT as usize, "row {row} out of range");
        self.row(row)
            .map(|cells| cells.iter().all(|&cell| cell != EMPTY))
            .unwrap_or(false)
    }

    /// Borrow one row of cells
    pub fn row(&self, row: usize) -> Result<&[u8], BoundsError> {
        if row >= BOARD_HEIGHT as usize {
            return Err(BoundsError::Row(row));
        }
        let start = row * BOARD_WIDTH as usize;
        Ok(&self.cells[start..start + BOARD_WIDTH as usize])
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.cells.chunks_exact(BOARD_WIDTH as usize)
    }

    /// Clear all full rows and return the row indices that were cleared (bottom to top)
    ///
    /// Single bottom-to-top pass: surviving rows slide down over the removed ones
    /// in their original order, and the rows left over at the top are emptied.
    /// Adjacent full rows are all removed.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared_rows = ClearedRows::new();
        let width = BOARD_WIDTH as usize;
        let mut write_row = BOARD_HEIGHT as usize;

        for read_row in (0..BOARD_HEIGHT as usize).rev() {
            if self.is_row_full(read_row) {
                cleared_rows.push(read_row);
            } else {
                write_row -= 1;
                if write_row != read_row {
                    let src_start = read_row * width;
                    let dst_start = write_row * width;
                    self.cells
                        .copy_within(src_start..src_start + width, dst_start);
                }
            }
        }

        self.cells[..write_row * width].fill(EMPTY);

        cleared_rows
    }

    /// Write every filled cell of the piece into the grid.
    ///
    /// The caller must have validated the placement with [`Piece::can_place`];
    /// cells that fall outside the grid are skipped.
    pub fn lock(&mut self, piece: &Piece) {
        for (row, col, value) in piece.absolute_cells() {
            debug_assert!(
                Self::index(row, col).is_some(),
                "locking cell ({row}, {col}) outside the board"
            );
            debug_assert!(
                !self.is_occupied(row, col),
                "locking onto occupied cell ({row}, {col})"
            );
            if let Some(idx) = Self::index(row, col) {
                self.cells[idx] = value;
            }
        }
    }

    /// Set every cell to empty
    pub fn reset(&mut self) {
        self.cells.fill(EMPTY);
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell != EMPTY).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Copy the grid into a fixed 2D array (for snapshots).
    pub fn write_grid(&self, out: &mut [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        for (dst, src) in out.iter_mut().zip(self.rows()) {
            dst.copy_from_slice(src);
        }
    }

    /// Build a board from rows of cell values, top row first.
    ///
    /// Missing rows at the top are left empty; each row must be exactly
    /// `BOARD_WIDTH` wide.
    pub fn from_rows(rows: &[[u8; BOARD_WIDTH as usize]]) -> Self {
        assert!(rows.len() <= BOARD_HEIGHT as usize);
        let mut board = Self::new();
        let offset = BOARD_HEIGHT as usize - rows.len();
        for (i, row) in rows.iter().enumerate() {
            let start = (offset + i) * BOARD_WIDTH as usize;
            board.cells[start..start + BOARD_WIDTH as usize].copy_from_slice(row);
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
