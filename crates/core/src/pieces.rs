//! Pieces module - tetromino shape matrices, rotation and collision
//!
//! A shape is a small rectangular matrix (at most 4x4) whose nonzero cells hold
//! the shape id. Rotation is a plain 90° clockwise matrix transform with no
//! wall kicks: a rotation that collides is rejected, never nudged.

use crate::board::Board;
use crate::types::{ShapeKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Largest matrix side used by the catalog
pub const MAX_SHAPE_DIM: usize = 4;

/// Rectangular shape matrix with fixed-capacity storage.
///
/// Cells outside `rows x cols` are always zero, so derived equality compares
/// only the meaningful part of the matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: u8,
    cols: u8,
    cells: [[u8; MAX_SHAPE_DIM]; MAX_SHAPE_DIM],
}

impl Shape {
    const fn from_grid(rows: u8, cols: u8, cells: [[u8; MAX_SHAPE_DIM]; MAX_SHAPE_DIM]) -> Self {
        Self { rows, cols, cells }
    }

    /// Build a shape from row slices.
    ///
    /// # Panics
    ///
    /// Panics if the matrix is empty, ragged, or larger than 4x4.
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        assert!(!rows.is_empty() && rows.len() <= MAX_SHAPE_DIM, "bad shape height");
        let cols = rows[0].len();
        assert!(cols > 0 && cols <= MAX_SHAPE_DIM, "bad shape width");

        let mut cells = [[0u8; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (r, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), cols, "ragged shape rows");
            cells[r][..cols].copy_from_slice(row);
        }
        Self::from_grid(rows.len() as u8, cols as u8, cells)
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Value at (row, col), `None` outside the matrix
    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        if row >= self.rows as usize || col >= self.cols as usize {
            return None;
        }
        Some(self.cells[row][col])
    }

    /// Filled cells as (row, col, value), relative to the matrix origin
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8, u8)> + '_ {
        (0..self.rows as usize).flat_map(move |r| {
            (0..self.cols as usize).filter_map(move |c| {
                let value = self.cells[r][c];
                (value != 0).then_some((r as i8, c as i8, value))
            })
        })
    }

    /// Matrix rows as slices (for display and tests)
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        (0..self.rows as usize)
            .map(|r| self.cells[r][..self.cols as usize].to_vec())
            .collect()
    }
}

/// Rotate a shape 90° clockwise.
///
/// Dimensions swap and `new[col][rows - 1 - row] = old[row][col]`.
pub fn rotate_cw(shape: &Shape) -> Shape {
    let rows = shape.rows as usize;
    let cols = shape.cols as usize;
    let mut cells = [[0u8; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];

    for row in 0..rows {
        for col in 0..cols {
            cells[col][rows - 1 - row] = shape.cells[row][col];
        }
    }

    Shape::from_grid(shape.cols, shape.rows, cells)
}

/// One catalog entry: a shape kind and its spawn orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub kind: ShapeKind,
    pub shape: Shape,
}

/// The seven canonical tetrominoes in spawn orientation, cells valued with the shape id.
pub const CATALOG: [CatalogEntry; 7] = [
    CatalogEntry {
        kind: ShapeKind::I,
        shape: Shape::from_grid(1, 4, [[1, 1, 1, 1], [0; 4], [0; 4], [0; 4]]),
    },
    CatalogEntry {
        kind: ShapeKind::O,
        shape: Shape::from_grid(2, 2, [[2, 2, 0, 0], [2, 2, 0, 0], [0; 4], [0; 4]]),
    },
    CatalogEntry {
        kind: ShapeKind::T,
        shape: Shape::from_grid(2, 3, [[3, 3, 3, 0], [0, 3, 0, 0], [0; 4], [0; 4]]),
    },
    CatalogEntry {
        kind: ShapeKind::S,
        shape: Shape::from_grid(2, 3, [[4, 4, 0, 0], [0, 4, 4, 0], [0; 4], [0; 4]]),
    },
    CatalogEntry {
        kind: ShapeKind::Z,
        shape: Shape::from_grid(2, 3, [[0, 5, 5, 0], [5, 5, 0, 0], [0; 4], [0; 4]]),
    },
    CatalogEntry {
        kind: ShapeKind::J,
        shape: Shape::from_grid(2, 3, [[6, 6, 6, 0], [0, 0, 6, 0], [0; 4], [0; 4]]),
    },
    CatalogEntry {
        kind: ShapeKind::L,
        shape: Shape::from_grid(2, 3, [[7, 7, 7, 0], [7, 0, 0, 0], [0; 4], [0; 4]]),
    },
];

/// Spawn orientation for a shape kind
pub fn spawn_shape(kind: ShapeKind) -> Shape {
    CATALOG[(kind.id() - 1) as usize].shape
}

/// Column where a shape of the given width spawns (centered, rounded left)
pub fn spawn_x(cols: u8) -> i8 {
    ((BOARD_WIDTH - cols) / 2) as i8
}

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: ShapeKind,
    pub shape: Shape,
    /// Column of the matrix's top-left cell
    pub x: i8,
    /// Row of the matrix's top-left cell (may be negative while above the board)
    pub y: i8,
}

impl Piece {
    /// Create a piece in spawn orientation at the spawn position
    pub fn spawn(kind: ShapeKind) -> Self {
        let shape = spawn_shape(kind);
        Self {
            kind,
            shape,
            x: spawn_x(shape.cols()),
            y: 0,
        }
    }

    /// Filled cells as absolute (row, col, value) board coordinates
    pub fn absolute_cells(&self) -> impl Iterator<Item = (i8, i8, u8)> + '_ {
        self.shape
            .cells()
            .map(move |(r, c, value)| (self.y + r, self.x + c, value))
    }

    /// Check whether the piece (or a candidate shape at its origin) fits after
    /// shifting by (dx, dy).
    ///
    /// Rejects any filled cell left of column 0, right of the last column, below
    /// the last row, or on an occupied board cell. Cells above row 0 are allowed.
    pub fn can_place(&self, board: &Board, dx: i8, dy: i8, candidate: Option<&Shape>) -> bool {
        let shape = candidate.unwrap_or(&self.shape);
        shape.cells().all(|(r, c, _)| {
            let row = self.y + r + dy;
            let col = self.x + c + dx;
            if col < 0 || col >= BOARD_WIDTH as i8 || row >= BOARD_HEIGHT as i8 {
                return false;
            }
            row < 0 || !board.is_occupied(row, col)
        })
    }

    /// Whether any filled cell sits on an occupied board cell (spawn check)
    pub fn overlaps(&self, board: &Board) -> bool {
        self.absolute_cells()
            .any(|(row, col, _)| board.is_occupied(row, col))
    }

    /// Copy of this piece shifted by (dx, dy)
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Copy of this piece with a different shape at the same origin
    pub fn with_shape(&self, shape: Shape) -> Self {
        Self { shape, ..*self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate_swaps_dimensions() {
        let t = spawn_shape(ShapeKind::T);
        let r = rotate_cw(&t);
        assert_eq!((r.rows(), r.cols()), (3, 2));
        assert_eq!(r.to_rows(), vec![vec![0, 3], vec![3, 3], vec![0, 3]]);
    }

    #[test]
    fn test_catalog_cells_carry_shape_id() {
        for entry in CATALOG.iter() {
            assert_eq!(entry.shape.cells().count(), 4, "{:?}", entry.kind);
            assert!(entry.shape.cells().all(|(_, _, v)| v == entry.kind.id()));
        }
    }

    #[test]
    fn test_spawn_positions() {
        assert_eq!(Piece::spawn(ShapeKind::I).x, 3);
        assert_eq!(Piece::spawn(ShapeKind::O).x, 4);
        assert_eq!(Piece::spawn(ShapeKind::T).x, 3);
        assert!(ShapeKind::ALL.iter().all(|&k| Piece::spawn(k).y == 0));
    }

    #[test]
    fn test_negative_rows_are_placeable() {
        let board = Board::new();
        let piece = Piece::spawn(ShapeKind::O);
        assert!(piece.can_place(&board, 0, -3, None));
    }
}
