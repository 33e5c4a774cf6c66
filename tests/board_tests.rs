//! Board tests - grid access, locking and row clearing

use tetris_arcade::core::{Board, BoundsError, Piece};
use tetris_arcade::types::{ShapeKind, BOARD_HEIGHT, BOARD_WIDTH};

const W: usize = BOARD_WIDTH as usize;

fn full_row(value: u8) -> [u8; W] {
    [value; W]
}

fn row_with_gap(value: u8, gap: usize) -> [u8; W] {
    let mut row = [value; W];
    row[gap] = 0;
    row
}

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);
    assert_eq!(board.filled_count(), 0);

    for row in 0..BOARD_HEIGHT as i8 {
        for col in 0..BOARD_WIDTH as i8 {
            assert_eq!(board.cell_at(row, col), Ok(0));
        }
    }
}

#[test]
fn test_cell_at_out_of_bounds() {
    let board = Board::new();

    assert_eq!(
        board.cell_at(-1, 0),
        Err(BoundsError::OutOfBounds { row: -1, col: 0 })
    );
    assert!(board.cell_at(0, -1).is_err());
    assert!(board.cell_at(BOARD_HEIGHT as i8, 0).is_err());
    assert!(board.cell_at(0, BOARD_WIDTH as i8).is_err());
}

#[test]
fn test_set_and_read_back() {
    let mut board = Board::new();
    board.set(10, 5, ShapeKind::T.id()).unwrap();
    board.set(0, 0, ShapeKind::I.id()).unwrap();

    assert_eq!(board.cell_at(10, 5), Ok(3));
    assert_eq!(board.cell_at(0, 0), Ok(1));
    assert!(board.is_occupied(10, 5));
    assert!(!board.is_occupied(10, 6));
    assert!(board.set(20, 0, 1).is_err());
}

#[test]
fn test_clear_single_bottom_row() {
    let mut board = Board::from_rows(&[row_with_gap(6, 0), full_row(1)]);

    let cleared = board.clear_full_rows();

    assert_eq!(cleared.as_slice(), &[19]);
    // The row above slid down intact.
    assert_eq!(board.row(19).unwrap(), &row_with_gap(6, 0)[..]);
    assert_eq!(board.filled_count(), W - 1);
}

#[test]
fn test_clear_adjacent_full_rows() {
    let mut board = Board::from_rows(&[full_row(2), full_row(3), full_row(4)]);

    let cleared = board.clear_full_rows();

    assert_eq!(cleared.len(), 3);
    assert_eq!(cleared.as_slice(), &[19, 18, 17]);
    assert_eq!(board.filled_count(), 0);
}

#[test]
fn test_clear_interleaved_rows_preserves_order() {
    // Rows 16..19: partial A, full, partial B, full
    let a = row_with_gap(5, 3);
    let b = row_with_gap(7, 8);
    let mut board = Board::from_rows(&[a, full_row(1), b, full_row(1)]);

    let cleared = board.clear_full_rows();

    assert_eq!(cleared.as_slice(), &[19, 17]);
    assert_eq!(board.row(19).unwrap(), &b[..]);
    assert_eq!(board.row(18).unwrap(), &a[..]);
    assert!(board.row(17).unwrap().iter().all(|&c| c == 0));
}

#[test]
fn test_clear_leaves_no_full_rows_and_keeps_height() {
    let mut board = Board::from_rows(&[full_row(1), row_with_gap(2, 4), full_row(3), full_row(4)]);

    board.clear_full_rows();

    assert_eq!(board.rows().count(), BOARD_HEIGHT as usize);
    for row in 0..BOARD_HEIGHT as usize {
        assert!(!board.is_row_full(row));
    }
}

#[test]
fn test_lock_writes_shape_ids() {
    let mut board = Board::new();
    let piece = Piece {
        y: 18,
        ..Piece::spawn(ShapeKind::O)
    };

    board.lock(&piece);

    assert_eq!(board.filled_count(), 4);
    for (row, col) in [(18, 4), (18, 5), (19, 4), (19, 5)] {
        assert_eq!(board.cell_at(row, col), Ok(ShapeKind::O.id()));
    }
}

#[test]
fn test_reset_and_write_grid() {
    let mut board = Board::from_rows(&[full_row(1)]);
    let mut grid = [[0u8; W]; BOARD_HEIGHT as usize];
    board.write_grid(&mut grid);
    assert_eq!(grid[19], full_row(1));

    board.reset();
    assert_eq!(board.filled_count(), 0);
}
