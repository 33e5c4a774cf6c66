use crate::pieces::{Piece, Shape};
use crate::types::{Phase, ShapeKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Board cell values, row 0 at the top
pub type Grid = [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: ShapeKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            shape: value.shape,
            x: value.x,
            y: value.y,
        }
    }
}

/// Everything a render sink needs for one frame
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GameSnapshot {
    pub grid: Grid,
    pub active: Option<ActiveSnapshot>,
    pub score: u32,
    pub elapsed_ticks: u32,
    pub lives: u8,
    pub max_lives: u8,
    pub paused: bool,
    pub phase: Phase,
    pub level: u32,
    pub tick_interval_ms: u32,
    pub score_multiplier: f64,
    pub final_score: Option<u32>,
    pub game_id: u32,
}

impl GameSnapshot {
    /// Grid with the active piece drawn in; cells above row 0 are clipped
    pub fn composite(&self) -> Grid {
        let mut grid = self.grid;
        if let Some(active) = self.active {
            for (r, c, value) in active.shape.cells() {
                let row = active.y + r;
                let col = active.x + c;
                if (0..BOARD_HEIGHT as i8).contains(&row) && (0..BOARD_WIDTH as i8).contains(&col) {
                    grid[row as usize][col as usize] = value;
                }
            }
        }
        grid
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn playable(&self) -> bool {
        self.phase == Phase::Running
    }
}
