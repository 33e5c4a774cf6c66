//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, scoreboard glue).
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//!
//! # Game Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_TICK_MS` | 500 | Logic step interval at difficulty 0 |
//! | `SPEED_STEP_MS` | 50 | Interval reduction per difficulty level |
//! | `MIN_TICK_MS` | 100 | Fastest possible logic step |
//! | `FRAME_MS` | 16 | Host frame budget (~60 FPS) |
//!
//! # Difficulty by Score
//!
//! | Score | Level | Tick interval |
//! |-------|-------|---------------|
//! | 0-499 | 1 | 450ms |
//! | 500-999 | 2 | 400ms |
//! | 1000-1499 | 3 | 350ms |
//! | ... | ... | floor at 100ms |
//!
//! # Examples
//!
//! ```
//! use tetris_arcade_types::{ShapeKind, GameAction, BOARD_WIDTH, BOARD_HEIGHT};
//!
//! assert_eq!(ShapeKind::I.id(), 1);
//! assert_eq!(ShapeKind::from_id(7), Some(ShapeKind::L));
//!
//! assert!(GameAction::Resume.allowed_while_paused());
//! assert!(!GameAction::HardDrop.allowed_while_paused());
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Lives at the start of a game
pub const MAX_LIVES: u8 = 3;

/// Base logic step interval in milliseconds
pub const BASE_TICK_MS: u32 = 500;

/// Logic step interval reduction per difficulty level
pub const SPEED_STEP_MS: u32 = 50;

/// Absolute minimum logic step interval (100ms)
pub const MIN_TICK_MS: u32 = 100;

/// Score needed per difficulty level
pub const LEVEL_SCORE_STEP: u32 = 500;

/// Host frame budget in milliseconds (16ms ≈ 60 FPS)
pub const FRAME_MS: u32 = 16;

/// Number of frame timestamps kept for the FPS average
pub const FPS_WINDOW: usize = 60;

/// Line clear scoring table
///
/// Points for clearing N lines at once:
/// - 0 lines: 0 points
/// - 1 line: 100 points
/// - 2 lines: 300 points
/// - 3 lines: 500 points
/// - 4 lines: 800 points
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// The seven tetromino shapes, in catalog order
///
/// Each shape has a stable id (1..=7) that is written into board cells
/// when a piece locks; 0 is reserved for empty cells.
/// - **I**: Cyan, horizontal bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Purple, T-shaped
/// - **S**: Green, S-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl ShapeKind {
    /// All shapes in catalog order
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::T,
        ShapeKind::S,
        ShapeKind::Z,
        ShapeKind::J,
        ShapeKind::L,
    ];

    /// Cell value written to the board for this shape (1..=7)
    pub fn id(&self) -> u8 {
        match self {
            ShapeKind::I => 1,
            ShapeKind::O => 2,
            ShapeKind::T => 3,
            ShapeKind::S => 4,
            ShapeKind::Z => 5,
            ShapeKind::J => 6,
            ShapeKind::L => 7,
        }
    }

    /// Look up a shape by its cell value
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_arcade_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_id(3), Some(ShapeKind::T));
    /// assert_eq!(ShapeKind::from_id(0), None);
    /// ```
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1..=7 => Some(Self::ALL[(id - 1) as usize]),
            _ => None,
        }
    }

    /// Short lowercase name, used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::I => "i",
            ShapeKind::O => "o",
            ShapeKind::T => "t",
            ShapeKind::S => "s",
            ShapeKind::Z => "z",
            ShapeKind::J => "j",
            ShapeKind::L => "l",
        }
    }
}

/// Game actions that can be applied to modify game state
///
/// Each physical key press maps to at most one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down, locking it if blocked
    SoftDrop,
    /// Rotate piece 90° clockwise
    Rotate,
    /// Drop piece to its lowest valid position and lock it
    HardDrop,
    /// Toggle pause state
    Pause,
    /// Leave the paused state
    Resume,
    /// Restart the game from scratch
    Restart,
}

impl GameAction {
    /// Whether the action is honored while the game is paused
    pub fn allowed_while_paused(&self) -> bool {
        matches!(
            self,
            GameAction::Pause | GameAction::Resume | GameAction::Restart
        )
    }
}

/// Lifecycle phase of a game session
///
/// ```text
/// Idle -> Running <-> Paused
///            |
///            +-- spawn overlap, lives left --> Running (round reset)
///            +-- spawn overlap, no lives   --> GameOver -- restart --> Running
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Idle,
    Running,
    Paused,
    GameOver,
}

/// Core-side events emitted by state transitions.
///
/// Consumed by presentation collaborators (effects, logging, score submission).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// The active piece was written into the board.
    PieceLocked,
    /// 1..=4 rows were cleared at once.
    LinesCleared(u8),
    /// Difficulty level changed after a scoring event.
    LevelChanged(u32),
    /// A spawned piece overlapped the stack and a life was consumed.
    RoundLost { lives_remaining: u8 },
    /// The last life was consumed; the score is final.
    GameOver { final_score: u32 },
    Paused,
    Resumed,
    Restarted,
}
