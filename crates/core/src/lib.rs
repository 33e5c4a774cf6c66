//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and simulation logic.
//! It has no dependencies on rendering, terminals or networking, making it:
//!
//! - **Deterministic**: Same seed (or scripted spawner) produces identical games
//! - **Testable**: Unit tests for every rule, snapshots instead of screens
//! - **Portable**: Can run in any host (terminal, headless, benchmarks)
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid of shape ids with bounds-checked access and row clearing
//! - [`pieces`]: Shape matrices, the 7-shape catalog, clockwise rotation and collision
//! - [`rng`]: Uniform independent piece spawning (seeded LCG or scripted)
//! - [`scoring`]: Line clear points and score-driven difficulty
//! - [`game_state`]: The session state machine (ticks, input, lives, restart)
//! - [`snapshot`]: Plain render model handed to presentation code
//! - [`config`]: Engine tunables read from the environment
//!
//! # Game Rules
//!
//! - **Uniform spawns**: each piece is an independent draw, repeats happen
//! - **Plain rotation**: 90° clockwise matrix rotation, no wall kicks
//! - **Immediate lock**: a piece that cannot move down locks on the next fall
//! - **Lives**: a spawn that overlaps the stack costs a life and resets the board
//! - **Scoring**: 100/300/500/800 for 1-4 rows; every 500 points is a level
//!
//! # Example
//!
//! ```
//! use tetris_arcade_core::{EngineConfig, GameState};
//! use tetris_arcade_types::{GameAction, Phase};
//!
//! let mut game = GameState::new(EngineConfig::default().with_seed(12345));
//! game.start();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert_eq!(game.phase(), Phase::Running);
//! assert_eq!(game.board().filled_count(), 4);
//! ```
//!
//! # Timing
//!
//! Call [`GameState::tick`](game_state::GameState::tick) every frame with the
//! elapsed time. A logic step runs once the accumulated time reaches the current
//! tick interval: 450ms at level 1, 50ms faster per level, never below 100ms.

pub mod board;
pub mod config;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use tetris_arcade_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, BoundsError};
pub use config::EngineConfig;
pub use game_state::GameState;
pub use pieces::{rotate_cw, Piece, Shape, CATALOG};
pub use rng::{SimpleRng, Spawner};
pub use scoring::{difficulty_level, score_for_clear, tick_interval_ms, Difficulty};
pub use snapshot::{ActiveSnapshot, GameSnapshot, Grid};
