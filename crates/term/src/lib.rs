//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It avoids widget/layout libraries and instead renders into a simple
//! framebuffer that is flushed to the terminal with diffing.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Render from snapshots only, never from live game state
//! - Allow precise control over aspect ratio (2 chars wide per cell)

pub mod fb;
pub mod game_view;
pub mod renderer;
pub mod sink;

pub use tetris_arcade_core as core;
pub use tetris_arcade_engine as engine;
pub use tetris_arcade_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{shape_color, GameView, HudExtras, ScoreLine, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use sink::TerminalSink;
