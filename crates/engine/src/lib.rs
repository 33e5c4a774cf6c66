//! Engine - fixed-rate host driver for the core game
//!
//! - [`pacer`]: frame gate and rolling fps meter
//! - [`session`]: one running game plus its render and effect sinks

pub mod pacer;
pub mod session;

pub use tetris_arcade_core as core;
pub use tetris_arcade_types as types;

pub use pacer::{FpsMeter, FramePacer, MAX_FRAME_GAP_MS};
pub use session::{EffectSink, LogEffects, RenderSink, Session};
