//! Tetris Arcade (workspace facade crate).
//!
//! Re-exports the member crates under one name so binaries, tests and
//! benchmarks can write `tetris_arcade::core::GameState` and friends while the
//! implementation lives in dedicated crates under `crates/`.

pub use tetris_arcade_core as core;
pub use tetris_arcade_engine as engine;
pub use tetris_arcade_input as input;
pub use tetris_arcade_scoreboard as scoreboard;
pub use tetris_arcade_term as term;
pub use tetris_arcade_types as types;
