//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`] (one action
//! per physical press) and provides the small line editor used to type a
//! player name after game over.

pub mod map;
pub mod name_entry;

pub use tetris_arcade_types as types;

pub use map::{handle_key_event, should_quit};
pub use name_entry::{NameEntry, NameEntryOutcome, MAX_NAME_LEN};
