//! Engine configuration (seed, timing, lives, multiplier policy).

use crate::types::{BASE_TICK_MS, MAX_LIVES};

/// Tunables for one game session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Spawner seed (0 lets the host pick one)
    pub seed: u32,
    /// Logic step interval before the per-level reduction
    pub base_tick_ms: u32,
    /// Lives at the start of a game (at least 1)
    pub max_lives: u8,
    /// Scale line-clear points by the level multiplier
    pub apply_score_multiplier: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            base_tick_ms: BASE_TICK_MS,
            max_lives: MAX_LIVES,
            apply_score_multiplier: false,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    ///
    /// Missing or unparsable values keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let seed = lookup("TETRIS_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.seed);
        let base_tick_ms = lookup("TETRIS_BASE_TICK_MS")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.base_tick_ms);
        let max_lives = lookup("TETRIS_MAX_LIVES")
            .and_then(|s| s.trim().parse::<u8>().ok())
            .unwrap_or(defaults.max_lives)
            .max(1);
        let apply_score_multiplier = lookup("TETRIS_APPLY_MULTIPLIER")
            .map(|s| matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(defaults.apply_score_multiplier);

        Self {
            seed,
            base_tick_ms,
            max_lives,
            apply_score_multiplier,
        }
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }
}
