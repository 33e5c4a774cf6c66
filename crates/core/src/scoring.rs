//! Scoring module - line clear points and score-driven difficulty
//!
//! Difficulty is a pure function of the score: every 500 points is one level,
//! each level shortens the logic step by 50ms down to a 100ms floor, and each
//! level carries a score multiplier of `1 + level * 0.1`.

use crate::types::{LEVEL_SCORE_STEP, LINE_SCORES, MIN_TICK_MS, SPEED_STEP_MS};

/// Points for clearing `lines` rows at once.
///
/// 1/2/3/4 rows give 100/300/500/800; anything else gives 0.
pub fn score_for_clear(lines: usize) -> u32 {
    LINE_SCORES.get(lines).copied().unwrap_or(0)
}

/// Difficulty level for a cumulative score (1-based)
pub fn difficulty_level(score: u32) -> u32 {
    score / LEVEL_SCORE_STEP + 1
}

/// Logic step interval for a level, never below `MIN_TICK_MS`
pub fn tick_interval_ms(level: u32, base_tick_ms: u32) -> u32 {
    base_tick_ms
        .saturating_sub(level.saturating_mul(SPEED_STEP_MS))
        .max(MIN_TICK_MS)
}

/// Score multiplier for a level
pub fn score_multiplier(level: u32) -> f64 {
    1.0 + level as f64 * 0.1
}

/// Scale line-clear points by a multiplier, rounded to the nearest point
pub fn apply_multiplier(points: u32, multiplier: f64) -> u32 {
    (points as f64 * multiplier).round() as u32
}

/// Derived difficulty values for a score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Difficulty {
    pub level: u32,
    pub tick_interval_ms: u32,
    pub score_multiplier: f64,
}

impl Difficulty {
    pub fn for_score(score: u32, base_tick_ms: u32) -> Self {
        Self::for_level(difficulty_level(score), base_tick_ms)
    }

    pub fn for_level(level: u32, base_tick_ms: u32) -> Self {
        Self {
            level,
            tick_interval_ms: tick_interval_ms(level, base_tick_ms),
            score_multiplier: score_multiplier(level),
        }
    }
}
