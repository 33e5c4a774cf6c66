//! Game state module - the single owned state of one game session
//!
//! Ties together the board, the active piece, the spawner and scoring. All
//! mutation goes through this type: the host calls [`GameState::tick`] once per
//! frame with the elapsed time, and forwards player input through
//! [`GameState::apply_action`]. Both run on the same thread, one at a time.
//!
//! Logic advances in discrete steps throttled to the current tick interval:
//! frames may arrive much faster than steps.

use tracing::{debug, info};

use crate::board::Board;
use crate::config::EngineConfig;
use crate::pieces::{rotate_cw, Piece};
use crate::rng::Spawner;
use crate::scoring::{apply_multiplier, difficulty_level, score_for_clear, Difficulty};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{GameAction, GameEvent, Phase};

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: EngineConfig,
    board: Board,
    active: Option<Piece>,
    spawner: Spawner,
    /// Monotonic game id (increments on restart).
    game_id: u32,
    score: u32,
    /// Logic steps taken by the fall timer (player drops do not count).
    elapsed_ticks: u32,
    lives: u8,
    phase: Phase,
    difficulty: Difficulty,
    /// Time accumulated toward the next logic step.
    accumulator_ms: u32,
    final_score: Option<u32>,
    /// Pending events (drained by the host).
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game seeded from the config
    pub fn new(config: EngineConfig) -> Self {
        let spawner = Spawner::seeded(config.seed);
        Self::with_spawner(config, spawner)
    }

    /// Create a new game drawing pieces from the given spawner
    pub fn with_spawner(config: EngineConfig, spawner: Spawner) -> Self {
        let difficulty = Difficulty::for_score(0, config.base_tick_ms);
        let lives = config.max_lives.max(1);

        Self {
            config,
            board: Board::new(),
            active: None,
            spawner,
            game_id: 0,
            score: 0,
            elapsed_ticks: 0,
            lives,
            phase: Phase::Idle,
            difficulty,
            accumulator_ms: 0,
            final_score: None,
            events: Vec::new(),
        }
    }

    /// Start the game and spawn the first piece
    pub fn start(&mut self) {
        if self.phase != Phase::Idle {
            return;
        }
        self.phase = Phase::Running;
        self.accumulator_ms = 0;
        info!(game_id = self.game_id, seed = self.spawner.seed(), "game started");
        self.spawn_checked();
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access for setting up positions in tests and tools
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn elapsed_ticks(&self) -> u32 {
        self.elapsed_ticks
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Score to submit once the game is over
    pub fn final_score(&self) -> Option<u32> {
        self.final_score
    }

    pub fn game_id(&self) -> u32 {
        self.game_id
    }

    /// Drain pending events in emission order
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.grid);

        out.active = self.active.map(ActiveSnapshot::from);
        out.score = self.score;
        out.elapsed_ticks = self.elapsed_ticks;
        out.lives = self.lives;
        out.max_lives = self.config.max_lives.max(1);
        out.paused = self.paused();
        out.phase = self.phase;
        out.level = self.difficulty.level;
        out.tick_interval_ms = self.difficulty.tick_interval_ms;
        out.score_multiplier = self.difficulty.score_multiplier;
        out.final_score = self.final_score;
        out.game_id = self.game_id;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Feed frame time; runs one logic step once the tick interval has elapsed.
    ///
    /// Returns true when a step ran. Surplus time is not carried over.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.phase != Phase::Running {
            return false;
        }

        self.accumulator_ms = self.accumulator_ms.saturating_add(elapsed_ms);
        if self.accumulator_ms < self.difficulty.tick_interval_ms {
            return false;
        }

        self.accumulator_ms = 0;
        self.step();
        true
    }

    /// One logic update, ignoring the throttle
    pub fn step(&mut self) {
        if self.phase != Phase::Running {
            return;
        }
        self.elapsed_ticks = self.elapsed_ticks.wrapping_add(1);
        self.advance();
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        if self.phase == Phase::Paused && !action.allowed_while_paused() {
            return false;
        }
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::Rotate => self.rotate(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::Pause => self.toggle_pause(),
            GameAction::Resume => self.resume(),
            GameAction::Restart => {
                self.restart();
                true
            }
        }
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(1, 0)
    }

    /// Move down one row, settling the piece if it is blocked
    pub fn soft_drop(&mut self) -> bool {
        if self.phase != Phase::Running || self.active.is_none() {
            return false;
        }
        self.advance();
        true
    }

    /// Drop to the lowest valid row and settle
    pub fn hard_drop(&mut self) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        let Some(mut piece) = self.active else {
            return false;
        };

        while piece.can_place(&self.board, 0, 1, None) {
            piece = piece.shifted(0, 1);
        }
        self.active = Some(piece);
        self.advance();
        true
    }

    /// Rotate 90° clockwise in place; rejected rotations leave the piece as is
    pub fn rotate(&mut self) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        let Some(piece) = self.active else {
            return false;
        };

        let candidate = rotate_cw(&piece.shape);
        if !piece.can_place(&self.board, 0, 0, Some(&candidate)) {
            return false;
        }
        self.active = Some(piece.with_shape(candidate));
        true
    }

    pub fn pause(&mut self) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        self.phase = Phase::Paused;
        self.events.push(GameEvent::Paused);
        debug!("paused");
        true
    }

    /// Leave the paused state; the step throttle restarts from zero
    pub fn resume(&mut self) -> bool {
        if self.phase != Phase::Paused {
            return false;
        }
        self.phase = Phase::Running;
        self.accumulator_ms = 0;
        self.events.push(GameEvent::Resumed);
        debug!("resumed");
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            Phase::Running => self.pause(),
            Phase::Paused => self.resume(),
            _ => false,
        }
    }

    /// Replace the whole state with a fresh running game.
    ///
    /// The spawner stream continues, so a restarted game gets new pieces.
    pub fn restart(&mut self) {
        let mut next = Self::with_spawner(self.config.clone(), self.spawner.clone());
        next.game_id = self.game_id.wrapping_add(1);
        next.events = std::mem::take(&mut self.events);
        next.start();
        next.events.push(GameEvent::Restarted);
        info!(game_id = next.game_id, "game restarted");
        *self = next;
    }

    fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        let Some(piece) = self.active else {
            return false;
        };

        if !piece.can_place(&self.board, dx, dy, None) {
            return false;
        }
        self.active = Some(piece.shifted(dx, dy));
        true
    }

    /// Fall one row, then clear full rows, then re-check the active piece.
    ///
    /// Clears run whether or not the piece locked, so a row completed by any
    /// means is removed on the next step.
    fn advance(&mut self) {
        self.fall();
        if self.phase != Phase::Running {
            return;
        }

        self.resolve_clears();

        if self.active.is_some_and(|p| p.overlaps(&self.board)) {
            self.lose_round();
        }
    }

    /// Gravity: move down, or settle when blocked
    fn fall(&mut self) {
        let Some(piece) = self.active else {
            return;
        };

        if piece.can_place(&self.board, 0, 1, None) {
            self.active = Some(piece.shifted(0, 1));
            return;
        }

        self.settle(piece);
    }

    /// Lock the piece and spawn the next one
    fn settle(&mut self, piece: Piece) {
        self.board.lock(&piece);
        self.events.push(GameEvent::PieceLocked);
        debug!(kind = piece.kind.as_str(), x = piece.x, y = piece.y, "piece locked");

        self.spawn_checked();
    }

    fn spawn_checked(&mut self) {
        let piece = self.spawner.next();
        self.active = Some(piece);
        if piece.overlaps(&self.board) {
            self.lose_round();
        }
    }

    fn resolve_clears(&mut self) {
        let cleared = self.board.clear_full_rows();
        if cleared.is_empty() {
            return;
        }

        let lines = cleared.len();
        let mut points = score_for_clear(lines);
        if self.config.apply_score_multiplier {
            points = apply_multiplier(points, self.difficulty.score_multiplier);
        }
        self.score = self.score.saturating_add(points);
        self.events.push(GameEvent::LinesCleared(lines as u8));
        debug!(lines, points, score = self.score, "lines cleared");

        let level = difficulty_level(self.score);
        if level != self.difficulty.level {
            self.difficulty = Difficulty::for_level(level, self.config.base_tick_ms);
            self.events.push(GameEvent::LevelChanged(level));
            info!(
                level,
                tick_interval_ms = self.difficulty.tick_interval_ms,
                "level changed"
            );
        }
    }

    /// Spawn overlap: consume a life, then reset the round or end the game
    fn lose_round(&mut self) {
        self.lives = self.lives.saturating_sub(1);

        if self.lives > 0 {
            self.board.reset();
            self.active = Some(self.spawner.next());
            self.events.push(GameEvent::RoundLost {
                lives_remaining: self.lives,
            });
            info!(lives = self.lives, score = self.score, "round lost");
            return;
        }

        self.phase = Phase::GameOver;
        self.final_score = Some(self.score);
        self.events.push(GameEvent::GameOver {
            final_score: self.score,
        });
        info!(score = self.score, "game over");
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(EngineConfig::default().with_seed(1))
    }
}
