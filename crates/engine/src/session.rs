//! Session - the host-side driver around one `GameState`
//!
//! Owns the pacing, the fps meter and the event fan-out so that a binary only
//! has to feed wall-clock time and input, and hand the snapshot to a renderer.

use tracing::{debug, info, warn};

use crate::core::{EngineConfig, GameSnapshot, GameState};
use crate::pacer::{FpsMeter, FramePacer};
use crate::types::{GameAction, GameEvent, FRAME_MS};

/// Presentation target for snapshots
pub trait RenderSink {
    fn render(&mut self, snapshot: &GameSnapshot, fps: Option<u32>) -> anyhow::Result<()>;
}

/// Consumer of core events (sound, flashes, logging, score submission)
pub trait EffectSink {
    fn on_event(&mut self, event: &GameEvent);
}

/// Logs every event through `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct LogEffects;

impl EffectSink for LogEffects {
    fn on_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::PieceLocked => debug!("piece locked"),
            GameEvent::LinesCleared(n) => info!(lines = n, "lines cleared"),
            GameEvent::LevelChanged(level) => info!(level, "level changed"),
            GameEvent::RoundLost { lives_remaining } => {
                warn!(lives_remaining, "round lost")
            }
            GameEvent::GameOver { final_score } => info!(final_score, "game over"),
            GameEvent::Paused => debug!("paused"),
            GameEvent::Resumed => debug!("resumed"),
            GameEvent::Restarted => info!("restarted"),
        }
    }
}

pub struct Session {
    state: GameState,
    pacer: FramePacer,
    fps: FpsMeter,
    snapshot: GameSnapshot,
    effects: Vec<Box<dyn EffectSink>>,
    /// Events dispatched by the most recent frame or action.
    last_events: Vec<GameEvent>,
}

impl Session {
    pub fn new(config: EngineConfig) -> Self {
        Self::with_state(GameState::new(config), FRAME_MS)
    }

    pub fn with_state(state: GameState, frame_ms: u32) -> Self {
        let snapshot = state.snapshot();
        Self {
            state,
            pacer: FramePacer::new(frame_ms),
            fps: FpsMeter::new(),
            snapshot,
            effects: Vec::new(),
            last_events: Vec::new(),
        }
    }

    pub fn add_effect(&mut self, sink: Box<dyn EffectSink>) {
        self.effects.push(sink);
    }

    pub fn start(&mut self) {
        self.state.start();
        self.pacer.reset();
        self.dispatch();
    }

    /// Run one frame if the frame budget allows.
    ///
    /// Ticks the game with the elapsed frame time, dispatches events and
    /// refreshes the snapshot. Returns whether a frame was produced.
    pub fn frame(&mut self, now_ms: u64) -> bool {
        let Some(elapsed_ms) = self.pacer.should_run(now_ms) else {
            return false;
        };

        self.fps.record(now_ms);
        self.state.tick(elapsed_ms);
        self.dispatch();
        true
    }

    /// Apply one player action; returns whether it changed anything
    pub fn act(&mut self, action: GameAction) -> bool {
        let applied = self.state.apply_action(action);
        if applied && matches!(action, GameAction::Resume | GameAction::Pause | GameAction::Restart) {
            // No catch-up for time spent paused or in the previous game.
            self.pacer.reset();
        }
        self.dispatch();
        applied
    }

    /// Replace the whole game state at once
    pub fn restart(&mut self) {
        self.state.restart();
        self.pacer.reset();
        self.fps.clear();
        self.dispatch();
    }

    pub fn render(&self, sink: &mut dyn RenderSink) -> anyhow::Result<()> {
        sink.render(&self.snapshot, self.fps.fps())
    }

    pub fn snapshot(&self) -> &GameSnapshot {
        &self.snapshot
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn fps(&self) -> Option<u32> {
        self.fps.fps()
    }

    pub fn last_events(&self) -> &[GameEvent] {
        &self.last_events
    }

    /// Milliseconds until the next frame is due
    pub fn time_until_next_frame(&self, now_ms: u64) -> u64 {
        self.pacer.time_until_next(now_ms)
    }

    fn dispatch(&mut self) {
        self.last_events = self.state.take_events();
        for event in &self.last_events {
            for sink in self.effects.iter_mut() {
                sink.on_event(event);
            }
        }
        self.state.snapshot_into(&mut self.snapshot);
    }
}
