//! Terminal Tetris runner (default binary).
//!
//! Shows a title overlay until Enter, then drives one `Session` at the host
//! frame rate and renders through the framebuffer-based terminal sink. When a
//! scoreboard service is reachable it prompts for a name after game over and
//! submits the final score.

use std::fs::File;
use std::sync::Mutex;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tetris_arcade::core::EngineConfig;
use tetris_arcade::types::Phase;
use tetris_arcade::engine::{LogEffects, Session};
use tetris_arcade::input::{handle_key_event, should_quit, NameEntry, NameEntryOutcome};
use tetris_arcade::scoreboard::{ScoreboardClient, ScoreboardReply};
use tetris_arcade::term::{ScoreLine, TerminalSink};

fn main() -> Result<()> {
    init_logging()?;

    let mut config = EngineConfig::from_env();
    if config.seed == 0 {
        config.seed = clock_seed();
    }
    info!(seed = config.seed, max_lives = config.max_lives, "starting game");

    let mut sink = TerminalSink::stdout();
    sink.renderer_mut().enter()?;

    let result = run(&mut sink, config);

    // Always try to restore terminal state.
    let _ = sink.renderer_mut().exit();
    result
}

/// Log to `TETRIS_LOG_PATH` if set; the terminal itself is owned by the game.
fn init_logging() -> Result<()> {
    let Some(path) = std::env::var_os("TETRIS_LOG_PATH") else {
        return Ok(());
    };
    let file = File::create(&path).with_context(|| format!("creating log file {}", path.to_string_lossy()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
        .max(1)
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

fn run(sink: &mut TerminalSink, config: EngineConfig) -> Result<()> {
    let mut session = Session::new(config);
    session.add_effect(Box::new(LogEffects));

    let mut scoreboard = ScoreboardClient::start_from_env();
    if let Some(client) = &scoreboard {
        client.refresh();
    }

    let mut name_entry: Option<NameEntry> = None;
    // Game whose final score has already been offered for submission.
    let mut prompted_game: Option<u32> = None;

    let clock = Instant::now();
    let mut dirty = true;

    loop {
        let now_ms = clock.elapsed().as_millis() as u64;
        dirty |= session.frame(now_ms);

        let snap = session.snapshot();
        if snap.game_over() && prompted_game != Some(snap.game_id) {
            prompted_game = Some(snap.game_id);
            if scoreboard.is_some() {
                name_entry = Some(NameEntry::new());
                dirty = true;
            }
        }
        if !snap.game_over() && name_entry.is_some() {
            name_entry = None;
            dirty = true;
        }

        if let Some(client) = scoreboard.as_mut() {
            while let Some(reply) = client.try_recv() {
                match reply {
                    ScoreboardReply::Submitted(message) => sink.extras.status = Some(message),
                    ScoreboardReply::Placed(placement) => sink.extras.status = Some(placement.message()),
                    ScoreboardReply::Entries(entries) => {
                        sink.extras.scoreboard = entries
                            .into_iter()
                            .map(|e| ScoreLine {
                                name: e.name,
                                score: e.score,
                            })
                            .collect();
                    }
                    ScoreboardReply::Failed(message) => sink.extras.status = Some(message),
                }
                dirty = true;
            }
        }

        if dirty {
            sink.extras.name_prompt = name_entry.as_ref().map(|e| e.text().to_string());
            session.render(&mut *sink)?;
            dirty = false;
        }

        // Input with timeout until the next frame.
        let timeout = Duration::from_millis(session.time_until_next_frame(now_ms));
        if !event::poll(timeout)? {
            continue;
        }

        match event::read()? {
            Event::Key(key) => {
                if let Some(entry) = name_entry.as_mut() {
                    if is_ctrl_c(&key) {
                        return Ok(());
                    }
                    match entry.handle_key(key) {
                        NameEntryOutcome::Editing => {}
                        NameEntryOutcome::Submitted(name) => {
                            if let (Some(client), Some(score)) = (&scoreboard, session.snapshot().final_score) {
                                client.submit(&name, score);
                                sink.extras.status = Some("Submitting score...".to_string());
                            }
                            name_entry = None;
                        }
                        NameEntryOutcome::Cancelled => name_entry = None,
                    }
                    dirty = true;
                    continue;
                }

                if should_quit(key) {
                    return Ok(());
                }
                if session.snapshot().phase == Phase::Idle {
                    if key.kind == KeyEventKind::Press && key.code == KeyCode::Enter {
                        session.start();
                        dirty = true;
                    }
                    continue;
                }
                if let Some(action) = handle_key_event(key) {
                    dirty |= session.act(action);
                }
            }
            Event::Resize(..) => {
                sink.renderer_mut().invalidate();
                dirty = true;
            }
            _ => {}
        }
    }
}
