use tetris_arcade::core::{GameSnapshot, GameState};
use tetris_arcade::term::{shape_color, GameView, HudExtras, ScoreLine, Viewport};
use tetris_arcade::types::{Phase, ShapeKind};

fn running_snapshot() -> GameSnapshot {
    let mut gs = GameState::default();
    gs.start();
    gs.snapshot()
}

#[test]
fn term_view_renders_border_corners() {
    let snap = running_snapshot();
    let view = GameView::default();

    // With cell_w=2 and cell_h=1:
    // board pixels = 10*2 by 20*1 => 20x20
    // plus border => 22x22
    let fb = view.render(&snap, Viewport::new(22, 22), &HudExtras::default());

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_locked_cell_as_two_chars_wide() {
    let mut snap = running_snapshot();
    snap.grid[19][0] = ShapeKind::I.id();
    snap.active = None;

    let fb = GameView::default().render(&snap, Viewport::new(22, 22), &HudExtras::default());

    // Inside border: (1,1) origin. Each cell is 2 chars wide.
    let (x0, y0) = (1, 1 + 19);
    for x in [x0, x0 + 1] {
        let cell = fb.get(x, y0).unwrap();
        assert_eq!(cell.ch, '█');
        assert_eq!(cell.style.fg, shape_color(ShapeKind::I));
    }
    assert_ne!(fb.get(x0 + 2, y0).unwrap().ch, '█');
}

#[test]
fn term_view_draws_active_piece() {
    let snap = running_snapshot();
    let active = snap.active.unwrap();

    let fb = GameView::default().render(&snap, Viewport::new(22, 22), &HudExtras::default());

    let filled = (1..21)
        .flat_map(|y| (1..21).map(move |x| (x, y)))
        .filter(|&(x, y)| fb.get(x, y).unwrap().ch == '█')
        .count();
    assert_eq!(filled, 8, "four cells, two columns each");
    let (r, c, _) = active.shape.cells().next().unwrap();
    let x = 1 + (active.x + c) as u16 * 2;
    let y = 1 + (active.y + r) as u16;
    assert_eq!(fb.get(x, y).unwrap().ch, '█');
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let mut snap = running_snapshot();
    snap.score = 1234;
    snap.level = 3;
    snap.lives = 2;
    snap.tick_interval_ms = 350;

    let extras = HudExtras {
        fps: Some(60),
        ..HudExtras::default()
    };
    let fb = GameView::default().render(&snap, Viewport::new(80, 24), &extras);

    for text in ["SCORE", "1234", "TIME", "LIVES", "♥♥♡", "LEVEL", "SPEED", "350ms", "FPS", "60"] {
        assert!(fb.contains_text(text), "missing {text:?}");
    }
    assert!(!fb.contains_text("SCOREBOARD"));
}

#[test]
fn term_view_hides_side_panel_when_narrow() {
    let snap = running_snapshot();
    let fb = GameView::default().render(&snap, Viewport::new(30, 22), &HudExtras::default());
    assert!(!fb.contains_text("SCORE"));
}

#[test]
fn term_view_lists_top_scores() {
    let snap = running_snapshot();
    let extras = HudExtras {
        scoreboard: (0..8)
            .map(|i| ScoreLine {
                name: format!("player{i}"),
                score: 1000 - i * 100,
            })
            .collect(),
        ..HudExtras::default()
    };

    let fb = GameView::default().render(&snap, Viewport::new(80, 30), &extras);

    assert!(fb.contains_text("SCOREBOARD"));
    assert!(fb.contains_text("player0"));
    assert!(fb.contains_text("player4"));
    assert!(!fb.contains_text("player5"));
}

#[test]
fn term_view_paused_overlay() {
    let mut snap = running_snapshot();
    snap.phase = Phase::Paused;
    snap.paused = true;

    let fb = GameView::default().render(&snap, Viewport::new(80, 24), &HudExtras::default());
    assert!(fb.contains_text("PAUSED"));
    assert!(!fb.contains_text("GAME OVER"));
}

#[test]
fn term_view_idle_title_overlay() {
    let snap = GameState::default().snapshot();
    assert_eq!(snap.phase, Phase::Idle);

    let fb = GameView::default().render(&snap, Viewport::new(80, 24), &HudExtras::default());
    assert!(fb.contains_text("PRESS ENTER"));
    assert!(!fb.contains_text("PAUSED"));

    let fb = GameView::default().render(&running_snapshot(), Viewport::new(80, 24), &HudExtras::default());
    assert!(!fb.contains_text("PRESS ENTER"));
}

#[test]
fn term_view_game_over_prompt_and_status() {
    let mut snap = running_snapshot();
    snap.phase = Phase::GameOver;
    snap.lives = 0;
    snap.final_score = Some(500);

    let mut extras = HudExtras {
        name_prompt: Some("ada".to_string()),
        ..HudExtras::default()
    };
    let fb = GameView::default().render(&snap, Viewport::new(80, 30), &extras);
    assert!(fb.contains_text("GAME OVER"));
    assert!(fb.contains_text("SCORE 500"));
    assert!(fb.contains_text("NAME: ada_"));

    extras.name_prompt = None;
    extras.status = Some("Score submitted successfully".to_string());
    let fb = GameView::default().render(&snap, Viewport::new(80, 30), &extras);
    assert!(fb.contains_text("R TO RESTART"));
    assert!(fb.contains_text("Score submitted"));
}
