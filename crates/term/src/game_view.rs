//! GameView: maps a `GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Phase, ShapeKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// One scoreboard row shown in the side panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreLine {
    pub name: String,
    pub score: u32,
}

/// Host-side information drawn next to the game
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HudExtras {
    pub fps: Option<u32>,
    /// Top scoreboard entries, best first
    pub scoreboard: Vec<ScoreLine>,
    /// Name typed so far, while the post-game prompt is open
    pub name_prompt: Option<String>,
    /// Last scoreboard submission status
    pub status: Option<String>,
}

/// Rows of the scoreboard shown in the side panel
const SCOREBOARD_ROWS: usize = 5;

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);
const LABEL: CellStyle = CellStyle::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0)).bold();
const VALUE: CellStyle = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
const OVERLAY: CellStyle = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();

/// Display color for a shape
pub fn shape_color(kind: ShapeKind) -> Rgb {
    match kind {
        ShapeKind::I => Rgb::new(80, 220, 220),
        ShapeKind::O => Rgb::new(240, 220, 80),
        ShapeKind::T => Rgb::new(170, 90, 220),
        ShapeKind::S => Rgb::new(100, 220, 120),
        ShapeKind::Z => Rgb::new(220, 80, 80),
        ShapeKind::J => Rgb::new(80, 120, 220),
        ShapeKind::L => Rgb::new(255, 165, 0),
    }
}

/// A lightweight terminal renderer for the game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self { cell_w: 2, cell_h: 1 }
    }
}

/// Screen position of the board frame
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        viewport: Viewport,
        extras: &HudExtras,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let board_px_w = (BOARD_WIDTH as u16) * self.cell_w;
        let board_px_h = (BOARD_HEIGHT as u16) * self.cell_h;
        let frame = Frame {
            x: 0,
            y: 0,
            w: board_px_w + 2,
            h: board_px_h + 2,
        };
        // Board plus side panel, centered as a unit.
        let total_w = frame.w + 2 + SIDE_PANEL_W;
        let frame = Frame {
            x: viewport.width.saturating_sub(total_w) / 2,
            y: viewport.height.saturating_sub(frame.h) / 2,
            ..frame
        };

        fb.fill_rect(frame.x + 1, frame.y + 1, board_px_w, board_px_h, ' ', CellStyle::new(PLAY_BG, PLAY_BG));
        draw_border(fb, frame, CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0)));

        // Locked cells and the active piece, clipped to the visible rows.
        let grid = snap.composite();
        for (y, row) in grid.iter().enumerate() {
            for (x, &value) in row.iter().enumerate() {
                match ShapeKind::from_id(value) {
                    Some(kind) => self.draw_board_cell(fb, frame, x as u16, y as u16, kind),
                    None => self.draw_empty_cell(fb, frame, x as u16, y as u16),
                }
            }
        }

        self.draw_side_panel(fb, snap, extras, viewport, frame);
        self.draw_overlays(fb, snap, extras, viewport, frame);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport, extras: &HudExtras) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, extras, &mut fb);
        fb
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16) {
        let style = CellStyle::new(Rgb::new(90, 90, 100), PLAY_BG).dim();
        self.fill_cell_rect(fb, frame, x, y, '·', style);
    }

    fn draw_board_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16, kind: ShapeKind) {
        let style = CellStyle::new(shape_color(kind), PLAY_BG).bold();
        self.fill_cell_rect(fb, frame, x, y, '█', style);
    }

    fn fill_cell_rect(&self, fb: &mut FrameBuffer, frame: Frame, cell_x: u16, cell_y: u16, ch: char, style: CellStyle) {
        let px = frame.x + 1 + cell_x * self.cell_w;
        let py = frame.y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        extras: &HudExtras,
        viewport: Viewport,
        frame: Frame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let fps = extras.fps.map_or_else(|| "-".to_string(), |fps| fps.to_string());
        let fields = [
            ("SCORE", snap.score.to_string()),
            ("TIME", snap.elapsed_ticks.to_string()),
            ("LIVES", lives_text(snap.lives, snap.max_lives)),
            ("LEVEL", snap.level.to_string()),
            ("SPEED", format!("{}ms", snap.tick_interval_ms)),
            ("FPS", fps),
        ];

        let mut y = frame.y;
        for (label, value) in &fields {
            fb.put_str(panel_x, y, label, LABEL);
            fb.put_str(panel_x, y.saturating_add(1), value, VALUE);
            y = y.saturating_add(3);
        }

        if extras.scoreboard.is_empty() {
            return;
        }
        fb.put_str(panel_x, y, "SCOREBOARD", LABEL);
        for (i, line) in extras.scoreboard.iter().take(SCOREBOARD_ROWS).enumerate() {
            let row_y = y.saturating_add(1 + i as u16);
            if row_y >= viewport.height {
                break;
            }
            let name: String = line.name.chars().take(10).collect();
            fb.put_str(panel_x, row_y, &format!("{:<10} {:>6}", name, line.score), VALUE);
        }
    }

    fn draw_overlays(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        extras: &HudExtras,
        viewport: Viewport,
        frame: Frame,
    ) {
        let mid_y = frame.y.saturating_add(frame.h / 2);
        match snap.phase {
            Phase::Paused => fb.put_str_centered(frame.x, frame.w, mid_y, "PAUSED", OVERLAY),
            Phase::GameOver => {
                fb.put_str_centered(frame.x, frame.w, mid_y.saturating_sub(2), "GAME OVER", OVERLAY);
                let score = snap.final_score.unwrap_or(snap.score);
                fb.put_str_centered(frame.x, frame.w, mid_y, &format!("SCORE {score}"), VALUE);
                if let Some(name) = &extras.name_prompt {
                    fb.put_str_centered(frame.x, frame.w, mid_y.saturating_add(2), &format!("NAME: {name}_"), OVERLAY);
                } else {
                    fb.put_str_centered(frame.x, frame.w, mid_y.saturating_add(2), "R TO RESTART", VALUE);
                }
            }
            Phase::Idle => {
                fb.put_str_centered(frame.x, frame.w, mid_y.saturating_sub(1), "TETRIS", OVERLAY);
                fb.put_str_centered(frame.x, frame.w, mid_y.saturating_add(1), "PRESS ENTER", VALUE);
            }
            Phase::Running => {}
        }

        if let Some(status) = &extras.status {
            let below = frame.y.saturating_add(frame.h);
            let y = if below < viewport.height { below } else { viewport.height.saturating_sub(1) };
            fb.put_str_centered(frame.x, frame.w, y, status, VALUE.dim());
        }
    }
}

/// Width reserved for the side panel when centering
const SIDE_PANEL_W: u16 = 18;

fn draw_border(fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
    let Frame { x, y, w, h } = frame;
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn lives_text(lives: u8, max_lives: u8) -> String {
    let full = lives.min(max_lives) as usize;
    let empty = max_lives.saturating_sub(lives) as usize;
    format!("{}{}", "♥".repeat(full), "♡".repeat(empty))
}
