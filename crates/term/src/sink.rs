//! `RenderSink` backed by a real terminal.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::terminal;

use crate::core::GameSnapshot;
use crate::engine::RenderSink;
use crate::fb::FrameBuffer;
use crate::game_view::{GameView, HudExtras, Viewport};
use crate::renderer::TerminalRenderer;

/// Fallback when the terminal size cannot be queried
const FALLBACK_VIEWPORT: Viewport = Viewport {
    width: 80,
    height: 24,
};

pub struct TerminalSink<W: Write = io::Stdout> {
    renderer: TerminalRenderer<W>,
    view: GameView,
    fb: FrameBuffer,
    /// Host-side HUD state; the fps field is filled on every render.
    pub extras: HudExtras,
    /// Fixed size, or `None` to follow the terminal
    viewport: Option<Viewport>,
}

impl TerminalSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(TerminalRenderer::new(), None)
    }
}

impl<W: Write> TerminalSink<W> {
    pub fn new(renderer: TerminalRenderer<W>, viewport: Option<Viewport>) -> Self {
        Self {
            renderer,
            view: GameView::default(),
            fb: FrameBuffer::new(0, 0),
            extras: HudExtras::default(),
            viewport,
        }
    }

    pub fn renderer_mut(&mut self) -> &mut TerminalRenderer<W> {
        &mut self.renderer
    }

    fn viewport(&self) -> Viewport {
        self.viewport.unwrap_or_else(|| {
            terminal::size()
                .map(|(w, h)| Viewport::new(w, h))
                .unwrap_or(FALLBACK_VIEWPORT)
        })
    }
}

impl<W: Write> RenderSink for TerminalSink<W> {
    fn render(&mut self, snapshot: &GameSnapshot, fps: Option<u32>) -> Result<()> {
        self.extras.fps = fps;
        let viewport = self.viewport();
        self.view
            .render_into(snapshot, viewport, &self.extras, &mut self.fb);
        self.renderer.draw_swap(&mut self.fb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_snapshot_to_writer() {
        let renderer = TerminalRenderer::with_writer(Vec::new());
        let mut sink = TerminalSink::new(renderer, Some(Viewport::new(60, 24)));
        sink.render(&GameSnapshot::default(), Some(60)).unwrap();

        assert_eq!(sink.extras.fps, Some(60));
        assert!(!sink.renderer_mut().writer().is_empty());
    }
}
