use arrayvec::ArrayVec;

use crate::types::FPS_WINDOW;

/// Longest frame gap handed to the game in one frame
pub const MAX_FRAME_GAP_MS: u64 = 1000;

/// Fixed-rate frame gate.
///
/// The host polls as often as it likes; a frame is produced only once the frame
/// budget has elapsed since the previous one.
#[derive(Debug, Clone)]
pub struct FramePacer {
    frame_ms: u64,
    last_frame_ms: u64,
    has_run: bool,
}

impl FramePacer {
    pub fn new(frame_ms: u32) -> Self {
        Self {
            frame_ms: frame_ms as u64,
            last_frame_ms: 0,
            has_run: false,
        }
    }

    pub fn frame_ms(&self) -> u64 {
        self.frame_ms
    }

    /// Decide whether to run a frame at `now_ms`.
    ///
    /// - First call: runs with 0 elapsed.
    /// - Later calls: runs when at least `frame_ms` passed, returning the gap
    ///   (capped at [`MAX_FRAME_GAP_MS`]).
    pub fn should_run(&mut self, now_ms: u64) -> Option<u32> {
        if !self.has_run {
            self.rebaseline(now_ms);
            return Some(0);
        }

        let elapsed = now_ms.saturating_sub(self.last_frame_ms);
        if elapsed < self.frame_ms {
            return None;
        }

        self.last_frame_ms = now_ms;
        Some(elapsed.min(MAX_FRAME_GAP_MS) as u32)
    }

    /// Treat `now_ms` as the previous frame (no catch-up after a stall)
    pub fn rebaseline(&mut self, now_ms: u64) {
        self.last_frame_ms = now_ms;
        self.has_run = true;
    }

    /// Forget the previous frame; the next `should_run` re-baselines
    pub fn reset(&mut self) {
        self.has_run = false;
    }

    /// Milliseconds until the next frame is due (for input poll timeouts)
    pub fn time_until_next(&self, now_ms: u64) -> u64 {
        if !self.has_run {
            return 0;
        }
        (self.last_frame_ms + self.frame_ms).saturating_sub(now_ms)
    }
}

/// Rolling frames-per-second estimate over the last `FPS_WINDOW` frames
#[derive(Debug, Clone, Default)]
pub struct FpsMeter {
    stamps: ArrayVec<u64, FPS_WINDOW>,
}

impl FpsMeter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, now_ms: u64) {
        if self.stamps.is_full() {
            self.stamps.remove(0);
        }
        self.stamps.push(now_ms);
    }

    /// `1000 / average frame delta`, rounded; `None` until two frames exist
    pub fn fps(&self) -> Option<u32> {
        let (first, last) = (self.stamps.first()?, self.stamps.last()?);
        let frames = self.stamps.len() as u64 - 1;
        let span = last.saturating_sub(*first);
        if frames == 0 || span == 0 {
            return None;
        }
        Some(((frames * 1000 + span / 2) / span) as u32)
    }

    pub fn clear(&mut self) {
        self.stamps.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_runs_immediately() {
        let mut pacer = FramePacer::new(16);
        assert_eq!(pacer.should_run(1000), Some(0));
    }

    #[test]
    fn frames_sooner_than_budget_are_skipped() {
        let mut pacer = FramePacer::new(16);
        assert_eq!(pacer.should_run(0), Some(0));
        assert_eq!(pacer.should_run(10), None);
        assert_eq!(pacer.should_run(15), None);
        assert_eq!(pacer.should_run(16), Some(16));
        assert_eq!(pacer.should_run(40), Some(24));
    }

    #[test]
    fn long_stalls_are_capped() {
        let mut pacer = FramePacer::new(16);
        pacer.should_run(0);
        assert_eq!(pacer.should_run(60_000), Some(MAX_FRAME_GAP_MS as u32));
    }

    #[test]
    fn reset_rebaselines_on_next_frame() {
        let mut pacer = FramePacer::new(16);
        pacer.should_run(0);
        pacer.reset();
        assert_eq!(pacer.should_run(5_000), Some(0));
        assert_eq!(pacer.time_until_next(5_010), 6);
    }

    #[test]
    fn fps_needs_two_frames() {
        let mut meter = FpsMeter::new();
        assert_eq!(meter.fps(), None);
        meter.record(0);
        assert_eq!(meter.fps(), None);
        meter.record(16);
        assert_eq!(meter.fps(), Some(63));
    }

    #[test]
    fn fps_window_is_bounded() {
        let mut meter = FpsMeter::new();
        // Slow frames first, then a full window of 20ms frames.
        for i in 0..10 {
            meter.record(i * 100);
        }
        let start = 10_000;
        for i in 0..FPS_WINDOW as u64 {
            meter.record(start + i * 20);
        }
        assert_eq!(meter.fps(), Some(50));
    }
}
