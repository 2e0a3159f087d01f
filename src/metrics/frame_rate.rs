use std::time::{Duration, Instant};

/// Counts frames and reports the total once per window (one second by
/// default). Purely observational.
#[derive(Debug, Clone)]
pub struct FrameCounter {
    window: Duration,
    window_start: Instant,
    frames: u32,
}

impl FrameCounter {
    pub fn new(now: Instant) -> Self {
        Self::with_window(now, Duration::from_millis(1000))
    }

    pub fn with_window(now: Instant, window: Duration) -> Self {
        Self {
            window,
            window_start: now,
            frames: 0,
        }
    }

    /// Count one finished frame. Once the window has elapsed, returns the
    /// frames seen in it and starts a new window at `now`.
    pub fn frame(&mut self, now: Instant) -> Option<u32> {
        self.frames += 1;
        if now.saturating_duration_since(self.window_start) < self.window {
            return None;
        }

        let frames = self.frames;
        self.frames = 0;
        self.window_start = now;
        Some(frames)
    }
}
