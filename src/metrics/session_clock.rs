use std::time::{Duration, Instant};

use super::FrameCounter;

/// Timing for one play session: the clock of the round in progress, the
/// number of finished rounds and the latest frame-rate report.
///
/// Every method takes `now` explicitly so the loop owns the time source.
#[derive(Debug, Clone)]
pub struct SessionClock {
    report_window: Duration,
    round_start: Instant,
    frames: FrameCounter,
    rounds_finished: u32,
    last_fps: Option<u32>,
}

impl SessionClock {
    /// Frame rate is reported once per second
    pub fn new(now: Instant) -> Self {
        Self::with_report_window(now, Duration::from_secs(1))
    }

    pub fn with_report_window(now: Instant, report_window: Duration) -> Self {
        Self {
            report_window,
            round_start: now,
            frames: FrameCounter::with_window(now, report_window),
            rounds_finished: 0,
            last_fps: None,
        }
    }

    /// Zero the round clock and open a fresh frame-rate window at `now`
    pub fn start_round(&mut self, now: Instant) {
        self.round_start = now;
        self.frames = FrameCounter::with_window(now, self.report_window);
    }

    /// Returns the number of rounds finished so far, this one included
    pub fn finish_round(&mut self) -> u32 {
        self.rounds_finished += 1;
        self.rounds_finished
    }

    /// Count one gameplay frame. Returns the frame count of the report
    /// window when it closes.
    pub fn tick(&mut self, now: Instant) -> Option<u32> {
        let frames = self.frames.frame(now)?;
        self.last_fps = Some(frames);
        Some(frames)
    }

    /// Time since the round started, as `mm:ss`. Minutes keep counting past
    /// the hour.
    pub fn round_clock(&self, now: Instant) -> String {
        let secs = now.saturating_duration_since(self.round_start).as_secs();
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }

    pub fn rounds_finished(&self) -> u32 {
        self.rounds_finished
    }

    pub fn last_fps(&self) -> Option<u32> {
        self.last_fps
    }
}
