//! Frame rate sampling.

use std::time::{Duration, Instant};

const SAMPLE_INTERVAL: Duration = Duration::from_secs(1);

/// Counts frames and turns them into a frames-per-second figure once per
/// sampling interval.
#[derive(Debug, Clone)]
pub struct FrameTimer {
    last_sample: Instant,
    frames: u32,
    fps: f64,
}

impl FrameTimer {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// A timer whose first interval starts at `start`.
    pub fn starting_at(start: Instant) -> Self {
        Self {
            last_sample: start,
            frames: 0,
            fps: 0.0,
        }
    }

    /// Counts a frame presented now. See [`tick_at`](Self::tick_at).
    pub fn tick(&mut self) -> Option<f64> {
        self.tick_at(Instant::now())
    }

    /// Counts a frame presented at `now`.
    ///
    /// Returns the new rate when at least a second has passed since the last
    /// sample, and `None` otherwise.
    pub fn tick_at(&mut self, now: Instant) -> Option<f64> {
        self.frames += 1;

        let elapsed = now.saturating_duration_since(self.last_sample);
        if elapsed < SAMPLE_INTERVAL {
            return None;
        }

        self.fps = f64::from(self.frames) / elapsed.as_secs_f64();
        self.frames = 0;
        self.last_sample = now;
        log::debug!("FPS: {:.2}", self.fps);
        Some(self.fps)
    }

    /// The last computed rate; `0.0` until the first interval completes.
    pub fn current_fps(&self) -> f64 {
        self.fps
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}
