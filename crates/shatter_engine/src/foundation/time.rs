//! Frame timing
//!
//! [`FrameClock`] produces the per-frame delta fed into the particle
//! simulator. Slow frames are clamped to a minimum frame rate so a stall
//! (loading, debugger break) never produces a physics step large enough to
//! tunnel particles through the ground.

use std::time::{Duration, Instant};

use crate::core::config::FrameConfig;

/// Frame timer with a minimum-FPS clamp
#[derive(Debug, Clone)]
pub struct FrameClock {
    config: FrameConfig,
    last_frame: Option<Instant>,
    frames_per_second: f32,
    frame_count: u64,
}

impl FrameClock {
    /// Create a new clock; the first tick reports the default frame rate
    pub fn new(config: FrameConfig) -> Self {
        Self {
            frames_per_second: config.default_fps,
            config,
            last_frame: None,
            frame_count: 0,
        }
    }

    /// Advance the clock using the wall-clock time
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let elapsed = self.last_frame.map(|then| now.duration_since(then));
        self.last_frame = Some(now);
        self.advance(elapsed)
    }

    /// Advance the clock by an explicit elapsed duration
    ///
    /// `None` means "no previous frame" and yields the default frame rate.
    pub fn advance(&mut self, elapsed: Option<Duration>) -> f32 {
        self.frames_per_second = match elapsed {
            Some(elapsed) if elapsed > Duration::ZERO => {
                (1.0 / elapsed.as_secs_f32()).max(self.config.min_fps)
            }
            _ => self.config.default_fps,
        };
        self.frame_count += 1;
        self.delta_time()
    }

    /// Seconds per frame (the simulator's `dt`)
    pub fn delta_time(&self) -> f32 {
        1.0 / self.frames_per_second
    }

    /// Current frames per second after clamping
    pub fn frames_per_second(&self) -> f32 {
        self.frames_per_second
    }

    /// Number of ticks since creation
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(FrameConfig::default())
    }
}
