//! Rolling frame timing, fed from the animation-frame timestamps.

use std::collections::VecDeque;

const SLOW_FRAME_FPS: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameReport {
    pub fps: f64,
    pub avg_fps: f64,
    pub frame_time_ms: f64,
    /// Share of frames slower than 30 fps, in percent.
    pub dropped_pct: f64,
}

#[derive(Debug, Clone)]
pub struct FrameStats {
    samples: VecDeque<f64>,
    capacity: usize,
    frames: u64,
    dropped: u64,
    last_ms: f64,
}

impl FrameStats {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
            frames: 0,
            dropped: 0,
            last_ms: 0.0,
        }
    }

    /// Record one frame delta in milliseconds.
    pub fn record(&mut self, delta_ms: f64) {
        if !(delta_ms > 0.0 && delta_ms.is_finite()) {
            return;
        }
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(delta_ms);
        self.frames += 1;
        if 1000.0 / delta_ms < SLOW_FRAME_FPS {
            self.dropped += 1;
        }
        self.last_ms = delta_ms;
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn report(&self) -> FrameReport {
        if self.samples.is_empty() {
            return FrameReport::default();
        }
        let avg_ms = self.samples.iter().sum::<f64>() / self.samples.len() as f64;
        FrameReport {
            fps: 1000.0 / self.last_ms,
            avg_fps: 1000.0 / avg_ms,
            frame_time_ms: self.last_ms,
            dropped_pct: self.dropped as f64 / self.frames as f64 * 100.0,
        }
    }
}
