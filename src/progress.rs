//! Scroll progress sampling and the derived velocity estimate.

use crate::easing::{clamp01, damp};

/// Normalized scroll position in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct ScrollProgress(f32);

impl ScrollProgress {
    pub const START: ScrollProgress = ScrollProgress(0.0);

    /// Clamps rubber-band overscroll into range; NaN becomes 0.
    pub fn new(value: f32) -> Self {
        Self(clamp01(value))
    }

    /// `offset / max_offset`, or 0 when nothing can scroll.
    pub fn from_offset(offset: f64, max_offset: f64) -> Self {
        if max_offset <= 0.0 || !max_offset.is_finite() {
            return Self::START;
        }
        Self::new((offset / max_offset) as f32)
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

/// Anything that can report the current scroll position once per frame.
pub trait ProgressSource {
    /// Advance internal smoothing by `dt` seconds and return this frame's sample.
    fn sample(&mut self, dt: f32) -> ScrollProgress;

    /// Move the scroll position programmatically (auto-scroll).
    fn scroll_to(&mut self, progress: ScrollProgress);

    /// Whether overlays are carried along by the scrolling content and
    /// need their translation compensated.
    fn moves_overlays(&self) -> bool {
        false
    }
}

/// A virtual scroll container: wheel/touch deltas move a target offset and
/// the visible offset eases toward it. Nothing on the page actually scrolls,
/// so fixed overlay layers stay where they are.
#[derive(Debug, Clone)]
pub struct VirtualScroll {
    target: f32,
    offset: f32,
    /// Seconds to cover most of the distance to the target.
    damping: f32,
    /// Scrollable distance in pixels.
    extent: f32,
}

impl VirtualScroll {
    pub fn new(extent_px: f32, damping: f32) -> Self {
        Self {
            target: 0.0,
            offset: 0.0,
            damping: damping.max(0.0),
            extent: extent_px.max(1.0),
        }
    }

    pub fn set_extent(&mut self, extent_px: f32) {
        self.extent = extent_px.max(1.0);
    }

    /// Apply a wheel delta in pixels.
    pub fn scroll_by(&mut self, delta_px: f32) {
        if delta_px.is_finite() {
            self.target = clamp01(self.target + delta_px / self.extent);
        }
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }
}

impl ProgressSource for VirtualScroll {
    fn sample(&mut self, dt: f32) -> ScrollProgress {
        if self.damping <= 0.0 {
            self.offset = self.target;
        } else {
            // Reach ~98% of the distance in `damping` seconds.
            self.offset = damp(self.offset, self.target, 4.0 / self.damping, dt.max(0.0));
            if (self.offset - self.target).abs() < 1e-5 {
                self.offset = self.target;
            }
        }
        ScrollProgress::new(self.offset)
    }

    fn scroll_to(&mut self, progress: ScrollProgress) {
        self.target = progress.get();
        self.offset = progress.get();
    }
}

/// Damped d(progress)/dt, fed one sample per frame.
#[derive(Debug, Clone, Default)]
pub struct VelocityEstimate {
    last: Option<f32>,
    velocity: f32,
}

impl VelocityEstimate {
    const LAMBDA: f32 = 6.0;
    /// Guards against tiny deltas from back-to-back frames.
    const MIN_DT: f32 = 1.0 / 144.0;

    pub fn update(&mut self, progress: ScrollProgress, dt: f32) -> f32 {
        let r = progress.get();
        let raw = match self.last {
            Some(last) => (r - last) / dt.max(Self::MIN_DT),
            None => 0.0,
        };
        self.last = Some(r);
        self.velocity = damp(self.velocity, raw, Self::LAMBDA, dt.max(0.0));
        self.velocity
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// `|v| * 1.35` clamped to `[0, 1]`: how hard the user is flicking.
    pub fn boost(&self) -> f32 {
        clamp01(self.velocity.abs() * 1.35)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
