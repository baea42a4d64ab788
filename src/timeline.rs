//! Phase segmentation: global scroll progress → per-phase visibility and
//! local progress.

use crate::config::TimelineBoundaries;
use crate::easing::clamp01;
use crate::error::Result;

/// Normalized position of `value` inside `[start, end]`, clamped to `[0, 1]`.
///
/// A zero or negative width window counts as already complete and yields 1.
#[inline]
pub fn range_progress(value: f32, start: f32, end: f32) -> f32 {
    if end <= start {
        return 1.0;
    }
    clamp01((value - start) / (end - start))
}

/// The visual phases, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Hero,
    Void,
    Tunnel,
    About,
    Transition,
    Gallery,
}

impl Phase {
    pub const ALL: [Phase; 6] = [
        Phase::Hero,
        Phase::Void,
        Phase::Tunnel,
        Phase::About,
        Phase::Transition,
        Phase::Gallery,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// A `[start, end)` progress window with phase-specific slack on either side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseWindow {
    pub start: f32,
    pub end: f32,
    /// Visible this far before `start`.
    pub lead: f32,
    /// Visible this far after `end`.
    pub trail: f32,
}

impl PhaseWindow {
    pub const fn new(start: f32, end: f32) -> Self {
        Self {
            start,
            end,
            lead: 0.0,
            trail: 0.0,
        }
    }

    pub const fn with_slack(mut self, lead: f32, trail: f32) -> Self {
        self.lead = lead;
        self.trail = trail;
        self
    }

    pub fn is_visible(&self, r: f32) -> bool {
        r >= self.start - self.lead && r < self.end + self.trail
    }

    pub fn local(&self, r: f32) -> f32 {
        range_progress(r, self.start, self.end)
    }

    pub fn sample(&self, r: f32) -> PhaseSample {
        PhaseSample {
            visible: self.is_visible(r),
            local: self.local(r),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PhaseSample {
    pub visible: bool,
    pub local: f32,
}

/// One segmentation result per phase for a single progress value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Segments {
    samples: [PhaseSample; 6],
}

impl Segments {
    pub fn get(&self, phase: Phase) -> PhaseSample {
        self.samples[phase.index()]
    }

    pub fn visible(&self, phase: Phase) -> bool {
        self.get(phase).visible
    }

    pub fn local(&self, phase: Phase) -> f32 {
        self.get(phase).local
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    bounds: TimelineBoundaries,
    windows: [PhaseWindow; 6],
}

impl Timeline {
    /// Builds the phase windows from a validated boundary table.
    pub fn new(bounds: TimelineBoundaries) -> Result<Self> {
        bounds.validate()?;
        Ok(Self::from_ordered(bounds))
    }

    fn from_ordered(bounds: TimelineBoundaries) -> Self {
        let b = &bounds;

        let hero = PhaseWindow::new(0.0, b.hero_end);
        let void = PhaseWindow::new(b.hero_end, b.tunnel_start);
        // The tunnel group shows up just before the hero finishes so the void
        // already has tiles emerging; it lingers past the tunnel end while the
        // about panel fades in.
        let tunnel = PhaseWindow::new(b.tunnel_start, b.tunnel_end)
            .with_slack(b.tunnel_start - b.hero_end + 0.01, 0.08);
        let about = PhaseWindow::new(b.about_start, b.transition).with_slack(0.0, 0.1);
        let transition = PhaseWindow::new(b.about_stay, b.gallery_start);
        let gallery = PhaseWindow::new(b.gallery_start, b.end)
            .with_slack(b.gallery_start - b.about_stay, 0.01);

        Self {
            bounds,
            windows: [hero, void, tunnel, about, transition, gallery],
        }
    }

    pub fn bounds(&self) -> &TimelineBoundaries {
        &self.bounds
    }

    pub fn window(&self, phase: Phase) -> &PhaseWindow {
        &self.windows[phase.index()]
    }

    /// Segment a progress value. `r` is clamped to `[0, 1]` first.
    pub fn segment(&self, r: f32) -> Segments {
        let r = clamp01(r);
        let mut samples = [PhaseSample::default(); 6];
        for phase in Phase::ALL {
            samples[phase.index()] = self.window(phase).sample(r);
        }
        Segments { samples }
    }

    /// Strictly inside the void stage (hero gone, tunnel not started).
    pub fn in_void(&self, r: f32) -> bool {
        r >= self.bounds.hero_end && r < self.bounds.tunnel_start
    }

    /// Inside the tunnel proper, both ends inclusive.
    pub fn in_tunnel(&self, r: f32) -> bool {
        r >= self.bounds.tunnel_start && r <= self.bounds.tunnel_end
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::from_ordered(TimelineBoundaries::default())
    }
}
