//! Carries the page through the tunnel once the hero has been scrolled away.

use crate::config::TimelineBoundaries;
use crate::easing::ease_in_out_cubic;
use crate::progress::ScrollProgress;

/// Seconds to travel from the trigger point to the target.
pub const DURATION: f64 = 4.5;

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    Armed,
    Running { started_at: f64, from: f32 },
    /// Fired; waits for the user to scroll back before re-arming.
    Spent,
}

#[derive(Debug, Clone)]
pub struct AutoScroll {
    trigger: f32,
    target: f32,
    duration: f64,
    state: State,
}

impl AutoScroll {
    pub fn new(bounds: &TimelineBoundaries) -> Self {
        Self {
            trigger: bounds.hero_end + 0.02,
            target: bounds.about_start + 0.02,
            duration: DURATION,
            state: State::Armed,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, State::Running { .. })
    }

    pub fn trigger(&self) -> f32 {
        self.trigger
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// Feed this frame's progress and timestamp (seconds). Returns the scroll
    /// position to jump to while the auto-scroll is running.
    pub fn update(&mut self, progress: ScrollProgress, now: f64) -> Option<ScrollProgress> {
        let r = progress.get();

        if r < self.trigger {
            if self.state != State::Armed {
                log::debug!("auto-scroll re-armed at r={r:.3}");
            }
            self.state = State::Armed;
            return None;
        }

        if self.state == State::Armed && r < self.target {
            log::debug!("auto-scroll triggered at r={r:.3}");
            self.state = State::Running {
                started_at: now,
                from: r,
            };
        }

        let State::Running { started_at, from } = self.state else {
            return None;
        };

        let t = if self.duration > 0.0 {
            ((now - started_at) / self.duration).clamp(0.0, 1.0) as f32
        } else {
            1.0
        };
        if t >= 1.0 {
            self.state = State::Spent;
        }
        let eased = ease_in_out_cubic(t);
        Some(ScrollProgress::new(from + (self.target - from) * eased))
    }

    /// Stop a running auto-scroll without re-arming it.
    pub fn cancel(&mut self) {
        if self.is_running() {
            log::debug!("auto-scroll cancelled");
            self.state = State::Spent;
        }
    }
}
