//! Informational panel: fades in, holds, then gets swept off to the left.

use glam::Vec3;

use super::ObjectTransform;
use crate::config::TimelineBoundaries;
use crate::timeline::range_progress;

/// Where the panel sits when at rest.
pub const PANEL_ORIGIN: Vec3 = Vec3::new(0.0, 0.0, -5.0);
/// Vertical rows of the panel contents, in panel units.
pub const TITLE_Y: f32 = 2.0;
pub const BODY_Y: f32 = 0.0;
pub const DIVIDER_Y: f32 = -1.5;
pub const CTA_Y: f32 = -2.5;
/// Sideways distance covered by the exit sweep.
const EXIT_DISTANCE: f32 = 30.0;
/// Length of the entry fade in global progress.
const FADE_IN_SPAN: f32 = 0.03;

/// Breakpoints of the about panel expressed in its own local progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AboutCurve {
    /// Local progress at which the panel is fully faded in.
    pub fade_in_end: f32,
    /// Local progress at which the exit sweep begins.
    pub exit_start: f32,
}

impl AboutCurve {
    pub fn from_timeline(b: &TimelineBoundaries) -> Self {
        Self {
            fade_in_end: range_progress(b.about_start + FADE_IN_SPAN, b.about_start, b.transition),
            exit_start: range_progress(b.about_stay, b.about_start, b.transition),
        }
    }

    /// Exit sweep progress for a local progress value.
    pub fn exit_progress(&self, local: f32) -> f32 {
        if local <= self.exit_start {
            0.0
        } else {
            range_progress(local, self.exit_start, 1.0)
        }
    }

    /// Group transform for the panel at `local` progress. The opacity is the
    /// panel-wide multiplier; each child multiplies in its base opacity.
    pub fn sample(&self, local: f32) -> ObjectTransform {
        let mut opacity = range_progress(local, 0.0, self.fade_in_end);
        let mut x = 0.0;

        if local > self.exit_start {
            let t = self.exit_progress(local);
            x = -EXIT_DISTANCE * t * t;
            opacity = (1.0 - t * 1.5).max(0.0);
        }

        ObjectTransform {
            position: PANEL_ORIGIN + Vec3::new(x, 0.0, 0.0),
            opacity,
            ..ObjectTransform::IDENTITY
        }
    }
}
