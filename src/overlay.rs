//! 2D overlay state, driven by the same progress sample as the 3D scene.

use std::fmt::Write;

use crate::config::{HandoffConfig, TimelineBoundaries};
use crate::easing::{clamp01, smoothstep};
use crate::timeline::range_progress;

/// Strongest vignette darkening.
const VIGNETTE_MAX: f32 = 0.9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerStyle {
    pub opacity: f32,
    pub scale: f32,
    /// Vertical translation in CSS pixels.
    pub translate_y: f32,
    pub pointer_events: bool,
    pub displayed: bool,
}

impl Default for LayerStyle {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            scale: 1.0,
            translate_y: 0.0,
            pointer_events: false,
            displayed: true,
        }
    }
}

impl LayerStyle {
    /// Render the CSS `transform` into `out`, replacing its contents.
    pub fn write_transform_css(&self, out: &mut String) {
        out.clear();
        // Writing into a String cannot fail.
        let _ = write!(
            out,
            "translate3d(0, {:.2}px, 0) scale({:.4})",
            self.translate_y, self.scale
        );
    }

    pub fn write_opacity_css(&self, out: &mut String) {
        write_opacity(self.opacity, out);
    }
}

/// Render an opacity clamped to `[0, 1]` into `out`, replacing its contents.
pub fn write_opacity(opacity: f32, out: &mut String) {
    out.clear();
    let _ = write!(out, "{:.4}", clamp01(opacity));
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct OverlayState {
    pub hero: LayerStyle,
    pub background: LayerStyle,
    pub matte_opacity: f32,
    pub vignette_opacity: f32,
    pub loading_opacity: f32,
    /// Index of the tunnel caption to show, if any.
    pub caption: Option<usize>,
}

/// The three hero stages: hold, zoom, handoff fade.
fn hero_stage(r: f32, h: &HandoffConfig, zoom_scale: f32, exit_scale: f32) -> (f32, f32) {
    if r < h.hero_hold_end {
        (1.0, 1.0)
    } else if r < h.hero_zoom_end {
        let t = range_progress(r, h.hero_hold_end, h.hero_zoom_end);
        (1.0 + t * (zoom_scale - 1.0), 1.0)
    } else if r < h.hero_handoff_end {
        let t = range_progress(r, h.hero_zoom_end, h.hero_handoff_end);
        (zoom_scale + t * (exit_scale - zoom_scale), 1.0 - t)
    } else {
        (exit_scale, 0.0)
    }
}

#[derive(Debug, Clone)]
pub struct OverlaySync {
    bounds: TimelineBoundaries,
    handoff: HandoffConfig,
    pages: f32,
    captions: usize,
}

impl OverlaySync {
    pub fn new(bounds: TimelineBoundaries, pages: f32, captions: usize) -> Self {
        Self {
            handoff: HandoffConfig::from_timeline(&bounds),
            bounds,
            pages: pages.max(1.0),
            captions,
        }
    }

    /// Hero headline scale and opacity.
    pub fn hero(&self, r: f32) -> (f32, f32) {
        let h = &self.handoff;
        hero_stage(r, h, h.hero_zoom_scale, h.hero_exit_scale)
    }

    /// Hero background scale and opacity.
    pub fn background(&self, r: f32) -> (f32, f32) {
        let h = &self.handoff;
        hero_stage(r, h, h.bg_zoom_scale, h.bg_exit_scale)
    }

    /// Black matte hiding the tunnel while the hero hands off.
    pub fn matte(&self, r: f32) -> f32 {
        let h = &self.handoff;
        if r >= self.bounds.tunnel_end {
            return 0.0;
        }
        if r >= h.hero_zoom_end && r < h.hero_handoff_end {
            range_progress(r, h.hero_zoom_end, h.hero_handoff_end)
        } else if r >= h.hero_handoff_end && r < h.blackout_release_end {
            1.0 - range_progress(r, h.hero_handoff_end, h.blackout_release_end)
        } else {
            0.0
        }
    }

    /// Edge darkening: builds up through the void, eases off as the gallery
    /// camera pulls back.
    pub fn vignette(&self, r: f32) -> f32 {
        let b = &self.bounds;
        let fade_in = range_progress(r, self.handoff.hero_zoom_end, b.tunnel_start);
        let fade_out = 1.0 - range_progress(r, b.about_stay, b.gallery_start) * 0.5;
        VIGNETTE_MAX * fade_in * fade_out
    }

    pub fn caption(&self, r: f32) -> Option<usize> {
        let b = &self.bounds;
        if self.captions == 0 || r < b.tunnel_start || r >= b.tunnel_end {
            return None;
        }
        let local = range_progress(r, b.tunnel_start, b.tunnel_end);
        let index = (local * self.captions as f32).floor() as usize;
        Some(index.min(self.captions - 1))
    }

    /// `loaded` is the fraction of textures ready, in `[0, 1]`.
    pub fn loading(&self, loaded: f32) -> f32 {
        1.0 - smoothstep(loaded)
    }

    /// Full overlay state for one frame.
    ///
    /// `compensate` is set when the overlays ride inside a scrolling
    /// container and must be translated back into place.
    pub fn compute(&self, r: f32, viewport_h: f32, compensate: bool, loaded: f32) -> OverlayState {
        let r = clamp01(r);
        let translate_y = if compensate {
            viewport_h * (self.pages - 1.0) * r
        } else {
            0.0
        };

        let (hero_scale, hero_opacity) = self.hero(r);
        let (bg_scale, bg_opacity) = self.background(r);

        OverlayState {
            hero: LayerStyle {
                opacity: clamp01(hero_opacity),
                scale: hero_scale,
                translate_y,
                pointer_events: hero_opacity > 0.5,
                displayed: true,
            },
            background: LayerStyle {
                opacity: clamp01(bg_opacity),
                scale: bg_scale,
                translate_y,
                pointer_events: false,
                displayed: bg_opacity > 0.01,
            },
            matte_opacity: self.matte(r),
            vignette_opacity: self.vignette(r),
            loading_opacity: self.loading(loaded),
            caption: self.caption(r),
        }
    }
}
