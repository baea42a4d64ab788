//! Static configuration for the scroll sequence.
//!
//! Numbers here are product decisions, not engineering contracts: every
//! consumer reads them through these structs so a page can swap them out.

use glam::Vec3;

use crate::error::{Result, VizError};

/// Named breakpoints of the scroll timeline, each a normalized progress value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineBoundaries {
    pub hero_end: f32,
    pub void_end: f32,
    pub tunnel_start: f32,
    pub tunnel_end: f32,
    pub about_start: f32,
    pub about_stay: f32,
    pub transition: f32,
    pub gallery_start: f32,
    pub end: f32,
}

impl Default for TimelineBoundaries {
    fn default() -> Self {
        Self {
            hero_end: 0.14,
            void_end: 0.28,
            tunnel_start: 0.28,
            tunnel_end: 0.56,
            about_start: 0.56,
            about_stay: 0.72,
            transition: 0.84,
            gallery_start: 0.84,
            end: 1.0,
        }
    }
}

impl TimelineBoundaries {
    /// Boundaries in timeline order, with their names.
    pub fn named(&self) -> [(&'static str, f32); 9] {
        [
            ("HERO_END", self.hero_end),
            ("VOID_END", self.void_end),
            ("TUNNEL_START", self.tunnel_start),
            ("TUNNEL_END", self.tunnel_end),
            ("ABOUT_START", self.about_start),
            ("ABOUT_STAY", self.about_stay),
            ("TRANSITION", self.transition),
            ("GALLERY_START", self.gallery_start),
            ("END", self.end),
        ]
    }

    /// Checks that every boundary is finite, inside `[0, 1]` and that the
    /// table never decreases.
    pub fn validate(&self) -> Result<()> {
        let named = self.named();
        for &(name, value) in &named {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(VizError::BoundaryOutOfRange { name, value });
            }
        }
        for pair in named.windows(2) {
            let (prev_name, prev) = pair[0];
            let (name, value) = pair[1];
            if value < prev {
                return Err(VizError::BoundaryOrder {
                    name,
                    value,
                    prev_name,
                    prev,
                });
            }
        }
        Ok(())
    }

    pub fn tunnel_len(&self) -> f32 {
        self.tunnel_end - self.tunnel_start
    }
}

/// Hero → tunnel handoff timings, derived from the boundary table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandoffConfig {
    pub hero_hold_end: f32,
    pub hero_zoom_end: f32,
    pub hero_handoff_end: f32,
    pub blackout_release_end: f32,
    pub hero_zoom_scale: f32,
    pub hero_exit_scale: f32,
    pub bg_zoom_scale: f32,
    pub bg_exit_scale: f32,
}

impl HandoffConfig {
    pub fn from_timeline(b: &TimelineBoundaries) -> Self {
        Self {
            hero_hold_end: b.hero_end * 0.35,
            hero_zoom_end: b.hero_end * 0.8,
            hero_handoff_end: b.hero_end,
            blackout_release_end: b.tunnel_start + b.tunnel_len() * 0.25,
            hero_zoom_scale: 1.95,
            hero_exit_scale: 2.2,
            bg_zoom_scale: 1.55,
            bg_exit_scale: 1.78,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TunnelConfig {
    pub tile_count: usize,
    pub spawn_z_min: f32,
    pub spawn_z_max: f32,
    pub pass_z: f32,
    pub target_radius_min: f32,
    pub target_radius_max: f32,
    pub spin_min: f32,
    pub spin_max: f32,
    pub base_scale_min: f32,
    pub base_scale_max: f32,
    pub brightness_min: f32,
    pub brightness_max: f32,
    pub ribbon_count: usize,
    pub ribbon_radius: f32,
    pub ribbon_length: f32,
    pub base_fov: f32,
}

impl Default for TunnelConfig {
    fn default() -> Self {
        Self {
            tile_count: 24,
            spawn_z_min: -200.0,
            spawn_z_max: -80.0,
            pass_z: 20.0,
            target_radius_min: 7.2,
            target_radius_max: 11.2,
            spin_min: 1.6,
            spin_max: 4.4,
            base_scale_min: 2.2,
            base_scale_max: 4.0,
            brightness_min: 0.55,
            brightness_max: 1.0,
            ribbon_count: 100,
            ribbon_radius: 12.0,
            ribbon_length: 100.0,
            base_fov: 75.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GalleryConfig {
    pub radius: f32,
    pub height: f32,
    pub arc: f32,
    pub camera_start: Vec3,
    pub camera_end: Vec3,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            radius: 40.0,
            height: 24.0,
            arc: std::f32::consts::PI * 1.475,
            camera_start: Vec3::ZERO,
            camera_end: Vec3::new(0.0, -2.0, 60.0),
        }
    }
}

/// Page-level knobs, overridable from `data-*` attributes on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteConfig {
    pub seed: u64,
    pub log_level: log::Level,
    /// Viewport heights of scrollable content.
    pub pages: f32,
    pub auto_scroll: bool,
    pub stats: bool,
    /// Drive progress from wheel input instead of the page scrollbar.
    pub virtual_scroll: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            seed: 0x5eed_2026,
            log_level: log::Level::Info,
            pages: 8.0,
            auto_scroll: true,
            stats: false,
            virtual_scroll: false,
        }
    }
}

impl SiteConfig {
    /// Apply `key=value` overrides. Unknown keys are ignored.
    pub fn apply_overrides<'a, I>(&mut self, pairs: I) -> Result<()>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (key, value) in pairs {
            let invalid = || VizError::InvalidOverride {
                key: key.to_string(),
                value: value.to_string(),
            };
            match key {
                "seed" => self.seed = value.trim().parse().map_err(|_| invalid())?,
                "log-level" | "logLevel" => {
                    self.log_level = value.trim().parse().map_err(|_| invalid())?
                }
                "pages" => {
                    let pages: f32 = value.trim().parse().map_err(|_| invalid())?;
                    if !pages.is_finite() || pages < 1.0 {
                        return Err(invalid());
                    }
                    self.pages = pages;
                }
                "auto-scroll" | "autoScroll" => {
                    self.auto_scroll = parse_flag(value).ok_or_else(invalid)?
                }
                "stats" => self.stats = parse_flag(value).ok_or_else(invalid)?,
                "scroll" => {
                    self.virtual_scroll = match value.trim() {
                        "native" => false,
                        "virtual" => true,
                        _ => return Err(invalid()),
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim() {
        "" | "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}
