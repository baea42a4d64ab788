//! Gallery: camera dolly during the transition, then a rotating cylinder of
//! curved panels with a focus falloff toward the edges of the view.

use std::f32::consts::{PI, TAU};

use glam::{Quat, Vec3};

use super::ObjectTransform;
use crate::config::GalleryConfig;
use crate::easing::{clamp01, lerp, smoothstep};
use crate::scene::Blend;

/// Yaw reached at the end of the transition.
const TRANSITION_YAW: f32 = 0.2;
/// Extra yaw swept over the whole gallery phase.
const GALLERY_SWEEP: f32 = PI * 1.5;
const MIN_FOCUS_OPACITY: f32 = 0.3;
pub const REFLECTION_OPACITY: f32 = 0.2;
/// Floor reflections brighten the floor rather than covering it.
pub const REFLECTION_BLEND: Blend = Blend::Additive;

/// Camera position during the transition at local progress `t`.
pub fn transition_camera(cfg: &GalleryConfig, t: f32) -> Vec3 {
    cfg.camera_start.lerp(cfg.camera_end, smoothstep(t))
}

pub fn transition_yaw(t: f32) -> f32 {
    smoothstep(t) * TRANSITION_YAW
}

/// Gallery group transform during the transition.
pub fn transition_group(t: f32) -> ObjectTransform {
    let s = smoothstep(t);
    ObjectTransform {
        rotation: Quat::from_rotation_y(transition_yaw(t)),
        scale: Vec3::splat(lerp(0.8, 1.0, s)),
        ..ObjectTransform::IDENTITY
    }
}

/// Gallery group yaw during the active gallery phase.
pub fn gallery_yaw(p: f32) -> f32 {
    TRANSITION_YAW + clamp01(p) * GALLERY_SWEEP
}

pub fn gallery_group(p: f32) -> ObjectTransform {
    ObjectTransform {
        rotation: Quat::from_rotation_y(gallery_yaw(p)),
        ..ObjectTransform::IDENTITY
    }
}

/// Static arc placement of one panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelLayout {
    pub theta_start: f32,
    pub theta_length: f32,
    pub radius: f32,
    pub height: f32,
}

impl PanelLayout {
    pub fn center_angle(&self) -> f32 {
        self.theta_start + self.theta_length * 0.5
    }
}

/// Lay out `count` panels edge to edge on the configured arc, centered on the
/// far side of the cylinder (angle π) so the middle panel faces the camera.
pub fn panel_layouts(cfg: &GalleryConfig, count: usize) -> Vec<PanelLayout> {
    if count == 0 {
        return Vec::new();
    }
    let step = cfg.arc / count as f32;
    let offset = PI + cfg.arc / 2.0;
    (0..count)
        .map(|i| PanelLayout {
            theta_start: offset - i as f32 * step - step,
            theta_length: step,
            radius: cfg.radius,
            height: cfg.height,
        })
        .collect()
}

/// Wrap an angle into `(-π, π]`.
pub fn wrap_angle(a: f32) -> f32 {
    let w = (a + PI).rem_euclid(TAU) - PI;
    if w == -PI {
        PI
    } else {
        w
    }
}

/// Opacity of a panel by its angular distance from the view center.
///
/// `max_offset` is the angular distance that maps to the dimmest value;
/// panels further out stay at the floor.
pub fn focus_opacity(layout: &PanelLayout, yaw: f32, max_offset: f32) -> f32 {
    if max_offset <= 0.0 {
        return 1.0;
    }
    let offset = wrap_angle(layout.center_angle() + yaw - PI).abs();
    let d = clamp01(offset / max_offset);
    lerp(1.0, MIN_FOCUS_OPACITY, d * d)
}

/// Angular distance from the view center to the outermost panel center.
pub fn outer_panel_offset(layouts: &[PanelLayout]) -> f32 {
    match layouts.first() {
        Some(first) if layouts.len() > 1 => {
            first.theta_length * (layouts.len() - 1) as f32 * 0.5
        }
        _ => 0.0,
    }
}
