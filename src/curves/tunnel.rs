//! Tunnel flythrough: speed profile, tile and ribbon placement.

use glam::Vec3;

use super::{face_axis, ring_point, ObjectTransform};
use crate::config::TimelineBoundaries;
use crate::easing::{clamp01, lerp};
use crate::pool::{RibbonState, TileState};
use crate::timeline::range_progress;

/// Share of the combined void+tunnel speed curve taken by the void stage.
const VOID_SPEED_SHARE: f32 = 0.2;
/// Share of the tile emergence curve taken by the void stage.
const VOID_TILE_SHARE: f32 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TunnelSpeed {
    pub ribbon: f32,
    pub image: f32,
}

/// Progress across void and tunnel together, with the void mapped onto
/// `[0, share)` and the tunnel onto `[share, 1]`. Zero outside both.
pub fn combined_progress(r: f32, b: &TimelineBoundaries, share: f32) -> f32 {
    if r >= b.hero_end && r < b.tunnel_start {
        range_progress(r, b.hero_end, b.tunnel_start) * share
    } else if r >= b.tunnel_start && r <= b.tunnel_end {
        share + range_progress(r, b.tunnel_start, b.tunnel_end) * (1.0 - share)
    } else {
        0.0
    }
}

pub fn speed_progress(r: f32, b: &TimelineBoundaries) -> f32 {
    combined_progress(r, b, VOID_SPEED_SHARE)
}

pub fn tile_progress(r: f32, b: &TimelineBoundaries) -> f32 {
    combined_progress(r, b, VOID_TILE_SHARE)
}

/// Piecewise acceleration profile: gentle start, quadratic ramp, then a
/// steeper-than-quadratic rush, plus a kick from the scroll velocity.
pub fn speed_profile(c: f32, boost: f32) -> TunnelSpeed {
    let c = clamp01(c);
    let ribbon = if c < 0.2 {
        lerp(25.0, 50.0, c / 0.2)
    } else if c < 0.6 {
        let p = (c - 0.2) / 0.4;
        lerp(50.0, 180.0, p * p)
    } else {
        let p = (c - 0.6) / 0.4;
        lerp(180.0, 650.0, p.powf(2.5))
    };
    let influence = clamp01(boost) * lerp(0.5, 1.5, c);
    TunnelSpeed {
        ribbon: ribbon + influence * 100.0,
        image: ribbon * 0.5 + influence * 50.0,
    }
}

/// Tunnel group fade-in, from the end of the hero into the early tunnel.
pub fn tunnel_visibility(r: f32, b: &TimelineBoundaries) -> f32 {
    range_progress(r, b.hero_end, b.tunnel_start + 0.1)
}

/// How many pool tiles are on screen for this progress and velocity.
pub fn active_tile_count(pool_size: usize, tile_progress: f32, boost: f32, moving: bool) -> usize {
    if !moving {
        return 0;
    }
    let ratio = clamp01(tile_progress + boost * 0.2);
    ((pool_size as f32) * ratio).floor() as usize
}

pub fn vortex_spin_rate(in_tunnel: bool, boost: f32) -> f32 {
    if in_tunnel {
        0.15 + boost * 0.2
    } else {
        0.07
    }
}

pub fn target_fov(base: f32, in_tunnel: bool, boost: f32) -> f32 {
    if in_tunnel {
        base + boost * 10.0
    } else {
        base
    }
}

/// Horizontal stretch applied to everything in the tunnel at speed.
pub fn stretch(boost: f32) -> f32 {
    1.0 + boost * 0.65
}

/// Tile opacity from its travel progress `t`: entry fade × exit fade ×
/// brightness jitter, scaled by the group visibility.
pub fn tile_opacity(t: f32, brightness: f32, visibility: f32) -> f32 {
    let entry = range_progress(t, 0.03, 0.28);
    let exit = 1.0 - range_progress(t, 0.94, 1.0);
    clamp01(visibility * entry * exit * (0.55 + brightness * 0.55))
}

pub fn tile_transform(
    tile: &TileState,
    pass_z: f32,
    swirl: f32,
    boost: f32,
    visibility: f32,
) -> ObjectTransform {
    let t = tile.travel(pass_z);
    let radial = lerp(0.12, tile.target_radius, t.powf(1.16));
    let angle = tile.theta + t * tile.spin + swirl;
    let local = lerp(0.08, tile.base_scale, t.powf(1.1));
    let stretch = stretch(boost);

    ObjectTransform {
        position: ring_point(angle, radial, tile.z),
        rotation: face_axis(angle),
        scale: Vec3::new(local * stretch, local * 0.58, 1.0),
        opacity: tile_opacity(t, tile.brightness, visibility),
    }
}

pub fn ribbon_transform(ribbon: &RibbonState, boost: f32, opacity: f32) -> ObjectTransform {
    ObjectTransform {
        position: ring_point(ribbon.angle, ribbon.radius, ribbon.z),
        rotation: face_axis(ribbon.angle),
        scale: Vec3::new(1.0, stretch(boost), 1.0),
        opacity,
    }
}
