//! Fixed-size pools of tunnel tiles and ribbons.
//!
//! Elements are never allocated or dropped while animating: once a tile flies
//! past the camera it is re-rolled from the pool's seeded generator and sent
//! back to the far end.

use std::f32::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::TunnelConfig;
use crate::timeline::range_progress;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TileState {
    pub z: f32,
    pub spawn_z: f32,
    pub theta: f32,
    pub spin: f32,
    pub speed_jitter: f32,
    pub target_radius: f32,
    pub base_scale: f32,
    pub brightness: f32,
    pub texture_index: usize,
}

impl TileState {
    /// Normalized travel from spawn depth to the pass depth.
    pub fn travel(&self, pass_z: f32) -> f32 {
        range_progress(self.z, self.spawn_z, pass_z)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RibbonState {
    pub angle: f32,
    pub radius: f32,
    pub z: f32,
    pub speed: f32,
}

fn random_in(rng: &mut StdRng, min: f32, max: f32) -> f32 {
    if max > min {
        rng.random_range(min..max)
    } else {
        min
    }
}

pub struct TilePool {
    cfg: TunnelConfig,
    texture_count: usize,
    tiles: Vec<TileState>,
    rng: StdRng,
}

impl TilePool {
    pub fn new(cfg: TunnelConfig, texture_count: usize, seed: u64) -> Self {
        let mut pool = Self {
            cfg,
            texture_count,
            tiles: vec![TileState::default(); cfg.tile_count],
            rng: StdRng::seed_from_u64(seed),
        };
        for i in 0..pool.tiles.len() {
            pool.reset(i);
        }
        pool
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tiles(&self) -> &[TileState] {
        &self.tiles
    }

    pub fn get(&self, index: usize) -> Option<&TileState> {
        self.tiles.get(index)
    }

    pub fn pass_z(&self) -> f32 {
        self.cfg.pass_z
    }

    /// Re-roll every spawn parameter of one tile.
    pub fn reset(&mut self, index: usize) {
        let cfg = self.cfg;
        let texture_count = self.texture_count.max(1);
        let rng = &mut self.rng;
        let Some(tile) = self.tiles.get_mut(index) else {
            return;
        };
        tile.spawn_z = random_in(rng, cfg.spawn_z_min, cfg.spawn_z_max.min(cfg.pass_z - 1.0));
        tile.z = tile.spawn_z;
        tile.theta = random_in(rng, 0.0, TAU);
        tile.spin = random_in(rng, cfg.spin_min, cfg.spin_max);
        tile.speed_jitter = random_in(rng, 0.2, 1.0);
        tile.target_radius = random_in(rng, cfg.target_radius_min, cfg.target_radius_max);
        tile.base_scale = random_in(rng, cfg.base_scale_min, cfg.base_scale_max);
        tile.brightness = random_in(rng, cfg.brightness_min, cfg.brightness_max);
        tile.texture_index = rng.random_range(0..texture_count);
    }

    /// Move one tile toward the camera. Returns `true` when it passed the
    /// camera and was recycled.
    pub fn advance(&mut self, index: usize, image_speed: f32, dt: f32) -> bool {
        let pass_z = self.cfg.pass_z;
        let Some(tile) = self.tiles.get_mut(index) else {
            return false;
        };
        tile.z += image_speed * dt * (0.68 + tile.speed_jitter * 0.65);
        if tile.z > pass_z {
            self.reset(index);
            return true;
        }
        false
    }

    #[cfg(test)]
    pub(crate) fn tile_mut(&mut self, index: usize) -> &mut TileState {
        &mut self.tiles[index]
    }
}

pub struct RibbonPool {
    ribbons: Vec<RibbonState>,
    length: f32,
    pass_z: f32,
}

impl RibbonPool {
    pub fn new(cfg: &TunnelConfig, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let count = cfg.ribbon_count;
        let ribbons = (0..count)
            .map(|i| RibbonState {
                angle: i as f32 / count as f32 * TAU + random_in(&mut rng, 0.0, 0.5),
                radius: cfg.ribbon_radius + random_in(&mut rng, -2.0, 2.0),
                z: -random_in(&mut rng, 0.0, cfg.ribbon_length),
                speed: 1.0 + random_in(&mut rng, 0.0, 1.0),
            })
            .collect();
        Self {
            ribbons,
            length: cfg.ribbon_length,
            pass_z: cfg.pass_z,
        }
    }

    pub fn ribbons(&self) -> &[RibbonState] {
        &self.ribbons
    }

    pub fn len(&self) -> usize {
        self.ribbons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ribbons.is_empty()
    }

    /// Stream every ribbon toward the camera, looping back to the far end.
    pub fn advance(&mut self, ribbon_speed: f32, dt: f32) {
        for ribbon in &mut self.ribbons {
            ribbon.z += ribbon_speed * dt * (0.68 + ribbon.speed * 0.2);
            if ribbon.z > self.pass_z {
                ribbon.z = -self.length;
            }
        }
    }
}
