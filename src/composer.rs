//! Per-frame scene composition.
//!
//! `SceneComposer::update` evaluates every phase in a fixed order into a
//! reusable [`Frame`]; [`apply`] then writes that frame into the long-lived
//! [`SceneGraph`]. The split keeps the math testable without a renderer.

use glam::Vec3;

use crate::config::{GalleryConfig, TunnelConfig};
use crate::curves::about::AboutCurve;
use crate::curves::gallery::{self, PanelLayout};
use crate::curves::{tunnel, ObjectTransform};
use crate::easing::damp;
use crate::pool::{RibbonPool, TilePool};
use crate::progress::{ScrollProgress, VelocityEstimate};
use crate::scene::{CameraPose, SceneGraph};
use crate::timeline::{Phase, Segments, Timeline};

const FOV_LAMBDA: f32 = 5.0;
const SWIRL_FACTOR: f32 = 0.95;
/// Ribbon material opacity at full tunnel visibility.
const RIBBON_OPACITY: f32 = 0.8;

#[derive(Debug, Clone, Default)]
pub struct TunnelFrame {
    pub visible: bool,
    pub visibility: f32,
    pub ribbons_visible: bool,
    pub ribbon_opacity: f32,
    pub speed: tunnel::TunnelSpeed,
    pub active_tiles: usize,
    pub tiles: Vec<ObjectTransform>,
    pub tile_active: Vec<bool>,
    pub tile_textures: Vec<usize>,
    pub ribbons: Vec<ObjectTransform>,
}

#[derive(Debug, Clone, Default)]
pub struct GroupFrame {
    pub visible: bool,
    pub transform: ObjectTransform,
}

#[derive(Debug, Clone, Default)]
pub struct GalleryFrame {
    pub visible: bool,
    pub group: ObjectTransform,
    pub yaw: f32,
    pub panel_opacity: Vec<f32>,
}

/// Everything computed for one rendered frame.
#[derive(Debug, Clone)]
pub struct Frame {
    pub progress: f32,
    pub boost: f32,
    pub segments: Segments,
    pub camera: CameraPose,
    pub tunnel: TunnelFrame,
    pub about: GroupFrame,
    pub gallery: GalleryFrame,
}

pub struct SceneComposer {
    timeline: Timeline,
    tunnel_cfg: TunnelConfig,
    gallery_cfg: GalleryConfig,
    about: AboutCurve,
    panels: Vec<PanelLayout>,
    outer_panel_offset: f32,
    tiles: TilePool,
    ribbons: RibbonPool,
    velocity: VelocityEstimate,
    vortex_angle: f32,
    fov: f32,
    frame: Frame,
}

impl SceneComposer {
    pub fn new(
        timeline: Timeline,
        tunnel_cfg: TunnelConfig,
        gallery_cfg: GalleryConfig,
        tile_textures: usize,
        panel_count: usize,
        seed: u64,
    ) -> Self {
        let tiles = TilePool::new(tunnel_cfg, tile_textures, seed);
        let ribbons = RibbonPool::new(&tunnel_cfg, seed.wrapping_add(1));
        let panels = gallery::panel_layouts(&gallery_cfg, panel_count);
        let outer_panel_offset = gallery::outer_panel_offset(&panels);
        let about = AboutCurve::from_timeline(timeline.bounds());

        let frame = Frame {
            progress: 0.0,
            boost: 0.0,
            segments: Segments::default(),
            camera: CameraPose::new(gallery_cfg.camera_start, tunnel_cfg.base_fov),
            tunnel: TunnelFrame {
                tiles: vec![ObjectTransform::IDENTITY; tiles.len()],
                tile_active: vec![false; tiles.len()],
                tile_textures: tiles.tiles().iter().map(|t| t.texture_index).collect(),
                ribbons: vec![ObjectTransform::IDENTITY; ribbons.len()],
                ..TunnelFrame::default()
            },
            about: GroupFrame::default(),
            gallery: GalleryFrame {
                panel_opacity: vec![1.0; panels.len()],
                ..GalleryFrame::default()
            },
        };

        Self {
            timeline,
            tunnel_cfg,
            gallery_cfg,
            about,
            panels,
            outer_panel_offset,
            tiles,
            ribbons,
            velocity: VelocityEstimate::default(),
            vortex_angle: 0.0,
            fov: tunnel_cfg.base_fov,
            frame,
        }
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn panels(&self) -> &[PanelLayout] {
        &self.panels
    }

    pub fn tiles(&self) -> &TilePool {
        &self.tiles
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn velocity(&self) -> &VelocityEstimate {
        &self.velocity
    }

    /// Compute this frame's transforms. `dt` is the frame delta in seconds.
    pub fn update(&mut self, progress: ScrollProgress, dt: f32) -> &Frame {
        let r = progress.get();
        let dt = dt.max(0.0);

        self.velocity.update(progress, dt);
        let boost = self.velocity.boost();
        let segments = self.timeline.segment(r);

        self.frame.progress = r;
        self.frame.boost = boost;
        self.frame.segments = segments;

        // Base pose first; the gallery phases overwrite it below.
        let in_tunnel = self.timeline.in_tunnel(r);
        let target_fov = tunnel::target_fov(self.tunnel_cfg.base_fov, in_tunnel, boost);
        self.fov = damp(self.fov, target_fov, FOV_LAMBDA, dt);
        self.frame.camera = CameraPose::new(self.gallery_cfg.camera_start, self.fov);

        self.update_tunnel(r, dt, boost, &segments);
        self.update_about(&segments);
        self.update_gallery(r, &segments);

        &self.frame
    }

    fn update_tunnel(&mut self, r: f32, dt: f32, boost: f32, segments: &Segments) {
        let b = *self.timeline.bounds();
        let in_void = self.timeline.in_void(r);
        let in_tunnel = self.timeline.in_tunnel(r);
        let moving = in_void || in_tunnel;
        let out = &mut self.frame.tunnel;

        out.visible = segments.visible(Phase::Tunnel);
        out.visibility = tunnel::tunnel_visibility(r, &b);
        out.speed = if moving {
            tunnel::speed_profile(tunnel::speed_progress(r, &b), boost)
        } else {
            tunnel::TunnelSpeed::default()
        };

        self.vortex_angle += tunnel::vortex_spin_rate(in_tunnel, boost) * dt;
        let swirl = self.vortex_angle * SWIRL_FACTOR;

        out.ribbons_visible = moving && out.visibility > 0.01;
        out.ribbon_opacity = RIBBON_OPACITY * out.visibility;
        if out.ribbons_visible {
            self.ribbons.advance(out.speed.ribbon, dt);
            for (slot, ribbon) in out.ribbons.iter_mut().zip(self.ribbons.ribbons()) {
                *slot = tunnel::ribbon_transform(ribbon, boost, out.ribbon_opacity);
            }
        }

        out.active_tiles = tunnel::active_tile_count(
            self.tiles.len(),
            tunnel::tile_progress(r, &b),
            boost,
            moving,
        );
        let pass_z = self.tiles.pass_z();
        for i in 0..self.tiles.len() {
            let active = i < out.active_tiles;
            out.tile_active[i] = active;
            if !active {
                continue;
            }
            self.tiles.advance(i, out.speed.image, dt);
            if let Some(tile) = self.tiles.get(i) {
                out.tiles[i] = tunnel::tile_transform(tile, pass_z, swirl, boost, out.visibility);
                out.tile_textures[i] = tile.texture_index;
            }
        }
    }

    fn update_about(&mut self, segments: &Segments) {
        let sample = segments.get(Phase::About);
        self.frame.about.visible = sample.visible;
        if sample.visible {
            self.frame.about.transform = self.about.sample(sample.local);
        }
    }

    fn update_gallery(&mut self, r: f32, segments: &Segments) {
        let out = &mut self.frame.gallery;
        out.visible = segments.visible(Phase::Gallery);
        if !out.visible {
            return;
        }

        let camera = &mut self.frame.camera;
        if r < self.timeline.bounds().gallery_start {
            let t = segments.local(Phase::Transition);
            camera.position = gallery::transition_camera(&self.gallery_cfg, t);
            out.group = gallery::transition_group(t);
            out.yaw = gallery::transition_yaw(t);
        } else {
            let p = segments.local(Phase::Gallery);
            camera.position = self.gallery_cfg.camera_end;
            out.group = gallery::gallery_group(p);
            out.yaw = gallery::gallery_yaw(p);
        }
        camera.look_at(Vec3::ZERO);

        for (opacity, layout) in out.panel_opacity.iter_mut().zip(&self.panels) {
            *opacity = gallery::focus_opacity(layout, out.yaw, self.outer_panel_offset);
        }
    }

    /// Update and write the result into `graph` in one go.
    pub fn compose(&mut self, progress: ScrollProgress, dt: f32, graph: &mut SceneGraph) {
        self.update(progress, dt);
        apply(&self.frame, graph);
    }
}

/// Write a computed frame into the render graph.
///
/// Detached slots are skipped; invisible groups keep their children's last
/// transforms untouched.
pub fn apply(frame: &Frame, graph: &mut SceneGraph) {
    graph.camera = frame.camera;

    if let Some(group) = graph.tunnel_group.as_mut() {
        group.visible = frame.tunnel.visible;
    }
    if frame.tunnel.visible {
        let t = &frame.tunnel;
        for (i, slot) in graph.tiles.iter_mut().enumerate() {
            let Some(node) = slot.as_mut() else { continue };
            node.visible = t.tile_active.get(i).copied().unwrap_or(false);
            if node.visible {
                node.transform = t.tiles[i];
                node.texture = t.tile_textures[i];
            }
        }
        graph.ribbon_opacity = t.ribbon_opacity;
        for (i, slot) in graph.ribbons.iter_mut().enumerate() {
            let Some(node) = slot.as_mut() else { continue };
            node.visible = t.ribbons_visible;
            if node.visible {
                if let Some(transform) = t.ribbons.get(i) {
                    node.transform = *transform;
                }
            }
        }
    }

    if let Some(group) = graph.about_group.as_mut() {
        group.visible = frame.about.visible;
        if frame.about.visible {
            group.transform = frame.about.transform;
        }
    }

    if let Some(group) = graph.gallery_group.as_mut() {
        group.visible = frame.gallery.visible;
        if frame.gallery.visible {
            group.transform = frame.gallery.group;
        }
    }
    if frame.gallery.visible {
        for (slot, &opacity) in graph.panels.iter_mut().zip(&frame.gallery.panel_opacity) {
            if let Some(node) = slot.as_mut() {
                node.visible = true;
                node.transform.opacity = opacity;
            }
        }
    }
}
