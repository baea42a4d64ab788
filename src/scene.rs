//! Long-lived render graph the composer writes into.
//!
//! Slots start out detached (`None`) and are attached by the renderer once
//! their GPU resources exist. Writers skip detached slots.

use glam::{Mat4, Vec3};

use crate::curves::ObjectTransform;

/// How a drawable composites over what is already in the framebuffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blend {
    Normal,
    Additive,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    /// Unit view direction.
    pub forward: Vec3,
    /// Vertical field of view in degrees.
    pub fov: f32,
}

impl CameraPose {
    pub fn new(position: Vec3, fov: f32) -> Self {
        Self {
            position,
            forward: Vec3::NEG_Z,
            fov,
        }
    }

    /// Point the camera at `target`. Keeps the previous direction when the
    /// camera sits on the target.
    pub fn look_at(&mut self, target: Vec3) {
        if let Some(dir) = (target - self.position).try_normalize() {
            self.forward = dir;
        }
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.forward, Vec3::Y)
    }

    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov.to_radians(), aspect.max(1e-3), 0.1, 1000.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub transform: ObjectTransform,
    pub visible: bool,
    pub texture: usize,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            transform: ObjectTransform::IDENTITY,
            visible: false,
            texture: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneGraph {
    pub camera: CameraPose,
    pub tunnel_group: Option<Node>,
    pub tiles: Vec<Option<Node>>,
    /// Ribbons share a single material, so they carry one opacity.
    pub ribbons: Vec<Option<Node>>,
    pub ribbon_opacity: f32,
    pub about_group: Option<Node>,
    pub gallery_group: Option<Node>,
    pub panels: Vec<Option<Node>>,
}

impl SceneGraph {
    pub fn new(tile_count: usize, ribbon_count: usize, panel_count: usize, fov: f32) -> Self {
        Self {
            camera: CameraPose::new(Vec3::ZERO, fov),
            tunnel_group: None,
            tiles: vec![None; tile_count],
            ribbons: vec![None; ribbon_count],
            ribbon_opacity: 0.0,
            about_group: None,
            gallery_group: None,
            panels: vec![None; panel_count],
        }
    }

    /// Attach the texture-less objects: groups and ribbons.
    pub fn attach_static(&mut self) {
        self.tunnel_group.get_or_insert_with(Node::default);
        self.about_group.get_or_insert_with(Node::default);
        self.gallery_group.get_or_insert_with(Node::default);
        for slot in &mut self.ribbons {
            slot.get_or_insert_with(Node::default);
        }
    }

    pub fn attach_tile(&mut self, index: usize) {
        if let Some(slot) = self.tiles.get_mut(index) {
            slot.get_or_insert_with(Node::default);
        }
    }

    pub fn attach_panel(&mut self, index: usize, texture: usize) {
        if let Some(slot) = self.panels.get_mut(index) {
            slot.get_or_insert_with(|| Node {
                texture,
                ..Node::default()
            });
        }
    }

    pub fn attached_tiles(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_some()).count()
    }
}
