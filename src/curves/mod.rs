//! Pure per-phase transform curves.
//!
//! Nothing in here holds state between calls: the same inputs always give
//! the same `ObjectTransform`.

pub mod about;
pub mod gallery;
pub mod tunnel;

use glam::{Mat3, Mat4, Quat, Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectTransform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    pub opacity: f32,
}

impl Default for ObjectTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ObjectTransform {
    pub const IDENTITY: ObjectTransform = ObjectTransform {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
        opacity: 1.0,
    };

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

/// Orientation of a plane sitting at `angle` on a ring around the Z axis,
/// with its face (+Z) pointing at the axis and its up (+Y) along world +Z.
pub fn face_axis(angle: f32) -> Quat {
    let (s, c) = angle.sin_cos();
    let z_axis = Vec3::new(-c, -s, 0.0);
    let y_axis = Vec3::Z;
    let x_axis = y_axis.cross(z_axis);
    Quat::from_mat3(&Mat3::from_cols(x_axis, y_axis, z_axis))
}

/// Point on a ring of `radius` around the Z axis at depth `z`.
pub fn ring_point(angle: f32, radius: f32, z: f32) -> Vec3 {
    let (s, c) = angle.sin_cos();
    Vec3::new(c * radius, s * radius, z)
}
