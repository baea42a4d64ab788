//! CPU-side geometry for the handful of shapes the scene draws.

/// Vertex data ready to upload as separate streams: xyz positions, uv pairs
/// and triangle indices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub positions: Vec<f32>,
    pub uvs: Vec<f32>,
    pub indices: Vec<u16>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Two triangles per cell of a `(cols + 1) x (rows + 1)` vertex grid.
    fn push_grid_indices(&mut self, cols: u16, rows: u16) {
        let stride = cols + 1;
        for iy in 0..rows {
            for ix in 0..cols {
                let a = ix + stride * iy;
                let b = ix + stride * (iy + 1);
                let c = (ix + 1) + stride * (iy + 1);
                let d = (ix + 1) + stride * iy;
                self.indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }
    }
}

/// Flat `width x height` plane in the XY plane, facing +Z.
pub fn plane(width: f32, height: f32, cols: u16, rows: u16) -> MeshData {
    let cols = cols.max(1);
    let rows = rows.max(1);
    let mut mesh = MeshData::default();

    for iy in 0..=rows {
        let v = iy as f32 / rows as f32;
        let y = height * 0.5 - v * height;
        for ix in 0..=cols {
            let u = ix as f32 / cols as f32;
            let x = u * width - width * 0.5;
            mesh.positions.extend_from_slice(&[x, y, 0.0]);
            mesh.uvs.extend_from_slice(&[u, 1.0 - v]);
        }
    }
    mesh.push_grid_indices(cols, rows);
    mesh
}

/// A plane bent around a vertical axis `curve_radius` behind it, so its edges
/// curl away from the viewer.
pub fn curved_tile(width: f32, height: f32, curve_radius: f32, cols: u16) -> MeshData {
    let mut mesh = plane(width, height, cols, 1);
    if curve_radius <= 0.0 {
        return mesh;
    }
    for vertex in mesh.positions.chunks_exact_mut(3) {
        let theta = vertex[0] / curve_radius;
        vertex[0] = theta.sin() * curve_radius;
        vertex[2] = -(1.0 - theta.cos()) * curve_radius;
    }
    mesh
}

/// Open-ended slice of a cylinder around the Y axis, covering
/// `[theta_start, theta_start + theta_length]` with `x = r·sin θ`,
/// `z = r·cos θ`.
pub fn cylinder_segment(
    radius: f32,
    height: f32,
    radial_segments: u16,
    theta_start: f32,
    theta_length: f32,
) -> MeshData {
    let radial_segments = radial_segments.max(1);
    let mut mesh = MeshData::default();

    for iy in 0..=1u16 {
        let v = iy as f32;
        let y = height * 0.5 - v * height;
        for ix in 0..=radial_segments {
            let u = ix as f32 / radial_segments as f32;
            let theta = theta_start + u * theta_length;
            mesh.positions
                .extend_from_slice(&[radius * theta.sin(), y, radius * theta.cos()]);
            mesh.uvs.extend_from_slice(&[u, 1.0 - v]);
        }
    }
    mesh.push_grid_indices(radial_segments, 1);
    mesh
}
