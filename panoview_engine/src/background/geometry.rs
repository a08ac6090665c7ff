/// Background geometry for the mesh renderer.
///
/// All shapes are unit-sized and seen from the origin: sphere and cube
/// triangles face inward, the flat quad faces +Z. The renderer scales
/// them through the model matrix.

use std::f32::consts::{PI, TAU};
use glam::Vec3;

use crate::graphics_device::{MeshDesc, Vertex};

pub const DEFAULT_SPHERE_SEGMENTS: (u32, u32) = (60, 40);

/// UV sphere mapping equirectangular media.
///
/// `u` follows longitude (0 at -π, 1 at +π, seen from the origin looking
/// down -Z at u = 0.5) and `v` runs from the north pole (0) to the south
/// pole (1). Pole rows emit no degenerate triangles.
pub fn sphere(width_segments: u32, height_segments: u32) -> MeshDesc {
    let width_segments = width_segments.max(3);
    let height_segments = height_segments.max(2);
    let stride = width_segments + 1;

    let mut vertices = Vec::with_capacity((stride * (height_segments + 1)) as usize);
    for iy in 0..=height_segments {
        let v = iy as f32 / height_segments as f32;
        let latitude = PI * 0.5 - v * PI;
        for ix in 0..=width_segments {
            let u = ix as f32 / width_segments as f32;
            let longitude = (u - 0.5) * TAU;
            let position = [
                latitude.cos() * longitude.sin(),
                latitude.sin(),
                -latitude.cos() * longitude.cos(),
            ];
            vertices.push(Vertex::new(position, [u, v]));
        }
    }

    let mut indices = Vec::with_capacity((6 * width_segments * (height_segments - 1)) as usize);
    for iy in 0..height_segments {
        for ix in 0..width_segments {
            let a = iy * stride + ix;
            let b = a + stride;
            let c = b + 1;
            let d = a + 1;
            if iy != 0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if iy != height_segments - 1 {
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    MeshDesc {
        name: "background_sphere".to_string(),
        vertices,
        indices,
    }
}

/// Inward unit cube. The cube map is sampled by direction, so UVs only
/// span each face.
pub fn cube() -> MeshDesc {
    const FACES: [Vec3; 6] = [Vec3::X, Vec3::NEG_X, Vec3::Y, Vec3::NEG_Y, Vec3::Z, Vec3::NEG_Z];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for normal in FACES {
        let tangent = if normal.y.abs() > 0.5 { Vec3::X } else { Vec3::Y };
        // t × (t × n) = -n: triangles face the centre
        let bitangent = tangent.cross(normal);
        let base = vertices.len() as u32;
        for (i, j) in [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)] {
            let corner = normal + tangent * (2.0 * i - 1.0) + bitangent * (2.0 * j - 1.0);
            vertices.push(Vertex::new(corner.to_array(), [i, 1.0 - j]));
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    MeshDesc {
        name: "background_cube".to_string(),
        vertices,
        indices,
    }
}

/// Quad at z = -1 spanning `(±aspect, ±1)`, matching the flat view canvas.
pub fn quad(aspect: f32) -> MeshDesc {
    let a = if aspect.is_finite() && aspect > 0.0 { aspect } else { 1.0 };
    MeshDesc {
        name: "background_quad".to_string(),
        vertices: vec![
            Vertex::new([-a, -1.0, -1.0], [0.0, 1.0]),
            Vertex::new([a, -1.0, -1.0], [1.0, 1.0]),
            Vertex::new([a, 1.0, -1.0], [1.0, 0.0]),
            Vertex::new([-a, 1.0, -1.0], [0.0, 0.0]),
        ],
        indices: vec![0, 1, 2, 0, 2, 3],
    }
}

#[cfg(test)]
#[path = "geometry_tests.rs"]
mod tests;
