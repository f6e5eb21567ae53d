/// Geometry primitives for the globe mesh
use nalgebra::{Point2, Point3, Vector3};
use std::f32::consts::PI;

/// Floats per vertex in the interleaved layout: position, normal, uv
pub const FLOATS_PER_VERTEX: usize = 8;

/// A vertex with position, normal and texture coordinate
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
    pub uv: Point2<f32>,
}

impl Vertex {
    pub fn new(position: Point3<f32>, normal: Vector3<f32>, uv: Point2<f32>) -> Self {
        Self {
            position,
            normal,
            uv,
        }
    }
}

/// An indexed triangle mesh
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Build a UV sphere centred on the origin.
    ///
    /// Vertices form a `(width_segments + 1) x (height_segments + 1)` grid so
    /// the texture seam and the poles get their own copies. Texture `u` runs
    /// around the equator and `v` is 1 at the north pole. Segment counts are
    /// clamped to the smallest usable sphere (3 x 2).
    pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        let width_segments = width_segments.max(3);
        let height_segments = height_segments.max(2);
        let columns = width_segments + 1;

        let mut mesh = Self {
            vertices: Vec::with_capacity((columns * (height_segments + 1)) as usize),
            indices: Vec::with_capacity((width_segments * height_segments * 6) as usize),
        };

        for iy in 0..=height_segments {
            let v = iy as f32 / height_segments as f32;
            let theta = v * PI;

            for ix in 0..=width_segments {
                let u = ix as f32 / width_segments as f32;
                let phi = u * 2.0 * PI;

                let normal = Vector3::new(
                    -phi.cos() * theta.sin(),
                    theta.cos(),
                    phi.sin() * theta.sin(),
                );
                let position = Point3::from(normal * radius);
                let uv = Point2::new(u, 1.0 - v);
                mesh.vertices.push(Vertex::new(position, normal, uv));
            }
        }

        for iy in 0..height_segments {
            for ix in 0..width_segments {
                let a = iy * columns + ix + 1;
                let b = iy * columns + ix;
                let c = (iy + 1) * columns + ix;
                let d = (iy + 1) * columns + ix + 1;

                // The pole rows collapse to a single point, so each only
                // contributes one triangle per quad.
                if iy != 0 {
                    mesh.indices.extend_from_slice(&[a, b, d]);
                }
                if iy != height_segments - 1 {
                    mesh.indices.extend_from_slice(&[b, c, d]);
                }
            }
        }

        mesh
    }

    /// Flatten vertices into `[px, py, pz, nx, ny, nz, u, v]` records
    pub fn interleaved(&self) -> Vec<f32> {
        let mut data = Vec::with_capacity(self.vertices.len() * FLOATS_PER_VERTEX);
        for vertex in &self.vertices {
            data.extend_from_slice(&[
                vertex.position.x,
                vertex.position.y,
                vertex.position.z,
                vertex.normal.x,
                vertex.normal.y,
                vertex.normal.z,
                vertex.uv.x,
                vertex.uv.y,
            ]);
        }
        data
    }
}
