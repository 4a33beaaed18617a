//! Flat render buffers.
//!
//! [`BufferData`] is the only thing a renderer ever sees of the mesh:
//! positions, UVs, triangle indices and a per-vertex boundary mask, laid
//! out for direct upload.

use serde::{Deserialize, Serialize};

use crate::mesh::TearMesh;

/// Flat vertex and index arrays for a rendering backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BufferData {
    /// Interleaved positions `[x0, y0, z0, x1, y1, z1, ...]`.
    pub positions: Vec<f32>,
    /// Interleaved rest UVs `[u0, v0, u1, v1, ...]`.
    pub uvs: Vec<f32>,
    /// Triangle indices, three per triangle.
    pub indices: Vec<u32>,
    /// 1 for boundary vertices (silhouette or tear), 0 otherwise.
    pub boundary: Vec<u8>,
}

impl BufferData {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.boundary.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

impl TearMesh {
    /// Snapshots the mesh into flat render buffers.
    pub fn buffer_data(&self) -> BufferData {
        let n = self.vertex_count();
        let mut data = BufferData {
            positions: Vec::with_capacity(n * 3),
            uvs: Vec::with_capacity(n * 2),
            indices: Vec::with_capacity(self.triangle_count() * 3),
            boundary: Vec::with_capacity(n),
        };

        for v in self.vertices() {
            data.positions.extend_from_slice(&v.position.to_array());
            data.uvs.extend_from_slice(&v.rest_uv.to_array());
            data.boundary.push(u8::from(v.is_boundary()));
        }
        for tri in self.triangles() {
            data.indices.extend(tri.vertices().iter().map(|v| v.0));
        }

        data
    }
}
