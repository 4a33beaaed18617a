//! Force accumulation.
//!
//! Three passes write into one per-vertex accumulator:
//!
//! - [`internal_forces`]: Hooke springs along every triangle edge
//! - [`bending_forces`]: a depth-only hinge across untorn interior edges
//! - [`external_forces`]: gravity, damping and the grab spring
//!
//! ## Hinge geometry
//!
//! For an interior edge (v0, v1) with wing vertices (wa, wb):
//! ```text
//!        wa
//!       / \
//!      /   \
//!    v0 ─── v1
//!      \   /
//!       \ /
//!        wb
//! ```
//! The hinge pushes the wings toward the mean depth of the edge and the
//! edge toward the mean depth of the wings. The forces sum to zero.

use lacero_math::{safe_normalize3, Vec3};
use lacero_mesh::TearMesh;
use lacero_types::constants::{EPSILON, SHEET_GRAVITY};
use lacero_types::VertexId;

/// The single active pointer grab.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grab {
    /// Grabbed vertex.
    pub vertex: VertexId,
    /// World-space target; `None` until the first update.
    pub target: Option<Vec3>,
}

impl Grab {
    pub fn new(vertex: VertexId) -> Self {
        Self {
            vertex,
            target: None,
        }
    }

    /// Spring force `stiffness × (target − position)`, zero without a target.
    pub fn spring_force(&self, mesh: &TearMesh, stiffness: f32) -> Vec3 {
        match self.target {
            Some(target) => (target - mesh.vertex(self.vertex).position) * stiffness,
            None => Vec3::ZERO,
        }
    }
}

/// Resets the accumulator to one zero entry per vertex.
pub fn clear_forces(mesh: &TearMesh, forces: &mut Vec<Vec3>) {
    forces.clear();
    forces.resize(mesh.vertex_count(), Vec3::ZERO);
}

/// Per-edge Hooke forces.
///
/// For each triangle edge `(i, j)` the strain is `(|p_j − p_i| − L) / L`,
/// with `L` the rest length from rest UV scaled by the sheet size. The
/// force `strain × stiffness × rest_area` acts along the edge: `+` on `i`,
/// `−` on `j`. Degenerate triangles and zero-length rest edges contribute
/// nothing.
pub fn internal_forces(mesh: &TearMesh, stiffness: f32, forces: &mut [Vec3]) {
    let scale = lacero_math::Vec2::new(mesh.width(), mesh.height());

    for tri in mesh.triangles() {
        if tri.is_degenerate() {
            continue;
        }
        let weight = stiffness * tri.rest_area();

        for (a, b) in tri.edge_pairs() {
            let va = mesh.vertex(a);
            let vb = mesh.vertex(b);
            let rest = ((vb.rest_uv - va.rest_uv) * scale).length();
            if rest <= EPSILON {
                continue;
            }
            let delta = vb.position - va.position;
            let strain = (delta.length() - rest) / rest;
            let f = safe_normalize3(delta) * (strain * weight);
            forces[a.index()] += f;
            forces[b.index()] -= f;
        }
    }
}

/// Depth-only hinge across every untorn interior edge.
pub fn bending_forces(mesh: &TearMesh, bending_stiffness: f32, forces: &mut [Vec3]) {
    if bending_stiffness <= 0.0 {
        return;
    }

    for edge in mesh.edges().filter(|e| e.is_interior()) {
        let (v0, v1) = (edge.key().lo(), edge.key().hi());
        let &[t0, t1] = edge.triangles() else {
            continue;
        };
        let (Some(wa), Some(wb)) = (
            mesh.triangle(t0).opposite(v0, v1),
            mesh.triangle(t1).opposite(v0, v1),
        ) else {
            continue;
        };

        let z = |v: VertexId| mesh.vertex(v).position.z;
        let fold = 0.5 * (z(wa) + z(wb) - z(v0) - z(v1));
        let push = Vec3::new(0.0, 0.0, bending_stiffness * fold);

        forces[wa.index()] -= push;
        forces[wb.index()] -= push;
        forces[v0.index()] += push;
        forces[v1.index()] += push;
    }
}

/// Gravity on free vertices, velocity damping, and the grab spring.
pub fn external_forces(
    mesh: &TearMesh,
    damping: f32,
    grab: Option<(&Grab, f32)>,
    forces: &mut [Vec3],
) {
    for vertex in mesh.vertices() {
        let f = &mut forces[vertex.id.index()];
        if !vertex.pinned {
            f.y -= SHEET_GRAVITY * vertex.mass;
        }
        *f -= vertex.velocity * damping;
    }

    if let Some((grab, stiffness)) = grab {
        forces[grab.vertex.index()] += grab.spring_force(mesh, stiffness);
    }
}
