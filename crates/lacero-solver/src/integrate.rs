//! Semi-implicit Euler integration.

use lacero_math::Vec3;
use lacero_mesh::TearMesh;
use lacero_types::constants::{EPSILON, MAX_DEPTH, MAX_SPEED};

/// Advances every free vertex by `dt`.
///
/// `v += (F / m)·dt`, then `p += v·dt`. Pinned and massless vertices are
/// not touched. Speed is capped at [`MAX_SPEED`] and depth clamped to
/// `±MAX_DEPTH` (hitting the clamp kills the depth velocity). A vertex whose
/// update would turn non-finite is stopped instead.
pub fn integrate(mesh: &mut TearMesh, forces: &[Vec3], dt: f32) {
    for vertex in mesh.vertices_mut() {
        if vertex.pinned || vertex.mass <= EPSILON {
            continue;
        }
        let Some(&force) = forces.get(vertex.id.index()) else {
            continue;
        };

        let mut velocity = vertex.velocity + force / vertex.mass * dt;
        let speed = velocity.length();
        if speed > MAX_SPEED {
            velocity *= MAX_SPEED / speed;
        }
        if !velocity.is_finite() {
            vertex.velocity = Vec3::ZERO;
            continue;
        }

        let mut position = vertex.position + velocity * dt;
        if position.z.abs() > MAX_DEPTH {
            position.z = position.z.clamp(-MAX_DEPTH, MAX_DEPTH);
            velocity.z = 0.0;
        }

        vertex.velocity = velocity;
        vertex.position = position;
    }
}
