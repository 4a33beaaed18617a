//! Kinematic peel: the visual curl shown before a drag reaches the engine.

use lacero_math::{safe_normalize2, Vec2};
use lacero_mesh::BufferData;

use crate::controller::PeelTargets;

/// Depth (world units) of a fully curled free edge.
const PEEL_DEPTH: f32 = 0.25;

/// Eased curl state of one page.
#[derive(Debug, Clone, PartialEq)]
pub struct PeelModel {
    pub curl: f32,
    pub strength: f32,
    pub direction: Vec2,
    /// Stiffer paper curls less: the curl never exceeds
    /// `1 / (1 + 10 × bending_stiffness)`.
    bending_stiffness: f32,
    /// Easing rate (1/s).
    response: f32,
}

impl PeelModel {
    pub fn new(bending_stiffness: f32, response: f32) -> Self {
        Self {
            curl: 0.0,
            strength: 0.0,
            direction: Vec2::ZERO,
            bending_stiffness: bending_stiffness.max(0.0),
            response: response.max(0.0),
        }
    }

    pub fn curl_limit(&self) -> f32 {
        1.0 / (1.0 + 10.0 * self.bending_stiffness)
    }

    /// Eases toward `targets` with time constant `1 / response`.
    pub fn update(&mut self, targets: PeelTargets, dt: f32) {
        if !(dt > 0.0 && dt.is_finite()) {
            return;
        }
        let alpha = 1.0 - (-self.response * dt).exp();
        let curl = targets.curl.clamp(0.0, self.curl_limit());
        self.curl += (curl - self.curl) * alpha;
        self.strength += (targets.strength.clamp(0.0, 1.0) - self.strength) * alpha;

        if targets.direction != Vec2::ZERO {
            let eased = safe_normalize2(self.direction.lerp(targets.direction, alpha));
            self.direction = if eased == Vec2::ZERO {
                targets.direction
            } else {
                eased
            };
        }
    }

    /// True once the page has settled flat.
    pub fn is_at_rest(&self) -> bool {
        self.curl < 1e-3 && self.strength < 1e-3
    }

    /// Out-of-plane lift at rest position `uv`. Grows quadratically away
    /// from the binding at `v = 1`.
    pub fn lift(&self, uv: Vec2) -> f32 {
        let free = (1.0 - uv.y).clamp(0.0, 1.0);
        self.curl * self.strength * free * free * PEEL_DEPTH
    }

    /// Adds [`lift`](Self::lift) to the depth of every vertex in `frame`.
    pub fn apply(&self, frame: &mut BufferData) {
        if self.is_at_rest() {
            return;
        }
        for (position, uv) in frame.positions.chunks_exact_mut(3).zip(frame.uvs.chunks_exact(2)) {
            position[2] += self.lift(Vec2::new(uv[0], uv[1]));
        }
    }
}
