//! Tumble of a detached page.

use lacero_math::{Vec2, Vec3};
use lacero_mesh::BufferData;
use serde::{Deserialize, Serialize};

/// Tuning for [`FallMotion`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallSettings {
    /// Downward acceleration (m/s²).
    pub gravity: f32,
    /// Linear air drag (1/s).
    pub drag: f32,
    /// Spin (rad/s) per unit of horizontal release speed.
    pub spin_per_speed: f32,
    /// Drop after which the fall counts as complete (m).
    pub fall_distance: f32,
}

impl Default for FallSettings {
    fn default() -> Self {
        Self {
            gravity: 9.8,
            drag: 1.2,
            spin_per_speed: 2.0,
            fall_distance: 2.5,
        }
    }
}

/// Rigid fall of the whole page, seeded from the pointer release velocity.
#[derive(Debug, Clone, PartialEq)]
pub struct FallMotion {
    settings: FallSettings,
    pub offset: Vec3,
    pub velocity: Vec3,
    /// Rotation about the depth axis (rad).
    pub angle: f32,
    pub spin: f32,
    complete: bool,
}

impl FallMotion {
    /// `release` is in UV units per second; `size` maps it to world space.
    pub fn new(release: Vec2, size: Vec2, settings: FallSettings) -> Self {
        let release = if release.is_finite() {
            release
        } else {
            Vec2::ZERO
        };
        let world = release * size;
        Self {
            spin: -world.x * settings.spin_per_speed,
            settings,
            offset: Vec3::ZERO,
            velocity: Vec3::new(world.x, world.y, 0.0),
            angle: 0.0,
            complete: false,
        }
    }

    /// Advances the fall. Returns true on the frame the page has dropped
    /// `fall_distance`, and never again.
    pub fn update(&mut self, dt: f32) -> bool {
        if self.complete || !(dt > 0.0 && dt.is_finite()) {
            return false;
        }
        self.velocity.y -= self.settings.gravity * dt;
        self.velocity *= (1.0 - self.settings.drag * dt).max(0.0);
        self.offset += self.velocity * dt;
        self.angle += self.spin * dt;

        if -self.offset.y >= self.settings.fall_distance {
            self.complete = true;
            return true;
        }
        false
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Rotates every position about the origin by `angle`, then translates
    /// by `offset`.
    pub fn apply(&self, frame: &mut BufferData) {
        let (sin, cos) = self.angle.sin_cos();
        for p in frame.positions.chunks_exact_mut(3) {
            let (x, y) = (p[0], p[1]);
            p[0] = x * cos - y * sin + self.offset.x;
            p[1] = x * sin + y * cos + self.offset.y;
            p[2] += self.offset.z;
        }
    }
}
