//! 2D/3D vector operations shared by the mesh and the tear engine.
//!
//! Every operation that divides by a length is guarded by
//! [`EPSILON`]: a near-zero input yields a zero vector, never NaN.

use glam::{Vec2, Vec3};
use lacero_types::constants::EPSILON;

/// Normalizes `v`, or returns zero if its length is below `EPSILON`.
#[inline]
pub fn safe_normalize2(v: Vec2) -> Vec2 {
    let len = v.length();
    if len > EPSILON && len.is_finite() {
        v / len
    } else {
        Vec2::ZERO
    }
}

/// Normalizes `v`, or returns zero if its length is below `EPSILON`.
#[inline]
pub fn safe_normalize3(v: Vec3) -> Vec3 {
    let len = v.length();
    if len > EPSILON && len.is_finite() {
        v / len
    } else {
        Vec3::ZERO
    }
}

/// Counter-clockwise perpendicular: `(x, y) -> (-y, x)`.
#[inline]
pub fn perpendicular(v: Vec2) -> Vec2 {
    Vec2::new(-v.y, v.x)
}

/// Rotates `v` counter-clockwise by `angle` radians.
#[inline]
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Unit vector halving the angle between `a` and `b`.
///
/// Zero when the two are exactly opposed or both zero.
#[inline]
pub fn bisector(a: Vec2, b: Vec2) -> Vec2 {
    safe_normalize2(safe_normalize2(a) + safe_normalize2(b))
}

/// 2D cross product (z component of the 3D cross product).
#[inline]
pub fn cross2(a: Vec2, b: Vec2) -> f32 {
    a.x * b.y - a.y * b.x
}

/// Signed area of triangle `(a, b, c)`; positive for counter-clockwise.
#[inline]
pub fn signed_area2(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    0.5 * cross2(b - a, c - a)
}
