//! # lacero-math
//!
//! Vector primitives for the Lacero simulator.
//!
//! Provides:
//! - Re-exports of `glam` types (`Vec2`, `Vec3`) as the canonical math types
//! - Epsilon-guarded normalization that never produces NaN
//! - 2D helpers used by the tear engine (perpendicular, bisector, rotation,
//!   signed area)

pub mod vector;

// Re-export glam types as the canonical math types for Lacero.
pub use glam::{Vec2, Vec3};

pub use vector::{
    bisector, cross2, perpendicular, rotate, safe_normalize2, safe_normalize3,
    signed_area2,
};
