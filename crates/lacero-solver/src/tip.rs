//! Tear tips and the geometry that steers them.

use lacero_math::{bisector, perpendicular, safe_normalize2, Vec2};
use lacero_telemetry::ArrestReason;
use lacero_types::{TearConfig, VertexId};
use serde::{Deserialize, Serialize};

use crate::cluster::ForceCluster;

/// Lifecycle of a tear tip.
///
/// `Idle → Tracking → Propagating → Idle`, looping until the tip becomes
/// `Arrested`, which is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TipPhase {
    /// Seeded or just moved; no energy yet.
    Idle,
    /// Accumulating energy toward the fracture threshold.
    Tracking,
    /// Tore an edge this step.
    Propagating,
    /// Cannot propagate any further.
    Arrested(ArrestReason),
}

/// An active crack front.
#[derive(Debug, Clone, PartialEq)]
pub struct TearTip {
    /// Frontier vertex.
    pub vertex: VertexId,
    /// Rest UV of the frontier vertex.
    pub uv: Vec2,
    /// Last tear direction (unit, UV space). Kept across steps for continuity.
    pub direction: Vec2,
    /// Accumulated energy since the last propagation.
    pub energy: f32,
    pub phase: TipPhase,
    /// Energy over effective threshold, clamped to `[0, 1]`.
    pub progress: f32,
    /// Far vertex of the edge the tip is currently loading, if any.
    pub target: Option<VertexId>,
}

impl TearTip {
    /// A fresh tip at `vertex`, heading along `direction`.
    pub fn new(vertex: VertexId, uv: Vec2, direction: Vec2) -> Self {
        Self {
            vertex,
            uv,
            direction,
            energy: 0.0,
            phase: TipPhase::Idle,
            progress: 0.0,
            target: None,
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.phase, TipPhase::Arrested(_))
    }

    /// Moves the tip to `vertex` and clears its energy.
    pub(crate) fn relocate(&mut self, vertex: VertexId, uv: Vec2) {
        self.vertex = vertex;
        self.uv = uv;
        self.energy = 0.0;
        self.progress = 0.0;
        self.target = None;
    }
}

/// Direction in which the sheet opens at the tip.
///
/// The crack runs perpendicular to the bisector of the two cluster
/// directions. The sign is chosen so the direction never reverses against
/// `previous`. With `anisotropy > 0` the result leans toward the fiber
/// axis in proportion to how well it already agrees:
///
/// `normalize((1 − α)·d + α·|d·f|·f)`, with `f` sign-matched to `d`.
///
/// Returns `previous` unchanged when the clusters are exactly opposed and
/// the bisector vanishes.
pub fn tear_direction(
    a: &ForceCluster,
    b: &ForceCluster,
    previous: Vec2,
    fiber: Vec2,
    anisotropy: f32,
) -> Vec2 {
    let mut direction = perpendicular(bisector(a.direction, b.direction));
    if direction == Vec2::ZERO {
        return previous;
    }
    if direction.dot(previous) < 0.0 {
        direction = -direction;
    }

    let fiber = safe_normalize2(fiber);
    if anisotropy > 0.0 && fiber != Vec2::ZERO {
        let along = direction.dot(fiber);
        let signed_fiber = if along < 0.0 { -fiber } else { fiber };
        let blended = safe_normalize2(
            direction * (1.0 - anisotropy) + signed_fiber * (anisotropy * along.abs()),
        );
        if blended != Vec2::ZERO {
            direction = blended;
        }
    }

    direction
}

/// `−dot(a, b) × mean(|a|, |b|)`, clamped to be non-negative.
pub fn energy_release_rate(a: &ForceCluster, b: &ForceCluster) -> f32 {
    let opposition = -a.direction.dot(b.direction);
    let rate = opposition * 0.5 * (a.magnitude + b.magnitude);
    if rate.is_finite() {
        rate.max(0.0)
    } else {
        0.0
    }
}

/// Fracture threshold for a tear heading along `direction`.
///
/// This is not the bare `fracture_threshold`: it is scaled by
/// `1 + tear_resistance × (1 − |d·f|)`, so a tear along the grain costs the
/// base threshold and one straight across it costs up to
/// `1 + tear_resistance` times as much. Set `tear_resistance` to zero for a
/// direction-independent threshold.
pub fn effective_threshold(config: &TearConfig, direction: Vec2) -> f32 {
    let fiber = safe_normalize2(Vec2::from(config.fiber_direction));
    let across = 1.0 - direction.dot(fiber).abs().min(1.0);
    config.fracture_threshold * (1.0 + config.tear_resistance * across)
}
