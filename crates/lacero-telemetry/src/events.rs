//! Tear event types.
//!
//! Events are plain values returned from a simulation step. They carry
//! just enough data for the collaborators that react to a tear: the mask
//! layer needs committed edge endpoints, the page session needs to know
//! when a tear starts and when the page is free.

use lacero_math::Vec2;
use lacero_types::VertexId;
use serde::{Deserialize, Serialize};

/// A tear event tagged with the step that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationEvent {
    /// Step number (0-indexed).
    pub timestep: u32,
    /// Event payload.
    pub kind: EventKind,
}

/// Why a tear tip stopped for good.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArrestReason {
    /// The tip reached the pinned binding strip.
    Pinned,
    /// The tip ran into the sheet silhouette or an earlier tear.
    Boundary,
    /// No untorn interior edge leaves the tip vertex.
    NoPath,
}

/// Event payload variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    /// A tear tip was seeded.
    TearInitiated {
        /// Vertex the tip starts at.
        vertex: VertexId,
        /// Rest UV of that vertex.
        uv: Vec2,
    },

    /// An edge fractured.
    EdgeCommitted {
        /// Rest UV of the vertex the tip left.
        start_uv: Vec2,
        /// Rest UV of the vertex the tip moved to.
        end_uv: Vec2,
        /// Stroke width in UV units.
        width: f32,
    },

    /// A tip can no longer propagate.
    TipArrested {
        /// Vertex the tip stopped at.
        vertex: VertexId,
        reason: ArrestReason,
    },

    /// Enough of the sheet is cut loose to count the tear as done.
    /// Emitted at most once per mesh.
    TearComplete {
        /// Rest area no longer connected to the binding.
        detached_area: f32,
    },

    /// The detached page finished falling.
    FallComplete,
}

impl SimulationEvent {
    /// Creates a new event for the given step.
    pub fn new(timestep: u32, kind: EventKind) -> Self {
        Self { timestep, kind }
    }
}

impl EventKind {
    /// Short snake_case label, used as a log and CSV key.
    pub fn label(&self) -> &'static str {
        match self {
            EventKind::TearInitiated { .. } => "tear_initiated",
            EventKind::EdgeCommitted { .. } => "edge_committed",
            EventKind::TipArrested { .. } => "tip_arrested",
            EventKind::TearComplete { .. } => "tear_complete",
            EventKind::FallComplete => "fall_complete",
        }
    }
}
