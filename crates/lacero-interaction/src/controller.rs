//! Pointer drag controller.
//!
//! A drag starts out kinematic: pointer motion only sets [`PeelTargets`]
//! for the visual curl. Once the pointer has travelled
//! `handoff_distance` from where it went down, the drag is handed to the
//! tear engine as a grab and every further move becomes a grab target.
//! Releasing before the handoff resets the targets so the page eases back
//! to rest.
//!
//! Pointer positions are in sheet UV space (`u` to the right, `v` up).

use lacero_math::{safe_normalize2, Vec2, Vec3};
use lacero_types::constants::EPSILON;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::pointer::PointerHistory;

/// Where a page is in its life, as seen by the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragPhase {
    Idle,
    /// Pointer down, still kinematic.
    Dragging,
    /// Handed off to the engine.
    Tearing,
    /// Detached and tumbling away.
    Falling,
    /// Gone.
    Torn,
}

/// Tuning for the drag controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragSettings {
    /// Pointer travel (UV units) after which the drag becomes a grab.
    pub tear_handoff_distance: f32,
    /// Curl reached at the handoff distance.
    pub max_curl: f32,
    /// Grab target displacement per unit of pointer displacement.
    pub pull_gain: f32,
    /// Out-of-plane lift of the grab target per unit of pointer travel.
    pub lift_per_travel: f32,
}

impl Default for DragSettings {
    fn default() -> Self {
        Self {
            tear_handoff_distance: 0.08,
            max_curl: 1.0,
            pull_gain: 1.5,
            lift_per_travel: 0.3,
        }
    }
}

/// Inputs of the kinematic peel model.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PeelTargets {
    /// Unit drag direction in UV space, zero at rest.
    pub direction: Vec2,
    pub curl: f32,
    /// How hard the page is held, in `[0, 1]`.
    pub strength: f32,
}

/// What the engine should do in response to a pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragCommand {
    None,
    /// Grab at `uv`, then pull toward `target`.
    BeginGrab { uv: Vec2, target: Vec3 },
    MoveGrab { target: Vec3 },
    EndGrab,
}

/// Pointer state machine for one page.
#[derive(Debug, Clone)]
pub struct DragController {
    settings: DragSettings,
    /// Sheet size, for mapping UV to world space.
    size: Vec2,
    phase: DragPhase,
    locked: bool,
    origin: Vec2,
    last: Vec2,
    history: PointerHistory,
    targets: PeelTargets,
    release_velocity: Vec2,
}

impl DragController {
    pub fn new(settings: DragSettings, width: f32, height: f32) -> Self {
        Self {
            settings,
            size: Vec2::new(width, height),
            phase: DragPhase::Idle,
            locked: false,
            origin: Vec2::ZERO,
            last: Vec2::ZERO,
            history: PointerHistory::new(),
            targets: PeelTargets::default(),
            release_velocity: Vec2::ZERO,
        }
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    pub fn targets(&self) -> PeelTargets {
        self.targets
    }

    pub fn history(&self) -> &PointerHistory {
        &self.history
    }

    /// Velocity (UV units per second) at the last release or detachment.
    pub fn release_velocity(&self) -> Vec2 {
        self.release_velocity
    }

    /// True if a new drag may start or the current one may continue.
    pub fn is_interactive(&self) -> bool {
        !self.locked && matches!(self.phase, DragPhase::Idle | DragPhase::Dragging)
    }

    pub fn lock(&mut self) {
        self.locked = true;
    }

    pub fn unlock(&mut self) {
        self.locked = false;
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Starts a kinematic drag. Ignored unless idle and unlocked.
    pub fn pointer_down(&mut self, uv: Vec2) -> DragCommand {
        if self.locked || self.phase != DragPhase::Idle || !uv.is_finite() {
            return DragCommand::None;
        }
        self.phase = DragPhase::Dragging;
        self.origin = uv;
        self.last = uv;
        self.history.clear();
        self.targets = PeelTargets::default();
        DragCommand::None
    }

    pub fn pointer_move(&mut self, uv: Vec2, dt: f32) -> DragCommand {
        if !uv.is_finite() {
            return DragCommand::None;
        }
        match self.phase {
            DragPhase::Dragging => {
                self.record(uv, dt);
                let travel = uv - self.origin;
                let reach = travel.length() / self.settings.tear_handoff_distance.max(EPSILON);
                self.targets = PeelTargets {
                    direction: safe_normalize2(travel),
                    curl: reach.min(1.0) * self.settings.max_curl,
                    strength: reach.min(1.0),
                };
                if reach >= 1.0 {
                    self.phase = DragPhase::Tearing;
                    debug!(travel = travel.length(), "drag handed off to engine");
                    DragCommand::BeginGrab {
                        uv: self.origin,
                        target: self.grab_target(uv),
                    }
                } else {
                    DragCommand::None
                }
            }
            DragPhase::Tearing => {
                self.record(uv, dt);
                DragCommand::MoveGrab {
                    target: self.grab_target(uv),
                }
            }
            _ => DragCommand::None,
        }
    }

    /// Ends the drag. Before the handoff every target resets; after it the
    /// engine grab is released and the page returns to idle.
    pub fn pointer_up(&mut self) -> DragCommand {
        match self.phase {
            DragPhase::Dragging => {
                self.targets = PeelTargets::default();
                self.phase = DragPhase::Idle;
                DragCommand::None
            }
            DragPhase::Tearing => {
                self.release_velocity = self.history.release_velocity();
                self.targets = PeelTargets::default();
                self.phase = DragPhase::Idle;
                DragCommand::EndGrab
            }
            _ => DragCommand::None,
        }
    }

    /// The page tore free. Captures the release velocity and starts the fall.
    pub fn mark_detached(&mut self) -> Vec2 {
        self.release_velocity = self.history.release_velocity();
        self.targets = PeelTargets::default();
        self.phase = DragPhase::Falling;
        self.release_velocity
    }

    /// The fall animation ended.
    pub fn mark_torn(&mut self) {
        self.phase = DragPhase::Torn;
    }

    /// Back to idle for a fresh page. The lock is kept.
    pub fn reset(&mut self) {
        self.phase = DragPhase::Idle;
        self.history.clear();
        self.targets = PeelTargets::default();
        self.release_velocity = Vec2::ZERO;
    }

    fn record(&mut self, uv: Vec2, dt: f32) {
        self.history.push(uv - self.last, dt);
        self.last = uv;
    }

    /// World-space grab target for a pointer at `uv`.
    fn grab_target(&self, uv: Vec2) -> Vec3 {
        let to_world = |p: Vec2| (p - Vec2::splat(0.5)) * self.size;
        let anchor = to_world(self.origin);
        let pulled = anchor + (to_world(uv) - anchor) * self.settings.pull_gain;
        let lift = (uv - self.origin).length() * self.settings.lift_per_travel;
        Vec3::new(pulled.x, pulled.y, lift)
    }
}
