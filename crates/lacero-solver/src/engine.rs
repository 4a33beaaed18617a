//! The tear engine: one sheet, stepped once per frame.
//!
//! Each [`TearEngine::step`] runs, in order:
//!
//! 1. clear the force accumulator
//! 2. internal (edge spring + hinge) forces
//! 3. external forces: gravity, damping, grab spring
//! 4. tear-tip processing: sample, cluster, steer, accumulate, propagate
//! 5. semi-implicit Euler integration
//!
//! Everything a step decides is reported back as [`SimulationEvent`]s.
//! Events raised between steps (grab-triggered initiation, settled partial
//! tears) are queued and returned by the next step.

use lacero_math::{safe_normalize2, Vec2, Vec3};
use lacero_mesh::{BufferData, TearMesh, Vertex};
use lacero_telemetry::{ArrestReason, EventKind, SimulationEvent};
use lacero_types::constants::{
    AUTO_TEAR_FORCE_FACTOR, EPSILON, MIN_TEAR_ALIGNMENT, PARTIAL_COMMIT_PROGRESS,
};
use lacero_types::{LaceroResult, TearConfig, VertexId};
use tracing::{debug, info};

use crate::cluster::cluster_forces;
use crate::forces::{bending_forces, clear_forces, external_forces, internal_forces, Grab};
use crate::integrate::integrate;
use crate::tip::{effective_threshold, energy_release_rate, tear_direction, TearTip, TipPhase};

/// Largest edge parameter at which a released grab may cut mid-edge.
const MAX_PARTIAL_CUT: f32 = 0.95;

/// Simulation state for one sheet.
pub struct TearEngine {
    config: TearConfig,
    mesh: TearMesh,
    forces: Vec<Vec3>,
    tips: Vec<TearTip>,
    grab: Option<Grab>,
    timestep: u32,
    /// Rest area at construction; the completion criterion is relative to it.
    total_area: f32,
    complete: bool,
    pending: Vec<SimulationEvent>,
}

impl TearEngine {
    /// Builds the grid mesh for `config`.
    pub fn new(config: TearConfig) -> LaceroResult<Self> {
        config.validate()?;
        let mesh = TearMesh::build(&config);
        Self::with_mesh(config, mesh)
    }

    /// Wraps an existing mesh.
    pub fn with_mesh(config: TearConfig, mesh: TearMesh) -> LaceroResult<Self> {
        config.validate()?;
        mesh.validate()?;
        let total_area = mesh.total_rest_area();
        info!(
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            "tear engine ready"
        );
        Ok(Self {
            config,
            forces: vec![Vec3::ZERO; mesh.vertex_count()],
            mesh,
            tips: Vec::new(),
            grab: None,
            timestep: 0,
            total_area,
            complete: false,
            pending: Vec::new(),
        })
    }

    // ─── Accessors ───────────────────────────────────────────────

    pub fn config(&self) -> &TearConfig {
        &self.config
    }

    pub fn mesh(&self) -> &TearMesh {
        &self.mesh
    }

    /// Every tip ever seeded, arrested ones included.
    pub fn tips(&self) -> &[TearTip] {
        &self.tips
    }

    /// Forces from the most recent accumulation, one per vertex.
    pub fn forces(&self) -> &[Vec3] {
        &self.forces
    }

    pub fn grab(&self) -> Option<&Grab> {
        self.grab.as_ref()
    }

    /// Number of completed steps.
    pub fn timestep(&self) -> u32 {
        self.timestep
    }

    /// True once `TearComplete` has been emitted.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn buffer_data(&self) -> BufferData {
        self.mesh.buffer_data()
    }

    // ─── Stepping ────────────────────────────────────────────────

    /// Runs steps 1–3 of the pipeline into [`forces`](Self::forces).
    pub fn accumulate_forces(&mut self) {
        clear_forces(&self.mesh, &mut self.forces);
        internal_forces(&self.mesh, self.config.stiffness, &mut self.forces);
        bending_forces(&self.mesh, self.config.bending_stiffness, &mut self.forces);
        let grab = self.grab.as_ref().map(|g| (g, self.config.grab_stiffness));
        external_forces(&self.mesh, self.config.damping, grab, &mut self.forces);
    }

    /// Advances the sheet by `dt` seconds.
    ///
    /// A non-positive or non-finite `dt` only returns queued events.
    pub fn step(&mut self, dt: f32) -> Vec<SimulationEvent> {
        let mut events = std::mem::take(&mut self.pending);
        if !(dt > 0.0 && dt.is_finite()) {
            return events;
        }

        self.accumulate_forces();
        if self.process_tips(dt, &mut events) {
            self.check_completion(&mut events);
        }
        integrate(&mut self.mesh, &self.forces, dt);

        self.timestep += 1;
        events
    }

    /// Returns true if any edge was torn.
    fn process_tips(&mut self, dt: f32, events: &mut Vec<SimulationEvent>) -> bool {
        let fiber = Vec2::from(self.config.fiber_direction);
        let mut committed = false;

        for index in 0..self.tips.len() {
            if !self.tips[index].is_active() {
                continue;
            }
            if self.tips[index].phase == TipPhase::Propagating {
                self.tips[index].phase = TipPhase::Idle;
            }

            let vertex = self.tips[index].vertex;
            if interior_edges(&self.mesh, vertex).is_empty() {
                self.arrest(index, ArrestReason::NoPath, events);
                continue;
            }

            let samples = tip_samples(&self.mesh, &self.forces, vertex);
            let Some((a, b)) = cluster_forces(&samples) else {
                continue;
            };

            let tip = &mut self.tips[index];
            let direction = tear_direction(
                &a,
                &b,
                tip.direction,
                fiber,
                self.config.fiber_anisotropy,
            );
            tip.direction = direction;
            tip.energy += energy_release_rate(&a, &b) * dt;
            tip.phase = TipPhase::Tracking;

            let threshold = effective_threshold(&self.config, direction);
            tip.progress = (tip.energy / threshold).clamp(0.0, 1.0);
            let best = tear_target(&self.mesh, vertex, direction);
            let previous_target = std::mem::replace(&mut tip.target, best);
            if let Some(stale) = previous_target.filter(|&old| Some(old) != best) {
                self.mesh.set_tear_progress(vertex, stale, 0.0);
            }
            if let Some(far) = best {
                self.mesh.set_tear_progress(vertex, far, tip.progress);
            }

            if tip.energy <= threshold {
                continue;
            }
            match best {
                Some(far) => committed |= self.propagate(index, far, events),
                None => debug!(%vertex, energy = tip.energy, "tear stalled: no aligned edge"),
            }
        }

        committed
    }

    /// Tears `(tip, far)`, moves the tip to `far` and arrests it if it ran
    /// into the binding or an existing boundary.
    fn propagate(&mut self, index: usize, far: VertexId, events: &mut Vec<SimulationEvent>) -> bool {
        let from = self.tips[index].vertex;
        let start_uv = self.mesh.vertex(from).rest_uv;
        let end_uv = self.mesh.vertex(far).rest_uv;
        let was_boundary = self.mesh.vertex(far).is_boundary();

        if self.mesh.tear_edge(from, far).is_none() {
            return false;
        }
        self.mesh.set_tear_tip(from, false);
        self.mesh.set_tear_tip(far, true);

        let tip = &mut self.tips[index];
        tip.relocate(far, end_uv);
        tip.phase = TipPhase::Propagating;
        debug!(%from, to = %far, "edge committed");

        events.push(SimulationEvent::new(
            self.timestep,
            EventKind::EdgeCommitted {
                start_uv,
                end_uv,
                width: self.config.tear_width,
            },
        ));

        let reason = if self.mesh.vertex(far).pinned {
            Some(ArrestReason::Pinned)
        } else if was_boundary {
            Some(ArrestReason::Boundary)
        } else if interior_edges(&self.mesh, far).is_empty() {
            Some(ArrestReason::NoPath)
        } else {
            None
        };
        if let Some(reason) = reason {
            self.arrest(index, reason, events);
        }
        true
    }

    fn arrest(&mut self, index: usize, reason: ArrestReason, events: &mut Vec<SimulationEvent>) {
        let tip = &mut self.tips[index];
        tip.phase = TipPhase::Arrested(reason);
        tip.target = None;
        let vertex = tip.vertex;
        self.mesh.set_tear_tip(vertex, false);
        info!(%vertex, ?reason, "tear tip arrested");
        events.push(SimulationEvent::new(
            self.timestep,
            EventKind::TipArrested { vertex, reason },
        ));
    }

    fn check_completion(&mut self, events: &mut Vec<SimulationEvent>) {
        if self.complete {
            return;
        }
        let detached = self.mesh.detached_area();
        if detached >= self.config.detach_fraction * self.total_area {
            self.complete = true;
            info!(detached, total = self.total_area, "page torn free");
            events.push(SimulationEvent::new(
                self.timestep,
                EventKind::TearComplete {
                    detached_area: detached,
                },
            ));
        }
    }

    // ─── Tearing ─────────────────────────────────────────────────

    /// Seeds a tear tip at `vertex`, heading toward the middle of the sheet.
    ///
    /// Returns false (and does nothing) for pinned vertices and vertices
    /// that already carry an active tip.
    ///
    /// # Panics
    /// If `vertex` is unknown.
    pub fn initiate_tear_at(&mut self, vertex: VertexId) -> bool {
        let v = self.mesh.vertex(vertex);
        if v.pinned {
            debug!(%vertex, "refusing to start a tear on a pinned vertex");
            return false;
        }
        if self.tips.iter().any(|t| t.vertex == vertex && t.is_active()) {
            return false;
        }

        let uv = v.rest_uv;
        let mut direction = safe_normalize2(Vec2::splat(0.5) - uv);
        if direction == Vec2::ZERO {
            direction = Vec2::X;
        }
        self.tips.push(TearTip::new(vertex, uv, direction));
        self.mesh.set_tear_tip(vertex, true);
        info!(%vertex, u = uv.x, v = uv.y, "tear initiated");
        self.pending.push(SimulationEvent::new(
            self.timestep,
            EventKind::TearInitiated { vertex, uv },
        ));
        true
    }

    /// Tears an edge directly, outside the energy model (a scripted cut).
    ///
    /// Returns false if the edge is missing or already torn.
    pub fn commit_edge(&mut self, v0: VertexId, v1: VertexId) -> bool {
        let (Some(a), Some(b)) = (self.mesh.get_vertex(v0), self.mesh.get_vertex(v1)) else {
            return false;
        };
        let (start_uv, end_uv) = (a.rest_uv, b.rest_uv);
        if self.mesh.tear_edge(v0, v1).is_none() {
            return false;
        }
        let mut events = vec![SimulationEvent::new(
            self.timestep,
            EventKind::EdgeCommitted {
                start_uv,
                end_uv,
                width: self.config.tear_width,
            },
        )];
        self.check_completion(&mut events);
        self.pending.extend(events);
        true
    }

    // ─── Grab ────────────────────────────────────────────────────

    /// Grabs the nearest free vertex within `grab_radius` of `uv`.
    ///
    /// Replaces any previous grab. Returns the grabbed vertex, or `None`
    /// (and no grab) if nothing is in range.
    pub fn start_grab(&mut self, uv: Vec2) -> Option<VertexId> {
        let picked = nearest_vertex(&self.mesh, uv, |v| !v.pinned)
            .filter(|&(_, distance)| distance <= self.config.grab_radius)
            .map(|(id, _)| id);
        self.grab = picked.map(Grab::new);
        debug!(?picked, u = uv.x, v = uv.y, "grab started");
        picked
    }

    /// Moves the grab target.
    ///
    /// Once the spring force exceeds `AUTO_TEAR_FORCE_FACTOR × fracture
    /// threshold` and no tip is active, a tear is seeded: at the grabbed
    /// vertex if it is on the boundary, otherwise at the nearest free
    /// boundary vertex.
    pub fn update_grab(&mut self, target: Vec3) {
        let Some(grab) = self.grab.as_mut() else {
            return;
        };
        grab.target = Some(target);
        let grab = *grab;

        let force = grab
            .spring_force(&self.mesh, self.config.grab_stiffness)
            .length();
        let limit = AUTO_TEAR_FORCE_FACTOR * self.config.fracture_threshold;
        if force <= limit || self.complete || self.tips.iter().any(TearTip::is_active) {
            return;
        }

        let grabbed = self.mesh.vertex(grab.vertex);
        let seed = if grabbed.is_boundary() {
            Some(grab.vertex)
        } else {
            nearest_vertex(&self.mesh, grabbed.rest_uv, |v| {
                v.is_boundary() && !v.pinned
            })
            .map(|(id, _)| id)
        };

        match seed {
            Some(seed) if !self.tips.iter().any(|t| t.vertex == seed) => {
                debug!(force, limit, %seed, "grab force crossed tear limit");
                self.initiate_tear_at(seed);
            }
            _ => {}
        }
    }

    /// Releases the grab.
    ///
    /// A tracking tip that had loaded its edge past
    /// [`PARTIAL_COMMIT_PROGRESS`] finishes mid-edge: a vertex is inserted
    /// at the reached fraction and the near half is torn.
    pub fn end_grab(&mut self) {
        if self.grab.take().is_none() {
            return;
        }

        let mut events = Vec::new();
        let mut committed = false;
        for index in 0..self.tips.len() {
            let tip = &self.tips[index];
            if tip.phase != TipPhase::Tracking || tip.progress < PARTIAL_COMMIT_PROGRESS {
                continue;
            }
            let Some(far) = tip.target else {
                continue;
            };
            let (from, t) = (tip.vertex, tip.progress.min(MAX_PARTIAL_CUT));
            if !self.mesh.edge(from, far).is_some_and(|e| e.is_interior()) {
                continue;
            }

            let mid = self.mesh.insert_vertex_on_edge(from, far, t);
            let start_uv = self.mesh.vertex(from).rest_uv;
            let end_uv = self.mesh.vertex(mid).rest_uv;
            if self.mesh.tear_edge(from, mid).is_none() {
                continue;
            }
            self.mesh.set_tear_tip(from, false);
            self.mesh.set_tear_tip(mid, true);

            let tip = &mut self.tips[index];
            tip.relocate(mid, end_uv);
            tip.phase = TipPhase::Idle;
            debug!(%from, %mid, t, "partial tear settled on release");
            events.push(SimulationEvent::new(
                self.timestep,
                EventKind::EdgeCommitted {
                    start_uv,
                    end_uv,
                    width: self.config.tear_width,
                },
            ));
            committed = true;
        }

        if committed {
            self.check_completion(&mut events);
        }
        self.pending.extend(events);
    }
}

/// Untorn interior edges leaving `vertex`, as far endpoints.
fn interior_edges(mesh: &TearMesh, vertex: VertexId) -> Vec<VertexId> {
    mesh.vertex_edges(vertex)
        .into_iter()
        .filter(|e| e.is_interior())
        .filter_map(|e| e.key().other(vertex))
        .collect()
}

/// Far end of the edge a tip at `vertex` heading along `direction` would
/// tear next.
///
/// `None` when no interior edge is aligned better than
/// [`MIN_TEAR_ALIGNMENT`]; a loaded tip stalls there until its direction
/// swings round.
pub fn tear_target(mesh: &TearMesh, vertex: VertexId, direction: Vec2) -> Option<VertexId> {
    best_edge(mesh, vertex, direction)
        .filter(|&(_, alignment)| alignment > MIN_TEAR_ALIGNMENT)
        .map(|(far, _)| far)
}

/// The interior edge best aligned with `direction`, with its alignment.
fn best_edge(mesh: &TearMesh, vertex: VertexId, direction: Vec2) -> Option<(VertexId, f32)> {
    let origin = mesh.vertex(vertex).rest_uv;
    let mut best: Option<(VertexId, f32)> = None;
    for far in interior_edges(mesh, vertex) {
        let along = safe_normalize2(mesh.vertex(far).rest_uv - origin);
        let alignment = along.dot(direction);
        if best.map_or(true, |(_, a)| alignment > a) {
            best = Some((far, alignment));
        }
    }
    best
}

/// Radial force samples around a tip: the UV offset to each one-ring
/// neighbour scaled by the magnitude of that neighbour's force.
fn tip_samples(mesh: &TearMesh, forces: &[Vec3], vertex: VertexId) -> Vec<Vec2> {
    let origin = mesh.vertex(vertex).rest_uv;
    mesh.one_ring(vertex)
        .into_iter()
        .filter_map(|n| {
            let offset = mesh.vertex(n).rest_uv - origin;
            if offset.length() <= EPSILON {
                return None;
            }
            let magnitude = forces.get(n.index()).map_or(0.0, |f| f.length());
            Some(offset * magnitude)
        })
        .collect()
}

/// Nearest vertex to `uv` in rest-UV space among those passing `accept`.
/// Ties go to the lowest id.
fn nearest_vertex(
    mesh: &TearMesh,
    uv: Vec2,
    accept: impl Fn(&Vertex) -> bool,
) -> Option<(VertexId, f32)> {
    let mut best: Option<(VertexId, f32)> = None;
    for vertex in mesh.vertices().iter().filter(|v| accept(v)) {
        let distance = vertex.rest_uv.distance(uv);
        if best.map_or(true, |(_, d)| distance < d) {
            best = Some((vertex.id, distance));
        }
    }
    best
}
