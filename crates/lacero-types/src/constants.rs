//! Physical constants and simulation defaults.

/// Downward acceleration applied to free vertices (m/s²).
///
/// Deliberately mild: a calendar page should sag, not plummet.
pub const SHEET_GRAVITY: f32 = 0.98;

/// Default simulation timestep (seconds). 1/60th of a second.
pub const DEFAULT_DT: f32 = 1.0 / 60.0;

/// Epsilon guarding every normalization and division by a length.
pub const EPSILON: f32 = 1.0e-6;

/// Rest-UV determinant below which a triangle is treated as degenerate.
pub const DEGENERATE_AREA_THRESHOLD: f32 = 1.0e-10;

/// Vertices with rest `v` above this fraction are pinned to the binding strip.
pub const PIN_V_THRESHOLD: f32 = 0.95;

/// Minimum alignment between the tear direction and a candidate edge.
pub const MIN_TEAR_ALIGNMENT: f32 = 0.3;

/// Symmetric clamp on out-of-plane (depth) displacement.
pub const MAX_DEPTH: f32 = 0.5;

/// Speed cap applied by the integrator (m/s).
pub const MAX_SPEED: f32 = 25.0;

/// Grab force, as a multiple of the fracture threshold, that starts a tear.
pub const AUTO_TEAR_FORCE_FACTOR: f32 = 2.0;

/// Progress an edge must reach before a released grab commits it mid-edge.
pub const PARTIAL_COMMIT_PROGRESS: f32 = 0.5;

/// Number of pointer deltas kept for release-velocity estimation.
pub const POINTER_HISTORY_LEN: usize = 5;
