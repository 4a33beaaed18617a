//! Benchmark scenarios: sheet config + scripted grab + step count.
//!
//! Three canonical scenarios for regression testing:
//! 1. **Straight pull**: grab just below the binding and pull straight up
//! 2. **Corner peel**: grab the free corner and peel it diagonally away
//! 3. **Hanging page**: no interaction, the page sags under gravity

use std::fmt;
use std::str::FromStr;

use lacero_material::PaperProperties;
use lacero_math::{Vec2, Vec3};
use lacero_types::constants::DEFAULT_DT;
use lacero_types::{LaceroError, TearConfig};
use serde::{Deserialize, Serialize};

/// Which scenario to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScenarioKind {
    StraightPull,
    CornerPeel,
    HangingPage,
}

impl ScenarioKind {
    pub fn all() -> &'static [ScenarioKind] {
        &[
            ScenarioKind::StraightPull,
            ScenarioKind::CornerPeel,
            ScenarioKind::HangingPage,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ScenarioKind::StraightPull => "straight_pull",
            ScenarioKind::CornerPeel => "corner_peel",
            ScenarioKind::HangingPage => "hanging_page",
        }
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScenarioKind {
    type Err = LaceroError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = Self::all().iter().map(|k| k.name()).collect();
                LaceroError::InvalidConfig(format!(
                    "unknown scenario '{s}' (available: {})",
                    known.join(", ")
                ))
            })
    }
}

/// A grab held for the whole run.
///
/// The target starts at the grabbed vertex and moves by `pull`, reaching
/// the full offset after `ramp_steps` steps.
#[derive(Debug, Clone, PartialEq)]
pub struct GrabPath {
    /// Where to grab, in UV space.
    pub uv: Vec2,
    /// Final target offset in world space.
    pub pull: Vec3,
    pub ramp_steps: u32,
}

impl GrabPath {
    /// Target offset at `step` (0-indexed).
    pub fn offset_at(&self, step: u32) -> Vec3 {
        let ramp = self.ramp_steps.max(1) as f32;
        self.pull * ((step + 1) as f32 / ramp).min(1.0)
    }
}

/// A fully specified scenario.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub kind: ScenarioKind,
    pub config: TearConfig,
    pub grab: Option<GrabPath>,
    pub timesteps: u32,
    /// Timestep size (seconds).
    pub dt: f32,
    /// Name of the material applied with [`with_material`](Self::with_material).
    pub material: Option<String>,
}

impl Scenario {
    /// A 1m × 1m page at 4×4, grabbed just under the binding and yanked
    /// upward. The tear starts at the nearest free edge and runs along the
    /// row below the binding.
    pub fn straight_pull() -> Self {
        Self {
            kind: ScenarioKind::StraightPull,
            config: TearConfig {
                width: 1.0,
                height: 1.0,
                subdivisions: 4,
                density: 2.0,
                stiffness: 40.0,
                fracture_threshold: 0.05,
                grab_stiffness: 10.0,
                grab_radius: 0.2,
                ..Default::default()
            },
            grab: Some(GrabPath {
                uv: Vec2::new(0.5, 0.9),
                pull: Vec3::new(0.0, 5.0, 0.0),
                ramp_steps: 1,
            }),
            timesteps: 600,
            dt: DEFAULT_DT,
            material: None,
        }
    }

    /// The coarse page with its bottom-right corner peeled up and away
    /// over half a second.
    pub fn corner_peel() -> Self {
        Self {
            kind: ScenarioKind::CornerPeel,
            config: TearConfig::coarse(),
            grab: Some(GrabPath {
                uv: Vec2::new(1.0, 0.0),
                pull: Vec3::new(0.6, -0.6, 0.4),
                ramp_steps: 30,
            }),
            timesteps: 300,
            dt: DEFAULT_DT,
            material: None,
        }
    }

    /// The coarse page left alone for 2 seconds.
    pub fn hanging_page() -> Self {
        Self {
            kind: ScenarioKind::HangingPage,
            config: TearConfig::coarse(),
            grab: None,
            timesteps: 120,
            dt: DEFAULT_DT,
            material: None,
        }
    }

    pub fn from_kind(kind: ScenarioKind) -> Self {
        match kind {
            ScenarioKind::StraightPull => Self::straight_pull(),
            ScenarioKind::CornerPeel => Self::corner_peel(),
            ScenarioKind::HangingPage => Self::hanging_page(),
        }
    }

    /// Overrides the material constants of the config with `properties`.
    pub fn with_material(mut self, properties: &PaperProperties) -> Self {
        properties.apply_to(&mut self.config);
        self.material = Some(properties.name.clone());
        self
    }
}
