//! Physical paper properties.
//!
//! Every field except `name` and `grammage` maps one-to-one onto a
//! material constant of [`TearConfig`]:
//!
//! | Property | Config field |
//! |---|---|
//! | Areal density | `density` |
//! | In-plane stiffness | `stiffness` |
//! | Bending stiffness | `bending_stiffness` |
//! | Damping | `damping` |
//! | Tear energy | `fracture_threshold` |
//! | Cross-grain resistance | `tear_resistance` |
//! | Grain axis / strength | `fiber_direction`, `fiber_anisotropy` |

use lacero_types::{LaceroError, LaceroResult, TearConfig};
use serde::{Deserialize, Serialize};

/// Material constants of one paper stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperProperties {
    /// Lookup key (e.g. "newsprint").
    pub name: String,
    /// Nominal paper weight in g/m². Informational only.
    pub grammage: f32,

    /// Areal density in simulation units.
    pub density: f32,
    pub stiffness: f32,
    pub bending_stiffness: f32,
    pub damping: f32,

    /// Energy a tip must accumulate before an edge fractures.
    pub fracture_threshold: f32,
    /// Extra cost of tearing across the grain.
    pub tear_resistance: f32,
    /// Grain axis in UV space.
    pub fiber_direction: [f32; 2],
    /// How strongly tears follow the grain, in `[0, 1]`.
    pub fiber_anisotropy: f32,
}

impl PaperProperties {
    /// Overwrites the material constants of `config`. Geometry, mesh
    /// density and grab settings are left alone.
    pub fn apply_to(&self, config: &mut TearConfig) {
        config.density = self.density;
        config.stiffness = self.stiffness;
        config.bending_stiffness = self.bending_stiffness;
        config.damping = self.damping;
        config.fracture_threshold = self.fracture_threshold;
        config.tear_resistance = self.tear_resistance;
        config.fiber_direction = self.fiber_direction;
        config.fiber_anisotropy = self.fiber_anisotropy;
    }

    /// `base` with this material applied.
    pub fn config_from(&self, base: TearConfig) -> TearConfig {
        let mut config = base;
        self.apply_to(&mut config);
        config
    }

    /// True if tears noticeably prefer to run along the grain.
    pub fn is_grain_sensitive(&self) -> bool {
        self.fiber_anisotropy > 0.25
    }

    /// Checks the preset by applying it to the default config.
    pub fn validate(&self) -> LaceroResult<()> {
        if self.name.trim().is_empty() {
            return Err(LaceroError::InvalidConfig(
                "material name must not be empty".into(),
            ));
        }
        self.config_from(TearConfig::default())
            .validate()
            .map_err(|e| LaceroError::InvalidConfig(format!("material '{}': {e}", self.name)))
    }

    /// Parses a single preset from TOML and validates it.
    pub fn from_toml_str(source: &str) -> LaceroResult<Self> {
        let props: Self = toml::from_str(source)
            .map_err(|e| LaceroError::Serialization(format!("TOML parse failed: {e}")))?;
        props.validate()?;
        Ok(props)
    }
}
