//! Sheet configuration.
//!
//! Immutable per-mesh parameters: physical size, mesh density and the
//! material constants read by the tear engine. A config is created once per
//! page and never changes while that page's mesh is alive.

use serde::{Deserialize, Serialize};

use crate::error::{LaceroError, LaceroResult};

/// Configuration for one simulated sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TearConfig {
    /// Physical sheet width (m).
    pub width: f32,
    /// Physical sheet height (m).
    pub height: f32,
    /// Number of grid cells along the width. Rows follow the aspect ratio.
    pub subdivisions: u32,

    /// In-plane stiffness (scales per-edge Hooke forces).
    pub stiffness: f32,
    /// Out-of-plane bending stiffness.
    pub bending_stiffness: f32,
    /// Velocity-proportional damping coefficient.
    pub damping: f32,
    /// Areal density (kg/m²). Drives vertex mass.
    pub density: f32,

    /// Accumulated energy a tear tip needs before an edge fractures.
    pub fracture_threshold: f32,
    /// Extra resistance to tearing across the fiber axis.
    pub tear_resistance: f32,
    /// Grain direction in UV space (unit vector).
    pub fiber_direction: [f32; 2],
    /// How strongly tears follow the grain, in `[0, 1]`.
    pub fiber_anisotropy: f32,

    /// Pick radius for grabs, in UV units.
    pub grab_radius: f32,
    /// Spring constant pulling a grabbed vertex toward its target.
    pub grab_stiffness: f32,

    /// Width (UV units) reported with every committed tear edge.
    #[serde(default = "default_tear_width")]
    pub tear_width: f32,
    /// Share of the rest area that must be cut loose from the binding
    /// before the tear sequence counts as complete.
    #[serde(default = "default_detach_fraction")]
    pub detach_fraction: f32,
}

fn default_tear_width() -> f32 {
    0.015
}

fn default_detach_fraction() -> f32 {
    0.5
}

impl Default for TearConfig {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.25,
            subdivisions: 12,
            stiffness: 40.0,
            bending_stiffness: 0.02,
            damping: 0.05,
            density: 5.0,
            fracture_threshold: 0.01,
            tear_resistance: 0.5,
            fiber_direction: [1.0, 0.0],
            fiber_anisotropy: 0.3,
            grab_radius: 0.15,
            grab_stiffness: 2.0,
            tear_width: default_tear_width(),
            detach_fraction: default_detach_fraction(),
        }
    }
}

impl TearConfig {
    /// A low-density mesh for quick previews and tests.
    pub fn coarse() -> Self {
        Self {
            subdivisions: 6,
            grab_radius: 0.25,
            ..Default::default()
        }
    }

    /// A high-density mesh for close-up tearing.
    pub fn fine() -> Self {
        Self {
            subdivisions: 20,
            grab_radius: 0.1,
            ..Default::default()
        }
    }

    /// Number of grid rows: `subdivisions × height / width`, at least 1.
    pub fn rows(&self) -> u32 {
        let rows = (self.subdivisions as f32 * self.height / self.width).round();
        (rows as u32).max(1)
    }

    /// Number of grid columns.
    pub fn cols(&self) -> u32 {
        self.subdivisions
    }

    /// Parses a config from TOML and validates it.
    pub fn from_toml_str(source: &str) -> LaceroResult<Self> {
        let config: Self = toml::from_str(source)
            .map_err(|e| LaceroError::Serialization(format!("TOML parse failed: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the config to TOML.
    pub fn to_toml_string(&self) -> LaceroResult<String> {
        toml::to_string(self)
            .map_err(|e| LaceroError::Serialization(format!("TOML serialization failed: {e}")))
    }

    /// Checks that every parameter is physically meaningful.
    pub fn validate(&self) -> LaceroResult<()> {
        let positive = [
            ("width", self.width),
            ("height", self.height),
            ("density", self.density),
            ("fracture_threshold", self.fracture_threshold),
            ("grab_radius", self.grab_radius),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(LaceroError::InvalidConfig(format!(
                    "{name} must be positive and finite, got {value}"
                )));
            }
        }

        let non_negative = [
            ("stiffness", self.stiffness),
            ("bending_stiffness", self.bending_stiffness),
            ("damping", self.damping),
            ("tear_resistance", self.tear_resistance),
            ("grab_stiffness", self.grab_stiffness),
            ("tear_width", self.tear_width),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(LaceroError::InvalidConfig(format!(
                    "{name} must be non-negative and finite, got {value}"
                )));
            }
        }

        if self.subdivisions == 0 {
            return Err(LaceroError::InvalidConfig(
                "subdivisions must be >= 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.fiber_anisotropy) {
            return Err(LaceroError::InvalidConfig(format!(
                "fiber_anisotropy must lie in [0, 1], got {}",
                self.fiber_anisotropy
            )));
        }
        if !(self.detach_fraction > 0.0 && self.detach_fraction <= 1.0) {
            return Err(LaceroError::InvalidConfig(format!(
                "detach_fraction must lie in (0, 1], got {}",
                self.detach_fraction
            )));
        }

        let [fx, fy] = self.fiber_direction;
        let len = (fx * fx + fy * fy).sqrt();
        if (len - 1.0).abs() > 0.01 {
            return Err(LaceroError::InvalidConfig(format!(
                "fiber_direction should be unit length, got magnitude {len}"
            )));
        }

        Ok(())
    }
}
