//! Simulation configuration
//!
//! Every tunable the physics core reads lives here and is passed in
//! explicitly; the core never consults globals or the host environment.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Result, SimError};

/// Physics and display constants for one simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === Gravity ===
    /// Newton's constant G
    pub gravitational_constant: f64,
    /// Multiplier from pixel distance to meters before the gravity law
    pub distance_scale: f64,
    /// Decimal places velocity deltas are rounded to
    pub velocity_precision: u32,

    // === Radius steps ===
    pub min_mass: f64,
    pub max_mass: f64,
    pub min_radius: f64,
    pub max_radius: f64,

    // === Launch ===
    /// Drag pixels per unit of launch velocity
    pub drag_sensitivity: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: GRAVITATIONAL_CONSTANT,
            distance_scale: DISTANCE_SCALE,
            velocity_precision: VELOCITY_PRECISION,

            min_mass: MIN_MASS,
            max_mass: MAX_MASS,
            min_radius: MIN_RADIUS,
            max_radius: MAX_RADIUS,

            drag_sensitivity: DRAG_SENSITIVITY,
        }
    }
}

impl SimConfig {
    /// Default config with gravity evaluated directly in pixel units
    pub fn pixel_space() -> Self {
        Self {
            distance_scale: 1.0,
            ..Self::default()
        }
    }

    /// Radius gained per order of magnitude of mass
    pub fn radius_increment(&self) -> f64 {
        (self.max_radius - self.min_radius) / (self.max_mass / self.min_mass).log10()
    }

    /// Check every constant is usable by the solver
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("gravitational_constant", self.gravitational_constant),
            ("distance_scale", self.distance_scale),
            ("min_mass", self.min_mass),
            ("max_mass", self.max_mass),
            ("min_radius", self.min_radius),
            ("max_radius", self.max_radius),
            ("drag_sensitivity", self.drag_sensitivity),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(SimError::InvalidParameter(format!(
                    "{name} must be positive and finite, got {value}"
                )));
            }
        }
        if self.min_mass >= self.max_mass {
            return Err(SimError::InvalidParameter(format!(
                "min_mass ({}) must be below max_mass ({})",
                self.min_mass, self.max_mass
            )));
        }
        if self.min_radius > self.max_radius {
            return Err(SimError::InvalidParameter(format!(
                "min_radius ({}) must not exceed max_radius ({})",
                self.min_radius, self.max_radius
            )));
        }
        // 10^p must stay finite and exact enough to round against
        if self.velocity_precision > 15 {
            return Err(SimError::InvalidParameter(format!(
                "velocity_precision must be at most 15, got {}",
                self.velocity_precision
            )));
        }
        Ok(())
    }

    /// Parse and validate a JSON config; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}
