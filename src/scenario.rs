//! Initial body sets
//!
//! A scenario pairs a config with the bodies that are live at tick zero.
//! Scenario files are JSON:
//!
//! ```json
//! {
//!   "config": { "distance_scale": 1.0 },
//!   "bodies": [
//!     { "mass": 1e13, "position": [100.0, 100.0], "velocity": [0.5, 0.0], "color": "red" },
//!     { "mass": 1.5e12, "position": [640.0, 200.0], "velocity": [-1.0, 0.0], "color": "blue" }
//!   ]
//! }
//! ```

use std::path::Path;

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::settings::SimConfig;
use crate::sim::{BodyColor, BodySpec, SimState};

/// Config plus starting bodies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub config: SimConfig,
    #[serde(default)]
    pub bodies: Vec<BodySpec>,
}

impl Scenario {
    /// Two small planets crossing paths; gravity in pixel units
    pub fn demo(width: f64) -> Self {
        Self {
            config: SimConfig::pixel_space(),
            bodies: two_planet_demo(width),
        }
    }

    /// Seeded field of planet-sized bodies at the default scale
    pub fn random(seed: u64, count: usize, bounds: DVec2) -> Self {
        Self {
            config: SimConfig::default(),
            bodies: random_field(seed, count, bounds),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let scenario: Self = serde_json::from_str(json)?;
        scenario.config.validate()?;
        for body in &scenario.bodies {
            body.validate()?;
        }
        Ok(scenario)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let scenario = Self::from_json(&json)?;
        log::info!(
            "Loaded scenario {} ({} bodies)",
            path.display(),
            scenario.bodies.len()
        );
        Ok(scenario)
    }

    /// Build the simulation with every body live immediately
    pub fn into_state(self) -> Result<SimState> {
        SimState::with_bodies(self.config, &self.bodies)
    }
}

/// The two planets the sandbox opens with
pub fn two_planet_demo(width: f64) -> Vec<BodySpec> {
    vec![
        BodySpec::new(1.0e13, 100.0, 100.0, 0.5, 0.0, BodyColor::Red),
        BodySpec::new(1.5e12, width / 2.0, 200.0, -1.0, 0.0, BodyColor::Blue),
    ]
}

/// Deterministic random bodies inside `[0, bounds]`
///
/// Masses are log-uniform across the radius-step range so every size
/// shows up.
pub fn random_field(seed: u64, count: usize, bounds: DVec2) -> Vec<BodySpec> {
    let mut rng = Pcg32::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let exponent: f64 = rng.random_range(24.0..30.0);
            let x = rng.random_range(0.0..=bounds.x);
            let y = rng.random_range(0.0..=bounds.y);
            let vx = rng.random_range(-0.5..=0.5);
            let vy = rng.random_range(-0.5..=0.5);
            let color = BodyColor::ALL[rng.random_range(0..BodyColor::ALL.len())];
            BodySpec::new(10f64.powf(exponent), x, y, vx, vy, color)
        })
        .collect()
}
