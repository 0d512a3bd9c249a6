//! Planet Sim - 2D n-body gravity sandbox
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bodies, gravity, collisions, tick driver)
//! - `launch`: Drag-to-launch gesture for creating bodies
//! - `scenario`: Initial body sets (demo, seeded random, JSON files)
//! - `renderer`: Read-only draw boundary (color shades, circle instances)
//! - `settings`: Simulation configuration

pub mod error;
pub mod launch;
pub mod renderer;
pub mod scenario;
pub mod settings;
pub mod sim;

pub use error::{Result, SimError};
pub use settings::SimConfig;

use glam::DVec2;

/// Simulation constants
pub mod consts {
    /// Newton's gravitational constant (N·m²/kg²)
    pub const GRAVITATIONAL_CONSTANT: f64 = 6.674e-11;
    /// Pixel distance -> meters (one pixel is a million kilometers)
    pub const DISTANCE_SCALE: f64 = 1.0e9;
    /// Decimal places velocity deltas are rounded to before accumulation
    pub const VELOCITY_PRECISION: u32 = 10;

    /// Mass range mapped onto the radius steps
    pub const MIN_MASS: f64 = 1.0e24;
    pub const MAX_MASS: f64 = 1.0e30;
    /// Visual radius range (pixels)
    pub const MIN_RADIUS: f64 = 5.0;
    pub const MAX_RADIUS: f64 = 50.0;

    /// Pixels of drag per unit of launch speed
    pub const DRAG_SENSITIVITY: f64 = 100.0;
}

/// Round `value` to `places` decimal places (half away from zero)
#[inline]
pub fn round_decimal(places: u32, value: f64) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// Round to ten decimal places, the velocity precision
#[inline]
pub fn round_decimal10(value: f64) -> f64 {
    round_decimal(consts::VELOCITY_PRECISION, value)
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: DVec2, b: DVec2) -> f64 {
    a.distance(b)
}

/// Angle (radians, atan2) of the direction pointing from `from` to `to`
#[inline]
pub fn angle_between(from: DVec2, to: DVec2) -> f64 {
    let delta = to - from;
    delta.y.atan2(delta.x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_decimal() {
        assert_eq!(round_decimal(2, 1.234), 1.23);
        assert_eq!(round_decimal(2, 1.235_1), 1.24);
        assert_eq!(round_decimal(0, -2.6), -3.0);
    }

    #[test]
    fn test_round_decimal10_floor() {
        assert_eq!(round_decimal10(0.000_000_000_04), 0.0);
        assert_eq!(round_decimal10(0.000_000_000_051), 0.000_000_000_1);
    }

    #[test]
    fn test_distance_and_angle() {
        let a = DVec2::new(0.0, 0.0);
        let b = DVec2::new(3.0, 4.0);
        assert!((distance(a, b) - 5.0).abs() < 1e-12);

        let up = angle_between(a, DVec2::new(0.0, 10.0));
        assert!((up - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        let left = angle_between(a, DVec2::new(-1.0, 0.0));
        assert!((left - std::f64::consts::PI).abs() < 1e-12);
    }
}
