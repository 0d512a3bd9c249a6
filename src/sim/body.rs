//! Body entity: the only thing the simulation moves

use std::fmt;
use std::str::FromStr;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};
use crate::round_decimal;
use crate::settings::SimConfig;

/// Stable body identifier, allocated once and never reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BodyId(pub u32);

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Display color tag. Carries no physical meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyColor {
    Red,
    #[default]
    Blue,
    Green,
    Yellow,
    Purple,
    Orange,
    White,
}

impl BodyColor {
    pub const ALL: [BodyColor; 7] = [
        BodyColor::Red,
        BodyColor::Blue,
        BodyColor::Green,
        BodyColor::Yellow,
        BodyColor::Purple,
        BodyColor::Orange,
        BodyColor::White,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BodyColor::Red => "red",
            BodyColor::Blue => "blue",
            BodyColor::Green => "green",
            BodyColor::Yellow => "yellow",
            BodyColor::Purple => "purple",
            BodyColor::Orange => "orange",
            BodyColor::White => "white",
        }
    }
}

impl fmt::Display for BodyColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BodyColor {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_lowercase();
        BodyColor::ALL
            .into_iter()
            .find(|c| c.as_str() == name)
            .ok_or_else(|| SimError::InvalidParameter(format!("unknown color '{s}'")))
    }
}

/// Creation request: everything a body needs except its id and radius
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodySpec {
    pub mass: f64,
    pub position: DVec2,
    #[serde(default)]
    pub velocity: DVec2,
    #[serde(default)]
    pub color: BodyColor,
}

impl BodySpec {
    pub fn new(mass: f64, x: f64, y: f64, vx: f64, vy: f64, color: BodyColor) -> Self {
        Self {
            mass,
            position: DVec2::new(x, y),
            velocity: DVec2::new(vx, vy),
            color,
        }
    }

    /// Reject anything that would put a body into the live set broken
    pub fn validate(&self) -> Result<()> {
        if !self.mass.is_finite() || self.mass <= 0.0 {
            return Err(SimError::InvalidParameter(format!(
                "mass must be positive and finite, got {}",
                self.mass
            )));
        }
        if !self.position.is_finite() {
            return Err(SimError::InvalidParameter(format!(
                "position must be finite, got {}",
                self.position
            )));
        }
        if !self.velocity.is_finite() {
            return Err(SimError::InvalidParameter(format!(
                "velocity must be finite, got {}",
                self.velocity
            )));
        }
        Ok(())
    }
}

/// Visual radius for a mass: one step per order of magnitude, clamped
/// to `[min_radius, max_radius]` outside `[min_mass, max_mass]`.
pub fn radius_from_mass(mass: f64, config: &SimConfig) -> f64 {
    if mass <= config.min_mass {
        return config.min_radius;
    }
    if mass >= config.max_mass {
        return config.max_radius;
    }
    // Difference of logs keeps exact powers of ten on their step
    let orders = (mass.log10() - config.min_mass.log10()).floor();
    config.min_radius + config.radius_increment() * orders
}

/// A simulated disc mass
///
/// Only [`Body::create`] builds one, so mass and radius always agree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Body {
    id: BodyId,
    mass: f64,
    radius: f64,
    pos: DVec2,
    vel: DVec2,
    color: BodyColor,
}

impl Body {
    /// Build a body under an already-allocated id
    pub fn create(id: BodyId, spec: &BodySpec, config: &SimConfig) -> Result<Self> {
        spec.validate()?;
        Ok(Self {
            id,
            mass: spec.mass,
            radius: radius_from_mass(spec.mass, config),
            pos: spec.position,
            vel: spec.velocity,
            color: spec.color,
        })
    }

    pub fn id(&self) -> BodyId {
        self.id
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn position(&self) -> DVec2 {
        self.pos
    }

    pub fn velocity(&self) -> DVec2 {
        self.vel
    }

    pub fn color(&self) -> BodyColor {
        self.color
    }

    /// Add a velocity delta, each component rounded to `places` decimals first
    pub fn apply_velocity_delta(&mut self, delta: DVec2, places: u32) {
        self.vel.x += round_decimal(places, delta.x);
        self.vel.y += round_decimal(places, delta.y);
    }

    /// Move by one tick of velocity. Call once per tick, after all
    /// velocity updates for the tick are committed.
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }

    /// Take on the mass of an absorbed body; velocity is left as is
    pub fn absorb(&mut self, other_mass: f64, config: &SimConfig) {
        self.mass += other_mass;
        self.radius = radius_from_mass(self.mass, config);
    }

    /// Detect non-finite state produced by the integrator
    pub fn check_finite(&self) -> Result<()> {
        if self.mass.is_finite() && self.mass > 0.0 && self.pos.is_finite() && self.vel.is_finite()
        {
            Ok(())
        } else {
            Err(SimError::SimulationDivergence { id: self.id })
        }
    }

    #[cfg(test)]
    pub(crate) fn set_velocity(&mut self, vel: DVec2) {
        self.vel = vel;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use proptest::prelude::*;

    fn body(mass: f64) -> Body {
        let spec = BodySpec::new(mass, 0.0, 0.0, 0.0, 0.0, BodyColor::Red);
        Body::create(BodyId(1), &spec, &SimConfig::default()).unwrap()
    }

    #[test]
    fn test_create_rejects_non_positive_mass() {
        let config = SimConfig::default();
        for mass in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let spec = BodySpec::new(mass, 0.0, 0.0, 0.0, 0.0, BodyColor::Blue);
            assert!(matches!(
                Body::create(BodyId(1), &spec, &config),
                Err(SimError::InvalidParameter(_))
            ));
        }
    }

    #[test]
    fn test_create_rejects_non_finite_position() {
        let spec = BodySpec::new(1.0, f64::NAN, 0.0, 0.0, 0.0, BodyColor::Blue);
        assert!(Body::create(BodyId(1), &spec, &SimConfig::default()).is_err());
    }

    #[test]
    fn test_radius_clamped() {
        let config = SimConfig::default();
        assert_eq!(radius_from_mass(1e20, &config), MIN_RADIUS);
        assert_eq!(radius_from_mass(1e35, &config), MAX_RADIUS);
        assert_eq!(radius_from_mass(MIN_MASS, &config), MIN_RADIUS);
        assert_eq!(radius_from_mass(MAX_MASS, &config), MAX_RADIUS);
    }

    #[test]
    fn test_radius_steps_per_order_of_magnitude() {
        let config = SimConfig::default();
        let step = config.radius_increment();
        assert_eq!(radius_from_mass(5e24, &config), MIN_RADIUS);
        assert!((radius_from_mass(2e25, &config) - (MIN_RADIUS + step)).abs() < 1e-9);
        assert!((radius_from_mass(9e27, &config) - (MIN_RADIUS + 3.0 * step)).abs() < 1e-9);
    }

    #[test]
    fn test_velocity_delta_rounding() {
        let mut b = body(1.0);
        b.apply_velocity_delta(DVec2::new(0.000_000_000_04, 0.0), VELOCITY_PRECISION);
        assert_eq!(b.velocity().x, 0.0);

        let mut b = body(1.0);
        b.apply_velocity_delta(DVec2::new(0.000_000_000_051, 0.0), VELOCITY_PRECISION);
        assert_eq!(b.velocity().x, 0.000_000_000_1);
    }

    #[test]
    fn test_velocity_delta_adds_to_existing() {
        let mut b = body(1.0);
        b.set_velocity(DVec2::new(1.5, -2.0));
        b.apply_velocity_delta(DVec2::new(0.25, 0.5), VELOCITY_PRECISION);
        assert_eq!(b.velocity(), DVec2::new(1.75, -1.5));
    }

    #[test]
    fn test_advance() {
        let spec = BodySpec::new(1.0, 10.0, 20.0, 1.0, -2.0, BodyColor::Green);
        let mut b = Body::create(BodyId(3), &spec, &SimConfig::default()).unwrap();
        b.advance();
        b.advance();
        assert_eq!(b.position(), DVec2::new(12.0, 16.0));
    }

    #[test]
    fn test_absorb_recomputes_radius() {
        let config = SimConfig::default();
        let mut b = body(5e24);
        b.absorb(5e25, &config);
        assert!((b.mass() - 5.5e25).abs() / 5.5e25 < 1e-12);
        assert_eq!(b.radius(), radius_from_mass(5.5e25, &config));
        assert!(b.radius() > MIN_RADIUS);
    }

    #[test]
    fn test_check_finite() {
        let mut b = body(1.0);
        assert!(b.check_finite().is_ok());
        b.set_velocity(DVec2::new(f64::INFINITY, 0.0));
        assert!(matches!(
            b.check_finite(),
            Err(SimError::SimulationDivergence { id: BodyId(1) })
        ));
    }

    #[test]
    fn test_body_serializes_for_output() {
        let json = serde_json::to_value(body(2e25)).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["mass"], 2e25);
        assert_eq!(json["color"], "red");
        assert_eq!(json["radius"], radius_from_mass(2e25, &SimConfig::default()));
    }

    #[test]
    fn test_color_names() {
        assert_eq!("Red".parse::<BodyColor>().unwrap(), BodyColor::Red);
        assert_eq!(" purple ".parse::<BodyColor>().unwrap(), BodyColor::Purple);
        assert!("chartreuse".parse::<BodyColor>().is_err());
        for color in BodyColor::ALL {
            assert_eq!(color.to_string().parse::<BodyColor>().unwrap(), color);
        }
    }

    proptest! {
        #[test]
        fn radius_monotonic(a in 10.0f64..40.0, b in 10.0f64..40.0) {
            let config = SimConfig::default();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let r_lo = radius_from_mass(10f64.powf(lo), &config);
            let r_hi = radius_from_mass(10f64.powf(hi), &config);
            prop_assert!(r_lo <= r_hi);
            prop_assert!(r_lo >= MIN_RADIUS && r_hi <= MAX_RADIUS);
        }

        #[test]
        fn velocity_delta_is_rounded(dx in -1.0f64..1.0, dy in -1.0f64..1.0) {
            let mut b = body(1.0);
            b.apply_velocity_delta(DVec2::new(dx, dy), VELOCITY_PRECISION);
            prop_assert_eq!(b.velocity().x, crate::round_decimal10(dx));
            prop_assert_eq!(b.velocity().y, crate::round_decimal10(dy));
        }
    }
}
