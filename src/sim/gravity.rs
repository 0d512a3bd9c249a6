//! Pairwise Newtonian gravity
//!
//! Positions live in pixel space; distances are multiplied by
//! `SimConfig::distance_scale` before entering the gravity law so that
//! planet-sized masses produce usable accelerations.

use glam::DVec2;

use super::body::Body;
use crate::error::{Result, SimError};
use crate::settings::SimConfig;
use crate::{angle_between, distance};

/// Newton's law of universal gravitation: F = G·m1·m2/r²
#[inline]
pub fn gravity_force(g: f64, m1: f64, m2: f64, r: f64) -> f64 {
    g * ((m1 * m2) / (r * r))
}

/// Acceleration `other` exerts on `body` this tick, as an (x, y) vector
///
/// Coincident bodies have no defined direction and return
/// [`SimError::Undefined`].
pub fn pair_acceleration(body: &Body, other: &Body, config: &SimConfig) -> Result<DVec2> {
    let r_px = distance(body.position(), other.position());
    if r_px == 0.0 {
        return Err(SimError::Undefined {
            a: body.id(),
            b: other.id(),
        });
    }

    let r = r_px * config.distance_scale;
    let force = gravity_force(config.gravitational_constant, body.mass(), other.mass(), r);
    // a = F / m
    let accel = force / body.mass();

    let theta = angle_between(body.position(), other.position());
    Ok(DVec2::new(accel * theta.cos(), accel * theta.sin()))
}

/// Net velocity delta for `body` from every body in `others`
///
/// Contributions are summed. `body` itself is skipped if present in
/// `others`, as is any coincident pair.
pub fn velocity_delta<'a>(
    body: &Body,
    others: impl IntoIterator<Item = &'a Body>,
    config: &SimConfig,
) -> DVec2 {
    let mut total = DVec2::ZERO;
    for other in others {
        if other.id() == body.id() {
            continue;
        }
        match pair_acceleration(body, other, config) {
            Ok(accel) => total += accel,
            Err(err) => log::trace!("Skipping gravity pair: {err}"),
        }
    }
    total
}
