//! Deterministic simulation module
//!
//! All physics lives here. This module must stay pure and deterministic:
//! - One fixed step per tick, no wall-clock time
//! - Stable iteration order (by body ID)
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod gravity;
pub mod state;
pub mod tick;

pub use body::{Body, BodyColor, BodyId, BodySpec, radius_from_mass};
pub use collision::{Collision, CollisionOutcome, overlaps, resolve};
pub use gravity::{gravity_force, pair_acceleration, velocity_delta};
pub use state::{BodyArena, Phase, SimEvent, SimState};
pub use tick::{TickInput, tick};
