//! Read-only render boundary
//!
//! Turns the live body set into flat, GPU-ready circle instances between
//! ticks. Color semantics exist only here; the simulation treats
//! [`BodyColor`](crate::sim::BodyColor) as an opaque tag.

pub mod instance;

pub use instance::{CircleInstance, build_instances, shades};
