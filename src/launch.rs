//! Drag-to-launch body creation
//!
//! The pointer goes down where the new body will appear and is dragged
//! away from it. On release the body is launched opposite to the drag,
//! like a slingshot, with speed proportional to the drag length.

use glam::DVec2;

use crate::settings::SimConfig;
use crate::sim::{BodyColor, BodySpec};

/// An in-progress drag gesture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaunchGesture {
    /// Where the pointer went down; the body spawns here
    pub anchor: DVec2,
}

impl LaunchGesture {
    pub fn begin(anchor: DVec2) -> Self {
        Self { anchor }
    }

    /// Vector from the anchor to the current pointer position
    pub fn drag_vector(&self, current: DVec2) -> DVec2 {
        current - self.anchor
    }

    /// Initial velocity: `-(drag) / drag_sensitivity`
    pub fn launch_velocity(&self, current: DVec2, config: &SimConfig) -> DVec2 {
        -self.drag_vector(current) / config.drag_sensitivity
    }

    /// Finish the gesture as a creation request
    pub fn into_spec(
        self,
        current: DVec2,
        mass: f64,
        color: BodyColor,
        config: &SimConfig,
    ) -> BodySpec {
        BodySpec {
            mass,
            position: self.anchor,
            velocity: self.launch_velocity(current, config),
            color,
        }
    }
}
