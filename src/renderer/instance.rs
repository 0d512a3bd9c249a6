//! Circle instances for drawing bodies

use bytemuck::{Pod, Zeroable};

use crate::sim::{Body, BodyColor, SimState};

/// One filled disc with a radial gradient from `light` (center) to `dark` (rim)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct CircleInstance {
    pub center: [f32; 2],
    pub radius: f32,
    _pad: f32,
    pub light: [f32; 4],
    pub dark: [f32; 4],
}

impl CircleInstance {
    pub fn from_body(body: &Body) -> Self {
        let (light, dark) = shades(body.color());
        let pos = body.position().as_vec2();
        Self {
            center: pos.to_array(),
            radius: body.radius() as f32,
            _pad: 0.0,
            light,
            dark,
        }
    }
}

/// Light and dark shade of a body color
pub fn shades(color: BodyColor) -> ([f32; 4], [f32; 4]) {
    match color {
        BodyColor::Red => (colors::RED_LIGHT, colors::RED_DARK),
        BodyColor::Blue => (colors::BLUE_LIGHT, colors::BLUE_DARK),
        BodyColor::Green => (colors::GREEN_LIGHT, colors::GREEN_DARK),
        BodyColor::Yellow => (colors::YELLOW_LIGHT, colors::YELLOW_DARK),
        BodyColor::Purple => (colors::PURPLE_LIGHT, colors::PURPLE_DARK),
        BodyColor::Orange => (colors::ORANGE_LIGHT, colors::ORANGE_DARK),
        BodyColor::White => (colors::WHITE_LIGHT, colors::WHITE_DARK),
    }
}

/// Instances for every live body, in id order
pub fn build_instances(state: &SimState) -> Vec<CircleInstance> {
    state.bodies().map(CircleInstance::from_body).collect()
}

/// Shade table
pub mod colors {
    pub const RED_LIGHT: [f32; 4] = [0.78, 0.38, 0.38, 1.0]; // #c76161
    pub const RED_DARK: [f32; 4] = [0.45, 0.12, 0.12, 1.0];
    pub const BLUE_LIGHT: [f32; 4] = [0.45, 0.56, 0.89, 1.0]; // #7490e3
    pub const BLUE_DARK: [f32; 4] = [0.13, 0.2, 0.5, 1.0];
    pub const GREEN_LIGHT: [f32; 4] = [0.45, 0.8, 0.5, 1.0];
    pub const GREEN_DARK: [f32; 4] = [0.1, 0.4, 0.18, 1.0];
    pub const YELLOW_LIGHT: [f32; 4] = [0.98, 0.9, 0.45, 1.0];
    pub const YELLOW_DARK: [f32; 4] = [0.65, 0.5, 0.1, 1.0];
    pub const PURPLE_LIGHT: [f32; 4] = [0.7, 0.5, 0.9, 1.0];
    pub const PURPLE_DARK: [f32; 4] = [0.3, 0.12, 0.45, 1.0];
    pub const ORANGE_LIGHT: [f32; 4] = [1.0, 0.68, 0.35, 1.0];
    pub const ORANGE_DARK: [f32; 4] = [0.6, 0.28, 0.05, 1.0];
    pub const WHITE_LIGHT: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const WHITE_DARK: [f32; 4] = [0.55, 0.58, 0.65, 1.0];
}
