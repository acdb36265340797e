//! Brick Builder - grid-snapping and stacking core for a 3D block editor
//!
//! Core modules:
//! - `sim`: Deterministic editing core (grid, collision, build state, input)
//! - `persistence`: Save/load of builds with validation at the boundary
//! - `settings`: Editor preferences (palette, defaults)

pub mod persistence;
pub mod settings;
pub mod sim;

pub use settings::Settings;
pub use sim::{Brick, BrickId, BrickKind, BuildState, Color, Tool};

/// Editor configuration constants
pub mod consts {
    /// Height of every brick for stacking purposes (one layer)
    pub const BRICK_HEIGHT: f32 = 1.2;
    /// Inward shrink applied to a candidate footprint before overlap tests
    pub const COLLISION_MARGIN: f32 = 0.05;
    /// Offset along the clicked surface normal before snapping
    pub const SURFACE_EPSILON: f32 = 0.1;

    /// Fixed brick size used by position-keyed placement
    pub const FIXED_BRICK_WIDTH: u32 = 2;
    pub const FIXED_BRICK_DEPTH: u32 = 4;

    /// Baseplate edge length in grid units
    pub const GROUND_SIZE: f32 = 100.0;
}

/// Number of quarter turns nearest to `angle`, in [0, 4)
#[inline]
pub fn quarter_turns(angle: f32) -> u8 {
    let turns = (angle / std::f32::consts::FRAC_PI_2).round() as i64;
    turns.rem_euclid(4) as u8
}

/// Snap a Y rotation to the nearest multiple of 90°, normalized to [0, 2π)
#[inline]
pub fn snap_rotation_y(angle: f32) -> f32 {
    quarter_turns(angle) as f32 * std::f32::consts::FRAC_PI_2
}

/// Round to the nearest integer, ties toward +∞
#[inline]
pub fn round_half_up(value: f32) -> f32 {
    (value + 0.5).floor()
}
