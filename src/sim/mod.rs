//! Deterministic editing core
//!
//! All placement logic lives here. This module must stay pure:
//! - Every mutation goes through `BuildState`
//! - Every placement path resolves through `collision`
//! - Stable iteration order (insertion order of bricks)
//! - No rendering or platform dependencies

pub mod brick;
pub mod collision;
pub mod grid;
pub mod input;
pub mod state;

pub use brick::{Brick, BrickId, BrickKind, Color, Footprint, Tool};
pub use collision::{Aabb, check_collision, check_collision_with, compute_resting_height};
pub use grid::{effective_footprint, pointer_to_candidate, snap_axis, snap_layer, snap_to_grid};
pub use input::{Controller, Effect, InputEvent, Modifiers, PointerTarget, SurfaceHit};
pub use state::{BrickUpdate, BuildState, Placement, overlapping_pairs};
