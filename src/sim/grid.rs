//! Grid geometry: lattice snapping and rotated footprints
//!
//! Brick edges always sit on the integer lattice. A footprint axis of even
//! length therefore centers on an integer, an odd one on a half-integer.

use glam::Vec3;

use super::brick::{BrickKind, Footprint};
use crate::consts::*;
use crate::{quarter_turns, round_half_up};

/// Snap a center coordinate so an axis of `length` grid units lands on the lattice
#[inline]
pub fn snap_axis(value: f32, length: u32) -> f32 {
    if length % 2 == 0 {
        round_half_up(value)
    } else {
        round_half_up(value - 0.5) + 0.5
    }
}

/// Footprint of `kind` after turning it by `rotation_y` radians
///
/// Only the parity of the quarter-turn count matters: 180° leaves the
/// footprint unchanged, 90° and 270° swap width and depth.
pub fn effective_footprint(kind: BrickKind, rotation_y: f32) -> Footprint {
    let footprint = kind.footprint();
    if quarter_turns(rotation_y) % 2 == 1 {
        footprint.swapped()
    } else {
        footprint
    }
}

/// Snap a vertical coordinate to the nearest layer center (never below ground)
#[inline]
pub fn snap_layer(y: f32) -> f32 {
    let half = BRICK_HEIGHT / 2.0;
    let layer = round_half_up((y - half) / BRICK_HEIGHT).max(0.0);
    half + layer * BRICK_HEIGHT
}

/// Snap a world point to the lattice cell a brick of `footprint` would occupy
pub fn snap_to_grid(point: Vec3, footprint: Footprint) -> Vec3 {
    Vec3::new(
        snap_axis(point.x, footprint.width),
        snap_layer(point.y),
        snap_axis(point.z, footprint.depth),
    )
}

/// Clamp a snapped center so the whole footprint stays on the baseplate
///
/// The bound `GROUND_SIZE / 2 - half extent` keeps each axis' parity, so the
/// result is still a lattice point.
pub fn clamp_to_baseplate(center: Vec3, footprint: Footprint) -> Vec3 {
    let (hx, hz) = footprint.half_extents();
    let edge = GROUND_SIZE / 2.0;
    Vec3::new(
        center.x.clamp(hx - edge, edge - hx),
        center.y,
        center.z.clamp(hz - edge, edge - hz),
    )
}

/// Candidate brick center for a click at `hit_point` on a surface
///
/// The point is pushed off the surface along the normal's dominant axis by
/// the candidate's half extent on that axis plus `SURFACE_EPSILON`, so the
/// candidate's near face lands on the clicked face instead of straddling it.
/// Returns `None` when no surface was hit.
pub fn pointer_to_candidate(
    hit_point: Vec3,
    normal: Option<Vec3>,
    footprint: Footprint,
) -> Option<Vec3> {
    let normal = normal?.try_normalize()?;
    let (hx, hz) = footprint.half_extents();
    let abs = normal.abs();

    let push = if abs.x >= abs.y && abs.x >= abs.z {
        Vec3::new(normal.x.signum() * hx, 0.0, 0.0)
    } else if abs.z >= abs.y {
        Vec3::new(0.0, 0.0, normal.z.signum() * hz)
    } else {
        Vec3::new(0.0, normal.y.signum() * BRICK_HEIGHT / 2.0, 0.0)
    };

    let target = hit_point + push + normal * SURFACE_EPSILON;
    Some(clamp_to_baseplate(snap_to_grid(target, footprint), footprint))
}
