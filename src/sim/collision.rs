//! Collision detection and stacking resolution for bricks
//!
//! The tricky part of the editor: deciding where a brick may legally rest
//! given its footprint and every other brick in the build. Two primitives
//! share one box test:
//! - `compute_resting_height` lifts a candidate onto whatever lies under it
//! - `check_collision_with` accepts or rejects a candidate at a fixed height

use glam::Vec3;

use super::brick::{Brick, BrickId, Footprint};
use crate::consts::*;

/// Axis-aligned bounding box defined by min and max corners
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create AABB from center and half-extents
    pub fn from_center_half_extent(center: Vec3, half_extent: Vec3) -> Self {
        Self {
            min: center - half_extent,
            max: center + half_extent,
        }
    }

    /// Box of a brick with `footprint` and `height` centered at `center`
    pub fn for_footprint(footprint: Footprint, height: f32, center: Vec3) -> Self {
        let (hx, hz) = footprint.half_extents();
        Self::from_center_half_extent(center, Vec3::new(hx, height / 2.0, hz))
    }

    /// Box pulled inward by `margin` on every side
    pub fn shrunk(&self, margin: f32) -> Self {
        Self {
            min: self.min + Vec3::splat(margin),
            max: self.max - Vec3::splat(margin),
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Strict overlap in all three axes (touching faces do not count)
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.overlaps_xz(other) && self.min.y < other.max.y && self.max.y > other.min.y
    }

    /// Strict overlap of the horizontal projections
    pub fn overlaps_xz(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.z < other.max.z
            && self.max.z > other.min.z
    }
}

/// Vertical center a brick settles at when dropped at `(x, z)`
///
/// The candidate footprint is shrunk by `COLLISION_MARGIN` so bricks that
/// merely share an edge do not lift each other. Every other brick whose
/// footprint overlaps contributes its top surface; the candidate rests on
/// the highest one, or on the ground when nothing overlaps. The candidate
/// itself (`candidate_id`) is skipped so a placed brick can be re-resolved.
pub fn compute_resting_height<'a>(
    candidate_id: Option<&BrickId>,
    footprint: Footprint,
    x: f32,
    z: f32,
    bricks: impl IntoIterator<Item = &'a Brick>,
) -> f32 {
    let candidate =
        Aabb::for_footprint(footprint, BRICK_HEIGHT, Vec3::new(x, 0.0, z)).shrunk(COLLISION_MARGIN);

    let support = bricks
        .into_iter()
        .filter(|other| Some(&other.id) != candidate_id)
        .filter(|other| candidate.overlaps_xz(&other.aabb()))
        .map(|other| other.position.y + BRICK_HEIGHT / 2.0)
        .fold(0.0_f32, f32::max);

    support + BRICK_HEIGHT / 2.0
}

/// Whether a fixed-size brick at `position` would overlap any existing brick
///
/// Single-size variant: the candidate is the classic 2x4 brick and overlap is
/// tested in all three axes, so a hit blocks placement outright.
pub fn check_collision<'a>(position: Vec3, bricks: impl IntoIterator<Item = &'a Brick>) -> bool {
    let footprint = Footprint::new(FIXED_BRICK_WIDTH, FIXED_BRICK_DEPTH);
    check_collision_with(footprint, position, bricks, None)
}

/// Whether a candidate of `footprint` at `position` overlaps any brick in 3D
///
/// Same box test as `compute_resting_height`, evaluated at the candidate's
/// own proposed height instead of searching for one.
pub fn check_collision_with<'a>(
    footprint: Footprint,
    position: Vec3,
    bricks: impl IntoIterator<Item = &'a Brick>,
    exclude: Option<&BrickId>,
) -> bool {
    let candidate = Aabb::for_footprint(footprint, BRICK_HEIGHT, position).shrunk(COLLISION_MARGIN);

    bricks
        .into_iter()
        .filter(|other| Some(&other.id) != exclude)
        .any(|other| candidate.intersects(&other.aabb()))
}
