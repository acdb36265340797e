//! Build state and its mutation operations
//!
//! The authoritative collection of placed bricks plus selection and tool
//! state. The no-overlap invariant holds as long as transforms go through
//! `drag_brick` / `rotate_brick`; `load_game` stores incoming data as-is.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::brick::{Brick, BrickId, BrickKind, Color, Tool};
use super::collision::{check_collision_with, compute_resting_height};
use super::grid::{clamp_to_baseplate, effective_footprint, snap_axis};
use crate::settings::Settings;
use crate::snap_rotation_y;

/// Outcome of a position-keyed placement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// Brick was added under this id
    Placed(BrickId),
    /// Candidate overlapped an existing brick; nothing changed
    Rejected,
}

impl Placement {
    pub fn placed(&self) -> Option<&BrickId> {
        match self {
            Placement::Placed(id) => Some(id),
            Placement::Rejected => None,
        }
    }
}

/// Partial transform for `BuildState::update_brick`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BrickUpdate {
    pub position: Option<Vec3>,
    pub rotation: Option<Vec3>,
}

/// Complete editor state (bricks in insertion order)
#[derive(Debug, Clone)]
pub struct BuildState {
    bricks: Vec<Brick>,
    selected: Option<BrickId>,
    tool: Tool,
    selected_color: Color,
    /// Kind placed by clicking a surface
    selected_kind: BrickKind,
    /// Id source; seeded so sessions are reproducible
    rng: Pcg32,
}

impl Default for BuildState {
    fn default() -> Self {
        Self::new(0)
    }
}

impl BuildState {
    /// Create an empty build whose ids are drawn from `seed`
    pub fn new(seed: u64) -> Self {
        Self {
            bricks: Vec::new(),
            selected: None,
            tool: Tool::default(),
            selected_color: Color::default(),
            selected_kind: BrickKind::default(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Create an empty build using the preferred color, kind and tool
    pub fn with_settings(seed: u64, settings: &Settings) -> Self {
        let mut state = Self::new(seed);
        state.selected_color = settings.default_color;
        state.selected_kind = settings.default_kind;
        state.tool = settings.default_tool;
        state
    }

    pub fn bricks(&self) -> &[Brick] {
        &self.bricks
    }

    pub fn brick(&self, id: &BrickId) -> Option<&Brick> {
        self.bricks.iter().find(|b| &b.id == id)
    }

    pub fn len(&self) -> usize {
        self.bricks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bricks.is_empty()
    }

    pub fn selected(&self) -> Option<&BrickId> {
        self.selected.as_ref()
    }

    pub fn selected_brick(&self) -> Option<&Brick> {
        self.selected.as_ref().and_then(|id| self.brick(id))
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn selected_color(&self) -> Color {
        self.selected_color
    }

    pub fn selected_kind(&self) -> BrickKind {
        self.selected_kind
    }

    /// Allocate an id not used by any brick
    fn next_brick_id(&mut self) -> BrickId {
        loop {
            let hi: u64 = self.rng.random();
            let lo: u64 = self.rng.random();
            // Shape as a version 4 / variant 1 UUID string
            let hi = (hi & !0xf000u64) | 0x4000;
            let lo = (lo & !(0b11u64 << 62)) | (0b10u64 << 62);
            let id = BrickId::new(format!(
                "{:08x}-{:04x}-{:04x}-{:04x}-{:012x}",
                hi >> 32,
                (hi >> 16) & 0xffff,
                hi & 0xffff,
                lo >> 48,
                lo & 0xffff_ffff_ffff
            ));
            if self.brick(&id).is_none() {
                return id;
            }
        }
    }

    fn index_of(&self, id: &BrickId) -> Option<usize> {
        self.bricks.iter().position(|b| &b.id == id)
    }

    /// Add a brick of `kind` at the origin cell, stacked on whatever is there
    ///
    /// The new brick becomes the selection and the tool switches to move.
    pub fn add_brick(&mut self, kind: BrickKind) -> BrickId {
        let footprint = kind.footprint();
        let x = snap_axis(0.0, footprint.width);
        let z = snap_axis(0.0, footprint.depth);
        let y = compute_resting_height(None, footprint, x, z, &self.bricks);

        let id = self.next_brick_id();
        let brick = Brick::new(id.clone(), kind, Vec3::new(x, y, z), self.selected_color);
        log::debug!("Added {} brick {} at {}", kind, id, brick.position);
        self.bricks.push(brick);

        self.selected = Some(id.clone());
        self.tool = Tool::Move;
        id
    }

    /// Place a brick of `kind` exactly at `position` unless it would overlap
    ///
    /// Rejection is policy, not failure: the state is left untouched.
    pub fn place_brick(&mut self, kind: BrickKind, position: Vec3) -> Placement {
        if check_collision_with(kind.footprint(), position, &self.bricks, None) {
            log::debug!("Rejected {} brick at {}: occupied", kind, position);
            return Placement::Rejected;
        }

        let id = self.next_brick_id();
        self.bricks
            .push(Brick::new(id.clone(), kind, position, self.selected_color));
        log::debug!("Placed {} brick {} at {}", kind, id, position);
        Placement::Placed(id)
    }

    /// Place a classic 2x4 brick at `position` (fixed-size editor path)
    pub fn add_brick_at(&mut self, position: Vec3) -> Placement {
        self.place_brick(BrickKind::TwoByFour, position)
    }

    /// Merge a partial transform into a brick
    ///
    /// Does not re-validate collision: callers snap and resolve first (see
    /// `drag_brick` / `rotate_brick`). Returns false for an unknown id.
    pub fn update_brick(&mut self, id: &BrickId, update: BrickUpdate) -> bool {
        let Some(brick) = self.bricks.iter_mut().find(|b| &b.id == id) else {
            return false;
        };
        if let Some(position) = update.position {
            brick.position = position;
        }
        if let Some(rotation) = update.rotation {
            brick.rotation = rotation;
        }
        true
    }

    /// Move a brick toward `point`, snapped to the lattice and resting on the build
    ///
    /// The brick never leaves the baseplate.
    pub fn drag_brick(&mut self, id: &BrickId, point: Vec3) -> bool {
        let Some(brick) = self.brick(id) else {
            return false;
        };
        let footprint = brick.footprint();
        let snapped = Vec3::new(
            snap_axis(point.x, footprint.width),
            0.0,
            snap_axis(point.z, footprint.depth),
        );
        let Vec3 { x, z, .. } = clamp_to_baseplate(snapped, footprint);
        let y = compute_resting_height(Some(id), footprint, x, z, &self.bricks);

        self.update_brick(
            id,
            BrickUpdate {
                position: Some(Vec3::new(x, y, z)),
                rotation: None,
            },
        )
    }

    /// Turn a brick a quarter turn about Y and settle it again
    ///
    /// The stored angle is always an exact multiple of 90°. The center is
    /// re-snapped because a turn can change each axis' parity.
    pub fn rotate_brick(&mut self, id: &BrickId) -> bool {
        let Some(brick) = self.brick(id) else {
            return false;
        };
        let mut rotation = brick.rotation;
        rotation.y = snap_rotation_y(rotation.y + std::f32::consts::FRAC_PI_2);

        let footprint = effective_footprint(brick.kind, rotation.y);
        let x = snap_axis(brick.position.x, footprint.width);
        let z = snap_axis(brick.position.z, footprint.depth);
        let y = compute_resting_height(Some(id), footprint, x, z, &self.bricks);

        self.update_brick(
            id,
            BrickUpdate {
                position: Some(Vec3::new(x, y, z)),
                rotation: Some(rotation),
            },
        )
    }

    /// Delete a brick, clearing the selection if it pointed there
    ///
    /// Bricks resting on it stay where they are.
    pub fn remove_brick(&mut self, id: &BrickId) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        self.bricks.remove(index);
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        log::debug!("Removed brick {}", id);
        true
    }

    /// Select a brick, or clear the selection with `None`
    ///
    /// An id not in the build leaves the selection as it was and returns false.
    pub fn select_brick(&mut self, id: Option<BrickId>) -> bool {
        match id {
            Some(id) if self.brick(&id).is_none() => {
                log::debug!("Ignored selection of unknown brick {}", id);
                false
            }
            id => {
                self.selected = id;
                true
            }
        }
    }

    pub fn set_tool(&mut self, tool: Tool) {
        if self.tool != tool {
            log::debug!("Tool: {} -> {}", self.tool, tool);
        }
        self.tool = tool;
    }

    pub fn set_color(&mut self, color: Color) {
        self.selected_color = color;
    }

    pub fn set_selected_kind(&mut self, kind: BrickKind) {
        self.selected_kind = kind;
    }

    /// Remove every brick and clear the selection
    pub fn reset(&mut self) {
        self.bricks.clear();
        self.selected = None;
    }

    /// Replace the whole build with `bricks`, in order
    ///
    /// Overlaps in the incoming data are accepted as-is.
    pub fn load_game(&mut self, bricks: Vec<Brick>) {
        log::info!("Loaded build with {} bricks", bricks.len());
        self.bricks = bricks;
        self.selected = None;
    }

    /// Pairs of bricks whose margin-shrunk boxes overlap in 3D
    pub fn overlapping_pairs(&self) -> Vec<(BrickId, BrickId)> {
        overlapping_pairs(&self.bricks)
    }
}

/// Pairs of bricks in `bricks` violating the no-overlap invariant
pub fn overlapping_pairs(bricks: &[Brick]) -> Vec<(BrickId, BrickId)> {
    let mut pairs = Vec::new();
    for (i, a) in bricks.iter().enumerate() {
        for b in &bricks[i + 1..] {
            if check_collision_with(a.footprint(), a.position, [b], None) {
                pairs.push((a.id.clone(), b.id.clone()));
            }
        }
    }
    pairs
}
