//! Pointer-event handling for the editor
//!
//! The rendering layer raycasts and forwards discrete events; this module
//! turns them into Build State calls. A drag is a sequence of move events
//! between pointer-down and pointer-up, each one committed immediately.

use glam::Vec3;

use super::brick::{BrickId, Tool};
use super::grid::pointer_to_candidate;
use super::state::{BuildState, Placement};

/// Modifier keys held during a click
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub alt: bool,
    pub shift: bool,
    pub ctrl: bool,
}

/// What a pointer ray hit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerTarget {
    Ground,
    Brick(BrickId),
}

/// World-space ray hit, with the surface normal when a face was hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    pub point: Vec3,
    pub normal: Option<Vec3>,
}

/// Input events from the rendering/input layer
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Click {
        target: PointerTarget,
        hit: SurfaceHit,
        modifiers: Modifiers,
    },
    /// Press on a brick (starts a drag with the move tool)
    PointerDown { id: BrickId, point: Vec3 },
    /// Pointer moved; `point` is the hit on the ground or build
    PointerMove { point: Vec3 },
    PointerUp,
    ContextMenu { id: BrickId },
}

/// What handling an event did to the build
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Placed(BrickId),
    /// Placement was refused because the cell is occupied
    Rejected,
    Removed(BrickId),
    Moved(BrickId),
    Rotated(BrickId),
    Selected(BrickId),
    /// Drag finished; the last move is the final position
    Released(BrickId),
}

#[derive(Debug, Clone, Default, PartialEq)]
enum Gesture {
    #[default]
    Idle,
    Holding { id: BrickId, moved: bool },
}

/// Translates pointer events into Build State mutations
#[derive(Debug, Clone, Default)]
pub struct Controller {
    gesture: Gesture,
    /// Browsers fire a click after a drag; that click must not place a brick
    swallow_click: bool,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Brick currently held by a drag
    pub fn held(&self) -> Option<&BrickId> {
        match &self.gesture {
            Gesture::Holding { id, .. } => Some(id),
            Gesture::Idle => None,
        }
    }

    /// Apply one input event to `state`
    ///
    /// Only the event directly after a drag's pointer-up can be a swallowed
    /// click; any other event in between clears the flag.
    pub fn handle(&mut self, state: &mut BuildState, event: InputEvent) -> Effect {
        let swallow_click = std::mem::take(&mut self.swallow_click);
        match event {
            InputEvent::Click {
                target,
                hit,
                modifiers,
            } => {
                if swallow_click {
                    return Effect::None;
                }
                self.click(state, target, hit, modifiers)
            }
            InputEvent::PointerDown { id, point: _ } => {
                if state.tool() != Tool::Move || state.brick(&id).is_none() {
                    return Effect::None;
                }
                state.select_brick(Some(id.clone()));
                self.gesture = Gesture::Holding {
                    id: id.clone(),
                    moved: false,
                };
                Effect::Selected(id)
            }
            InputEvent::PointerMove { point } => self.drag(state, point),
            InputEvent::PointerUp => match std::mem::take(&mut self.gesture) {
                Gesture::Holding { id, moved } => {
                    self.swallow_click = moved;
                    Effect::Released(id)
                }
                Gesture::Idle => Effect::None,
            },
            InputEvent::ContextMenu { id } => self.remove(state, id),
        }
    }

    fn click(
        &mut self,
        state: &mut BuildState,
        target: PointerTarget,
        hit: SurfaceHit,
        modifiers: Modifiers,
    ) -> Effect {
        match (state.tool(), target) {
            (_, PointerTarget::Brick(id)) if modifiers.alt => self.remove(state, id),
            (Tool::Delete, PointerTarget::Brick(id)) => self.remove(state, id),
            (Tool::Rotate, PointerTarget::Brick(id)) => {
                if state.rotate_brick(&id) {
                    Effect::Rotated(id)
                } else {
                    Effect::None
                }
            }
            (Tool::Move, _) => {
                let kind = state.selected_kind();
                let Some(candidate) = pointer_to_candidate(hit.point, hit.normal, kind.footprint())
                else {
                    return Effect::None;
                };
                match state.place_brick(kind, candidate) {
                    Placement::Placed(id) => Effect::Placed(id),
                    Placement::Rejected => Effect::Rejected,
                }
            }
            (Tool::Delete | Tool::Rotate, PointerTarget::Ground) => Effect::None,
        }
    }

    fn drag(&mut self, state: &mut BuildState, point: Vec3) -> Effect {
        let Gesture::Holding { id, moved } = &mut self.gesture else {
            return Effect::None;
        };
        let Some(before) = state.brick(id).map(|b| b.position) else {
            self.gesture = Gesture::Idle;
            return Effect::None;
        };

        state.drag_brick(id, point);
        let after = state.brick(id).map(|b| b.position);
        if after == Some(before) {
            return Effect::None;
        }
        *moved = true;
        Effect::Moved(id.clone())
    }

    fn remove(&mut self, state: &mut BuildState, id: BrickId) -> Effect {
        if self.held() == Some(&id) {
            self.gesture = Gesture::Idle;
        }
        if state.remove_brick(&id) {
            Effect::Removed(id)
        } else {
            Effect::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::brick::BrickKind;

    fn click(target: PointerTarget, point: Vec3, normal: Vec3) -> InputEvent {
        InputEvent::Click {
            target,
            hit: SurfaceHit {
                point,
                normal: Some(normal),
            },
            modifiers: Modifiers::default(),
        }
    }

    #[test]
    fn test_click_ground_places_selected_kind() {
        let mut state = BuildState::new(1);
        let mut controller = Controller::new();

        let ground = click(PointerTarget::Ground, Vec3::new(3.2, 0.0, -0.7), Vec3::Y);
        let effect = controller.handle(&mut state, ground);
        let Effect::Placed(id) = effect.clone() else {
            panic!("expected placement, got {effect:?}");
        };
        let brick = state.brick(&id).unwrap();
        assert_eq!(brick.kind, BrickKind::TwoByFour);
        assert_eq!((brick.position.x, brick.position.z), (3.0, -1.0));
        assert!((brick.position.y - 0.6).abs() < 1e-5);
    }

    #[test]
    fn test_click_top_face_stacks_and_repeat_is_rejected() {
        let mut state = BuildState::new(2);
        let mut controller = Controller::new();
        let base = state.add_brick(BrickKind::TwoByFour);

        let top = click(PointerTarget::Brick(base.clone()), Vec3::new(0.2, 1.2, 0.3), Vec3::Y);
        assert!(matches!(controller.handle(&mut state, top.clone()), Effect::Placed(_)));
        assert_eq!(controller.handle(&mut state, top), Effect::Rejected);
        assert_eq!(state.len(), 2);
    }

    #[test]
    fn test_click_without_face_does_nothing() {
        let mut state = BuildState::new(3);
        let mut controller = Controller::new();
        let event = InputEvent::Click {
            target: PointerTarget::Ground,
            hit: SurfaceHit {
                point: Vec3::ZERO,
                normal: None,
            },
            modifiers: Modifiers::default(),
        };
        assert_eq!(controller.handle(&mut state, event), Effect::None);
        assert!(state.is_empty());
    }

    #[test]
    fn test_alt_click_and_context_menu_remove() {
        let mut state = BuildState::new(4);
        let mut controller = Controller::new();
        let a = state.add_brick(BrickKind::TwoByFour);
        let b = state.add_brick(BrickKind::TwoByFour);

        let alt_click = InputEvent::Click {
            target: PointerTarget::Brick(a.clone()),
            hit: SurfaceHit {
                point: Vec3::new(0.0, 1.2, 0.0),
                normal: Some(Vec3::Y),
            },
            modifiers: Modifiers {
                alt: true,
                ..Default::default()
            },
        };
        assert_eq!(controller.handle(&mut state, alt_click), Effect::Removed(a));
        assert_eq!(
            controller.handle(&mut state, InputEvent::ContextMenu { id: b.clone() }),
            Effect::Removed(b.clone())
        );
        assert_eq!(
            controller.handle(&mut state, InputEvent::ContextMenu { id: b }),
            Effect::None
        );
        assert!(state.is_empty());
    }

    #[test]
    fn test_tools_route_brick_clicks() {
        let mut state = BuildState::new(5);
        let mut controller = Controller::new();
        let id = state.add_brick(BrickKind::OneByTwo);
        let on_brick = click(PointerTarget::Brick(id.clone()), Vec3::new(0.5, 1.2, 0.0), Vec3::Y);

        state.set_tool(Tool::Rotate);
        assert_eq!(controller.handle(&mut state, on_brick.clone()), Effect::Rotated(id.clone()));
        assert_eq!(state.brick(&id).unwrap().footprint().width, 2);

        let on_ground = click(PointerTarget::Ground, Vec3::new(8.0, 0.0, 8.0), Vec3::Y);
        assert_eq!(controller.handle(&mut state, on_ground), Effect::None);

        state.set_tool(Tool::Delete);
        assert_eq!(controller.handle(&mut state, on_brick), Effect::Removed(id));
        assert!(state.is_empty());
    }

    #[test]
    fn test_drag_moves_and_swallows_trailing_click() {
        let mut state = BuildState::new(6);
        let mut controller = Controller::new();
        let base = state.add_brick(BrickKind::TwoByFour);
        let mover = state.add_brick(BrickKind::OneByOne);
        state.select_brick(None);

        let down = InputEvent::PointerDown {
            id: mover.clone(),
            point: Vec3::new(0.5, 2.4, 0.5),
        };
        assert_eq!(controller.handle(&mut state, down), Effect::Selected(mover.clone()));
        assert_eq!(state.selected(), Some(&mover));
        assert_eq!(controller.held(), Some(&mover));

        let away = InputEvent::PointerMove {
            point: Vec3::new(6.1, 0.0, 6.1),
        };
        assert_eq!(controller.handle(&mut state, away.clone()), Effect::Moved(mover.clone()));
        // Same cell again: nothing to commit
        assert_eq!(controller.handle(&mut state, away), Effect::None);
        let brick = state.brick(&mover).unwrap();
        assert_eq!((brick.position.x, brick.position.z), (6.5, 6.5));
        assert!((brick.position.y - 0.6).abs() < 1e-5);

        let back = InputEvent::PointerMove {
            point: Vec3::new(0.2, 0.0, -1.3),
        };
        controller.handle(&mut state, back);
        assert!((state.brick(&mover).unwrap().position.y - 1.8).abs() < 1e-5);

        assert_eq!(controller.handle(&mut state, InputEvent::PointerUp), Effect::Released(mover));
        assert!(controller.held().is_none());

        let trailing = click(PointerTarget::Brick(base.clone()), Vec3::new(0.0, 1.2, 0.0), Vec3::Y);
        assert_eq!(controller.handle(&mut state, trailing.clone()), Effect::None);
        assert_eq!(state.len(), 2);
        // Only the first click after a drag is swallowed
        assert!(matches!(
            controller.handle(&mut state, trailing),
            Effect::Placed(_) | Effect::Rejected
        ));
    }

    #[test]
    fn test_click_side_face_places_flush_neighbor() {
        let mut state = BuildState::new(10);
        let mut controller = Controller::new();
        let base = state.add_brick(BrickKind::TwoByFour);

        let east = click(PointerTarget::Brick(base.clone()), Vec3::new(1.0, 0.5, 0.3), Vec3::X);
        let Effect::Placed(id) = controller.handle(&mut state, east.clone()) else {
            panic!("side-face click should place a brick");
        };
        let brick = state.brick(&id).unwrap();
        assert_eq!((brick.position.x, brick.position.z), (2.0, 0.0));
        assert!((brick.position.y - 0.6).abs() < 1e-5);

        // 2x4 is four cells deep, so the +Z neighbor centers at z = 4
        let north = click(PointerTarget::Brick(base), Vec3::new(0.2, 0.5, 2.0), Vec3::Z);
        let Effect::Placed(id) = controller.handle(&mut state, north) else {
            panic!("side-face click should place a brick");
        };
        let brick = state.brick(&id).unwrap();
        assert_eq!((brick.position.x, brick.position.z), (0.0, 4.0));

        assert_eq!(controller.handle(&mut state, east), Effect::Rejected);
        assert!(state.overlapping_pairs().is_empty());
        assert_eq!(state.len(), 3);
    }

    #[test]
    fn test_swallow_cleared_by_later_events() {
        let mut state = BuildState::new(11);
        let mut controller = Controller::new();
        let id = state.add_brick(BrickKind::OneByOne);

        controller.handle(
            &mut state,
            InputEvent::PointerDown {
                id: id.clone(),
                point: Vec3::ZERO,
            },
        );
        let away = InputEvent::PointerMove {
            point: Vec3::new(6.0, 0.0, 6.0),
        };
        assert_eq!(controller.handle(&mut state, away), Effect::Moved(id.clone()));
        assert_eq!(controller.handle(&mut state, InputEvent::PointerUp), Effect::Released(id));

        // Hover with nothing held: not a click, so the flag goes away
        let hover = InputEvent::PointerMove {
            point: Vec3::new(-5.0, 0.0, -5.0),
        };
        assert_eq!(controller.handle(&mut state, hover), Effect::None);

        let ground = click(PointerTarget::Ground, Vec3::new(-10.2, 0.0, -10.4), Vec3::Y);
        assert!(matches!(controller.handle(&mut state, ground), Effect::Placed(_)));
        assert_eq!(state.len(), 2);
    }

    #[test]
    fn test_move_without_hold_is_ignored() {
        let mut state = BuildState::new(7);
        let mut controller = Controller::new();
        let id = state.add_brick(BrickKind::TwoByTwo);
        let event = InputEvent::PointerMove {
            point: Vec3::new(5.0, 0.0, 5.0),
        };
        assert_eq!(controller.handle(&mut state, event), Effect::None);
        assert_eq!(state.brick(&id).unwrap().position.x, 0.0);
        assert_eq!(controller.handle(&mut state, InputEvent::PointerUp), Effect::None);
    }

    #[test]
    fn test_pointer_down_needs_move_tool() {
        let mut state = BuildState::new(8);
        let mut controller = Controller::new();
        let id = state.add_brick(BrickKind::TwoByTwo);
        state.set_tool(Tool::Rotate);
        let down = InputEvent::PointerDown {
            id,
            point: Vec3::ZERO,
        };
        assert_eq!(controller.handle(&mut state, down), Effect::None);
        assert!(controller.held().is_none());
    }

    #[test]
    fn test_removing_held_brick_ends_drag() {
        let mut state = BuildState::new(9);
        let mut controller = Controller::new();
        let id = state.add_brick(BrickKind::TwoByTwo);
        controller.handle(
            &mut state,
            InputEvent::PointerDown {
                id: id.clone(),
                point: Vec3::ZERO,
            },
        );
        controller.handle(&mut state, InputEvent::ContextMenu { id });
        assert!(controller.held().is_none());
        let event = InputEvent::PointerMove {
            point: Vec3::new(3.0, 0.0, 3.0),
        };
        assert_eq!(controller.handle(&mut state, event), Effect::None);
    }
}
