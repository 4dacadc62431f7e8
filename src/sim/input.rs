//! Pointer interpretation
//!
//! Raw pointer events become drag or click-to-path intents depending on the
//! configured control mode. Events are ignored outside of Playing.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::deliver_at_position;
use super::state::{BoatId, DeliveryTrigger, GameState, Motion};
use crate::settings::ControlMode;

/// Raw pointer event in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down(Vec2),
    Move(Vec2),
    Up(Vec2),
}

/// Apply one pointer event to the world
pub fn handle_pointer(state: &mut GameState, event: PointerEvent) {
    if !state.is_playing() {
        return;
    }
    match (state.rules.control, event) {
        (ControlMode::Drag, PointerEvent::Down(pos)) => begin_drag(state, pos),
        (ControlMode::Drag, PointerEvent::Move(pos)) => update_drag(state, pos),
        (ControlMode::Drag, PointerEvent::Up(_)) => end_drag(state),
        (ControlMode::ClickToPath, PointerEvent::Down(pos)) => click(state, pos),
        (ControlMode::ClickToPath, _) => {}
    }
}

fn begin_drag(state: &mut GameState, pos: Vec2) {
    // A second press without a release (lost pointer-up) drops the old drag
    if state.dragged.is_some() {
        end_drag(state);
    }
    let Some(id) = state.boat_at(pos) else {
        return;
    };
    if let Some(boat) = state.boat_mut(id) {
        boat.motion = Motion::Dragged { pointer: pos };
        boat.selected = false;
    }
    state.dragged = Some(id);
    state.session.selected_boat = Some(id);
    log::debug!("Dragging {:?}", id);
}

fn update_drag(state: &mut GameState, pos: Vec2) {
    let Some(id) = state.dragged else {
        return;
    };
    match state.boat_mut(id) {
        Some(boat) => boat.motion = Motion::Dragged { pointer: pos },
        // Boat vanished mid-drag
        None => state.dragged = None,
    }
}

fn end_drag(state: &mut GameState) {
    let Some(id) = state.dragged.take() else {
        return;
    };
    state.session.selected_boat = None;
    let Some(boat) = state.boat_mut(id) else {
        return;
    };
    boat.motion = Motion::Ambient;
    deliver_at_position(state, id, DeliveryTrigger::Release);
}

fn click(state: &mut GameState, pos: Vec2) {
    let hit = state.boat_at(pos);
    let selected = state
        .session
        .selected_boat
        .filter(|id| state.boats.contains_key(id));

    match (selected, hit) {
        // Different boat: move the selection
        (Some(current), Some(other)) if current != other => select(state, Some(other)),
        // Same boat again, or open water: sail there
        (Some(current), _) => set_path(state, current, pos),
        (None, Some(boat)) => select(state, Some(boat)),
        (None, None) => select(state, None),
    }
}

fn select(state: &mut GameState, id: Option<BoatId>) {
    for boat in state.boats.values_mut() {
        boat.selected = Some(boat.id) == id;
    }
    state.session.selected_boat = id;
}

fn set_path(state: &mut GameState, id: BoatId, target: Vec2) {
    let color = match state.boat(id) {
        Some(boat) => boat.color,
        None => return,
    };
    let dock = state
        .dock_at(target)
        .filter(|d| d.accepts(color))
        .map(|d| d.id);
    if let Some(boat) = state.boat_mut(id) {
        boat.motion = Motion::Path { target, dock };
    }
    select(state, None);
    log::debug!("{:?} heading to {:?} (dock {:?})", id, target, dock);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Rules;
    use crate::sim::rect::Viewport;
    use crate::sim::session::SessionAction;
    use crate::sim::state::{CargoColor, DockColor, GameEvent};

    fn playing(control: ControlMode) -> GameState {
        let rules = Rules {
            control,
            ..Rules::default()
        };
        let mut state = GameState::new(3, rules, Viewport::new(800.0, 600.0));
        state.session.apply(SessionAction::Start);
        state
    }

    fn dock_pos(state: &GameState, color: DockColor) -> Vec2 {
        state.docks.iter().find(|d| d.color == color).unwrap().pos
    }

    #[test]
    fn test_drag_lifecycle() {
        let mut state = playing(ControlMode::Drag);
        let id = state.add_boat(CargoColor::Red, 3, Vec2::new(400.0, 400.0), Vec2::new(10.0, 0.0));

        // Edge of the 60x40 hit box
        handle_pointer(&mut state, PointerEvent::Down(Vec2::new(429.0, 419.0)));
        assert_eq!(state.dragged, Some(id));
        assert_eq!(state.session.selected_boat, Some(id));
        assert!(state.boat(id).unwrap().is_dragging());
        assert!(!state.boat(id).unwrap().selected);

        handle_pointer(&mut state, PointerEvent::Move(Vec2::new(500.0, 400.0)));
        assert_eq!(
            state.boat(id).unwrap().motion,
            Motion::Dragged { pointer: Vec2::new(500.0, 400.0) }
        );

        handle_pointer(&mut state, PointerEvent::Up(Vec2::new(500.0, 400.0)));
        assert_eq!(state.dragged, None);
        assert_eq!(state.session.selected_boat, None);
        assert_eq!(state.boat(id).unwrap().motion, Motion::Ambient);
        assert_eq!(state.session.score, 0);
    }

    #[test]
    fn test_press_on_water_does_nothing() {
        let mut state = playing(ControlMode::Drag);
        state.add_boat(CargoColor::Red, 3, Vec2::new(400.0, 400.0), Vec2::ZERO);
        handle_pointer(&mut state, PointerEvent::Down(Vec2::new(431.0, 400.0)));
        assert_eq!(state.dragged, None);
    }

    #[test]
    fn test_release_over_matching_dock_delivers() {
        let mut state = playing(ControlMode::Drag);
        let at = dock_pos(&state, DockColor::Yellow);
        let id = state.add_boat(CargoColor::Yellow, 2, at, Vec2::ZERO);
        handle_pointer(&mut state, PointerEvent::Down(at));
        handle_pointer(&mut state, PointerEvent::Up(at));
        assert_eq!(state.session.score, 10);
        assert_eq!(state.boat(id).unwrap().cargo, 1);
    }

    #[test]
    fn test_release_over_wrong_dock_is_ignored() {
        let mut state = playing(ControlMode::Drag);
        let at = dock_pos(&state, DockColor::Yellow);
        let id = state.add_boat(CargoColor::Red, 2, at, Vec2::ZERO);
        handle_pointer(&mut state, PointerEvent::Down(at));
        handle_pointer(&mut state, PointerEvent::Up(at));
        assert_eq!(state.session.score, 0);
        assert_eq!(state.boat(id).unwrap().cargo, 2);
    }

    #[test]
    fn test_stale_drag_is_dropped() {
        let mut state = playing(ControlMode::Drag);
        let id = state.add_boat(CargoColor::Red, 3, Vec2::new(400.0, 400.0), Vec2::ZERO);
        handle_pointer(&mut state, PointerEvent::Down(Vec2::new(400.0, 400.0)));
        state.boats.remove(&id);
        handle_pointer(&mut state, PointerEvent::Move(Vec2::new(10.0, 10.0)));
        assert_eq!(state.dragged, None);
        handle_pointer(&mut state, PointerEvent::Up(Vec2::new(10.0, 10.0)));
        assert_eq!(state.session.score, 0);
    }

    #[test]
    fn test_input_ignored_outside_playing() {
        let mut state = GameState::new(3, Rules::default(), Viewport::default());
        state.add_boat(CargoColor::Red, 3, Vec2::new(400.0, 400.0), Vec2::ZERO);
        handle_pointer(&mut state, PointerEvent::Down(Vec2::new(400.0, 400.0)));
        assert_eq!(state.dragged, None);
    }

    #[test]
    fn test_oldest_boat_wins_hit_test() {
        let mut state = playing(ControlMode::Drag);
        let first = state.add_boat(CargoColor::Red, 3, Vec2::new(400.0, 400.0), Vec2::ZERO);
        state.add_boat(CargoColor::Yellow, 3, Vec2::new(410.0, 400.0), Vec2::ZERO);
        handle_pointer(&mut state, PointerEvent::Down(Vec2::new(405.0, 400.0)));
        assert_eq!(state.dragged, Some(first));
    }

    #[test]
    fn test_click_select_then_retarget() {
        let mut state = playing(ControlMode::ClickToPath);
        let a = state.add_boat(CargoColor::Red, 3, Vec2::new(400.0, 400.0), Vec2::ZERO);
        let b = state.add_boat(CargoColor::Red, 3, Vec2::new(600.0, 400.0), Vec2::ZERO);

        handle_pointer(&mut state, PointerEvent::Down(Vec2::new(400.0, 400.0)));
        assert_eq!(state.session.selected_boat, Some(a));
        assert!(state.boat(a).unwrap().selected);
        assert_eq!(state.boat(a).unwrap().motion, Motion::Ambient);

        handle_pointer(&mut state, PointerEvent::Down(Vec2::new(600.0, 400.0)));
        assert_eq!(state.session.selected_boat, Some(b));
        assert!(!state.boat(a).unwrap().selected);
        assert!(state.boat(b).unwrap().selected);
    }

    #[test]
    fn test_click_path_to_dock() {
        let mut state = playing(ControlMode::ClickToPath);
        let red = state.docks.iter().find(|d| d.color == DockColor::Red).unwrap().clone();
        let id = state.add_boat(CargoColor::Red, 3, Vec2::new(400.0, 400.0), Vec2::ZERO);

        handle_pointer(&mut state, PointerEvent::Down(Vec2::new(400.0, 400.0)));
        handle_pointer(&mut state, PointerEvent::Down(red.pos));
        assert_eq!(
            state.boat(id).unwrap().motion,
            Motion::Path {
                target: red.pos,
                dock: Some(red.id)
            }
        );
        assert_eq!(state.session.selected_boat, None);
        assert!(!state.boat(id).unwrap().selected);
    }

    #[test]
    fn test_click_path_to_wrong_dock_has_no_target() {
        let mut state = playing(ControlMode::ClickToPath);
        let yellow = dock_pos(&state, DockColor::Yellow);
        let id = state.add_boat(CargoColor::Red, 3, Vec2::new(400.0, 400.0), Vec2::ZERO);
        handle_pointer(&mut state, PointerEvent::Down(Vec2::new(400.0, 400.0)));
        handle_pointer(&mut state, PointerEvent::Down(yellow));
        assert_eq!(
            state.boat(id).unwrap().motion,
            Motion::Path {
                target: yellow,
                dock: None
            }
        );
    }

    #[test]
    fn test_second_click_on_same_boat_sets_path() {
        let mut state = playing(ControlMode::ClickToPath);
        let id = state.add_boat(CargoColor::Red, 3, Vec2::new(400.0, 400.0), Vec2::ZERO);
        handle_pointer(&mut state, PointerEvent::Down(Vec2::new(400.0, 400.0)));
        handle_pointer(&mut state, PointerEvent::Down(Vec2::new(405.0, 401.0)));
        assert!(matches!(state.boat(id).unwrap().motion, Motion::Path { dock: None, .. }));
    }

    #[test]
    fn test_click_hitbox_uses_hull_length() {
        let mut state = playing(ControlMode::ClickToPath);
        // cargo 2 -> 20 x 12 hull
        state.add_boat(CargoColor::Red, 2, Vec2::new(400.0, 400.0), Vec2::ZERO);
        handle_pointer(&mut state, PointerEvent::Down(Vec2::new(415.0, 400.0)));
        assert_eq!(state.session.selected_boat, None);
        handle_pointer(&mut state, PointerEvent::Down(Vec2::new(409.0, 405.0)));
        assert!(state.session.selected_boat.is_some());
    }

    #[test]
    fn test_click_mode_ignores_drag_events() {
        let mut state = playing(ControlMode::ClickToPath);
        state.add_boat(CargoColor::Red, 3, Vec2::new(400.0, 400.0), Vec2::ZERO);
        handle_pointer(&mut state, PointerEvent::Move(Vec2::new(400.0, 400.0)));
        handle_pointer(&mut state, PointerEvent::Up(Vec2::new(400.0, 400.0)));
        assert_eq!(state.dragged, None);
        assert!(
            !state
                .drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::Delivered { .. }))
        );
    }
}
