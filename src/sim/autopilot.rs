//! Idle/demo player
//!
//! Produces the pointer events a player would, so the attract screen and the
//! headless runner go through the same input path as real play.

use super::input::PointerEvent;
use super::state::{Boat, Dock, GameState, Motion};
use crate::consts::ARRIVAL_EPSILON;
use crate::settings::ControlMode;

/// Nearest dock that accepts this boat's cargo
pub fn nearest_dock<'a>(state: &'a GameState, boat: &Boat) -> Option<&'a Dock> {
    state
        .docks
        .iter()
        .filter(|d| d.accepts(boat.color))
        .min_by(|a, b| {
            a.pos
                .distance_squared(boat.pos)
                .partial_cmp(&b.pos.distance_squared(boat.pos))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}

/// Idle boat closest to a dock it can unload at.
/// Boats whose center is covered by an older boat's hit box can't be grabbed there.
fn pick_boat(state: &GameState) -> Option<&Boat> {
    state
        .boats
        .values()
        .filter(|b| matches!(b.motion, Motion::Ambient))
        .filter(|b| !state.viewport.is_beyond(b.pos, 0.0))
        .filter(|b| state.boat_at(b.pos) == Some(b.id))
        .filter_map(|b| nearest_dock(state, b).map(|d| (b, d.pos.distance(b.pos))))
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(b, _)| b)
}

/// Pointer events for this tick
pub fn plan(state: &GameState) -> Vec<PointerEvent> {
    if !state.is_playing() {
        return Vec::new();
    }
    match state.rules.control {
        ControlMode::Drag => plan_drag(state),
        ControlMode::ClickToPath => plan_click(state),
    }
}

fn plan_drag(state: &GameState) -> Vec<PointerEvent> {
    if let Some(boat) = state.dragged.and_then(|id| state.boat(id)) {
        return match nearest_dock(state, boat) {
            // Release once the boat sits on the dock
            Some(dock) if dock.pos.distance(boat.pos) > ARRIVAL_EPSILON * 2.0 => {
                vec![PointerEvent::Move(dock.pos)]
            }
            _ => vec![PointerEvent::Up(boat.pos)],
        };
    }
    match pick_boat(state) {
        Some(boat) => vec![PointerEvent::Down(boat.pos)],
        None => Vec::new(),
    }
}

fn plan_click(state: &GameState) -> Vec<PointerEvent> {
    if let Some(boat) = state.session.selected_boat.and_then(|id| state.boat(id)) {
        return match nearest_dock(state, boat) {
            Some(dock) => vec![PointerEvent::Down(dock.pos)],
            None => Vec::new(),
        };
    }
    match pick_boat(state) {
        Some(boat) => vec![PointerEvent::Down(boat.pos)],
        None => Vec::new(),
    }
}
