//! Per-frame simulation tick
//!
//! Core game loop: session actions, spawning, input, motion, deliveries,
//! proximity, pruning. Everything for a frame completes before it returns.

use super::autopilot;
use super::collision::{
    attempt_delivery, decay_effects, resolve_autonomous_docking, resolve_proximity,
    update_dock_occupancy,
};
use super::input::{PointerEvent, handle_pointer};
use super::rect::Viewport;
use super::session::SessionAction;
use super::spawner::update_spawner;
use super::state::{Arrival, BoatId, DeliveryTrigger, DespawnReason, GameEvent, GameState};
use crate::consts::*;

/// Input gathered by the host since the previous tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer events in arrival order
    pub pointer: Vec<PointerEvent>,
    /// Start / play again / main menu
    pub action: Option<SessionAction>,
    /// New viewport size, if it changed
    pub viewport: Option<Viewport>,
    /// Idle/demo mode - autopilot plays the game
    pub autopilot: bool,
}

/// Apply a session action, rebuilding the world if it was accepted
pub fn apply_action(state: &mut GameState, action: SessionAction) -> bool {
    let from = state.session.phase;
    let Some(to) = state.session.apply(action) else {
        log::debug!("Ignoring {:?} in {:?}", action, from);
        return false;
    };
    state.reset_world();
    state.events.push(GameEvent::PhaseChanged { from, to });
    log::info!("{:?} -> {:?} (best {})", from, to, state.session.best_score);
    true
}

/// Advance the game state by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let dt = if dt.is_finite() {
        dt.clamp(0.0, MAX_FRAME_DT)
    } else {
        0.0
    };

    if let Some(viewport) = input.viewport {
        state.set_viewport(viewport);
    }
    if let Some(action) = input.action {
        apply_action(state, action);
    }

    // Decoration and effects keep animating in every phase
    let viewport = state.viewport;
    for cloud in &mut state.clouds {
        cloud.update(dt, &viewport);
    }
    decay_effects(state, dt);

    if !state.is_playing() {
        return;
    }

    state.time += dt;
    state.time_ticks += 1;

    update_spawner(state, dt);

    let autopilot_events = if input.autopilot {
        autopilot::plan(state)
    } else {
        Vec::new()
    };
    for &event in input.pointer.iter().chain(&autopilot_events) {
        handle_pointer(state, event);
    }

    // Motion; arrivals are resolved once every boat has moved
    let speed = state.rules.pursuit_speed;
    let arrivals: Vec<Arrival> = state
        .boats
        .values_mut()
        .filter_map(|boat| boat.update(dt, speed))
        .collect();
    for arrival in arrivals {
        // The dock is resolved through the table; a missing one means no target
        if let Some(dock) = arrival.dock.filter(|id| state.dock(*id).is_some()) {
            attempt_delivery(state, arrival.boat, dock, DeliveryTrigger::Arrival);
        }
    }

    if state.rules.autonomous_docking {
        resolve_autonomous_docking(state);
    }

    resolve_proximity(state);

    prune_off_screen(state);
    update_dock_occupancy(state);
}

/// Remove boats that drifted out of the harbor
pub fn prune_off_screen(state: &mut GameState) {
    let viewport = state.viewport;
    let gone: Vec<BoatId> = state
        .boats
        .values()
        .filter(|b| b.is_off_screen(&viewport, OFFSCREEN_MARGIN))
        .map(|b| b.id)
        .collect();
    for id in gone {
        log::debug!("{:?} left the harbor", id);
        state.remove_boat(id, DespawnReason::OffScreen);
    }
}
