//! Boat/boat proximity and boat/dock deliveries
//!
//! Runs after every boat has moved. Pair order never matters; when a boat sits
//! inside several docks the first dock in layout order wins.

use glam::Vec2;

use super::session::GamePhase;
use super::state::{
    BoatId, DeliveryTrigger, DespawnReason, DockId, Explosion, GameEvent, GameState, Motion,
    NearMiss,
};
use crate::consts::*;
use crate::distance;
use crate::settings::{CollisionMode, ScoringMode};

/// Proximity band of a boat pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Proximity {
    Clear,
    Warning,
    Lethal,
}

/// Classify a pair distance under the active collision rules
pub fn classify(distance: f32, mode: CollisionMode) -> Proximity {
    if mode.lethal_distance().is_some_and(|lethal| distance < lethal) {
        return Proximity::Lethal;
    }
    if distance < mode.warning_distance() {
        Proximity::Warning
    } else {
        Proximity::Clear
    }
}

/// Result of a delivery attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// Wrong color, stale ids or not playing: nothing changed
    Ignored,
    Delivered { units: u32, points: u64, depleted: bool },
}

/// Try to unload `boat` at `dock`
///
/// Mismatched colors are ignored without touching score, cargo or cooldown.
/// A boat emptied by the delivery is removed before this returns.
pub fn attempt_delivery(
    state: &mut GameState,
    boat_id: BoatId,
    dock_id: DockId,
    trigger: DeliveryTrigger,
) -> DeliveryOutcome {
    if state.session.phase != GamePhase::Playing {
        return DeliveryOutcome::Ignored;
    }
    let Some(dock_color) = state.dock(dock_id).map(|d| d.color) else {
        return DeliveryOutcome::Ignored;
    };
    let scoring = state.rules.scoring;
    let Some(boat) = state.boat_mut(boat_id) else {
        return DeliveryOutcome::Ignored;
    };
    if !boat.color.fits(dock_color) {
        log::debug!("{:?} ({:?}) rejected at {:?} dock", boat_id, boat.color, dock_color);
        return DeliveryOutcome::Ignored;
    }
    if boat.cargo == 0 {
        return DeliveryOutcome::Ignored;
    }

    let color = boat.color;
    let units = match scoring {
        ScoringMode::PerUnit => {
            boat.deliver_one();
            1
        }
        ScoringMode::Shipment => boat.unload_all(),
    };
    let depleted = boat.cargo == 0;
    boat.dock_cooldown = DOCK_COOLDOWN;

    let points = color.unit_value() * units as u64;
    state.session.award(points);
    state.session.stats.record(color, units);
    state.events.push(GameEvent::Delivered {
        boat: boat_id,
        dock: dock_id,
        color,
        units,
        points,
        depleted,
        trigger,
    });
    log::debug!(
        "{:?} delivered {} {:?} at {:?} (+{}, score {})",
        boat_id,
        units,
        color,
        dock_id,
        points,
        state.session.score
    );

    if depleted {
        state.remove_boat(boat_id, DespawnReason::Delivered);
    }
    DeliveryOutcome::Delivered {
        units,
        points,
        depleted,
    }
}

/// Deliver at whatever dock the boat is currently inside
pub fn deliver_at_position(
    state: &mut GameState,
    boat_id: BoatId,
    trigger: DeliveryTrigger,
) -> DeliveryOutcome {
    let Some(pos) = state.boat(boat_id).map(|b| b.pos) else {
        return DeliveryOutcome::Ignored;
    };
    match state.dock_at(pos).map(|d| d.id) {
        Some(dock) => attempt_delivery(state, boat_id, dock, trigger),
        None => DeliveryOutcome::Ignored,
    }
}

/// Boats near a dock unload on their own, once per cooldown, however they move
pub fn resolve_autonomous_docking(state: &mut GameState) {
    let candidates: Vec<(BoatId, DockId)> = state
        .boats
        .values()
        .filter(|b| b.dock_cooldown <= 0.0)
        .filter_map(|b| {
            let dock = state.dock_at(b.pos)?;
            (dock.pos.distance(b.pos) < DOCK_CAPTURE_RADIUS).then_some((b.id, dock.id))
        })
        .collect();

    for (boat, dock) in candidates {
        attempt_delivery(state, boat, dock, DeliveryTrigger::Proximity);
    }
}

/// Scan every pair for near misses and collisions.
/// Returns true if a lethal collision ended the session.
pub fn resolve_proximity(state: &mut GameState) -> bool {
    let mode = state.rules.collision;
    let boats: Vec<(BoatId, Vec2)> = state.boats.values().map(|b| (b.id, b.pos)).collect();

    let mut in_range: Vec<(BoatId, BoatId, Vec2, Vec2, f32)> = Vec::new();
    let mut collisions: Vec<(BoatId, BoatId, Vec2, Vec2)> = Vec::new();

    for (i, &(a, a_pos)) in boats.iter().enumerate() {
        for &(b, b_pos) in &boats[i + 1..] {
            let d = distance(a_pos, b_pos);
            match classify(d, mode) {
                Proximity::Clear => {}
                Proximity::Warning => in_range.push((a, b, a_pos, b_pos, d)),
                Proximity::Lethal => collisions.push((a, b, a_pos, b_pos)),
            }
        }
    }

    // Pairs still in range refresh their fade; only new ones raise an event
    let previously_active: Vec<(BoatId, BoatId)> = state
        .near_misses
        .iter()
        .filter(|w| w.active)
        .map(|w| (w.a, w.b))
        .collect();
    for warning in &mut state.near_misses {
        warning.active = false;
    }
    for (a, b, a_pos, b_pos, d) in in_range {
        let refreshed = NearMiss {
            a,
            b,
            a_pos,
            b_pos,
            fade: NEAR_MISS_FADE,
            active: true,
        };
        match state.near_misses.iter_mut().find(|w| w.a == a && w.b == b) {
            Some(existing) => *existing = refreshed,
            None => state.near_misses.push(refreshed),
        }
        if !previously_active.contains(&(a, b)) {
            state.events.push(GameEvent::NearMiss { a, b, distance: d });
        }
    }

    if collisions.is_empty() {
        return false;
    }

    for &(a, b, a_pos, b_pos) in &collisions {
        log::info!("{:?} and {:?} collided", a, b);
        state.explosions.push(Explosion { pos: a_pos, life: EXPLOSION_LIFE });
        state.explosions.push(Explosion { pos: b_pos, life: EXPLOSION_LIFE });
        state.events.push(GameEvent::Collision {
            a,
            b,
            at: (a_pos + b_pos) * 0.5,
        });
    }
    end_session(state);
    true
}

/// Playing -> GameOver: freeze spawning and drop pointer state
pub fn end_session(state: &mut GameState) {
    let from = state.session.phase;
    if !state.session.end() {
        return;
    }
    if let Some(boat) = state.dragged.take().and_then(|id| state.boats.get_mut(&id)) {
        boat.motion = Motion::Ambient;
    }
    for boat in state.boats.values_mut() {
        boat.selected = false;
    }
    state.events.push(GameEvent::PhaseChanged {
        from,
        to: GamePhase::GameOver,
    });
    log::info!(
        "Game over - score {}, best {}",
        state.session.score,
        state.session.best_score
    );
}

/// Mark docks that currently have a boat inside
pub fn update_dock_occupancy(state: &mut GameState) {
    for dock in &mut state.docks {
        let bounds = dock.bounds();
        dock.occupied = state.boats.values().any(|b| bounds.contains(b.pos));
    }
}

/// Fade transient effects (runs in every phase)
pub fn decay_effects(state: &mut GameState, dt: f32) {
    for warning in &mut state.near_misses {
        warning.fade -= dt;
    }
    state.near_misses.retain(|w| w.fade > 0.0);
    for explosion in &mut state.explosions {
        explosion.life -= dt / EXPLOSION_LIFE;
    }
    state.explosions.retain(|e| e.life > 0.0);
}
