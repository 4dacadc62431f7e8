//! Boat spawning
//!
//! One delayed spawn shortly after the session starts, then a steady period
//! measured from the start. New boats enter just outside a random edge.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rect::Viewport;
use super::state::{BoatId, CargoColor, GameState};
use crate::consts::{AMBIENT_SPEED_MAX, SPAWN_EDGE_OFFSET};

/// Screen edge a boat enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

    /// Point `offset` outside this edge, `t` (0-1) along it
    pub fn entry_point(&self, viewport: &Viewport, t: f32, offset: f32) -> Vec2 {
        match self {
            Edge::Top => Vec2::new(viewport.width * t, -offset),
            Edge::Right => Vec2::new(viewport.width + offset, viewport.height * t),
            Edge::Bottom => Vec2::new(viewport.width * t, viewport.height + offset),
            Edge::Left => Vec2::new(-offset, viewport.height * t),
        }
    }
}

/// Spawn countdowns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spawner {
    /// Delay before the one-off opening spawn
    pub first_delay: f32,
    pub interval: f32,
    /// Remaining time until the opening spawn (None once fired)
    first_in: Option<f32>,
    /// Remaining time until the next periodic spawn
    next_in: f32,
    /// Boats spawned this session
    pub spawned: u32,
}

impl Spawner {
    pub fn new(first_delay: f32, interval: f32) -> Self {
        Self {
            first_delay,
            interval,
            first_in: Some(first_delay),
            next_in: interval,
            spawned: 0,
        }
    }

    /// Restart both countdowns (pending spawns are discarded)
    pub fn reset(&mut self) {
        self.first_in = Some(self.first_delay);
        self.next_in = self.interval;
        self.spawned = 0;
    }

    /// Advance the timers, returning how many spawns came due
    pub fn advance(&mut self, dt: f32) -> u32 {
        let mut due = 0;
        if let Some(remaining) = self.first_in.as_mut() {
            *remaining -= dt;
            if *remaining <= 0.0 {
                self.first_in = None;
                due += 1;
            }
        }
        self.next_in -= dt;
        while self.next_in <= 0.0 {
            self.next_in += self.interval;
            due += 1;
        }
        due
    }
}

/// Pick a cargo color: mixed with `mixed_chance`, otherwise red or yellow
pub fn roll_color(rng: &mut impl Rng, mixed_chance: f64) -> CargoColor {
    if rng.random_bool(mixed_chance.clamp(0.0, 1.0)) {
        CargoColor::Mixed
    } else if rng.random_bool(0.5) {
        CargoColor::Red
    } else {
        CargoColor::Yellow
    }
}

/// Cargo units in `[min, max]`
pub fn roll_cargo(rng: &mut impl Rng, min: u32, max: u32) -> u32 {
    rng.random_range(min..=max.max(min))
}

/// Spawn one boat just outside a random edge
pub fn spawn_edge_boat(state: &mut GameState) -> BoatId {
    let viewport = state.viewport;
    let edge = Edge::ALL[state.rng.random_range(0..Edge::ALL.len())];
    let pos = edge.entry_point(&viewport, state.rng.random_range(0.0..=1.0), SPAWN_EDGE_OFFSET);
    let color = roll_color(&mut state.rng, state.rules.mixed_chance);
    let cargo = roll_cargo(&mut state.rng, state.rules.cargo_min, state.rules.cargo_max);
    let vel = Vec2::new(
        state.rng.random_range(-AMBIENT_SPEED_MAX..=AMBIENT_SPEED_MAX),
        state.rng.random_range(-AMBIENT_SPEED_MAX..=AMBIENT_SPEED_MAX),
    );

    let id = state.add_boat(color, cargo, pos, vel);
    state.spawner.spawned += 1;
    log::debug!("Spawned {:?} {:?} x{} at {:?} ({:?})", id, color, cargo, pos, edge);
    id
}

/// Run the spawner for one tick
pub fn update_spawner(state: &mut GameState, dt: f32) {
    let due = state.spawner.advance(dt);
    for _ in 0..due {
        spawn_edge_boat(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{CARGO_MAX, CARGO_MIN, MIXED_CHANCE};
    use crate::settings::Rules;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_schedule() {
        let mut s = Spawner::new(1.0, 3.0);
        assert_eq!(s.advance(0.9), 0);
        assert_eq!(s.advance(0.2), 1); // t=1.1, opening spawn
        assert_eq!(s.advance(1.8), 0); // t=2.9
        assert_eq!(s.advance(0.2), 1); // t=3.1
        assert_eq!(s.advance(3.0), 1); // t=6.1
        assert_eq!(s.advance(6.0), 2); // t=12.1
    }

    #[test]
    fn test_reset_discards_pending() {
        let mut s = Spawner::new(1.0, 3.0);
        s.advance(2.5);
        s.reset();
        assert_eq!(s.advance(0.5), 0);
        assert_eq!(s.advance(0.6), 1);
    }

    #[test]
    fn test_entry_points_are_outside() {
        let vp = Viewport::new(800.0, 600.0);
        assert_eq!(Edge::Top.entry_point(&vp, 0.5, 50.0), Vec2::new(400.0, -50.0));
        assert_eq!(Edge::Right.entry_point(&vp, 0.0, 50.0), Vec2::new(850.0, 0.0));
        assert_eq!(Edge::Bottom.entry_point(&vp, 1.0, 50.0), Vec2::new(800.0, 650.0));
        assert_eq!(Edge::Left.entry_point(&vp, 0.5, 50.0), Vec2::new(-50.0, 300.0));
    }

    #[test]
    fn test_color_distribution_extremes() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..50 {
            assert_eq!(roll_color(&mut rng, 1.0), CargoColor::Mixed);
            assert_ne!(roll_color(&mut rng, 0.0), CargoColor::Mixed);
        }
    }

    #[test]
    fn test_default_color_weights() {
        let mut rng = Pcg32::seed_from_u64(2024);
        let rolls = 10_000;
        let (mut red, mut yellow, mut mixed) = (0u32, 0u32, 0u32);
        for _ in 0..rolls {
            match roll_color(&mut rng, MIXED_CHANCE) {
                CargoColor::Red => red += 1,
                CargoColor::Yellow => yellow += 1,
                CargoColor::Mixed => mixed += 1,
            }
        }
        let share = |n: u32| n as f64 / rolls as f64;
        // 30% mixed, the rest split evenly (35% each)
        assert!((share(mixed) - 0.30).abs() < 0.03, "mixed share {}", share(mixed));
        assert!((share(red) - 0.35).abs() < 0.03, "red share {}", share(red));
        assert!((share(yellow) - 0.35).abs() < 0.03, "yellow share {}", share(yellow));
        let solid = (red + yellow) as f64;
        assert!((red as f64 / solid - 0.5).abs() < 0.03);
    }

    #[test]
    fn test_spawned_boats_in_range() {
        let mut state = GameState::new(42, Rules::default(), Viewport::new(800.0, 600.0));
        for _ in 0..100 {
            let id = spawn_edge_boat(&mut state);
            let boat = state.boat(id).unwrap();
            assert!((CARGO_MIN..=CARGO_MAX).contains(&boat.cargo));
            // Exactly one coordinate sits on the 50-unit offset line
            let p = boat.pos;
            let on_edge = p.y == -50.0 || p.x == 850.0 || p.y == 650.0 || p.x == -50.0;
            assert!(on_edge, "unexpected spawn position {:?}", p);
            assert!(!state.viewport.is_beyond(p, 100.0));
        }
        assert_eq!(state.spawner.spawned, 100);
    }

    #[test]
    fn test_same_seed_same_boats() {
        let mut a = GameState::new(99, Rules::default(), Viewport::default());
        let mut b = GameState::new(99, Rules::default(), Viewport::default());
        for _ in 0..10 {
            let ia = spawn_edge_boat(&mut a);
            let ib = spawn_edge_boat(&mut b);
            let (ba, bb) = (a.boat(ia).unwrap(), b.boat(ib).unwrap());
            assert_eq!(ba.pos, bb.pos);
            assert_eq!(ba.color, bb.color);
            assert_eq!(ba.cargo, bb.cargo);
        }
    }
}
