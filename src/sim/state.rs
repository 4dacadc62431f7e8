//! Game state and core simulation types
//!
//! Entities are plain records keyed by id. Anything that refers to another
//! entity stores its id and resolves it through `GameState` at time of use.

use std::collections::BTreeMap;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::{Rect, Viewport};
use super::session::{GamePhase, Session};
use super::spawner::Spawner;
use crate::consts::*;
use crate::settings::{ControlMode, Rules};
use crate::{angle_to, clamp, lerp};

/// Boat identifier (allocation order = age)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BoatId(pub u32);

/// Dock identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DockId(pub u32);

/// Cargo carried by a boat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CargoColor {
    Red,
    Yellow,
    /// Accepted by any dock
    Mixed,
}

impl CargoColor {
    /// Points per delivered unit
    pub fn unit_value(&self) -> u64 {
        match self {
            CargoColor::Red => POINTS_RED,
            CargoColor::Yellow => POINTS_YELLOW,
            CargoColor::Mixed => POINTS_MIXED,
        }
    }

    pub fn fits(&self, dock: DockColor) -> bool {
        match self {
            CargoColor::Mixed => true,
            CargoColor::Red => dock == DockColor::Red,
            CargoColor::Yellow => dock == DockColor::Yellow,
        }
    }
}

/// Color a dock accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DockColor {
    Red,
    Yellow,
}

/// How a boat is currently moving
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Motion {
    /// Drifting with its ambient velocity
    Ambient,
    /// Chasing the live pointer position
    Dragged { pointer: Vec2 },
    /// Sailing to a clicked point, optionally unloading at a dock there
    Path { target: Vec2, dock: Option<DockId> },
}

/// Reported by `Boat::update` when a path target is reached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arrival {
    pub boat: BoatId,
    pub dock: Option<DockId>,
}

/// A cargo boat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boat {
    pub id: BoatId,
    pub color: CargoColor,
    /// Units still aboard
    pub cargo: u32,
    pub pos: Vec2,
    /// Facing (radians), for rendering only
    pub heading: f32,
    pub motion: Motion,
    pub ambient_vel: Vec2,
    /// Click-to-path selection ring
    pub selected: bool,
    /// Seconds until the next autonomous delivery attempt
    #[serde(default)]
    pub dock_cooldown: f32,
}

impl Boat {
    /// Cargo is clamped to the legal range
    pub fn new(id: BoatId, color: CargoColor, cargo: u32, pos: Vec2, ambient_vel: Vec2) -> Self {
        let heading = if ambient_vel.length_squared() > 0.0 {
            ambient_vel.y.atan2(ambient_vel.x)
        } else {
            0.0
        };
        Self {
            id,
            color,
            cargo: cargo.clamp(CARGO_MIN, CARGO_MAX),
            pos,
            heading,
            motion: Motion::Ambient,
            ambient_vel,
            selected: false,
            dock_cooldown: 0.0,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.motion, Motion::Dragged { .. })
    }

    /// Advance one tick. Returns the arrival if a path target was reached.
    pub fn update(&mut self, dt: f32, pursuit_speed: f32) -> Option<Arrival> {
        self.dock_cooldown = (self.dock_cooldown - dt).max(0.0);

        match self.motion {
            Motion::Ambient => {
                self.pos += self.ambient_vel * dt;
                if self.ambient_vel.length_squared() > 0.0 {
                    self.heading = self.ambient_vel.y.atan2(self.ambient_vel.x);
                }
                None
            }
            Motion::Dragged { pointer } => {
                self.pursue(pointer, pursuit_speed * dt);
                None
            }
            Motion::Path { target, dock } => {
                let arrived = self.pursue(target, pursuit_speed * dt);
                if !arrived {
                    return None;
                }
                self.motion = Motion::Ambient;
                Some(Arrival { boat: self.id, dock })
            }
        }
    }

    /// Step toward `target` by at most `max_step` without overshooting.
    /// Returns true once within the arrival radius.
    fn pursue(&mut self, target: Vec2, max_step: f32) -> bool {
        let to_target = target - self.pos;
        let dist = to_target.length();
        if dist < ARRIVAL_EPSILON {
            return true;
        }
        let step = max_step.min(dist);
        self.heading = angle_to(self.pos, target);
        self.pos += to_target / dist * step;
        dist - step < ARRIVAL_EPSILON
    }

    /// Beyond the viewport by more than `margin`. Dragged boats never are.
    pub fn is_off_screen(&self, viewport: &Viewport, margin: f32) -> bool {
        !self.is_dragging() && viewport.is_beyond(self.pos, margin)
    }

    /// Unload one unit. Returns true if the hold is (or already was) empty.
    pub fn deliver_one(&mut self) -> bool {
        if self.cargo > 0 {
            self.cargo -= 1;
        }
        self.cargo == 0
    }

    /// Unload everything, returning how many units were aboard
    pub fn unload_all(&mut self) -> u32 {
        std::mem::take(&mut self.cargo)
    }

    /// Hull length for click-to-path boats (longer with more cargo)
    pub fn hull_length(&self) -> f32 {
        let t = (self.cargo as f32 - CARGO_MIN as f32) / (CARGO_MAX - CARGO_MIN) as f32;
        lerp(HULL_MIN_LENGTH, HULL_MAX_LENGTH, clamp(t, 0.0, 1.0))
    }

    /// Pointer hit region for the given control scheme
    pub fn hitbox(&self, control: ControlMode) -> Rect {
        match control {
            ControlMode::Drag => {
                Rect::from_center_size(self.pos, DRAG_HITBOX_WIDTH, DRAG_HITBOX_HEIGHT)
            }
            ControlMode::ClickToPath => {
                Rect::from_center_size(self.pos, self.hull_length(), HULL_WIDTH)
            }
        }
    }
}

/// A delivery dock
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dock {
    pub id: DockId,
    pub color: DockColor,
    pub pos: Vec2,
    /// Some boat is inside the footprint (display only)
    pub occupied: bool,
}

impl Dock {
    pub fn bounds(&self) -> Rect {
        Rect::from_center_size(self.pos, DOCK_WIDTH, DOCK_HEIGHT)
    }

    pub fn accepts(&self, color: CargoColor) -> bool {
        color.fits(self.color)
    }
}

/// Three berths of one red and one yellow dock each, as viewport fractions
pub const HARBOR_LAYOUT: [(DockColor, f32, f32); 6] = [
    (DockColor::Red, 0.15, 0.2),
    (DockColor::Yellow, 0.25, 0.2),
    (DockColor::Red, 0.45, 0.5),
    (DockColor::Yellow, 0.55, 0.5),
    (DockColor::Red, 0.75, 0.8),
    (DockColor::Yellow, 0.85, 0.8),
];

/// Drifting cloud (decoration)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cloud {
    pub pos: Vec2,
    pub vel: Vec2,
    pub scale: f32,
}

impl Cloud {
    /// Drift up-left, wrapping back in from the far side
    pub fn update(&mut self, dt: f32, viewport: &Viewport) {
        self.pos += self.vel * dt;
        if self.pos.x < -CLOUD_WRAP_MARGIN {
            self.pos.x = viewport.width + CLOUD_WRAP_MARGIN;
        }
        if self.pos.y < -CLOUD_WRAP_MARGIN {
            self.pos.y = viewport.height + CLOUD_WRAP_MARGIN;
        }
    }
}

/// Two boats uncomfortably close
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearMiss {
    pub a: BoatId,
    pub b: BoatId,
    pub a_pos: Vec2,
    pub b_pos: Vec2,
    /// Seconds left; held at 1.0 while the pair is in range
    pub fade: f32,
    /// In range at the last scan
    pub active: bool,
}

/// Wreck flash after a lethal collision
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub pos: Vec2,
    /// 0-1, decreases over time
    pub life: f32,
}

/// Why a boat left the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DespawnReason {
    /// Cargo fully delivered
    Delivered,
    /// Drifted out of the harbor
    OffScreen,
}

/// What a delivery attempt was triggered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliveryTrigger {
    /// Drag released over the dock
    Release,
    /// Path target reached
    Arrival,
    /// Lingering near the dock
    Proximity,
}

/// Things that happened during a tick, for audio and effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PhaseChanged { from: GamePhase, to: GamePhase },
    BoatSpawned { boat: BoatId, color: CargoColor, cargo: u32 },
    BoatDespawned { boat: BoatId, reason: DespawnReason },
    Delivered {
        boat: BoatId,
        dock: DockId,
        color: CargoColor,
        units: u32,
        points: u64,
        depleted: bool,
        trigger: DeliveryTrigger,
    },
    NearMiss { a: BoatId, b: BoatId, distance: f32 },
    Collision { a: BoatId, b: BoatId, at: Vec2 },
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub rules: Rules,
    pub viewport: Viewport,
    pub session: Session,
    pub boats: BTreeMap<BoatId, Boat>,
    /// Fixed for the session, in layout order
    pub docks: Vec<Dock>,
    pub clouds: Vec<Cloud>,
    pub near_misses: Vec<NearMiss>,
    pub explosions: Vec<Explosion>,
    pub spawner: Spawner,
    /// Boat currently held by the pointer (drag mode)
    pub dragged: Option<BoatId>,
    /// Seconds of Playing time this session
    pub time: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events raised since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a new game state in the menu
    pub fn new(seed: u64, rules: Rules, viewport: Viewport) -> Self {
        let rules = rules.sanitized();
        let spawner = Spawner::new(rules.first_spawn_delay, rules.spawn_interval);
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            rules,
            viewport,
            session: Session::new(),
            boats: BTreeMap::new(),
            docks: Vec::new(),
            clouds: Vec::new(),
            near_misses: Vec::new(),
            explosions: Vec::new(),
            spawner,
            dragged: None,
            time: 0.0,
            time_ticks: 0,
            events: Vec::new(),
            next_id: 1,
        };
        state.reset_world();
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Rebuild docks and clouds, drop boats and effects, restart spawn timers
    pub fn reset_world(&mut self) {
        self.boats.clear();
        self.near_misses.clear();
        self.explosions.clear();
        self.dragged = None;
        self.time = 0.0;
        self.spawner.reset();

        let viewport = self.viewport;
        self.docks = HARBOR_LAYOUT
            .iter()
            .map(|&(color, fx, fy)| Dock {
                id: DockId(self.next_entity_id()),
                color,
                pos: viewport.at(fx, fy),
                occupied: false,
            })
            .collect();

        self.clouds = (0..CLOUD_COUNT)
            .map(|_| Cloud {
                pos: Vec2::new(
                    self.rng.random_range(0.0..=viewport.width),
                    self.rng.random_range(0.0..=viewport.height * 0.3),
                ),
                vel: Vec2::new(
                    self.rng.random_range(-30.0..=-10.0),
                    self.rng.random_range(-20.0..=-5.0),
                ),
                scale: self.rng.random_range(0.8..=1.5),
            })
            .collect();
    }

    /// Register a boat and return its id
    pub fn add_boat(
        &mut self,
        color: CargoColor,
        cargo: u32,
        pos: Vec2,
        ambient_vel: Vec2,
    ) -> BoatId {
        let id = BoatId(self.next_entity_id());
        let boat = Boat::new(id, color, cargo, pos, ambient_vel);
        self.events.push(GameEvent::BoatSpawned {
            boat: id,
            color,
            cargo: boat.cargo,
        });
        self.boats.insert(id, boat);
        id
    }

    /// Remove a boat and drop any pointer state that referenced it
    pub fn remove_boat(&mut self, id: BoatId, reason: DespawnReason) -> Option<Boat> {
        let boat = self.boats.remove(&id)?;
        if self.dragged == Some(id) {
            self.dragged = None;
        }
        if self.session.selected_boat == Some(id) {
            self.session.selected_boat = None;
        }
        self.events.push(GameEvent::BoatDespawned { boat: id, reason });
        Some(boat)
    }

    pub fn boat(&self, id: BoatId) -> Option<&Boat> {
        self.boats.get(&id)
    }

    pub fn boat_mut(&mut self, id: BoatId) -> Option<&mut Boat> {
        self.boats.get_mut(&id)
    }

    pub fn dock(&self, id: DockId) -> Option<&Dock> {
        self.docks.iter().find(|d| d.id == id)
    }

    /// First dock (layout order) whose footprint contains `pos`
    pub fn dock_at(&self, pos: Vec2) -> Option<&Dock> {
        self.docks.iter().find(|d| d.bounds().contains(pos))
    }

    /// Oldest boat whose hit box contains `pos`
    pub fn boat_at(&self, pos: Vec2) -> Option<BoatId> {
        let control = self.rules.control;
        self.boats
            .values()
            .find(|b| b.hitbox(control).contains(pos))
            .map(|b| b.id)
    }

    /// Resize the play area. Docks keep their positions for the session.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        if viewport != self.viewport {
            log::debug!("Viewport {}x{}", viewport.width, viewport.height);
            self.viewport = viewport;
        }
    }

    pub fn is_playing(&self) -> bool {
        self.session.phase == GamePhase::Playing
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
