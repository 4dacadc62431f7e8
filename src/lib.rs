//! Port Pilot - A harbor traffic arcade game
//!
//! Core modules:
//! - `sim`: Simulation (boats, docks, input, collisions, session state)
//! - `game`: Frame driver that feeds the simulation and forwards events
//! - `audio`: Sound cues and pluggable playback backend
//! - `settings`: Rules variant selection and preferences

pub mod audio;
pub mod game;
pub mod settings;
pub mod sim;

pub use audio::{AudioBackend, AudioManager, SoundEffect};
pub use game::Game;
pub use settings::{CollisionMode, ControlMode, Rules, ScoringMode, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Nominal frame time (60 Hz)
    pub const NOMINAL_DT: f32 = 0.016;
    /// Longest frame we integrate in one tick (tab switches, debugger pauses)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Default viewport
    pub const DEFAULT_VIEWPORT_WIDTH: f32 = 800.0;
    pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 600.0;

    /// Spawning
    pub const FIRST_SPAWN_DELAY: f32 = 1.0;
    pub const SPAWN_INTERVAL: f32 = 3.0;
    /// Boats appear this far outside the chosen edge
    pub const SPAWN_EDGE_OFFSET: f32 = 50.0;
    /// Ambient drift, per axis (units/s)
    pub const AMBIENT_SPEED_MAX: f32 = 50.0;
    /// Chance a new boat carries mixed cargo
    pub const MIXED_CHANCE: f64 = 0.3;

    /// Cargo bounds (units per boat)
    pub const CARGO_MIN: u32 = 2;
    pub const CARGO_MAX: u32 = 5;

    /// Speed when chasing the pointer or a path target (units/s)
    pub const PURSUIT_SPEED: f32 = 110.0;
    /// Closer than this counts as arrived
    pub const ARRIVAL_EPSILON: f32 = 5.0;
    /// Boats further than this past any edge are pruned
    pub const OFFSCREEN_MARGIN: f32 = 100.0;

    /// Drag-mode hit box
    pub const DRAG_HITBOX_WIDTH: f32 = 60.0;
    pub const DRAG_HITBOX_HEIGHT: f32 = 40.0;
    /// Click-to-path hull, length scales with cargo
    pub const HULL_MIN_LENGTH: f32 = 20.0;
    pub const HULL_MAX_LENGTH: f32 = 50.0;
    pub const HULL_WIDTH: f32 = 12.0;

    /// Dock footprint
    pub const DOCK_WIDTH: f32 = 80.0;
    pub const DOCK_HEIGHT: f32 = 60.0;
    /// Autonomous docking radius around the dock center
    pub const DOCK_CAPTURE_RADIUS: f32 = 40.0;
    /// Seconds between autonomous delivery attempts for one boat
    pub const DOCK_COOLDOWN: f32 = 2.0;

    /// Warning-only collision variant
    pub const NEAR_MISS_DISTANCE: f32 = 80.0;
    /// Lethal collision variant
    pub const LETHAL_DISTANCE: f32 = 30.0;
    pub const LETHAL_WARNING_DISTANCE: f32 = 60.0;

    /// Effect lifetimes (seconds)
    pub const NEAR_MISS_FADE: f32 = 1.0;
    pub const EXPLOSION_LIFE: f32 = 1.0;

    /// Points per delivered cargo unit
    pub const POINTS_RED: u64 = 40;
    pub const POINTS_YELLOW: u64 = 10;
    pub const POINTS_MIXED: u64 = 25;

    /// Cloud decoration
    pub const CLOUD_COUNT: usize = 5;
    pub const CLOUD_WRAP_MARGIN: f32 = 100.0;
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Angle (radians) of the vector pointing from `from` to `to`
#[inline]
pub fn angle_to(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Clamp that tolerates inverted bounds (returns `min` in that case)
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.min(max).max(min)
}

/// Linear interpolation between `start` and `end`
#[inline]
pub fn lerp(start: f32, end: f32, t: f32) -> f32 {
    start + (end - start) * t
}
