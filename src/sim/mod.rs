//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod input;
pub mod rect;
pub mod session;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{DeliveryOutcome, Proximity, attempt_delivery, classify};
pub use input::{PointerEvent, handle_pointer};
pub use rect::{Rect, Viewport};
pub use session::{DeliveryStats, GamePhase, Session, SessionAction};
pub use spawner::{Edge, Spawner};
pub use state::{
    Boat, BoatId, CargoColor, Cloud, DeliveryTrigger, DespawnReason, Dock, DockColor, DockId,
    Explosion, GameEvent, GameState, HARBOR_LAYOUT, Motion, NearMiss,
};
pub use tick::{TickInput, apply_action, tick};
