//! Session state: phase, score, best score and running statistics
//!
//! Owned by `GameState`; the presentation layer only reads it. Best score and
//! statistics outlive resets but not the process.

use serde::{Deserialize, Serialize};

use super::state::{BoatId, CargoColor};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GamePhase {
    /// Title screen
    #[default]
    Menu,
    /// Active gameplay
    Playing,
    /// Run ended by a collision
    GameOver,
}

/// Explicit player actions that move between phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionAction {
    /// Menu -> Playing
    Start,
    /// GameOver (or Playing) -> Playing
    PlayAgain,
    /// Any -> Menu
    MainMenu,
}

/// Totals kept across resets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryStats {
    /// Successful delivery events
    pub deliveries: u32,
    /// Cargo units unloaded
    pub units: u32,
    pub red_units: u32,
    pub yellow_units: u32,
    pub mixed_units: u32,
    pub sessions_played: u32,
    pub collisions: u32,
}

impl DeliveryStats {
    pub fn record(&mut self, color: CargoColor, units: u32) {
        self.deliveries += 1;
        self.units += units;
        match color {
            CargoColor::Red => self.red_units += units,
            CargoColor::Yellow => self.yellow_units += units,
            CargoColor::Mixed => self.mixed_units += units,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub phase: GamePhase,
    pub score: u64,
    pub best_score: u64,
    /// Boat the player is interacting with (Playing only)
    pub selected_boat: Option<BoatId>,
    pub stats: DeliveryStats,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add points; returns true if this set a new best
    pub fn award(&mut self, points: u64) -> bool {
        self.score += points;
        self.update_best()
    }

    /// Fold the current score into the best score
    pub fn update_best(&mut self) -> bool {
        if self.score > self.best_score {
            self.best_score = self.score;
            true
        } else {
            false
        }
    }

    /// Whether `action` is legal from the current phase
    pub fn accepts(&self, action: SessionAction) -> bool {
        match action {
            SessionAction::Start => self.phase == GamePhase::Menu,
            SessionAction::PlayAgain => {
                matches!(self.phase, GamePhase::GameOver | GamePhase::Playing)
            }
            SessionAction::MainMenu => true,
        }
    }

    /// Apply a phase action, returning the new phase (None if rejected).
    /// The caller rebuilds the world when this returns Some.
    pub fn apply(&mut self, action: SessionAction) -> Option<GamePhase> {
        if !self.accepts(action) {
            return None;
        }
        let next = match action {
            SessionAction::Start | SessionAction::PlayAgain => GamePhase::Playing,
            SessionAction::MainMenu => GamePhase::Menu,
        };
        // A restart from Playing continues the count of the run it replaces
        let resumed = self.phase == GamePhase::Playing;
        self.reset(next);
        if next == GamePhase::Playing && !resumed {
            self.stats.sessions_played += 1;
        }
        Some(next)
    }

    /// Playing -> GameOver
    pub fn end(&mut self) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        self.phase = GamePhase::GameOver;
        self.selected_boat = None;
        self.stats.collisions += 1;
        self.update_best();
        true
    }

    fn reset(&mut self, phase: GamePhase) {
        self.update_best();
        self.score = 0;
        self.selected_boat = None;
        self.phase = phase;
    }
}
