//! Game settings and rules
//!
//! One `Rules` value selects the gameplay variant for a deployment; the rest
//! are player preferences. Both load from JSON, missing fields fall back to
//! defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// How the player steers boats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ControlMode {
    /// Press on a boat, drag it, release over a dock
    #[default]
    Drag,
    /// Click a boat, then click where it should sail
    ClickToPath,
}

impl ControlMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlMode::Drag => "drag",
            ControlMode::ClickToPath => "click_to_path",
        }
    }
}

/// What happens when two boats get too close
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CollisionMode {
    /// Near misses only warn
    #[default]
    Warning,
    /// Touching boats sink and end the run
    Lethal,
}

impl CollisionMode {
    /// Distance under which a pair raises a near-miss warning
    pub fn warning_distance(&self) -> f32 {
        match self {
            CollisionMode::Warning => NEAR_MISS_DISTANCE,
            CollisionMode::Lethal => LETHAL_WARNING_DISTANCE,
        }
    }

    /// Distance under which a pair collides (None = never)
    pub fn lethal_distance(&self) -> Option<f32> {
        match self {
            CollisionMode::Warning => None,
            CollisionMode::Lethal => Some(LETHAL_DISTANCE),
        }
    }
}

/// How a successful delivery is paid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMode {
    /// One unit per delivery, boat stays until empty
    #[default]
    PerUnit,
    /// Whole hold unloaded at once, boat leaves
    Shipment,
}

/// Gameplay variant selection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    pub control: ControlMode,
    pub collision: CollisionMode,
    pub scoring: ScoringMode,
    /// Boats lingering near a matching dock unload on their own
    pub autonomous_docking: bool,
    /// Probability (0-1) that a new boat carries mixed cargo
    pub mixed_chance: f64,
    pub cargo_min: u32,
    pub cargo_max: u32,
    /// Units per second when chasing a pointer or path target
    pub pursuit_speed: f32,
    pub first_spawn_delay: f32,
    pub spawn_interval: f32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            control: ControlMode::Drag,
            collision: CollisionMode::Warning,
            scoring: ScoringMode::PerUnit,
            autonomous_docking: false,
            mixed_chance: MIXED_CHANCE,
            cargo_min: CARGO_MIN,
            cargo_max: CARGO_MAX,
            pursuit_speed: PURSUIT_SPEED,
            first_spawn_delay: FIRST_SPAWN_DELAY,
            spawn_interval: SPAWN_INTERVAL,
        }
    }
}

impl Rules {
    /// Clamp every field into its playable range
    pub fn sanitized(mut self) -> Self {
        self.mixed_chance = if self.mixed_chance.is_finite() {
            self.mixed_chance.clamp(0.0, 1.0)
        } else {
            MIXED_CHANCE
        };
        self.cargo_min = self.cargo_min.clamp(CARGO_MIN, CARGO_MAX);
        self.cargo_max = self.cargo_max.clamp(self.cargo_min, CARGO_MAX);
        if !self.pursuit_speed.is_finite() || self.pursuit_speed <= 0.0 {
            self.pursuit_speed = PURSUIT_SPEED;
        }
        if !self.first_spawn_delay.is_finite() || self.first_spawn_delay < 0.0 {
            self.first_spawn_delay = FIRST_SPAWN_DELAY;
        }
        // Anything shorter floods the harbor in a few frames
        if !self.spawn_interval.is_finite() || self.spawn_interval < 0.25 {
            self.spawn_interval = SPAWN_INTERVAL;
        }
        self
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Gameplay variant
    pub rules: Rules,
    /// RNG seed (None = derive from the clock)
    pub seed: Option<u64>,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Start muted
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rules: Rules::default(),
            seed: None,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    /// Parse settings from JSON (rules are clamped into range)
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.rules = settings.rules.sanitized();
        settings.master_volume = settings.master_volume.clamp(0.0, 1.0);
        settings.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
        Ok(settings)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Load settings from a JSON file, falling back to defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read settings {}: {}", path.display(), e);
                return Self::default();
            }
        };
        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings {}: {} - using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Seed to use for a new run
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0x5EED)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings =
            Settings::from_json(r#"{"rules": {"control": "click_to_path", "collision": "lethal"}}"#)
                .unwrap();
        assert_eq!(settings.rules.control, ControlMode::ClickToPath);
        assert_eq!(settings.rules.collision, CollisionMode::Lethal);
        assert_eq!(settings.rules.scoring, ScoringMode::PerUnit);
        assert_eq!(settings.rules.cargo_max, CARGO_MAX);
        assert_eq!(settings.master_volume, 0.8);
    }

    #[test]
    fn test_out_of_range_rules_are_clamped() {
        let settings = Settings::from_json(
            r#"{"rules": {"cargo_min": 0, "cargo_max": 99, "mixed_chance": 3.0, "pursuit_speed": -5.0}}"#,
        )
        .unwrap();
        assert_eq!(settings.rules.cargo_min, CARGO_MIN);
        assert_eq!(settings.rules.cargo_max, CARGO_MAX);
        assert_eq!(settings.rules.mixed_chance, 1.0);
        assert_eq!(settings.rules.pursuit_speed, PURSUIT_SPEED);
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(Settings::from_json("{ not json").is_err());
    }

    #[test]
    fn test_round_trip() {
        let mut settings = Settings::default();
        settings.rules.scoring = ScoringMode::Shipment;
        settings.seed = Some(7);
        let back = Settings::from_json(&settings.to_json()).unwrap();
        assert_eq!(back.rules.scoring, ScoringMode::Shipment);
        assert_eq!(back.seed, Some(7));
    }

    #[test]
    fn test_lethal_thresholds() {
        assert_eq!(CollisionMode::Warning.lethal_distance(), None);
        assert_eq!(CollisionMode::Warning.warning_distance(), 80.0);
        assert_eq!(CollisionMode::Lethal.lethal_distance(), Some(30.0));
        assert_eq!(CollisionMode::Lethal.warning_distance(), 60.0);
    }
}
