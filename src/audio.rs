//! Sound cues
//!
//! The simulation raises events; this module maps them to short sound effects
//! and hands them to a pluggable backend. Playback failures never reach the
//! game loop.

use std::fmt;

use crate::sim::state::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Cargo delivered
    Success,
    /// Two boats came too close
    Warning,
    /// Boats collided
    Alarm,
}

impl SoundEffect {
    pub fn name(&self) -> &'static str {
        match self {
            SoundEffect::Success => "success",
            SoundEffect::Warning => "warning",
            SoundEffect::Alarm => "alarm",
        }
    }
}

/// Sound for a simulation event, if it has one
pub fn cue_for(event: &GameEvent) -> Option<SoundEffect> {
    match event {
        GameEvent::Delivered { .. } => Some(SoundEffect::Success),
        GameEvent::NearMiss { .. } => Some(SoundEffect::Warning),
        GameEvent::Collision { .. } => Some(SoundEffect::Alarm),
        _ => None,
    }
}

/// Why a backend could not play a sound
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioError {
    /// No output device or context
    Unavailable,
    /// Asset missing or undecodable
    MissingAsset(String),
    /// Device-specific failure
    Backend(String),
}

impl fmt::Display for AudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioError::Unavailable => write!(f, "audio output unavailable"),
            AudioError::MissingAsset(name) => write!(f, "missing sound asset '{}'", name),
            AudioError::Backend(msg) => write!(f, "audio backend error: {}", msg),
        }
    }
}

impl std::error::Error for AudioError {}

/// Something that can actually make noise
pub trait AudioBackend {
    /// Start playing `effect` at `volume` (0.0 - 1.0). Must not block.
    fn play(&mut self, effect: SoundEffect, volume: f32) -> Result<(), AudioError>;
}

/// Backend that only logs (headless runs, tests)
#[derive(Debug, Default)]
pub struct SilentBackend;

impl AudioBackend for SilentBackend {
    fn play(&mut self, effect: SoundEffect, volume: f32) -> Result<(), AudioError> {
        log::trace!("sfx {} @ {:.2}", effect.name(), volume);
        Ok(())
    }
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Box<dyn AudioBackend>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(Box::new(SilentBackend))
    }
}

impl AudioManager {
    pub fn new(backend: Box<dyn AudioBackend>) -> Self {
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Flip mute, returning the new state
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        if let Err(e) = self.backend.play(effect, vol) {
            log::warn!("Could not play {}: {}", effect.name(), e);
        }
    }

    /// Play the cue for every event that has one
    pub fn play_events(&mut self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(cue_for) {
            self.play(effect);
        }
    }
}
