//! Frame driver
//!
//! Collects host input between frames, runs one simulation tick per frame and
//! forwards the resulting events to audio and back to the caller.

use glam::Vec2;

use crate::audio::{AudioBackend, AudioManager};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, PointerEvent, SessionAction, TickInput, Viewport, tick};

/// Game instance holding all state
pub struct Game {
    state: GameState,
    audio: AudioManager,
    input: TickInput,
}

impl Game {
    pub fn new(settings: &Settings, backend: Box<dyn AudioBackend>) -> Self {
        let seed = settings.resolve_seed();
        log::info!("New game (seed {}, {:?})", seed, settings.rules.control);

        let mut audio = AudioManager::new(backend);
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_muted(settings.muted);

        Self {
            state: GameState::new(seed, settings.rules.clone(), Viewport::default()),
            audio,
            input: TickInput::default(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn audio(&self) -> &AudioManager {
        &self.audio
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.input.pointer.push(PointerEvent::Down(Vec2::new(x, y)));
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.input.pointer.push(PointerEvent::Move(Vec2::new(x, y)));
    }

    pub fn pointer_up(&mut self, x: f32, y: f32) {
        self.input.pointer.push(PointerEvent::Up(Vec2::new(x, y)));
    }

    pub fn start(&mut self) {
        self.input.action = Some(SessionAction::Start);
    }

    pub fn play_again(&mut self) {
        self.input.action = Some(SessionAction::PlayAgain);
    }

    pub fn main_menu(&mut self) {
        self.input.action = Some(SessionAction::MainMenu);
    }

    /// Returns the new mute state
    pub fn toggle_mute(&mut self) -> bool {
        let muted = self.audio.toggle_mute();
        log::info!("Audio {}", if muted { "muted" } else { "unmuted" });
        muted
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.input.viewport = Some(Viewport::new(width, height));
    }

    /// Let the autopilot play (attract mode, headless runs)
    pub fn set_autopilot(&mut self, on: bool) {
        self.input.autopilot = on;
    }

    /// Run one frame of `dt` seconds and return what happened
    pub fn update(&mut self, dt: f32) -> Vec<GameEvent> {
        tick(&mut self.state, &self.input, dt);

        // Clear one-shot inputs after processing
        self.input.pointer.clear();
        self.input.action = None;
        self.input.viewport = None;

        let events = self.state.drain_events();
        self.audio.play_events(&events);
        events
    }
}
