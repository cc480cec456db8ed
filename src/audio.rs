//! Sound effect triggers
//!
//! The simulation only reports events; this module decides which of them
//! make a sound and hands the effect to a fire-and-forget backend.

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Burger hit by a cabbage or a cabbage shot
    BurgerDamage,
    /// Burger health reached zero
    BurgerDeath,
    /// Burger fired french fries
    BurgerShot,
    /// Cabbage destroyed
    Explosion,
    /// Cabbage hit a wall or another cabbage
    CabbageBounce,
    /// Cabbage fired
    CabbageShot,
}

impl SoundEffect {
    /// Content name of the sound asset
    pub fn asset_name(&self) -> &'static str {
        match self {
            SoundEffect::BurgerDamage => "Sounds/BurgerDamage",
            SoundEffect::BurgerDeath => "Sounds/BurgerDeath",
            SoundEffect::BurgerShot => "Sounds/BurgerShot",
            SoundEffect::Explosion => "Sounds/Explosion",
            SoundEffect::CabbageBounce => "Sounds/CabbageBounce",
            SoundEffect::CabbageShot => "Sounds/CabbageShot",
        }
    }

    /// The sound a simulation event should make, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::CabbageBounced => Some(SoundEffect::CabbageBounce),
            GameEvent::CabbageShot => Some(SoundEffect::CabbageShot),
            GameEvent::BurgerShot => Some(SoundEffect::BurgerShot),
            GameEvent::ExplosionStarted => Some(SoundEffect::Explosion),
            GameEvent::BurgerDamaged { .. } => Some(SoundEffect::BurgerDamage),
            GameEvent::BurgerDied => Some(SoundEffect::BurgerDeath),
            GameEvent::PhaseChanged { .. }
            | GameEvent::KetchupPlanted
            | GameEvent::CabbageDestroyed { .. }
            | GameEvent::RunFinished { .. }
            | GameEvent::QuitRequested => None,
        }
    }
}

/// Playback backend; must not block
pub trait AudioPlayer {
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Backend that only logs what would have played
#[derive(Debug, Default)]
pub struct LogAudio;

impl AudioPlayer for LogAudio {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::debug!("Sound {:?} at volume {:.2}", effect, volume);
    }
}

/// Audio manager for the game
pub struct AudioManager<P: AudioPlayer> {
    player: P,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl<P: AudioPlayer> AudioManager<P> {
    pub fn new(player: P) -> Self {
        Self {
            player,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Manager with volumes taken from user settings
    pub fn from_settings(player: P, settings: &Settings) -> Self {
        let mut manager = Self::new(player);
        manager.set_master_volume(settings.master_volume);
        manager.set_sfx_volume(settings.sfx_volume);
        manager.set_muted(settings.muted);
        manager
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect (silently skipped when muted)
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.player.play(effect, vol);
    }

    /// Play whatever sound the event calls for
    pub fn handle_event(&mut self, event: &GameEvent) {
        if let Some(effect) = SoundEffect::for_event(event) {
            self.play(effect);
        }
    }

    pub fn player(&self) -> &P {
        &self.player
    }
}
