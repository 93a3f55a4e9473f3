//! Sound cues
//!
//! The simulation never waits on audio. Cues whose sample has not finished
//! loading are dropped, as are cues played while muted.

use std::collections::HashSet;

use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Projectile fired
    Shoot,
    /// Target destroyed
    Explosion,
    /// Power-up collected
    PowerUp,
}

impl SoundEffect {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundEffect::Shoot => "shoot",
            SoundEffect::Explosion => "explosion",
            SoundEffect::PowerUp => "powerup",
        }
    }
}

/// Fire-and-forget cue sink
pub trait AudioCue {
    fn play(&mut self, effect: SoundEffect);
}

/// Output device the manager hands ready cues to
pub trait AudioBackend {
    fn start(&mut self, effect: SoundEffect, volume: f32);
}

/// Volume, mute and sample readiness in front of an `AudioBackend`
pub struct AudioManager<B: AudioBackend> {
    backend: B,
    loaded: HashSet<SoundEffect>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl<B: AudioBackend> AudioManager<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            loaded: HashSet::new(),
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Apply the audio part of the player's settings
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_master_volume(settings.master_volume);
        self.set_sfx_volume(settings.sfx_volume);
        self.set_muted(settings.muted);
    }

    /// Record that the sample for `effect` is ready to play
    pub fn mark_loaded(&mut self, effect: SoundEffect) {
        self.loaded.insert(effect);
    }

    pub fn is_loaded(&self, effect: SoundEffect) -> bool {
        self.loaded.contains(&effect)
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

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: AudioBackend> AudioCue for AudioManager<B> {
    fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        if !self.is_loaded(effect) {
            log::warn!("Skipping '{}' cue: sample not loaded", effect.as_str());
            return;
        }
        self.backend.start(effect, vol);
    }
}

/// Backend that only logs, for headless runs
#[derive(Debug, Clone, Default)]
pub struct LogBackend {
    pub played: Vec<SoundEffect>,
}

impl AudioBackend for LogBackend {
    fn start(&mut self, effect: SoundEffect, volume: f32) {
        log::trace!("audio: {} at {:.2}", effect.as_str(), volume);
        self.played.push(effect);
    }
}
