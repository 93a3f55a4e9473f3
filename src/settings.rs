//! Player preferences
//!
//! Kept apart from `Tuning`: these change how the game feels to one player,
//! not how the simulation plays.

use serde::{Deserialize, Serialize};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    /// Name used on the command line and in run summaries
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "low",
            QualityPreset::Medium => "medium",
            QualityPreset::High => "high",
        }
    }

    /// Case-insensitive inverse of [`as_str`](Self::as_str)
    pub fn parse(name: &str) -> Option<Self> {
        [QualityPreset::Low, QualityPreset::Medium, QualityPreset::High]
            .into_iter()
            .find(|preset| preset.as_str().eq_ignore_ascii_case(name.trim()))
    }

    /// Maximum live particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 300,
            QualityPreset::Medium => 1500,
            QualityPreset::High => 4000,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Particle budget preset
    pub quality: QualityPreset,

    // === Controls ===
    /// Radians of look rotation per pointer unit
    pub look_sensitivity: f32,
    /// Flip vertical look
    pub invert_pitch: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            look_sensitivity: 0.002,
            invert_pitch: false,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        self.quality.max_particles()
    }

    /// Convert a raw pointer movement into (yaw, pitch) deltas in radians.
    ///
    /// Moving the pointer right turns the view right (negative yaw); moving it
    /// down pitches the view down.
    pub fn look_delta(&self, pointer_dx: f32, pointer_dy: f32) -> (f32, f32) {
        let pitch_sign = if self.invert_pitch { 1.0 } else { -1.0 };
        (
            -pointer_dx * self.look_sensitivity,
            pitch_sign * pointer_dy * self.look_sensitivity,
        )
    }
}
