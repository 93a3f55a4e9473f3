//! Data-driven game balance
//!
//! Every gameplay number the simulation reads lives here so a JSON file can
//! override any subset of them. Rates are per second at the 60 Hz step.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Gameplay tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Arena ===
    /// Side length of the square arena on level 1
    pub arena_start_size: f32,
    /// Arena size multiplier applied on every level-up
    pub arena_growth: f32,
    /// Wall thickness (targets stay clear of it)
    pub wall_thickness: f32,

    // === Targets ===
    /// Targets per level (wave size = level * this)
    pub targets_per_level: u32,
    /// Starting health of each target
    pub target_health: i32,
    /// Health bars show when the player is closer than this
    pub health_bar_distance: f32,
    /// Health bars show for this long after a hit (ms)
    pub health_bar_hit_window_ms: f64,

    // === Player ===
    pub base_speed: f32,
    pub run_speed: f32,
    /// Upward velocity applied on jump
    pub jump_impulse: f32,
    pub gravity: f32,
    /// Instant forward offset applied by a dash
    pub dash_distance: f32,
    pub dash_cooldown_ms: f64,

    // === Projectiles ===
    pub projectile_speed: f32,
    pub projectile_lifetime_ms: f64,
    /// Projectile-to-target-centre distance that counts as a hit
    pub hit_radius: f32,
    /// Damage per hit before any power-ups
    pub base_damage: u32,

    // === Progression ===
    /// Time the level-complete banner is shown before the next level starts (ms)
    pub level_transition_ms: f64,

    // === Power-up ===
    /// Minimum distance from the player for a freshly spawned power-up
    pub powerup_exclusion_radius: f32,
    pub pickup_radius: f32,
    pub bob_amplitude: f32,
    pub bob_speed: f32,
    /// Chance per step of emitting an ambient spark
    pub spark_chance: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arena_start_size: 50.0,
            arena_growth: 1.1,
            wall_thickness: 0.4,

            targets_per_level: 10,
            target_health: 100,
            health_bar_distance: 15.0,
            health_bar_hit_window_ms: 2000.0,

            base_speed: 6.0,
            run_speed: 18.0,
            jump_impulse: 18.0,
            gravity: 28.8,
            dash_distance: 0.5,
            dash_cooldown_ms: 1000.0,

            projectile_speed: 30.0,
            projectile_lifetime_ms: 2000.0,
            hit_radius: 0.6,
            base_damage: 10,

            level_transition_ms: 2000.0,

            powerup_exclusion_radius: 5.0,
            pickup_radius: 1.5,
            bob_amplitude: 0.5,
            bob_speed: 2.0,
            spark_chance: 0.02,
        }
    }
}

/// Why a tuning file was rejected
#[derive(Debug)]
pub enum TuningError {
    /// The file was not valid JSON for `Tuning`
    Parse(serde_json::Error),
    /// A field holds a value the simulation cannot run with
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Parse(e) => write!(f, "malformed tuning file: {e}"),
            TuningError::Invalid { field, reason } => write!(f, "invalid tuning `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Parse(e) => Some(e),
            TuningError::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would stall or break the simulation
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive: [(&'static str, f64); 12] = [
            ("arena_start_size", self.arena_start_size as f64),
            ("arena_growth", self.arena_growth as f64),
            ("base_speed", self.base_speed as f64),
            ("run_speed", self.run_speed as f64),
            ("gravity", self.gravity as f64),
            ("projectile_speed", self.projectile_speed as f64),
            ("projectile_lifetime_ms", self.projectile_lifetime_ms),
            ("hit_radius", self.hit_radius as f64),
            ("pickup_radius", self.pickup_radius as f64),
            ("target_health", self.target_health as f64),
            ("targets_per_level", self.targets_per_level as f64),
            ("base_damage", self.base_damage as f64),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must be greater than zero",
                });
            }
        }
        let non_negative: [(&'static str, f64); 9] = [
            ("health_bar_distance", self.health_bar_distance as f64),
            ("health_bar_hit_window_ms", self.health_bar_hit_window_ms),
            ("jump_impulse", self.jump_impulse as f64),
            ("dash_distance", self.dash_distance as f64),
            ("dash_cooldown_ms", self.dash_cooldown_ms),
            ("level_transition_ms", self.level_transition_ms),
            ("powerup_exclusion_radius", self.powerup_exclusion_radius as f64),
            ("bob_amplitude", self.bob_amplitude as f64),
            ("bob_speed", self.bob_speed as f64),
        ];
        for (field, value) in non_negative {
            if !(value >= 0.0) {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must not be negative",
                });
            }
        }
        if self.wall_thickness < 0.0 || self.wall_thickness * 2.0 >= self.arena_start_size {
            return Err(TuningError::Invalid {
                field: "wall_thickness",
                reason: "must be non-negative and thinner than half the arena",
            });
        }
        if !(0.0..=1.0).contains(&self.spark_chance) {
            return Err(TuningError::Invalid {
                field: "spark_chance",
                reason: "must be a probability in [0, 1]",
            });
        }
        Ok(())
    }

    /// Wave size for a level
    pub fn targets_for_level(&self, level: u32) -> u32 {
        level.saturating_mul(self.targets_per_level)
    }
}
