//! Retro Arena - a walled-arena target shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player, projectiles, targets, particles, progression)
//! - `platform`: Inbound collaborators (clock, input sampling)
//! - `frontend`: Outbound collaborators (renderer sync, HUD reports)
//! - `audio`: Fire-and-forget sound cues
//! - `tuning`: Data-driven game balance
//! - `game`: Frame driver tying the simulation to its collaborators

pub mod audio;
pub mod frontend;
pub mod game;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use settings::{QualityPreset, Settings};
pub use tuning::{Tuning, TuningError};

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest wall-clock frame the driver will account for (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Eye height of the player when standing on the floor
    pub const GROUND_HEIGHT: f32 = 1.5;
    /// Player X/Z are clamped to ±this fraction of the arena size
    pub const PLAYER_BOUNDS_FRACTION: f32 = 0.49;
    /// Player spawn point
    pub const PLAYER_START: [f32; 3] = [0.0, 1.5, 5.0];

    /// Health value at which a target counts as destroyed
    pub const DESTROYED_FLOOR: i32 = 0;
    /// Height targets sit at (half of a unit cube)
    pub const TARGET_HEIGHT: f32 = 0.5;
    /// Extra inset from the wall for target placement
    pub const TARGET_WALL_MARGIN: f32 = 0.5;

    /// Projectiles above this height are discarded
    pub const PROJECTILE_CEILING: f32 = 50.0;

    /// Particles per explosion / pickup burst
    pub const BURST_PARTICLE_COUNT: usize = 50;
    /// Per-axis explosion velocity spread (units/s, ±)
    pub const BURST_SPREAD: f32 = 6.0;
    /// Downward acceleration on explosion debris (units/s²)
    pub const PARTICLE_GRAVITY: f32 = 3.6;
    /// Per-step multiplicative scale decay
    pub const PARTICLE_DECAY: f32 = 0.98;
    /// Particles smaller than this are culled
    pub const PARTICLE_MIN_SCALE: f32 = 0.02;
    /// Particles drifting farther than this from their spawn point are culled
    pub const PARTICLE_MAX_TRAVEL: f32 = 5.0;
    /// Lifetime of a power-up spark, in simulation steps
    pub const SPARK_LIFE_TICKS: u32 = 60;

    /// Height the power-up hovers around
    pub const POWERUP_HEIGHT: f32 = 1.0;
    /// Rejection-sampling budget for power-up placement
    pub const POWERUP_SPAWN_ATTEMPTS: u32 = 64;
}

/// Horizontal unit vector the player faces for a given yaw (yaw 0 looks down -Z)
#[inline]
pub fn flat_forward(yaw: f32) -> Vec3 {
    Vec3::new(-yaw.sin(), 0.0, -yaw.cos())
}

/// Horizontal unit vector to the player's right for a given yaw
#[inline]
pub fn flat_right(yaw: f32) -> Vec3 {
    Vec3::new(yaw.cos(), 0.0, -yaw.sin())
}

/// Full look direction (unit length) for a yaw/pitch pair
#[inline]
pub fn look_direction(yaw: f32, pitch: f32) -> Vec3 {
    let (sp, cp) = pitch.sin_cos();
    Vec3::new(-yaw.sin() * cp, sp, -yaw.cos() * cp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_basis_at_zero_yaw() {
        assert!((flat_forward(0.0) - Vec3::NEG_Z).length() < 1e-6);
        assert!((flat_right(0.0) - Vec3::X).length() < 1e-6);
    }

    #[test]
    fn test_basis_is_orthonormal() {
        for yaw in [-3.0_f32, -1.2, 0.4, 2.5, 17.0] {
            let f = flat_forward(yaw);
            let r = flat_right(yaw);
            assert!((f.length() - 1.0).abs() < 1e-5);
            assert!((r.length() - 1.0).abs() < 1e-5);
            assert!(f.dot(r).abs() < 1e-5);
        }
    }

    #[test]
    fn test_look_direction_pitch() {
        let up = look_direction(0.3, FRAC_PI_2);
        assert!((up - Vec3::Y).length() < 1e-5);
        let level = look_direction(0.3, 0.0);
        assert!((level - flat_forward(0.3)).length() < 1e-6);
    }
}
