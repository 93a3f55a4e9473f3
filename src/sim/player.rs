//! First-person player controller
//!
//! Walks on a flat floor at fixed eye height, jumps under constant gravity,
//! and can dash a short distance forward on a wall-clock cooldown.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;

use super::arena::ArenaState;
use super::tick::TickInput;
use crate::consts::{GROUND_HEIGHT, PLAYER_START};
use crate::tuning::Tuning;
use crate::{flat_forward, flat_right, look_direction};

/// The player (camera) entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Eye position
    pub position: Vec3,
    /// Rotation about +Y (radians, unbounded)
    pub yaw: f32,
    /// Rotation about the local X axis, clamped to ±π/2
    pub pitch: f32,
    pub vertical_velocity: f32,
    pub airborne: bool,
    /// Clock time of the last dash (ms), `None` if never dashed
    pub last_dash_ms: Option<f64>,
    /// Speed used for the most recent horizontal move
    pub move_speed: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            position: Vec3::from_array(PLAYER_START),
            yaw: 0.0,
            pitch: 0.0,
            vertical_velocity: 0.0,
            airborne: false,
            last_dash_ms: None,
            move_speed: 0.0,
        }
    }
}

impl Player {
    /// Unit vector the player is looking along
    pub fn look_direction(&self) -> Vec3 {
        look_direction(self.yaw, self.pitch)
    }

    /// Whether a dash is available at `now_ms`
    pub fn can_dash(&self, now_ms: f64, cooldown_ms: f64) -> bool {
        match self.last_dash_ms {
            None => true,
            Some(last) => now_ms - last >= cooldown_ms,
        }
    }

    /// Apply a look delta. Pitch is clamped, yaw wraps naturally.
    pub fn rotate(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.yaw += yaw_delta;
        self.pitch = (self.pitch + pitch_delta).clamp(-FRAC_PI_2, FRAC_PI_2);
    }

    /// Advance one simulation step. Returns true if a dash fired this step.
    pub fn update(
        &mut self,
        input: &TickInput,
        arena: &ArenaState,
        tuning: &Tuning,
        now_ms: f64,
        dt: f32,
    ) -> bool {
        self.rotate(input.look_yaw, input.look_pitch);

        // Horizontal: sum requested directions, normalize, then scale so
        // diagonals are no faster than straight lines
        let forward = flat_forward(self.yaw);
        let right = flat_right(self.yaw);
        let mut wish = Vec3::ZERO;
        if input.forward {
            wish += forward;
        }
        if input.back {
            wish -= forward;
        }
        if input.right {
            wish += right;
        }
        if input.left {
            wish -= right;
        }
        self.move_speed = if input.sprint {
            tuning.run_speed
        } else {
            tuning.base_speed
        };
        let wish = wish.normalize_or_zero();
        self.position += wish * self.move_speed * dt;

        // Vertical
        if input.jump && !self.airborne {
            self.vertical_velocity = tuning.jump_impulse;
            self.airborne = true;
        }
        if self.airborne {
            self.vertical_velocity -= tuning.gravity * dt;
            self.position.y += self.vertical_velocity * dt;
            if self.position.y <= GROUND_HEIGHT {
                self.position.y = GROUND_HEIGHT;
                self.vertical_velocity = 0.0;
                self.airborne = false;
            }
        } else {
            self.position.y = (self.position.y - tuning.gravity * dt * dt).max(GROUND_HEIGHT);
            self.vertical_velocity = 0.0;
        }

        // Dash
        let mut dashed = false;
        if input.dash && self.can_dash(now_ms, tuning.dash_cooldown_ms) {
            self.position += forward * tuning.dash_distance;
            self.last_dash_ms = Some(now_ms);
            dashed = true;
        }

        self.position = arena.clamp_player(self.position);
        dashed
    }
}
