//! Target registry
//!
//! Targets are stationary cubes with integer health. A target leaves the
//! registry the moment its health reaches the destroyed floor, so it can only
//! ever be reported destroyed once.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::arena::ArenaState;
use crate::consts::{DESTROYED_FLOOR, TARGET_HEIGHT};
use crate::tuning::Tuning;

/// A destructible target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    pub id: u32,
    /// Fixed after spawn
    pub position: Vec3,
    pub health: i32,
    pub max_health: i32,
    /// Clock time of the most recent hit (ms)
    pub last_hit_ms: Option<f64>,
}

impl Target {
    /// Remaining health as a fraction of full health
    pub fn health_fraction(&self) -> f32 {
        if self.max_health <= 0 {
            return 0.0;
        }
        (self.health.max(0) as f32 / self.max_health as f32).clamp(0.0, 1.0)
    }
}

/// Result of applying damage to a target id
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DamageOutcome {
    /// No live target with that id (already destroyed or never existed)
    Missing { id: u32 },
    /// Target survived with the given health
    Damaged { id: u32, health: i32 },
    /// Target reached the destroyed floor and was removed
    Destroyed { id: u32, position: Vec3 },
}

/// Per-target health bar eligibility handed to the HUD
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TargetVisibility {
    pub id: u32,
    pub position: Vec3,
    pub health_fraction: f32,
    pub visible: bool,
}

/// Owns every live target
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetRegistry {
    /// Live targets, in spawn order
    pub targets: Vec<Target>,
    next_id: u32,
}

impl TargetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Target> {
        self.targets.iter()
    }

    pub fn get(&self, id: u32) -> Option<&Target> {
        self.targets.iter().find(|t| t.id == id)
    }

    /// Place a single target. Returns its id.
    pub fn insert(&mut self, position: Vec3, health: i32) -> u32 {
        self.next_id += 1;
        let id = self.next_id;
        self.targets.push(Target {
            id,
            position,
            health,
            max_health: health,
            last_hit_ms: None,
        });
        id
    }

    /// Replace all targets with `count` fresh ones scattered uniformly over
    /// the arena floor, clear of the walls.
    pub fn spawn_wave<R: Rng>(&mut self, count: u32, arena: &ArenaState, tuning: &Tuning, rng: &mut R) {
        self.targets.clear();
        let half_range = arena.target_half_range();
        for _ in 0..count {
            let x = sample_span(rng, half_range);
            let z = sample_span(rng, half_range);
            self.insert(Vec3::new(x, TARGET_HEIGHT, z), tuning.target_health);
        }
        log::debug!("Spawned wave of {} targets (half range {:.2})", count, half_range);
    }

    /// Apply damage to a target.
    ///
    /// Health is clamped at the destroyed floor. The call that brings health
    /// to the floor removes the target and reports `Destroyed`; any later call
    /// for the same id is a no-op reporting `Missing`.
    pub fn apply_damage(&mut self, id: u32, amount: u32, now_ms: f64) -> DamageOutcome {
        let Some(index) = self.targets.iter().position(|t| t.id == id) else {
            return DamageOutcome::Missing { id };
        };

        let target = &mut self.targets[index];
        let amount = i32::try_from(amount).unwrap_or(i32::MAX);
        target.health = target.health.saturating_sub(amount).max(DESTROYED_FLOOR);
        target.last_hit_ms = Some(now_ms);

        if target.health <= DESTROYED_FLOOR {
            let removed = self.targets.remove(index);
            log::debug!("Target {} destroyed at {:?}", removed.id, removed.position);
            DamageOutcome::Destroyed {
                id: removed.id,
                position: removed.position,
            }
        } else {
            DamageOutcome::Damaged {
                id,
                health: target.health,
            }
        }
    }

    /// Health-bar eligibility for every live target: near the player, or hit
    /// recently while still alive.
    pub fn visibility(&self, player_pos: Vec3, now_ms: f64, tuning: &Tuning) -> Vec<TargetVisibility> {
        self.targets
            .iter()
            .map(|t| {
                let near = t.position.distance(player_pos) < tuning.health_bar_distance;
                let recently_hit = t
                    .last_hit_ms
                    .is_some_and(|hit| now_ms - hit < tuning.health_bar_hit_window_ms);
                TargetVisibility {
                    id: t.id,
                    position: t.position,
                    health_fraction: t.health_fraction(),
                    visible: t.health > DESTROYED_FLOOR && (near || recently_hit),
                }
            })
            .collect()
    }
}

/// Uniform sample in `[-half, half]`
fn sample_span<R: Rng>(rng: &mut R, half: f32) -> f32 {
    rng.random::<f32>() * half * 2.0 - half
}
