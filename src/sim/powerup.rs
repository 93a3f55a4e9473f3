//! Damage power-up
//!
//! At most one power-up exists at a time. It hovers with a sine bob, sheds
//! sparks, and is collected by walking into it.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::arena::ArenaState;
use super::particle::ParticleSystem;
use crate::consts::{POWERUP_HEIGHT, POWERUP_SPAWN_ATTEMPTS};
use crate::tuning::Tuning;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub position: Vec3,
    /// Height the bob oscillates around
    pub base_y: f32,
    pub amplitude: f32,
    /// Bob speed factor (phase advances `0.002 * angular_speed` per ms)
    pub angular_speed: f32,
    pub active: bool,
}

/// What happened to the power-up this step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PowerUpUpdate {
    Idle,
    /// Collected at the given position
    Collected { position: Vec3 },
}

/// Owns the single optional power-up
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PowerUpManager {
    pub power_up: Option<PowerUp>,
}

impl PowerUpManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// The live power-up, if any
    pub fn active(&self) -> Option<&PowerUp> {
        self.power_up.as_ref().filter(|p| p.active)
    }

    /// Place a new power-up at least `powerup_exclusion_radius` from the
    /// player, replacing any existing one. Returns its position.
    ///
    /// Placement is rejection sampled over the arena floor with a bounded
    /// number of attempts; see [`fallback_position`] for what happens when
    /// every sample lands too close.
    pub fn try_spawn<R: Rng>(
        &mut self,
        player_pos: Vec3,
        arena: &ArenaState,
        tuning: &Tuning,
        rng: &mut R,
    ) -> Vec3 {
        let half = arena.half_extent();
        let radius = tuning.powerup_exclusion_radius;

        let sampled = (0..POWERUP_SPAWN_ATTEMPTS).find_map(|_| {
            let candidate = Vec3::new(
                (rng.random::<f32>() - 0.5) * arena.size,
                POWERUP_HEIGHT,
                (rng.random::<f32>() - 0.5) * arena.size,
            );
            (candidate.distance(player_pos) >= radius).then_some(candidate)
        });

        let position = match sampled {
            Some(pos) => pos,
            None => {
                let pos = fallback_position(player_pos, arena, radius);
                log::warn!(
                    "Power-up placement gave up after {} attempts (arena half extent {:.2}), using {:?}",
                    POWERUP_SPAWN_ATTEMPTS,
                    half,
                    pos
                );
                pos
            }
        };

        self.power_up = Some(PowerUp {
            position,
            base_y: position.y,
            amplitude: tuning.bob_amplitude,
            angular_speed: tuning.bob_speed,
            active: true,
        });
        log::info!("Power-up spawned at ({:.2}, {:.2})", position.x, position.z);
        position
    }

    /// Bob, shed sparks, and test for pickup by the player
    pub fn update<R: Rng>(
        &mut self,
        now_ms: f64,
        player_pos: Vec3,
        tuning: &Tuning,
        particles: &mut ParticleSystem,
        rng: &mut R,
    ) -> PowerUpUpdate {
        let Some(power_up) = self.power_up.as_mut().filter(|p| p.active) else {
            return PowerUpUpdate::Idle;
        };

        let phase = (now_ms * 0.002 * power_up.angular_speed as f64).sin() as f32;
        power_up.position.y = power_up.base_y + phase * power_up.amplitude;

        if rng.random_bool(spark_probability(tuning.spark_chance)) {
            particles.spawn_powerup_spark(power_up.position, rng);
        }

        if player_pos.distance(power_up.position) < tuning.pickup_radius {
            let position = power_up.position;
            power_up.active = false;
            self.power_up = None;
            particles.spawn_pickup_burst(position, rng);
            return PowerUpUpdate::Collected { position };
        }

        PowerUpUpdate::Idle
    }
}

/// Spark chance as a usable probability (`random_bool` panics outside `[0, 1]`)
fn spark_probability(chance: f64) -> f64 {
    if chance.is_nan() {
        0.0
    } else {
        chance.clamp(0.0, 1.0)
    }
}

/// Where to put the power-up when sampling keeps landing near the player:
/// the arena centre if it is far enough, otherwise whichever corner (inside
/// the player clamp) is farthest from the player.
pub fn fallback_position(player_pos: Vec3, arena: &ArenaState, radius: f32) -> Vec3 {
    let center = Vec3::new(0.0, POWERUP_HEIGHT, 0.0);
    if center.distance(player_pos) >= radius {
        return center;
    }
    let limit = arena.player_limit();
    let corner_x = if player_pos.x > 0.0 { -limit } else { limit };
    let corner_z = if player_pos.z > 0.0 { -limit } else { limit };
    Vec3::new(corner_x, POWERUP_HEIGHT, corner_z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_respects_exclusion() {
        let arena = ArenaState::new(50.0, 0.4);
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(11);
        let mut manager = PowerUpManager::new();
        let player = Vec3::new(0.0, 1.5, 5.0);
        for _ in 0..100 {
            let pos = manager.try_spawn(player, &arena, &tuning, &mut rng);
            assert!(pos.distance(player) >= tuning.powerup_exclusion_radius);
            assert!(pos.x.abs() <= 25.0 && pos.z.abs() <= 25.0);
        }
        assert!(manager.active().is_some());
    }

    #[test]
    fn test_tiny_arena_falls_back() {
        // Every sample is within 5 units of a player at the centre
        let arena = ArenaState::new(2.0, 0.1);
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(11);
        let mut manager = PowerUpManager::new();
        let player = Vec3::new(0.0, 1.5, 0.0);
        let pos = manager.try_spawn(player, &arena, &tuning, &mut rng);
        assert_eq!(pos, fallback_position(player, &arena, tuning.powerup_exclusion_radius));
        assert!(manager.active().is_some());
    }

    #[test]
    fn test_fallback_prefers_center() {
        let arena = ArenaState::new(50.0, 0.4);
        let pos = fallback_position(Vec3::new(20.0, 1.5, 20.0), &arena, 5.0);
        assert_eq!(pos, Vec3::new(0.0, POWERUP_HEIGHT, 0.0));
        let pos = fallback_position(Vec3::new(1.0, 1.5, -1.0), &arena, 5.0);
        assert_eq!(pos, Vec3::new(-24.5, POWERUP_HEIGHT, 24.5));
    }

    #[test]
    fn test_bob_stays_within_amplitude() {
        let tuning = Tuning {
            spark_chance: 0.0,
            ..Tuning::default()
        };
        let mut rng = Pcg32::seed_from_u64(2);
        let mut particles = ParticleSystem::default();
        let mut manager = PowerUpManager {
            power_up: Some(PowerUp {
                position: Vec3::new(10.0, 1.0, 10.0),
                base_y: 1.0,
                amplitude: 0.5,
                angular_speed: 2.0,
                active: true,
            }),
        };
        let far = Vec3::new(-20.0, 1.5, -20.0);
        for ms in (0..5000).step_by(37) {
            let update = manager.update(ms as f64, far, &tuning, &mut particles, &mut rng);
            assert_eq!(update, PowerUpUpdate::Idle);
            let y = manager.active().map(|p| p.position.y).unwrap_or_default();
            assert!((0.5..=1.5).contains(&y));
        }
        assert!(particles.is_empty());
    }

    #[test]
    fn test_sparks_every_step_when_certain() {
        use crate::sim::particle::ParticleKind;
        use crate::consts::SPARK_LIFE_TICKS;

        let tuning = Tuning {
            spark_chance: 1.0,
            ..Tuning::default()
        };
        let mut rng = Pcg32::seed_from_u64(8);
        let mut particles = ParticleSystem::default();
        let mut manager = PowerUpManager {
            power_up: Some(PowerUp {
                position: Vec3::new(10.0, 1.0, 10.0),
                base_y: 1.0,
                amplitude: 0.5,
                angular_speed: 2.0,
                active: true,
            }),
        };
        let far = Vec3::new(-20.0, 1.5, -20.0);
        for step in 0..20 {
            let update = manager.update(step as f64 * 16.0, far, &tuning, &mut particles, &mut rng);
            assert_eq!(update, PowerUpUpdate::Idle);
            assert_eq!(particles.len(), step + 1);

            let anchor = manager.active().map(|p| p.position).unwrap_or_default();
            let spark = &particles.particles[step];
            assert_eq!(spark.kind, ParticleKind::PowerUpSpark);
            assert_eq!(spark.remaining_life, Some(SPARK_LIFE_TICKS));
            let offset = spark.position - anchor;
            assert!((-0.201..=0.201).contains(&offset.x), "x offset {}", offset.x);
            assert!((-0.001..=0.401).contains(&offset.y), "y offset {}", offset.y);
            assert!((-0.201..=0.201).contains(&offset.z), "z offset {}", offset.z);
            assert!(spark.velocity.y > 0.0);
        }
    }

    #[test]
    fn test_out_of_range_spark_chance_is_clamped() {
        assert_eq!(spark_probability(3.0), 1.0);
        assert_eq!(spark_probability(-0.5), 0.0);
        assert_eq!(spark_probability(f64::NAN), 0.0);

        let tuning = Tuning {
            spark_chance: 7.5,
            ..Tuning::default()
        };
        let mut rng = Pcg32::seed_from_u64(8);
        let mut particles = ParticleSystem::default();
        let mut manager = PowerUpManager {
            power_up: Some(PowerUp {
                position: Vec3::new(10.0, 1.0, 10.0),
                base_y: 1.0,
                amplitude: 0.5,
                angular_speed: 2.0,
                active: true,
            }),
        };
        manager.update(0.0, Vec3::new(-20.0, 1.5, -20.0), &tuning, &mut particles, &mut rng);
        assert_eq!(particles.len(), 1);
    }

    #[test]
    fn test_pickup_deactivates_and_bursts() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(2);
        let mut particles = ParticleSystem::default();
        let mut manager = PowerUpManager {
            power_up: Some(PowerUp {
                position: Vec3::new(0.0, 1.0, 0.0),
                base_y: 1.0,
                amplitude: 0.5,
                angular_speed: 2.0,
                active: true,
            }),
        };
        let update = manager.update(0.0, Vec3::new(0.0, 1.5, 0.5), &tuning, &mut particles, &mut rng);
        assert!(matches!(update, PowerUpUpdate::Collected { .. }));
        assert!(manager.active().is_none());
        assert!(particles.len() >= crate::consts::BURST_PARTICLE_COUNT);

        let again = manager.update(16.0, Vec3::new(0.0, 1.5, 0.5), &tuning, &mut particles, &mut rng);
        assert_eq!(again, PowerUpUpdate::Idle);
    }
}
