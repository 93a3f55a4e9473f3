//! Projectiles: spawn, integrate, collide, expire

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::arena::ArenaState;
use super::collision::{first_hit, projectile_out_of_bounds};
use super::target::{DamageOutcome, TargetRegistry};
use crate::tuning::Tuning;

/// A single bullet in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub position: Vec3,
    /// Units per second
    pub velocity: Vec3,
    /// Clock time the projectile was fired (ms)
    pub spawn_ms: f64,
}

/// Owns every live projectile
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectileSystem {
    pub projectiles: Vec<Projectile>,
}

impl ProjectileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire a projectile from `origin` along `direction`.
    ///
    /// A zero direction cannot be normalized; such a shot is dropped.
    pub fn spawn(&mut self, id: u32, origin: Vec3, direction: Vec3, speed: f32, now_ms: f64) -> bool {
        let dir = direction.normalize_or_zero();
        if dir == Vec3::ZERO {
            return false;
        }
        self.projectiles.push(Projectile {
            id,
            position: origin,
            velocity: dir * speed,
            spawn_ms: now_ms,
        });
        true
    }

    pub fn len(&self) -> usize {
        self.projectiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projectiles.is_empty()
    }

    /// Integrate every projectile, resolve hits against `targets`, and drop
    /// projectiles that hit, timed out, or left the arena.
    ///
    /// Each projectile damages at most one target: the most recently spawned
    /// one within the hit radius. Outcomes are returned in the order they
    /// happened.
    pub fn update(
        &mut self,
        targets: &mut TargetRegistry,
        arena: &ArenaState,
        tuning: &Tuning,
        damage: u32,
        now_ms: f64,
        dt: f32,
    ) -> Vec<DamageOutcome> {
        let mut outcomes = Vec::new();

        self.projectiles.retain_mut(|projectile| {
            if now_ms - projectile.spawn_ms >= tuning.projectile_lifetime_ms {
                return false;
            }

            projectile.position += projectile.velocity * dt;

            let hit = first_hit(
                projectile.position,
                tuning.hit_radius,
                targets.targets.iter().map(|t| t.position),
            );
            if let Some(index) = hit {
                let id = targets.targets[index].id;
                outcomes.push(targets.apply_damage(id, damage, now_ms));
                return false;
            }

            !projectile_out_of_bounds(projectile.position, arena)
        });

        outcomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;

    fn setup() -> (ProjectileSystem, TargetRegistry, ArenaState, Tuning) {
        (
            ProjectileSystem::new(),
            TargetRegistry::new(),
            ArenaState::new(50.0, 0.4),
            Tuning::default(),
        )
    }

    #[test]
    fn test_spawn_normalizes_direction() {
        let mut system = ProjectileSystem::new();
        assert!(system.spawn(1, Vec3::ZERO, Vec3::new(0.0, 0.0, -4.0), 30.0, 0.0));
        assert!((system.projectiles[0].velocity - Vec3::new(0.0, 0.0, -30.0)).length() < 1e-5);
        assert!(!system.spawn(2, Vec3::ZERO, Vec3::ZERO, 30.0, 0.0));
        assert_eq!(system.len(), 1);
    }

    #[test]
    fn test_hit_consumes_projectile() {
        let (mut system, mut targets, arena, tuning) = setup();
        let id = targets.insert(Vec3::new(0.0, 0.5, 0.0), 100);
        system.spawn(1, Vec3::new(0.0, 0.5, 0.5), Vec3::NEG_Z, tuning.projectile_speed, 0.0);

        let outcomes = system.update(&mut targets, &arena, &tuning, 10, 16.0, SIM_DT);
        assert_eq!(outcomes.len(), 1);
        assert!(matches!(outcomes[0], DamageOutcome::Damaged { id: hit, health: 90 } if hit == id));
        assert!(system.is_empty());
        assert_eq!(targets.get(id).map(|t| t.health), Some(90));
    }

    #[test]
    fn test_overlapping_targets_newest_takes_the_hit() {
        let (mut system, mut targets, arena, tuning) = setup();
        let older = targets.insert(Vec3::new(0.0, 0.5, 0.0), 100);
        let newer = targets.insert(Vec3::new(0.1, 0.5, 0.0), 100);
        system.spawn(1, Vec3::new(0.0, 0.5, 0.5), Vec3::NEG_Z, tuning.projectile_speed, 0.0);

        let outcomes = system.update(&mut targets, &arena, &tuning, 10, 0.0, SIM_DT);
        assert_eq!(outcomes.len(), 1);
        assert_eq!(targets.get(newer).map(|t| t.health), Some(90));
        assert_eq!(targets.get(older).map(|t| t.health), Some(100));
        assert!(system.is_empty());
    }

    #[test]
    fn test_expires_after_lifetime() {
        let (mut system, mut targets, arena, tuning) = setup();
        system.spawn(1, Vec3::new(0.0, 1.0, 0.0), Vec3::Y, 0.0001, 0.0);
        system.update(&mut targets, &arena, &tuning, 10, 1999.0, SIM_DT);
        assert_eq!(system.len(), 1);
        system.update(&mut targets, &arena, &tuning, 10, 2000.0, SIM_DT);
        assert!(system.is_empty());
    }

    #[test]
    fn test_leaves_arena() {
        let (mut system, mut targets, arena, tuning) = setup();
        system.spawn(1, Vec3::new(24.9, 1.0, 0.0), Vec3::X, tuning.projectile_speed, 0.0);
        system.spawn(2, Vec3::new(0.0, 0.2, 0.0), Vec3::NEG_Y, tuning.projectile_speed, 0.0);
        system.spawn(3, Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Z, tuning.projectile_speed, 0.0);
        system.update(&mut targets, &arena, &tuning, 10, 0.0, SIM_DT);
        assert_eq!(system.len(), 1);
        assert_eq!(system.projectiles[0].id, 3);
    }

    #[test]
    fn test_many_projectiles_removed_without_skipping() {
        let (mut system, mut targets, arena, tuning) = setup();
        for i in 0..6 {
            let x = i as f32 * 3.0 - 7.5;
            targets.insert(Vec3::new(x, 0.5, 0.0), 100);
            system.spawn(i, Vec3::new(x, 0.5, 0.3), Vec3::NEG_Z, tuning.projectile_speed, 0.0);
        }
        let outcomes = system.update(&mut targets, &arena, &tuning, 10, 0.0, SIM_DT);
        assert_eq!(outcomes.len(), 6);
        assert!(system.is_empty());
        assert!(targets.iter().all(|t| t.health == 90));
    }
}
