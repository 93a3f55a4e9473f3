//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in `GameState`; collaborators only
//! ever read it.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::arena::ArenaState;
use super::particle::ParticleSystem;
use super::player::Player;
use super::powerup::PowerUpManager;
use super::progression::ProgressionController;
use super::projectile::ProjectileSystem;
use super::target::TargetRegistry;
use crate::settings::QualityPreset;
use crate::tuning::Tuning;

/// Explicit entity tag, so nothing has to infer "what is this" from how it is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Projectile,
    Target,
    Particle,
    PowerUp,
    Wall,
}

/// A tagged, read-only view of one entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EntityRef {
    pub kind: EntityKind,
    /// Id within its kind (particles and walls use their index)
    pub id: u32,
    pub position: Vec3,
}

/// Something that happened during a step, drained by the frame driver
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum GameEvent {
    Shot { id: u32, origin: Vec3, direction: Vec3 },
    Dashed { position: Vec3 },
    TargetHit { id: u32, health: i32 },
    TargetDestroyed { id: u32, position: Vec3 },
    PowerUpSpawned { position: Vec3 },
    PowerUpCollected { position: Vec3, bullet_damage: u32 },
    /// Wave cleared; the transition timer is running
    LevelComplete { level: u32 },
    /// A level's wave and power-up are in place
    LevelStarted { level: u32, arena_size: f32 },
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub(crate) rng: Pcg32,
    /// Simulation step counter
    pub time_ticks: u64,
    pub arena: ArenaState,
    pub player: Player,
    pub projectiles: ProjectileSystem,
    pub targets: TargetRegistry,
    pub particles: ParticleSystem,
    pub power_ups: PowerUpManager,
    pub progression: ProgressionController,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
    /// Next projectile id
    next_id: u32,
}

impl GameState {
    /// Create a new game at level 1 with the given seed
    ///
    /// `tuning` should come through [`Tuning::from_json`] or pass
    /// [`Tuning::validate`]; values that fail validation are logged and used
    /// as given.
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        if let Err(err) = tuning.validate() {
            log::warn!("Starting with invalid tuning: {}", err);
        }
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            arena: ArenaState::new(tuning.arena_start_size, tuning.wall_thickness),
            player: Player::default(),
            projectiles: ProjectileSystem::new(),
            targets: TargetRegistry::new(),
            particles: ParticleSystem::new(QualityPreset::default().max_particles()),
            power_ups: PowerUpManager::new(),
            progression: ProgressionController::new(tuning.base_damage),
            events: Vec::new(),
            next_id: 1,
            tuning,
        };
        state.start_level();
        state
    }

    /// Allocate a new projectile id
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    pub fn set_particle_budget(&mut self, max_particles: usize) {
        self.particles.max_particles = max_particles;
    }

    /// Spawn the wave and power-up for the current level and enter `Playing`
    pub fn start_level(&mut self) {
        let level = self.progression.level;
        let count = self.tuning.targets_for_level(level);
        self.targets
            .spawn_wave(count, &self.arena, &self.tuning, &mut self.rng);
        self.progression.begin_level(count);

        let position =
            self.power_ups
                .try_spawn(self.player.position, &self.arena, &self.tuning, &mut self.rng);
        self.events.push(GameEvent::PowerUpSpawned { position });
        self.events.push(GameEvent::LevelStarted {
            level,
            arena_size: self.arena.size,
        });
        log::info!(
            "Level {} started: {} targets, arena size {:.2}",
            level,
            count,
            self.arena.size
        );
    }

    /// Grow the arena and start the (already incremented) current level
    pub fn advance_level(&mut self) {
        self.arena.grow(self.tuning.arena_growth);
        self.player.position = self.arena.clamp_player(self.player.position);
        self.start_level();
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Every entity as a tagged record, in a stable order
    pub fn entities(&self) -> Vec<EntityRef> {
        let mut out = Vec::with_capacity(
            1 + self.arena.walls.len()
                + self.projectiles.len()
                + self.targets.len()
                + self.particles.len()
                + 1,
        );
        out.push(EntityRef {
            kind: EntityKind::Player,
            id: 0,
            position: self.player.position,
        });
        out.extend(self.arena.walls.iter().enumerate().map(|(i, w)| EntityRef {
            kind: EntityKind::Wall,
            id: i as u32,
            position: w.center,
        }));
        out.extend(self.targets.iter().map(|t| EntityRef {
            kind: EntityKind::Target,
            id: t.id,
            position: t.position,
        }));
        out.extend(self.projectiles.projectiles.iter().map(|p| EntityRef {
            kind: EntityKind::Projectile,
            id: p.id,
            position: p.position,
        }));
        out.extend(self.particles.particles.iter().enumerate().map(|(i, p)| EntityRef {
            kind: EntityKind::Particle,
            id: i as u32,
            position: p.position,
        }));
        if let Some(power_up) = self.power_ups.active() {
            out.push(EntityRef {
                kind: EntityKind::PowerUp,
                id: 0,
                position: power_up.position,
            });
        }
        out
    }
}
