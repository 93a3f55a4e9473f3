//! Transient visual particles
//!
//! Particles never affect gameplay, but their lifecycles are simulated here so
//! the renderer only has to draw what it is given.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{
    BURST_PARTICLE_COUNT, BURST_SPREAD, PARTICLE_DECAY, PARTICLE_GRAVITY, PARTICLE_MAX_TRAVEL,
    PARTICLE_MIN_SCALE, SPARK_LIFE_TICKS,
};

/// What spawned a particle (the renderer picks colour and size from this)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    /// Orange debris from a destroyed target; falls under gravity
    Explosion,
    /// Cyan burst when the power-up is collected
    PickupBurst,
    /// Ambient glitter rising from the power-up; short fixed life
    PowerUpSpark,
}

impl ParticleKind {
    fn has_gravity(self) -> bool {
        matches!(self, ParticleKind::Explosion)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub kind: ParticleKind,
    pub position: Vec3,
    /// Units per second
    pub velocity: Vec3,
    pub spawn_position: Vec3,
    /// Steps left before removal, if finite
    pub remaining_life: Option<u32>,
    /// Visual scale, shrinks every step
    pub scale: f32,
}

impl Particle {
    pub fn new(kind: ParticleKind, position: Vec3, velocity: Vec3, remaining_life: Option<u32>) -> Self {
        Self {
            kind,
            position,
            velocity,
            spawn_position: position,
            remaining_life,
            scale: 1.0,
        }
    }

    /// Advance one step. Returns false once the particle should be removed.
    fn step(&mut self, dt: f32) -> bool {
        if self.kind.has_gravity() {
            self.velocity.y -= PARTICLE_GRAVITY * dt;
        }
        self.position += self.velocity * dt;

        if let Some(life) = self.remaining_life.as_mut() {
            *life = life.saturating_sub(1);
            if *life == 0 {
                return false;
            }
        }

        self.scale *= PARTICLE_DECAY;
        self.scale >= PARTICLE_MIN_SCALE
            && self.position.distance(self.spawn_position) <= PARTICLE_MAX_TRAVEL
    }
}

/// Owns every live particle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleSystem {
    pub particles: Vec<Particle>,
    /// Live particle budget; the oldest particles are dropped beyond it
    pub max_particles: usize,
}

impl Default for ParticleSystem {
    fn default() -> Self {
        Self::new(usize::MAX)
    }
}

impl ParticleSystem {
    pub fn new(max_particles: usize) -> Self {
        Self {
            particles: Vec::new(),
            max_particles,
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn push(&mut self, particle: Particle) {
        self.particles.push(particle);
        self.enforce_budget();
    }

    /// Debris burst for a destroyed target
    pub fn spawn_explosion<R: Rng>(&mut self, position: Vec3, rng: &mut R) {
        self.spawn_burst(ParticleKind::Explosion, position, rng);
    }

    /// Burst for a collected power-up (no gravity)
    pub fn spawn_pickup_burst<R: Rng>(&mut self, position: Vec3, rng: &mut R) {
        self.spawn_burst(ParticleKind::PickupBurst, position, rng);
    }

    /// One spark near `position`, drifting upward for a fixed number of steps
    pub fn spawn_powerup_spark<R: Rng>(&mut self, position: Vec3, rng: &mut R) {
        let offset = Vec3::new(
            rng.random_range(-0.2..0.2),
            rng.random_range(0.0..0.4),
            rng.random_range(-0.2..0.2),
        );
        // 0.01 units/step sideways jitter, 0.01-0.02 units/step rise, at 60 Hz
        let velocity = Vec3::new(
            (rng.random::<f32>() - 0.5) * 0.6,
            0.6 + rng.random::<f32>() * 0.6,
            (rng.random::<f32>() - 0.5) * 0.6,
        );
        self.push(Particle::new(
            ParticleKind::PowerUpSpark,
            position + offset,
            velocity,
            Some(SPARK_LIFE_TICKS),
        ));
    }

    fn spawn_burst<R: Rng>(&mut self, kind: ParticleKind, position: Vec3, rng: &mut R) {
        self.particles.reserve(BURST_PARTICLE_COUNT);
        for _ in 0..BURST_PARTICLE_COUNT {
            let velocity = Vec3::new(
                rng.random_range(-BURST_SPREAD..BURST_SPREAD),
                rng.random_range(-BURST_SPREAD..BURST_SPREAD),
                rng.random_range(-BURST_SPREAD..BURST_SPREAD),
            );
            self.particles.push(Particle::new(kind, position, velocity, None));
        }
        self.enforce_budget();
    }

    /// Advance all particles one step and drop the expired ones
    pub fn update(&mut self, dt: f32) {
        self.particles.retain_mut(|p| p.step(dt));
    }

    fn enforce_budget(&mut self) {
        if self.particles.len() > self.max_particles {
            let excess = self.particles.len() - self.max_particles;
            self.particles.drain(..excess);
        }
    }
}
