//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. Wall-clock
//! deadlines (dash cooldown, projectile lifetime, level transition) are all
//! compared against the `now_ms` passed in, never against the step count.

use super::powerup::PowerUpUpdate;
use super::state::{GameEvent, GameState};
use super::target::DamageOutcome;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub sprint: bool,
    pub jump: bool,
    pub dash: bool,
    /// Fire one projectile along the look direction
    pub fire: bool,
    /// Yaw change this step (radians)
    pub look_yaw: f32,
    /// Pitch change this step (radians)
    pub look_pitch: f32,
}

impl TickInput {
    /// Strip one-shot actions so held input can be replayed for later substeps
    pub fn held_only(&self) -> Self {
        Self {
            fire: false,
            look_yaw: 0.0,
            look_pitch: 0.0,
            ..self.clone()
        }
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: f64, dt: f32) {
    state.time_ticks += 1;

    // Player
    let dashed = state
        .player
        .update(input, &state.arena, &state.tuning, now_ms, dt);
    if dashed {
        state.events.push(GameEvent::Dashed {
            position: state.player.position,
        });
    }

    // Fire
    if input.fire {
        let id = state.next_entity_id();
        let origin = state.player.position;
        let direction = state.player.look_direction();
        if state
            .projectiles
            .spawn(id, origin, direction, state.tuning.projectile_speed, now_ms)
        {
            state.events.push(GameEvent::Shot {
                id,
                origin,
                direction,
            });
        }
    }

    // Projectiles vs targets
    let outcomes = state.projectiles.update(
        &mut state.targets,
        &state.arena,
        &state.tuning,
        state.progression.bullet_damage,
        now_ms,
        dt,
    );
    for outcome in outcomes {
        match outcome {
            DamageOutcome::Damaged { id, health } => {
                state.events.push(GameEvent::TargetHit { id, health });
            }
            DamageOutcome::Destroyed { id, position } => {
                state.particles.spawn_explosion(position, &mut state.rng);
                state.events.push(GameEvent::TargetHit { id, health: 0 });
                state.events.push(GameEvent::TargetDestroyed { id, position });
                let armed = state
                    .progression
                    .record_destruction(now_ms, state.tuning.level_transition_ms);
                if armed {
                    state.events.push(GameEvent::LevelComplete {
                        level: state.progression.level,
                    });
                }
            }
            DamageOutcome::Missing { id } => {
                log::trace!("Hit on target {} ignored: already destroyed", id);
            }
        }
    }

    // Particles
    state.particles.update(dt);

    // Power-up
    let update = state.power_ups.update(
        now_ms,
        state.player.position,
        &state.tuning,
        &mut state.particles,
        &mut state.rng,
    );
    if let PowerUpUpdate::Collected { position } = update {
        let bullet_damage = state.progression.apply_damage_boost();
        log::debug!("Power-up collected, bullet damage now {}", bullet_damage);
        state.events.push(GameEvent::PowerUpCollected {
            position,
            bullet_damage,
        });
    }

    // Level progression
    if state.progression.poll_transition(now_ms).is_some() {
        state.advance_level();
    }
}
