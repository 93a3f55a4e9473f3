//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order within each collection)
//! - Timers are deadlines compared against a caller-supplied clock reading
//! - No rendering or platform dependencies

pub mod arena;
pub mod collision;
pub mod particle;
pub mod player;
pub mod powerup;
pub mod progression;
pub mod projectile;
pub mod state;
pub mod target;
pub mod tick;

pub use arena::{ArenaState, Wall, WallSide};
pub use collision::{first_hit, projectile_out_of_bounds, within_radius};
pub use particle::{Particle, ParticleKind, ParticleSystem};
pub use player::Player;
pub use powerup::{PowerUp, PowerUpManager, PowerUpUpdate};
pub use progression::{ProgressionController, ProgressionPhase};
pub use projectile::{Projectile, ProjectileSystem};
pub use state::{EntityKind, EntityRef, GameEvent, GameState};
pub use target::{DamageOutcome, Target, TargetRegistry, TargetVisibility};
pub use tick::{TickInput, tick};
