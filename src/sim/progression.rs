//! Level progression
//!
//! `Playing` until every target in the wave is destroyed, then a timed
//! `LevelTransition` before the next, larger level starts. The transition
//! deadline is checked every step instead of being a scheduled callback.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ProgressionPhase {
    Playing,
    /// Level cleared; the next level starts once the clock reaches `deadline_ms`
    LevelTransition { deadline_ms: f64 },
}

/// Counters for the current level; holds no entities
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressionController {
    /// Current level (1-based)
    pub level: u32,
    pub targets_destroyed: u32,
    pub total_targets: u32,
    /// Damage per projectile hit; doubles on every power-up pickup
    pub bullet_damage: u32,
    pub phase: ProgressionPhase,
}

impl ProgressionController {
    pub fn new(base_damage: u32) -> Self {
        Self {
            level: 1,
            targets_destroyed: 0,
            total_targets: 0,
            bullet_damage: base_damage,
            phase: ProgressionPhase::Playing,
        }
    }

    /// Enter `Playing` for the current level with a wave of `total_targets`
    pub fn begin_level(&mut self, total_targets: u32) {
        self.total_targets = total_targets;
        self.targets_destroyed = 0;
        self.phase = ProgressionPhase::Playing;
    }

    pub fn in_transition(&self) -> bool {
        matches!(self.phase, ProgressionPhase::LevelTransition { .. })
    }

    /// Count one destroyed target. Returns true if this destruction completed
    /// the level and armed the transition timer.
    ///
    /// The tally never exceeds the wave size, and a pending transition is
    /// never re-armed.
    pub fn record_destruction(&mut self, now_ms: f64, transition_ms: f64) -> bool {
        if self.targets_destroyed < self.total_targets {
            self.targets_destroyed += 1;
        }
        self.arm_if_complete(now_ms, transition_ms)
    }

    fn arm_if_complete(&mut self, now_ms: f64, transition_ms: f64) -> bool {
        if self.in_transition() || self.targets_destroyed != self.total_targets {
            return false;
        }
        self.phase = ProgressionPhase::LevelTransition {
            deadline_ms: now_ms + transition_ms,
        };
        log::info!("Level {} complete", self.level);
        true
    }

    /// If the transition deadline has passed, advance the level counter and
    /// return the new level. The caller rebuilds the world for it and then
    /// calls [`begin_level`](Self::begin_level).
    pub fn poll_transition(&mut self, now_ms: f64) -> Option<u32> {
        match self.phase {
            ProgressionPhase::LevelTransition { deadline_ms } if now_ms >= deadline_ms => {
                self.level += 1;
                Some(self.level)
            }
            _ => None,
        }
    }

    /// Double bullet damage. Compounds across levels; saturates instead of overflowing.
    pub fn apply_damage_boost(&mut self) -> u32 {
        self.bullet_damage = self.bullet_damage.saturating_mul(2);
        self.bullet_damage
    }
}
