//! Outbound collaborators
//!
//! The renderer and HUD receive read-only views of the simulation. They can
//! keep whatever per-entity handles they like, keyed by entity id, but never
//! touch simulation state.

use std::collections::HashMap;

use serde::Serialize;

use crate::sim::{
    ArenaState, GameState, Particle, Player, PowerUp, Projectile, Target, TargetVisibility,
};

/// Borrowed view of everything drawable, pushed once per frame
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Snapshot<'a> {
    pub level: u32,
    pub player: &'a Player,
    pub projectiles: &'a [Projectile],
    pub targets: &'a [Target],
    pub particles: &'a [Particle],
    pub power_up: Option<&'a PowerUp>,
    pub arena: &'a ArenaState,
    /// Floor stretch relative to the level-1 arena
    pub floor_scale: f32,
}

impl<'a> Snapshot<'a> {
    pub fn from_state(state: &'a GameState) -> Self {
        Self {
            level: state.progression.level,
            player: &state.player,
            projectiles: &state.projectiles.projectiles,
            targets: &state.targets.targets,
            particles: &state.particles.particles,
            power_up: state.power_ups.active(),
            arena: &state.arena,
            floor_scale: state.arena.floor_scale(state.tuning.arena_start_size),
        }
    }
}

/// Scene owner; everything here is one-way
pub trait Renderer {
    fn sync_entities(&mut self, snapshot: &Snapshot<'_>);
    /// Level cleared: show the completion banner
    fn on_level_transition_start(&mut self, level: u32);
    /// New level in place: hide the banner, rebuild walls and floor
    fn on_level_transition_end(&mut self, level: u32);
}

/// Heads-up display
pub trait Hud {
    fn report_progress(&mut self, level: u32, destroyed: u32, total: u32);
    fn report_target_visibility(&mut self, row: &TargetVisibility);
    /// Target destroyed: drop any health bar for it
    fn forget_target(&mut self, _id: u32) {}
}

/// Renderer for headless runs: logs transitions and keeps entity counts
#[derive(Debug, Clone, Default)]
pub struct HeadlessRenderer {
    pub frames: u64,
    pub last_counts: EntityCounts,
    pub banner: Option<u32>,
    pub transitions: Vec<(u32, bool)>,
}

/// How many of each entity the last snapshot held
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EntityCounts {
    pub projectiles: usize,
    pub targets: usize,
    pub particles: usize,
    pub power_ups: usize,
}

impl Renderer for HeadlessRenderer {
    fn sync_entities(&mut self, snapshot: &Snapshot<'_>) {
        self.frames += 1;
        self.last_counts = EntityCounts {
            projectiles: snapshot.projectiles.len(),
            targets: snapshot.targets.len(),
            particles: snapshot.particles.len(),
            power_ups: usize::from(snapshot.power_up.is_some()),
        };
        log::trace!("frame {}: {:?}", self.frames, self.last_counts);
    }

    fn on_level_transition_start(&mut self, level: u32) {
        log::info!("LEVEL {} COMPLETE", level);
        self.banner = Some(level);
        self.transitions.push((level, true));
    }

    fn on_level_transition_end(&mut self, level: u32) {
        log::info!("Entering level {}", level);
        self.banner = None;
        self.transitions.push((level, false));
    }
}

/// HUD for headless runs: keeps the latest progress line and a side table of
/// health bars keyed by target id
#[derive(Debug, Clone, Default)]
pub struct HeadlessHud {
    pub progress: (u32, u32, u32),
    pub health_bars: HashMap<u32, TargetVisibility>,
}

impl HeadlessHud {
    pub fn visible_bars(&self) -> usize {
        self.health_bars.values().filter(|r| r.visible).count()
    }
}

impl Hud for HeadlessHud {
    fn report_progress(&mut self, level: u32, destroyed: u32, total: u32) {
        if self.progress != (level, destroyed, total) {
            log::debug!("Level {} - targets destroyed: {}/{}", level, destroyed, total);
            self.progress = (level, destroyed, total);
        }
    }

    fn report_target_visibility(&mut self, row: &TargetVisibility) {
        self.health_bars.insert(row.id, *row);
    }

    fn forget_target(&mut self, id: u32) {
        self.health_bars.remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    #[test]
    fn test_snapshot_mirrors_state() {
        let state = GameState::new(5, Tuning::default());
        let snapshot = Snapshot::from_state(&state);
        assert_eq!(snapshot.level, 1);
        assert_eq!(snapshot.targets.len(), 10);
        assert!(snapshot.power_up.is_some());
        assert_eq!(snapshot.floor_scale, 1.0);

        let mut renderer = HeadlessRenderer::default();
        renderer.sync_entities(&snapshot);
        assert_eq!(renderer.last_counts.targets, 10);
        assert_eq!(renderer.last_counts.power_ups, 1);
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::new(5, Tuning::default());
        let json = serde_json::to_value(Snapshot::from_state(&state)).expect("serializable");
        assert_eq!(json["level"], 1);
        assert_eq!(json["targets"].as_array().map(Vec::len), Some(10));
    }

    #[test]
    fn test_hud_side_table() {
        let mut hud = HeadlessHud::default();
        let row = TargetVisibility {
            id: 3,
            position: glam::Vec3::ZERO,
            health_fraction: 0.5,
            visible: true,
        };
        hud.report_target_visibility(&row);
        assert_eq!(hud.visible_bars(), 1);
        hud.forget_target(3);
        assert!(hud.health_bars.is_empty());
    }
}
