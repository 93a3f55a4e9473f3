//! Arena geometry
//!
//! The arena is a square floor centred on the origin, walled on all four
//! sides. It grows every level.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::{PLAYER_BOUNDS_FRACTION, TARGET_WALL_MARGIN};

/// Wall height used for the wall records handed to the renderer
pub const WALL_HEIGHT: f32 = 5.0;

/// Side of the arena a wall closes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WallSide {
    North,
    South,
    East,
    West,
}

/// An axis-aligned wall slab, rebuilt whenever the arena is resized
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub side: WallSide,
    /// Centre of the slab
    pub center: Vec3,
    /// Full extents along X, Y, Z
    pub extents: Vec3,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArenaState {
    /// Side length of the square floor
    pub size: f32,
    pub wall_thickness: f32,
    /// Wall geometry for the current size
    pub walls: [Wall; 4],
}

impl ArenaState {
    pub fn new(size: f32, wall_thickness: f32) -> Self {
        Self {
            size,
            wall_thickness,
            walls: build_walls(size, wall_thickness),
        }
    }

    #[inline]
    pub fn half_extent(&self) -> f32 {
        self.size / 2.0
    }

    /// Limit the player is clamped to on X and Z (just inside the walls)
    #[inline]
    pub fn player_limit(&self) -> f32 {
        self.size * PLAYER_BOUNDS_FRACTION
    }

    /// Half-width of the square targets are scattered in
    #[inline]
    pub fn target_half_range(&self) -> f32 {
        (self.half_extent() - self.wall_thickness - TARGET_WALL_MARGIN).max(0.0)
    }

    /// Floor scale relative to the starting size (what the renderer stretches the floor by)
    pub fn floor_scale(&self, start_size: f32) -> f32 {
        self.size / start_size
    }

    /// Scale the arena and rebuild its walls
    pub fn grow(&mut self, factor: f32) {
        self.size *= factor;
        self.walls = build_walls(self.size, self.wall_thickness);
    }

    /// Clamp a position's X/Z into the player area
    pub fn clamp_player(&self, pos: Vec3) -> Vec3 {
        let limit = self.player_limit();
        Vec3::new(pos.x.clamp(-limit, limit), pos.y, pos.z.clamp(-limit, limit))
    }

    /// Whether X or Z lies beyond the wall planes
    pub fn is_outside(&self, pos: Vec3) -> bool {
        let half = self.half_extent();
        pos.x.abs() > half || pos.z.abs() > half
    }
}

fn build_walls(size: f32, thickness: f32) -> [Wall; 4] {
    let half = size / 2.0;
    let offset = half - thickness / 2.0;
    let y = WALL_HEIGHT / 2.0;
    let along_x = Vec3::new(size, WALL_HEIGHT, thickness);
    let along_z = Vec3::new(thickness, WALL_HEIGHT, size);
    [
        Wall {
            side: WallSide::North,
            center: Vec3::new(0.0, y, offset),
            extents: along_x,
        },
        Wall {
            side: WallSide::South,
            center: Vec3::new(0.0, y, -offset),
            extents: along_x,
        },
        Wall {
            side: WallSide::East,
            center: Vec3::new(offset, y, 0.0),
            extents: along_z,
        },
        Wall {
            side: WallSide::West,
            center: Vec3::new(-offset, y, 0.0),
            extents: along_z,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grow_rebuilds_walls() {
        let mut arena = ArenaState::new(50.0, 0.4);
        arena.grow(1.1);
        assert!((arena.size - 55.0).abs() < 1e-4);
        let north = arena.walls[0];
        assert!((north.extents.x - 55.0).abs() < 1e-4);
        assert!((north.center.z - (27.5 - 0.2)).abs() < 1e-4);
    }

    #[test]
    fn test_clamp_player_is_inside_walls() {
        let arena = ArenaState::new(50.0, 0.4);
        let clamped = arena.clamp_player(Vec3::new(100.0, 1.5, -100.0));
        assert_eq!(clamped, Vec3::new(24.5, 1.5, -24.5));
        assert!(!arena.is_outside(clamped));
    }

    #[test]
    fn test_target_half_range() {
        let arena = ArenaState::new(50.0, 0.4);
        assert!((arena.target_half_range() - 24.1).abs() < 1e-4);
    }

    #[test]
    fn test_is_outside() {
        let arena = ArenaState::new(50.0, 0.4);
        assert!(!arena.is_outside(Vec3::new(25.0, 0.0, 0.0)));
        assert!(arena.is_outside(Vec3::new(25.01, 0.0, 0.0)));
        assert!(arena.is_outside(Vec3::new(0.0, 0.0, -30.0)));
    }
}
