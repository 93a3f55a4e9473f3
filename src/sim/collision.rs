//! Collision tests
//!
//! Projectiles and targets are treated as points; a hit is any centre-to-centre
//! distance strictly under the hit radius. Projectiles are also discarded once
//! they leave the arena volume.

use glam::Vec3;

use super::arena::ArenaState;
use crate::consts::PROJECTILE_CEILING;

/// Whether two points are closer than `radius`
#[inline]
pub fn within_radius(a: Vec3, b: Vec3, radius: f32) -> bool {
    a.distance_squared(b) < radius * radius
}

/// Index of the first candidate within `radius` of `point`.
///
/// Candidates are scanned back to front, so the newest overlapping candidate
/// wins, and the scan stops at the first hit: a projectile never damages more
/// than one target.
pub fn first_hit<I>(point: Vec3, radius: f32, candidates: I) -> Option<usize>
where
    I: IntoIterator<Item = Vec3>,
    I::IntoIter: DoubleEndedIterator + ExactSizeIterator,
{
    candidates
        .into_iter()
        .rposition(|candidate| within_radius(point, candidate, radius))
}

/// Whether a projectile has left the playable volume
pub fn projectile_out_of_bounds(pos: Vec3, arena: &ArenaState) -> bool {
    arena.is_outside(pos) || pos.y < 0.0 || pos.y > PROJECTILE_CEILING
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_within_radius_is_strict() {
        let origin = Vec3::ZERO;
        assert!(within_radius(origin, Vec3::new(0.59, 0.0, 0.0), 0.6));
        assert!(!within_radius(origin, Vec3::new(0.6, 0.0, 0.0), 0.6));
    }

    #[test]
    fn test_first_hit_scans_newest_first() {
        let point = Vec3::new(0.0, 0.5, 0.0);
        let candidates = [
            Vec3::new(0.3, 0.5, 0.0),
            Vec3::new(0.0, 0.5, 0.1),
            Vec3::new(10.0, 0.5, 0.0),
        ];
        assert_eq!(first_hit(point, 0.6, candidates), Some(1));
        assert_eq!(first_hit(point, 0.2, candidates), Some(1));
        assert_eq!(first_hit(point, 0.4, candidates[..1].iter().copied()), Some(0));
        assert_eq!(first_hit(point, 0.05, candidates), None);
    }

    #[test]
    fn test_projectile_bounds() {
        let arena = ArenaState::new(50.0, 0.4);
        assert!(!projectile_out_of_bounds(Vec3::new(0.0, 1.0, 0.0), &arena));
        assert!(projectile_out_of_bounds(Vec3::new(0.0, -0.1, 0.0), &arena));
        assert!(projectile_out_of_bounds(Vec3::new(0.0, 50.5, 0.0), &arena));
        assert!(projectile_out_of_bounds(Vec3::new(26.0, 1.0, 0.0), &arena));
    }
}
