//! Ray fan: one ray per retina column, centred in its angular slice.

use crate::arena::Arena;
use crate::geometry::{wrap_angle, Segment, Vec2};

/// Angular layout of the rays for one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayFan {
    /// Left edge of the field of view (unwrapped)
    start: f64,
    /// Width of each column's slice
    increment: f64,
    count: usize,
}

impl RayFan {
    /// Fan of `count` rays spanning `view_angle` centred on `direction`.
    pub fn new(direction: f64, view_angle: f64, count: usize) -> Self {
        Self {
            start: direction - view_angle / 2.0,
            increment: view_angle / count as f64,
            count,
        }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn increment(&self) -> f64 {
        self.increment
    }

    /// Angle of the ray for column `i` (unwrapped)
    pub fn ray_angle(&self, i: usize) -> f64 {
        self.start + (i as f64 + 0.5) * self.increment
    }

    /// Wrapped lower bound of column `i`'s slice
    pub fn slice_lower(&self, i: usize) -> f64 {
        wrap_angle(self.ray_angle(i) - self.increment / 2.0)
    }

    /// Wrapped upper bound of column `i`'s slice
    pub fn slice_upper(&self, i: usize) -> f64 {
        wrap_angle(self.ray_angle(i) + self.increment / 2.0)
    }

    pub fn angles(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.count).map(move |i| self.ray_angle(i))
    }
}

/// Result of casting one ray against the walls
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Distance from the ray origin to the wall
    pub distance: f64,
    /// Wall point hit, `None` when the far clip was used instead
    pub point: Option<Vec2>,
}

impl RayHit {
    pub fn is_far_clip(&self) -> bool {
        self.point.is_none()
    }
}

/// Cast a ray of the arena's maximum field-of-view length. A ray that finds
/// no wall (origin on the boundary) reports the far-clip distance.
pub fn cast(arena: &Arena, origin: Vec2, angle: f64) -> RayHit {
    let max_distance = arena.max_fov_distance();
    let ray = Segment::ray(origin, angle, max_distance);

    match arena.intersect(&ray) {
        Some(point) => RayHit {
            distance: origin.distance(point),
            point: Some(point),
        },
        None => {
            tracing::warn!(
                x = origin.x,
                y = origin.y,
                angle,
                "Ray found no wall, using far clip"
            );
            RayHit {
                distance: max_distance,
                point: None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_1_SQRT_2, PI, TAU};

    #[test]
    fn test_rays_centred_in_slices() {
        let fan = RayFan::new(0.0, PI, 4);

        assert_eq!(fan.len(), 4);
        assert!((fan.increment() - PI / 4.0).abs() < 1e-12);
        assert!((fan.ray_angle(0) - (-PI / 2.0 + PI / 8.0)).abs() < 1e-12);
        assert!((fan.ray_angle(3) - (PI / 2.0 - PI / 8.0)).abs() < 1e-12);
    }

    #[test]
    fn test_fan_sweeps_left_to_right_from_heading() {
        let fan = RayFan::new(1.0, 0.5, 5);
        let angles: Vec<f64> = fan.angles().collect();

        assert!(angles.windows(2).all(|w| w[1] > w[0]));
        assert!((angles[2] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_slice_bounds_wrap() {
        let fan = RayFan::new(0.0, TAU, 3);

        // Middle column straddles the seam
        assert!(fan.slice_lower(1) > PI);
        assert!(fan.slice_upper(1) < PI);
        for i in 0..3 {
            assert!((0.0..TAU).contains(&fan.slice_lower(i)));
            assert!((0.0..TAU).contains(&fan.slice_upper(i)));
        }
    }

    #[test]
    fn test_cast_hits_face() {
        let arena = Arena::new(5.0, 1.0, 4).unwrap();
        let hit = cast(&arena, Vec2::ORIGIN, PI);

        assert!(!hit.is_far_clip());
        assert!((hit.distance - 5.0 * FRAC_1_SQRT_2).abs() < 1e-9);
    }

    #[test]
    fn test_cast_from_outside_uses_far_clip() {
        let arena = Arena::new(5.0, 1.0, 4).unwrap();
        let hit = cast(&arena, Vec2::new(100.0, 0.0), 0.0);

        assert!(hit.is_far_clip());
        assert_eq!(hit.distance, arena.max_fov_distance());
    }
}
