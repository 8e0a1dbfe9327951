//! Wall-corner detection: which columns' slices contain a vertex bearing.

use crate::geometry::{angle_in_slice, bearing, Vec2};

use super::rays::RayFan;

/// Bearings from `origin` to each corner, wrapped to [0, 2π)
pub fn corner_bearings(origin: Vec2, corners: &[Vec2]) -> Vec<f64> {
    corners.iter().map(|&corner| bearing(origin, corner)).collect()
}

/// Columns (ascending) whose slice strictly contains at least one bearing.
/// Slices straddling the 0/2π seam are matched circularly.
pub fn corner_columns(fan: &RayFan, bearings: &[f64]) -> Vec<usize> {
    (0..fan.len())
        .filter(|&i| {
            let lower = fan.slice_lower(i);
            bearings
                .iter()
                .any(|&b| angle_in_slice(b, lower, fan.increment()))
        })
        .collect()
}
