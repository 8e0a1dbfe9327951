//! Pinhole projection of wall distances onto retina rows.
//!
//! Uses the tangent of the elevation angle scaled by the projection-plane
//! distance, not a true arctangent projection.

use crate::config::RetinaConfig;

/// Heights on the projection plane for one wall distance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallProjection {
    /// Drop from the horizon to the wall base
    pub pov_base: f64,
    /// Rise from the horizon to the wall top
    pub pov_top: f64,
}

/// Converts wall distances to floor/ceiling boundary rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    agent_height: f64,
    wall_height: f64,
    pov_distance: f64,
    scale: f64,
    horizon_row: i64,
}

impl Projector {
    pub fn new(agent_height: f64, wall_height: f64, pov_distance: f64, retina: &RetinaConfig) -> Self {
        Self {
            agent_height,
            wall_height,
            pov_distance,
            scale: retina.scale,
            horizon_row: retina.horizon_row as i64,
        }
    }

    pub fn horizon_row(&self) -> i64 {
        self.horizon_row
    }

    pub fn project(&self, distance: f64) -> WallProjection {
        let base_tan = self.agent_height / distance;
        let top_tan = (self.wall_height - self.agent_height) / distance;
        WallProjection {
            pov_base: base_tan * self.pov_distance,
            pov_top: top_tan * self.pov_distance,
        }
    }

    /// `(base_row, top_row)` before the image is flipped. Rows may fall
    /// outside the retina; callers clip.
    pub fn rows(&self, distance: f64) -> (i64, i64) {
        let p = self.project(distance);
        let base = self
            .horizon_row
            .saturating_sub((p.pov_base / self.scale).round() as i64);
        let top = self
            .horizon_row
            .saturating_add((p.pov_top / self.scale).round() as i64);
        (base, top)
    }
}
