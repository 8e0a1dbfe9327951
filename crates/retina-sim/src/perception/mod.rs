//! Perception Pipeline
//!
//! Turns the agent's pose into a retina image: one ray per column, wall
//! distances projected to floor/ceiling boundary rows, and vertical corner
//! silhouettes where a wall vertex falls inside a column's slice.

pub mod corners;
pub mod projection;
pub mod rays;

pub use corners::{corner_bearings, corner_columns};
pub use projection::{Projector, WallProjection};
pub use rays::{cast, RayFan, RayHit};

use crate::agent::AgentState;
use crate::arena::Arena;
use crate::config::RetinaConfig;
use crate::retina::RetinaBuffer;

/// Per-column result of the last render, in pre-flip row coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnProjection {
    pub ray_angle: f64,
    pub distance: f64,
    /// Floor/wall-base boundary row
    pub base_row: i64,
    /// Ceiling/wall-top boundary row
    pub top_row: i64,
}

/// Renders retina frames and keeps the last frame's column data.
#[derive(Debug, Clone)]
pub struct RetinaRenderer {
    config: RetinaConfig,
    columns: Vec<ColumnProjection>,
    corner_columns: Vec<usize>,
}

impl RetinaRenderer {
    pub fn new(config: RetinaConfig) -> Self {
        Self {
            columns: Vec::with_capacity(config.width),
            corner_columns: Vec::new(),
            config,
        }
    }

    pub fn config(&self) -> &RetinaConfig {
        &self.config
    }

    /// Column projections from the last render
    pub fn columns(&self) -> &[ColumnProjection] {
        &self.columns
    }

    /// Corner columns from the last render
    pub fn corner_columns(&self) -> &[usize] {
        &self.corner_columns
    }

    /// Clear `buffer` and draw the view from `agent`'s pose. The finished
    /// image is row-reversed so that increasing row means decreasing
    /// elevation.
    pub fn render(&mut self, arena: &Arena, agent: &AgentState, buffer: &mut RetinaBuffer) {
        let origin = agent.position();
        let fan = RayFan::new(agent.direction(), agent.view_angle(), self.config.width);
        let projector = Projector::new(
            agent.height(),
            arena.wall_height(),
            agent.pov_distance(),
            &self.config,
        );

        buffer.clear();
        self.columns.clear();

        for (col, ray_angle) in fan.angles().enumerate() {
            let hit = cast(arena, origin, ray_angle);
            let (base_row, top_row) = projector.rows(hit.distance);

            buffer.light(base_row, col);
            buffer.light(top_row, col);

            self.columns.push(ColumnProjection {
                ray_angle,
                distance: hit.distance,
                base_row,
                top_row,
            });
        }

        let bearings = corner_bearings(origin, arena.corners());
        self.corner_columns = corner_columns(&fan, &bearings);
        for &col in &self.corner_columns {
            let column = self.columns[col];
            buffer.light_span(col, column.base_row, column.top_row);
        }

        buffer.flip_rows();
    }
}
