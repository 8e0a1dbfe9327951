//! Arena
//!
//! The static convex wall polygon that bounds the agent, with containment and
//! ray intersection queries.

use std::f64::consts::{PI, TAU};

use crate::config::{ArenaConfig, ConfigError};
use crate::geometry::{point_in_ring, Segment, Vec2};

/// A regular polygon of walls centred on the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Arena {
    wall_dist: f64,
    wall_height: f64,
    num_walls: usize,
    /// Closed ring: `num_walls + 1` points, last == first
    ring: Vec<Vec2>,
}

impl Arena {
    /// Builds a regular `num_walls`-gon inscribed at radius `wall_dist`.
    ///
    /// Vertex `k` sits at angle `2πk/N − π/N`, so wall faces (not corners)
    /// are centred on the sector boundaries `0, 2π/N, ...`.
    pub fn new(wall_dist: f64, wall_height: f64, num_walls: usize) -> Result<Self, ConfigError> {
        let config = ArenaConfig {
            wall_dist,
            wall_height,
            num_walls,
        };
        Self::from_config(&config)
    }

    pub fn from_config(config: &ArenaConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let sector = TAU / config.num_walls as f64;
        let mut ring: Vec<Vec2> = (0..config.num_walls)
            .map(|k| Vec2::polar(config.wall_dist, sector * k as f64 - PI / config.num_walls as f64))
            .collect();
        ring.push(ring[0]);

        tracing::info!(
            num_walls = config.num_walls,
            wall_dist = config.wall_dist,
            wall_height = config.wall_height,
            "Built arena"
        );

        Ok(Self {
            wall_dist: config.wall_dist,
            wall_height: config.wall_height,
            num_walls: config.num_walls,
            ring,
        })
    }

    pub fn wall_dist(&self) -> f64 {
        self.wall_dist
    }

    pub fn wall_height(&self) -> f64 {
        self.wall_height
    }

    pub fn num_walls(&self) -> usize {
        self.num_walls
    }

    /// The closed vertex ring (first vertex repeated at the end)
    pub fn vertices(&self) -> &[Vec2] {
        &self.ring
    }

    /// The distinct wall corners, without the closing repeat
    pub fn corners(&self) -> &[Vec2] {
        &self.ring[..self.num_walls]
    }

    /// Wall segments in traversal order
    pub fn walls(&self) -> impl Iterator<Item = Segment> + '_ {
        self.ring.windows(2).map(|w| Segment::new(w[0], w[1]))
    }

    /// Ray length guaranteed to reach the boundary from any interior point
    pub fn max_fov_distance(&self) -> f64 {
        2.0 * self.wall_dist
    }

    /// Strict interior test: points on a wall are outside.
    pub fn contains(&self, point: Vec2) -> bool {
        if !point.x.is_finite() || !point.y.is_finite() {
            return false;
        }
        if self.walls().any(|wall| wall.touches(point)) {
            return false;
        }
        point_in_ring(point, &self.ring)
    }

    /// Nearest point where `ray` crosses the wall boundary.
    ///
    /// Ties between walls (a ray through a vertex) keep the first wall in
    /// traversal order.
    pub fn intersect(&self, ray: &Segment) -> Option<Vec2> {
        let mut nearest: Option<f64> = None;
        for wall in self.walls() {
            if let Some(t) = ray.intersection_param(&wall) {
                if nearest.map_or(true, |best| t < best) {
                    nearest = Some(t);
                }
            }
        }
        nearest.map(|t| ray.start + ray.direction() * t)
    }
}
