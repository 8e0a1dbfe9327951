//! Agent State
//!
//! Pose plus the static body/camera parameters of the single agent.

use crate::config::AgentConfig;
use crate::geometry::{wrap_angle, Vec2};

/// Proposed motion for one step
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MotorCommand {
    /// Distance to travel along the new heading
    pub speed: f64,
    /// Change of heading, radians
    pub direction_delta: f64,
}

impl MotorCommand {
    pub fn new(speed: f64, direction_delta: f64) -> Self {
        Self {
            speed,
            direction_delta,
        }
    }
}

/// Candidate pose computed from a command, not yet committed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProposedPose {
    pub position: Vec2,
    pub direction: f64,
}

/// The agent's pose and configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentState {
    position: Vec2,
    /// Heading in radians, kept in [0, 2π)
    direction: f64,
    height: f64,
    view_angle: f64,
    pov_distance: f64,
}

impl AgentState {
    /// New agent at the origin facing angle 0
    pub fn new(config: &AgentConfig) -> Self {
        Self {
            position: Vec2::ORIGIN,
            direction: 0.0,
            height: config.height,
            view_angle: config.view_angle,
            pov_distance: config.pov_distance,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn direction(&self) -> f64 {
        self.direction
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn view_angle(&self) -> f64 {
        self.view_angle
    }

    pub fn pov_distance(&self) -> f64 {
        self.pov_distance
    }

    /// Pose the agent would reach under `command`: turn first, then move
    /// along the new heading.
    pub fn propose(&self, command: MotorCommand) -> ProposedPose {
        let direction = self.direction + command.direction_delta;
        ProposedPose {
            position: self.position + Vec2::from_angle(direction) * command.speed,
            direction,
        }
    }

    /// Commit position and heading together.
    pub(crate) fn commit(&mut self, pose: ProposedPose) {
        self.position = pose.position;
        self.direction = pose.direction;
    }

    /// Wrap the heading into [0, 2π)
    pub(crate) fn normalize_direction(&mut self) {
        self.direction = wrap_angle(self.direction);
    }

    /// Back to the origin, facing angle 0
    pub(crate) fn reset(&mut self) {
        self.position = Vec2::ORIGIN;
        self.direction = 0.0;
    }
}
