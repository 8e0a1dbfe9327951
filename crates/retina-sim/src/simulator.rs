//! Agent Simulator
//!
//! Owns the agent pose and the retina buffer. `step` is the only operation
//! that mutates the pose: it proposes a move, keeps it only if the arena
//! still contains the agent, then renders a fresh retina frame.

use std::sync::Arc;

use crate::agent::{AgentState, MotorCommand};
use crate::arena::Arena;
use crate::config::{AgentConfig, ConfigError, RetinaConfig, SimConfig};
use crate::geometry::Vec2;
use crate::perception::{ColumnProjection, RetinaRenderer};
use crate::retina::RetinaBuffer;

/// Single-agent simulator over a shared, immutable arena.
#[derive(Debug, Clone)]
pub struct AgentSimulator {
    arena: Arc<Arena>,
    agent: AgentState,
    retina: RetinaBuffer,
    renderer: RetinaRenderer,
    step_count: u64,
    last_accepted: bool,
}

impl AgentSimulator {
    /// Validate `config` and build the arena, agent and retina.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        let arena = Arena::from_config(&config.arena)?;
        Self::with_arena(Arc::new(arena), config.retina, config.agent)
    }

    /// Build a simulator over an existing arena.
    pub fn with_arena(
        arena: Arc<Arena>,
        retina: RetinaConfig,
        agent: AgentConfig,
    ) -> Result<Self, ConfigError> {
        retina.validate()?;
        agent.validate()?;

        tracing::info!(
            width = retina.width,
            height = retina.height,
            view_angle = agent.view_angle,
            "Created agent simulator"
        );

        Ok(Self {
            arena,
            agent: AgentState::new(&agent),
            retina: RetinaBuffer::new(retina.height, retina.width),
            renderer: RetinaRenderer::new(retina),
            step_count: 0,
            last_accepted: true,
        })
    }

    /// Advance one step and return the new retina frame.
    ///
    /// The heading change and the translation are accepted or rejected
    /// together: if the proposed position is not strictly inside the arena
    /// the whole motion is discarded. Rejection is not an error.
    pub fn step(&mut self, speed: f64, direction_delta: f64) -> &RetinaBuffer {
        self.apply(MotorCommand::new(speed, direction_delta))
    }

    /// [`step`](Self::step) taking a [`MotorCommand`].
    pub fn apply(&mut self, command: MotorCommand) -> &RetinaBuffer {
        let proposed = self.agent.propose(command);
        self.last_accepted = self.arena.contains(proposed.position);
        if self.last_accepted {
            self.agent.commit(proposed);
        } else {
            tracing::debug!(
                step = self.step_count,
                x = proposed.position.x,
                y = proposed.position.y,
                "Rejected motion outside arena"
            );
        }
        self.agent.normalize_direction();

        self.renderer.render(&self.arena, &self.agent, &mut self.retina);
        self.step_count += 1;

        tracing::trace!(
            step = self.step_count,
            x = self.agent.position().x,
            y = self.agent.position().y,
            direction = self.agent.direction(),
            "Stepped"
        );

        &self.retina
    }

    /// Return the agent to the origin facing angle 0 and clear the retina.
    pub fn reset(&mut self) {
        self.agent.reset();
        self.retina.clear();
        self.step_count = 0;
        self.last_accepted = true;
    }

    pub fn position(&self) -> Vec2 {
        self.agent.position()
    }

    /// Heading in [0, 2π)
    pub fn direction(&self) -> f64 {
        self.agent.direction()
    }

    pub fn agent(&self) -> &AgentState {
        &self.agent
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Shared handle to the arena
    pub fn arena_handle(&self) -> Arc<Arena> {
        Arc::clone(&self.arena)
    }

    /// Closed wall polygon, for renderers
    pub fn wall_polygon(&self) -> &[Vec2] {
        self.arena.vertices()
    }

    /// The most recently rendered frame
    pub fn retina(&self) -> &RetinaBuffer {
        &self.retina
    }

    pub fn retina_config(&self) -> &RetinaConfig {
        self.renderer.config()
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Whether the last step's motion was committed
    pub fn last_motion_accepted(&self) -> bool {
        self.last_accepted
    }

    /// Per-column projection of the last frame (pre-flip rows)
    pub fn last_columns(&self) -> &[ColumnProjection] {
        self.renderer.columns()
    }

    /// Columns that carried a corner silhouette in the last frame
    pub fn last_corner_columns(&self) -> &[usize] {
        self.renderer.corner_columns()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_simulator_defaults() {
        let sim = AgentSimulator::new(SimConfig::default()).unwrap();

        assert_eq!(sim.position(), Vec2::ORIGIN);
        assert_eq!(sim.direction(), 0.0);
        assert_eq!(sim.retina().shape(), (50, 80));
        assert_eq!(sim.wall_polygon().len(), 5);
        assert_eq!(sim.step_count(), 0);
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let mut config = SimConfig::default();
        config.arena.num_walls = 1;
        assert!(AgentSimulator::new(config).is_err());

        let mut config = SimConfig::default();
        config.agent.height = 0.0;
        assert!(AgentSimulator::new(config).is_err());
    }

    #[test]
    fn test_step_moves_agent() {
        let mut sim = AgentSimulator::new(SimConfig::default()).unwrap();
        sim.step(1.0, 0.0);

        assert!(sim.last_motion_accepted());
        assert!((sim.position().x - 1.0).abs() < 1e-12);
        assert_eq!(sim.step_count(), 1);
    }

    #[test]
    fn test_shared_arena() {
        let arena = Arc::new(Arena::new(5.0, 1.0, 6).unwrap());
        let a = AgentSimulator::with_arena(
            Arc::clone(&arena),
            RetinaConfig::default(),
            AgentConfig::default(),
        )
        .unwrap();
        let b = AgentSimulator::with_arena(
            Arc::clone(&arena),
            RetinaConfig::default(),
            AgentConfig::default(),
        )
        .unwrap();

        assert_eq!(a.wall_polygon(), b.wall_polygon());
        assert_eq!(Arc::strong_count(&arena), 3);
    }

    #[test]
    fn test_reset() {
        let mut sim = AgentSimulator::new(SimConfig::default()).unwrap();
        sim.step(1.0, 0.7);
        sim.reset();

        assert_eq!(sim.position(), Vec2::ORIGIN);
        assert_eq!(sim.direction(), 0.0);
        assert_eq!(sim.retina().lit_count(), 0);
        assert_eq!(sim.step_count(), 0);
    }
}
