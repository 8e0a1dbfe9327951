//! Determinism verification tests
//!
//! Identical configs and command sequences must produce identical arenas,
//! poses and frames.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use retina_frames::{read_frames, FrameLogger};
use retina_sim::steering::{self, Steering};
use retina_sim::{AgentSimulator, Arena, MotorCommand, Rendered, SimConfig, SteeringMode};
use std::sync::Arc;

/// Random commands from a seeded SmallRng
fn commands(seed: u64, count: usize) -> Vec<MotorCommand> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..count)
        .map(|_| MotorCommand::new(rng.gen_range(0.0..0.5), rng.gen_range(-0.3..0.3)))
        .collect()
}

fn run(config: SimConfig, commands: &[MotorCommand]) -> AgentSimulator {
    let mut sim = AgentSimulator::new(config).expect("valid config");
    for &command in commands {
        sim.apply(command);
    }
    sim
}

#[test]
fn test_arena_construction_is_deterministic() {
    for num_walls in 3..12 {
        let a = Arena::new(4.0, 1.5, num_walls).unwrap();
        let b = Arena::new(4.0, 1.5, num_walls).unwrap();
        assert_eq!(a.vertices(), b.vertices());
    }
}

#[test]
fn test_same_commands_same_frames() {
    let cmds = commands(42, 300);
    let mut a = AgentSimulator::new(SimConfig::default()).unwrap();
    let mut b = AgentSimulator::new(SimConfig::default()).unwrap();

    for &command in &cmds {
        let frame = a.apply(command).clone();
        assert_eq!(b.apply(command), &frame);
        assert_eq!(a.position(), b.position());
        assert_eq!(a.direction(), b.direction());
    }
}

#[test]
fn test_different_seeds_diverge() {
    let a = run(SimConfig::default(), &commands(42, 100));
    let b = run(SimConfig::default(), &commands(43, 100));

    assert_ne!(a.position(), b.position());
}

#[test]
fn test_shared_arena_does_not_couple_agents() {
    let config = SimConfig::default();
    let arena = Arc::new(Arena::from_config(&config.arena).unwrap());
    let mut a = AgentSimulator::with_arena(
        Arc::clone(&arena),
        config.retina.clone(),
        config.agent.clone(),
    )
    .unwrap();
    let mut b = AgentSimulator::with_arena(arena, config.retina, config.agent).unwrap();

    a.step(1.0, 0.5);
    let untouched = b.step(0.0, 0.0).clone();

    assert_ne!(a.position(), b.position());
    assert_eq!(b.step(0.0, 0.0), &untouched);
}

#[test]
fn test_reset_replays_identically() {
    let cmds = commands(7, 50);
    let mut sim = run(SimConfig::default(), &cmds);
    let first_end = (sim.position(), sim.direction(), sim.retina().clone());

    sim.reset();
    for &command in &cmds {
        sim.apply(command);
    }

    assert_eq!(sim.step_count(), 50);
    assert_eq!(sim.position(), first_end.0);
    assert_eq!(sim.direction(), first_end.1);
    assert_eq!(sim.retina(), &first_end.2);
}

#[test]
fn test_random_walk_schedule_is_reproducible() {
    let mut config = SimConfig::default();
    config.driver.steering = SteeringMode::RandomWalk;
    config.driver.seed = 99;

    let drive = |config: &SimConfig| {
        let mut sim = AgentSimulator::new(config.clone()).unwrap();
        let mut schedule = steering::from_config(&config.driver);
        for step in 0..200 {
            sim.apply(schedule.next_command(step));
        }
        (sim.position(), sim.direction())
    };

    assert_eq!(drive(&config), drive(&config));
}

#[test]
fn test_recorded_run_matches_live_run() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("run.jsonl");
    let cmds = commands(5, 25);

    let logger = FrameLogger::new(&path).unwrap();
    let mut rendered = Rendered::new(AgentSimulator::new(SimConfig::default()).unwrap(), logger);
    for &command in &cmds {
        rendered.apply(command).unwrap();
    }
    let (live, logger) = rendered.finish().unwrap();
    assert_eq!(logger.frame_count(), 25);
    drop(logger);

    let recorded = read_frames(&path).unwrap();
    let header = recorded.header.expect("header line");
    assert_eq!(header.num_walls, 4);
    assert_eq!(header.vertices.len(), 5);
    assert_eq!((header.retina_height, header.retina_width), (50, 80));

    assert_eq!(recorded.frames.len(), 25);
    let last = recorded.frames.last().unwrap();
    assert_eq!(last.step, 25);
    assert!((last.pose.x - live.position().x).abs() < 1e-12);
    assert!((last.pose.direction - live.direction()).abs() < 1e-12);
    assert_eq!(last.retina.to_pixels(), live.retina().as_slice().to_vec());
}
