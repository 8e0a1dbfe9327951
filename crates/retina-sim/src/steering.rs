//! Steering schedules for the driver loop.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;

use crate::agent::MotorCommand;
use crate::config::{DriverConfig, SteeringMode};

/// Produces one motor command per step
pub trait Steering {
    fn next_command(&mut self, step: u64) -> MotorCommand;
}

/// Constant speed with turn rate `turn_scale * (2 cos t - 1)`, where `t`
/// sweeps [0, 4π] evenly across the run.
#[derive(Debug, Clone)]
pub struct SineSteering {
    speed: f64,
    turn_scale: f64,
    total_steps: u64,
}

impl SineSteering {
    pub fn new(speed: f64, turn_scale: f64, total_steps: u64) -> Self {
        Self {
            speed,
            turn_scale,
            total_steps,
        }
    }

    fn phase(&self, step: u64) -> f64 {
        if self.total_steps < 2 {
            return 0.0;
        }
        4.0 * PI * step as f64 / (self.total_steps - 1) as f64
    }
}

impl Steering for SineSteering {
    fn next_command(&mut self, step: u64) -> MotorCommand {
        let t = self.phase(step);
        MotorCommand::new(self.speed, self.turn_scale * (2.0 * t.cos() - 1.0))
    }
}

/// Constant speed with uniformly random turns in `[-max_turn, max_turn]`.
#[derive(Debug, Clone)]
pub struct RandomWalkSteering {
    speed: f64,
    max_turn: f64,
    rng: SmallRng,
}

impl RandomWalkSteering {
    pub fn new(speed: f64, max_turn: f64, seed: u64) -> Self {
        Self {
            speed,
            max_turn,
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Steering for RandomWalkSteering {
    fn next_command(&mut self, _step: u64) -> MotorCommand {
        let turn = if self.max_turn > 0.0 {
            self.rng.gen_range(-self.max_turn..=self.max_turn)
        } else {
            0.0
        };
        MotorCommand::new(self.speed, turn)
    }
}

/// Build the steering schedule selected by `config`
pub fn from_config(config: &DriverConfig) -> Box<dyn Steering> {
    match config.steering {
        SteeringMode::Sine => Box::new(SineSteering::new(
            config.speed,
            config.turn_scale,
            config.steps,
        )),
        SteeringMode::RandomWalk => Box::new(RandomWalkSteering::new(
            config.speed,
            config.max_turn,
            config.seed,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sine_schedule_endpoints() {
        let mut steering = SineSteering::new(0.015, 0.01, 101);

        let first = steering.next_command(0);
        assert_eq!(first.speed, 0.015);
        assert!((first.direction_delta - 0.01).abs() < 1e-12);

        // t = π halfway through a 4π sweep
        let quarter = steering.next_command(25);
        assert!((quarter.direction_delta + 0.03).abs() < 1e-12);

        let last = steering.next_command(100);
        assert!((last.direction_delta - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_sine_single_step_run() {
        let mut steering = SineSteering::new(1.0, 1.0, 1);
        assert!((steering.next_command(0).direction_delta - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_random_walk_is_seeded() {
        let mut a = RandomWalkSteering::new(0.1, 0.2, 7);
        let mut b = RandomWalkSteering::new(0.1, 0.2, 7);

        for step in 0..50 {
            let ca = a.next_command(step);
            assert_eq!(ca, b.next_command(step));
            assert!(ca.direction_delta.abs() <= 0.2);
        }
    }

    #[test]
    fn test_from_config_selects_mode() {
        let mut config = DriverConfig {
            steering: SteeringMode::RandomWalk,
            max_turn: 0.0,
            ..DriverConfig::default()
        };
        let mut steering = from_config(&config);
        assert_eq!(steering.next_command(0).direction_delta, 0.0);

        config.steering = SteeringMode::Sine;
        let mut steering = from_config(&config);
        assert!(steering.next_command(0).direction_delta > 0.0);
    }
}
