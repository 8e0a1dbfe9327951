//! Configuration System
//!
//! Arena, retina, agent and driver parameters, loadable from TOML. Every
//! section and field has a default, so partial files are valid.

use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};
use std::path::Path;
use thiserror::Error;

/// Default config file path
pub const DEFAULT_CONFIG_PATH: &str = "arena.toml";

/// Complete simulator configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    #[serde(default)]
    pub arena: ArenaConfig,
    #[serde(default)]
    pub retina: RetinaConfig,
    #[serde(default)]
    pub agent: AgentConfig,
    #[serde(default)]
    pub driver: DriverConfig,
}

impl SimConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Serializes the configuration as pretty TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Checks every section, failing on the first invalid field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.arena.validate()?;
        self.retina.validate()?;
        self.agent.validate()?;
        self.driver.validate()
    }
}

/// Wall polygon parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Circumradius of the wall polygon
    pub wall_dist: f64,
    /// Height of every wall above the floor
    pub wall_height: f64,
    /// Number of walls (polygon sides)
    pub num_walls: usize,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            wall_dist: 5.0,
            wall_height: 1.0,
            num_walls: 4,
        }
    }
}

impl ArenaConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_walls < 3 {
            return Err(ConfigError::invalid(
                "arena.num_walls",
                format!("need at least 3 walls, got {}", self.num_walls),
            ));
        }
        require_positive("arena.wall_dist", self.wall_dist)?;
        require_positive("arena.wall_height", self.wall_height)
    }
}

/// Retina image geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetinaConfig {
    /// Number of columns (one ray per column)
    pub width: usize,
    /// Number of rows
    pub height: usize,
    /// Projection-plane units per pixel row
    pub scale: f64,
    /// Row of the agent's eye-level horizon
    pub horizon_row: usize,
}

impl Default for RetinaConfig {
    fn default() -> Self {
        Self {
            width: 80,
            height: 50,
            scale: 0.008,
            horizon_row: 20,
        }
    }
}

impl RetinaConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 {
            return Err(ConfigError::invalid("retina.width", "must be at least 1"));
        }
        if self.height == 0 {
            return Err(ConfigError::invalid("retina.height", "must be at least 1"));
        }
        require_positive("retina.scale", self.scale)
    }
}

/// Static agent body and camera parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Eye height above the floor
    pub height: f64,
    /// Horizontal field of view in radians
    pub view_angle: f64,
    /// Distance from the eye to the projection plane
    pub pov_distance: f64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            height: 0.5,
            view_angle: 1.5 * PI,
            pov_distance: 0.5,
        }
    }
}

impl AgentConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("agent.height", self.height)?;
        require_positive("agent.view_angle", self.view_angle)?;
        if self.view_angle > TAU {
            return Err(ConfigError::invalid(
                "agent.view_angle",
                format!("must not exceed 2π, got {}", self.view_angle),
            ));
        }
        require_positive("agent.pov_distance", self.pov_distance)
    }
}

/// How the driver loop picks motor commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SteeringMode {
    /// Constant speed with a cosine turn rate sweeping 0..4π over the run
    #[default]
    Sine,
    /// Constant speed with uniformly random turns from a seeded RNG
    RandomWalk,
}

/// Parameters for the `arena_sim` driver loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Number of steps to run
    pub steps: u64,
    /// Distance proposed per step
    pub speed: f64,
    /// Turn rate multiplier for sine steering
    pub turn_scale: f64,
    /// Maximum absolute turn per step for random-walk steering
    pub max_turn: f64,
    pub steering: SteeringMode,
    /// Seed for random-walk steering
    pub seed: u64,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            steps: 2000,
            speed: 0.015,
            turn_scale: 0.01,
            max_turn: 0.05,
            steering: SteeringMode::Sine,
            seed: 42,
        }
    }
}

impl DriverConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.speed.is_finite() || self.speed < 0.0 {
            return Err(ConfigError::invalid(
                "driver.speed",
                format!("must be finite and non-negative, got {}", self.speed),
            ));
        }
        if !self.turn_scale.is_finite() {
            return Err(ConfigError::invalid("driver.turn_scale", "must be finite"));
        }
        if !self.max_turn.is_finite() || self.max_turn < 0.0 {
            return Err(ConfigError::invalid(
                "driver.max_turn",
                format!("must be finite and non-negative, got {}", self.max_turn),
            ));
        }
        Ok(())
    }
}

fn require_positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            field,
            format!("must be finite and positive, got {}", value),
        ))
    }
}

/// Errors that can occur while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Generates a default configuration file content.
pub fn default_config_toml() -> String {
    r#"# Arena retina simulator configuration

[arena]
wall_dist = 5.0
wall_height = 1.0
num_walls = 4

[retina]
width = 80
height = 50
scale = 0.008
horizon_row = 20

[agent]
height = 0.5
view_angle = 4.71238898038469  # 1.5π
pov_distance = 0.5

[driver]
steps = 2000
speed = 0.015
turn_scale = 0.01
max_turn = 0.05
steering = "sine"
seed = 42
"#
    .to_string()
}
