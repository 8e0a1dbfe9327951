//! Arena Retina Simulator
//!
//! A single agent moves inside a static convex polygon of walls. Each step
//! casts one ray per retina column and draws a binary edge map of the
//! walls' floor and ceiling boundaries plus vertical corner silhouettes.
//!
//! # Modules
//!
//! - [`arena`]: wall polygon, containment and ray intersection
//! - [`agent`]: agent pose and motor commands
//! - [`perception`]: rays, projection and corner detection
//! - [`simulator`]: [`AgentSimulator`], the per-step entry point
//! - [`display`]: frame sinks and the [`Rendered`] decorator
//! - [`steering`]: command schedules for the driver loop

pub mod agent;
pub mod arena;
pub mod config;
pub mod display;
pub mod geometry;
pub mod perception;
pub mod retina;
pub mod simulator;
pub mod steering;

pub use agent::{AgentState, MotorCommand};
pub use arena::Arena;
pub use config::{
    default_config_toml, AgentConfig, ArenaConfig, ConfigError, DriverConfig, RetinaConfig,
    SimConfig, SteeringMode,
};
pub use display::{AsciiDisplay, DisplayError, FrameSink, FrameView, NullSink, Rendered, Tee};
pub use geometry::{Segment, Vec2};
pub use perception::ColumnProjection;
pub use retina::RetinaBuffer;
pub use simulator::AgentSimulator;
pub use steering::{RandomWalkSteering, SineSteering, Steering};
