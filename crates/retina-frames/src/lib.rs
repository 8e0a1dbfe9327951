//! Shared frame records and serialization for the arena retina simulator.
//!
//! This crate contains pure data structures with no simulation logic.
//! A recorded run is a JSONL file: one [`ArenaHeader`] line followed by one
//! [`FrameRecord`] line per simulation step.

pub mod frame;
pub mod logger;

pub use frame::{ArenaHeader, FrameLine, FrameRecord, PoseSnapshot, RetinaSnapshot, LIT, UNLIT};
pub use logger::{read_frames, FrameLogger, RecordedRun};
