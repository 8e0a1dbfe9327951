//! Frame Types
//!
//! Serialization structs for per-step retina frames.
//!
//! Retina rows are stored as strings of `'0'`/`'1'` characters so recorded
//! runs stay readable and diffable.

use serde::{Deserialize, Serialize};

/// Character used for a lit retina pixel
pub const LIT: char = '1';
/// Character used for a background retina pixel
pub const UNLIT: char = '0';

/// Static description of the arena, written once at the top of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArenaHeader {
    pub num_walls: usize,
    pub wall_dist: f64,
    pub wall_height: f64,
    /// Closed ring of wall vertices (last == first)
    pub vertices: Vec<[f64; 2]>,
    pub retina_width: usize,
    pub retina_height: usize,
}

/// Agent pose at the end of a step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoseSnapshot {
    pub x: f64,
    pub y: f64,
    /// Heading in radians, in [0, 2π)
    pub direction: f64,
}

/// Retina image encoded as one string per row, top row first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetinaSnapshot {
    pub width: usize,
    pub height: usize,
    pub rows: Vec<String>,
}

impl RetinaSnapshot {
    /// Builds a snapshot from row-major pixel values (non-zero is lit).
    pub fn from_pixels(width: usize, height: usize, pixels: &[u8]) -> Self {
        let rows = pixels
            .chunks(width.max(1))
            .take(height)
            .map(|row| row.iter().map(|&p| if p != 0 { LIT } else { UNLIT }).collect())
            .collect();

        Self { width, height, rows }
    }

    /// Decodes the rows back into row-major pixel values.
    pub fn to_pixels(&self) -> Vec<u8> {
        self.rows
            .iter()
            .flat_map(|row| row.chars().map(|c| u8::from(c == LIT)))
            .collect()
    }

    /// Number of lit pixels
    pub fn lit_count(&self) -> usize {
        self.rows
            .iter()
            .map(|row| row.chars().filter(|&c| c == LIT).count())
            .sum()
    }
}

/// A single recorded simulation step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    pub step: u64,
    pub pose: PoseSnapshot,
    /// Whether the proposed motion for this step was committed
    #[serde(default = "default_accepted")]
    pub accepted: bool,
    pub retina: RetinaSnapshot,
}

fn default_accepted() -> bool {
    true
}

/// One line of a recorded run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FrameLine {
    Arena(ArenaHeader),
    Frame(FrameRecord),
}

impl FrameLine {
    /// Serializes the line as a single JSON object (no trailing newline).
    pub fn to_jsonl(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Parses one JSONL line.
    pub fn from_jsonl(line: &str) -> serde_json::Result<Self> {
        serde_json::from_str(line)
    }
}
