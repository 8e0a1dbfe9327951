//! Frame Logger
//!
//! Append-only JSONL frame logging.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::frame::{ArenaHeader, FrameLine, FrameRecord};

/// Writes a recorded run to a JSONL file
pub struct FrameLogger {
    writer: Option<BufWriter<File>>,
    frame_count: u64,
}

impl FrameLogger {
    /// Create a new frame logger writing to the specified path
    pub fn new(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        Ok(Self {
            writer: Some(BufWriter::new(file)),
            frame_count: 0,
        })
    }

    /// Create a logger that discards frames (for testing)
    pub fn null() -> Self {
        Self {
            writer: None,
            frame_count: 0,
        }
    }

    /// Get the number of frames logged so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Write the arena header line
    pub fn log_header(&mut self, header: &ArenaHeader) -> io::Result<()> {
        self.write_line(&FrameLine::Arena(header.clone()))
    }

    /// Log a frame to the file
    pub fn log(&mut self, frame: &FrameRecord) -> io::Result<()> {
        self.frame_count += 1;
        self.write_line(&FrameLine::Frame(frame.clone()))
    }

    /// Flush the buffer to disk
    pub fn flush(&mut self) -> io::Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }

    fn write_line(&mut self, line: &FrameLine) -> io::Result<()> {
        if let Some(ref mut writer) = self.writer {
            let json = line.to_jsonl()?;
            writeln!(writer, "{}", json)?;
        }
        Ok(())
    }
}

impl Drop for FrameLogger {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            eprintln!("Warning: Failed to flush frame logger: {}", e);
        }
    }
}

/// A run loaded back from a JSONL file
#[derive(Debug, Clone, Default)]
pub struct RecordedRun {
    pub header: Option<ArenaHeader>,
    pub frames: Vec<FrameRecord>,
}

/// Load a recorded run, skipping blank lines
pub fn read_frames(path: impl AsRef<Path>) -> io::Result<RecordedRun> {
    let content = fs::read_to_string(path)?;
    let mut run = RecordedRun::default();

    for line in content.lines().filter(|l| !l.trim().is_empty()) {
        match FrameLine::from_jsonl(line)? {
            FrameLine::Arena(header) => run.header = Some(header),
            FrameLine::Frame(frame) => run.frames.push(frame),
        }
    }

    Ok(run)
}
