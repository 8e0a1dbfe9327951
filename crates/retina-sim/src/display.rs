//! Display Overlay
//!
//! Frame sinks receive each fresh retina together with the agent pose and
//! the wall polygon. [`Rendered`] wraps a headless [`AgentSimulator`] and
//! forwards every frame to a sink, so the simulator itself never depends on
//! a display.

use std::io::{self, Write};

use retina_frames::{ArenaHeader, FrameLogger, FrameRecord, PoseSnapshot, RetinaSnapshot};
use thiserror::Error;

use crate::agent::MotorCommand;
use crate::geometry::Vec2;
use crate::retina::RetinaBuffer;
use crate::simulator::AgentSimulator;

/// Length of the heading marker drawn from the agent position
pub const NOSE_LENGTH: f64 = 0.3;

/// Borrowed view of one finished step
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub step: u64,
    pub retina: &'a RetinaBuffer,
    pub position: Vec2,
    pub direction: f64,
    pub accepted: bool,
    /// Closed wall ring
    pub walls: &'a [Vec2],
}

impl<'a> FrameView<'a> {
    /// Capture the simulator's current frame
    pub fn of(sim: &'a AgentSimulator) -> Self {
        Self {
            step: sim.step_count(),
            retina: sim.retina(),
            position: sim.position(),
            direction: sim.direction(),
            accepted: sim.last_motion_accepted(),
            walls: sim.wall_polygon(),
        }
    }

    /// Tip of the heading marker
    pub fn nose(&self) -> Vec2 {
        self.position + Vec2::from_angle(self.direction) * NOSE_LENGTH
    }

    pub fn to_record(&self) -> FrameRecord {
        let (rows, cols) = self.retina.shape();
        FrameRecord {
            step: self.step,
            pose: PoseSnapshot {
                x: self.position.x,
                y: self.position.y,
                direction: self.direction,
            },
            accepted: self.accepted,
            retina: RetinaSnapshot::from_pixels(cols, rows, self.retina.as_slice()),
        }
    }
}

/// Header record describing the simulator's arena and retina size
pub fn arena_header(sim: &AgentSimulator) -> ArenaHeader {
    let arena = sim.arena();
    let (rows, cols) = sim.retina().shape();
    ArenaHeader {
        num_walls: arena.num_walls(),
        wall_dist: arena.wall_dist(),
        wall_height: arena.wall_height(),
        vertices: arena.vertices().iter().map(|v| v.to_array()).collect(),
        retina_width: cols,
        retina_height: rows,
    }
}

/// Errors raised by frame sinks.
#[derive(Debug, Error)]
pub enum DisplayError {
    /// Writing to the sink failed (frame encoding errors surface here too)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Receives frames from [`Rendered`].
pub trait FrameSink {
    /// Called once before the first frame
    fn begin(&mut self, _sim: &AgentSimulator) -> Result<(), DisplayError> {
        Ok(())
    }

    fn present(&mut self, frame: &FrameView<'_>) -> Result<(), DisplayError>;

    fn finish(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }
}

/// Discards every frame
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl FrameSink for NullSink {
    fn present(&mut self, _frame: &FrameView<'_>) -> Result<(), DisplayError> {
        Ok(())
    }
}

impl FrameSink for FrameLogger {
    fn begin(&mut self, sim: &AgentSimulator) -> Result<(), DisplayError> {
        self.log_header(&arena_header(sim))?;
        Ok(())
    }

    fn present(&mut self, frame: &FrameView<'_>) -> Result<(), DisplayError> {
        self.log(&frame.to_record())?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), DisplayError> {
        self.flush()?;
        Ok(())
    }
}

/// Draws the retina as text, with a pose line underneath.
pub struct AsciiDisplay<W: Write> {
    out: W,
    /// Present every n-th frame
    every: u64,
}

impl<W: Write> AsciiDisplay<W> {
    pub fn new(out: W, every: u64) -> Self {
        Self {
            out,
            every: every.max(1),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> FrameSink for AsciiDisplay<W> {
    fn present(&mut self, frame: &FrameView<'_>) -> Result<(), DisplayError> {
        if frame.step % self.every != 0 {
            return Ok(());
        }
        let nose = frame.nose();
        write!(self.out, "{}", frame.retina.render_text('#', '.'))?;
        writeln!(
            self.out,
            "step {:>6}  pos ({:+.3}, {:+.3})  dir {:.3}  nose ({:+.3}, {:+.3}){}",
            frame.step,
            frame.position.x,
            frame.position.y,
            frame.direction,
            nose.x,
            nose.y,
            if frame.accepted { "" } else { "  [blocked]" }
        )?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), DisplayError> {
        self.out.flush()?;
        Ok(())
    }
}

/// Sends both sinks every frame
pub struct Tee<A, B>(pub A, pub B);

impl<A: FrameSink, B: FrameSink> FrameSink for Tee<A, B> {
    fn begin(&mut self, sim: &AgentSimulator) -> Result<(), DisplayError> {
        self.0.begin(sim)?;
        self.1.begin(sim)
    }

    fn present(&mut self, frame: &FrameView<'_>) -> Result<(), DisplayError> {
        self.0.present(frame)?;
        self.1.present(frame)
    }

    fn finish(&mut self) -> Result<(), DisplayError> {
        self.0.finish()?;
        self.1.finish()
    }
}

impl<S: FrameSink + ?Sized> FrameSink for Box<S> {
    fn begin(&mut self, sim: &AgentSimulator) -> Result<(), DisplayError> {
        (**self).begin(sim)
    }

    fn present(&mut self, frame: &FrameView<'_>) -> Result<(), DisplayError> {
        (**self).present(frame)
    }

    fn finish(&mut self) -> Result<(), DisplayError> {
        (**self).finish()
    }
}

/// A simulator whose steps are forwarded to a sink.
pub struct Rendered<S: FrameSink> {
    sim: AgentSimulator,
    sink: S,
    started: bool,
}

impl<S: FrameSink> Rendered<S> {
    pub fn new(sim: AgentSimulator, sink: S) -> Self {
        Self {
            sim,
            sink,
            started: false,
        }
    }

    /// Step the simulator, then present the frame.
    pub fn step(&mut self, speed: f64, direction_delta: f64) -> Result<&RetinaBuffer, DisplayError> {
        self.apply(MotorCommand::new(speed, direction_delta))
    }

    pub fn apply(&mut self, command: MotorCommand) -> Result<&RetinaBuffer, DisplayError> {
        if !self.started {
            self.sink.begin(&self.sim)?;
            self.started = true;
        }
        self.sim.apply(command);
        self.sink.present(&FrameView::of(&self.sim))?;
        Ok(self.sim.retina())
    }

    pub fn simulator(&self) -> &AgentSimulator {
        &self.sim
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Flush the sink and hand back both parts
    pub fn finish(mut self) -> Result<(AgentSimulator, S), DisplayError> {
        self.sink.finish()?;
        Ok((self.sim, self.sink))
    }
}
