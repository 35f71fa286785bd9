//! Collaborators that consume particle positions: the per frame position stream and the renderer.

pub use self::csv::{parse_frame, read_trajectory, CsvPositionWriter};
pub use self::render::{run_frames, RenderSink, RenderView};

mod csv;
mod render;

use crate::units::Point;
use anyhow::Result;

/// Receives the positions of all particles once per frame, in particle order.
pub trait PositionSink {
    fn write_frame(&mut self, positions: &[Point]) -> Result<()>;
}

impl<T: PositionSink + ?Sized> PositionSink for Box<T> {
    fn write_frame(&mut self, positions: &[Point]) -> Result<()> {
        (**self).write_frame(positions)
    }
}
