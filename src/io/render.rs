use crate::sph::Solver;
use crate::units::*;
use anyhow::Result;

/// Rendering hints of a solver.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderView {
    /// Window size in pixels.
    pub window_width: u32,
    pub window_height: u32,
    /// Visible simulation domain, starting at the origin.
    pub view_width: Real,
    pub view_height: Real,
    /// Suggested point size in pixels.
    pub point_size: Real,
}

/// Draws the particles of one frame.
pub trait RenderSink {
    fn draw(&mut self, positions: &[Point], view: &RenderView) -> Result<()>;
}

/// Advances `solver` by one frame per drawn frame.
///
/// The solver is passed to the sink explicitly on every frame, there is no shared global simulation state.
pub fn run_frames<S, R>(solver: &mut S, sink: &mut R, num_frames: usize) -> Result<()>
where
    S: Solver + ?Sized,
    R: RenderSink + ?Sized,
{
    let view = solver.render_view();
    for _ in 0..num_frames {
        sink.draw(solver.positions(), &view)?;
        solver.update()?;
    }
    Ok(())
}
