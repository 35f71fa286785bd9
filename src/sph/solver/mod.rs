pub use classical::{ClassicalConfig, ClassicalSolver};
pub use viscoelastic::{ViscoelasticConfig, ViscoelasticSolver};

mod classical;
mod viscoelastic;

// ------------------------------------------------------

use super::timemanager::TimeManager;
use crate::io::{PositionSink, RenderView};
use crate::units::*;
use anyhow::Result;

pub trait Solver {
    /// Advances the simulation by one frame. For sub-stepping solvers this runs all sub-steps.
    fn step(&mut self);

    /// Advances by one frame and hands the resulting positions to the attached position sink, if any.
    fn update(&mut self) -> Result<()>;

    fn positions(&self) -> &[Point];

    /// Appends a resting particle.
    fn add_particle(&mut self, position: Point);

    fn num_particles(&self) -> usize;

    fn render_view(&self) -> RenderView;

    fn time_manager(&self) -> &TimeManager;
}

/// Optional per frame position stream of a solver.
#[derive(Default)]
struct PositionOutput {
    sink: Option<Box<dyn PositionSink + Send>>,
}

impl PositionOutput {
    fn attach(&mut self, sink: Box<dyn PositionSink + Send>) {
        self.sink = Some(sink);
    }

    fn emit(&mut self, positions: &[Point]) -> Result<()> {
        match self.sink.as_mut() {
            Some(sink) => sink.write_frame(positions),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod test_sink {
    use crate::io::PositionSink;
    use crate::units::*;
    use anyhow::Result;
    use std::sync::{Arc, Mutex};

    /// Records every frame in memory, shared with the test through the returned handle.
    pub struct RecordingSink(pub Arc<Mutex<Vec<Vec<Point>>>>);

    impl RecordingSink {
        pub fn shared() -> (RecordingSink, Arc<Mutex<Vec<Vec<Point>>>>) {
            let frames = Arc::new(Mutex::new(Vec::new()));
            (RecordingSink(frames.clone()), frames)
        }
    }

    impl PositionSink for RecordingSink {
        fn write_frame(&mut self, positions: &[Point]) -> Result<()> {
            self.0.lock().unwrap().push(positions.to_vec());
            Ok(())
        }
    }
}
