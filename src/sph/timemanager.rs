use crate::units::*;

pub enum TimeManagerConfiguration {
    // One step per frame.
    FixedTimeStep(Real),

    // A frame is split into a fixed number of equally long sub-steps.
    //
    // Example: 30 frames per second with 10 sub-steps yields a sub-step of 1/300s.
    FixedFrameRate { frames_per_second: Real, substeps: usize },
}

// All timing values in seconds
pub struct TimeManager {
    passed_time: Real,
    num_frames: u64,
    timestep: Real,
    substeps: usize,
    config: TimeManagerConfiguration,
}

impl TimeManager {
    pub fn new(config: TimeManagerConfiguration) -> TimeManager {
        let (timestep, substeps) = match &config {
            TimeManagerConfiguration::FixedTimeStep(timestep) => (*timestep, 1),
            TimeManagerConfiguration::FixedFrameRate {
                frames_per_second,
                substeps,
            } => {
                assert!(*substeps > 0, "need at least one sub-step per frame");
                ((1.0 / frames_per_second) / *substeps as Real, *substeps)
            }
        };
        assert!(timestep > 0.0, "timestep needs to be positive, was {}", timestep);

        TimeManager {
            passed_time: 0.0,
            num_frames: 0,
            timestep,
            substeps,
            config,
        }
    }

    pub fn restart(&mut self) {
        self.passed_time = 0.0;
        self.num_frames = 0;
    }

    // how much physical time has passed in the simulation
    pub fn passed_time(&self) -> Real {
        self.passed_time
    }

    // number of completed frames
    pub fn num_frames(&self) -> u64 {
        self.num_frames
    }

    // length of a single (sub-)step
    pub fn timestep(&self) -> Real {
        self.timestep
    }

    pub fn timestep_sq(&self) -> Real {
        self.timestep * self.timestep
    }

    // number of (sub-)steps per frame
    pub fn substeps(&self) -> usize {
        self.substeps
    }

    pub fn frame_length(&self) -> Real {
        self.timestep * self.substeps as Real
    }

    pub fn config(&self) -> &TimeManagerConfiguration {
        &self.config
    }

    // advances time by one completed frame
    pub(super) fn finish_frame(&mut self) {
        self.passed_time += self.frame_length();
        self.num_frames += 1;
    }
}
