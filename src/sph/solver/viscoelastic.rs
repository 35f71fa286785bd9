use super::super::boundary::Boundary;
use super::super::neighborhood_search::GridNeighborhood;
use super::super::particle_system::{ParticleSystem, Particles, RelaxationState, ViscoelasticParticleSystem};
use super::super::properties::{default_gravity, FluidProperties, ViscoelasticProperties};
use super::super::seeding;
use super::super::timemanager::{TimeManager, TimeManagerConfiguration};
use super::{PositionOutput, Solver};
use crate::io::{PositionSink, RenderView};
use crate::units::*;
use anyhow::Result;
use cgmath::prelude::*;
use rayon::prelude::*;

/// Setup of a [`ViscoelasticSolver`].
#[derive(Copy, Clone, Debug)]
pub struct ViscoelasticConfig {
    pub fluid: FluidProperties,
    pub relaxation: ViscoelasticProperties,
    pub gravity: Vector,
    pub frames_per_second: Real,
    pub substeps: usize,
    pub boundary_damping: Real,
    /// The view height follows from the window's aspect ratio.
    pub view_width: Real,
    pub window_width: u32,
    pub window_height: u32,
}

impl ViscoelasticConfig {
    pub fn view_height(&self) -> Real {
        self.window_height as Real * self.view_width / self.window_width as Real
    }
}

impl Default for ViscoelasticConfig {
    fn default() -> Self {
        ViscoelasticConfig {
            fluid: ViscoelasticProperties::default_fluid(),
            relaxation: ViscoelasticProperties::default(),
            gravity: default_gravity(),
            frames_per_second: 30.0,
            substeps: 10,
            boundary_damping: 0.5,
            view_width: 12.5,
            window_width: 800,
            window_height: 600,
        }
    }
}

/// Double density relaxation as in "Particle-based Viscoelastic Fluid Simulation", Clavet et al. 2005.
///
/// Prediction-relaxation scheme: positions are advanced with the current velocities,
/// relaxed by pressure, near-pressure, surface tension and pairwise viscosity impulses,
/// and velocities are then derived from the actual displacement.
/// Each frame is split into a fixed number of sub-steps.
pub struct ViscoelasticSolver {
    particle_system: ViscoelasticParticleSystem,
    gravity: Vector,

    boundary: Boundary,
    time_manager: TimeManager,
    view: RenderView,
    output: PositionOutput,
}

impl ViscoelasticSolver {
    /// Solver with default constants and a square block of ⌊√num_particles⌋² particles.
    pub fn new(num_particles: usize) -> ViscoelasticSolver {
        Self::with_config(num_particles, ViscoelasticConfig::default())
    }

    pub fn with_config(num_particles: usize, config: ViscoelasticConfig) -> ViscoelasticSolver {
        let view_width = config.view_width;
        let view_height = config.view_height();
        let particle_radius = config.fluid.particle_radius();

        // The grid covers the view in whole units.
        let neighborhood = GridNeighborhood::new(view_width.trunc(), view_height.trunc(), config.fluid.kernel_radius());
        let mut solver = ViscoelasticSolver {
            particle_system: ViscoelasticParticleSystem::new(config.fluid, config.relaxation, neighborhood),
            gravity: config.gravity,

            boundary: Boundary::rectangle(view_width, view_height, config.boundary_damping),
            time_manager: TimeManager::new(TimeManagerConfiguration::FixedFrameRate {
                frames_per_second: config.frames_per_second,
                substeps: config.substeps,
            }),
            view: RenderView {
                window_width: config.window_width,
                window_height: config.window_height,
                view_width,
                view_height,
                point_size: 2.5 * particle_radius * config.window_width as Real / view_height,
            },
            output: PositionOutput::default(),
        };

        let start = Point::new(0.25 * view_width, 0.5 * view_height);
        let positions = seeding::square_block(start, num_particles, particle_radius);
        solver.particle_system.add_particles(&positions);
        solver.particle_system.build_neighborhood();

        log::debug!(
            "viscoelastic solver: {} particles, {} sub-steps of {}s, grid {:?}",
            solver.num_particles(),
            solver.time_manager.substeps(),
            solver.time_manager.timestep(),
            solver.particle_system.grid().resolution()
        );
        solver
    }

    /// Streams positions to `sink` after every [`Solver::update`].
    pub fn with_position_sink(mut self, sink: impl PositionSink + Send + 'static) -> Self {
        self.output.attach(Box::new(sink));
        self
    }

    pub fn particles(&self) -> &Particles {
        self.particle_system.particles()
    }

    pub fn relaxation_state(&self) -> &RelaxationState {
        self.particle_system.state()
    }

    pub fn neighborhood(&self) -> &GridNeighborhood {
        self.particle_system.grid()
    }

    pub fn boundary(&self) -> &Boundary {
        &self.boundary
    }

    fn apply_external_forces(&mut self, dt: Real) {
        let gravity = self.gravity;
        self.particle_system.particles_mut().velocities.par_iter_mut().for_each(|v| {
            *v += dt * gravity;
        });
    }

    // Remembers the current positions and advances them with the current velocities.
    fn predict_positions(&mut self, dt: Real) {
        let (particles, state, _) = self.particle_system.parts_mut();
        (&mut particles.positions, &mut state.last_positions, &particles.velocities)
            .into_par_iter()
            .for_each(|(x, last_x, &v)| {
                *last_x = *x;
                *x += dt * v;
            });
    }

    // Computes relaxed positions from the predicted ones into the projected positions.
    fn project(&mut self, dt: Real) {
        let mass = self.particle_system.properties().particle_mass();
        let kernel_radius = self.particle_system.properties().kernel_radius();
        let relaxation = *self.particle_system.relaxation();
        let kernel_factors = self.particle_system.kernel_factors();
        let dt_sq = self.time_manager.timestep_sq();

        let (particles, state, neighborhood) = self.particle_system.parts_mut();
        let RelaxationState {
            projected_positions,
            pressure_variations,
            ..
        } = state;
        let positions = &particles.positions;
        let velocities = &particles.velocities;
        let pressures = &particles.pressures;
        let pressure_variations = &*pressure_variations;

        projected_positions.par_iter_mut().enumerate().for_each(|(i, projected)| {
            let xi = positions[i];
            let vi = velocities[i];
            let mut x = xi;

            neighborhood.foreach_neighbor(i, |j, r| {
                let dx = positions[j] - xi;
                let a = 1.0 - r / kernel_radius;

                // double density relaxation
                let d = dt_sq
                    * ((pressure_variations[i] + pressure_variations[j]) * a * a * a * kernel_factors.near_density
                        + (pressures[i] + pressures[j]) * a * a * kernel_factors.density)
                    / 2.0;
                x -= d * dx / (r * mass);

                // surface tension
                x += (relaxation.surface_tension / mass) * mass * a * a * kernel_factors.density * dx;

                // linear and quadratic viscosity, only for approaching pairs
                let u = (vi - velocities[j]).dot(dx);
                if u > 0.0 {
                    let u = u / r;
                    let impulse = 0.5 * dt * a * (relaxation.linear_viscosity * u + relaxation.quadratic_viscosity * u * u);
                    x -= impulse * dx * dt;
                }
            });

            *projected = x;
        });
    }

    // Moves to the projected positions and derives velocities from the displacement.
    fn correct(&mut self, dt: Real) {
        let (particles, state, _) = self.particle_system.parts_mut();
        (&mut particles.positions, &mut particles.velocities, &state.projected_positions, &state.last_positions)
            .into_par_iter()
            .for_each(|(x, v, &projected, &last_x)| {
                *x = projected;
                *v = (*x - last_x) / dt;
            });
    }

    fn substep(&mut self, dt: Real) {
        self.apply_external_forces(dt);
        self.predict_positions(dt);
        self.particle_system.build_neighborhood();
        self.particle_system.compute_density_pressure();
        self.project(dt);
        self.correct(dt);

        let particle_radius = self.particle_system.properties().particle_radius();
        let particles = self.particle_system.particles_mut();
        self.boundary.enforce(&particles.positions, &mut particles.velocities, particle_radius, dt);
    }
}

impl Solver for ViscoelasticSolver {
    fn step(&mut self) {
        let dt = self.time_manager.timestep();
        for _ in 0..self.time_manager.substeps() {
            self.substep(dt);
        }
        self.time_manager.finish_frame();
        log::trace!(
            "viscoelastic frame {} done, t = {}s, {} truncated neighbor lists",
            self.time_manager.num_frames(),
            self.time_manager.passed_time(),
            self.particle_system.grid().num_truncated()
        );
    }

    fn update(&mut self) -> Result<()> {
        self.step();
        self.output.emit(&self.particle_system.particles().positions)
    }

    fn positions(&self) -> &[Point] {
        &self.particle_system.particles().positions
    }

    fn add_particle(&mut self, position: Point) {
        self.particle_system.add_particle(position);
    }

    fn num_particles(&self) -> usize {
        self.particle_system.num_particles()
    }

    fn render_view(&self) -> RenderView {
        self.view
    }

    fn time_manager(&self) -> &TimeManager {
        &self.time_manager
    }
}
