use super::super::boundary::Boundary;
use super::super::particle_system::{inverse_density, ClassicalParticleSystem, ParticleSystem, Particles};
use super::super::properties::{default_gravity, ClassicalProperties, FluidProperties};
use super::super::seeding;
use super::super::smoothing_kernel;
use super::super::timemanager::{TimeManager, TimeManagerConfiguration};
use super::{PositionOutput, Solver};
use crate::io::{PositionSink, RenderView};
use crate::units::*;
use anyhow::Result;
use cgmath::prelude::*;
use rand::prelude::*;
use rayon::prelude::*;

/// Particles closer than this have no defined direction and exchange no pressure force.
const COINCIDENCE_EPSILON: Real = 1.0e-12;

/// Setup of a [`ClassicalSolver`].
#[derive(Copy, Clone, Debug)]
pub struct ClassicalConfig {
    pub fluid: FluidProperties,
    pub eos: ClassicalProperties,
    pub gravity: Vector,
    pub timestep: Real,
    pub boundary_damping: Real,
    pub view_width: Real,
    pub view_height: Real,
    pub window_width: u32,
    pub window_height: u32,
    /// Seed of the jitter applied to the initial lattice.
    pub seed: u64,
}

impl Default for ClassicalConfig {
    fn default() -> Self {
        ClassicalConfig {
            fluid: ClassicalProperties::default_fluid(),
            eos: ClassicalProperties::default(),
            gravity: default_gravity(),
            timestep: 0.0007,
            boundary_damping: 1.0,
            view_width: 1.5 * 800.0,
            view_height: 1.5 * 600.0,
            window_width: 800,
            window_height: 600,
            seed: 0,
        }
    }
}

/// Basic SPH as in "Particle-Based Fluid Simulation for Interactive Applications", Müller et al.
///
/// Densities and forces are summed over all particle pairs, no neighborhood structure is used.
/// Symplectic Euler integration with one step per frame.
pub struct ClassicalSolver {
    particle_system: ClassicalParticleSystem,
    pressure_kernel: smoothing_kernel::Spiky,
    viscosity_kernel: smoothing_kernel::Viscosity,
    gravity: Vector,

    boundary: Boundary,
    time_manager: TimeManager,
    view: RenderView,
    output: PositionOutput,
}

impl ClassicalSolver {
    /// Solver with default constants and up to `num_particles` particles on a jittered lattice.
    pub fn new(num_particles: usize) -> ClassicalSolver {
        Self::with_config(num_particles, ClassicalConfig::default())
    }

    pub fn with_config(num_particles: usize, config: ClassicalConfig) -> ClassicalSolver {
        let kernel_radius = config.fluid.kernel_radius();
        let mut solver = ClassicalSolver {
            particle_system: ClassicalParticleSystem::new(config.fluid, config.eos),
            pressure_kernel: smoothing_kernel::Spiky::new(kernel_radius),
            viscosity_kernel: smoothing_kernel::Viscosity::new(kernel_radius),
            gravity: config.gravity,

            boundary: Boundary::rectangle(config.view_width, config.view_height, config.boundary_damping),
            time_manager: TimeManager::new(TimeManagerConfiguration::FixedTimeStep(config.timestep)),
            view: RenderView {
                window_width: config.window_width,
                window_height: config.window_height,
                view_width: config.view_width,
                view_height: config.view_height,
                point_size: kernel_radius / 2.0,
            },
            output: PositionOutput::default(),
        };

        if num_particles > 0 {
            let mut rng = SmallRng::seed_from_u64(config.seed);
            let positions = seeding::jittered_lattice(config.view_width, config.view_height, kernel_radius, num_particles, &mut rng);
            solver.particle_system.add_particles(&positions);
        }
        log::debug!(
            "classical solver: {} particles (requested {}), time step {}s",
            solver.num_particles(),
            num_particles,
            solver.time_manager.timestep()
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

    pub fn boundary(&self) -> &Boundary {
        &self.boundary
    }

    fn compute_forces(&mut self) {
        let properties = *self.particle_system.properties();
        let viscosity_constant = self.particle_system.eos().viscosity_constant;
        let mass = properties.particle_mass();
        let kernel_radius = properties.kernel_radius();
        let pressure_kernel = self.pressure_kernel;
        let viscosity_kernel = self.viscosity_kernel;
        let gravity = self.gravity;

        let Particles {
            positions,
            velocities,
            forces,
            densities,
            pressures,
        } = self.particle_system.particles_mut();
        let (positions, velocities, densities, pressures) = (&*positions, &*velocities, &*densities, &*pressures);

        forces.par_iter_mut().enumerate().for_each(|(i, force)| {
            let ri = positions[i];
            let vi = velocities[i];
            let pi = pressures[i];
            let mut pressure_force = Vector::zero();
            let mut viscosity_force = Vector::zero();

            for (j, &rj) in positions.iter().enumerate() {
                if i == j {
                    continue;
                }
                let ri_to_rj = rj - ri;
                let r = ri_to_rj.magnitude();
                if r >= kernel_radius {
                    continue;
                }

                let direction = if r > COINCIDENCE_EPSILON { ri_to_rj / r } else { Vector::zero() };
                let inv_rhoj = inverse_density(densities[j]);

                pressure_force += -direction * mass * (pi + pressures[j]) * inv_rhoj / 2.0 * pressure_kernel.gradient(kernel_radius - r);
                viscosity_force += viscosity_constant * mass * (velocities[j] - vi) * inv_rhoj * viscosity_kernel.laplacian(kernel_radius - r);
            }

            let gravity_force = gravity * mass * inverse_density(densities[i]);
            *force = pressure_force + viscosity_force + gravity_force;
        });
    }

    fn integrate(&mut self, dt: Real) {
        let particles = self.particle_system.particles_mut();
        (&mut particles.positions, &mut particles.velocities, &particles.forces, &particles.densities)
            .into_par_iter()
            .for_each(|(x, v, &f, &rho)| {
                *v += f * inverse_density(rho) * dt;
                *x += *v * dt;
            });
    }
}

impl Solver for ClassicalSolver {
    fn step(&mut self) {
        let dt = self.time_manager.timestep();

        self.particle_system.compute_density_pressure();
        self.compute_forces();
        self.integrate(dt);

        let particle_radius = self.particle_system.properties().particle_radius();
        let particles = self.particle_system.particles_mut();
        self.boundary.enforce(&particles.positions, &mut particles.velocities, particle_radius, dt);

        self.time_manager.finish_frame();
        log::trace!("classical frame {} done, t = {}s", self.time_manager.num_frames(), self.time_manager.passed_time());
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
