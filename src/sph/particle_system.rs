use crate::units::*;
use cgmath::prelude::*;
use rayon::prelude::*;

use super::neighborhood_search::GridNeighborhood;
use super::properties::{ClassicalProperties, FluidProperties, RelaxationKernelFactors, ViscoelasticProperties};
use super::smoothing_kernel;

/// Densities at or below this are treated as empty space when dividing by density.
pub const DENSITY_EPSILON: Real = 1.0e-12;

/// 1/ρ, or zero for a vanishing density so that isolated particles receive no density weighted contribution.
#[inline]
pub fn inverse_density(density: Real) -> Real {
    if density > DENSITY_EPSILON {
        1.0 / density
    } else {
        0.0
    }
}

/// Per particle state shared by all variants, stored as struct of arrays.
#[derive(Clone, Default)]
pub struct Particles {
    pub positions: Vec<Point>,
    pub velocities: Vec<Vector>,
    pub forces: Vec<Vector>,
    pub densities: Vec<Real>,  // Local densities ρ
    pub pressures: Vec<Real>,
}

impl Particles {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    fn push(&mut self, position: Point) {
        self.positions.push(position);
        self.velocities.push(Vector::zero());
        self.forces.push(Vector::zero());
        self.densities.push(0.0);
        self.pressures.push(0.0);
    }

    fn reserve(&mut self, additional: usize) {
        self.positions.reserve(additional);
        self.velocities.reserve(additional);
        self.forces.reserve(additional);
        self.densities.reserve(additional);
        self.pressures.reserve(additional);
    }

    fn has_consistent_len(&self) -> bool {
        let n = self.len();
        self.velocities.len() == n && self.forces.len() == n && self.densities.len() == n && self.pressures.len() == n
    }
}

/// Particle data together with the density/pressure computation of one solver variant.
pub trait ParticleSystem {
    fn particles(&self) -> &Particles;

    fn particles_mut(&mut self) -> &mut Particles;

    fn properties(&self) -> &FluidProperties;

    /// Appends a resting particle. Every per particle array grows by exactly one.
    fn add_particle(&mut self, position: Point);

    /// Updates densities and pressures from the current state.
    fn compute_density_pressure(&mut self);

    /// Grid based neighbor queries, only available for variants that own a neighbor grid.
    fn neighborhood(&self) -> Option<&GridNeighborhood> {
        None
    }

    /// True if all per particle arrays have the same length.
    fn has_consistent_len(&self) -> bool {
        self.particles().has_consistent_len()
    }

    fn num_particles(&self) -> usize {
        self.particles().len()
    }

    fn add_particles(&mut self, positions: &[Point]) {
        for &position in positions {
            self.add_particle(position);
        }
    }
}

/// Particle system with brute force O(n²) density summation.
pub struct ClassicalParticleSystem {
    particles: Particles,
    properties: FluidProperties,
    eos: ClassicalProperties,
    density_kernel: smoothing_kernel::Poly6,
}

impl ClassicalParticleSystem {
    pub fn new(properties: FluidProperties, eos: ClassicalProperties) -> ClassicalParticleSystem {
        ClassicalParticleSystem {
            particles: Particles::default(),
            properties,
            eos,
            density_kernel: smoothing_kernel::Poly6::new(properties.kernel_radius()),
        }
    }

    pub fn eos(&self) -> &ClassicalProperties {
        &self.eos
    }
}

impl Default for ClassicalParticleSystem {
    fn default() -> Self {
        Self::new(ClassicalProperties::default_fluid(), ClassicalProperties::default())
    }
}

impl ParticleSystem for ClassicalParticleSystem {
    fn particles(&self) -> &Particles {
        &self.particles
    }

    fn particles_mut(&mut self) -> &mut Particles {
        &mut self.particles
    }

    fn properties(&self) -> &FluidProperties {
        &self.properties
    }

    fn add_particle(&mut self, position: Point) {
        self.particles.push(position);
    }

    fn add_particles(&mut self, positions: &[Point]) {
        self.particles.reserve(positions.len());
        for &position in positions {
            self.particles.push(position);
        }
    }

    fn compute_density_pressure(&mut self) {
        let mass = self.properties.particle_mass();
        let kernel_radius_sq = self.properties.kernel_radius_sq();
        let kernel = self.density_kernel;
        let eos = self.eos;
        let positions = &self.particles.positions;

        // Density contributions are symmetric, but that is hard to use in a parallel loop.
        self.particles
            .densities
            .par_iter_mut()
            .zip(self.particles.pressures.par_iter_mut())
            .zip(positions.par_iter())
            .for_each(|((density, pressure), &ri)| {
                // includes self-contribution
                *density = 0.0;
                for &rj in positions.iter() {
                    let r_sq = (rj - ri).magnitude2();
                    if r_sq < kernel_radius_sq {
                        *density += mass * kernel.evaluate(kernel_radius_sq - r_sq);
                    }
                }
                *pressure = eos.pressure(*density);
            });
    }
}

/// Auxiliary per particle arrays of the double density relaxation scheme.
#[derive(Clone, Default)]
pub struct RelaxationState {
    pub projected_positions: Vec<Point>,
    pub last_positions: Vec<Point>,
    pub density_variations: Vec<Real>, // "near-density"
    pub pressure_variations: Vec<Real>,
}

impl RelaxationState {
    fn push(&mut self, position: Point) {
        self.projected_positions.push(Point::origin());
        self.last_positions.push(position);
        self.density_variations.push(0.0);
        self.pressure_variations.push(0.0);
    }

    fn has_len(&self, n: usize) -> bool {
        self.projected_positions.len() == n
            && self.last_positions.len() == n
            && self.density_variations.len() == n
            && self.pressure_variations.len() == n
    }
}

/// Particle system of the double density relaxation scheme.
///
/// Owns the neighbor grid, which is rebuilt by the solver from predicted positions every sub-step.
pub struct ViscoelasticParticleSystem {
    particles: Particles,
    state: RelaxationState,

    properties: FluidProperties,
    relaxation: ViscoelasticProperties,
    kernel_factors: RelaxationKernelFactors,

    neighborhood: GridNeighborhood,
}

impl ViscoelasticParticleSystem {
    pub fn new(properties: FluidProperties, relaxation: ViscoelasticProperties, neighborhood: GridNeighborhood) -> ViscoelasticParticleSystem {
        ViscoelasticParticleSystem {
            particles: Particles::default(),
            state: RelaxationState::default(),

            properties,
            relaxation,
            kernel_factors: RelaxationKernelFactors::new(properties.kernel_radius()),

            neighborhood,
        }
    }

    pub fn relaxation(&self) -> &ViscoelasticProperties {
        &self.relaxation
    }

    pub fn kernel_factors(&self) -> RelaxationKernelFactors {
        self.kernel_factors
    }

    pub fn grid(&self) -> &GridNeighborhood {
        &self.neighborhood
    }

    pub fn state(&self) -> &RelaxationState {
        &self.state
    }

    /// Split borrow of all per particle data, with read access to the neighbor grid.
    pub fn parts_mut(&mut self) -> (&mut Particles, &mut RelaxationState, &GridNeighborhood) {
        (&mut self.particles, &mut self.state, &self.neighborhood)
    }

    /// Rebuilds the neighbor grid from the current positions.
    pub fn build_neighborhood(&mut self) {
        self.neighborhood.build(&self.particles.positions);
    }
}

impl ParticleSystem for ViscoelasticParticleSystem {
    fn particles(&self) -> &Particles {
        &self.particles
    }

    fn particles_mut(&mut self) -> &mut Particles {
        &mut self.particles
    }

    fn properties(&self) -> &FluidProperties {
        &self.properties
    }

    fn add_particle(&mut self, position: Point) {
        self.particles.push(position);
        self.state.push(position);
    }

    fn compute_density_pressure(&mut self) {
        debug_assert_eq!(self.neighborhood.num_particles(), self.particles.len(), "neighbor grid is out of date");

        let mass = self.properties.particle_mass();
        let kernel_radius = self.properties.kernel_radius();
        let kernel_factors = self.kernel_factors;
        let relaxation = self.relaxation;
        let neighborhood = &self.neighborhood;

        (
            &mut self.particles.densities,
            &mut self.state.density_variations,
            &mut self.particles.pressures,
            &mut self.state.pressure_variations,
        )
            .into_par_iter()
            .enumerate()
            .for_each(|(i, (density, density_variation, pressure, pressure_variation))| {
                *density = 0.0;
                *density_variation = 0.0;
                neighborhood.foreach_neighbor(i, |_j, r| {
                    let a = 1.0 - r / kernel_radius;
                    *density += mass * a * a * a * kernel_factors.density;
                    *density_variation += mass * a * a * a * a * kernel_factors.near_density;
                });
                *pressure = relaxation.stiffness * (*density - mass * relaxation.elastic_rest_density);
                *pressure_variation = relaxation.stiffness_at_proximity * *density_variation;
            });
    }

    fn neighborhood(&self) -> Option<&GridNeighborhood> {
        Some(&self.neighborhood)
    }

    fn has_consistent_len(&self) -> bool {
        self.particles.has_consistent_len() && self.state.has_len(self.particles.len())
    }
}
