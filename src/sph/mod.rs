pub use self::boundary::{Boundary, HalfPlane};
pub use self::neighborhood_search::GridNeighborhood;
pub use self::particle_system::{ClassicalParticleSystem, ParticleSystem, Particles, RelaxationState, ViscoelasticParticleSystem};
pub use self::properties::{ClassicalProperties, FluidProperties, RelaxationKernelFactors, ViscoelasticProperties};
pub use self::solver::*;
pub use self::timemanager::{TimeManager, TimeManagerConfiguration};

pub mod boundary;
pub mod neighborhood_search;
pub mod particle_system;
pub mod properties;
pub mod seeding;
pub mod smoothing_kernel;
mod solver;
pub mod timemanager;
