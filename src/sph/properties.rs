use crate::units::*;

/// Gravity in 2D, in m/s².
pub fn default_gravity() -> Vector {
    Vector::new(0.0, -9.8)
}

/// Properties shared by both particle system variants.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FluidProperties {
    kernel_radius: Real, // typically expressed as 'h'
    particle_mass: Real,
    particle_radius: Real, // used for boundary clearance
}

impl FluidProperties {
    pub fn new(kernel_radius: Real, particle_mass: Real, particle_radius: Real) -> FluidProperties {
        assert!(kernel_radius > 0.0, "kernel radius needs to be positive, was {}", kernel_radius);
        FluidProperties {
            kernel_radius,
            particle_mass,
            particle_radius,
        }
    }

    pub fn kernel_radius(&self) -> Real {
        self.kernel_radius
    }

    pub fn kernel_radius_sq(&self) -> Real {
        self.kernel_radius * self.kernel_radius
    }

    pub fn particle_mass(&self) -> Real {
        self.particle_mass
    }

    pub fn particle_radius(&self) -> Real {
        self.particle_radius
    }
}

/// Equation of state and viscosity constants of the classical solver.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ClassicalProperties {
    pub rest_density: Real,
    pub gas_constant: Real,
    pub viscosity_constant: Real,
}

impl ClassicalProperties {
    pub fn default_fluid() -> FluidProperties {
        FluidProperties::new(16.0, 2.5, 16.0)
    }

    // Equation of State (EOS). Negative below rest density.
    #[inline]
    pub fn pressure(&self, density: Real) -> Real {
        self.gas_constant * (density - self.rest_density)
    }
}

impl Default for ClassicalProperties {
    fn default() -> Self {
        ClassicalProperties {
            rest_density: 300.0,
            gas_constant: 2000.0,
            viscosity_constant: 200.0,
        }
    }
}

/// Constants of the double density relaxation scheme.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ViscoelasticProperties {
    pub elastic_rest_density: Real,
    pub stiffness: Real,
    pub stiffness_at_proximity: Real,
    pub linear_viscosity: Real,
    pub quadratic_viscosity: Real,
    pub surface_tension: Real,
}

impl ViscoelasticProperties {
    pub const DEFAULT_PARTICLE_RADIUS: Real = 0.03;

    pub fn default_fluid() -> FluidProperties {
        let particle_radius = Self::DEFAULT_PARTICLE_RADIUS;
        FluidProperties::new(6.0 * particle_radius, 1.0, particle_radius)
    }
}

impl Default for ViscoelasticProperties {
    fn default() -> Self {
        ViscoelasticProperties {
            elastic_rest_density: 45.0,
            stiffness: 0.08,
            stiffness_at_proximity: 0.1,
            linear_viscosity: 0.25,
            quadratic_viscosity: 0.5,
            surface_tension: 0.0001,
        }
    }
}

/// Normalization constants of the density and near-density kernels used by the relaxation scheme.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RelaxationKernelFactors {
    pub density: Real,
    pub near_density: Real,
}

impl RelaxationKernelFactors {
    pub fn new(kernel_radius: Real) -> RelaxationKernelFactors {
        let area = 2.0 * std::f64::consts::PI * kernel_radius * kernel_radius;
        RelaxationKernelFactors {
            density: 20.0 / area,
            near_density: 30.0 / area,
        }
    }
}
