use crate::units::Real;

/// Viscosity smoothing kernel.
///
/// Laplacian of Müller et al.'s viscosity kernel ("Particle-Based Fluid Simulation for Interactive Applications")
/// with a 2D normalization.
#[derive(Copy, Clone, Debug)]
pub struct Viscosity {
    normalizer_laplacian: Real,
}

impl Viscosity {
    pub fn new(smoothing_length: Real) -> Viscosity {
        Viscosity {
            normalizer_laplacian: 40.0 / (std::f64::consts::PI * smoothing_length.powi(5)),
        }
    }

    /// `h_sub_r`: h - r
    #[inline]
    pub fn laplacian(&self, h_sub_r: Real) -> Real {
        self.normalizer_laplacian * h_sub_r
    }
}

generate_kernel_tests!(Viscosity, laplacian, |h: Real| h, assert_le);
