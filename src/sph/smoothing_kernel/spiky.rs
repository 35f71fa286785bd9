use crate::units::Real;

/// Debrun's "Spiky" smoothing kernel.
///
/// Refer to "Particle-Based Fluid Simulation for Interactive Applications", Müller et al.
/// Kernel well suited for pressure since its gradient doesn't vanish at the center.
/// Only the radial gradient magnitude is provided, direction is applied by the caller.
#[derive(Copy, Clone, Debug)]
pub struct Spiky {
    normalizer_grad: Real,
}

impl Spiky {
    pub fn new(smoothing_length: Real) -> Spiky {
        Spiky {
            normalizer_grad: -10.0 / (std::f64::consts::PI * smoothing_length.powi(5)),
        }
    }

    /// `h_sub_r`: h - r
    #[inline]
    pub fn gradient(&self, h_sub_r: Real) -> Real {
        self.normalizer_grad * h_sub_r * h_sub_r * h_sub_r
    }
}

generate_kernel_tests!(Spiky, gradient, |h: Real| h, assert_ge);
