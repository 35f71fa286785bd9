use crate::units::Real;

/// Poly6 smoothing kernel.
///
/// Refer to "Particle-Based Fluid Simulation for Interactive Applications", Müller et al.
/// Used for density accumulation of the classical solver.
#[derive(Copy, Clone, Debug)]
pub struct Poly6 {
    normalizer: Real,
}

impl Poly6 {
    pub fn new(smoothing_length: Real) -> Poly6 {
        Poly6 {
            // 2D normalization factor from Salva https://github.com/rustsim/salva/blob/master/src/kernel/poly6_kernel.rs#L14
            normalizer: 4.0 / (std::f64::consts::PI * smoothing_length.powi(8)),
        }
    }

    /// `hsq_sub_rsq`: h² - r²
    #[inline]
    pub fn evaluate(&self, hsq_sub_rsq: Real) -> Real {
        self.normalizer * hsq_sub_rsq * hsq_sub_rsq * hsq_sub_rsq
    }
}

generate_kernel_tests!(Poly6, evaluate, |h: Real| h * h, assert_le);
