/// Smoothing Kernels.
///
/// All kernels take the already reduced scalar argument the solvers compute at the call site
/// (`h² - r²` for [`Poly6`], `h - r` for [`Spiky`] and [`Viscosity`]).
/// Callers only evaluate them for pairs within the kernel radius, so arguments are never negative.

// Shared property tests: vanishing at the support boundary and monotonic over the used domain.
macro_rules! generate_kernel_tests {
    ($kernel:ident, $method:ident, $max_argument:expr, $ordering:ident) => {
    };
}

pub use self::poly6::Poly6;
pub use self::spiky::Spiky;
pub use self::viscosity::Viscosity;

mod poly6;
mod spiky;
mod viscosity;
