pub mod io;
pub mod sph;
pub mod units;
