pub mod neighborhood_search;
pub mod smoothing_kernel;
pub mod solvers;
pub mod update_densities;
