use crate::units::*;
use cgmath::prelude::*;
use rayon::prelude::*;

pub type ParticleIndex = u32;

/// Maximum number of neighbors recorded per particle.
///
/// Neighbors beyond this count are dropped in grid scan order.
/// Changing it changes the simulation result, reference trajectories are tied to this value.
pub const MAX_NEIGHBORS: usize = 64;

/// Squared distances below this are treated as overlapping (self or degenerate) and skipped.
pub const OVERLAP_THRESHOLD: Real = 0.00001;

const NO_PARTICLE: ParticleIndex = ParticleIndex::MAX;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
struct CellPos {
    x: usize,
    y: usize,
}

#[derive(Copy, Clone, Debug)]
struct GridProperties {
    width: usize,
    height: usize,
    cell_size: Real,
}
impl GridProperties {
    // Edge cells are never assigned so that the 3x3 scan never leaves the grid.
    #[inline]
    fn position_to_cellpos(&self, position: Point) -> CellPos {
        // `as` truncates towards zero (and maps NaN to 0), both get clamped below.
        let x = (position.x / self.cell_size) as i64;
        let y = (position.y / self.cell_size) as i64;
        CellPos {
            x: x.clamp(1, self.width as i64 - 2) as usize,
            y: y.clamp(1, self.height as i64 - 2) as usize,
        }
    }

    #[inline]
    fn cell_index(&self, x: usize, y: usize) -> usize {
        x + y * self.width
    }

    fn num_cells(&self) -> usize {
        self.width * self.height
    }
}

#[derive(Clone)]
struct Neighborhood {
    indices: [ParticleIndex; MAX_NEIGHBORS],
    distances: [Real; MAX_NEIGHBORS],
    len: usize,
}

impl Neighborhood {
    fn new() -> Neighborhood {
        Neighborhood {
            indices: [0; MAX_NEIGHBORS],
            distances: [0.0; MAX_NEIGHBORS],
            len: 0,
        }
    }

    // Returns false if the neighborhood is already full.
    #[inline]
    fn push(&mut self, index: ParticleIndex, distance: Real) -> bool {
        if self.len == MAX_NEIGHBORS {
            return false;
        }
        self.indices[self.len] = index;
        self.distances[self.len] = distance;
        self.len += 1;
        true
    }
}

/// Uniform grid neighbor search with cell size equal to the search radius.
///
/// Cells are singly linked chains through a node arena that has one slot per particle,
/// so a rebuild does not allocate once the particle count is stable.
/// Only the 3x3 block of cells around a particle's cell is scanned.
/// Neighbor lists are a snapshot of the positions passed to the last [`GridNeighborhood::build`] call.
pub struct GridNeighborhood {
    grid: GridProperties,

    cell_heads: Vec<ParticleIndex>,
    next_in_cell: Vec<ParticleIndex>,
    particle_cells: Vec<CellPos>,
    neighborhoods: Vec<Neighborhood>,

    num_truncated: usize,
}

impl GridNeighborhood {
    /// * width, height: Extent of the simulation domain, starting at the origin.
    /// * cell_size:     Search radius, typically the kernel radius.
    pub fn new(width: Real, height: Real, cell_size: Real) -> GridNeighborhood {
        let mut neighborhood = GridNeighborhood {
            grid: GridProperties {
                width: 0,
                height: 0,
                cell_size,
            },
            cell_heads: Vec::new(),
            next_in_cell: Vec::new(),
            particle_cells: Vec::new(),
            neighborhoods: Vec::new(),
            num_truncated: 0,
        };
        neighborhood.set_resolution(width, height, cell_size);
        neighborhood
    }

    /// Reallocates the cell array. Previously built neighbor lists are discarded.
    ///
    /// The grid needs at least one interior cell per axis, smaller domains are padded up to 3x3 cells.
    pub fn set_resolution(&mut self, width: Real, height: Real, cell_size: Real) {
        assert!(cell_size > 0.0, "cell size needs to be positive, was {}", cell_size);
        self.grid = GridProperties {
            width: ((width / cell_size) as usize).max(3),
            height: ((height / cell_size) as usize).max(3),
            cell_size,
        };
        self.cell_heads.clear();
        self.cell_heads.resize(self.grid.num_cells(), NO_PARTICLE);
        self.neighborhoods.clear();
        self.num_truncated = 0;
        log::debug!(
            "neighbor grid resolution {}x{} cells, cell size {}",
            self.grid.width,
            self.grid.height,
            self.grid.cell_size
        );
    }

    /// Grid dimensions in cells.
    pub fn resolution(&self) -> (usize, usize) {
        (self.grid.width, self.grid.height)
    }

    pub fn cell_size(&self) -> Real {
        self.grid.cell_size
    }

    /// Number of particles the last build was done with.
    pub fn num_particles(&self) -> usize {
        self.neighborhoods.len()
    }

    /// Number of particles whose neighbor list hit [`MAX_NEIGHBORS`] during the last build.
    pub fn num_truncated(&self) -> usize {
        self.num_truncated
    }

    /// Rebuilds all cells and neighbor lists from scratch.
    pub fn build(&mut self, positions: &[Point]) {
        assert!(positions.len() < NO_PARTICLE as usize);
        let num_particles = positions.len();

        // Insert into cells. Sequential, so cell chains hold particles in descending index order.
        self.cell_heads.iter_mut().for_each(|head| *head = NO_PARTICLE);
        self.next_in_cell.resize(num_particles, NO_PARTICLE);
        self.particle_cells.resize(num_particles, CellPos::default());
        for (pidx, &position) in positions.iter().enumerate() {
            let cell = self.grid.position_to_cellpos(position);
            let cidx = self.grid.cell_index(cell.x, cell.y);
            self.next_in_cell[pidx] = self.cell_heads[cidx];
            self.cell_heads[cidx] = pidx as ParticleIndex;
            self.particle_cells[pidx] = cell;
        }

        // Gather neighbors. Cells are read-only from here on.
        self.neighborhoods.resize_with(num_particles, Neighborhood::new);
        let grid = self.grid;
        let cell_heads = &self.cell_heads;
        let next_in_cell = &self.next_in_cell;
        let particle_cells = &self.particle_cells;
        let cell_size_sq = grid.cell_size * grid.cell_size;

        self.num_truncated = self
            .neighborhoods
            .par_iter_mut()
            .zip(positions.par_iter())
            .zip(particle_cells.par_iter())
            .map(|((neighborhood, &ri), cell)| {
                neighborhood.len = 0;
                let mut truncated = false;
                for x in cell.x - 1..=cell.x + 1 {
                    for y in cell.y - 1..=cell.y + 1 {
                        let mut j = cell_heads[grid.cell_index(x, y)];
                        while j != NO_PARTICLE {
                            let r_sq = positions[j as usize].distance2(ri);
                            if r_sq >= OVERLAP_THRESHOLD && r_sq <= cell_size_sq && !neighborhood.push(j, r_sq.sqrt()) {
                                truncated = true;
                            }
                            j = next_in_cell[j as usize];
                        }
                    }
                }
                truncated as usize
            })
            .sum();

        if self.num_truncated > 0 {
            log::trace!(
                "{} of {} particles exceeded {} neighbors, excess neighbors dropped",
                self.num_truncated,
                num_particles,
                MAX_NEIGHBORS
            );
        }
    }

    /// Calls `f(j, distance)` for every recorded neighbor j of particle i, in grid scan order.
    #[inline]
    pub fn foreach_neighbor(&self, i: usize, mut f: impl FnMut(usize, Real)) {
        let neighborhood = &self.neighborhoods[i];
        for (&j, &distance) in neighborhood.indices[..neighborhood.len]
            .iter()
            .zip(neighborhood.distances[..neighborhood.len].iter())
        {
            f(j as usize, distance);
        }
    }

    /// Distances of particle i to its recorded neighbors, in the same order as [`GridNeighborhood::foreach_neighbor`].
    pub fn distances(&self, i: usize) -> &[Real] {
        let neighborhood = &self.neighborhoods[i];
        &neighborhood.distances[..neighborhood.len]
    }

    pub fn num_neighbors(&self, i: usize) -> usize {
        self.neighborhoods[i].len
    }
}
