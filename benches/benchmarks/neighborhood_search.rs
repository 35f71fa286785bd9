use criterion::{black_box, criterion_group, Criterion};
use rand::prelude::*;

use vsph2d::sph::neighborhood_search::GridNeighborhood;
use vsph2d::units::*;

fn bench_neighborhood_search(c: &mut Criterion) {
    const NUM_POSITIONS: usize = 20000;
    const DENSITY: Real = 10.0;
    let search_radius = black_box(1.0);
    let extent = (NUM_POSITIONS as Real / DENSITY).sqrt();

    let mut rng: rand::rngs::SmallRng = rand::SeedableRng::seed_from_u64(123456789);
    let positions: Vec<Point> = std::iter::repeat_with(|| Point::new(rng.gen::<Real>() * extent, rng.gen::<Real>() * extent))
        .take(NUM_POSITIONS)
        .collect();

    let mut searcher = GridNeighborhood::new(extent, extent, search_radius);
    searcher.build(&positions);

    c.bench_function(
        &format!(
            "GridNeighborhood.build (warm), {} positions, {} density, {} search_radius",
            NUM_POSITIONS, DENSITY, search_radius
        ),
        |b| b.iter(|| searcher.build(&positions)),
    );

    c.bench_function(
        &format!(
            "GridNeighborhood.foreach_neighbor, {} positions, {} density, {} search_radius",
            NUM_POSITIONS, DENSITY, search_radius
        ),
        |b| {
            let mut pindex = 0; // cycle through position for a more balanced result
            b.iter(|| {
                let mut accum: Real = 0.0;
                searcher.foreach_neighbor(pindex, |_, r| {
                    accum += r;
                });
                pindex = (pindex + 1) % NUM_POSITIONS;
                accum
            })
        },
    );
}

fn config() -> Criterion {
    Criterion::default().warm_up_time(core::time::Duration::new(0, 1000))
}

criterion_group!(
    name = neighborhood_search;
    config = config();
    targets = bench_neighborhood_search
);
