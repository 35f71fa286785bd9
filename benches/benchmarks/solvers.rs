use criterion::{criterion_group, Criterion};

use vsph2d::sph::*;

fn bench_solvers(c: &mut Criterion) {
    {
        let mut solver = ClassicalSolver::new(500);
        c.bench_function("ClassicalSolver.step, 500 particles", |b| b.iter(|| solver.step()));
    }
    {
        let mut solver = ViscoelasticSolver::new(50 * 50);
        c.bench_function("ViscoelasticSolver.step (10 sub-steps), 2500 particles", |b| b.iter(|| solver.step()));
    }
}

fn config() -> Criterion {
    Criterion::default().sample_size(10)
}

criterion_group!(
    name = solvers;
    config = config();
    targets = bench_solvers
);
