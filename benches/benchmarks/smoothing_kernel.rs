use criterion::{black_box, criterion_group, Criterion};

use vsph2d::sph::smoothing_kernel::*;
use vsph2d::units::*;

fn bench_kernels(c: &mut Criterion) {
    let smoothing_length: Real = black_box(16.0);
    let r: Real = black_box(5.0);
    let r_sq = black_box(r * r);

    {
        let kernel = black_box(Poly6::new(smoothing_length));
        c.bench_function("Poly6.evaluate", |b| b.iter(|| kernel.evaluate(smoothing_length * smoothing_length - r_sq)));
    }
    {
        let kernel = black_box(Spiky::new(smoothing_length));
        c.bench_function("Spiky.gradient", |b| b.iter(|| kernel.gradient(smoothing_length - r)));
    }
    {
        let kernel = black_box(Viscosity::new(smoothing_length));
        c.bench_function("Viscosity.laplacian", |b| b.iter(|| kernel.laplacian(smoothing_length - r)));
    }
}

fn config() -> Criterion {
    Criterion::default()
        .warm_up_time(core::time::Duration::new(0, 100))
        .sample_size(1000)
        .significance_level(0.1)
}

criterion_group!(
    name = smoothing_kernel;
    config = config();
    targets = bench_kernels
);
