use criterion::{criterion_group, Criterion};

use vsph2d::sph::seeding;
use vsph2d::sph::*;
use vsph2d::units::*;

fn bench_update_densities(c: &mut Criterion) {
    {
        let mut system = ClassicalParticleSystem::default();
        let mut rng: rand::rngs::SmallRng = rand::SeedableRng::seed_from_u64(0);
        system.add_particles(&seeding::jittered_lattice(1200.0, 900.0, 16.0, 1000, &mut rng));

        c.bench_function(
            &format!("ClassicalParticleSystem.compute_density_pressure, {} particles", system.num_particles()),
            |b| b.iter(|| system.compute_density_pressure()),
        );
    }
    {
        let properties = ViscoelasticProperties::default_fluid();
        let neighborhood = GridNeighborhood::new(12.0, 9.0, properties.kernel_radius());
        let mut system = ViscoelasticParticleSystem::new(properties, ViscoelasticProperties::default(), neighborhood);
        system.add_particles(&seeding::square_block(Point::new(3.125, 4.6875), 2500, properties.particle_radius()));
        system.build_neighborhood();

        c.bench_function(
            &format!("ViscoelasticParticleSystem.compute_density_pressure, {} particles", system.num_particles()),
            |b| b.iter(|| system.compute_density_pressure()),
        );
    }
}

criterion_group!(update_densities, bench_update_densities);
