use cgmath::prelude::*;
use more_asserts::*;

use vsph2d::sph::*;
use vsph2d::units::*;

#[test]
fn classical_arrays_stay_consistent() {
    let mut solver = ClassicalSolver::new(200);
    for frame in 0..5 {
        solver.update().unwrap();
        if frame == 2 {
            solver.add_particle(Point::new(700.0, 300.0));
        }
        let particles = solver.particles();
        assert_eq!(particles.len(), solver.num_particles());
        assert_eq!(particles.velocities.len(), particles.len());
        assert_eq!(particles.forces.len(), particles.len());
        assert_eq!(particles.densities.len(), particles.len());
        assert_eq!(particles.pressures.len(), particles.len());
    }
    assert_eq!(solver.num_particles(), 201);
    assert!(solver.particles().densities.iter().all(|&rho| rho > 0.0));
}

#[test]
fn viscoelastic_arrays_stay_consistent() {
    let mut solver = ViscoelasticSolver::new(64);
    for frame in 0..3 {
        solver.update().unwrap();
        if frame == 1 {
            solver.add_particle(Point::new(8.0, 2.0));
        }
        let n = solver.num_particles();
        let particles = solver.particles();
        let state = solver.relaxation_state();
        assert_eq!(particles.len(), n);
        assert_eq!(particles.velocities.len(), n);
        assert_eq!(particles.densities.len(), n);
        assert_eq!(particles.pressures.len(), n);
        assert_eq!(state.projected_positions.len(), n);
        assert_eq!(state.last_positions.len(), n);
        assert_eq!(state.density_variations.len(), n);
        assert_eq!(state.pressure_variations.len(), n);
    }
    assert_eq!(solver.num_particles(), 65);
    assert_eq!(solver.neighborhood().num_particles(), 65);
}

#[test]
fn weightless_isolated_particle_rests() {
    let start = Point::new(6.0, 4.0);
    let mut viscoelastic = ViscoelasticSolver::with_config(
        0,
        ViscoelasticConfig {
            gravity: Vector::zero(),
            ..Default::default()
        },
    );
    viscoelastic.add_particle(start);

    let mut classical = ClassicalSolver::with_config(
        0,
        ClassicalConfig {
            gravity: Vector::zero(),
            ..Default::default()
        },
    );
    classical.add_particle(Point::new(600.0, 450.0));

    for _ in 0..10 {
        viscoelastic.update().unwrap();
        classical.update().unwrap();
    }
    assert_lt!((viscoelastic.positions()[0] - start).magnitude(), 1e-5);
    assert_lt!((classical.positions()[0] - Point::new(600.0, 450.0)).magnitude(), 1e-5);
}

#[test]
fn viscoelastic_relaxation_conserves_momentum() {
    let mut solver = ViscoelasticSolver::with_config(
        100,
        ViscoelasticConfig {
            gravity: Vector::zero(),
            ..Default::default()
        },
    );
    for _ in 0..3 {
        solver.step();
    }

    let velocities = &solver.particles().velocities;
    let total: Vector = velocities.iter().fold(Vector::zero(), |sum, &v| sum + v);
    let largest = velocities.iter().map(|v| v.magnitude()).fold(0.0, Real::max);
    assert_gt!(largest, 0.0);
    assert_lt!(total.magnitude(), 1e-6);
}

#[test]
fn viscoelastic_neighbor_lists_are_bounded() {
    let mut solver = ViscoelasticSolver::new(50 * 50);
    solver.step();
    let neighborhood = solver.neighborhood();
    for i in 0..solver.num_particles() {
        assert_le!(neighborhood.num_neighbors(i), vsph2d::sph::neighborhood_search::MAX_NEIGHBORS);
        for &r in neighborhood.distances(i) {
            assert_le!(r, neighborhood.cell_size() + 1e-12);
        }
    }
}

#[test]
fn viscoelastic_fluid_stays_in_view() {
    let mut solver = ViscoelasticSolver::new(50 * 50);
    for _ in 0..20 {
        solver.step();
    }
    let view = solver.render_view();
    for p in solver.positions() {
        assert!(p.x.is_finite() && p.y.is_finite());
        assert_gt!(p.x, -1.0);
        assert_lt!(p.x, view.view_width + 1.0);
        assert_gt!(p.y, -1.0);
        assert_lt!(p.y, view.view_height + 1.0);
    }
}

#[test]
fn boundary_leaves_settled_particles_alone() {
    let mut solver = ClassicalSolver::new(300);
    for _ in 0..10 {
        solver.step();
    }

    let radius = ClassicalProperties::default_fluid().particle_radius();
    let dt = solver.time_manager().timestep();
    let boundary = solver.boundary();
    let positions = solver.positions();

    let mut velocities = solver.particles().velocities.clone();
    boundary.enforce(positions, &mut velocities, radius, dt);
    let once = velocities.clone();
    boundary.enforce(positions, &mut velocities, radius, dt);

    for (i, p) in positions.iter().enumerate() {
        let clear = boundary.planes().iter().all(|plane| plane.clearance(*p) >= radius);
        if clear {
            assert_eq!(velocities[i], solver.particles().velocities[i]);
            assert_eq!(velocities[i], once[i]);
        }
    }
}
