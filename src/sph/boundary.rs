use crate::units::*;
use cgmath::prelude::*;
use rayon::prelude::*;

/// Domain wall given by a normal and an offset.
///
/// `normal · x - offset` is the clearance of a point x from the wall, positive on the inside.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HalfPlane {
    pub normal: Vector,
    pub offset: Real,
}

impl HalfPlane {
    pub fn new(normal: Vector, offset: Real) -> HalfPlane {
        HalfPlane { normal, offset }
    }

    #[inline]
    pub fn clearance(&self, position: Point) -> Real {
        self.normal.dot(position.to_vec()) - self.offset
    }
}

/// Fixed set of walls. Particles closer than their radius to a wall get pushed back via their velocity.
#[derive(Clone, Debug, PartialEq)]
pub struct Boundary {
    planes: Vec<HalfPlane>,
    damping: Real,
}

impl Boundary {
    pub fn new(planes: Vec<HalfPlane>, damping: Real) -> Boundary {
        Boundary { planes, damping }
    }

    /// Rectangle from the origin to (width, height). Walls are ordered left, bottom, right, top.
    pub fn rectangle(width: Real, height: Real, damping: Real) -> Boundary {
        Boundary::new(
            vec![
                HalfPlane::new(Vector::new(1.0, 0.0), 0.0),
                HalfPlane::new(Vector::new(0.0, 1.0), 0.0),
                HalfPlane::new(Vector::new(-1.0, 0.0), -width),
                HalfPlane::new(Vector::new(0.0, -1.0), -height),
            ],
            damping,
        )
    }

    pub fn planes(&self) -> &[HalfPlane] {
        &self.planes
    }

    pub fn damping(&self) -> Real {
        self.damping
    }

    /// Corrects velocities of particles within `particle_radius` of any wall.
    ///
    /// Walls are applied one after another, a particle in a corner gets both corrections sequentially.
    pub fn enforce(&self, positions: &[Point], velocities: &mut [Vector], particle_radius: Real, dt: Real) {
        assert_eq!(positions.len(), velocities.len());
        let planes = &self.planes;
        let damping = self.damping;

        velocities.par_iter_mut().zip(positions.par_iter()).for_each(|(v, &x)| {
            for plane in planes.iter() {
                let d = plane.clearance(x).max(0.0);
                if d < particle_radius {
                    *v += (particle_radius - d) * plane.normal / dt;
                    *v *= damping;
                }
            }
        });
    }
}
