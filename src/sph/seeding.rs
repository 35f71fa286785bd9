use crate::units::*;
use rand::prelude::*;

/// Lattice over the left-center part of a view, each particle offset diagonally by a random jitter in [0, 1).
///
/// Rows start at `spacing` and stop before `view_height - 2 * spacing`,
/// columns cover `view_width / 4` up to and including `view_width / 2`.
/// Returns fewer than `count` positions if the lattice is exhausted first.
pub fn jittered_lattice(view_width: Real, view_height: Real, spacing: Real, count: usize, rng: &mut impl Rng) -> Vec<Point> {
    assert!(spacing > 0.0);
    let mut positions = Vec::with_capacity(count);

    // Coordinates are accumulated, not multiplied, so they match lattices generated by stepping.
    let mut y = spacing;
    while y < view_height - spacing * 2.0 {
        let mut x = view_width / 4.0;
        while x <= view_width / 2.0 {
            if positions.len() == count {
                return positions;
            }
            let jitter = rng.gen::<Real>();
            positions.push(Point::new(x + jitter, y + jitter));
            x += spacing;
        }
        y += spacing;
    }
    positions
}

/// Square block of ⌊√count⌋² particles growing right and down from `start`, 3 particle radii apart.
pub fn square_block(start: Point, count: usize, particle_radius: Real) -> Vec<Point> {
    let num_per_side = (count as Real).sqrt() as usize;
    let step = 2.0 * particle_radius + particle_radius;
    let mut positions = Vec::with_capacity(num_per_side * num_per_side);

    let mut position = start;
    for _ in 0..num_per_side {
        for _ in 0..num_per_side {
            positions.push(position);
            position.x += step;
        }
        position.x = start.x;
        position.y -= step;
    }
    positions
}
