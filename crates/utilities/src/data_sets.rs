use brick_octree_core::prelude::*;

use rand::{rngs::StdRng, Rng, SeedableRng};

// Only depends on the core crate, because a dev-dependency on the storage crate would give its unit tests a second, distinct
// copy of every storage type: https://github.com/rust-lang/cargo/issues/6765

/// A ball inscribed in the box `[0, shape)`, filled with `material`.
pub fn sphere(shape: Point3i, material: Material) -> impl Fn(Point3i) -> Material {
    // Work in doubled coordinates so voxel centers are integers.
    let center = shape;
    let radius = shape.min_component() as i64;

    move |p| {
        let d = (p * 2 + Point3i::ONES) - center;
        let dist_sq = d.0.iter().map(|c| (*c as i64) * (*c as i64)).sum::<i64>();
        if dist_sq < radius * radius {
            material
        } else {
            EMPTY_MATERIAL
        }
    }
}

/// Alternates between materials `a` and `b` on every step along any axis, so no brick is uniform.
pub fn checkerboard(a: Material, b: Material) -> impl Fn(Point3i) -> Material {
    move |p| {
        if (p.x() + p.y() + p.z()) % 2 == 0 {
            a
        } else {
            b
        }
    }
}

/// Roughly `density` of the points of `[0, shape)`, each with a random material in `1..=3`. Deterministic for a given `seed`.
pub fn random_voxels(shape: Point3i, density: f64, seed: u64) -> Vec<(Point3i, Material)> {
    let mut rng = StdRng::seed_from_u64(seed);

    Extent3i::from_shape(shape)
        .iter_points()
        .filter_map(|p| {
            if rng.gen_bool(density) {
                Some((p, rng.gen_range(1..=3)))
            } else {
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_is_inside_shape() {
        let shape = Point3i::fill(8);
        let ball = sphere(shape, 1);

        assert_eq!(ball(Point3i::fill(4)), 1);
        assert_eq!(ball(Point3i::ZERO), EMPTY_MATERIAL);
        assert_eq!(ball(PointN([7, 7, 7])), EMPTY_MATERIAL);
    }

    #[test]
    fn random_voxels_are_deterministic() {
        let shape = PointN([5, 6, 7]);

        assert_eq!(random_voxels(shape, 0.5, 1), random_voxels(shape, 0.5, 1));
        assert!(random_voxels(shape, 0.5, 1)
            .iter()
            .all(|(p, m)| Extent3i::from_shape(shape).contains(*p) && (1..=3).contains(m)));
    }
}
