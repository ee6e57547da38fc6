//! Vector helpers shared by the geometry builders.

use cgmath::{InnerSpace, Vector3};
use rand::Rng;

/// Normalize `v`, leaving a zero-length vector untouched.
///
/// Degenerate inputs therefore produce degenerate (but NaN-free) geometry
/// rather than an error.
pub fn renormalize(v: Vector3<f32>) -> Vector3<f32> {
    let len = v.magnitude();
    if len > 0.0 {
        v / len
    } else {
        v
    }
}

/// Random vector with each component drawn uniformly from `[0, 1)`
pub fn random_vector<R: Rng + ?Sized>(rng: &mut R) -> Vector3<f32> {
    Vector3::new(rng.random::<f32>(), rng.random::<f32>(), rng.random::<f32>())
}

/// Build an in-plane basis perpendicular to `axis` from a random seed.
///
/// Returns `(inplane, axis x inplane)`. If the seed happens to be parallel
/// to `axis` the basis collapses to zero vectors; this is logged, not fixed.
pub fn random_basis<R: Rng + ?Sized>(
    axis: Vector3<f32>,
    rng: &mut R,
) -> (Vector3<f32>, Vector3<f32>) {
    let seed = random_vector(rng);
    let inplane = renormalize(seed.cross(axis));
    if inplane.magnitude2() == 0.0 {
        log::warn!(
            "Random seed {:?} is parallel to axis {:?}; cross-section is degenerate",
            seed,
            axis
        );
    }
    let v_x_inplane = axis.cross(inplane);
    (inplane, v_x_inplane)
}

/// Point on a circle of radius `r` in the plane of `ux`, `uy` at angle `t`
pub fn circle_point(ux: Vector3<f32>, uy: Vector3<f32>, t: f32, r: f32) -> Vector3<f32> {
    ux * (t.sin() * r) + uy * (t.cos() * r)
}

/// Face normal of a triangle, `(c1 - c2) x (c2 - c3)`, normalized
pub fn face_normal(c1: Vector3<f32>, c2: Vector3<f32>, c3: Vector3<f32>) -> Vector3<f32> {
    renormalize((c1 - c2).cross(c2 - c3))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_renormalize_zero_is_noop() {
        let zero = Vector3::new(0.0f32, 0.0, 0.0);
        let result = renormalize(zero);
        assert_eq!(result, zero);
        assert!(!result.x.is_nan());
    }

    #[test]
    fn test_renormalize_unit_length() {
        let v = renormalize(Vector3::new(3.0, 0.0, 4.0));
        assert!((v.magnitude() - 1.0).abs() < 1e-6);
        assert!((v.x - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_random_vector_in_unit_cube() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let v = random_vector(&mut rng);
            for c in [v.x, v.y, v.z] {
                assert!((0.0..1.0).contains(&c));
            }
        }
    }

    #[test]
    fn test_random_basis_is_orthonormal() {
        let mut rng = StdRng::seed_from_u64(42);
        let axis = renormalize(Vector3::new(1.0, 2.0, -0.5));
        let (a, b) = random_basis(axis, &mut rng);
        assert!((a.magnitude() - 1.0).abs() < 1e-5);
        assert!((b.magnitude() - 1.0).abs() < 1e-5);
        assert!(a.dot(axis).abs() < 1e-5);
        assert!(b.dot(axis).abs() < 1e-5);
        assert!(a.dot(b).abs() < 1e-5);
    }

    #[test]
    fn test_face_normal_unit_square() {
        let n = face_normal(
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(1.0, 1.0, 0.0),
        );
        assert_eq!(n, Vector3::new(0.0, 0.0, -1.0));
    }
}
