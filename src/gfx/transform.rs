//! # Placement Transforms
//!
//! A [`Placement`] pairs a translation offset and a quaternion rotation with
//! the 4x4 matrix composed from them. Scene nodes and labels each carry two
//! placements: a *view* placement (the model's own frame) and a *scene*
//! placement (where the model sits inside a larger scene).
//!
//! ## Composition
//!
//! The composed matrix is always `T(offset) * R(rotation)`: the rotation acts
//! in the model's local frame and the translation is applied afterwards.
//! Incremental translations pre-multiply `T(v)`; incremental rotations
//! post-multiply `R(q)` and record `rotation * q`, so the stored rotation and
//! the matrix stay in agreement.

use cgmath::{Matrix4, Quaternion, SquareMatrix, Vector3, Zero};

/// Identity rotation quaternion
pub fn identity_rotation() -> Quaternion<f32> {
    Quaternion::new(1.0, 0.0, 0.0, 0.0)
}

/// Translation, rotation and their composed matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    offset: Vector3<f32>,
    rotation: Quaternion<f32>,
    matrix: Matrix4<f32>,
}

impl Placement {
    /// Identity placement at the origin
    pub fn identity() -> Self {
        Self {
            offset: Vector3::zero(),
            rotation: identity_rotation(),
            matrix: Matrix4::identity(),
        }
    }

    /// Placement translated to `offset` with no rotation
    pub fn at(offset: Vector3<f32>) -> Self {
        let mut placement = Self::identity();
        placement.set_translation(offset);
        placement
    }

    pub fn offset(&self) -> Vector3<f32> {
        self.offset
    }

    pub fn rotation(&self) -> Quaternion<f32> {
        self.rotation
    }

    pub fn matrix(&self) -> Matrix4<f32> {
        self.matrix
    }

    /// Replace the translation and recompose the matrix
    pub fn set_translation(&mut self, offset: Vector3<f32>) {
        self.offset = offset;
        self.recompose();
    }

    /// Move by `v`, keeping the current rotation
    pub fn add_translation(&mut self, v: Vector3<f32>) {
        self.offset += v;
        self.matrix = Matrix4::from_translation(v) * self.matrix;
    }

    /// Replace the rotation and recompose the matrix
    pub fn set_rotation(&mut self, rotation: Quaternion<f32>) {
        self.rotation = rotation;
        self.recompose();
    }

    /// Apply `rotation` on top of the current one, in the local frame
    pub fn add_rotation(&mut self, rotation: Quaternion<f32>) {
        self.rotation = self.rotation * rotation;
        self.matrix = self.matrix * Matrix4::from(rotation);
    }

    /// Override the composed matrix directly.
    ///
    /// The stored offset and rotation are left untouched; the next
    /// `set_translation` or `set_rotation` recomposes from them.
    pub fn set_matrix(&mut self, matrix: Matrix4<f32>) {
        self.matrix = matrix;
    }

    /// Reset to the identity placement
    pub fn reset(&mut self) {
        *self = Self::identity();
    }

    fn recompose(&mut self) {
        self.matrix = Matrix4::from_translation(self.offset) * Matrix4::from(self.rotation);
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::identity()
    }
}

/// Diagonal scaling matrix applied on top of a node's view matrix
pub fn size_scale(x: f32, y: f32, z: f32) -> Matrix4<f32> {
    Matrix4::from_nonuniform_scale(x, y, z)
}

/// Flatten a matrix into column-major order for uniform upload
pub fn matrix_to_array(matrix: &Matrix4<f32>) -> [[f32; 4]; 4] {
    (*matrix).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Deg, Rotation3, Transform};
    use cgmath::Point3;

    fn close(a: Vector3<f32>, b: Vector3<f32>) -> bool {
        (a - b).x.abs() < 1e-5 && (a - b).y.abs() < 1e-5 && (a - b).z.abs() < 1e-5
    }

    #[test]
    fn test_translation_then_rotation_order() {
        let mut placement = Placement::at(Vector3::new(1.0, 0.0, 0.0));
        placement.set_rotation(Quaternion::from_angle_z(Deg(90.0)));

        // Rotation acts first in the local frame, translation afterwards
        let p = placement.matrix().transform_point(Point3::new(1.0, 0.0, 0.0));
        assert!(close(Vector3::new(p.x, p.y, p.z), Vector3::new(1.0, 1.0, 0.0)));
    }

    #[test]
    fn test_add_translation_accumulates() {
        let mut placement = Placement::identity();
        placement.set_rotation(Quaternion::from_angle_x(Deg(30.0)));
        placement.add_translation(Vector3::new(0.0, 1.0, 0.0));
        placement.add_translation(Vector3::new(0.0, 0.0, 2.0));

        assert_eq!(placement.offset(), Vector3::new(0.0, 1.0, 2.0));
        let mut recomposed = placement;
        recomposed.set_translation(placement.offset());
        assert!(close(
            recomposed.matrix().w.truncate(),
            placement.matrix().w.truncate()
        ));
    }

    #[test]
    fn test_add_rotation_matches_matrix() {
        let mut placement = Placement::at(Vector3::new(0.0, 0.0, 3.0));
        placement.add_rotation(Quaternion::from_angle_z(Deg(45.0)));
        placement.add_rotation(Quaternion::from_angle_z(Deg(45.0)));

        let mut recomposed = placement;
        recomposed.set_rotation(placement.rotation());
        let a = placement.matrix().transform_vector(Vector3::new(1.0, 0.0, 0.0));
        let b = recomposed.matrix().transform_vector(Vector3::new(1.0, 0.0, 0.0));
        assert!(close(a, b));
        assert!(close(a, Vector3::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn test_size_scale_diagonal() {
        let m = size_scale(2.0, 3.0, 1.0);
        let arr = matrix_to_array(&m);
        assert_eq!(arr[0][0], 2.0);
        assert_eq!(arr[1][1], 3.0);
        assert_eq!(arr[2][2], 1.0);
        assert_eq!(arr[3][3], 1.0);
    }
}
