//! Vector helpers that read from or go through a 4x4 transform.

use cgmath::{InnerSpace, Vector3};

use super::{approx_eq, Mat4, Vec3};

pub trait Vector3Ext: Sized {
    /// Transform a point, dividing by the resulting `w`.
    ///
    /// A zero `w` (a point on the projective plane at infinity) skips the
    /// divide and is logged rather than producing infinities.
    fn apply_matrix4(&self, m: &Mat4) -> Self;

    /// Rotate/scale a direction by the upper 3x3 block and normalize it.
    fn transform_direction(&self, m: &Mat4) -> Self;

    /// Translation column of `m`.
    fn from_matrix_position(m: &Mat4) -> Self;

    /// Column lengths of the upper 3x3 block of `m`.
    fn from_matrix_scale(m: &Mat4) -> Self;

    /// First three rows of column `index` (0..=3).
    fn from_matrix_column(m: &Mat4, index: usize) -> Self;

    fn approx_eq(&self, other: &Self, epsilon: f64) -> bool;
}

impl Vector3Ext for Vec3 {
    fn apply_matrix4(&self, m: &Mat4) -> Self {
        let (x, y, z) = (self.x, self.y, self.z);
        let transformed = Vector3::new(
            m.x.x * x + m.y.x * y + m.z.x * z + m.w.x,
            m.x.y * x + m.y.y * y + m.z.y * z + m.w.y,
            m.x.z * x + m.y.z * y + m.z.z * z + m.w.z,
        );
        let w = m.x.w * x + m.y.w * y + m.z.w * z + m.w.w;

        if w == 0.0 {
            log::warn!("apply_matrix4: homogeneous w is zero, skipping perspective divide");
            return transformed;
        }
        transformed / w
    }

    fn transform_direction(&self, m: &Mat4) -> Self {
        let (x, y, z) = (self.x, self.y, self.z);
        let direction = Vector3::new(
            m.x.x * x + m.y.x * y + m.z.x * z,
            m.x.y * x + m.y.y * y + m.z.y * z,
            m.x.z * x + m.y.z * y + m.z.z * z,
        );
        if direction.magnitude2() == 0.0 {
            return direction;
        }
        direction.normalize()
    }

    fn from_matrix_position(m: &Mat4) -> Self {
        m.w.truncate()
    }

    fn from_matrix_scale(m: &Mat4) -> Self {
        Vector3::new(
            m.x.truncate().magnitude(),
            m.y.truncate().magnitude(),
            m.z.truncate().magnitude(),
        )
    }

    fn from_matrix_column(m: &Mat4, index: usize) -> Self {
        m[index].truncate()
    }

    fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        approx_eq(self.x, other.x, epsilon)
            && approx_eq(self.y, other.y, epsilon)
            && approx_eq(self.z, other.z, epsilon)
    }
}
