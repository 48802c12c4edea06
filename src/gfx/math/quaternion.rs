//! Quaternion conversions.

use cgmath::{InnerSpace, Quaternion};

use super::{approx_eq, Euler, Mat4, Quat, RotationOrder, Vec3};

/// Extension operations on [`Quat`].
pub trait QuaternionExt: Sized {
    /// Rotation equivalent to `euler`, using the half-angle products for its order.
    fn from_euler(euler: &Euler) -> Self;

    /// Rotation held in the upper 3x3 block of `m`, which must be unscaled.
    ///
    /// Uses the trace when it is positive, otherwise the largest diagonal term,
    /// so the square root never sees a value near zero.
    fn from_rotation_matrix(m: &Mat4) -> Self;

    /// Rotation of `angle` radians about `axis` (normalized here).
    fn from_axis_radians(axis: Vec3, angle: f64) -> Self;

    /// Shortest rotation taking unit vector `from` onto unit vector `to`.
    fn from_unit_vectors(from: Vec3, to: Vec3) -> Self;

    /// Angle in radians between two unit rotations.
    fn angle_to(&self, other: &Self) -> f64;

    /// Whether the quaternion has unit length within `epsilon`.
    fn is_unit(&self, epsilon: f64) -> bool;

    /// Compares rotations, treating `q` and `-q` as equal.
    fn approx_eq(&self, other: &Self, epsilon: f64) -> bool;
}

impl QuaternionExt for Quat {
    fn from_euler(euler: &Euler) -> Self {
        let (s1, c1) = (euler.x / 2.0).sin_cos();
        let (s2, c2) = (euler.y / 2.0).sin_cos();
        let (s3, c3) = (euler.z / 2.0).sin_cos();

        let (x, y, z, w) = match euler.order {
            RotationOrder::Xyz => (
                s1 * c2 * c3 + c1 * s2 * s3,
                c1 * s2 * c3 - s1 * c2 * s3,
                c1 * c2 * s3 + s1 * s2 * c3,
                c1 * c2 * c3 - s1 * s2 * s3,
            ),
            RotationOrder::Yxz => (
                s1 * c2 * c3 + c1 * s2 * s3,
                c1 * s2 * c3 - s1 * c2 * s3,
                c1 * c2 * s3 - s1 * s2 * c3,
                c1 * c2 * c3 + s1 * s2 * s3,
            ),
            RotationOrder::Zxy => (
                s1 * c2 * c3 - c1 * s2 * s3,
                c1 * s2 * c3 + s1 * c2 * s3,
                c1 * c2 * s3 + s1 * s2 * c3,
                c1 * c2 * c3 - s1 * s2 * s3,
            ),
            RotationOrder::Zyx => (
                s1 * c2 * c3 - c1 * s2 * s3,
                c1 * s2 * c3 + s1 * c2 * s3,
                c1 * c2 * s3 - s1 * s2 * c3,
                c1 * c2 * c3 + s1 * s2 * s3,
            ),
            RotationOrder::Yzx => (
                s1 * c2 * c3 + c1 * s2 * s3,
                c1 * s2 * c3 + s1 * c2 * s3,
                c1 * c2 * s3 - s1 * s2 * c3,
                c1 * c2 * c3 - s1 * s2 * s3,
            ),
            RotationOrder::Xzy => (
                s1 * c2 * c3 - c1 * s2 * s3,
                c1 * s2 * c3 - s1 * c2 * s3,
                c1 * c2 * s3 + s1 * s2 * c3,
                c1 * c2 * c3 + s1 * s2 * s3,
            ),
        };

        Quaternion::new(w, x, y, z)
    }

    fn from_rotation_matrix(m: &Mat4) -> Self {
        let (m11, m12, m13) = (m.x.x, m.y.x, m.z.x);
        let (m21, m22, m23) = (m.x.y, m.y.y, m.z.y);
        let (m31, m32, m33) = (m.x.z, m.y.z, m.z.z);

        let trace = m11 + m22 + m33;

        if trace > 0.0 {
            let s = 0.5 / (trace + 1.0).sqrt();
            Quaternion::new(
                0.25 / s,
                (m32 - m23) * s,
                (m13 - m31) * s,
                (m21 - m12) * s,
            )
        } else if m11 > m22 && m11 > m33 {
            let s = 2.0 * (1.0 + m11 - m22 - m33).sqrt();
            Quaternion::new(
                (m32 - m23) / s,
                0.25 * s,
                (m12 + m21) / s,
                (m13 + m31) / s,
            )
        } else if m22 > m33 {
            let s = 2.0 * (1.0 + m22 - m11 - m33).sqrt();
            Quaternion::new(
                (m13 - m31) / s,
                (m12 + m21) / s,
                0.25 * s,
                (m23 + m32) / s,
            )
        } else {
            let s = 2.0 * (1.0 + m33 - m11 - m22).sqrt();
            Quaternion::new(
                (m21 - m12) / s,
                (m13 + m31) / s,
                (m23 + m32) / s,
                0.25 * s,
            )
        }
    }

    fn from_axis_radians(axis: Vec3, angle: f64) -> Self {
        if axis.magnitude2() == 0.0 {
            log::warn!("from_axis_radians: zero rotation axis, using identity");
            return Quaternion::new(1.0, 0.0, 0.0, 0.0);
        }
        let (s, c) = (angle / 2.0).sin_cos();
        Quaternion::from_sv(c, axis.normalize() * s)
    }

    fn from_unit_vectors(from: Vec3, to: Vec3) -> Self {
        let r = from.dot(to) + 1.0;

        let q = if r < f64::EPSILON {
            // Opposite vectors: any perpendicular axis works.
            if from.x.abs() > from.z.abs() {
                Quaternion::new(0.0, -from.y, from.x, 0.0)
            } else {
                Quaternion::new(0.0, 0.0, -from.z, from.y)
            }
        } else {
            Quaternion::from_sv(r, from.cross(to))
        };

        q.normalize()
    }

    fn angle_to(&self, other: &Self) -> f64 {
        2.0 * self.dot(*other).clamp(-1.0, 1.0).abs().acos()
    }

    fn is_unit(&self, epsilon: f64) -> bool {
        approx_eq(self.magnitude(), 1.0, epsilon)
    }

    fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        let same = approx_eq(self.s, other.s, epsilon)
            && approx_eq(self.v.x, other.v.x, epsilon)
            && approx_eq(self.v.y, other.v.y, epsilon)
            && approx_eq(self.v.z, other.v.z, epsilon);
        let negated = approx_eq(self.s, -other.s, epsilon)
            && approx_eq(self.v.x, -other.v.x, epsilon)
            && approx_eq(self.v.y, -other.v.y, epsilon)
            && approx_eq(self.v.z, -other.v.z, epsilon);
        same || negated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::math::{Matrix4Ext, Vector3Ext};
    use cgmath::{Matrix4, Rad, Rotation3, Vector3};
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_from_euler_single_axis_matches_cgmath() {
        for order in RotationOrder::ALL {
            let q = Quat::from_euler(&Euler::new(0.0, 0.0, 0.8, order));
            assert!(q.approx_eq(&Quat::from_angle_z(Rad(0.8)), 1e-12), "{order}");

            let q = Quat::from_euler(&Euler::new(-1.3, 0.0, 0.0, order));
            assert!(q.approx_eq(&Quat::from_angle_x(Rad(-1.3)), 1e-12), "{order}");
        }
    }

    #[test]
    fn test_from_euler_order_composition() {
        let (x, y, z) = (0.4, -0.9, 1.7);
        let qx = Quat::from_angle_x(Rad(x));
        let qy = Quat::from_angle_y(Rad(y));
        let qz = Quat::from_angle_z(Rad(z));

        // An XYZ Euler applies X first in the intrinsic frame: q = qx * qy * qz.
        let cases = [
            (RotationOrder::Xyz, qx * qy * qz),
            (RotationOrder::Yxz, qy * qx * qz),
            (RotationOrder::Zxy, qz * qx * qy),
            (RotationOrder::Zyx, qz * qy * qx),
            (RotationOrder::Yzx, qy * qz * qx),
            (RotationOrder::Xzy, qx * qz * qy),
        ];

        for (order, expected) in cases {
            let q = Quat::from_euler(&Euler::new(x, y, z, order));
            assert!(q.approx_eq(&expected, 1e-12), "{order}: {q:?} vs {expected:?}");
        }
    }

    #[test]
    fn test_from_rotation_matrix_all_branches() {
        // Trace positive, then x, y and z dominant (half turns about each axis).
        let rotations = [
            Quat::from_angle_y(Rad(0.3)),
            Quat::from_angle_x(Rad(PI)),
            Quat::from_angle_y(Rad(PI)),
            Quat::from_angle_z(Rad(PI)),
            Quat::from_axis_radians(Vector3::new(1.0, 1.0, 0.0), 2.9),
        ];

        for q in rotations {
            let m = Matrix4::from(q);
            let back = Quat::from_rotation_matrix(&m);
            assert!(back.approx_eq(&q, 1e-12), "{q:?} -> {back:?}");
            assert!(back.is_unit(1e-12));
        }
    }

    #[test]
    fn test_zero_axis_gives_identity() {
        let q = Quat::from_axis_radians(Vector3::new(0.0, 0.0, 0.0), 0.5);
        assert_eq!(q, Quat::new(1.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn test_from_unit_vectors() {
        let from = Vector3::new(1.0, 0.0, 0.0);
        let to = Vector3::new(0.0, 1.0, 0.0);
        let q = Quat::from_unit_vectors(from, to);
        assert!((q * from).approx_eq(&to, 1e-12));

        let opposite = Quat::from_unit_vectors(from, -from);
        assert!((opposite * from).approx_eq(&-from, 1e-12));
        assert!(opposite.is_unit(1e-12));
    }

    #[test]
    fn test_angle_to() {
        let a = Quat::from_angle_y(Rad(0.0));
        let b = Quat::from_angle_y(Rad(FRAC_PI_2));
        assert!(approx_eq(a.angle_to(&b), FRAC_PI_2, 1e-12));
        assert!(approx_eq(b.angle_to(&-b), 0.0, 1e-6));
    }

    #[test]
    fn test_rotation_matrix_round_trip_through_compose() {
        let q = Quat::from_euler(&Euler::new(2.0, -0.3, 0.9, RotationOrder::Yzx));
        let m = Mat4::from_quaternion_rotation(q);
        assert!(Quat::from_rotation_matrix(&m).approx_eq(&q, 1e-12));
    }
}
