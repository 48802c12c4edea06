//! 4x4 matrix operations the scene graph relies on.
//!
//! `compose` and `decompose` are inverse operations for every matrix with
//! non-zero scale. Inversion uses the cofactor/adjugate expansion and, unlike
//! `cgmath::SquareMatrix::invert`, treats only an exactly-zero determinant as
//! singular; the result is then the all-zero matrix.

use cgmath::{InnerSpace, Matrix4, SquareMatrix, Vector3, Zero};

use super::{approx_eq, Mat4, Quat, QuaternionExt, Vec3};
use crate::error::SceneError;

/// Extension operations on [`Mat4`].
pub trait Matrix4Ext: Sized {
    /// Build a transform from translation, rotation and per-axis scale.
    fn compose(position: Vec3, quaternion: Quat, scale: Vec3) -> Self;

    /// Split a transform back into `(position, quaternion, scale)`.
    ///
    /// A negative determinant flips the sign of the x scale so reflections
    /// survive a round trip. A matrix whose determinant is exactly zero has no
    /// recoverable rotation: the translation and the measured column lengths
    /// are returned together with the identity quaternion.
    fn decompose(&self) -> (Vec3, Quat, Vec3);

    /// Cofactor inverse, or [`SceneError::SingularMatrix`] if the determinant is exactly zero.
    fn try_invert(&self) -> Result<Self, SceneError>;

    /// Cofactor inverse, falling back to the all-zero matrix (logged) when singular.
    fn invert_or_zero(&self) -> Self;

    /// Rotation that points the local +Z axis from `target` toward `eye`.
    ///
    /// Coincident `eye`/`target` fall back to +Z, and an `up` parallel to the
    /// view direction is nudged so the basis stays orthonormal.
    fn look_rotation(eye: Vec3, target: Vec3, up: Vec3) -> Self;

    /// Pure rotation matrix from a quaternion.
    fn from_quaternion_rotation(quaternion: Quat) -> Self;

    /// Rotation part with scale divided out and translation cleared.
    fn extract_rotation(&self) -> Self;

    /// Largest column length of the upper 3x3 block.
    fn max_scale_on_axis(&self) -> f64;

    /// Element-wise comparison within `epsilon`.
    fn approx_eq(&self, other: &Self, epsilon: f64) -> bool;
}

impl Matrix4Ext for Mat4 {
    fn compose(position: Vec3, quaternion: Quat, scale: Vec3) -> Self {
        let (x, y, z, w) = (quaternion.v.x, quaternion.v.y, quaternion.v.z, quaternion.s);
        let (x2, y2, z2) = (x + x, y + y, z + z);
        let (xx, xy, xz) = (x * x2, x * y2, x * z2);
        let (yy, yz, zz) = (y * y2, y * z2, z * z2);
        let (wx, wy, wz) = (w * x2, w * y2, w * z2);

        let (sx, sy, sz) = (scale.x, scale.y, scale.z);

        Matrix4::new(
            (1.0 - (yy + zz)) * sx,
            (xy + wz) * sx,
            (xz - wy) * sx,
            0.0,
            (xy - wz) * sy,
            (1.0 - (xx + zz)) * sy,
            (yz + wx) * sy,
            0.0,
            (xz + wy) * sz,
            (yz - wx) * sz,
            (1.0 - (xx + yy)) * sz,
            0.0,
            position.x,
            position.y,
            position.z,
            1.0,
        )
    }

    fn decompose(&self) -> (Vec3, Quat, Vec3) {
        let mut sx = self.x.truncate().magnitude();
        let sy = self.y.truncate().magnitude();
        let sz = self.z.truncate().magnitude();

        let position = self.w.truncate();

        let det = self.determinant();
        if det == 0.0 {
            log::warn!("decompose: determinant is zero, rotation defaults to identity");
            return (position, Quat::new(1.0, 0.0, 0.0, 0.0), Vector3::new(sx, sy, sz));
        }
        if det < 0.0 {
            sx = -sx;
        }

        let mut rotation = *self;
        rotation.x *= 1.0 / sx;
        rotation.y *= 1.0 / sy;
        rotation.z *= 1.0 / sz;

        let quaternion = Quat::from_rotation_matrix(&rotation);

        (position, quaternion, Vector3::new(sx, sy, sz))
    }

    fn try_invert(&self) -> Result<Self, SceneError> {
        let mut cofactors = [[0.0f64; 4]; 4];
        for (row, cofactor_row) in cofactors.iter_mut().enumerate() {
            for (col, cofactor) in cofactor_row.iter_mut().enumerate() {
                let sign = if (row + col) % 2 == 0 { 1.0 } else { -1.0 };
                *cofactor = sign * minor(self, row, col);
            }
        }

        // Laplace expansion along the first row.
        let det: f64 = (0..4).map(|col| self[col][0] * cofactors[0][col]).sum();
        if det == 0.0 {
            return Err(SceneError::SingularMatrix);
        }

        let det_inv = 1.0 / det;
        // inverse(row, col) = cofactor(col, row) / det, stored column-major.
        let mut columns = [[0.0f64; 4]; 4];
        for (col, column) in columns.iter_mut().enumerate() {
            for (row, value) in column.iter_mut().enumerate() {
                *value = cofactors[col][row] * det_inv;
            }
        }

        Ok(Matrix4::from(columns))
    }

    fn invert_or_zero(&self) -> Self {
        match self.try_invert() {
            Ok(inverse) => inverse,
            Err(err) => {
                log::warn!("{err}, substituting the zero matrix");
                Matrix4::zero()
            }
        }
    }

    fn look_rotation(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let mut z = eye - target;
        if z.magnitude2() == 0.0 {
            z.z = 1.0;
        }
        z = z.normalize();

        let mut x = up.cross(z);
        if x.magnitude2() == 0.0 {
            if up.z.abs() == 1.0 {
                z.x += 0.0001;
            } else {
                z.z += 0.0001;
            }
            z = z.normalize();
            x = up.cross(z);
            if x.magnitude2() == 0.0 {
                log::warn!("look_rotation: up vector {up:?} is zero, keeping identity rotation");
                return Matrix4::identity();
            }
        }
        x = x.normalize();
        let y = z.cross(x);

        Matrix4::new(
            x.x, x.y, x.z, 0.0, //
            y.x, y.y, y.z, 0.0, //
            z.x, z.y, z.z, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        )
    }

    fn from_quaternion_rotation(quaternion: Quat) -> Self {
        Self::compose(Vector3::zero(), quaternion, Vector3::new(1.0, 1.0, 1.0))
    }

    fn extract_rotation(&self) -> Self {
        let mut rotation = Matrix4::identity();
        for (col, length) in [
            self.x.truncate().magnitude(),
            self.y.truncate().magnitude(),
            self.z.truncate().magnitude(),
        ]
        .into_iter()
        .enumerate()
        {
            let inv = if length == 0.0 { 0.0 } else { 1.0 / length };
            for row in 0..3 {
                rotation[col][row] = self[col][row] * inv;
            }
        }
        rotation
    }

    fn max_scale_on_axis(&self) -> f64 {
        self.x
            .truncate()
            .magnitude2()
            .max(self.y.truncate().magnitude2())
            .max(self.z.truncate().magnitude2())
            .sqrt()
    }

    fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        (0..4).all(|col| (0..4).all(|row| approx_eq(self[col][row], other[col][row], epsilon)))
    }
}

/// Determinant of the 3x3 block left after deleting `row` and `col`.
fn minor(m: &Mat4, row: usize, col: usize) -> f64 {
    let mut sub = [[0.0f64; 3]; 3];
    let rows = (0..4).filter(|&r| r != row);
    for (sub_row, r) in rows.enumerate() {
        let cols = (0..4).filter(|&c| c != col);
        for (sub_col, c) in cols.enumerate() {
            sub[sub_row][sub_col] = m[c][r];
        }
    }

    sub[0][0] * (sub[1][1] * sub[2][2] - sub[1][2] * sub[2][1])
        - sub[0][1] * (sub[1][0] * sub[2][2] - sub[1][2] * sub[2][0])
        + sub[0][2] * (sub[1][0] * sub[2][1] - sub[1][1] * sub[2][0])
}
