//! Euler angles and rotation orders.
//!
//! An [`Euler`] is a derived view of a rotation. Nodes store a quaternion and
//! build the Euler form on demand, so there is no second copy to keep in sync.

use std::fmt;
use std::str::FromStr;

use cgmath::Quaternion;

use super::{approx_eq, Mat4, Matrix4Ext, Quat, QuaternionExt, GIMBAL_LOCK_THRESHOLD};
use crate::error::SceneError;

/// Order in which the three intrinsic axis rotations are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RotationOrder {
    #[default]
    Xyz,
    Yxz,
    Zxy,
    Zyx,
    Yzx,
    Xzy,
}

impl RotationOrder {
    /// Every supported order.
    pub const ALL: [RotationOrder; 6] = [
        RotationOrder::Xyz,
        RotationOrder::Yxz,
        RotationOrder::Zxy,
        RotationOrder::Zyx,
        RotationOrder::Yzx,
        RotationOrder::Xzy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RotationOrder::Xyz => "XYZ",
            RotationOrder::Yxz => "YXZ",
            RotationOrder::Zxy => "ZXY",
            RotationOrder::Zyx => "ZYX",
            RotationOrder::Yzx => "YZX",
            RotationOrder::Xzy => "XZY",
        }
    }
}

impl fmt::Display for RotationOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RotationOrder {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        RotationOrder::ALL
            .into_iter()
            .find(|order| order.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| SceneError::InvalidRotationOrder(s.to_string()))
    }
}

/// Three rotation angles in radians plus the order they are applied in.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Euler {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub order: RotationOrder,
}

impl Euler {
    pub fn new(x: f64, y: f64, z: f64, order: RotationOrder) -> Self {
        Self { x, y, z, order }
    }

    /// Angles of a pure rotation matrix (upper 3x3 must be unscaled).
    ///
    /// When the pole term reaches the gimbal-lock threshold only two degrees of
    /// freedom remain; the third angle of the order is then fixed at zero.
    pub fn from_rotation_matrix(m: &Mat4, order: RotationOrder) -> Self {
        let (m11, m12, m13) = (m.x.x, m.y.x, m.z.x);
        let (m21, m22, m23) = (m.x.y, m.y.y, m.z.y);
        let (m31, m32, m33) = (m.x.z, m.y.z, m.z.z);

        let (x, y, z) = match order {
            RotationOrder::Xyz => {
                let y = m13.clamp(-1.0, 1.0).asin();
                if m13.abs() < GIMBAL_LOCK_THRESHOLD {
                    ((-m23).atan2(m33), y, (-m12).atan2(m11))
                } else {
                    (m32.atan2(m22), y, 0.0)
                }
            }
            RotationOrder::Yxz => {
                let x = (-m23.clamp(-1.0, 1.0)).asin();
                if m23.abs() < GIMBAL_LOCK_THRESHOLD {
                    (x, m13.atan2(m33), m21.atan2(m22))
                } else {
                    (x, (-m31).atan2(m11), 0.0)
                }
            }
            RotationOrder::Zxy => {
                let x = m32.clamp(-1.0, 1.0).asin();
                if m32.abs() < GIMBAL_LOCK_THRESHOLD {
                    (x, (-m31).atan2(m33), (-m12).atan2(m22))
                } else {
                    (x, 0.0, m21.atan2(m11))
                }
            }
            RotationOrder::Zyx => {
                let y = (-m31.clamp(-1.0, 1.0)).asin();
                if m31.abs() < GIMBAL_LOCK_THRESHOLD {
                    (m32.atan2(m33), y, m21.atan2(m11))
                } else {
                    (0.0, y, (-m12).atan2(m22))
                }
            }
            RotationOrder::Yzx => {
                let z = m21.clamp(-1.0, 1.0).asin();
                if m21.abs() < GIMBAL_LOCK_THRESHOLD {
                    ((-m23).atan2(m22), (-m31).atan2(m11), z)
                } else {
                    (0.0, m13.atan2(m33), z)
                }
            }
            RotationOrder::Xzy => {
                let z = (-m12.clamp(-1.0, 1.0)).asin();
                if m12.abs() < GIMBAL_LOCK_THRESHOLD {
                    (m32.atan2(m22), m13.atan2(m11), z)
                } else {
                    ((-m23).atan2(m33), 0.0, z)
                }
            }
        };

        Self::new(x, y, z, order)
    }

    /// Angles of a unit quaternion in the given order.
    pub fn from_quaternion(quaternion: Quat, order: RotationOrder) -> Self {
        Self::from_rotation_matrix(&Mat4::from_quaternion_rotation(quaternion), order)
    }

    pub fn to_quaternion(&self) -> Quat {
        Quat::from_euler(self)
    }

    /// Same rotation expressed in another order.
    pub fn reorder(&self, order: RotationOrder) -> Self {
        Self::from_quaternion(self.to_quaternion(), order)
    }

    /// Angle-wise comparison; orders must match.
    pub fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.order == other.order
            && approx_eq(self.x, other.x, epsilon)
            && approx_eq(self.y, other.y, epsilon)
            && approx_eq(self.z, other.z, epsilon)
    }
}

impl From<Euler> for Quaternion<f64> {
    fn from(euler: Euler) -> Self {
        euler.to_quaternion()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_rotation_order_parsing() {
        assert_eq!("XYZ".parse::<RotationOrder>().unwrap(), RotationOrder::Xyz);
        assert_eq!(" zyx ".parse::<RotationOrder>().unwrap(), RotationOrder::Zyx);
        assert_eq!(RotationOrder::Yzx.to_string(), "YZX");

        let err = "XXY".parse::<RotationOrder>().unwrap_err();
        assert!(matches!(err, SceneError::InvalidRotationOrder(ref s) if s == "XXY"));
    }

    #[test]
    fn test_quaternion_round_trip_every_order() {
        for order in RotationOrder::ALL {
            let euler = Euler::new(0.35, -0.6, 1.2, order);
            let back = Euler::from_quaternion(euler.to_quaternion(), order);
            assert!(back.approx_eq(&euler, 1e-9), "{order}: {back:?}");
        }
    }

    #[test]
    fn test_reorder_preserves_rotation() {
        let euler = Euler::new(0.1, 0.7, -0.4, RotationOrder::Xyz);
        let reordered = euler.reorder(RotationOrder::Zxy);

        assert_eq!(reordered.order, RotationOrder::Zxy);
        assert!(reordered
            .to_quaternion()
            .approx_eq(&euler.to_quaternion(), 1e-9));
    }

    #[test]
    fn test_gimbal_lock_forces_reduced_solution() {
        for order in RotationOrder::ALL {
            // Put the middle axis of each order at +90 degrees.
            let euler = match order {
                RotationOrder::Xyz | RotationOrder::Zyx => Euler::new(0.3, FRAC_PI_2, 0.5, order),
                RotationOrder::Yxz | RotationOrder::Zxy => Euler::new(FRAC_PI_2, 0.3, 0.5, order),
                RotationOrder::Yzx | RotationOrder::Xzy => Euler::new(0.3, 0.5, FRAC_PI_2, order),
            };

            let locked = Euler::from_quaternion(euler.to_quaternion(), order);
            let values = [locked.x, locked.y, locked.z];
            assert!(values.iter().all(|v| v.is_finite()), "{order}: {locked:?}");
            assert!(values.contains(&0.0), "{order}: {locked:?}");
            assert!(locked
                .to_quaternion()
                .approx_eq(&euler.to_quaternion(), 1e-6));
        }
    }

    #[test]
    fn test_default_is_identity() {
        let euler = Euler::default();
        assert_eq!(euler.order, RotationOrder::Xyz);
        assert!(euler
            .to_quaternion()
            .approx_eq(&Quat::new(1.0, 0.0, 0.0, 0.0), 0.0));
    }
}
