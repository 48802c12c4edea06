//! # Transform Math
//!
//! Numeric building blocks for the scene graph. Storage and everyday arithmetic
//! come from `cgmath`; the operations whose exact behaviour the scene graph
//! depends on (matrix compose/decompose, trace-based quaternion extraction,
//! Euler conversion, cofactor inversion) live in the extension traits below.
//!
//! ## Key Components
//!
//! - [`Matrix4Ext`] - compose, decompose, invert-or-zero, look rotation
//! - [`QuaternionExt`] - Euler and rotation-matrix conversion
//! - [`Euler`] / [`RotationOrder`] - three angles plus an axis order
//! - [`Vector3Ext`] - point/direction transforms and matrix column reads
//!
//! ## Conventions
//!
//! Matrices are column-major (`m[column][row]`), vectors are column vectors and
//! a child's local matrix is always appended on the right of its parent's
//! world matrix: `world = parent_world * local`.

pub mod euler;
pub mod matrix;
pub mod quaternion;
pub mod vector;

pub use euler::{Euler, RotationOrder};
pub use matrix::Matrix4Ext;
pub use quaternion::QuaternionExt;
pub use vector::Vector3Ext;

/// Three-component vector used for positions, scales and axes.
pub type Vec3 = cgmath::Vector3<f64>;
/// Rotation quaternion; `s` is the scalar (w) part.
pub type Quat = cgmath::Quaternion<f64>;
/// Column-major 4x4 transform.
pub type Mat4 = cgmath::Matrix4<f64>;

/// Threshold above which an Euler pole term is treated as gimbal lock.
pub const GIMBAL_LOCK_THRESHOLD: f64 = 0.9999999;

/// Compare two scalars within an absolute tolerance.
#[inline]
pub fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() <= epsilon
}
