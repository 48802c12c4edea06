use cgmath::{perspective, Deg, SquareMatrix};

use crate::gfx::math::Mat4;

/// Perspective camera parameters.
///
/// The camera itself is a scene node (see
/// [`NodeKind::Camera`](crate::gfx::scene::NodeKind::Camera)); this struct only
/// holds the lens and the view matrix derived from the node's world matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Vertical field of view in degrees.
    pub fov_y: f64,
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
    /// Inverse of the owning node's world matrix, refreshed with it.
    pub(crate) view: Mat4,
}

impl Camera {
    /// Creates a new camera
    ///
    /// # Arguments
    /// * `fov_y` - Vertical field of view in degrees
    /// * `aspect` - Viewport width over height
    /// * `near` - Near clip distance
    /// * `far` - Far clip distance
    pub fn new(fov_y: f64, aspect: f64, near: f64, far: f64) -> Self {
        Self {
            fov_y,
            aspect,
            near,
            far,
            view: Mat4::identity(),
        }
    }

    /// World-to-camera transform as of the node's last world update.
    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }

    /// Right-handed perspective projection with OpenGL clip depth.
    ///
    /// Lens parameters that cannot form a frustum are logged and yield the
    /// identity matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        let valid = self.fov_y > 0.0
            && self.fov_y < 180.0
            && self.aspect > 0.0
            && self.near > 0.0
            && self.far > self.near;
        if !valid {
            log::warn!(
                "camera: invalid lens (fov {} aspect {} near {} far {}), using identity projection",
                self.fov_y,
                self.aspect,
                self.near,
                self.far
            );
            return Mat4::identity();
        }
        perspective(Deg(self.fov_y), self.aspect, self.near, self.far)
    }

    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(50.0, 1.0, 0.1, 2000.0)
    }
}
