//! Incremental rotation, translation and aiming.

use cgmath::{InnerSpace, Rotation, Vector3};

use super::node::SceneNode;
use crate::gfx::math::{Mat4, Matrix4Ext, Quat, QuaternionExt, Vec3, Vector3Ext};

impl SceneNode {
    /// Rotate about `axis` (normalized, in local space) by `angle` radians.
    pub fn rotate_on_axis(&self, axis: Vec3, angle: f64) {
        let q = Quat::from_axis_radians(axis, angle);
        self.set_quaternion(self.quaternion() * q);
    }

    /// Rotate about `axis` (normalized, in the parent's space) by `angle` radians.
    ///
    /// Assumes no rotated ancestors are involved, i.e. the parent frame is the
    /// world frame.
    pub fn rotate_on_world_axis(&self, axis: Vec3, angle: f64) {
        let q = Quat::from_axis_radians(axis, angle);
        self.set_quaternion(q * self.quaternion());
    }

    pub fn rotate_x(&self, angle: f64) {
        self.rotate_on_axis(Vector3::unit_x(), angle);
    }

    pub fn rotate_y(&self, angle: f64) {
        self.rotate_on_axis(Vector3::unit_y(), angle);
    }

    pub fn rotate_z(&self, angle: f64) {
        self.rotate_on_axis(Vector3::unit_z(), angle);
    }

    /// Move `distance` along `axis` (normalized, in local space).
    pub fn translate_on_axis(&self, axis: Vec3, distance: f64) {
        let offset = self.quaternion().rotate_vector(axis) * distance;
        self.set_position(self.position() + offset);
    }

    pub fn translate_x(&self, distance: f64) {
        self.translate_on_axis(Vector3::unit_x(), distance);
    }

    pub fn translate_y(&self, distance: f64) {
        self.translate_on_axis(Vector3::unit_y(), distance);
    }

    pub fn translate_z(&self, distance: f64) {
        self.translate_on_axis(Vector3::unit_z(), distance);
    }

    /// Turn the node so it faces `target` (a world-space point).
    ///
    /// Ordinary nodes point their local +Z at the target; cameras point -Z at
    /// it. The parent's world rotation is factored out so the node ends up
    /// facing the target in world space.
    pub fn look_at(&self, target: Vec3) {
        self.update_world_transform(true, false);
        let position = Vec3::from_matrix_position(&self.world_matrix());
        let up = self.up();

        let rotation = if self.is_camera() {
            Mat4::look_rotation(position, target, up)
        } else {
            Mat4::look_rotation(target, position, up)
        };
        let mut quaternion = Quat::from_rotation_matrix(&rotation);

        if let Some(parent) = self.parent() {
            let parent_rotation =
                Quat::from_rotation_matrix(&parent.world_matrix().extract_rotation());
            quaternion = parent_rotation.conjugate() * quaternion;
        }

        self.set_quaternion(quaternion.normalize());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::Camera;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_rotate_on_axis_is_local() {
        let node = SceneNode::group();
        node.rotate_y(FRAC_PI_2);
        node.rotate_x(FRAC_PI_2);

        let expected = Quat::from_axis_radians(Vector3::unit_y(), FRAC_PI_2)
            * Quat::from_axis_radians(Vector3::unit_x(), FRAC_PI_2);
        assert!(node.quaternion().approx_eq(&expected, 1e-12));
    }

    #[test]
    fn test_rotate_on_world_axis_premultiplies() {
        let node = SceneNode::group();
        node.rotate_y(FRAC_PI_2);
        node.rotate_on_world_axis(Vector3::unit_x(), FRAC_PI_2);

        let expected = Quat::from_axis_radians(Vector3::unit_x(), FRAC_PI_2)
            * Quat::from_axis_radians(Vector3::unit_y(), FRAC_PI_2);
        assert!(node.quaternion().approx_eq(&expected, 1e-12));
    }

    #[test]
    fn test_rotate_about_zero_axis_keeps_orientation() {
        let parent = SceneNode::group();
        let child = SceneNode::group();
        parent.add(&child);
        parent.rotate_y(FRAC_PI_2);
        let before = parent.quaternion();

        parent.rotate_on_axis(Vector3::new(0.0, 0.0, 0.0), 0.5);
        parent.rotate_on_world_axis(Vector3::new(0.0, 0.0, 0.0), 0.5);
        parent.propagate_world_matrix(false);

        assert_eq!(parent.quaternion(), before);
        let world = child.world_matrix();
        for col in 0..4 {
            for row in 0..4 {
                assert!(world[col][row].is_finite());
            }
        }
    }

    #[test]
    fn test_look_at_with_zero_up_stays_finite() {
        let node = SceneNode::group();
        node.set_up(Vector3::new(0.0, 0.0, 0.0));
        node.look_at(Vector3::new(1.0, 0.0, 0.0));
        node.propagate_world_matrix(false);

        assert_eq!(node.quaternion(), Quat::new(1.0, 0.0, 0.0, 0.0));
        let world = node.world_matrix();
        for col in 0..4 {
            for row in 0..4 {
                assert!(world[col][row].is_finite());
            }
        }
    }

    #[test]
    fn test_translate_follows_rotation() {
        let node = SceneNode::group();
        node.set_position(Vector3::new(1.0, 0.0, 0.0));
        node.rotate_y(FRAC_PI_2);
        node.translate_z(2.0);

        assert!(node
            .position()
            .approx_eq(&Vector3::new(3.0, 0.0, 0.0), 1e-12));

        node.translate_on_axis(Vector3::unit_y(), -1.0);
        assert!(node
            .position()
            .approx_eq(&Vector3::new(3.0, -1.0, 0.0), 1e-12));
    }

    #[test]
    fn test_look_at_points_positive_z() {
        let node = SceneNode::group();
        node.set_position(Vector3::new(1.0, 0.0, 0.0));
        node.look_at(Vector3::new(1.0, 0.0, 5.0));
        assert!(node
            .world_direction()
            .approx_eq(&Vector3::new(0.0, 0.0, 1.0), 1e-12));

        node.look_at(Vector3::new(-4.0, 0.0, 0.0));
        assert!(node
            .world_direction()
            .approx_eq(&Vector3::new(-1.0, 0.0, 0.0), 1e-12));
    }

    #[test]
    fn test_camera_looks_down_negative_z() {
        let camera = SceneNode::camera(Camera::default());
        camera.set_position(Vector3::new(0.0, 0.0, 10.0));
        camera.look_at(Vector3::new(0.0, 0.0, 0.0));

        // Facing the origin means +Z points back at the camera's position.
        assert!(camera
            .world_direction()
            .approx_eq(&Vector3::new(0.0, 0.0, 1.0), 1e-12));
        assert!(camera
            .quaternion()
            .approx_eq(&Quat::new(1.0, 0.0, 0.0, 0.0), 1e-12));
    }

    #[test]
    fn test_look_at_compensates_parent_rotation() {
        let parent = SceneNode::group();
        parent.rotate_y(0.8);
        let child = SceneNode::group();
        parent.add(&child);
        child.set_position(Vector3::new(0.0, 0.0, 0.0));

        let target = Vector3::new(0.0, 3.0, 4.0);
        child.look_at(target);
        assert!(child
            .world_direction()
            .approx_eq(&Vector3::new(0.0, 0.6, 0.8), 1e-9));
    }
}
