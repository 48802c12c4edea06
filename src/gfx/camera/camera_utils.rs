use cgmath::{Matrix4, SquareMatrix};

use crate::gfx::math::{Vec3, Vector3Ext};
use crate::gfx::scene::SceneNode;

/// Remaps OpenGL clip depth (-1..1) to the 0..1 range used by modern GPU APIs.
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f64> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug)]
pub struct CameraUniform {
    /// The eye position of the camera in homogenous coordinates.
    ///
    /// Homogenous coordinates are used to fullfill the 16 byte alignment requirement.
    pub view_position: [f32; 4],

    /// Contains the view projection matrix.
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    /// Uniform for a camera node, from its cached world matrix.
    ///
    /// Returns `None` if the node is not a camera.
    pub fn from_camera_node(node: &SceneNode) -> Option<Self> {
        let camera = node.camera_settings()?;
        let eye = Vec3::from_matrix_position(&node.world_matrix());
        Some(Self {
            view_position: [eye.x as f32, eye.y as f32, eye.z as f32, 1.0],
            view_proj: convert_matrix4_to_array(
                &(OPENGL_TO_WGPU_MATRIX * camera.view_projection_matrix()),
            ),
        })
    }
}

impl Default for CameraUniform {
    /// Creates a default [CameraUniform].
    fn default() -> Self {
        Self {
            view_position: [0.0; 4],
            view_proj: convert_matrix4_to_array(&Matrix4::identity()),
        }
    }
}

/// Narrow a column-major matrix to the `f32` layout GPU buffers expect.
pub fn convert_matrix4_to_array(matrix4: &Matrix4<f64>) -> [[f32; 4]; 4] {
    let mut result = [[0.0; 4]; 4];

    for i in 0..4 {
        for j in 0..4 {
            result[i][j] = matrix4[i][j] as f32;
        }
    }

    result
}
