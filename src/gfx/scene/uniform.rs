use cgmath::{Matrix, Vector4};

use super::node::SceneNode;
use crate::gfx::camera::convert_matrix4_to_array;
use crate::gfx::math::{Mat4, Matrix4Ext};

/// Per-node transform data in the layout a vertex shader reads.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct NodeUniform {
    /// World matrix.
    pub model: [[f32; 4]; 4],
    /// Inverse-transpose of the world matrix with translation removed.
    pub normal: [[f32; 4]; 4],
}

impl NodeUniform {
    pub fn from_world(world: &Mat4) -> Self {
        let mut normal = world.invert_or_zero().transpose();
        normal.x.w = 0.0;
        normal.y.w = 0.0;
        normal.z.w = 0.0;
        normal.w = Vector4::new(0.0, 0.0, 0.0, 1.0);

        Self {
            model: convert_matrix4_to_array(world),
            normal: convert_matrix4_to_array(&normal),
        }
    }
}

impl SceneNode {
    /// Uniform data from the cached world matrix.
    pub fn uniform(&self) -> NodeUniform {
        NodeUniform::from_world(&self.world_matrix())
    }
}
