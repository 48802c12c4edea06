//! # Camera Module
//!
//! Perspective camera parameters carried by camera nodes, plus the uniform
//! block a renderer would upload for them.
//!
//! ## Key Components
//!
//! - [`Camera`] - Field of view, aspect and clip planes; keeps the view matrix
//!   of its node
//! - [`CameraUniform`] - GPU-ready view-projection data

pub mod camera;
pub mod camera_utils;

// Re-export main types
pub use camera::Camera;
pub use camera_utils::{convert_matrix4_to_array, CameraUniform};
