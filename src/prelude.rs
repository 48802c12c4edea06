//! # Vanscene Prelude
//!
//! This module provides a convenient way to import commonly used types and traits
//! from the scene graph. It brings the math extension traits into scope so
//! their methods resolve on cgmath types.
//!
//! ## Usage
//!
//! ```no_run
//! use vanscene::prelude::*;
//!
//! let scene = vanscene::default();
//! let fridge = scene.add_model("models/fridge.glb", Vector3::new(0.0, 0.0, -1.5));
//! fridge.set_rotation(Euler::new(0.0, 0.5, 0.0, RotationOrder::Xyz));
//!
//! let mut gizmo = TransformGizmo::new(&scene);
//! gizmo.select(&fridge);
//! scene.update();
//! ```

pub use crate::default;

// Configuration and errors
pub use crate::config::SceneConfig;
pub use crate::error::SceneError;

// Math
pub use crate::gfx::math::{
    Euler, Mat4, Matrix4Ext, Quat, QuaternionExt, RotationOrder, Vec3, Vector3Ext,
};

// Scene graph
pub use crate::gfx::camera::Camera;
pub use crate::gfx::gizmos::{GizmoMode, TransformGizmo};
pub use crate::gfx::scene::{
    Freshness, NodeEvent, NodeKind, Scene, SceneNode, UpdateStats, WorldUpdate,
};

// Re-export common external dependencies
pub use cgmath::{InnerSpace, Vector3, Zero};
