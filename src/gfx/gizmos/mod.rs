//! # Gizmo System
//!
//! Interactive handles for editing the scene. A gizmo is itself a scene node;
//! it manipulates a selection by temporarily parenting it.
//!
//! ## Key Components
//!
//! - [`TransformGizmo`] - Translate/rotate/scale handle for the selected node
//! - [`GizmoMode`] - Which manipulation a drag performs
//!
//! ## Usage
//!
//! ```no_run
//! use vanscene::gfx::gizmos::{GizmoMode, TransformGizmo};
//! use vanscene::gfx::scene::Scene;
//! use cgmath::Vector3;
//!
//! let scene = Scene::new();
//! let sink = scene.add_model("models/sink.glb", Vector3::new(2.0, 0.0, 0.0));
//!
//! let mut gizmo = TransformGizmo::new(&scene);
//! gizmo.select(&sink);
//! gizmo.set_mode(GizmoMode::Translate);
//! gizmo.drag(Vector3::new(0.0, 0.0, 1.0), 0.25);
//! gizmo.deselect();
//! ```

pub mod transform_gizmo;

// Re-export main types
pub use transform_gizmo::{GizmoMode, TransformGizmo};

#[cfg(test)]
mod test_workflow;
