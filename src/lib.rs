// src/lib.rs
//! Vanscene
//!
//! Scene-graph transform core for a browser-based camper van configurator:
//! nodes with position/rotation/scale, a parent/child hierarchy, world matrices
//! kept in sync with it, and a transform gizmo for moving furniture around.

pub mod config;
pub mod error;
pub mod gfx;
pub mod prelude;

// Re-export main types for convenience
pub use config::SceneConfig;
pub use error::SceneError;
pub use gfx::scene::{Scene, SceneNode};

/// Creates an empty scene with the default configuration
pub fn default() -> Scene {
    Scene::new()
}
