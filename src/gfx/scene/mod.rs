//! # Scene Graph Module
//!
//! Retained-mode scene graph: a tree of nodes, each with a local transform,
//! and world matrices derived from the chain of ancestors.
//!
//! ## Key Components
//!
//! - [`SceneNode`] - Shared handle to a node: transform, hierarchy links, flags
//! - [`Scene`] - Root node plus configuration and per-frame update
//! - [`NodeKind`] - Group, model, camera or helper
//! - [`NodeEvent`] - Hierarchy notifications delivered to listeners
//! - [`NodeUniform`] - GPU-ready per-node matrices
//!
//! ## Usage
//!
//! ```no_run
//! use vanscene::gfx::scene::{Scene, SceneNode};
//! use cgmath::Vector3;
//!
//! let scene = Scene::new();
//! let bench = scene.add_model("models/bench.glb", Vector3::new(1.0, 0.0, 0.0));
//! let cushion = SceneNode::model("models/cushion.glb");
//! cushion.set_position(Vector3::new(0.0, 0.5, 0.0));
//! bench.add(&cushion);
//!
//! scene.update();
//! let world = cushion.world_position(); // (1.0, 0.5, 0.0)
//! ```
//!
//! ## Matrix Freshness
//!
//! Changing position, rotation or scale only marks the node
//! ([`Freshness::LocalDirty`]). The local matrix is rebuilt by
//! [`SceneNode::compute_local_matrix`] or during propagation, which leaves the
//! node [`Freshness::WorldDirty`] until its world matrix is rewritten. Nodes with
//! `matrix_auto_update` off keep whatever local matrix was last written to them.

pub mod events;
pub mod hierarchy;
pub mod kind;
pub mod motion;
pub mod node;
pub mod propagation;
pub mod scene;
pub mod uniform;

// Re-export main types
pub use events::NodeEvent;
pub use kind::NodeKind;
pub use node::{Freshness, SceneNode, WorldUpdate};
pub use propagation::UpdateStats;
pub use scene::{Scene, SceneStatistics};
pub use uniform::NodeUniform;
