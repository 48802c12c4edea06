//! # Graphics Module
//!
//! Scene-graph core for the van configurator: transform math, the node
//! hierarchy, cameras and the editing gizmo.
//!
//! ## Architecture Overview
//!
//! The graphics system is organized into several key components:
//!
//! - **Math** ([`math`]) - Euler/quaternion/matrix conversions on top of cgmath
//! - **Scene Graph** ([`scene`]) - Node hierarchy and world-matrix propagation
//! - **Camera System** ([`camera`]) - Perspective lens carried by camera nodes
//! - **Gizmos** ([`gizmos`]) - Transform handle that edits a selected node
//!
//! ## Conventions
//!
//! - Right-handed coordinates, +Y up by default
//! - Column vectors; `world = parent_world * local`
//! - Local matrices are built as translation * rotation * scale
//! - Angles are radians except the camera's field of view (degrees)

pub mod camera;
pub mod gizmos;
pub mod math;
pub mod scene;
