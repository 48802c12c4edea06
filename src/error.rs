//! Error types for the scene-graph core.
//!
//! Most anomalies are recoverable: the operation logs the error and degrades to
//! a no-op or a defined fallback value. The error values still exist so the
//! fallible boundaries (`try_*` operations and parsing) can report them.

use thiserror::Error;

/// Everything that can go wrong in the scene-graph core.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SceneError {
    /// A node was asked to become its own child.
    #[error("node {0} cannot be added as a child of itself")]
    SelfParenting(u64),

    /// The child is an ancestor of the would-be parent.
    #[error("adding node {child} under node {parent} would create a cycle")]
    CyclicHierarchy { parent: u64, child: u64 },

    /// An Euler rotation order string did not name one of the six permutations.
    #[error("unrecognized rotation order '{0}'")]
    InvalidRotationOrder(String),

    /// Inversion of a matrix whose determinant is exactly zero.
    #[error("matrix is singular (determinant is zero)")]
    SingularMatrix,

    /// A line of a `key=value` configuration could not be understood.
    #[error("config line {line}: {message}")]
    ConfigParse { line: usize, message: String },
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, SceneError>;
