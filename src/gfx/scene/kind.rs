use crate::gfx::camera::Camera;

/// What a node stands for. Only cameras change how the graph treats a node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Pure grouping node.
    Group,
    /// A placed model; `source` is where its geometry is loaded from.
    Model { source: String },
    /// Looks down its local -Z axis; keeps a view matrix in sync with its world matrix.
    Camera(Camera),
    /// Editor helpers such as gizmos.
    Helper,
}

impl NodeKind {
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::Group => "group",
            NodeKind::Model { .. } => "model",
            NodeKind::Camera(_) => "camera",
            NodeKind::Helper => "helper",
        }
    }

    /// Whether the node produces draw data.
    pub fn is_renderable(&self) -> bool {
        matches!(self, NodeKind::Model { .. })
    }
}
