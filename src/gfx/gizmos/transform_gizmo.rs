use cgmath::{InnerSpace, Vector3};

use crate::gfx::math::{Quat, Vec3};
use crate::gfx::scene::{NodeKind, Scene, SceneNode};

/// Which manipulation [`TransformGizmo::drag`] performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GizmoMode {
    #[default]
    Translate,
    Rotate,
    Scale,
}

struct Selection {
    node: SceneNode,
    original_parent: Option<SceneNode>,
}

/// Move/rotate/scale handle for one selected node at a time.
///
/// Selecting a node moves the gizmo onto it and re-parents the node under the
/// gizmo with [`SceneNode::attach`], so the node's world pose is unchanged.
/// Manipulating the gizmo then carries the node along. Deselecting attaches the
/// node back to the parent it had before, again keeping its world pose.
pub struct TransformGizmo {
    node: SceneNode,
    mode: GizmoMode,
    enabled: bool,
    selection: Option<Selection>,
}

impl TransformGizmo {
    /// Creates the gizmo node and adds it under the scene root
    pub fn new(scene: &Scene) -> Self {
        let node = scene.create_node(NodeKind::Helper);
        node.set_name("transform-gizmo");
        scene.add(&node);

        Self {
            node,
            mode: GizmoMode::default(),
            enabled: true,
            selection: None,
        }
    }

    /// The gizmo's own scene node.
    pub fn node(&self) -> &SceneNode {
        &self.node
    }

    pub fn mode(&self) -> GizmoMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: GizmoMode) {
        self.mode = mode;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// A disabled gizmo ignores manipulation but keeps its selection.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn selected(&self) -> Option<&SceneNode> {
        self.selection.as_ref().map(|selection| &selection.node)
    }

    /// Grab `node`, releasing any previous selection first.
    ///
    /// Returns `false` if the node cannot be selected (the gizmo itself or one
    /// of its ancestors).
    pub fn select(&mut self, node: &SceneNode) -> bool {
        if self.selected() == Some(node) {
            return true;
        }
        if node.ptr_eq(&self.node) || node.is_ancestor_of(&self.node) {
            log::error!(
                "gizmo: node {} contains the gizmo and cannot be selected",
                node.id()
            );
            return false;
        }
        self.deselect();

        let target = node.world_position();
        let placement = match self.node.parent() {
            Some(parent) => parent.world_to_local(target),
            None => target,
        };
        self.node.set_quaternion(Quat::new(1.0, 0.0, 0.0, 0.0));
        self.node.set_scale(Vector3::new(1.0, 1.0, 1.0));
        self.node.set_position(placement);

        let original_parent = node.parent();
        if !self.node.attach(node) {
            return false;
        }

        log::debug!("gizmo: selected node {} '{}'", node.id(), node.name());
        self.selection = Some(Selection {
            node: node.clone(),
            original_parent,
        });
        true
    }

    /// Release the selection back to its original parent, keeping its world
    /// pose. Returns the node that was selected.
    pub fn deselect(&mut self) -> Option<SceneNode> {
        let Selection {
            node,
            original_parent,
        } = self.selection.take()?;

        match original_parent {
            Some(parent) => {
                parent.attach(&node);
            }
            None => {
                node.detach();
            }
        }
        log::debug!("gizmo: released node {}", node.id());
        Some(node)
    }

    /// Move by `delta` in the gizmo's parent space.
    pub fn translate(&self, delta: Vec3) {
        if !self.active() {
            return;
        }
        self.node.set_position(self.node.position() + delta);
    }

    /// Rotate about `axis` (in the gizmo's parent space) by `angle` radians.
    pub fn rotate(&self, axis: Vec3, angle: f64) {
        if !self.active() || axis.magnitude2() == 0.0 {
            return;
        }
        self.node.rotate_on_world_axis(axis.normalize(), angle);
    }

    /// Multiply the scale component-wise by `factors`.
    pub fn scale_by(&self, factors: Vec3) {
        if !self.active() {
            return;
        }
        let scale = self.node.scale();
        self.node.set_scale(Vector3::new(
            scale.x * factors.x,
            scale.y * factors.y,
            scale.z * factors.z,
        ));
    }

    /// Apply a drag of `amount` along `axis` according to the current mode.
    ///
    /// Translate moves `amount` units, rotate turns `amount` radians and scale
    /// grows by `amount` along the axis.
    pub fn drag(&self, axis: Vec3, amount: f64) {
        if axis.magnitude2() == 0.0 {
            return;
        }
        let axis = axis.normalize();
        match self.mode {
            GizmoMode::Translate => self.translate(axis * amount),
            GizmoMode::Rotate => self.rotate(axis, amount),
            GizmoMode::Scale => {
                let grow = axis.map(|component| 1.0 + component.abs() * amount);
                self.scale_by(grow);
            }
        }
    }

    fn active(&self) -> bool {
        self.enabled && self.selection.is_some()
    }
}
