//! The scene node handle and its transform state.
//!
//! A [`SceneNode`] is a cheap, clonable handle to shared node data. Parents own
//! their children through the handles in their child list; the link from a
//! child back to its parent is a `Weak` reference and never keeps the parent
//! alive.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use cgmath::{SquareMatrix, Vector3, Zero};
use rand::Rng;

use super::events::Listener;
use super::kind::NodeKind;
use crate::config::SceneConfig;
use crate::gfx::camera::Camera;
use crate::gfx::math::{Euler, Mat4, Matrix4Ext, Quat, QuaternionExt, RotationOrder, Vec3};

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(0);

/// Whether a node takes part in the automatic per-frame world update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorldUpdate {
    /// Visited by every traversal from its parent.
    #[default]
    Auto,
    /// Only updated when a parent forces propagation or on demand.
    Manual,
}

/// How current a node's cached matrices are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// Local and world matrices agree with the transform and the parent.
    Clean,
    /// Position, rotation or scale changed since the local matrix was built.
    LocalDirty,
    /// The local matrix changed; the world matrix has not caught up.
    WorldDirty,
}

pub(super) struct NodeData {
    pub(super) id: u64,
    pub(super) uuid: String,
    pub(super) name: String,
    pub(super) kind: NodeKind,
    pub(super) visible: bool,

    // Local transform
    pub(super) position: Vec3,
    pub(super) quaternion: Quat,
    pub(super) scale: Vec3,
    pub(super) rotation_order: RotationOrder,
    pub(super) up: Vec3,

    // Cached matrices
    pub(super) local_matrix: Mat4,
    pub(super) world_matrix: Mat4,

    pub(super) matrix_auto_update: bool,
    pub(super) world_update: WorldUpdate,
    pub(super) local_dirty: bool,
    pub(super) needs_world_update: bool,

    // Hierarchy
    pub(super) parent: Option<Weak<RefCell<NodeData>>>,
    pub(super) children: Vec<SceneNode>,

    pub(super) listeners: Vec<Listener>,
    /// Bumped by `clear_listeners`, so a dispatch in progress drops its list.
    pub(super) listener_generation: u64,
}

impl NodeData {
    fn new(kind: NodeKind, config: &SceneConfig) -> Self {
        Self {
            id: NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed),
            uuid: generate_uuid(),
            name: String::new(),
            kind,
            visible: true,
            position: Vector3::zero(),
            quaternion: Quat::new(1.0, 0.0, 0.0, 0.0),
            scale: Vector3::new(1.0, 1.0, 1.0),
            rotation_order: config.rotation_order,
            up: config.default_up,
            local_matrix: Mat4::identity(),
            world_matrix: Mat4::identity(),
            matrix_auto_update: config.matrix_auto_update,
            world_update: config.world_update,
            local_dirty: false,
            needs_world_update: false,
            parent: None,
            children: Vec::new(),
            listeners: Vec::new(),
            listener_generation: 0,
        }
    }

    /// Record a change to position/rotation/scale.
    fn touch_transform(&mut self) {
        if self.matrix_auto_update {
            self.local_dirty = true;
        }
    }

    /// Rebuild the local matrix from the transform (auto-update only) and
    /// flag the world matrix as stale.
    pub(super) fn compute_local_matrix(&mut self) {
        if self.matrix_auto_update {
            self.local_matrix = Mat4::compose(self.position, self.quaternion, self.scale);
            self.local_dirty = false;
        }
        self.needs_world_update = true;
    }

    /// `world = parent_world * local`, or `local` for a root.
    pub(super) fn write_world_matrix(&mut self, parent_world: Option<&Mat4>) {
        self.world_matrix = match parent_world {
            Some(parent_world) => parent_world * self.local_matrix,
            None => self.local_matrix,
        };
        if let NodeKind::Camera(camera) = &mut self.kind {
            camera.view = self.world_matrix.invert_or_zero();
        }
    }

    /// Replace the local matrix and keep position/rotation/scale consistent with it.
    pub(super) fn set_local_matrix_decomposed(&mut self, matrix: Mat4) {
        let (position, quaternion, scale) = matrix.decompose();
        self.position = position;
        self.quaternion = quaternion;
        self.scale = scale;
        self.local_matrix = matrix;
        self.local_dirty = false;
        self.needs_world_update = true;
    }
}

/// Random RFC 4122 version 4 identifier, upper-case hex.
fn generate_uuid() -> String {
    let mut bytes: [u8; 16] = rand::rng().random();
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;

    let hex: Vec<String> = bytes.iter().map(|b| format!("{b:02X}")).collect();
    format!(
        "{}-{}-{}-{}-{}",
        hex[0..4].concat(),
        hex[4..6].concat(),
        hex[6..8].concat(),
        hex[8..10].concat(),
        hex[10..16].concat()
    )
}

/// A node of the scene graph.
///
/// Cloning the handle shares the node; use [`SceneNode::deep_clone`] to copy a
/// subtree. Two handles compare equal when they refer to the same node.
#[derive(Clone)]
pub struct SceneNode {
    pub(super) inner: Rc<RefCell<NodeData>>,
}

impl SceneNode {
    /// Creates a detached node with the default [`SceneConfig`].
    pub fn new(kind: NodeKind) -> Self {
        Self::with_config(kind, &SceneConfig::default())
    }

    /// Creates a detached node using the defaults from `config`.
    pub fn with_config(kind: NodeKind, config: &SceneConfig) -> Self {
        Self {
            inner: Rc::new(RefCell::new(NodeData::new(kind, config))),
        }
    }

    pub fn group() -> Self {
        Self::new(NodeKind::Group)
    }

    /// A node standing in for a loaded model.
    pub fn model(source: impl Into<String>) -> Self {
        Self::new(NodeKind::Model {
            source: source.into(),
        })
    }

    pub fn camera(camera: Camera) -> Self {
        Self::new(NodeKind::Camera(camera))
    }

    pub(super) fn from_data(data: NodeData) -> Self {
        Self {
            inner: Rc::new(RefCell::new(data)),
        }
    }

    pub(super) fn from_inner(inner: Rc<RefCell<NodeData>>) -> Self {
        Self { inner }
    }

    /// Copy of this node's own state with a fresh identity and no links.
    pub(super) fn detached_copy(&self) -> Self {
        let d = self.inner.borrow();
        let mut data = NodeData::new(d.kind.clone(), &SceneConfig::default());
        data.name = d.name.clone();
        data.visible = d.visible;
        data.position = d.position;
        data.quaternion = d.quaternion;
        data.scale = d.scale;
        data.rotation_order = d.rotation_order;
        data.up = d.up;
        data.local_matrix = d.local_matrix;
        data.world_matrix = d.world_matrix;
        data.matrix_auto_update = d.matrix_auto_update;
        data.world_update = d.world_update;
        data.local_dirty = d.local_dirty;
        data.needs_world_update = d.needs_world_update;
        Self::from_data(data)
    }

    /// Whether both handles refer to the same node.
    pub fn ptr_eq(&self, other: &SceneNode) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    // Identity

    /// Process-wide unique, monotonically assigned id.
    pub fn id(&self) -> u64 {
        self.inner.borrow().id
    }

    pub fn uuid(&self) -> String {
        self.inner.borrow().uuid.clone()
    }

    pub fn name(&self) -> String {
        self.inner.borrow().name.clone()
    }

    pub fn set_name(&self, name: impl Into<String>) {
        self.inner.borrow_mut().name = name.into();
    }

    pub fn kind(&self) -> NodeKind {
        self.inner.borrow().kind.clone()
    }

    pub fn is_camera(&self) -> bool {
        matches!(self.inner.borrow().kind, NodeKind::Camera(_))
    }

    /// Camera parameters, if this is a camera node.
    pub fn camera_settings(&self) -> Option<Camera> {
        match &self.inner.borrow().kind {
            NodeKind::Camera(camera) => Some(*camera),
            _ => None,
        }
    }

    /// Edit camera parameters in place; returns `false` for non-camera nodes.
    pub fn update_camera(&self, f: impl FnOnce(&mut Camera)) -> bool {
        match &mut self.inner.borrow_mut().kind {
            NodeKind::Camera(camera) => {
                f(camera);
                true
            }
            _ => false,
        }
    }

    pub fn visible(&self) -> bool {
        self.inner.borrow().visible
    }

    pub fn set_visible(&self, visible: bool) {
        self.inner.borrow_mut().visible = visible;
    }

    // Transform

    pub fn position(&self) -> Vec3 {
        self.inner.borrow().position
    }

    pub fn set_position(&self, position: Vec3) {
        let mut d = self.inner.borrow_mut();
        d.position = position;
        d.touch_transform();
    }

    pub fn quaternion(&self) -> Quat {
        self.inner.borrow().quaternion
    }

    pub fn set_quaternion(&self, quaternion: Quat) {
        let mut d = self.inner.borrow_mut();
        d.quaternion = quaternion;
        d.touch_transform();
    }

    /// Euler view of the rotation, derived from the quaternion in this node's order.
    pub fn rotation(&self) -> Euler {
        let d = self.inner.borrow();
        Euler::from_quaternion(d.quaternion, d.rotation_order)
    }

    /// Set the rotation from Euler angles; the node adopts the Euler's order.
    pub fn set_rotation(&self, euler: Euler) {
        let mut d = self.inner.borrow_mut();
        d.quaternion = Quat::from_euler(&euler);
        d.rotation_order = euler.order;
        d.touch_transform();
    }

    pub fn rotation_order(&self) -> RotationOrder {
        self.inner.borrow().rotation_order
    }

    /// Change the order of the Euler view. The rotation itself is unchanged.
    pub fn set_rotation_order(&self, order: RotationOrder) {
        self.inner.borrow_mut().rotation_order = order;
    }

    /// Parse and apply a rotation order name such as `"YXZ"`.
    ///
    /// An unknown name is logged and leaves the node untouched.
    pub fn set_rotation_order_str(&self, order: &str) -> bool {
        match order.parse::<RotationOrder>() {
            Ok(order) => {
                self.set_rotation_order(order);
                true
            }
            Err(err) => {
                log::warn!("node {}: {err}, rotation order unchanged", self.id());
                false
            }
        }
    }

    pub fn scale(&self) -> Vec3 {
        self.inner.borrow().scale
    }

    pub fn set_scale(&self, scale: Vec3) {
        let mut d = self.inner.borrow_mut();
        d.scale = scale;
        d.touch_transform();
    }

    /// Up vector used by [`SceneNode::look_at`].
    pub fn up(&self) -> Vec3 {
        self.inner.borrow().up
    }

    pub fn set_up(&self, up: Vec3) {
        self.inner.borrow_mut().up = up;
    }

    // Matrices and flags

    /// Cached local matrix as of the last rebuild.
    pub fn local_matrix(&self) -> Mat4 {
        self.inner.borrow().local_matrix
    }

    /// Write the local matrix directly.
    ///
    /// Meant for nodes with `matrix_auto_update` off (baked or imported
    /// transforms). Position, rotation and scale are decomposed from the
    /// matrix so every view of the transform agrees.
    pub fn set_local_matrix(&self, matrix: Mat4) {
        self.inner.borrow_mut().set_local_matrix_decomposed(matrix);
    }

    /// Premultiply the local transform by `matrix`.
    pub fn apply_matrix(&self, matrix: &Mat4) {
        let mut d = self.inner.borrow_mut();
        if d.matrix_auto_update {
            d.local_matrix = Mat4::compose(d.position, d.quaternion, d.scale);
        }
        let updated = matrix * d.local_matrix;
        d.set_local_matrix_decomposed(updated);
    }

    /// Cached world matrix as of the last update.
    ///
    /// Stale between a transform change and the next propagation; use
    /// [`SceneNode::update_world_transform`] when an immediate value is needed.
    pub fn world_matrix(&self) -> Mat4 {
        self.inner.borrow().world_matrix
    }

    pub fn matrix_auto_update(&self) -> bool {
        self.inner.borrow().matrix_auto_update
    }

    pub fn set_matrix_auto_update(&self, enabled: bool) {
        self.inner.borrow_mut().matrix_auto_update = enabled;
    }

    pub fn world_update(&self) -> WorldUpdate {
        self.inner.borrow().world_update
    }

    pub fn set_world_update(&self, world_update: WorldUpdate) {
        self.inner.borrow_mut().world_update = world_update;
    }

    pub fn needs_world_update(&self) -> bool {
        self.inner.borrow().needs_world_update
    }

    pub fn freshness(&self) -> Freshness {
        let d = self.inner.borrow();
        if d.local_dirty {
            Freshness::LocalDirty
        } else if d.needs_world_update {
            Freshness::WorldDirty
        } else {
            Freshness::Clean
        }
    }
}

impl PartialEq for SceneNode {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for SceneNode {}

impl fmt::Debug for SceneNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_borrow() {
            Ok(d) => f
                .debug_struct("SceneNode")
                .field("id", &d.id)
                .field("name", &d.name)
                .field("kind", &d.kind.label())
                .field("position", &d.position)
                .field("children", &d.children.len())
                .finish(),
            Err(_) => f.write_str("SceneNode { <borrowed> }"),
        }
    }
}
