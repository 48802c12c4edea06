//! Parent/child structure: adding, removing, re-parenting and traversal.
//!
//! A node has at most one parent at any time. `add` moves a node that is already
//! parented elsewhere; `attach` does the same while keeping its world pose.

use std::rc::{Rc, Weak};

use super::events::NodeEvent;
use super::node::SceneNode;
use crate::error::{Result, SceneError};
use crate::gfx::math::Matrix4Ext;

impl SceneNode {
    pub fn parent(&self) -> Option<SceneNode> {
        self.inner
            .borrow()
            .parent
            .as_ref()
            .and_then(Weak::upgrade)
            .map(SceneNode::from_inner)
    }

    /// Snapshot of the children in insertion order.
    pub fn children(&self) -> Vec<SceneNode> {
        self.inner.borrow().children.clone()
    }

    pub fn child_count(&self) -> usize {
        self.inner.borrow().children.len()
    }

    /// Whether `other` is somewhere below this node.
    pub fn is_ancestor_of(&self, other: &SceneNode) -> bool {
        let mut current = other.parent();
        while let Some(node) = current {
            if node.ptr_eq(self) {
                return true;
            }
            current = node.parent();
        }
        false
    }

    fn check_can_adopt(&self, child: &SceneNode) -> Result<()> {
        if self.ptr_eq(child) {
            return Err(SceneError::SelfParenting(self.id()));
        }
        if child.is_ancestor_of(self) {
            return Err(SceneError::CyclicHierarchy {
                parent: self.id(),
                child: child.id(),
            });
        }
        Ok(())
    }

    /// Make `child` the last child of this node, detaching it from any previous parent.
    ///
    /// The child's local transform is kept, so its world pose changes with the
    /// new parent. Adding a node to its current parent moves it to the end.
    pub fn try_add(&self, child: &SceneNode) -> Result<()> {
        self.check_can_adopt(child)?;

        if let Some(old_parent) = child.parent() {
            old_parent.remove(child);
        }

        child.inner.borrow_mut().parent = Some(Rc::downgrade(&self.inner));
        self.inner.borrow_mut().children.push(child.clone());
        log::debug!("node {}: added child {}", self.id(), child.id());

        child.dispatch(&NodeEvent::Added { parent: self.id() });
        self.dispatch(&NodeEvent::ChildAdded { child: child.id() });
        Ok(())
    }

    /// Like [`SceneNode::try_add`], but logs a rejected child and returns `false`.
    pub fn add(&self, child: &SceneNode) -> bool {
        match self.try_add(child) {
            Ok(()) => true,
            Err(err) => {
                log::error!("add rejected: {err}");
                false
            }
        }
    }

    /// Add each node in order; returns how many were accepted.
    pub fn add_all(&self, children: &[SceneNode]) -> usize {
        children.iter().filter(|child| self.add(child)).count()
    }

    /// Remove `child` if it is a direct child. Returns `false` (and does
    /// nothing) otherwise.
    pub fn remove(&self, child: &SceneNode) -> bool {
        let index = self
            .inner
            .borrow()
            .children
            .iter()
            .position(|c| c.ptr_eq(child));
        let Some(index) = index else {
            return false;
        };

        self.inner.borrow_mut().children.remove(index);
        child.inner.borrow_mut().parent = None;
        log::debug!("node {}: removed child {}", self.id(), child.id());

        child.dispatch(&NodeEvent::Removed { parent: self.id() });
        self.dispatch(&NodeEvent::ChildRemoved { child: child.id() });
        true
    }

    /// Remove each node that is a direct child; returns how many were removed.
    pub fn remove_all(&self, children: &[SceneNode]) -> usize {
        children.iter().filter(|child| self.remove(child)).count()
    }

    pub fn remove_from_parent(&self) -> bool {
        match self.parent() {
            Some(parent) => parent.remove(self),
            None => false,
        }
    }

    /// Remove every child.
    pub fn clear(&self) {
        for child in self.children() {
            self.remove(&child);
        }
    }

    /// Re-parent `child` under this node while keeping its world pose.
    ///
    /// The child's new local transform is `inverse(self.world) * old_parent.world
    /// * old_local`. A singular world matrix on this node cannot be undone; the
    /// inversion falls back to zero and the child's pose is lost (logged).
    pub fn try_attach(&self, child: &SceneNode) -> Result<()> {
        self.check_can_adopt(child)?;

        self.update_world_transform(true, false);
        let mut to_new_parent = self.world_matrix().invert_or_zero();

        if let Some(old_parent) = child.parent() {
            old_parent.update_world_transform(true, false);
            to_new_parent = to_new_parent * old_parent.world_matrix();
        }

        child.apply_matrix(&to_new_parent);
        self.try_add(child)?;
        child.update_world_transform(false, true);
        Ok(())
    }

    /// Like [`SceneNode::try_attach`], but logs a rejected child and returns `false`.
    pub fn attach(&self, child: &SceneNode) -> bool {
        match self.try_attach(child) {
            Ok(()) => true,
            Err(err) => {
                log::error!("attach rejected: {err}");
                false
            }
        }
    }

    /// Remove this node from its parent, keeping its world pose as the new
    /// local transform. Returns `false` for a root.
    pub fn detach(&self) -> bool {
        let Some(parent) = self.parent() else {
            return false;
        };

        parent.update_world_transform(true, false);
        self.apply_matrix(&parent.world_matrix());
        parent.remove(self);
        self.update_world_transform(false, true);
        true
    }

    // Traversal

    /// Depth-first, pre-order visit of this node and all descendants.
    ///
    /// The callback may change the graph; each node's children are
    /// snapshotted before they are visited.
    pub fn traverse(&self, mut f: impl FnMut(&SceneNode)) {
        self.traverse_with(&mut f, false);
    }

    /// Like [`SceneNode::traverse`], but skips invisible nodes and their subtrees.
    pub fn traverse_visible(&self, mut f: impl FnMut(&SceneNode)) {
        self.traverse_with(&mut f, true);
    }

    fn traverse_with(&self, f: &mut dyn FnMut(&SceneNode), visible_only: bool) {
        if visible_only && !self.visible() {
            return;
        }
        f(self);
        for child in self.children() {
            child.traverse_with(f, visible_only);
        }
    }

    /// Visit each ancestor, nearest first.
    pub fn traverse_ancestors(&self, mut f: impl FnMut(&SceneNode)) {
        let mut current = self.parent();
        while let Some(node) = current {
            f(&node);
            current = node.parent();
        }
    }

    /// Number of ancestors; zero for a root.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        self.traverse_ancestors(|_| depth += 1);
        depth
    }

    /// Topmost ancestor, or this node if it has no parent.
    pub fn root(&self) -> SceneNode {
        let mut root = self.clone();
        self.traverse_ancestors(|node| root = node.clone());
        root
    }

    /// First node in depth-first order (this node included) matching `predicate`.
    pub fn find(&self, predicate: impl Fn(&SceneNode) -> bool) -> Option<SceneNode> {
        self.find_with(&predicate)
    }

    fn find_with(&self, predicate: &dyn Fn(&SceneNode) -> bool) -> Option<SceneNode> {
        if predicate(self) {
            return Some(self.clone());
        }
        self.children()
            .iter()
            .find_map(|child| child.find_with(predicate))
    }

    pub fn find_by_id(&self, id: u64) -> Option<SceneNode> {
        self.find(|node| node.id() == id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<SceneNode> {
        self.find(|node| node.inner.borrow().name == name)
    }

    pub fn find_by_uuid(&self, uuid: &str) -> Option<SceneNode> {
        self.find(|node| node.inner.borrow().uuid == uuid)
    }

    /// Copy this node and its subtree. Copies get new ids and uuids, no
    /// parent and no listeners.
    pub fn deep_clone(&self) -> SceneNode {
        let copy = self.detached_copy();
        for child in self.children() {
            copy.add(&child.deep_clone());
        }
        copy
    }
}
