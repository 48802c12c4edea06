//! World matrix maintenance.
//!
//! Two entry points keep world matrices current:
//!
//! - [`SceneNode::propagate_world_matrix`] is the per-frame downward pass. It
//!   rebuilds local matrices, recomputes the world matrix of every node whose
//!   local matrix changed, and forces the recomputation down through that
//!   node's descendants.
//! - [`SceneNode::update_world_transform`] refreshes one node on demand,
//!   optionally walking up through its ancestors first and/or down through its
//!   descendants.
//!
//! The world queries in this module (`world_position` and friends) use the
//! on-demand path, so they never return a stale pose.

use cgmath::Vector3;

use super::node::{SceneNode, WorldUpdate};
use crate::gfx::math::{Mat4, Matrix4Ext, Quat, Vec3, Vector3Ext};

/// Counters from one propagation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateStats {
    /// Nodes the pass reached.
    pub nodes_visited: usize,
    /// Nodes whose world matrix was recomputed.
    pub world_updates: usize,
}

impl SceneNode {
    /// Rebuild the local matrix from position/rotation/scale when
    /// `matrix_auto_update` is on, and mark the world matrix stale.
    pub fn compute_local_matrix(&self) {
        self.inner.borrow_mut().compute_local_matrix();
    }

    /// Per-frame update of this node and its subtree.
    ///
    /// With `force` every visited node recomputes its world matrix. Children
    /// with [`WorldUpdate::Manual`] are only visited when their parent forces
    /// them.
    pub fn propagate_world_matrix(&self, force: bool) -> UpdateStats {
        let parent_world = self.parent().map(|parent| parent.world_matrix());
        let mut stats = UpdateStats::default();
        self.propagate(parent_world, force, &mut stats);
        stats
    }

    fn propagate(&self, parent_world: Option<Mat4>, force: bool, stats: &mut UpdateStats) {
        let (world, force) = {
            let mut d = self.inner.borrow_mut();
            stats.nodes_visited += 1;

            if d.matrix_auto_update {
                d.compute_local_matrix();
            }

            let mut force = force;
            if d.needs_world_update || force {
                d.write_world_matrix(parent_world.as_ref());
                d.needs_world_update = false;
                stats.world_updates += 1;
                force = true;
            }
            (d.world_matrix, force)
        };

        for child in self.inner.borrow().children.iter() {
            if force || child.world_update() == WorldUpdate::Auto {
                child.propagate(Some(world), force, stats);
            }
        }
    }

    /// Bring this node's world matrix up to date right now.
    ///
    /// * `update_parents` - first refresh every ancestor, root downward
    /// * `update_children` - afterwards refresh descendants that take part in
    ///   automatic world updates
    ///
    /// The pending-update flag is only cleared when descendants were refreshed
    /// as well, so the next frame still reaches children skipped here.
    pub fn update_world_transform(&self, update_parents: bool, update_children: bool) {
        let parent = self.parent();
        if update_parents {
            if let Some(parent) = &parent {
                parent.update_world_transform(true, false);
            }
        }

        let parent_world = parent.map(|parent| parent.world_matrix());
        {
            let mut d = self.inner.borrow_mut();
            if d.matrix_auto_update {
                d.compute_local_matrix();
            }
            d.write_world_matrix(parent_world.as_ref());
            if update_children {
                d.needs_world_update = false;
            }
        }

        if update_children {
            for child in self.inner.borrow().children.iter() {
                if child.world_update() == WorldUpdate::Auto {
                    child.update_world_transform(false, true);
                }
            }
        }
    }

    // World queries

    pub fn world_position(&self) -> Vec3 {
        self.update_world_transform(true, false);
        Vec3::from_matrix_position(&self.world_matrix())
    }

    pub fn world_quaternion(&self) -> Quat {
        self.update_world_transform(true, false);
        let (_, quaternion, _) = self.world_matrix().decompose();
        quaternion
    }

    pub fn world_scale(&self) -> Vec3 {
        self.update_world_transform(true, false);
        let (_, _, scale) = self.world_matrix().decompose();
        scale
    }

    /// Unit vector along the node's local +Z axis, in world space.
    pub fn world_direction(&self) -> Vec3 {
        self.update_world_transform(true, false);
        Vector3::new(0.0, 0.0, 1.0).transform_direction(&self.world_matrix())
    }

    /// Convert a point from this node's local space to world space.
    pub fn local_to_world(&self, point: Vec3) -> Vec3 {
        self.update_world_transform(true, false);
        point.apply_matrix4(&self.world_matrix())
    }

    /// Convert a world-space point into this node's local space.
    pub fn world_to_local(&self, point: Vec3) -> Vec3 {
        self.update_world_transform(true, false);
        point.apply_matrix4(&self.world_matrix().invert_or_zero())
    }
}
