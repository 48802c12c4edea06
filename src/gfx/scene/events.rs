//! Hierarchy notifications.
//!
//! Listeners registered with [`SceneNode::on`] are called after a hierarchy
//! change is complete. A listener receives the node it was registered on, so it
//! never needs to hold a handle to that node itself.

use super::node::SceneNode;

/// A change in a node's place in the hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeEvent {
    /// This node was added to the parent with the given id.
    Added { parent: u64 },
    /// This node was removed from the parent with the given id.
    Removed { parent: u64 },
    /// A child with the given id was added to this node.
    ChildAdded { child: u64 },
    /// A child with the given id was removed from this node.
    ChildRemoved { child: u64 },
}

pub(super) type Listener = Box<dyn FnMut(&SceneNode, &NodeEvent)>;

impl SceneNode {
    /// Register a listener for hierarchy events on this node.
    pub fn on(&self, listener: impl FnMut(&SceneNode, &NodeEvent) + 'static) {
        self.inner.borrow_mut().listeners.push(Box::new(listener));
    }

    /// Drop every listener on this node.
    ///
    /// Called from inside a listener, the remaining listeners still see the
    /// current event and none of them are kept afterwards.
    pub fn clear_listeners(&self) {
        let mut d = self.inner.borrow_mut();
        d.listeners.clear();
        d.listener_generation += 1;
    }

    pub(super) fn dispatch(&self, event: &NodeEvent) {
        // Listeners run without the node borrowed so they may touch the graph.
        let (mut listeners, generation) = {
            let mut d = self.inner.borrow_mut();
            (std::mem::take(&mut d.listeners), d.listener_generation)
        };
        if listeners.is_empty() {
            return;
        }

        log::trace!("node {}: dispatching {:?}", self.id(), event);
        for listener in listeners.iter_mut() {
            listener(self, event);
        }

        let mut d = self.inner.borrow_mut();
        if d.listener_generation != generation {
            return;
        }
        let registered_meanwhile = std::mem::replace(&mut d.listeners, listeners);
        d.listeners.extend(registered_meanwhile);
    }
}
