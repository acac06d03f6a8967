//! Spanning-tree vertex and its arena handle.

use crate::core::Pose2D;

/// Stable handle to a node inside one tree's arena.
///
/// Handles define node identity: two nodes carrying numerically equal
/// poses are still distinct entities with distinct handles. Handles are
/// only meaningful within the arena that issued them and are never
/// shared across trees.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    #[inline]
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Arena index backing this handle.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A vertex of one search tree.
///
/// `cost` is the sum of edge lengths from the tree root to this node.
/// Only the root has no parent.
#[derive(Clone, Debug)]
pub struct Node {
    /// Configuration this node represents.
    pub pose: Pose2D,
    /// Parent within the same tree, `None` only for a root.
    pub parent: Option<NodeId>,
    /// Cumulative path length from the root, in meters.
    pub cost: f32,
}

impl Node {
    /// Create a tree root at the given pose (no parent, zero cost).
    #[inline]
    pub fn root(pose: Pose2D) -> Self {
        Self {
            pose,
            parent: None,
            cost: 0.0,
        }
    }

    /// Create a candidate node parented to an existing node.
    #[inline]
    pub fn child(pose: Pose2D, parent: NodeId, cost: f32) -> Self {
        Self {
            pose,
            parent: Some(parent),
            cost,
        }
    }

    /// Check whether this node is a tree root.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}
