//! One exploration tree: node arena plus validated edges.

use crate::core::Pose2D;
use crate::world::{World, WorldError};

use super::edge::Edge;
use super::node::{Node, NodeId};

/// A growing search tree over free space.
///
/// Nodes live in an arena and are addressed by stable [`NodeId`]
/// handles; nothing is ever removed individually. The whole graph is
/// discarded as a unit via [`SearchGraph::clear`]. Obstacle knowledge
/// is delegated to a [`World`] passed into the connection primitives,
/// so a graph never outlives or shares a world borrow.
///
/// Invariants maintained across all operations:
/// - every non-root node has exactly one incident parent edge,
/// - the node set forms a tree rooted at a single root.
#[derive(Clone, Debug, Default)]
pub struct SearchGraph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl SearchGraph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard all nodes and edges.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }

    /// Insert a node, returning its handle.
    pub fn insert(&mut self, node: Node) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Get a node by handle.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Number of nodes in the graph.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over all node handles in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId::new)
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All validated edges.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Find the member node closest (linear distance) to `query`.
    ///
    /// Returns `None` only on an empty graph; the planner seeds a root
    /// before its first sampling iteration.
    pub fn nearest_node(&self, query: Pose2D) -> Option<NodeId> {
        self.ids().min_by(|&a, &b| {
            self.node(a)
                .pose
                .linear_distance(query)
                .partial_cmp(&self.node(b).pose.linear_distance(query))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    }

    /// Try to connect a candidate node to `parent`.
    ///
    /// Delegates to the world's path-collision predicate on the segment
    /// between the two poses. On success the candidate is inserted with
    /// its parent link set and the validated edge is recorded; the new
    /// handle is returned. On failure nothing is mutated.
    ///
    /// # Errors
    /// Propagates any failure of the world predicate.
    pub fn connect<W: World + ?Sized>(
        &mut self,
        world: &W,
        parent: NodeId,
        mut candidate: Node,
    ) -> Result<Option<NodeId>, WorldError> {
        if !world.is_path_collision_free(self.node(parent).pose, candidate.pose)? {
            return Ok(None);
        }
        candidate.parent = Some(parent);
        let id = self.insert(candidate);
        self.edges.push(Edge::new(parent, id));
        Ok(Some(id))
    }

    /// Evaluate whether two member nodes could be connected.
    ///
    /// Identical predicate to [`SearchGraph::connect`] but never mutates
    /// the edge set. Used to vet a candidate rewire parent without
    /// committing.
    pub fn check_connectivity<W: World + ?Sized>(
        &self,
        world: &W,
        a: NodeId,
        b: NodeId,
    ) -> Result<bool, WorldError> {
        world.is_path_collision_free(self.node(a).pose, self.node(b).pose)
    }

    /// Re-parent `id` onto `new_parent` with an updated cost.
    ///
    /// Removes every edge incident to `id` and records exactly one new
    /// edge to the new parent. Descendant costs are left untouched.
    pub fn reparent(&mut self, id: NodeId, new_parent: NodeId, new_cost: f32) {
        let node = &mut self.nodes[id.index()];
        node.parent = Some(new_parent);
        node.cost = new_cost;

        self.edges.retain(|e| !e.touches(id));
        self.edges.push(Edge::new(id, new_parent));
    }

    /// Walk parent links from `from` to the root.
    ///
    /// Returns the chain in walk order: `from` first, root last.
    pub fn path_to_root(&self, from: NodeId) -> Vec<NodeId> {
        let mut chain = vec![from];
        let mut curr = from;
        while let Some(parent) = self.node(curr).parent {
            chain.push(parent);
            curr = parent;
        }
        chain
    }
}
