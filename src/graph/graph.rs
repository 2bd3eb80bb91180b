//! The node collection and its durable edge set.
//!
//! Nodes are kept in insertion order, and the draw pass paints in that
//! order; "topmost" therefore always means last-inserted. Connections are
//! first-class edges owned by the graph: `connect`/`disconnect` mutate the
//! edge set and treat the factory call as the side effect of a successful
//! mutation, rolling back if the factory refuses.

use log::debug;

use crate::engine::NodeFactory;
use crate::error::EditorError;

use super::node::{Node, NodeId};

/// A directed connection between two nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
    /// Node whose output feeds the connection.
    pub source: NodeId,
    /// Node whose input receives it.
    pub dest: NodeId,
}

/// Insertion-ordered collection of nodes plus the edges between them.
#[derive(Default)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    next_id: NodeId,
}

impl Graph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates an identity for a node about to be added.
    pub fn allocate_id(&mut self) -> NodeId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// True if a node with this id is present.
    pub fn has_node(&self, id: NodeId) -> bool {
        self.nodes.iter().any(|node| node.id() == id)
    }

    /// Looks up a node by id.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id() == id)
    }

    /// Mutable lookup of a node by id.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|node| node.id() == id)
    }

    /// Nodes in insertion order (the committed draw order).
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Mutable iteration over nodes in insertion order.
    pub fn nodes_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.nodes.iter_mut()
    }

    /// Adds a node.
    ///
    /// Adding a node whose id is already present is a contract violation and
    /// fails with `DuplicateEntity`, leaving the graph unchanged.
    pub fn add_node(&mut self, node: Node) -> Result<(), EditorError> {
        if self.has_node(node.id()) {
            return Err(EditorError::DuplicateEntity(format!("node {}", node.id())));
        }
        self.next_id = self.next_id.max(node.id() + 1);
        debug!("graph: added node {} ({})", node.id(), node.name);
        self.nodes.push(node);
        Ok(())
    }

    /// Removes a node, disconnecting its edges through the factory first.
    ///
    /// Removing an absent node fails with `UnknownEntity`.
    pub fn remove_node(
        &mut self,
        id: NodeId,
        factory: &mut dyn NodeFactory,
    ) -> Result<Node, EditorError> {
        let index = self
            .nodes
            .iter()
            .position(|node| node.id() == id)
            .ok_or_else(|| EditorError::UnknownEntity(format!("node {}", id)))?;

        let incident: Vec<Edge> = self
            .edges
            .iter()
            .copied()
            .filter(|edge| edge.source == id || edge.dest == id)
            .collect();
        for edge in &incident {
            self.disconnect(edge.source, edge.dest, factory)?;
        }

        debug!("graph: removed node {}", id);
        Ok(self.nodes.remove(index))
    }

    /// Edges in creation order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// True if `source -> dest` is recorded.
    pub fn is_connected(&self, source: NodeId, dest: NodeId) -> bool {
        self.edges.contains(&Edge { source, dest })
    }

    /// Connects two nodes.
    ///
    /// Records the edge, then asks the factory to establish the engine-side
    /// connection; a factory failure rolls the edge back so graph and engine
    /// never disagree. Both nodes must exist (`UnknownEntity`) and carry an
    /// engine kind (`MissingPrerequisite`); a duplicate edge is
    /// `DuplicateEntity`.
    pub fn connect(
        &mut self,
        source: NodeId,
        dest: NodeId,
        factory: &mut dyn NodeFactory,
    ) -> Result<(), EditorError> {
        let src_handle = self
            .node(source)
            .ok_or_else(|| EditorError::UnknownEntity(format!("node {}", source)))?
            .handle()
            .ok_or_else(|| {
                EditorError::MissingPrerequisite(format!("node {} has no engine kind", source))
            })?;
        let dst_handle = self
            .node(dest)
            .ok_or_else(|| EditorError::UnknownEntity(format!("node {}", dest)))?
            .handle()
            .ok_or_else(|| {
                EditorError::MissingPrerequisite(format!("node {} has no engine kind", dest))
            })?;
        if self.is_connected(source, dest) {
            return Err(EditorError::DuplicateEntity(format!(
                "edge {} -> {}",
                source, dest
            )));
        }

        self.edges.push(Edge { source, dest });
        if let Err(err) = factory.connect(src_handle, dst_handle) {
            self.edges.pop();
            return Err(err);
        }
        debug!("graph: connected {} -> {}", source, dest);
        Ok(())
    }

    /// Removes a connection, mirroring the removal into the factory.
    ///
    /// An absent edge fails with `UnknownEntity`; a factory failure restores
    /// the edge.
    pub fn disconnect(
        &mut self,
        source: NodeId,
        dest: NodeId,
        factory: &mut dyn NodeFactory,
    ) -> Result<(), EditorError> {
        let index = self
            .edges
            .iter()
            .position(|edge| edge.source == source && edge.dest == dest)
            .ok_or_else(|| {
                EditorError::UnknownEntity(format!("edge {} -> {}", source, dest))
            })?;

        // Handles must exist: the edge could only have been recorded between
        // nodes that carried them.
        let src_handle = self.node(source).and_then(Node::handle);
        let dst_handle = self.node(dest).and_then(Node::handle);
        let (Some(src_handle), Some(dst_handle)) = (src_handle, dst_handle) else {
            return Err(EditorError::UnknownEntity(format!(
                "engine handles for edge {} -> {}",
                source, dest
            )));
        };

        let removed = self.edges.remove(index);
        if let Err(err) = factory.disconnect(src_handle, dst_handle) {
            self.edges.insert(index, removed);
            return Err(err);
        }
        debug!("graph: disconnected {} -> {}", source, dest);
        Ok(())
    }
}
