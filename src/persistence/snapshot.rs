//! Snapshot records for nodes and whole patches.
//!
//! A node snapshot is a plain record of position, label, kind, and colors.
//! Live parameter bindings and connections are explicitly excluded: a node
//! rebuilt from a snapshot must re-acquire its parameter surface from the
//! factory before it is usable. A patch snapshot bundles every node (with
//! its graph id) and the durable edge set.

use serde::{Deserialize, Serialize};

use crate::engine::{NodeFactory, NodeKind};
use crate::error::EditorError;
use crate::graph::{Graph, Node, NodeId};

/// Current patch format version.
/// Increment this when making breaking changes to the format.
pub const PATCH_VERSION: u32 = 1;

/// The serialized form of one node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    /// World-space position.
    pub x: f32,
    /// World-space position.
    pub y: f32,
    /// Display label.
    pub name: String,
    /// Engine kind tag; absent for nodes that never got one.
    pub kind: Option<NodeKind>,
    /// Background fill, `#rrggbb`.
    pub color: String,
    /// Label color, `#rrggbb`.
    #[serde(rename = "textColor")]
    pub text_color: String,
}

/// One node entry in a patch: its graph id plus its snapshot record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeEntry {
    /// Graph identity, referenced by edges.
    pub id: NodeId,
    /// The node record.
    #[serde(flatten)]
    pub node: NodeSnapshot,
}

/// A serialized edge between two node ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeSnapshot {
    /// Source node id.
    pub source: NodeId,
    /// Destination node id.
    pub dest: NodeId,
}

/// A complete serialized patch: nodes and edges.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatchSnapshot {
    /// Human-readable name for the patch.
    pub name: String,
    /// Patch format version for forward compatibility.
    pub version: u32,
    /// All nodes with their graph ids.
    pub nodes: Vec<NodeEntry>,
    /// The durable edge set.
    pub edges: Vec<EdgeSnapshot>,
}

impl PatchSnapshot {
    /// Creates a new empty patch with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: PATCH_VERSION,
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Check if this patch version is compatible with the current format.
    pub fn is_compatible(&self) -> bool {
        self.version <= PATCH_VERSION
    }

    /// Captures a graph into a patch snapshot.
    pub fn capture(name: impl Into<String>, graph: &Graph) -> Self {
        Self {
            name: name.into(),
            version: PATCH_VERSION,
            nodes: graph
                .nodes()
                .iter()
                .map(|node| NodeEntry {
                    id: node.id(),
                    node: node.to_snapshot(),
                })
                .collect(),
            edges: graph
                .edges()
                .iter()
                .map(|edge| EdgeSnapshot {
                    source: edge.source,
                    dest: edge.dest,
                })
                .collect(),
        }
    }

    /// Rebuilds a graph from this patch.
    ///
    /// Every node with a kind re-acquires its parameter surface from the
    /// factory, and the edges are replayed through `Graph::connect` so the
    /// engine-side connections are re-established as well.
    pub fn restore(&self, factory: &mut dyn NodeFactory) -> Result<Graph, EditorError> {
        let mut graph = Graph::new();
        for entry in &self.nodes {
            let node = Node::from_snapshot(entry.id, &entry.node, factory)?;
            graph.add_node(node)?;
        }
        for edge in &self.edges {
            graph.connect(edge.source, edge.dest, factory)?;
        }
        Ok(graph)
    }
}
