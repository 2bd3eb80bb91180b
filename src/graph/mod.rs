//! Graph module
//!
//! The node data model: positioned nodes with kind-dependent parameter
//! surfaces, and the collection that owns them plus the durable edge set.

#[allow(clippy::module_inception)]
mod graph;
mod node;

pub use graph::{Edge, Graph};
pub use node::{Node, NodeId, NodeOptions, PASSTHROUGH_INPUT};
