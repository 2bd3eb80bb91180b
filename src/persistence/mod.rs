//! Persistence module
//!
//! Patch save/load functionality using serde and JSON.

pub mod snapshot;

pub use snapshot::{
    EdgeSnapshot, NodeEntry, NodeSnapshot, PatchSnapshot, PATCH_VERSION,
};

use std::fmt;

/// Error type for snapshot save/load operations.
#[derive(Debug)]
pub enum SnapshotError {
    /// File I/O error.
    IoError(std::io::Error),
    /// JSON serialization/deserialization error.
    SerializationError(serde_json::Error),
    /// Incompatible patch version.
    IncompatibleVersion { found: u32, expected: u32 },
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IoError(e) => write!(f, "File error: {}", e),
            Self::SerializationError(e) => write!(f, "Serialization error: {}", e),
            Self::IncompatibleVersion { found, expected } => {
                write!(
                    f,
                    "Incompatible patch version: found {}, expected <= {}",
                    found, expected
                )
            }
        }
    }
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::IoError(e) => Some(e),
            Self::SerializationError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SnapshotError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError(err)
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err)
    }
}

/// Save a patch to a JSON file.
pub fn save_to_file(patch: &PatchSnapshot, path: &std::path::Path) -> Result<(), SnapshotError> {
    let json = serde_json::to_string_pretty(patch)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Load a patch from a JSON file.
pub fn load_from_file(path: &std::path::Path) -> Result<PatchSnapshot, SnapshotError> {
    let json = std::fs::read_to_string(path)?;
    let patch: PatchSnapshot = serde_json::from_str(&json)?;

    // Version check
    if !patch.is_compatible() {
        return Err(SnapshotError::IncompatibleVersion {
            found: patch.version,
            expected: PATCH_VERSION,
        });
    }

    Ok(patch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{NodeKind, PatchEngine};
    use crate::graph::{Graph, Node, NodeOptions};

    fn sample_graph(engine: &mut PatchEngine) -> Graph {
        let mut graph = Graph::new();

        let osc_id = graph.allocate_id();
        let mut osc = Node::new(
            osc_id,
            NodeOptions {
                x: 200.0,
                y: 20.0,
                name: Some("Osc".to_string()),
                ..Default::default()
            },
        );
        osc.assign_kind(NodeKind::Oscillator, engine).unwrap();
        graph.add_node(osc).unwrap();

        let out_id = graph.allocate_id();
        let mut out = Node::new(
            out_id,
            NodeOptions {
                x: -20.0,
                y: -20.0,
                name: Some("Out".to_string()),
                ..Default::default()
            },
        );
        out.assign_kind(NodeKind::Destination, engine).unwrap();
        graph.add_node(out).unwrap();

        graph.connect(osc_id, out_id, engine).unwrap();
        graph
    }

    #[test]
    fn test_patch_creation() {
        let patch = PatchSnapshot::new("Test Patch");
        assert_eq!(patch.name, "Test Patch");
        assert_eq!(patch.version, PATCH_VERSION);
        assert!(patch.nodes.is_empty());
        assert!(patch.edges.is_empty());
    }

    #[test]
    fn test_capture_records_nodes_and_edges() {
        let mut engine = PatchEngine::new();
        let graph = sample_graph(&mut engine);

        let patch = PatchSnapshot::capture("My Patch", &graph);
        assert_eq!(patch.nodes.len(), 2);
        assert_eq!(patch.edges.len(), 1);
        assert_eq!(patch.nodes[0].node.name, "Osc");
        assert_eq!(patch.nodes[0].node.kind, Some(NodeKind::Oscillator));
    }

    #[test]
    fn test_snapshot_json_field_names() {
        let mut engine = PatchEngine::new();
        let graph = sample_graph(&mut engine);
        let patch = PatchSnapshot::capture("Named", &graph);

        let json = serde_json::to_string(&patch).unwrap();
        assert!(json.contains("\"textColor\""));
        assert!(json.contains("\"kind\":\"oscillator\""));
        assert!(json.contains("\"name\":\"Osc\""));
    }

    #[test]
    fn test_serialization_round_trip() {
        let mut engine = PatchEngine::new();
        let graph = sample_graph(&mut engine);
        let patch = PatchSnapshot::capture("Round", &graph);

        let json = serde_json::to_string(&patch).unwrap();
        let loaded: PatchSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded.name, "Round");
        assert_eq!(loaded.nodes.len(), 2);
        assert_eq!(loaded.edges, patch.edges);
        assert_eq!(loaded.nodes[0].node, patch.nodes[0].node);
    }

    #[test]
    fn test_restore_reacquires_surfaces_and_edges() {
        let mut engine = PatchEngine::new();
        let graph = sample_graph(&mut engine);
        let patch = PatchSnapshot::capture("Restore", &graph);

        let mut fresh_engine = PatchEngine::new();
        let restored = patch.restore(&mut fresh_engine).unwrap();

        assert_eq!(restored.len(), 2);
        let osc = restored.node(patch.nodes[0].id).unwrap();
        assert!(osc.has_parameters());
        assert_eq!(osc.control_names(), vec!["detune", "frequency"]);
        assert_eq!((osc.x, osc.y), (200.0, 20.0));

        assert_eq!(restored.edges().len(), 1);
        assert_eq!(fresh_engine.connection_count(), 1);
    }

    #[test]
    fn test_version_compatibility() {
        let patch = PatchSnapshot::new("Test");
        assert!(patch.is_compatible());

        let future = PatchSnapshot {
            version: PATCH_VERSION + 1,
            ..PatchSnapshot::new("Future")
        };
        assert!(!future.is_compatible());
    }

    #[test]
    fn test_load_rejects_future_version() {
        let future = PatchSnapshot {
            version: PATCH_VERSION + 1,
            ..PatchSnapshot::new("Future")
        };
        let json = serde_json::to_string(&future).unwrap();

        let dir = std::env::temp_dir().join("patchbay_test_load_version");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("future.json");
        std::fs::write(&path, json).unwrap();

        let err = load_from_file(&path).unwrap_err();
        assert!(matches!(err, SnapshotError::IncompatibleVersion { .. }));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_save_then_load_file() {
        let mut engine = PatchEngine::new();
        let graph = sample_graph(&mut engine);
        let patch = PatchSnapshot::capture("Disk", &graph);

        let dir = std::env::temp_dir().join("patchbay_test_save_load");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("patch.json");

        save_to_file(&patch, &path).unwrap();
        let loaded = load_from_file(&path).unwrap();
        assert_eq!(loaded.name, "Disk");
        assert_eq!(loaded.nodes.len(), 2);
        std::fs::remove_file(&path).ok();
    }
}
