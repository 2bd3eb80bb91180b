//! The node factory seam and its in-process implementation.
//!
//! The editor never touches signal processing directly; it asks a
//! `NodeFactory` for opaque handles, introspects their parameter surfaces,
//! and delegates connection side effects to it. `PatchEngine` is the
//! in-process stand-in used by the application and the tests.

use std::collections::HashMap;

use log::debug;

use crate::error::EditorError;

use super::kind::NodeKind;
use super::params::{surface_from_specs, ParameterSurface};

/// Opaque identity of a node inside the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EngineHandle(u64);

/// The capability the external signal engine exposes to the editor.
pub trait NodeFactory {
    /// Creates an engine node of the given kind and returns its handle.
    ///
    /// Fails with `UnsupportedKind` for kinds the engine does not implement.
    fn create_handle(&mut self, kind: NodeKind) -> Result<EngineHandle, EditorError>;

    /// Returns the named parameter handles of an engine node.
    ///
    /// The returned set varies by kind and may be empty. Handles share state
    /// with the engine: writes through them are visible on the next read.
    fn introspect_parameters(&self, handle: EngineHandle)
        -> Result<ParameterSurface, EditorError>;

    /// Connects the output of `src` to the input of `dst`.
    fn connect(&mut self, src: EngineHandle, dst: EngineHandle) -> Result<(), EditorError>;

    /// Removes a previously established connection.
    fn disconnect(&mut self, src: EngineHandle, dst: EngineHandle) -> Result<(), EditorError>;
}

struct EngineNode {
    kind: NodeKind,
    surface: ParameterSurface,
}

/// In-process engine: allocates handles, owns parameter cells, records
/// connections.
#[derive(Default)]
pub struct PatchEngine {
    next_handle: u64,
    nodes: HashMap<EngineHandle, EngineNode>,
    connections: Vec<(EngineHandle, EngineHandle)>,
}

impl PatchEngine {
    /// Creates an empty engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// The kind a handle was created as, if the handle is known.
    pub fn kind_of(&self, handle: EngineHandle) -> Option<NodeKind> {
        self.nodes.get(&handle).map(|n| n.kind)
    }

    /// Number of live engine-side connections.
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// True if `src -> dst` is currently connected in the engine.
    pub fn is_connected(&self, src: EngineHandle, dst: EngineHandle) -> bool {
        self.connections.contains(&(src, dst))
    }

    fn require(&self, handle: EngineHandle) -> Result<&EngineNode, EditorError> {
        self.nodes
            .get(&handle)
            .ok_or_else(|| EditorError::UnknownEntity(format!("engine handle {:?}", handle)))
    }
}

impl NodeFactory for PatchEngine {
    fn create_handle(&mut self, kind: NodeKind) -> Result<EngineHandle, EditorError> {
        if kind == NodeKind::Keyboard {
            return Err(EditorError::UnsupportedKind(kind.as_tag().to_string()));
        }
        let handle = EngineHandle(self.next_handle);
        self.next_handle += 1;
        let surface = surface_from_specs(kind.param_specs());
        self.nodes.insert(handle, EngineNode { kind, surface });
        debug!("engine: created {} as {:?}", kind.as_tag(), handle);
        Ok(handle)
    }

    fn introspect_parameters(
        &self,
        handle: EngineHandle,
    ) -> Result<ParameterSurface, EditorError> {
        // Clones share slots with the engine-owned handles.
        Ok(self.require(handle)?.surface.clone())
    }

    fn connect(&mut self, src: EngineHandle, dst: EngineHandle) -> Result<(), EditorError> {
        self.require(src)?;
        self.require(dst)?;
        if self.connections.contains(&(src, dst)) {
            return Err(EditorError::DuplicateEntity(format!(
                "engine connection {:?} -> {:?}",
                src, dst
            )));
        }
        self.connections.push((src, dst));
        debug!("engine: connected {:?} -> {:?}", src, dst);
        Ok(())
    }

    fn disconnect(&mut self, src: EngineHandle, dst: EngineHandle) -> Result<(), EditorError> {
        let index = self
            .connections
            .iter()
            .position(|&edge| edge == (src, dst))
            .ok_or_else(|| {
                EditorError::UnknownEntity(format!("engine connection {:?} -> {:?}", src, dst))
            })?;
        self.connections.remove(index);
        debug!("engine: disconnected {:?} -> {:?}", src, dst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_handle_allocates_unique_handles() {
        let mut engine = PatchEngine::new();
        let a = engine.create_handle(NodeKind::Gain).unwrap();
        let b = engine.create_handle(NodeKind::Gain).unwrap();
        assert_ne!(a, b);
        assert_eq!(engine.kind_of(a), Some(NodeKind::Gain));
    }

    #[test]
    fn test_keyboard_kind_is_unsupported() {
        let mut engine = PatchEngine::new();
        let err = engine.create_handle(NodeKind::Keyboard).unwrap_err();
        assert!(matches!(err, EditorError::UnsupportedKind(_)));
    }

    #[test]
    fn test_introspection_matches_kind_specs() {
        let mut engine = PatchEngine::new();
        let handle = engine.create_handle(NodeKind::BiquadFilter).unwrap();
        let surface = engine.introspect_parameters(handle).unwrap();
        let names: Vec<&str> = surface.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["detune", "frequency", "gain", "q"]);
        assert_eq!(surface["frequency"].get(), 350.0);
    }

    #[test]
    fn test_introspection_of_paramless_kind_is_empty() {
        let mut engine = PatchEngine::new();
        let handle = engine.create_handle(NodeKind::Destination).unwrap();
        assert!(engine.introspect_parameters(handle).unwrap().is_empty());
    }

    #[test]
    fn test_introspected_handles_share_engine_state() {
        let mut engine = PatchEngine::new();
        let handle = engine.create_handle(NodeKind::Oscillator).unwrap();

        let first = engine.introspect_parameters(handle).unwrap();
        first["frequency"].set(880.0);

        let second = engine.introspect_parameters(handle).unwrap();
        assert_eq!(second["frequency"].get(), 880.0);
    }

    #[test]
    fn test_introspect_unknown_handle_fails() {
        let engine = PatchEngine::new();
        let stale = EngineHandle(99);
        assert!(matches!(
            engine.introspect_parameters(stale),
            Err(EditorError::UnknownEntity(_))
        ));
    }

    #[test]
    fn test_connect_and_disconnect() {
        let mut engine = PatchEngine::new();
        let osc = engine.create_handle(NodeKind::Oscillator).unwrap();
        let out = engine.create_handle(NodeKind::Destination).unwrap();

        engine.connect(osc, out).unwrap();
        assert!(engine.is_connected(osc, out));
        assert_eq!(engine.connection_count(), 1);

        engine.disconnect(osc, out).unwrap();
        assert!(!engine.is_connected(osc, out));
        assert_eq!(engine.connection_count(), 0);
    }

    #[test]
    fn test_duplicate_connect_fails() {
        let mut engine = PatchEngine::new();
        let osc = engine.create_handle(NodeKind::Oscillator).unwrap();
        let out = engine.create_handle(NodeKind::Destination).unwrap();

        engine.connect(osc, out).unwrap();
        let err = engine.connect(osc, out).unwrap_err();
        assert!(matches!(err, EditorError::DuplicateEntity(_)));
        assert_eq!(engine.connection_count(), 1);
    }

    #[test]
    fn test_disconnect_absent_edge_fails() {
        let mut engine = PatchEngine::new();
        let osc = engine.create_handle(NodeKind::Oscillator).unwrap();
        let out = engine.create_handle(NodeKind::Destination).unwrap();
        assert!(matches!(
            engine.disconnect(osc, out),
            Err(EditorError::UnknownEntity(_))
        ));
    }
}
