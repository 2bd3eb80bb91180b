//! Nodes: positioned, styled entities with a kind-dependent parameter surface.
//!
//! A node owns one `BindingControl` per parameter discovered on its surface.
//! Assigning a new kind is tear-down-then-rebuild: every control from the
//! previous surface is released before the new ones are built, so no stale
//! binding survives a kind switch.

use std::collections::HashMap;

use log::debug;

use crate::engine::{EngineHandle, NodeFactory, NodeKind, ParameterSurface};
use crate::error::EditorError;
use crate::persistence::NodeSnapshot;
use crate::widgets::{BindingControl, ControlKind};

/// Unique identity of a node within a graph.
pub type NodeId = u64;

/// Name of the synthetic unnamed passthrough input every node carries.
pub const PASSTHROUGH_INPUT: &str = "audio in";

const DEFAULT_COLOR: &str = "#222255";
const DEFAULT_TEXT_COLOR: &str = "#9f9f9f";
const DEFAULT_NAME: &str = "Node";

/// Options for constructing a node.
#[derive(Clone, Debug, Default)]
pub struct NodeOptions {
    /// World-space position.
    pub x: f32,
    /// World-space position.
    pub y: f32,
    /// Engine kind to assign at creation. Requires a factory.
    pub kind: Option<NodeKind>,
    /// Background fill, `#rrggbb`.
    pub color: Option<String>,
    /// Label color, `#rrggbb`.
    pub text_color: Option<String>,
    /// Display label. Defaults to the kind's display name, then to "Node".
    pub name: Option<String>,
}

/// A node on the canvas.
#[derive(Debug)]
pub struct Node {
    id: NodeId,
    /// World-space position, origin-centered.
    pub x: f32,
    /// World-space position, origin-centered.
    pub y: f32,
    /// Display label, not unique.
    pub name: String,
    /// Background fill, `#rrggbb`.
    pub color: String,
    /// Label color, `#rrggbb`.
    pub text_color: String,
    kind: Option<NodeKind>,
    handle: Option<EngineHandle>,
    surface: Option<ParameterSurface>,
    controls: HashMap<String, BindingControl>,
}

impl Node {
    /// Creates a node without an engine kind. Use [`Node::assign_kind`] to
    /// give it a parameter surface.
    pub fn new(id: NodeId, options: NodeOptions) -> Self {
        let name = options
            .name
            .or_else(|| options.kind.map(|k| k.display_name().to_string()))
            .unwrap_or_else(|| DEFAULT_NAME.to_string());
        Self {
            id,
            x: options.x,
            y: options.y,
            name,
            color: options.color.unwrap_or_else(|| DEFAULT_COLOR.to_string()),
            text_color: options
                .text_color
                .unwrap_or_else(|| DEFAULT_TEXT_COLOR.to_string()),
            kind: None,
            handle: None,
            surface: None,
            controls: HashMap::new(),
        }
    }

    /// This node's identity within its graph.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The engine kind, once assigned.
    pub fn kind(&self) -> Option<NodeKind> {
        self.kind
    }

    /// The opaque engine-side handle, once a kind is assigned.
    pub fn handle(&self) -> Option<EngineHandle> {
        self.handle
    }

    /// True once a parameter surface exists, even if it is empty.
    pub fn has_parameters(&self) -> bool {
        self.surface.is_some()
    }

    /// Assigns an engine kind, replacing any previous parameter surface.
    ///
    /// The new surface is acquired from the factory first, so a factory
    /// failure (e.g. `UnsupportedKind`) leaves this node untouched. On
    /// success every existing control is released before one control per
    /// discovered parameter is built and bound.
    pub fn assign_kind(
        &mut self,
        kind: NodeKind,
        factory: &mut dyn NodeFactory,
    ) -> Result<(), EditorError> {
        let handle = factory.create_handle(kind)?;
        let surface = factory.introspect_parameters(handle)?;

        for control in self.controls.values_mut() {
            control.clear_influence();
        }
        self.controls.clear();

        for (name, param) in &surface {
            let mut control = BindingControl::new(name.clone(), ControlKind::Rotary);
            control.set_influence(param.clone(), name.clone());
            self.controls.insert(name.clone(), control);
        }

        debug!(
            "node {}: assigned kind {} with {} parameter(s)",
            self.id,
            kind.as_tag(),
            surface.len()
        );

        self.kind = Some(kind);
        self.handle = Some(handle);
        self.surface = Some(surface);
        Ok(())
    }

    /// Input names used for layout sizing: every parameter name plus the
    /// synthetic trailing passthrough entry. Not used for binding.
    pub fn input_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .surface
            .as_ref()
            .map(|surface| surface.keys().cloned().collect())
            .unwrap_or_default();
        names.push(PASSTHROUGH_INPUT.to_string());
        names
    }

    /// Looks up the control bound to a parameter.
    pub fn control(&self, name: &str) -> Option<&BindingControl> {
        self.controls.get(name)
    }

    /// Mutable lookup of the control bound to a parameter.
    pub fn control_mut(&mut self, name: &str) -> Option<&mut BindingControl> {
        self.controls.get_mut(name)
    }

    /// Iterates controls in surface (name) order.
    pub fn controls_mut(&mut self) -> impl Iterator<Item = &mut BindingControl> {
        let mut entries: Vec<(&String, &mut BindingControl)> = self.controls.iter_mut().collect();
        entries.sort_by(|(a, _), (b, _)| a.cmp(b));
        entries.into_iter().map(|(_, control)| control)
    }

    /// The parameter names currently bound to controls, sorted.
    pub fn control_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.controls.keys().cloned().collect();
        names.sort();
        names
    }

    /// Captures the plain snapshot record for this node.
    ///
    /// Live parameter bindings and connections are explicitly excluded.
    pub fn to_snapshot(&self) -> NodeSnapshot {
        NodeSnapshot {
            x: self.x,
            y: self.y,
            name: self.name.clone(),
            kind: self.kind,
            color: self.color.clone(),
            text_color: self.text_color.clone(),
        }
    }

    /// Rebuilds a node from a snapshot record.
    ///
    /// A node with a kind re-acquires its parameter surface from the factory
    /// before it is usable; factory failures propagate with no node produced.
    pub fn from_snapshot(
        id: NodeId,
        snapshot: &NodeSnapshot,
        factory: &mut dyn NodeFactory,
    ) -> Result<Self, EditorError> {
        let mut node = Node::new(
            id,
            NodeOptions {
                x: snapshot.x,
                y: snapshot.y,
                name: Some(snapshot.name.clone()),
                color: Some(snapshot.color.clone()),
                text_color: Some(snapshot.text_color.clone()),
                kind: None,
            },
        );
        if let Some(kind) = snapshot.kind {
            node.assign_kind(kind, factory)?;
        }
        Ok(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::PatchEngine;

    fn node_with_kind(kind: NodeKind, engine: &mut PatchEngine) -> Node {
        let mut node = Node::new(1, NodeOptions::default());
        node.assign_kind(kind, engine).unwrap();
        node
    }

    #[test]
    fn test_new_node_defaults() {
        let node = Node::new(7, NodeOptions::default());
        assert_eq!(node.id(), 7);
        assert_eq!(node.name, "Node");
        assert_eq!(node.color, "#222255");
        assert_eq!(node.text_color, "#9f9f9f");
        assert!(!node.has_parameters());
        assert!(node.kind().is_none());
    }

    #[test]
    fn test_name_defaults_to_kind_display_name() {
        let node = Node::new(
            1,
            NodeOptions {
                kind: Some(NodeKind::Oscillator),
                ..Default::default()
            },
        );
        assert_eq!(node.name, "Oscillator");
    }

    #[test]
    fn test_assign_kind_builds_one_control_per_parameter() {
        let mut engine = PatchEngine::new();
        let node = node_with_kind(NodeKind::Oscillator, &mut engine);

        assert!(node.has_parameters());
        assert_eq!(node.control_names(), vec!["detune", "frequency"]);

        let control = node.control("frequency").unwrap();
        assert!(control.is_bound());
        assert_eq!(control.value().unwrap(), 440.0);
        assert_eq!(control.label(), "frequency");
    }

    #[test]
    fn test_assign_kind_with_empty_surface() {
        let mut engine = PatchEngine::new();
        let node = node_with_kind(NodeKind::Destination, &mut engine);

        assert!(node.has_parameters());
        assert!(node.control_names().is_empty());
    }

    #[test]
    fn test_kind_switch_tears_down_stale_controls() {
        let mut engine = PatchEngine::new();
        let mut node = node_with_kind(NodeKind::BiquadFilter, &mut engine);
        assert_eq!(
            node.control_names(),
            vec!["detune", "frequency", "gain", "q"]
        );

        node.assign_kind(NodeKind::StereoPanner, &mut engine).unwrap();
        // Exactly the new surface's names remain, nothing residual.
        assert_eq!(node.control_names(), vec!["pan"]);
        assert_eq!(node.kind(), Some(NodeKind::StereoPanner));
    }

    #[test]
    fn test_failed_assign_leaves_node_untouched() {
        let mut engine = PatchEngine::new();
        let mut node = node_with_kind(NodeKind::Gain, &mut engine);
        let handle_before = node.handle();

        let err = node.assign_kind(NodeKind::Keyboard, &mut engine).unwrap_err();
        assert!(matches!(err, EditorError::UnsupportedKind(_)));

        assert_eq!(node.kind(), Some(NodeKind::Gain));
        assert_eq!(node.handle(), handle_before);
        assert_eq!(node.control_names(), vec!["gain"]);
        assert!(node.control("gain").unwrap().is_bound());
    }

    #[test]
    fn test_control_edits_reach_engine_surface() {
        let mut engine = PatchEngine::new();
        let mut node = node_with_kind(NodeKind::Gain, &mut engine);

        node.control_mut("gain")
            .unwrap()
            .set_value(3.0, crate::widgets::WriteThrough::Apply)
            .unwrap();

        let surface = engine.introspect_parameters(node.handle().unwrap()).unwrap();
        assert_eq!(surface["gain"].get(), 3.0);
    }

    #[test]
    fn test_input_names_append_passthrough() {
        let mut engine = PatchEngine::new();
        let node = node_with_kind(NodeKind::StereoPanner, &mut engine);
        assert_eq!(node.input_names(), vec!["pan", "audio in"]);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut engine = PatchEngine::new();
        let mut node = Node::new(
            3,
            NodeOptions {
                x: 200.0,
                y: 20.0,
                name: Some("Biquad".to_string()),
                ..Default::default()
            },
        );
        node.assign_kind(NodeKind::BiquadFilter, &mut engine).unwrap();

        let snapshot = node.to_snapshot();
        assert_eq!(snapshot.name, "Biquad");
        assert_eq!(snapshot.kind, Some(NodeKind::BiquadFilter));

        let restored = Node::from_snapshot(9, &snapshot, &mut engine).unwrap();
        assert_eq!(restored.id(), 9);
        assert_eq!(restored.x, 200.0);
        assert_eq!(restored.y, 20.0);
        assert_eq!(restored.name, "Biquad");
        // Usable again: the surface was re-acquired from the factory.
        assert!(restored.has_parameters());
        assert_eq!(
            restored.control_names(),
            vec!["detune", "frequency", "gain", "q"]
        );
    }

    #[test]
    fn test_snapshot_of_kindless_node_restores_without_surface() {
        let mut engine = PatchEngine::new();
        let node = Node::new(1, NodeOptions::default());
        let restored = Node::from_snapshot(2, &node.to_snapshot(), &mut engine).unwrap();
        assert!(!restored.has_parameters());
    }

    #[test]
    fn test_snapshot_excludes_live_bindings() {
        let mut engine = PatchEngine::new();
        let mut node = node_with_kind(NodeKind::Gain, &mut engine);
        node.control_mut("gain")
            .unwrap()
            .set_value(5.0, crate::widgets::WriteThrough::Apply)
            .unwrap();

        // Restoring yields the kind's defaults, not the live values.
        let restored = Node::from_snapshot(2, &node.to_snapshot(), &mut engine).unwrap();
        assert_eq!(restored.control("gain").unwrap().value().unwrap(), 1.0);
    }
}
