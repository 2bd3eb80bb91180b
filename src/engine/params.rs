//! Parameter specs and handles for engine nodes.
//!
//! A `ParamSpec` describes one named numeric parameter of a node kind. The
//! engine materializes each spec into a `ParamHandle`: a cheaply clonable
//! shared cell that the UI's binding controls write through. The editor core
//! is single-threaded, so the cell needs no locking.

use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Definition of a single numeric parameter on a node kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParamSpec {
    /// Parameter name, unique within its node kind.
    pub name: &'static str,
    /// Value the parameter starts at when a handle is created.
    pub default: f32,
    /// Minimum accepted value.
    pub min: f32,
    /// Maximum accepted value.
    pub max: f32,
}

impl ParamSpec {
    /// Creates a new parameter spec.
    pub const fn new(name: &'static str, default: f32, min: f32, max: f32) -> Self {
        Self {
            name,
            default,
            min,
            max,
        }
    }

    /// Clamps a value into this parameter's valid range.
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }
}

/// A live, shareable numeric handle for one parameter of one engine node.
///
/// Clones share the same underlying slot: a control bound to a clone of a
/// handle observes writes made through any other clone. Values written
/// through the handle saturate into the spec's range.
#[derive(Clone, Debug)]
pub struct ParamHandle {
    spec: ParamSpec,
    slot: Rc<Cell<f32>>,
}

impl ParamHandle {
    /// Creates a handle holding the spec's default value.
    pub fn new(spec: ParamSpec) -> Self {
        Self {
            slot: Rc::new(Cell::new(spec.default)),
            spec,
        }
    }

    /// The spec this handle was created from.
    pub fn spec(&self) -> &ParamSpec {
        &self.spec
    }

    /// Reads the current value.
    pub fn get(&self) -> f32 {
        self.slot.get()
    }

    /// Writes a value, saturating into the spec's range.
    pub fn set(&self, value: f32) {
        self.slot.set(self.spec.clamp(value));
    }

    /// True if both handles refer to the same underlying slot.
    pub fn shares_slot(&self, other: &ParamHandle) -> bool {
        Rc::ptr_eq(&self.slot, &other.slot)
    }
}

/// The kind-dependent set of named parameter handles a node exposes.
///
/// Ordered map so layout iteration is deterministic.
pub type ParameterSurface = BTreeMap<String, ParamHandle>;

/// Builds a surface from a kind's parameter specs.
pub fn surface_from_specs(specs: &[ParamSpec]) -> ParameterSurface {
    specs
        .iter()
        .map(|spec| (spec.name.to_string(), ParamHandle::new(*spec)))
        .collect()
}
