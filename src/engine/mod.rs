//! Engine module
//!
//! The external signal-engine boundary: node kinds, parameter handles, and
//! the `NodeFactory` seam with its in-process `PatchEngine` implementation.

mod factory;
mod kind;
mod params;

pub use factory::{EngineHandle, NodeFactory, PatchEngine};
pub use kind::NodeKind;
pub use params::{surface_from_specs, ParamHandle, ParamSpec, ParameterSurface};
