//! Widgets module
//!
//! Custom UI controls for the editor: the retargetable parameter binding
//! control and the rotary knob it renders with.

mod binding;
mod knob;

pub use binding::{BindingControl, ControlKind, WriteThrough};
pub use knob::Knob;
