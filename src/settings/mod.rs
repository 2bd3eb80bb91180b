//! Settings module
//!
//! A flat collection of named, typed, independently gettable/settable
//! options, rendered as one row per option in the settings panel.

mod option;
mod registry;

pub use option::{OptionKind, OptionValue, SettingsOption};
pub use registry::SettingsRegistry;
