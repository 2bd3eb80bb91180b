//! Application module
//!
//! Contains the main egui application, theme definitions, and UI state management.

pub mod editor_app;
pub mod theme;

pub use editor_app::EditorApp;
