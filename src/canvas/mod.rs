//! Canvas module
//!
//! The viewport renderer and everything it is built from: the camera
//! transform, rounded-rect geometry, node box layout, and the fixed-rate
//! input sampler.

mod camera;
mod geometry;
mod input;
mod layout;
mod viewport;

pub use camera::{Camera, DEFAULT_ZOOM_MAX, DEFAULT_ZOOM_MIN};
pub use geometry::{rounded_rect_path, CornerRadii};
pub use input::{InputBindings, InputSampler, DEFAULT_PAN_SPEED, DEFAULT_TICK_RATE,
    DEFAULT_WHEEL_STEP};
pub use layout::{text_width, InputRow, NodeLayout, CORNER_RADIUS, FONT_SIZE, MARKER_SIZE};
pub use viewport::Viewport;
