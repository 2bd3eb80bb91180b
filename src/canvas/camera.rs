//! The pan+zoom transform between world space and screen space.
//!
//! Forward projection runs center-translate, zoom scale, pan translate in
//! that order; points closer to the pan origin appear larger as zoom
//! decreases (zoom < 1 magnifies). Hit-testing inverts the same steps in
//! exactly the reverse order, so the two must never diverge.

use egui::{Pos2, Vec2};

/// Default lower zoom bound.
pub const DEFAULT_ZOOM_MIN: f32 = 0.1;
/// Default upper zoom bound.
pub const DEFAULT_ZOOM_MAX: f32 = 10.0;

/// World-space offset of the viewport center plus a clamped zoom factor.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pan: Vec2,
    zoom: f32,
    zoom_min: f32,
    zoom_max: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            pan: Vec2::ZERO,
            zoom: 1.0,
            zoom_min: DEFAULT_ZOOM_MIN,
            zoom_max: DEFAULT_ZOOM_MAX,
        }
    }
}

impl Camera {
    /// Creates a camera at the origin with zoom 1 and default bounds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current pan offset (world space).
    pub fn pan(&self) -> Vec2 {
        self.pan
    }

    /// Current zoom factor.
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// The zoom bounds as (min, max).
    pub fn zoom_bounds(&self) -> (f32, f32) {
        (self.zoom_min, self.zoom_max)
    }

    /// Sets the zoom, silently saturating into the bounds.
    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.clamp(self.zoom_min, self.zoom_max);
    }

    /// Adds to the zoom, silently saturating into the bounds.
    pub fn add_zoom(&mut self, delta: f32) {
        self.set_zoom(self.zoom + delta);
    }

    /// Adds to the pan offset directly. Callers pre-scale by zoom when the
    /// movement should feel zoom-invariant.
    pub fn move_by(&mut self, dx: f32, dy: f32) {
        self.pan += Vec2::new(dx, dy);
    }

    /// Projects a world-space point into viewport-local screen space.
    pub fn world_to_screen(&self, world: Pos2, viewport: Vec2) -> Pos2 {
        let center = viewport * 0.5;
        Pos2::new(
            center.x + (world.x + self.pan.x) / self.zoom,
            center.y + (world.y + self.pan.y) / self.zoom,
        )
    }

    /// Inverts the projection: undo the center translate, then the zoom
    /// scale, then the pan translate.
    pub fn screen_to_world(&self, screen: Pos2, viewport: Vec2) -> Pos2 {
        let center = viewport * 0.5;
        Pos2::new(
            (screen.x - center.x) * self.zoom - self.pan.x,
            (screen.y - center.y) * self.zoom - self.pan.y,
        )
    }
}
