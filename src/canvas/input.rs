//! Fixed-rate input sampling.
//!
//! Pointer and key input is not applied as it arrives: deltas accumulate
//! between ticks and a tick (default 30 Hz) applies them all at once. The
//! per-tick order is a fairness contract, not an accident:
//!
//!   1. wheel-delta zoom,
//!   2. discrete key-based zoom,
//!   3. pan, or node drag when a node is the captured drag target.
//!
//! The drag target is captured once when the primary pointer goes down over
//! a node and cleared only on release, so fast movement never flickers the
//! selection onto the camera.

use std::time::{Duration, Instant};

use egui::{Key, Vec2};
use log::debug;

use crate::graph::NodeId;

use super::viewport::Viewport;

/// Default input sampling rate in ticks per second.
pub const DEFAULT_TICK_RATE: f32 = 30.0;
/// Default pan/drag speed multiplier.
pub const DEFAULT_PAN_SPEED: f32 = 1.8;
/// Default zoom step per wheel unit, as a fraction of the current zoom.
pub const DEFAULT_WHEEL_STEP: f32 = 0.1;
/// Default zoom step per key press, as a fraction of the current zoom.
pub const DEFAULT_KEY_ZOOM_STEP: f32 = 0.25;

/// Named key bindings for the discrete zoom controls.
#[derive(Clone, Copy, Debug)]
pub struct InputBindings {
    /// Zoom in (magnify).
    pub zoom_in: Key,
    /// Zoom out.
    pub zoom_out: Key,
}

impl Default for InputBindings {
    fn default() -> Self {
        Self {
            zoom_in: Key::Plus,
            zoom_out: Key::Minus,
        }
    }
}

/// Accumulates raw input between ticks and applies it at a fixed rate.
pub struct InputSampler {
    tick_interval: Duration,
    last_tick: Option<Instant>,
    bindings: InputBindings,

    pan_speed: f32,
    wheel_step: f32,
    key_zoom_step: f32,

    wheel_delta: f32,
    movement: Vec2,
    pointer_down: bool,
    zoom_in_presses: u32,
    zoom_out_presses: u32,
    drag_target: Option<NodeId>,
}

impl Default for InputSampler {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_RATE)
    }
}

impl InputSampler {
    /// Creates a sampler ticking at `rate` ticks per second.
    pub fn new(rate: f32) -> Self {
        Self {
            tick_interval: Self::interval_for(rate),
            last_tick: None,
            bindings: InputBindings::default(),
            pan_speed: DEFAULT_PAN_SPEED,
            wheel_step: DEFAULT_WHEEL_STEP,
            key_zoom_step: DEFAULT_KEY_ZOOM_STEP,
            wheel_delta: 0.0,
            movement: Vec2::ZERO,
            pointer_down: false,
            zoom_in_presses: 0,
            zoom_out_presses: 0,
            drag_target: None,
        }
    }

    fn interval_for(rate: f32) -> Duration {
        Duration::from_secs_f32(1.0 / rate.max(1.0))
    }

    /// The key bindings consulted by [`InputSampler::note_key_press`].
    pub fn bindings(&self) -> InputBindings {
        self.bindings
    }

    /// Changes the sampling rate, in ticks per second.
    pub fn set_tick_rate(&mut self, rate: f32) {
        self.tick_interval = Self::interval_for(rate);
    }

    /// Changes the pan/drag speed multiplier.
    pub fn set_pan_speed(&mut self, speed: f32) {
        self.pan_speed = speed;
    }

    /// Changes the wheel zoom step.
    pub fn set_wheel_step(&mut self, step: f32) {
        self.wheel_step = step;
    }

    /// The sticky drag target, if a drag is in progress over a node.
    pub fn drag_target(&self) -> Option<NodeId> {
        self.drag_target
    }

    /// Accumulates vertical wheel movement.
    pub fn note_wheel(&mut self, delta_y: f32) {
        self.wheel_delta += delta_y;
    }

    /// Accumulates pointer movement while the primary button is held.
    pub fn note_movement(&mut self, delta: Vec2) {
        if self.pointer_down {
            self.movement += delta;
        }
    }

    /// Records a press of a bound key.
    pub fn note_key_press(&mut self, key: Key) {
        if key == self.bindings.zoom_in {
            self.zoom_in_presses += 1;
        } else if key == self.bindings.zoom_out {
            self.zoom_out_presses += 1;
        }
    }

    /// The primary pointer went down. `over_node` is the hit-test result at
    /// the press position; it becomes the sticky drag target.
    pub fn pointer_pressed(&mut self, over_node: Option<NodeId>) {
        self.pointer_down = true;
        self.drag_target = over_node;
        if let Some(id) = over_node {
            debug!("input: drag captured node {}", id);
        }
    }

    /// The primary pointer was released; the drag target is cleared.
    pub fn pointer_released(&mut self) {
        self.pointer_down = false;
        self.drag_target = None;
    }

    /// True when the next tick is due. The first call always fires.
    pub fn tick_due(&mut self, now: Instant) -> bool {
        match self.last_tick {
            Some(prev) if now.duration_since(prev) < self.tick_interval => false,
            _ => {
                self.last_tick = Some(now);
                true
            }
        }
    }

    /// Applies everything accumulated since the previous tick.
    pub fn apply_tick(&mut self, viewport: &mut Viewport) {
        let wheel = std::mem::take(&mut self.wheel_delta);
        let zoom_in = std::mem::take(&mut self.zoom_in_presses);
        let zoom_out = std::mem::take(&mut self.zoom_out_presses);
        let movement = std::mem::take(&mut self.movement);

        // 1. Wheel zoom, proportional to the current zoom.
        if wheel != 0.0 {
            viewport.add_zoom(wheel * self.wheel_step * viewport.zoom());
        }

        // 2. Discrete key zoom. Zooming in shrinks the zoom factor.
        for _ in 0..zoom_in {
            viewport.add_zoom(-self.key_zoom_step * viewport.zoom());
        }
        for _ in 0..zoom_out {
            viewport.add_zoom(self.key_zoom_step * viewport.zoom());
        }

        // 3. Drag the captured node, or pan. Pre-scaled by zoom so both feel
        // zoom-invariant on screen.
        if movement != Vec2::ZERO && self.pointer_down {
            let scaled = movement * self.pan_speed * viewport.zoom();
            let target = self.drag_target.filter(|id| viewport.graph().has_node(*id));
            match target {
                Some(id) => {
                    if let Some(node) = viewport.graph_mut().node_mut(id) {
                        node.x += scaled.x;
                        node.y += scaled.y;
                    }
                }
                None => viewport.move_center(scaled.x, scaled.y),
            }
        }
    }
}
