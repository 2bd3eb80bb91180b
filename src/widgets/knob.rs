//! Compact rotary knob widget.
//!
//! Drag up/right to increase, down/left to decrease. Used for `Rotary`
//! binding controls and knob-style settings options.

use egui::{Response, Sense, Stroke, Ui, Vec2, Widget};
use std::f32::consts::PI;
use std::ops::RangeInclusive;

/// Sweep start angle (radians), measured clockwise from the positive x axis.
/// The indicator travels from lower-left around the top to lower-right.
const SWEEP_START: f32 = 0.75 * PI;
/// Total sweep of the knob in radians.
const SWEEP_RANGE: f32 = 1.5 * PI;
/// Drag distance in points that spans the full value range.
const DRAG_SPAN: f32 = 200.0;

/// Maps a normalized value in 0..=1 to the indicator angle.
fn indicator_angle(normalized: f32) -> f32 {
    SWEEP_START + normalized.clamp(0.0, 1.0) * SWEEP_RANGE
}

/// A small rotary knob bound to an `f32` value.
pub struct Knob<'a> {
    value: &'a mut f32,
    range: RangeInclusive<f32>,
    diameter: f32,
}

impl<'a> Knob<'a> {
    /// Creates a knob over `value` constrained to `range`.
    pub fn new(value: &'a mut f32, range: RangeInclusive<f32>) -> Self {
        Self {
            value,
            range,
            diameter: 28.0,
        }
    }

    /// Overrides the knob diameter in points.
    pub fn diameter(mut self, diameter: f32) -> Self {
        self.diameter = diameter;
        self
    }
}

impl Widget for Knob<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        let (rect, mut response) =
            ui.allocate_exact_size(Vec2::splat(self.diameter), Sense::click_and_drag());

        let min = *self.range.start();
        let max = *self.range.end();
        let span = max - min;

        if response.dragged() && span > 0.0 {
            let delta = response.drag_delta();
            let step = (delta.x - delta.y) * span / DRAG_SPAN;
            let updated = (*self.value + step).clamp(min, max);
            if updated != *self.value {
                *self.value = updated;
                response.mark_changed();
            }
        }

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            let visuals = ui.style().interact(&response);
            let center = rect.center();
            let radius = rect.width() / 2.0 - 1.0;

            painter.circle(center, radius, visuals.bg_fill, visuals.fg_stroke);

            let normalized = if span > 0.0 {
                (*self.value - min) / span
            } else {
                0.0
            };
            let angle = indicator_angle(normalized);
            let tip = center + radius * 0.8 * Vec2::new(angle.cos(), angle.sin());
            painter.line_segment([center, tip], Stroke::new(2.0, visuals.fg_stroke.color));
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indicator_angle_endpoints() {
        assert_eq!(indicator_angle(0.0), SWEEP_START);
        assert_eq!(indicator_angle(1.0), SWEEP_START + SWEEP_RANGE);
    }

    #[test]
    fn test_indicator_angle_clamps_out_of_range_input() {
        assert_eq!(indicator_angle(-1.0), indicator_angle(0.0));
        assert_eq!(indicator_angle(2.0), indicator_angle(1.0));
    }

    #[test]
    fn test_indicator_midpoint_points_up() {
        // Halfway through the sweep the indicator points straight up
        // (negative y in screen coordinates).
        let angle = indicator_angle(0.5);
        assert!(angle.cos().abs() < 1e-6);
        assert!(angle.sin() < 0.0);
    }
}
