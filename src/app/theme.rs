//! Theme definitions for the editor UI.
//!
//! Color constants, hex parsing for node colors, and the dark theme applied
//! to the egui context.

use eframe::egui::{self, Color32, Rounding, Stroke, Vec2};

/// Background colors
pub mod background {
    use super::Color32;

    /// Main window background
    pub const MAIN: Color32 = Color32::from_rgb(18, 18, 30);

    /// Canvas grid line color
    pub const GRID: Color32 = Color32::from_rgb(32, 32, 50);

    /// Panel background
    pub const PANEL: Color32 = Color32::from_rgb(28, 28, 44);

    /// Widget background (buttons, inputs)
    pub const WIDGET: Color32 = Color32::from_rgb(40, 40, 62);

    /// Widget background when hovered
    pub const WIDGET_HOVERED: Color32 = Color32::from_rgb(50, 50, 78);

    /// Widget background when active/pressed
    pub const WIDGET_ACTIVE: Color32 = Color32::from_rgb(60, 60, 94);
}

/// Text colors
pub mod text {
    use super::Color32;

    /// Primary text
    pub const PRIMARY: Color32 = Color32::from_rgb(235, 235, 242);

    /// Secondary, dimmed text
    pub const SECONDARY: Color32 = Color32::from_rgb(150, 150, 168);
}

/// UI accent colors
pub mod accent {
    use super::Color32;

    /// Primary accent
    pub const PRIMARY: Color32 = Color32::from_rgb(96, 170, 255);

    /// Error banner
    pub const ERROR: Color32 = Color32::from_rgb(239, 83, 80);
}

/// Canvas drawing colors
pub mod canvas {
    use super::Color32;

    /// Connection lines between nodes
    pub const EDGE: Color32 = Color32::from_rgb(120, 144, 156);

    /// Node fill when its color string fails to parse
    pub const NODE_FALLBACK: Color32 = Color32::from_rgb(34, 34, 85);

    /// Node text when its color string fails to parse
    pub const TEXT_FALLBACK: Color32 = Color32::from_rgb(159, 159, 159);
}

/// Grid spacing for the canvas background pattern
pub const GRID_SPACING: f32 = 40.0;

/// Standard rounding for UI elements
pub const ROUNDING: Rounding = Rounding {
    nw: 4.0,
    ne: 4.0,
    sw: 4.0,
    se: 4.0,
};

/// Parses a `#rrggbb` color string.
pub fn parse_hex(color: &str) -> Option<Color32> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let value = u32::from_str_radix(hex, 16).ok()?;
    Some(Color32::from_rgb(
        (value >> 16) as u8,
        (value >> 8) as u8,
        value as u8,
    ))
}

/// Apply the dark editor theme to an egui context
pub fn apply_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();

    let visuals = &mut style.visuals;
    visuals.dark_mode = true;
    visuals.panel_fill = background::MAIN;
    visuals.window_fill = background::PANEL;
    visuals.window_rounding = ROUNDING;

    visuals.widgets.noninteractive.bg_fill = background::WIDGET;
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, text::SECONDARY);
    visuals.widgets.inactive.bg_fill = background::WIDGET;
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, text::PRIMARY);
    visuals.widgets.hovered.bg_fill = background::WIDGET_HOVERED;
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, text::PRIMARY);
    visuals.widgets.active.bg_fill = background::WIDGET_ACTIVE;
    visuals.widgets.active.fg_stroke = Stroke::new(1.5, accent::PRIMARY);

    visuals.selection.bg_fill = accent::PRIMARY.gamma_multiply(0.3);
    visuals.selection.stroke = Stroke::new(1.0, accent::PRIMARY);
    visuals.extreme_bg_color = Color32::from_rgb(14, 14, 26);

    style.spacing.item_spacing = Vec2::new(8.0, 6.0);
    style.spacing.button_padding = Vec2::new(10.0, 5.0);

    ctx.set_style(style);
}

/// Draw the canvas background: a fill plus a faint grid.
pub fn draw_grid_background(painter: &egui::Painter, rect: egui::Rect) {
    painter.rect_filled(rect, 0.0, background::MAIN);

    let stroke = Stroke::new(1.0, background::GRID);
    let mut x = rect.left() - (rect.left() % GRID_SPACING);
    while x <= rect.right() {
        painter.line_segment(
            [egui::pos2(x, rect.top()), egui::pos2(x, rect.bottom())],
            stroke,
        );
        x += GRID_SPACING;
    }
    let mut y = rect.top() - (rect.top() % GRID_SPACING);
    while y <= rect.bottom() {
        painter.line_segment(
            [egui::pos2(rect.left(), y), egui::pos2(rect.right(), y)],
            stroke,
        );
        y += GRID_SPACING;
    }
}
