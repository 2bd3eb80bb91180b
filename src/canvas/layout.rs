//! Node box sizing and row placement.
//!
//! Pure math shared by the draw pass and hit-testing, so the box a user
//! clicks is always the box that was painted. Node text renders in the
//! monospace font, which makes a character-count metric exact.

use egui::{pos2, vec2, Pos2, Rect, Vec2};

use crate::graph::Node;

/// Canvas font size in world units.
pub const FONT_SIZE: f32 = 20.0;
/// Width of one monospace glyph relative to the font size.
pub const MONO_ASPECT: f32 = 0.6;
/// Side length of the square connector marker beside each input row.
pub const MARKER_SIZE: f32 = 10.0;
/// Corner radius of the node background.
pub const CORNER_RADIUS: f32 = 5.0;

/// Width of `text` in world units at the given font size.
pub fn text_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * MONO_ASPECT
}

/// One input row of a node: its name, text baseline, and connector marker.
#[derive(Clone, Debug)]
pub struct InputRow {
    /// Input name drawn on the row.
    pub name: String,
    /// Baseline y of the row text, relative to the node origin.
    pub baseline: f32,
    /// Connector marker rect, relative to the node origin. Extends left of
    /// the node box.
    pub marker: Rect,
}

/// Computed box geometry of one node, relative to the node's origin.
#[derive(Clone, Debug)]
pub struct NodeLayout {
    /// Box size in world units.
    pub size: Vec2,
    /// Left edge of the centered name text.
    pub name_x: f32,
    /// Baseline y of the name in the header row.
    pub name_baseline: f32,
    /// One row per input, empty for nodes without a parameter surface.
    pub rows: Vec<InputRow>,
}

impl NodeLayout {
    /// Measures a node's box from its name and input names.
    ///
    /// With a parameter surface: width is the longest input name plus the
    /// node name, height is one header row plus one row per input. Without:
    /// a single header row as wide as the name.
    pub fn measure(node: &Node, font_size: f32) -> Self {
        let name_width = text_width(&node.name, font_size);

        if node.has_parameters() {
            let inputs = node.input_names();
            let longest = inputs
                .iter()
                .map(|name| text_width(name, font_size))
                .fold(0.0, f32::max);

            let rows = inputs
                .into_iter()
                .enumerate()
                .map(|(i, name)| {
                    let baseline = font_size * (i as f32 + 1.75);
                    InputRow {
                        name,
                        baseline,
                        marker: Rect::from_min_size(
                            pos2(-MARKER_SIZE, baseline - font_size / 2.0),
                            Vec2::splat(MARKER_SIZE),
                        ),
                    }
                })
                .collect::<Vec<_>>();

            let width = longest + name_width;
            let height = (rows.len() + 1) as f32 * font_size;
            Self {
                size: vec2(width, height),
                name_x: width / 2.0 - name_width / 2.0,
                name_baseline: font_size,
                rows,
            }
        } else {
            Self {
                size: vec2(name_width, font_size),
                name_x: 0.0,
                name_baseline: font_size,
                rows: Vec::new(),
            }
        }
    }

    /// The node's world-space axis-aligned bounding box.
    pub fn bounds(&self, origin: Pos2) -> Rect {
        Rect::from_min_size(origin, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{NodeKind, PatchEngine};
    use crate::graph::{Node, NodeOptions};

    fn named_node(name: &str) -> Node {
        Node::new(
            1,
            NodeOptions {
                name: Some(name.to_string()),
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_text_width_is_per_character() {
        assert!((text_width("abcd", 20.0) - 48.0).abs() < 1e-3);
        assert_eq!(text_width("", 20.0), 0.0);
    }

    #[test]
    fn test_bare_node_is_a_single_header_row() {
        let node = named_node("Node");
        let layout = NodeLayout::measure(&node, FONT_SIZE);
        assert_eq!(layout.size, vec2(text_width("Node", FONT_SIZE), FONT_SIZE));
        assert!(layout.rows.is_empty());
        assert_eq!(layout.name_x, 0.0);
    }

    #[test]
    fn test_node_with_surface_sizes_from_inputs() {
        let mut engine = PatchEngine::new();
        let mut node = named_node("Osc");
        node.assign_kind(NodeKind::Oscillator, &mut engine).unwrap();

        let layout = NodeLayout::measure(&node, FONT_SIZE);

        // Inputs: detune, frequency, audio in. Longest is "frequency".
        let longest = text_width("frequency", FONT_SIZE);
        let name = text_width("Osc", FONT_SIZE);
        assert_eq!(layout.size.x, longest + name);
        // Header row plus three input rows.
        assert_eq!(layout.size.y, 4.0 * FONT_SIZE);
        assert_eq!(layout.rows.len(), 3);
    }

    #[test]
    fn test_row_baselines_step_by_font_size() {
        let mut engine = PatchEngine::new();
        let mut node = named_node("Filter");
        node.assign_kind(NodeKind::BiquadFilter, &mut engine).unwrap();

        let layout = NodeLayout::measure(&node, FONT_SIZE);
        assert_eq!(layout.rows[0].baseline, FONT_SIZE * 1.75);
        assert_eq!(layout.rows[1].baseline, FONT_SIZE * 2.75);
        // Markers sit left of the box, vertically centered on the row.
        let marker = layout.rows[0].marker;
        assert_eq!(marker.min.x, -MARKER_SIZE);
        assert_eq!(marker.min.y, FONT_SIZE * 1.75 - FONT_SIZE / 2.0);
    }

    #[test]
    fn test_name_is_centered() {
        let mut engine = PatchEngine::new();
        let mut node = named_node("G");
        node.assign_kind(NodeKind::Gain, &mut engine).unwrap();

        let layout = NodeLayout::measure(&node, FONT_SIZE);
        let name_width = text_width("G", FONT_SIZE);
        assert_eq!(layout.name_x, layout.size.x / 2.0 - name_width / 2.0);
    }

    #[test]
    fn test_empty_surface_still_gets_passthrough_row() {
        let mut engine = PatchEngine::new();
        let mut node = named_node("Out");
        node.assign_kind(NodeKind::Destination, &mut engine).unwrap();

        let layout = NodeLayout::measure(&node, FONT_SIZE);
        // Only the synthetic passthrough input.
        assert_eq!(layout.rows.len(), 1);
        assert_eq!(layout.rows[0].name, "audio in");
        assert_eq!(layout.size.y, 2.0 * FONT_SIZE);
    }

    #[test]
    fn test_bounds_offsets_by_origin() {
        let node = named_node("Node");
        let layout = NodeLayout::measure(&node, FONT_SIZE);
        let bounds = layout.bounds(pos2(100.0, 50.0));
        assert_eq!(bounds.min, pos2(100.0, 50.0));
        assert_eq!(bounds.max.y, 50.0 + FONT_SIZE);
    }
}
