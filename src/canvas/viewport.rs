//! The graph viewport: node collection ownership, camera, dirty tracking,
//! hit-testing, and the draw pass.
//!
//! Every mutation marks the viewport dirty; the application consumes the
//! flag to request a repaint. The draw pass itself is idempotent — drawing
//! with no pending mutation reproduces the same pixels.

use egui::{Align2, FontId, Painter, Pos2, Rect, Shape, Stroke, Vec2};
use log::debug;

use crate::app::theme;
use crate::engine::NodeFactory;
use crate::error::EditorError;
use crate::graph::{Graph, Node, NodeId, NodeOptions};

use super::camera::Camera;
use super::geometry::{rounded_rect_path, CornerRadii};
use super::layout::{NodeLayout, CORNER_RADIUS, FONT_SIZE};

/// Owns the node collection and the camera, and renders both.
pub struct Viewport {
    graph: Graph,
    camera: Camera,
    needs_redraw: bool,
    font_size: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            graph: Graph::new(),
            camera: Camera::new(),
            needs_redraw: true,
            font_size: FONT_SIZE,
        }
    }
}

impl Viewport {
    /// Creates an empty viewport with the camera at the origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// The node collection.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Mutable access to the node collection. Conservatively marks the
    /// viewport dirty, since the borrow may mutate anything.
    pub fn graph_mut(&mut self) -> &mut Graph {
        self.needs_redraw = true;
        &mut self.graph
    }

    /// Replaces the node collection wholesale (patch load); marks dirty.
    pub fn set_graph(&mut self, graph: Graph) {
        self.graph = graph;
        self.needs_redraw = true;
    }

    /// The camera state.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Current zoom factor.
    pub fn zoom(&self) -> f32 {
        self.camera.zoom()
    }

    /// Canvas font size in world units.
    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Changes the canvas font size, resizing every node box.
    pub fn set_font_size(&mut self, font_size: f32) {
        if font_size > 0.0 && font_size != self.font_size {
            self.font_size = font_size;
            self.needs_redraw = true;
        }
    }

    /// True when a mutation is waiting for a repaint.
    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    /// Returns whether a repaint is due and clears the flag.
    pub fn take_needs_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    /// Sets the zoom, saturating silently; marks dirty.
    pub fn set_zoom(&mut self, zoom: f32) {
        self.camera.set_zoom(zoom);
        self.needs_redraw = true;
    }

    /// Adds to the zoom, saturating silently; marks dirty.
    pub fn add_zoom(&mut self, delta: f32) {
        self.camera.add_zoom(delta);
        self.needs_redraw = true;
    }

    /// Adds to the pan offset; marks dirty. Callers pre-scale by zoom when
    /// the movement should feel zoom-invariant.
    pub fn move_center(&mut self, dx: f32, dy: f32) {
        self.camera.move_by(dx, dy);
        self.needs_redraw = true;
    }

    /// Creates a node at the viewport's visual center (the camera's negative
    /// pan), assigns a kind when requested, adds it, and marks dirty.
    ///
    /// Requesting a kind without supplying a factory fails with
    /// `MissingPrerequisite` before any state changes.
    pub fn create_node(
        &mut self,
        mut options: NodeOptions,
        factory: Option<&mut dyn NodeFactory>,
    ) -> Result<NodeId, EditorError> {
        let kind = options.kind;
        if let Some(kind) = kind {
            if factory.is_none() {
                return Err(EditorError::MissingPrerequisite(format!(
                    "a node factory is required to assign kind '{}'",
                    kind.as_tag()
                )));
            }
        }

        let pan = self.camera.pan();
        options.x = -pan.x;
        options.y = -pan.y;

        let id = self.graph.allocate_id();
        let mut node = Node::new(id, options);
        if let (Some(kind), Some(factory)) = (kind, factory) {
            node.assign_kind(kind, factory)?;
        }
        self.graph.add_node(node)?;
        self.needs_redraw = true;
        debug!("viewport: created node {} at {:?}", id, -pan);
        Ok(id)
    }

    /// Adds an externally built node; marks dirty on success.
    pub fn add_node(&mut self, node: Node) -> Result<(), EditorError> {
        self.graph.add_node(node)?;
        self.needs_redraw = true;
        Ok(())
    }

    /// Removes a node and its connections; marks dirty on success.
    pub fn remove_node(
        &mut self,
        id: NodeId,
        factory: &mut dyn NodeFactory,
    ) -> Result<Node, EditorError> {
        let node = self.graph.remove_node(id, factory)?;
        self.needs_redraw = true;
        Ok(node)
    }

    /// Returns the topmost node whose bounding box contains the screen
    /// point, or `None`.
    ///
    /// The screen point is inverse-transformed into world space and tested
    /// against each node's box from the same layout math the draw pass
    /// uses. Nodes are scanned in reverse insertion order, so overlapping
    /// boxes resolve to the last-inserted (visually topmost) node.
    pub fn select_node_at(&self, screen: Pos2, viewport_size: Vec2) -> Option<NodeId> {
        let world = self.camera.screen_to_world(screen, viewport_size);
        self.graph
            .nodes()
            .iter()
            .rev()
            .find(|node| {
                NodeLayout::measure(node, self.font_size)
                    .bounds(Pos2::new(node.x, node.y))
                    .contains(world)
            })
            .map(Node::id)
    }

    /// The render pass. Projects every node through the camera transform
    /// and paints background, input rows, connector markers, name, and the
    /// edges of the graph's edge set.
    pub fn draw(&self, painter: &Painter, canvas: Rect) {
        let zoom = self.camera.zoom();
        let size = canvas.size();
        let project =
            |world: Pos2| canvas.min + self.camera.world_to_screen(world, size).to_vec2();
        let font = FontId::monospace(self.font_size / zoom);

        // Edges under the nodes.
        let edge_stroke = Stroke::new(2.0 / zoom, theme::canvas::EDGE);
        for edge in self.graph.edges() {
            let (Some(src), Some(dst)) = (self.graph.node(edge.source), self.graph.node(edge.dest))
            else {
                continue;
            };
            let src_layout = NodeLayout::measure(src, self.font_size);
            let dst_layout = NodeLayout::measure(dst, self.font_size);
            let from = Pos2::new(src.x + src_layout.size.x, src.y + src_layout.size.y / 2.0);
            let to = Pos2::new(dst.x, dst.y + dst_layout.size.y / 2.0);
            painter.line_segment([project(from), project(to)], edge_stroke);
        }

        for node in self.graph.nodes() {
            let layout = NodeLayout::measure(node, self.font_size);
            let origin = Pos2::new(node.x, node.y);
            let fill = theme::parse_hex(&node.color).unwrap_or(theme::canvas::NODE_FALLBACK);
            let text_color =
                theme::parse_hex(&node.text_color).unwrap_or(theme::canvas::TEXT_FALLBACK);

            let box_screen = Rect::from_min_size(project(origin), layout.size / zoom);
            let path = rounded_rect_path(box_screen, CornerRadii::uniform(CORNER_RADIUS / zoom));
            painter.add(Shape::convex_polygon(path, fill, Stroke::NONE));

            for row in &layout.rows {
                let row_pos = Pos2::new(origin.x, origin.y + row.baseline);
                painter.text(
                    project(row_pos),
                    Align2::LEFT_BOTTOM,
                    &row.name,
                    font.clone(),
                    text_color,
                );
                let marker = Rect::from_min_max(
                    project(origin + row.marker.min.to_vec2()),
                    project(origin + row.marker.max.to_vec2()),
                );
                painter.rect_filled(marker, 0.0, text_color);
            }

            let name_pos = Pos2::new(origin.x + layout.name_x, origin.y + layout.name_baseline);
            painter.text(
                project(name_pos),
                Align2::LEFT_BOTTOM,
                &node.name,
                font.clone(),
                text_color,
            );
        }
    }
}
