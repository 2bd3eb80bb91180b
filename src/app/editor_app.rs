//! Main application struct for the editor.
//!
//! Wires the viewport, the input sampler, the engine, and the settings
//! registry into an eframe application: toolbar on top, settings and node
//! inspector on the left, the canvas in the center.

use std::time::Instant;

use eframe::egui::{self, Align, ComboBox, Layout, RichText, Sense};
use log::warn;

use crate::canvas::{InputSampler, Viewport};
use crate::engine::{NodeKind, PatchEngine};
use crate::graph::{NodeId, NodeOptions};
use crate::persistence::{load_from_file, save_to_file, PatchSnapshot};
use crate::settings::{OptionKind, OptionValue, SettingsRegistry};

use super::theme;

/// Settings option ids registered by the app.
mod keys {
    pub const PAN_SPEED: &str = "input.pan-speed";
    pub const WHEEL_STEP: &str = "input.wheel-step";
    pub const TICK_RATE: &str = "input.tick-rate";
    pub const FONT_SIZE: &str = "canvas.font-size";
    pub const SHOW_GRID: &str = "canvas.show-grid";
}

/// Main application state for the editor.
pub struct EditorApp {
    engine: PatchEngine,
    viewport: Viewport,
    sampler: InputSampler,
    settings: SettingsRegistry,

    /// Kind picked in the toolbar for the next created node.
    create_kind: NodeKind,
    /// Node shown in the inspector panel.
    inspected: Option<NodeId>,
    /// Target picked in the inspector's connect combo.
    connect_target: Option<NodeId>,
    /// Last failed operation, shown in the banner until dismissed.
    last_error: Option<String>,

    theme_applied: bool,
}

impl Default for EditorApp {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorApp {
    /// Create the application with an empty patch and default settings.
    pub fn new() -> Self {
        let mut app = Self {
            engine: PatchEngine::new(),
            viewport: Viewport::new(),
            sampler: InputSampler::default(),
            settings: SettingsRegistry::new(),
            create_kind: NodeKind::Oscillator,
            inspected: None,
            connect_target: None,
            last_error: None,
            theme_applied: false,
        };
        app.register_settings();
        app
    }

    fn register_settings(&mut self) {
        // Registered once at startup; duplicate ids cannot occur here.
        let results = [
            self.settings
                .create(
                    keys::PAN_SPEED,
                    OptionKind::NumberKnob,
                    "Pan speed",
                    OptionValue::Number(crate::canvas::DEFAULT_PAN_SPEED),
                )
                .map(|option| {
                    option.set_range(0.1, 5.0);
                }),
            self.settings
                .create(
                    keys::WHEEL_STEP,
                    OptionKind::NumberRaw,
                    "Wheel zoom step",
                    OptionValue::Number(crate::canvas::DEFAULT_WHEEL_STEP),
                )
                .map(|option| {
                    option.set_range(0.01, 1.0);
                }),
            self.settings
                .create(
                    keys::TICK_RATE,
                    OptionKind::NumberRaw,
                    "Input rate (Hz)",
                    OptionValue::Number(crate::canvas::DEFAULT_TICK_RATE),
                )
                .map(|option| {
                    option.set_range(5.0, 120.0);
                }),
            self.settings
                .create(
                    keys::FONT_SIZE,
                    OptionKind::NumberRaw,
                    "Canvas font size",
                    OptionValue::Number(crate::canvas::FONT_SIZE),
                )
                .map(|option| {
                    option.set_range(8.0, 48.0);
                }),
            self.settings
                .create(
                    keys::SHOW_GRID,
                    OptionKind::Boolean,
                    "Show grid",
                    OptionValue::Bool(true),
                )
                .map(|_| ()),
        ];
        for result in results {
            if let Err(err) = result {
                self.report(err);
            }
        }
    }

    /// Push editor tunables from the settings registry into the components
    /// that consume them.
    fn sync_settings(&mut self) {
        if let Some(speed) = self.settings.number(keys::PAN_SPEED) {
            self.sampler.set_pan_speed(speed);
        }
        if let Some(step) = self.settings.number(keys::WHEEL_STEP) {
            self.sampler.set_wheel_step(step);
        }
        if let Some(rate) = self.settings.number(keys::TICK_RATE) {
            self.sampler.set_tick_rate(rate);
        }
        if let Some(size) = self.settings.number(keys::FONT_SIZE) {
            self.viewport.set_font_size(size);
        }
    }

    fn report(&mut self, err: impl std::fmt::Display) {
        let message = err.to_string();
        warn!("operation failed: {}", message);
        self.last_error = Some(message);
    }

    fn create_node(&mut self) {
        let result = self.viewport.create_node(
            NodeOptions {
                kind: Some(self.create_kind),
                ..Default::default()
            },
            Some(&mut self.engine),
        );
        match result {
            Ok(id) => self.inspected = Some(id),
            Err(err) => self.report(err),
        }
    }

    fn save_patch(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("patch", &["json"])
            .save_file()
        else {
            return;
        };
        let patch = PatchSnapshot::capture("Patch", self.viewport.graph());
        if let Err(err) = save_to_file(&patch, &path) {
            self.report(err);
        }
    }

    fn load_patch(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("patch", &["json"])
            .pick_file()
        else {
            return;
        };
        let patch = match load_from_file(&path) {
            Ok(patch) => patch,
            Err(err) => return self.report(err),
        };
        // Restore against a fresh engine so stale handles cannot survive.
        let mut engine = PatchEngine::new();
        match patch.restore(&mut engine) {
            Ok(graph) => {
                self.engine = engine;
                self.viewport.set_graph(graph);
                self.inspected = None;
                self.connect_target = None;
            }
            Err(err) => self.report(err),
        }
    }

    fn draw_error_banner(&mut self, ctx: &egui::Context) {
        if self.last_error.is_none() {
            return;
        }
        egui::TopBottomPanel::bottom("error_banner").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let message = self.last_error.clone().unwrap_or_default();
                ui.label(RichText::new(message).color(theme::accent::ERROR));
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    if ui.button("Dismiss").clicked() {
                        self.last_error = None;
                    }
                });
            });
        });
    }

    fn draw_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(
                RichText::new("PATCHBAY")
                    .size(18.0)
                    .color(theme::text::PRIMARY)
                    .strong(),
            );
            ui.separator();

            ComboBox::from_id_salt("create_kind")
                .selected_text(self.create_kind.display_name())
                .show_ui(ui, |ui| {
                    for kind in NodeKind::all() {
                        ui.selectable_value(&mut self.create_kind, *kind, kind.display_name());
                    }
                });
            if ui.button("Create Node").clicked() {
                self.create_node();
            }

            ui.separator();
            if ui.button("Save").clicked() {
                self.save_patch();
            }
            if ui.button("Load").clicked() {
                self.load_patch();
            }

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                ui.label(
                    RichText::new(format!("zoom {:.2}", self.viewport.zoom()))
                        .color(theme::text::SECONDARY),
                );
            });
        });
    }

    fn draw_side_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Settings");
        for option in self.settings.options_mut() {
            option.show(ui);
        }

        ui.separator();
        ui.heading("Node");
        let Some(id) = self.inspected.filter(|id| self.viewport.graph().has_node(*id)) else {
            ui.label(RichText::new("Click a node to inspect it").color(theme::text::SECONDARY));
            return;
        };

        // Name and kind editing.
        let mut apply_kind: Option<NodeKind> = None;
        if let Some(node) = self.viewport.graph_mut().node_mut(id) {
            ui.horizontal(|ui| {
                ui.label("Name");
                ui.text_edit_singleline(&mut node.name);
            });

            let mut kind = node.kind().unwrap_or(NodeKind::Oscillator);
            ui.horizontal(|ui| {
                ui.label("Kind");
                ComboBox::from_id_salt(("node_kind", id))
                    .selected_text(
                        node.kind()
                            .map(|k| k.display_name())
                            .unwrap_or("(none)"),
                    )
                    .show_ui(ui, |ui| {
                        for candidate in NodeKind::all() {
                            ui.selectable_value(&mut kind, *candidate, candidate.display_name());
                        }
                    });
                if ui.button("Apply").clicked() && Some(kind) != node.kind() {
                    apply_kind = Some(kind);
                }
            });

            for control in node.controls_mut() {
                control.show(ui);
            }
        }
        if let Some(kind) = apply_kind {
            let result = match self.viewport.graph_mut().node_mut(id) {
                Some(node) => node.assign_kind(kind, &mut self.engine),
                None => Ok(()),
            };
            if let Err(err) = result {
                self.report(err);
            }
        }

        self.draw_connections(ui, id);
    }

    fn draw_connections(&mut self, ui: &mut egui::Ui, id: NodeId) {
        ui.separator();
        ui.heading("Connections");

        let others: Vec<(NodeId, String)> = self
            .viewport
            .graph()
            .nodes()
            .iter()
            .filter(|node| node.id() != id)
            .map(|node| (node.id(), format!("{} ({})", node.name, node.id())))
            .collect();

        if !others.is_empty() {
            ui.horizontal(|ui| {
                let selected_label = self
                    .connect_target
                    .and_then(|target| {
                        others
                            .iter()
                            .find(|(other, _)| *other == target)
                            .map(|(_, label)| label.clone())
                    })
                    .unwrap_or_else(|| "pick a node".to_string());
                ComboBox::from_id_salt("connect_target")
                    .selected_text(selected_label)
                    .show_ui(ui, |ui| {
                        for (other, label) in &others {
                            ui.selectable_value(&mut self.connect_target, Some(*other), label);
                        }
                    });
                if ui.button("Connect").clicked() {
                    if let Some(target) = self.connect_target {
                        if let Err(err) =
                            self.viewport
                                .graph_mut()
                                .connect(id, target, &mut self.engine)
                        {
                            self.report(err);
                        }
                    }
                }
            });
        }

        let edges: Vec<_> = self
            .viewport
            .graph()
            .edges()
            .iter()
            .copied()
            .filter(|edge| edge.source == id || edge.dest == id)
            .collect();
        for edge in edges {
            ui.horizontal(|ui| {
                ui.label(format!("{} → {}", edge.source, edge.dest));
                if ui.button("✕").clicked() {
                    if let Err(err) =
                        self.viewport
                            .graph_mut()
                            .disconnect(edge.source, edge.dest, &mut self.engine)
                    {
                        self.report(err);
                    }
                }
            });
        }

        ui.separator();
        ui.horizontal(|ui| {
            if ui.button("Remove node").clicked() {
                if let Err(err) = self.viewport.remove_node(id, &mut self.engine) {
                    self.report(err);
                } else {
                    self.inspected = None;
                }
            }
        });
    }

    fn draw_canvas(&mut self, ui: &mut egui::Ui) {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
        let rect = response.rect;

        // Accumulate raw input for the sampling tick.
        let ctx = ui.ctx().clone();
        ctx.input(|input| {
            if response.hovered() {
                let wheel = input.raw_scroll_delta.y;
                if wheel != 0.0 {
                    self.sampler.note_wheel(-wheel / 10.0);
                }
                let bindings = self.sampler.bindings();
                if input.key_pressed(bindings.zoom_in) {
                    self.sampler.note_key_press(bindings.zoom_in);
                }
                if input.key_pressed(bindings.zoom_out) {
                    self.sampler.note_key_press(bindings.zoom_out);
                }
            }

            if input.pointer.primary_pressed() {
                let over = input
                    .pointer
                    .interact_pos()
                    .filter(|pos| rect.contains(*pos))
                    .and_then(|pos| {
                        self.viewport
                            .select_node_at(pos - rect.min.to_vec2(), rect.size())
                    });
                if response.hovered() {
                    self.sampler.pointer_pressed(over);
                    if over.is_some() {
                        self.inspected = over;
                    }
                }
            }
            if input.pointer.primary_released() {
                self.sampler.pointer_released();
            }
            self.sampler.note_movement(input.pointer.delta());
        });

        // Apply accumulated input at the fixed sampling rate.
        if self.sampler.tick_due(Instant::now()) {
            self.sampler.apply_tick(&mut self.viewport);
        }

        // Dirty-gated repaint request; the draw itself is idempotent.
        if self.viewport.take_needs_redraw() {
            ctx.request_repaint();
        }

        if self.settings.boolean(keys::SHOW_GRID).unwrap_or(true) {
            theme::draw_grid_background(&painter, rect);
        } else {
            painter.rect_filled(rect, 0.0, theme::background::MAIN);
        }
        self.viewport.draw(&painter, rect);
    }
}

impl eframe::App for EditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.theme_applied {
            theme::apply_theme(ctx);
            self.theme_applied = true;
        }
        self.sync_settings();

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.draw_toolbar(ui);
        });
        self.draw_error_banner(ctx);
        egui::SidePanel::left("side_panel")
            .default_width(260.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.draw_side_panel(ui);
                });
            });
        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_canvas(ui);
        });

        // Keep ticking while a drag is in progress even if no egui event
        // arrives, so sampled movement is applied promptly.
        if self.sampler.drag_target().is_some() {
            ctx.request_repaint();
        }
    }
}
