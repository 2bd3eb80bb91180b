//! Patchbay - A node-based patch editor
//!
//! Entry point for the application.

use eframe::egui;

use patchbay::app::EditorApp;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title("Patchbay"),
        ..Default::default()
    };

    eframe::run_native(
        "Patchbay",
        options,
        Box::new(|_cc| Ok(Box::new(EditorApp::new()))),
    )
}
