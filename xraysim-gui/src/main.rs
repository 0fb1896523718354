//! xraysim GUI application entry point.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod ui;
mod util;
mod viewer;

use app::XraySimApp;
use eframe::egui;

fn main() -> eframe::Result<()> {
    env_logger::init();
    let opts = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([900.0, 640.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Minimal X-ray Simulator",
        opts,
        Box::new(|cc| {
            ui::theme::configure_style(&cc.egui_ctx);
            Ok(Box::new(XraySimApp::default()))
        }),
    )
}
