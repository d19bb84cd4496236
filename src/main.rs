#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod io;
mod model;
mod ui;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 760.0])
            .with_min_inner_size([900.0, 520.0])
            .with_title("Rust Task Board"),
        ..Default::default()
    };

    eframe::run_native(
        "Rust Task Board",
        options,
        Box::new(|cc| Ok(Box::new(app::TaskBoardApp::new(cc)))),
    )
}
