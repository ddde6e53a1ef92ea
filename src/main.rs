mod app;
mod color;
mod data;
mod error;
mod input;
mod segment;
mod state;
mod ui;

use std::path::PathBuf;

use app::ClusterLensApp;
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    // Optional: preselect the input file.
    let initial_file = std::env::args_os().nth(1).map(PathBuf::from);
    if let Some(path) = &initial_file {
        log::info!("Starting with {}", path.display());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Cluster Lens – Customer Segmentation",
        options,
        Box::new(move |_cc| Ok(Box::new(ClusterLensApp::new(AppState::with_file(initial_file))))),
    )
}
