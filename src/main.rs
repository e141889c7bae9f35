mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;
mod view;

use std::path::Path;

use anyhow::Context;
use app::DashboardApp;
use eframe::egui;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // A dataset that will not load is fatal; there is nothing to show.
    let table = data::loader::cached_table(Path::new(config::DATA_PATH))
        .inspect_err(|e| log::error!("Failed to load {}: {e}", config::DATA_PATH))
        .with_context(|| format!("loading dataset from {}", config::DATA_PATH))?;
    if table.is_empty() {
        log::warn!("{} has no records; every chart will be empty", config::DATA_PATH);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config::WINDOW_SIZE)
            .with_min_inner_size(config::MIN_WINDOW_SIZE),
        ..Default::default()
    };

    eframe::run_native(
        config::APP_TITLE,
        options,
        Box::new(|_cc| Ok(Box::new(DashboardApp::new(table)))),
    )
    .map_err(|e| anyhow::anyhow!("running UI: {e}"))
}
