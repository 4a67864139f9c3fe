mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use app::SurveyDashboardApp;
use config::DashboardConfig;
use data::cache::DATASET_CACHE;
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    let config = DashboardConfig::from_env();
    log::info!("Loading survey dataset from {}", config.source);

    let mut state = AppState::default();
    match DATASET_CACHE.get_or_load(|| config.source.load(config.fetch_timeout)) {
        Ok(dataset) => state.set_dataset(dataset),
        Err(e) => {
            log::error!("Failed to load survey dataset: {e:#}");
            state.set_error(format!("Error: {e:#}"));
        }
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Stack Overflow 2023 Developer Survey",
        options,
        Box::new(move |cc| {
            // Install image loaders so egui can fetch and render the logo.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(SurveyDashboardApp::new(state)))
        }),
    )
}
