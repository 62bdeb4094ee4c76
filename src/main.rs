mod app;
mod color;
mod state;
mod ui;

use app::OlympicsApp;
use eframe::egui;
use olympics_dashboard::config::DashboardConfig;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    let config = DashboardConfig::load().unwrap_or_else(|e| {
        log::error!("Invalid configuration, using defaults: {e:#}");
        DashboardConfig::default()
    });
    log::info!("Reading results from {}", config.data_path.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "🥇 History of the Olympics",
        options,
        Box::new(move |_cc| Ok(Box::new(OlympicsApp::new(AppState::new(config))))),
    )
}
