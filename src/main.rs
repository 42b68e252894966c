mod app;
mod color;
mod config;
mod data;
mod error;
mod state;
mod ui;

use app::BabyNamesApp;
use config::AppConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = AppConfig::from_env();
    let cache = config.dataset_cache();
    log::info!("Name data source: {}", cache.describe_source());
    data::cache::install(cache);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "My Baby Name App",
        options,
        Box::new(|_cc| Ok(Box::new(BabyNamesApp::new()))),
    )
}
