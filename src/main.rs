// src/main.rs
use anyhow::Result;
use eframe::egui;

mod app;
mod model;
mod service;
mod state;
mod ui;

use app::StrataApp;
use service::ServiceConfig;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServiceConfig::from_env();
    if !config.has_credential() {
        log::warn!("GEMINI_API_KEY is not set; analysis requests will fail until it is configured");
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let handle = runtime.handle().clone();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_title("Strata"),
        ..Default::default()
    };

    eframe::run_native(
        "Strata",
        options,
        Box::new(move |_cc| Box::new(StrataApp::new(config, handle))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run application: {}", e))
}
