use std::sync::Arc;

use anyhow::{Context, Result};
use celestial_classifier::app::CelestialApp;
use celestial_classifier::classifier::ClassifierAdapter;
use celestial_classifier::config::AppConfig;
use eframe::egui;

fn main() -> Result<()> {
    env_logger::init();

    let config = AppConfig::from_env().context("reading configuration")?;

    // A missing or malformed artifact is fatal; stop before any window opens.
    let adapter = ClassifierAdapter::load(&config.model_path)
        .inspect_err(|e| log::error!("Failed to load classifier: {e}"))
        .with_context(|| {
            format!(
                "loading classifier artifact {} (set CELESTIAL_MODEL_PATH to override)",
                config.model_path.display()
            )
        })?;
    let adapter = Arc::new(adapter);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Celestial Object Classifier",
        options,
        Box::new(move |_cc| Ok(Box::new(CelestialApp::new(adapter)))),
    )
    .map_err(|e| anyhow::anyhow!("running the UI: {e}"))
}
