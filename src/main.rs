//! Worldbook - form-driven editor for world-building notes
//!
//! Documents are YAML files grouped into fixed category folders and edited
//! either as raw YAML or through category-specific forms.

mod app;
mod core;
mod ui;

use app::WorldbookApp;
use eframe::egui;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::filter::LevelFilter::INFO)
        .init();

    tracing::info!("Starting Worldbook...");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Worldbook"),
        ..Default::default()
    };

    eframe::run_native(
        "Worldbook",
        native_options,
        Box::new(|cc| Ok(Box::new(WorldbookApp::new(cc)))),
    )
}
