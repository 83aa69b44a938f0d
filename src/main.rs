#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use std::sync::Arc;

use inkflow::{AppConfig, InkFlowApp, UnconfiguredService};

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::load().unwrap_or_else(|err| {
        log::warn!("Falling back to default config: {}", err);
        AppConfig::default()
    });

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("InkFlow")
            .with_inner_size([960.0, 780.0])
            .with_min_inner_size([480.0, 640.0]),
        ..Default::default()
    };

    eframe::run_native(
        "InkFlow",
        native_options,
        Box::new(move |cc| Ok(Box::new(InkFlowApp::new(cc, config, Arc::new(UnconfiguredService))))),
    )
}
