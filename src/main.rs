mod app;
mod color;
mod config;
mod data;
mod error;
mod state;
mod ui;
mod view;

use std::sync::Arc;

use anyhow::{Context, Result};
use app::DashboardApp;
use config::DataSources;
use data::catalog::Catalog;
use eframe::egui;
use state::SessionState;

fn main() -> Result<()> {
    env_logger::init();

    let cwd = std::env::current_dir().context("resolving working directory")?;
    let sources = DataSources::discover(&cwd)?;

    // Fail before any window opens: no partial dashboard.
    let catalog = match Catalog::load(&sources) {
        Ok(catalog) => Arc::new(catalog),
        Err(e) => {
            log::error!("Failed to load dataset: {e:#}");
            return Err(e);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        view::TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(DashboardApp::new(SessionState::new(catalog))))),
    )
    .map_err(|e| anyhow::anyhow!("running dashboard window: {e}"))
}
