//! Application entry point for the constellation viewer.
//!
//! Sets up logging, loads the optional TOML config and hands everything
//! else to [`Viewer`] from the `viewer` module.

mod viewer;

use std::path::PathBuf;

use anyhow::Context;
use sim_core::config::Config;
use tracing_subscriber::EnvFilter;
use viewer::Viewer;

/// Environment variable naming a config file when no CLI argument is given.
const CONFIG_ENV: &str = "CONSTELLATION_CONFIG";

/// Starts the native eframe application.
///
/// The config path is the first CLI argument, or `$CONSTELLATION_CONFIG`;
/// without either the built-in defaults are used. A configured `width` and
/// `height` size the window.
fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = load_config()?;

    let mut options = eframe::NativeOptions::default();
    if let (Some(w), Some(h)) = (config.width, config.height) {
        options.viewport = egui::ViewportBuilder::default().with_inner_size([w, h]);
    }

    eframe::run_native(
        "Constellation",
        options,
        Box::new(|_cc| Ok(Box::new(Viewer::new(config)))),
    )
    .map_err(|e| anyhow::anyhow!("viewer failed: {e}"))
}

fn load_config() -> anyhow::Result<Config> {
    let path = std::env::args_os()
        .nth(1)
        .or_else(|| std::env::var_os(CONFIG_ENV))
        .map(PathBuf::from);

    match path {
        Some(path) => {
            Config::load(&path).with_context(|| format!("loading config {}", path.display()))
        }
        None => Ok(Config::default()),
    }
}
