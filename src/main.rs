// Hide console window on Windows in release
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod capture;
mod clipboard;
mod config;
mod error;
mod geometry;
mod gui;
mod history;
mod hotkey;
mod ocr;
mod pipeline;
mod tray;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::load();
    tracing::info!(
        language = %config.ocr_language,
        hotkey = config.hotkey_enabled,
        "starting"
    );

    gui::run_gui(config)
        .map_err(|e| anyhow::anyhow!("{e}"))
        .context("GUI exited with an error")
}
