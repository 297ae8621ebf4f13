//! noisebed - terminal noise machine
//!
//! Run with: cargo run -- [profile.json]

mod app;
mod ui;

use std::{fs::File, path::PathBuf};

use color_eyre::eyre::{Result as EyreResult, WrapErr};
use noisebed::profile::DEFAULT_PROFILE_PATH;

/// Log file; the terminal belongs to the UI.
const LOG_PATH: &str = "noisebed.log";

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    init_logging()?;

    let profile_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PROFILE_PATH));

    let terminal = ratatui::init();
    let res = app::run(terminal, profile_path);
    ratatui::restore();
    res
}

fn init_logging() -> EyreResult<()> {
    let file = File::create(LOG_PATH).wrap_err_with(|| format!("failed to create {LOG_PATH}"))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}
