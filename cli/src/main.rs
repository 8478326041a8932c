mod app;
mod args;
mod config;
mod logging;

use std::process::ExitCode;

use clap::Parser;

use crate::args::Cli;
use crate::config::{loader, paths};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(paths::config_file);
    let (config, config_err) = match loader::load_config(&config_path) {
        Ok(config) => (config, None),
        Err(e) => (Default::default(), Some(e)),
    };

    logging::setup(&config.logging);
    match config_err {
        Some(e) => tracing::warn!("{:#}, using defaults", e),
        None => tracing::debug!(path = ?config_path, "config loaded"),
    }

    app::run(cli, config).await
}
