//! Innkeep: front-desk command line.
//!
//! Loads configuration, initialises logging, opens the data snapshot and
//! dispatches the requested command.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use innkeep_core::config::AppConfig;
use innkeep_core::error::AppError;

mod commands;
mod output;

use commands::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_configuration(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = cli.execute(config).await {
        output::print_error(&e.to_string());
        std::process::exit(1);
    }
}

/// Load configuration from `{dir}/default.toml`, `{dir}/{env}.toml` and
/// `INNKEEP__*` environment variables.
fn load_configuration(cli: &Cli) -> Result<AppConfig, AppError> {
    let env = std::env::var("INNKEEP_ENV").unwrap_or_else(|_| "development".to_string());
    let mut config = AppConfig::load_from(&cli.config_dir, &env)?;

    if let Some(path) = &cli.data {
        config.data.snapshot_path = path.clone();
    }

    Ok(config)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
