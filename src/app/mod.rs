pub mod cli;
pub mod config;
pub mod dashboard;
mod error;
mod logging;
pub mod output;
mod runtime;
pub mod services;
pub mod upload;

use clap::Parser;

pub use error::AppError;

pub fn run() -> Result<(), AppError> {
    let cli = cli::Cli::parse();

    logging::init()?;

    let config = config::ClientConfig::from_env()?;

    tracing::info!(
        transport = %config.transport,
        redirect_delay_ms = config.redirect_delay_ms,
        alert_ttl_ms = config.alert_ttl_ms,
        map_zoom = config.map_zoom,
        dashboard_path = %config.dashboard_path,
        upload_path = %config.upload_path,
        date_format = %config.date_format,
        "client bootstrap initialized"
    );

    runtime::run(config, cli.command)
}
