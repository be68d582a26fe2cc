use anyhow::{Context, Result};
use clap::Parser;
use sponsor_seeker::app_log;
use sponsor_seeker::cli::{handle_command, Cli};
use sponsor_seeker::core::ConfigManager;
use std::fs::OpenOptions;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "sponsor_seeker=info,rocket::server=off";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = ConfigManager::load()?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    if cli.command.is_server() {
        // Server logs go to a JSON file, cleared on startup
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&config.server.log_file)
            .with_context(|| {
                format!("Failed to open log file {}", config.server.log_file.display())
            })?;

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .json()
                    .with_writer(file)
                    .with_current_span(false)
                    .with_span_list(false),
            )
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(filter)
            .init();
    }

    app_log!(info, "Model: {}", config.search.model);
    app_log!(info, "Endpoint: {}", config.search.endpoint);

    handle_command(cli, config).await
}
