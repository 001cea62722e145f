mod config;
mod constants;
mod formatters;
mod models;
mod service;

use anyhow::Result;
use rmcp::ServiceExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::service::Weather;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the MCP transport.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "openweather_mcp_server=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env()?;

    tracing::info!("Starting OpenWeather MCP server");

    let weather = Weather::new(config)?;
    let server = weather.serve(rmcp::transport::stdio()).await?;

    // On interrupt the running service is dropped, which closes the stdio
    // transport before the process exits.
    tokio::select! {
        result = server.waiting() => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Interrupt received, shutting down");
        }
    }

    tracing::info!("Server shutdown complete");
    Ok(())
}
