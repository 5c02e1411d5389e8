//! evoapi MCP server - Main entry point.

use anyhow::Context;
use evoapi_mcp::config::{Config, LogFormat};
use evoapi_mcp::error::AppResult;
use evoapi_mcp::{build_client, build_server};
use rmcp::transport::stdio;
use rmcp::ServiceExt;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> AppResult<()> {
    // Load configuration
    let config = Config::load().context("Failed to load configuration")?;

    // Initialize logging
    init_logging(&config.server.log_level, config.server.log_format);

    info!("Starting {} MCP server...", config.server.name);

    let client = build_client(&config)?;

    // Health checks
    if client.health_check().await {
        match client.connection_state().await {
            Ok(state) if state == "open" => {
                info!("WhatsApp instance '{}' connected", client.instance())
            }
            Ok(state) => warn!(
                "WhatsApp instance '{}' is not connected (state: {})",
                client.instance(),
                state
            ),
            Err(e) => warn!("Could not read connection state: {}", e),
        }
    } else {
        warn!(
            "Evolution API not reachable at {} - tools will fail until it is",
            config.evolution.base_url
        );
    }

    let server = build_server(&config, client);

    info!("Serving MCP on stdio (timezone: {})", config.server.timezone);
    let service = server
        .serve(stdio())
        .await
        .context("Failed to start MCP service")?;

    tokio::select! {
        result = service.waiting() => {
            result.context("MCP service terminated abnormally")?;
            info!("MCP client disconnected");
        }
        _ = signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }

    info!("Shutting down...");
    Ok(())
}

// stdout carries the MCP transport, so logs go to stderr.
fn init_logging(level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}
