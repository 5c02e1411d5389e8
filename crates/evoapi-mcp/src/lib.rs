//! MCP server for WhatsApp groups and messages through the Evolution API.

pub mod config;
pub mod error;
pub mod server;

use crate::config::Config;
use evolution_client::{EvolutionClient, EvolutionError};
use secrecy::ExposeSecret;
use server::WhatsAppServer;
use std::sync::Arc;
use tracing::info;
use whatsapp_tools::{whatsapp, Gateway, ToolExecutor, ToolRegistry};

/// Create the Evolution client described by the configuration.
pub fn build_client(config: &Config) -> Result<EvolutionClient, EvolutionError> {
    let client = EvolutionClient::new(
        &config.evolution.base_url,
        config.evolution.api_key.expose_secret(),
        &config.evolution.instance,
        config.evolution.timeout,
    )?;

    Ok(client.with_time_zone(config.server.timezone))
}

/// Wire the client, gateway and tool registry into an MCP server.
pub fn build_server(config: &Config, client: EvolutionClient) -> WhatsAppServer {
    let client = Arc::new(client);
    let gateway = Gateway::new(client.clone(), client).with_time_zone(config.server.timezone);

    let mut registry = ToolRegistry::new();
    for tool in whatsapp::all_tools(Arc::new(gateway)) {
        registry.register(tool);
    }
    for name in config.tools.disabled() {
        info!(tool = name, "Tool disabled by configuration");
        registry.disable(name);
    }

    info!("Registered tools: {}", registry.list_enabled().join(", "));
    let executor = ToolExecutor::new(Arc::new(registry));
    WhatsAppServer::new(config.server.name.clone(), Arc::new(executor))
}
